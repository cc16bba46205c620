//! # Application State
//!
//! Core conversation state for Hera. Domain data only; presentation state
//! (scroll position, input buffer) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── profile: ClientProfile        // label, avatar, chip + session policy
//! ├── greeting: String              // first assistant turn of every conversation
//! ├── session: Session              // current conversation identity
//! ├── transcript: Transcript        // append-only turn history
//! ├── request_state: RequestState   // Idle | Pending (single-flight)
//! ├── typing: TypingIndicator       // "assistant is typing" placeholder
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::annotate::greeting_annotations;
use crate::core::config::{ClientProfile, ResolvedConfig};
use crate::core::session::Session;
use crate::core::turn::{Transcript, Turn};

/// Whether a request is in flight. At most one ever is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
}

/// Singleton placeholder shown after the last turn while waiting for a reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypingIndicator {
    visible: bool,
}

impl TypingIndicator {
    /// Show the indicator. Returns `false` if it was already showing.
    pub fn show(&mut self) -> bool {
        !std::mem::replace(&mut self.visible, true)
    }

    /// Hide the indicator. Returns `false` if it was not showing.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

pub struct App {
    pub profile: ClientProfile,
    pub greeting: String,
    pub session: Session,
    pub transcript: Transcript,
    pub request_state: RequestState,
    pub typing: TypingIndicator,
    pub status_message: String,
}

impl App {
    /// Build an App and open its first conversation.
    pub fn new(profile: ClientProfile, greeting: String) -> Self {
        let mut app = Self {
            profile,
            greeting,
            session: Session::new(),
            transcript: Transcript::new(),
            request_state: RequestState::Idle,
            typing: TypingIndicator::default(),
            status_message: String::new(),
        };
        app.transcript.push(app.greeting_turn());
        app.status_message = String::from("Ready");
        app
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.profile.clone(), config.greeting.clone())
    }

    pub fn is_pending(&self) -> bool {
        self.request_state == RequestState::Pending
    }

    /// Replace the session and transcript with a fresh conversation that
    /// opens on the greeting. Request state is left untouched.
    pub(crate) fn start_new_conversation(&mut self) {
        self.session = Session::succeeding(&self.session);
        self.transcript = Transcript::new();
        self.transcript.push(self.greeting_turn());
    }

    fn greeting_turn(&self) -> Turn {
        Turn::assistant(self.greeting.clone(), greeting_annotations(), false)
    }
}
