//! # Actions
//!
//! Everything that can happen in Hera becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::ResponseReceived { .. }`.
//!
//! `update()` applies an action to the `App` and returns an `Effect` for the
//! adapter to carry out. No I/O happens here.
//!
//! ```text
//! App + Action  →  update()  →  App' + Effect
//! ```
//!
//! Request lifecycle:
//!
//! ```text
//!   Idle ──Submit(valid)──▶ Pending ──ResponseReceived──▶ Idle
//!   Idle ──Submit(empty)──▶ Idle
//!   Pending ──Submit(..)──▶ Pending   (dropped)
//! ```

use log::{debug, info, warn};
use serde_json::Value;

use crate::core::annotate::{annotate, failure_annotations};
use crate::core::state::{App, RequestState};
use crate::core::turn::Turn;
use crate::transport::{ChatRequest, TransportError};

/// Text of the synthetic assistant turn shown when a request fails.
pub const FAILURE_TEXT: &str =
    "Sorry, something went wrong calling the server. Check the backend logs and try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Raw text from the input surface.
    Submit(String),
    /// Outcome of the in-flight request, tagged with the session it was sent for.
    ResponseReceived {
        session_id: String,
        outcome: Result<Value, TransportError>,
    },
    /// Throw away the transcript and start over under a new session id.
    NewConversation,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// A submit arrived while a request was pending and was ignored.
    Dropped,
    /// Send `request`; report back with `Action::ResponseReceived { session_id, .. }`.
    SpawnRequest {
        session_id: String,
        request: ChatRequest,
    },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(raw) => submit(app, &raw),
        Action::ResponseReceived {
            session_id,
            outcome,
        } => {
            receive(app, &session_id, outcome);
            Effect::None
        }
        Action::NewConversation => {
            app.start_new_conversation();
            info!("New conversation started: session={}", app.session.id);
            app.status_message = if app.is_pending() {
                String::from("New conversation started (previous reply will be discarded)")
            } else {
                String::from("New conversation started")
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, raw: &str) -> Effect {
    let situation = raw.trim();
    if situation.is_empty() {
        debug!("Ignoring empty submit");
        return Effect::None;
    }
    if app.is_pending() {
        debug!("Dropping submit while a request is pending");
        return Effect::Dropped;
    }

    app.transcript.push(Turn::user(situation.to_string()));
    app.request_state = RequestState::Pending;
    app.typing.show();
    app.status_message = format!("Waiting for {}...", app.profile.assistant_label);

    let session_id = app.session.id.clone();
    let request = ChatRequest {
        situation: situation.to_string(),
        session_id: app.profile.send_session_id.then(|| session_id.clone()),
    };
    info!("Submitting turn {} (session={})", app.transcript.len(), session_id);
    Effect::SpawnRequest {
        session_id,
        request,
    }
}

fn receive(app: &mut App, session_id: &str, outcome: Result<Value, TransportError>) {
    if !app.is_pending() {
        warn!("Ignoring response with no request pending (session={})", session_id);
        return;
    }
    // Settle the request before touching the transcript.
    app.request_state = RequestState::Idle;
    app.typing.hide();

    if session_id != app.session.id {
        info!(
            "Discarding late response for previous session {} (current={})",
            session_id, app.session.id
        );
        app.status_message = String::from("Ready");
        return;
    }

    match outcome {
        Ok(payload) => {
            let report = annotate(&payload, app.profile.include_success_annotation);
            debug!(
                "Assistant reply: len={}, refused={}, chips={}",
                report.text.len(),
                report.refused,
                report.annotations.len()
            );
            app.transcript
                .push(Turn::assistant(report.text, report.annotations, report.refused));
            app.status_message = String::from("Ready");
        }
        Err(e) => {
            warn!("Chat request failed: {}", e);
            app.transcript.push(Turn::assistant(
                FAILURE_TEXT.to_string(),
                failure_annotations(),
                true,
            ));
            app.status_message = format!("Request failed: {e}");
        }
    }
}
