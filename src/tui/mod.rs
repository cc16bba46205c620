//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values and carries out the
//! `Effect`s that `update()` returns.
//!
//! This is the only module that knows about ratatui, crossterm and tokio tasks.
//!
//! ## Redraw Strategy
//!
//! - **Typing** (request in flight): draws every ~80ms to animate the dots.
//! - **Idle**: sleeps up to 500ms, only redraws on events, responses or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::JoinHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::{ClientProfile, ResolvedConfig};
use crate::core::state::App;
use crate::transport::{ChatRequest, ChatTransport, HttpTransport, TransportError};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, TranscriptViewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub transcript_view: TranscriptViewState,
    pub input_box: InputBox,
}

impl TuiState {
    pub fn new(profile: &ClientProfile) -> Self {
        Self {
            transcript_view: TranscriptViewState::new(),
            input_box: InputBox::new(profile.assistant_label.clone()),
        }
    }
}

/// Terminal modes for the session. Dropping it restores the terminal,
/// including when `run` returns early with an error.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter be told apart from Enter;
        // terminals without it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
        ratatui::restore();
    }
}

/// The single path from the input surface into the controller.
///
/// Submits `text` and clears the input box unless the submit was dropped
/// because a request is pending (and `clear_on_dropped` is off), so the
/// user's words survive a busy assistant.
pub fn commit_input(
    app: &mut App,
    input_box: &mut InputBox,
    text: String,
    clear_on_dropped: bool,
) -> Effect {
    let effect = update(app, Action::Submit(text));
    if effect != Effect::Dropped || clear_on_dropped {
        input_box.clear();
    }
    effect
}

/// Apply an action delivered by a request task. Every response changes
/// what is on screen, so the view follows the newest turn again.
pub fn apply_background_action(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let effect = update(app, action);
    tui.transcript_view.follow_latest();
    effect
}

/// Send `request` on a background task and report back exactly once.
///
/// The exchange runs on its own inner task so that a panic inside the
/// transport still produces an `Action::ResponseReceived` (as
/// `TransportError::Aborted`) and the controller leaves Pending.
pub fn spawn_request(
    transport: Arc<dyn ChatTransport>,
    session_id: String,
    request: ChatRequest,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!(
        "Spawning chat request via {} (session={})",
        transport.name(),
        session_id
    );
    tokio::spawn(async move {
        let started = Instant::now();
        let exchange = tokio::spawn(async move { transport.send(&request).await });
        let outcome = match exchange.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Chat request task failed: {}", e);
                Err(TransportError::Aborted(e.to_string()))
            }
        };
        debug!(
            "Chat request finished in {}ms (ok={})",
            started.elapsed().as_millis(),
            outcome.is_ok()
        );
        if tx
            .send(Action::ResponseReceived {
                session_id,
                outcome,
            })
            .is_err()
        {
            warn!("Failed to deliver chat response: receiver dropped");
        }
    })
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let transport: Arc<dyn ChatTransport> = Arc::new(
        HttpTransport::new(&config.base_url, config.request_timeout)
            .map_err(std::io::Error::other)?,
    );
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&app.profile);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new().unwrap_or_else(|e| {
        warn!("Failed to enable terminal modes: {}", e);
        TerminalModeGuard
    });

    // Responses from background request tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        let animating = app.typing.is_visible();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain every pending event before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        break 'event_loop;
                    }
                }
                TuiEvent::NewConversation => {
                    update(&mut app, Action::NewConversation);
                    tui.transcript_view = TranscriptViewState::new();
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.transcript_view.handle_event(&event);
                }
                _ => {
                    if let Some(InputEvent::Commit(text)) = tui.input_box.handle_event(&event) {
                        let effect = commit_input(
                            &mut app,
                            &mut tui.input_box,
                            text,
                            config.clear_on_dropped_submit,
                        );
                        match effect {
                            Effect::SpawnRequest {
                                session_id,
                                request,
                            } => {
                                tui.transcript_view.follow_latest();
                                spawn_request(transport.clone(), session_id, request, tx.clone());
                            }
                            Effect::Dropped => {
                                debug!("Submit dropped while pending");
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        // Responses from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply_background_action(&mut app, &mut tui, action) == Effect::Quit {
                break 'event_loop;
            }
        }
    }

    Ok(())
}
