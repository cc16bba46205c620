use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use log::warn;
use std::time::Duration;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Routed to core::update
    Quit,
    Commit, // Enter without Shift/Alt
    NewConversation,

    // TUI-local events (handled directly in TUI)
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(event) => map_event(event),
        Err(e) => {
            warn!("Event read failed: {}", e);
            None
        }
    }
}

fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => map_key_event(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Translate a key press. Enter commits only when no newline modifier
/// (Shift or Alt) is held; Ctrl+J always inserts a newline.
pub fn map_key_event(key_event: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);

    let mods = key_event.modifiers;
    let ctrl = mods.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('c') if ctrl => Some(TuiEvent::Quit),
        KeyCode::Char('n') if ctrl => Some(TuiEvent::NewConversation),
        KeyCode::Char('j') if ctrl => Some(TuiEvent::InputChar('\n')),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Enter if mods.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            Some(TuiEvent::InputChar('\n'))
        }
        KeyCode::Enter => Some(TuiEvent::Commit),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End if ctrl => Some(TuiEvent::ScrollToBottom),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::Up => Some(TuiEvent::ScrollUp),
        KeyCode::Down => Some(TuiEvent::ScrollDown),
        KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
        KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
        KeyCode::Esc => Some(TuiEvent::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_enter_commits() {
        assert_eq!(
            map_key_event(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(TuiEvent::Commit)
        );
    }

    #[test]
    fn test_shift_enter_inserts_newline_instead_of_committing() {
        assert_eq!(
            map_key_event(key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('\n'))
        );
        assert_eq!(
            map_key_event(key(KeyCode::Enter, KeyModifiers::ALT)),
            Some(TuiEvent::InputChar('\n'))
        );
        assert_eq!(
            map_key_event(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(TuiEvent::InputChar('\n'))
        );
    }

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(
            map_key_event(key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(TuiEvent::NewConversation)
        );
        assert_eq!(
            map_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Quit)
        );
        // Unbound Ctrl chords never reach the input buffer
        assert_eq!(map_key_event(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_shifted_characters_are_typed() {
        assert_eq!(
            map_key_event(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('A'))
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut release = key(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(release), None);
    }

    #[test]
    fn test_end_vs_ctrl_end() {
        assert_eq!(
            map_key_event(key(KeyCode::End, KeyModifiers::NONE)),
            Some(TuiEvent::CursorEnd)
        );
        assert_eq!(
            map_key_event(key(KeyCode::End, KeyModifiers::CONTROL)),
            Some(TuiEvent::ScrollToBottom)
        );
    }

    #[test]
    fn test_paste_and_resize_events() {
        assert_eq!(
            map_event(Event::Paste("a\nb".to_string())),
            Some(TuiEvent::Paste("a\nb".to_string()))
        );
        assert_eq!(map_event(Event::Resize(80, 24)), Some(TuiEvent::Resize));
    }
}
