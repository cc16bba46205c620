//! # TitleBar Component
//!
//! Top status bar: assistant name, session, status, and the "↓ New" marker.
//!
//! Purely presentational. Every field is a prop:
//! - `assistant_label`: from the active `ClientProfile`
//! - `session_short_id` and `status_message`: core `App` state
//! - `has_unseen_content`: TUI scroll state
//!
//! Layout, most important first so narrow terminals still show the name:
//!
//! 1. `"HERA | session 1a2b3c4d | Waiting for HERA... | ↓ New"`
//! 2. `"HERA | session 1a2b3c4d | Ready"`
//! 3. `"HERA | session 1a2b3c4d"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub assistant_label: String,
    pub session_short_id: String,
    pub status_message: String,
    /// Content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(
        assistant_label: String,
        session_short_id: String,
        status_message: String,
        has_unseen_content: bool,
    ) -> Self {
        Self {
            assistant_label,
            session_short_id,
            status_message,
            has_unseen_content,
        }
    }

    fn text(&self) -> String {
        let mut text = format!(
            "{} | session {}",
            self.assistant_label, self.session_short_id
        );
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.has_unseen_content {
            text.push_str(" | ↓ New");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_with_unseen_content() {
        let mut title_bar = TitleBar::new(
            "HERA".to_string(),
            "1a2b3c4d".to_string(),
            "Waiting for HERA...".to_string(),
            true,
        );
        let text = render(&mut title_bar);
        assert!(text.contains("HERA | session 1a2b3c4d"));
        assert!(text.contains("Waiting for HERA..."));
        assert!(text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "PACE".to_string(),
            "deadbeef".to_string(),
            "Ready".to_string(),
            false,
        );
        let text = render(&mut title_bar);
        assert!(text.contains("PACE | session deadbeef | Ready"));
        assert!(!text.contains("↓ New"));
    }

    #[test]
    fn test_title_bar_without_status() {
        let title_bar = TitleBar::new(
            "HERA".to_string(),
            "1a2b3c4d".to_string(),
            String::new(),
            false,
        );
        assert_eq!(title_bar.text(), "HERA | session 1a2b3c4d");
    }
}
