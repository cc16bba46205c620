//! # InputBox Component
//!
//! The input surface: captures typing and turns Enter into a commit.
//!
//! ## Responsibilities
//!
//! - Capture text input, paste, and cursor editing
//! - Emit `InputEvent::Commit` with the raw buffer on Enter
//! - Auto-size: grow with wrapped content up to `MAX_VISIBLE_LINES`, then scroll
//!
//! ## State Management
//!
//! The buffer is internal state. A commit does not clear it: the parent decides,
//! after hearing the controller's verdict, whether to call [`InputBox::clear`].
//! `pending` and `assistant_label` are props from the application state.

mod wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use wrap::{
    CursorState, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary,
    prev_char_boundary, wrap_line_count, wrapped_lines,
};

const PLACEHOLDER: &str = "Describe what is happening...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User committed the current text (Enter pressed)
    Commit(String),
    /// Text or cursor changed
    ContentChanged,
}

/// Text input component.
///
/// # Props
///
/// - `pending`: a request is in flight; the box is drawn dimmed
/// - `assistant_label`: shown in the title while waiting
pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Request in flight (Prop)
    pub pending: bool,
    /// Assistant display name (Prop)
    pub assistant_label: String,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(assistant_label: String) -> Self {
        Self {
            buffer: String::new(),
            pending: false,
            assistant_label,
            cursor: CursorState::new(),
        }
    }

    /// Empty the buffer and shrink back to a single line.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    /// Height for the current content: one line when empty, up to
    /// `MAX_VISIBLE_LINES`, plus borders.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let lines = wrap_line_count(&self.buffer, inner_width(area_width));
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn visible_text(&self, area_width: u16) -> String {
        let lines = wrapped_lines(&self.buffer, inner_width(area_width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    fn title(&self) -> String {
        if self.pending {
            format!("Message (waiting for {}...)", self.assistant_label)
        } else {
            String::from("Message (Enter to send, Shift+Enter for newline)")
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let mut style = Style::default().fg(Color::Green);
        if self.pending {
            style = style.add_modifier(Modifier::DIM);
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title(self.title())
            .border_style(style);

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(self.visible_text(area.width)).style(style)
        };

        frame.render_widget(paragraph.block(block), area);
        frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Normalize CRLF from some terminals' bracketed paste
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.cursor.pos, &text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Commit => Some(InputEvent::Commit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn input_box() -> InputBox {
        InputBox::new("HERA".to_string())
    }

    fn type_text(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_handle_input() {
        let mut input = input_box();

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");

        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_commit_hands_off_raw_text_without_clearing() {
        let mut input = input_box();
        type_text(&mut input, "  hello ");

        let res = input.handle_event(&TuiEvent::Commit);
        assert_eq!(res, Some(InputEvent::Commit("  hello ".to_string())));
        assert_eq!(input.buffer, "  hello ");
    }

    #[test]
    fn test_commit_on_empty_buffer_still_emits() {
        let mut input = input_box();
        assert_eq!(
            input.handle_event(&TuiEvent::Commit),
            Some(InputEvent::Commit(String::new()))
        );
    }

    #[test]
    fn test_clear_resets_buffer_and_height() {
        let mut input = input_box();
        type_text(&mut input, "a\nb\nc\nd");
        assert_eq!(input.calculate_height(40), 4 + VERTICAL_OVERHEAD);

        input.clear();
        assert!(input.buffer.is_empty());
        assert_eq!(input.calculate_height(40), 1 + VERTICAL_OVERHEAD);
        type_text(&mut input, "x");
        assert_eq!(input.buffer, "x");
    }

    #[test]
    fn test_height_is_capped() {
        let mut input = input_box();
        type_text(&mut input, "1\n2\n3\n4\n5\n6\n7\n8");
        assert_eq!(input.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_cursor_editing() {
        let mut input = input_box();
        type_text(&mut input, "ac");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "abc");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "bc");

        input.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(input.handle_event(&TuiEvent::CursorRight), None);
        input.handle_event(&TuiEvent::InputChar('d'));
        assert_eq!(input.buffer, "bcd");
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut input = input_box();
        input.handle_event(&TuiEvent::Paste("one\r\ntwo".to_string()));
        assert_eq!(input.buffer, "one\ntwo");
    }

    #[test]
    fn test_multibyte_backspace() {
        let mut input = input_box();
        type_text(&mut input, "né");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "n");
    }

    #[test]
    fn test_render_shows_hint_and_placeholder() {
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = input_box();

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Enter to send"));
        assert!(text.contains(PLACEHOLDER));
    }

    #[test]
    fn test_render_while_pending_names_assistant() {
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = input_box();
        input.pending = true;

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("waiting for HERA"));
    }
}
