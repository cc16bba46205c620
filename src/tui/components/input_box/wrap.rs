//! Wrapping math and cursor placement for the InputBox.
//!
//! Stateless helpers plus `CursorState`; the text itself is owned by
//! `InputBox` and passed in explicitly.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

/// Border (2) + horizontal padding (2)
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// The box grows with its content up to this many lines, then scrolls.
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to the first content cell (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Content width inside the block, 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrapped line count, at least 1. A trailing newline opens a new line.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    wrapped_lines(text, width).len() as u16
}

/// Wrapped lines of `text`, with an explicit empty line after a trailing newline.
pub(super) fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }
    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(String::new());
    }
    lines
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Row and column of byte offset `pos` in the wrapped layout of `buffer`.
pub(super) fn cursor_cell(buffer: &str, pos: usize, width: u16) -> (u16, u16) {
    if width == 0 {
        return (0, 0);
    }
    let before = &buffer[..pos];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);

    // Rows taken by every logical line above the cursor's
    let rows_above = if line_start == 0 {
        0
    } else {
        wrap_line_count(&before[..line_start - 1], width)
    };

    let current = &before[line_start..];
    let segments = textwrap::wrap(current, wrap_options(width));
    let (row_in_line, col) = match segments.split_last() {
        None => (0, 0),
        Some((_, earlier)) => {
            // Width consumed by earlier segments; trailing spaces trimmed at
            // breaks are attributed to the current segment.
            let consumed: usize = earlier.iter().map(|s| s.width()).sum();
            let col = current.width().saturating_sub(consumed);
            (earlier.len() as u16, col as u16)
        }
    };

    (rows_above + row_in_line, col.min(width))
}

/// Cursor byte offset and internal scroll position.
pub(super) struct CursorState {
    /// Byte offset into the buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line (0 while content fits)
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Keep the cursor's row inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, area_width: u16) {
        let width = inner_width(area_width);
        if wrap_line_count(buffer, width) <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (row, _) = cursor_cell(buffer, self.pos, width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Terminal cell of the cursor for a box drawn in `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let (row, col) = cursor_cell(buffer, self.pos, inner_width(area.width));
        let visible_row = row.saturating_sub(self.scroll_offset);
        (
            area.x + CONTENT_OFFSET_X + col,
            area.y + CONTENT_OFFSET_Y + visible_row,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_line_count_empty_is_one() {
        assert_eq!(wrap_line_count("", 10), 1);
        assert_eq!(wrap_line_count("abc", 0), 1);
    }

    #[test]
    fn test_wrap_line_count_counts_trailing_newline() {
        assert_eq!(wrap_line_count("abc", 10), 1);
        assert_eq!(wrap_line_count("abc\n", 10), 2);
        assert_eq!(wrap_line_count("a\nb\nc", 10), 3);
    }

    #[test]
    fn test_wrap_line_count_wraps_long_lines() {
        // "hello world" at width 5 → "hello" | "world"
        assert_eq!(wrap_line_count("hello world", 5), 2);
    }

    #[test]
    fn test_char_boundaries_respect_multibyte() {
        let text = "aé b";
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(prev_char_boundary(text, 3), 1);
        assert_eq!(prev_char_boundary(text, 0), 0);
        assert_eq!(next_char_boundary(text, text.len()), text.len());
    }

    #[test]
    fn test_cursor_cell_single_line() {
        assert_eq!(cursor_cell("hello", 0, 20), (0, 0));
        assert_eq!(cursor_cell("hello", 5, 20), (0, 5));
    }

    #[test]
    fn test_cursor_cell_after_newline() {
        assert_eq!(cursor_cell("ab\n", 3, 20), (1, 0));
        assert_eq!(cursor_cell("ab\ncd", 5, 20), (1, 2));
        assert_eq!(cursor_cell("\n\nx", 3, 20), (2, 1));
    }

    #[test]
    fn test_cursor_cell_on_wrapped_segment() {
        // "hello world" at width 5: cursor at end sits on row 1
        let (row, col) = cursor_cell("hello world", 11, 5);
        assert_eq!(row, 1);
        assert!(col <= 5);
    }

    #[test]
    fn test_scroll_offset_follows_cursor() {
        let buffer = "1\n2\n3\n4\n5\n6\n7";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        cursor.update_scroll_offset(buffer, 20);
        // 7 lines, 5 visible, cursor on the last → first visible is line 2
        assert_eq!(cursor.scroll_offset, 2);

        cursor.pos = 0;
        cursor.update_scroll_offset(buffer, 20);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn test_screen_pos_includes_border_and_padding() {
        let cursor = CursorState { pos: 3, scroll_offset: 0 };
        let area = Rect::new(10, 20, 30, 3);
        assert_eq!(cursor.screen_pos("abc", area), (15, 21));
    }
}
