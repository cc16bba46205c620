//! # TranscriptView Component
//!
//! Scrollable, append-only view of the conversation.
//!
//! ## Responsibilities
//!
//! - Paint every turn in transcript order, never reordering or restyling old ones
//! - Paint the typing indicator after the last turn while it is visible
//! - Stick to the bottom after every append unless the user scrolled away
//! - Cache turn heights
//!
//! ## Architecture
//!
//! `TranscriptView` is a transient component (created each frame) that wraps
//! `&'a mut TranscriptViewState` (persistent state) and the `Transcript` (props).
//! Turns never change once pushed, so a cached height stays valid until the
//! width changes or a new session replaces the transcript.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::config::ClientProfile;
use crate::core::turn::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::turn_view::TurnView;
use crate::tui::event::TuiEvent;

/// Rows taken by the typing indicator (blank spacer + dots).
const TYPING_ROWS: u16 = 2;

/// Scroll and layout state for the transcript.
/// Must be persisted in the parent TuiState.
pub struct TranscriptViewState {
    pub scroll_state: ScrollViewState,
    pub layout: HeightCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Height of the scroll canvas drawn last frame
    pub canvas_height: u16,
}

impl Default for TranscriptViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: HeightCache::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            canvas_height: 0,
        }
    }

    /// Content below the viewport the user has not seen.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom
    }

    /// Jump to the newest turn on the next frame.
    pub fn follow_latest(&mut self) {
        self.stick_to_bottom = true;
    }

    fn max_offset(&self) -> u16 {
        self.canvas_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Per-turn rendered heights for one session at one width.
///
/// Bottom edges are kept in `u32`: a long session can outgrow the `u16` rows
/// of a ratatui canvas, and only the renderer clamps to that.
#[derive(Default)]
pub struct HeightCache {
    pub heights: Vec<u16>,
    /// `prefix_heights[i]` = bottom edge of turn `i`
    pub prefix_heights: Vec<u32>,
    session_id: String,
    content_width: u16,
}

impl HeightCache {
    /// Drop everything if the session or width changed, then measure any
    /// turns appended since the last frame.
    pub fn sync(&mut self, session_id: &str, transcript: &Transcript, content_width: u16) {
        if self.session_id != session_id
            || self.content_width != content_width
            || self.heights.len() > transcript.len()
        {
            self.heights.clear();
            self.prefix_heights.clear();
            self.session_id = session_id.to_string();
            self.content_width = content_width;
        }

        for turn in transcript.iter().skip(self.heights.len()) {
            let height = TurnView::calculate_height(turn, content_width);
            let bottom = self.total_height().saturating_add(u32::from(height));
            self.heights.push(height);
            self.prefix_heights.push(bottom);
        }
    }

    pub fn total_height(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Indices of turns intersecting `[offset, offset + viewport)`.
    pub fn visible_range(&self, offset: u32, viewport: u16) -> std::ops::Range<usize> {
        let start = self.prefix_heights.partition_point(|&bottom| bottom <= offset);
        let end = self
            .prefix_heights
            .partition_point(|&bottom| bottom < offset.saturating_add(u32::from(viewport)))
            .saturating_add(1)
            .min(self.heights.len());
        start..end.max(start)
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct TranscriptView<'a> {
    pub state: &'a mut TranscriptViewState,
    pub transcript: &'a Transcript,
    pub session_id: &'a str,
    pub profile: &'a ClientProfile,
    pub typing: bool,
    pub spinner_frame: usize,
}

impl<'a> TranscriptView<'a> {
    pub fn new(
        state: &'a mut TranscriptViewState,
        transcript: &'a Transcript,
        session_id: &'a str,
        profile: &'a ClientProfile,
        typing: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            session_id,
            profile,
            typing,
            spinner_frame,
        }
    }

    fn typing_line(&self) -> Line<'static> {
        // One dot lit at a time, cycling left to right
        let lit = (self.spinner_frame / 3) % 3;
        let mut spans = vec![Span::styled(
            format!("{} is typing ", self.profile.assistant_label),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )];
        for i in 0..3 {
            let style = if i == lit {
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled("● ", style));
        }
        Line::from(spans)
    }
}

impl<'a> Component for TranscriptView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        self.state
            .layout
            .sync(self.session_id, self.transcript, content_width);
        let typing_rows = if self.typing { TYPING_ROWS } else { 0 };

        // The canvas holds at most u16::MAX rows: only the newest rows of a
        // longer transcript are reachable, `base` is where that window starts.
        let total_height = self.state.layout.total_height();
        let base = total_height.saturating_sub(u32::from(u16::MAX - typing_rows));
        let content_rows = u16::try_from(total_height - base).unwrap_or(u16::MAX);
        let canvas_height = content_rows + typing_rows;

        // Settle the offset before picking which turns to paint
        self.state.viewport_height = area.height;
        self.state.canvas_height = canvas_height;
        if self.state.stick_to_bottom {
            self.state.scroll_state.set_offset(Position {
                x: 0,
                y: canvas_height.saturating_sub(area.height),
            });
        } else {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self
            .state
            .layout
            .visible_range(base + u32::from(scroll_offset), area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible {
            let Some(turn) = self.transcript.get(i) else {
                break;
            };
            let height = self.state.layout.heights[i];
            let top = self.state.layout.prefix_heights[i] - u32::from(height);
            // Starts before the reachable window
            if top < base {
                continue;
            }
            let local_top = u16::try_from(top - base).unwrap_or(u16::MAX);
            let rect = Rect::new(
                0,
                local_top,
                content_width,
                height.min(content_rows - local_top),
            );
            scroll_view.render_widget(TurnView::new(turn, self.profile), rect);
        }

        if self.typing {
            let rect = Rect::new(1, content_rows + 1, content_width.saturating_sub(1), 1);
            scroll_view.render_widget(Paragraph::new(self.typing_line()), rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on the state because `TranscriptView` is rebuilt every frame.
impl EventHandler for TranscriptViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::turn::Turn;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn transcript_of(texts: &[&str]) -> Transcript {
        let mut transcript = Transcript::new();
        for text in texts {
            transcript.push(Turn::user(text.to_string()));
        }
        transcript
    }

    fn render(
        state: &mut TranscriptViewState,
        transcript: &Transcript,
        typing: bool,
        width: u16,
        height: u16,
    ) -> String {
        let profile = ClientProfile::hera();
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let mut view = TranscriptView::new(state, transcript, "s1", &profile, typing, 0);
                view.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_height_cache_appends_only_new_turns() {
        let mut cache = HeightCache::default();
        let mut transcript = transcript_of(&["one"]);
        cache.sync("s1", &transcript, 40);
        assert_eq!(cache.heights.len(), 1);
        let first = cache.heights[0];

        transcript.push(Turn::user("two".to_string()));
        cache.sync("s1", &transcript, 40);
        assert_eq!(cache.heights.len(), 2);
        assert_eq!(cache.heights[0], first);
        assert_eq!(
            cache.total_height(),
            cache.heights.iter().map(|&h| u32::from(h)).sum::<u32>()
        );
    }

    #[test]
    fn test_height_cache_invalidates_on_new_session_or_width() {
        let mut cache = HeightCache::default();
        let transcript = transcript_of(&["a fairly long line of text that will wrap"]);
        cache.sync("s1", &transcript, 80);
        let wide = cache.heights[0];

        cache.sync("s1", &transcript, 12);
        assert!(cache.heights[0] > wide);

        let other = transcript_of(&["x", "y"]);
        cache.sync("s2", &other, 12);
        assert_eq!(cache.heights.len(), 2);
    }

    #[test]
    fn test_visible_range() {
        let mut cache = HeightCache::default();
        let transcript = transcript_of(&["a", "b", "c", "d"]);
        cache.sync("s1", &transcript, 40);
        let h = cache.heights[0];
        assert!(cache.heights.iter().all(|&x| x == h));

        assert_eq!(cache.visible_range(0, h), 0..1);
        assert_eq!(cache.visible_range(u32::from(h), h * 2), 1..3);
        assert_eq!(cache.visible_range(0, h * 10), 0..4);
        assert_eq!(cache.visible_range(u32::from(h) * 10, h), 4..4);
    }

    #[test]
    fn test_render_paints_turns_in_order() {
        let mut state = TranscriptViewState::new();
        let transcript = transcript_of(&["first message", "second message"]);
        let text = render(&mut state, &transcript, false, 40, 20);
        let first = text.find("first message").unwrap();
        let second = text.find("second message").unwrap();
        assert!(first < second);
        assert!(!text.contains("is typing"));
    }

    #[test]
    fn test_typing_indicator_follows_last_turn() {
        let mut state = TranscriptViewState::new();
        let transcript = transcript_of(&["hello"]);
        let text = render(&mut state, &transcript, true, 40, 20);
        let turn = text.find("hello").unwrap();
        let typing = text.find("HERA is typing").unwrap();
        assert!(turn < typing);
    }

    #[test]
    fn test_sticks_to_latest_turn() {
        let mut state = TranscriptViewState::new();
        let texts: Vec<String> = (0..20).map(|i| format!("message {i:02}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let transcript = transcript_of(&refs);

        let text = render(&mut state, &transcript, false, 40, 10);
        assert!(text.contains("message 19"));
        assert!(!text.contains("message 00"));
    }

    fn long_transcript(turns: usize) -> Transcript {
        let mut transcript = Transcript::new();
        for i in 0..turns {
            transcript.push(Turn::user(format!("m{i}")));
        }
        transcript
    }

    #[test]
    fn test_height_cache_grows_past_u16_rows() {
        let transcript = long_transcript(20_000);
        let mut cache = HeightCache::default();
        cache.sync("s1", &transcript, 80);

        let per_turn = u32::from(cache.heights[0]);
        assert_eq!(cache.total_height(), per_turn * 20_000);
        assert!(cache.total_height() > u32::from(u16::MAX));
        assert!(cache.prefix_heights.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_past_u16_rows_shows_latest_turn() {
        let transcript = long_transcript(20_000);
        let mut state = TranscriptViewState::new();
        let text = render(&mut state, &transcript, true, 12, 10);
        assert!(text.contains("m19999"));
        assert_eq!(state.canvas_height, u16::MAX);
    }

    #[test]
    fn test_follow_latest_repins_after_scrolling_away() {
        let texts: Vec<String> = (0..20).map(|i| format!("message {i:02}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut transcript = transcript_of(&refs);
        let mut state = TranscriptViewState::new();
        render(&mut state, &transcript, false, 40, 10);

        for _ in 0..30 {
            state.handle_event(&TuiEvent::ScrollUp);
        }
        transcript.push(Turn::user("reply arrived".to_string()));
        let text = render(&mut state, &transcript, false, 40, 10);
        assert!(!text.contains("reply arrived"));

        state.follow_latest();
        let text = render(&mut state, &transcript, false, 40, 10);
        assert!(text.contains("reply arrived"));
        assert!(!state.has_unseen_content());
    }

    #[test]
    fn test_scroll_up_unpins_and_scroll_to_bottom_repins() {
        let mut state = TranscriptViewState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(state.has_unseen_content());
        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(!state.has_unseen_content());
    }
}
