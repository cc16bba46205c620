use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::config::ClientProfile;
use crate::core::turn::{AnnotationKind, Role, Turn};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Top + bottom borders, plus the meta line (time and chips).
const VERTICAL_OVERHEAD: u16 = 2 + META_LINES;
const META_LINES: u16 = 1;

/// A stateless component that paints one turn of the transcript.
///
/// Layout:
///
/// ```text
/// ╭ H HERA ──────────────────────────╮
/// │ Let's stay calm...               │
/// │ 19:42  guard=SAFE 0.92  OK       │
/// ╰──────────────────────────────────╯
/// ```
///
/// User turns are green, assistant turns blue, refused turns get a red border.
/// Chips are colored by kind: Ok green, Warn yellow, Bad red.
#[derive(Clone, Copy)]
pub struct TurnView<'a> {
    pub turn: &'a Turn,
    pub profile: &'a ClientProfile,
}

impl<'a> TurnView<'a> {
    pub fn new(turn: &'a Turn, profile: &'a ClientProfile) -> Self {
        Self { turn, profile }
    }

    /// Rendered height at `width`, predicted with `textwrap` options that
    /// match `Paragraph`'s word wrapping so the list can lay out without drawing.
    pub fn calculate_height(turn: &Turn, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        text_lines(turn, content_width).saturating_add(VERTICAL_OVERHEAD)
    }

    fn title(&self) -> String {
        match self.turn.role {
            Role::User => String::from(" U you "),
            Role::Assistant => format!(
                " {} {} ",
                self.profile.avatar_char, self.profile.assistant_label
            ),
        }
    }

    fn meta_line(&self) -> Line<'a> {
        let mut spans = vec![Span::styled(
            self.turn.clock(),
            Style::default().fg(Color::DarkGray),
        )];
        for chip in &self.turn.annotations {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!(" {} ", chip.label),
                chip_style(chip.kind),
            ));
        }
        Line::from(spans)
    }
}

fn text_lines(turn: &Turn, content_width: u16) -> u16 {
    let text = turn.text.trim();
    if text.is_empty() {
        return 0;
    }
    let options = textwrap::Options::new(content_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    u16::try_from(textwrap::wrap(text, options).len())
        .unwrap_or(u16::MAX)
        .max(1)
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Assistant => Style::default().fg(Color::Blue),
    }
}

pub fn chip_style(kind: AnnotationKind) -> Style {
    let bg = match kind {
        AnnotationKind::Ok => Color::Green,
        AnnotationKind::Warn => Color::Yellow,
        AnnotationKind::Bad => Color::Red,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

impl<'a> Widget for TurnView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = role_style(self.turn.role);
        let border_style = if self.turn.refused {
            Style::default().fg(Color::Red)
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let meta_y = inner.y + inner.height.saturating_sub(META_LINES);
        let text_area = Rect::new(inner.x, inner.y, inner.width, meta_y - inner.y);
        let meta_area = Rect::new(inner.x, meta_y, inner.width, META_LINES.min(inner.height));

        Paragraph::new(self.turn.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);
        Paragraph::new(self.meta_line()).render(meta_area, buf);
    }
}

impl<'a> Component for TurnView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
