use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{TitleBar, TranscriptView};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    TranscriptView::new(
        &mut tui.transcript_view,
        &app.transcript,
        &app.session.id,
        &app.profile,
        app.typing.is_visible(),
        spinner_frame,
    )
    .render(frame, main_area);

    TitleBar::new(
        app.profile.assistant_label.clone(),
        app.session.short_id().to_string(),
        app.status_message.clone(),
        tui.transcript_view.has_unseen_content(),
    )
    .render(frame, title_area);

    tui.input_box.pending = app.is_pending();
    tui.input_box.render(frame, input_area);
}
