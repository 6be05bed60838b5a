//! GUI renderer (reads state, produces widgets; no mutation).

mod constants;
mod panel;

use iced::Length;
use iced::widget::{button, column, row, text};

use super::state::{Demo, Message};
use constants::{PANEL_W, STATUS_TEXT, TITLE_TEXT};

pub(crate) fn view(state: &Demo) -> iced::widget::Column<'_, Message> {
    let toggle_label = if state.panel.is_some() {
        "Hide panel"
    } else {
        "Show panel"
    };

    let header = row![
        text("worker-fn").size(TITLE_TEXT),
        button(toggle_label).on_press(Message::TogglePanel),
    ]
    .spacing(12);

    let body: iced::Element<'_, Message> = match state.panel.as_ref() {
        Some(p) => panel::build_panel(state, p)
            .width(Length::Fixed(PANEL_W))
            .into(),
        None => text("Panel hidden (worker unmounted).").into(),
    };

    column![
        header,
        text(&state.status).size(STATUS_TEXT),
        body,
        text(format!("Runs completed: {}", state.runs_completed)).size(STATUS_TEXT),
    ]
    .spacing(12)
    .padding(12)
}
