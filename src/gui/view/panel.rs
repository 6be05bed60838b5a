//! Prime panel (limit input, run/terminate, busy indicator, last result).

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Length};

use super::super::state::{Demo, Message, PrimePanel};
use super::super::util::fmt_elapsed;
use super::constants::{LABEL_W, RESULT_TEXT};

pub(crate) fn build_panel<'a>(
    state: &'a Demo,
    panel: &'a PrimePanel,
) -> iced::widget::Container<'a, Message> {
    let busy = panel.is_running();

    let limit_input = if busy {
        text_input("Limit", &state.limit_input).width(Length::Fill)
    } else {
        text_input("Limit", &state.limit_input)
            .on_input(Message::LimitInputChanged)
            .on_submit(Message::RunPressed)
            .width(Length::Fill)
    };

    let limit_row = row![text("Count to").width(Length::Fixed(LABEL_W)), limit_input]
        .spacing(8)
        .align_y(Alignment::Center);

    let run_btn = if busy {
        button("Running...")
    } else {
        button("Run").on_press(Message::RunPressed)
    };

    let terminate_btn = if busy {
        button("Terminate").on_press(Message::TerminatePressed)
    } else {
        button("Terminate")
    };

    let indicator = if busy {
        format!("● busy {}", fmt_elapsed(state.elapsed_ms))
    } else {
        "○ idle".to_string()
    };

    let worker_line = match panel.runner.handle_id() {
        Some(id) => format!("Worker thread #{id}"),
        None => "No worker thread yet".to_string(),
    };

    let result = state.last_result.as_deref().unwrap_or("-");

    let col = column![
        limit_row,
        row![run_btn, terminate_btn, text(indicator)]
            .spacing(8)
            .align_y(Alignment::Center),
        text(worker_line).size(12),
        text(result).size(RESULT_TEXT),
    ]
    .spacing(12);

    container(col).padding(12)
}
