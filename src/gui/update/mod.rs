//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Demo, Message};

mod panel;
mod run;

pub(crate) fn update(state: &mut Demo, message: Message) -> Task<Message> {
    match message {
        // Input
        Message::LimitInputChanged(s) => run::limit_input_changed(state, s),

        // Run
        Message::RunPressed => run::run_pressed(state),
        Message::RunFinished(limit, call_id, result) => {
            run::run_finished(state, limit, call_id, result)
        }
        Message::TerminatePressed => run::terminate_pressed(state),

        // Panel
        Message::TogglePanel => panel::toggle_panel(state),

        // Subscription
        Message::Tick => run::tick(state),
    }
}
