//! gui/update/panel.rs
//! Show/hide the worker panel = mount/unmount its scope.
//!
//! Iced has no component lifecycle of its own, so this is where the
//! "component" appears and disappears. Unmounting terminates the worker
//! (lifecycle binding); an in-flight run then finishes as `Terminated`.

use iced::Task;

use super::super::state::{Demo, Message, PrimePanel};

pub(crate) fn toggle_panel(state: &mut Demo) -> Task<Message> {
    match state.panel.take() {
        Some(panel) => {
            let was_running = panel.is_running();
            panel.unmount();
            state.status = if was_running {
                "Panel hidden, worker stopped.".to_string()
            } else {
                "Panel hidden.".to_string()
            };
        }
        None => {
            state.panel = Some(PrimePanel::mount());
            state.status = "Panel shown. Worker starts on first run.".to_string();
        }
    }
    Task::none()
}
