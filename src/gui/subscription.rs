//! gui/subscription.rs
//! Emit periodic Tick messages while the worker is busy (elapsed-time display).

use iced::{Subscription, time};
use std::time::Duration;

use super::state::{Demo, Message};

pub(crate) fn subscription(state: &Demo) -> Subscription<Message> {
    if !state.is_running() {
        return Subscription::none();
    }

    time::every(Duration::from_millis(100)).map(|_| Message::Tick)
}
