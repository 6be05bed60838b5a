//! gui/mod.rs
//!
//! This folder contains ONLY frontend concerns:
//! - app state ('Demo') + the prime panel that owns a worker runner
//! - messages ('Message')
//! - update logic ('update()')
//! - view layout ('view()')
//! - subscriptions (elapsed-time ticks while a run is in flight)
//! - the demo workload + small UI helpers

pub(crate) mod jobs;
pub(crate) mod state;
pub(crate) mod subscription;
pub(crate) mod update;
pub(crate) mod util;
pub(crate) mod view;

// Re-export the entry points main.rs needs.
pub(crate) use state::Demo;
pub(crate) use subscription::subscription;
pub(crate) use update::update;
pub(crate) use view::view;
