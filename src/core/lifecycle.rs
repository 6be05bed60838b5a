//! core/lifecycle.rs
//! Mount/unmount hooks.
//!
//! The runner doesn't know about any UI framework. A host hands it
//! something implementing `Lifecycle`, and the runner registers:
//! - on mount: nothing (creation stays lazy)
//! - on unmount: terminate the worker
//!
//! `Scope` is the built-in implementation: one per UI component instance.
//! The host calls `mount()` when the component appears and `unmount()`
//! when it goes away.

use std::sync::Arc;

use parking_lot::Mutex;

pub type Hook = Box<dyn FnOnce() + Send + 'static>;

/// Registration points for component lifecycle callbacks.
pub trait Lifecycle {
    fn on_mounted(&self, hook: Hook);
    fn on_unmounted(&self, hook: Hook);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeState {
    /// Created, not shown yet.
    #[default]
    Pending,
    Mounted,
    /// Final. A scope is never mounted again.
    Unmounted,
}

#[derive(Default)]
struct ScopeInner {
    state: ScopeState,
    on_mounted: Vec<Hook>,
    on_unmounted: Vec<Hook>,
}

/// A component scope. Clones share the same hooks and state.
#[derive(Clone, Default)]
pub struct Scope {
    inner: Arc<Mutex<ScopeInner>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScopeState {
        self.inner.lock().state
    }

    pub fn is_mounted(&self) -> bool {
        self.state() == ScopeState::Mounted
    }

    /// Fire the mount hooks. No-op unless the scope is still pending.
    pub fn mount(&self) {
        let hooks = {
            let mut inner = self.inner.lock();
            if inner.state != ScopeState::Pending {
                tracing::debug!(state = ?inner.state, "scope mount ignored");
                return;
            }
            inner.state = ScopeState::Mounted;
            std::mem::take(&mut inner.on_mounted)
        };

        // Run outside the lock: hooks may call back into the scope.
        for hook in hooks {
            hook();
        }
    }

    /// Fire the unmount hooks. Runs at most once.
    pub fn unmount(&self) {
        let hooks = {
            let mut inner = self.inner.lock();
            if inner.state == ScopeState::Unmounted {
                return;
            }
            inner.state = ScopeState::Unmounted;
            inner.on_mounted.clear();
            std::mem::take(&mut inner.on_unmounted)
        };

        for hook in hooks {
            hook();
        }
    }
}

impl Lifecycle for Scope {
    /// Registering after the scope is already mounted runs the hook now.
    fn on_mounted(&self, hook: Hook) {
        let mut inner = self.inner.lock();
        let state = inner.state;
        match state {
            ScopeState::Mounted => {
                drop(inner);
                hook();
            }
            ScopeState::Unmounted => {}
            ScopeState::Pending => inner.on_mounted.push(hook),
        }
    }

    /// Registering after the scope is gone runs the hook now, so late
    /// registrations still get torn down.
    fn on_unmounted(&self, hook: Hook) {
        let mut inner = self.inner.lock();
        if inner.state == ScopeState::Unmounted {
            drop(inner);
            hook();
        } else {
            inner.on_unmounted.push(hook);
        }
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Scope")
            .field("state", &inner.state)
            .field("on_mounted", &inner.on_mounted.len())
            .field("on_unmounted", &inner.on_unmounted.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_hook(c: &Arc<AtomicUsize>) -> Hook {
        let c = Arc::clone(c);
        Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn hooks_fire_once_in_order() {
        let scope = Scope::new();
        let mounted = Arc::new(AtomicUsize::new(0));
        let unmounted = Arc::new(AtomicUsize::new(0));

        scope.on_mounted(counter_hook(&mounted));
        scope.on_unmounted(counter_hook(&unmounted));
        assert_eq!(scope.state(), ScopeState::Pending);

        scope.mount();
        scope.mount();
        assert!(scope.is_mounted());
        assert_eq!(mounted.load(Ordering::SeqCst), 1);
        assert_eq!(unmounted.load(Ordering::SeqCst), 0);

        scope.unmount();
        scope.unmount();
        assert_eq!(scope.state(), ScopeState::Unmounted);
        assert_eq!(unmounted.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unmount_without_mount_still_runs_teardown() {
        let scope = Scope::new();
        let unmounted = Arc::new(AtomicUsize::new(0));
        scope.on_unmounted(counter_hook(&unmounted));

        scope.unmount();
        assert_eq!(unmounted.load(Ordering::SeqCst), 1);

        // Never mounts again.
        scope.mount();
        assert_eq!(scope.state(), ScopeState::Unmounted);
    }

    #[test]
    fn late_registration_runs_immediately() {
        let scope = Scope::new();
        scope.mount();

        let mounted = Arc::new(AtomicUsize::new(0));
        scope.on_mounted(counter_hook(&mounted));
        assert_eq!(mounted.load(Ordering::SeqCst), 1);

        scope.unmount();
        let unmounted = Arc::new(AtomicUsize::new(0));
        scope.on_unmounted(counter_hook(&unmounted));
        assert_eq!(unmounted.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clones_share_state() {
        let scope = Scope::new();
        let other = scope.clone();
        let unmounted = Arc::new(AtomicUsize::new(0));
        other.on_unmounted(counter_hook(&unmounted));

        scope.unmount();
        assert_eq!(other.state(), ScopeState::Unmounted);
        assert_eq!(unmounted.load(Ordering::SeqCst), 1);
    }
}
