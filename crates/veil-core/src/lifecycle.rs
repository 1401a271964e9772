#![forbid(unsafe_code)]

//! Detach observer that keeps the registry in step with the host tree.
//!
//! A single [`DetachHook`] per UI thread is attached to every widget the
//! controller has affected. When the host detaches such a widget the hook
//! unregisters itself and drops the widget's registry entries, so a dead
//! widget never keeps a rule bound.

use std::rc::Rc;

use crate::host::{AttachStateListener, ListenerRef, ViewRef};
use crate::registry;

/// The shared detach observer. Obtain it with [`shared`].
#[derive(Debug)]
pub struct DetachHook {
    _private: (),
}

impl AttachStateListener for DetachHook {
    fn on_detached(&self, view: &ViewRef) {
        view.remove_attach_state_listener(&shared());
        let view_id = view.view_id();
        match registry::with_mut(|reg| reg.forget_by_view(view_id)) {
            Some(_rule) => {
                crate::debug!(rule = %_rule, view = ?view, "detached view dropped from cache");
            }
            None => {
                crate::trace!(view = ?view, "detached view had no rule");
            }
        }
    }
}

thread_local! {
    static HOOK: ListenerRef = Rc::new(DetachHook { _private: () });
}

/// The hook instance of the current thread.
pub fn shared() -> ListenerRef {
    HOOK.with(Rc::clone)
}

/// Attach the hook to `view`. Idempotent given host-side dedup.
pub fn attach(view: &ViewRef) {
    view.add_attach_state_listener(shared());
}

/// Detach the hook from `view`.
pub fn release(view: &ViewRef) {
    view.remove_attach_state_listener(&shared());
}
