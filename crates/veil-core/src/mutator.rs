#![forbid(unsafe_code)]

//! Applies one rule to one widget, and takes it back.
//!
//! Both operations are synchronous and run on the UI thread. The registry is
//! only borrowed between host calls, never across one.

use std::rc::Rc;

use crate::host::{LayoutSize, ViewRef, Visibility, same_view};
use crate::property::ViewProperty;
use crate::registry::{self, Lookup};
use crate::rule::ViewRule;

/// What [`revoke`] did to the widget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevokeOutcome {
    /// The widget was bound to the rule; the snapshot was written back and
    /// the registry entries dropped.
    Restored(ViewProperty),
    /// No binding for this widget: opacity reset to 1 and the rule's
    /// visibility applied. The registry was left alone.
    CacheMiss,
}

impl RevokeOutcome {
    #[inline]
    #[must_use]
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored(_))
    }
}

/// Hide `view` according to `rule`.
///
/// Returns `false` without touching anything when the rule is already bound
/// to this widget and the widget already has the requested visibility.
pub fn apply(view: &ViewRef, rule: &ViewRule) -> bool {
    let fingerprint = rule.fingerprint();
    let lookup = registry::with_mut(|reg| reg.lookup_by_rule(fingerprint));
    let bound = lookup.view().is_some_and(|current| same_view(current, view));
    if bound && view.visibility() == rule.visibility {
        return false;
    }

    // A widget already registered (under this rule or another) keeps the
    // snapshot taken before it was first touched.
    let view_id = view.view_id();
    let snapshot = match lookup {
        Lookup::Live { snapshot, .. } if bound => snapshot,
        _ => registry::with(|reg| reg.snapshot_for(view_id, view))
            .unwrap_or_else(|| ViewProperty::capture(&**view)),
    };

    view.set_alpha(0.0);
    view.set_clickable(false);
    if view.layout_size().is_some() {
        match rule.visibility {
            Visibility::Gone => view.set_layout_size(LayoutSize::ZERO),
            Visibility::Invisible => view.set_layout_size(snapshot.layout_size()),
            Visibility::Visible => {}
        }
        view.request_layout();
    }
    view.set_visibility(rule.visibility);

    registry::with_mut(|reg| reg.record(fingerprint, view_id, Rc::downgrade(view), snapshot));
    crate::debug!(rule = %fingerprint, view = ?view, "apply rule add view cache");
    true
}

/// Undo `rule` on `view`.
///
/// Never fails: without a matching registry entry the widget gets a
/// best-effort reset instead of a faithful restore.
pub fn revoke(view: &ViewRef, rule: &ViewRule) -> RevokeOutcome {
    let fingerprint = rule.fingerprint();
    match registry::with_mut(|reg| reg.lookup_by_rule(fingerprint)) {
        Lookup::Live {
            view: bound,
            snapshot,
            ..
        } if same_view(&bound, view) => {
            view.set_alpha(snapshot.alpha);
            view.set_clickable(snapshot.clickable);
            view.set_visibility(snapshot.visibility);
            if view.layout_size().is_some() {
                view.set_layout_size(snapshot.layout_size());
                view.request_layout();
            }
            crate::lifecycle::release(view);
            registry::with_mut(|reg| reg.forget_by_rule(fingerprint));
            crate::debug!(rule = %fingerprint, view = ?view, %snapshot, "revoke blocked view");
            RevokeOutcome::Restored(snapshot)
        }
        _ => {
            crate::warn!(rule = %fingerprint, view = ?view, "view cache missing, resetting view");
            view.set_alpha(1.0);
            view.set_visibility(rule.visibility);
            RevokeOutcome::CacheMiss
        }
    }
}
