#![forbid(unsafe_code)]

//! Dual index binding applied rules to the widgets they affect.
//!
//! Two tables together form a bijection between currently applied rules and
//! affected widgets:
//!
//! - `rule_to_view`: [`RuleFingerprint`] → [`ViewId`]
//! - `view_to_state`: [`ViewId`] → weak handle + [`ViewProperty`] snapshot
//!
//! # Invariants
//!
//! 1. Every view id stored in `rule_to_view` has a `view_to_state` entry.
//! 2. A snapshot is never replaced while its widget stays registered under
//!    any rule; [`Registry::record`] callers reuse [`Registry::snapshot_for`].
//! 3. A lookup that finds a dead handle purges both entries before it
//!    reports [`Lookup::Stale`].
//! 4. Each rule maps to at most one widget and each widget is recorded under
//!    at most one rule. The last `record` wins.
//!
//! # Scope
//!
//! One registry per UI thread, created on first use and reached through
//! [`with`] / [`with_mut`]. The core is `!Send` (it stores [`Weak`] handles),
//! so the compiler keeps every access on the thread that owns the widgets.
//!
//! [`Weak`]: std::rc::Weak

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::host::{ViewRef, WeakViewRef};
use crate::id::{RuleFingerprint, ViewId};
use crate::property::ViewProperty;

#[derive(Clone, Debug)]
struct ViewEntry {
    handle: WeakViewRef,
    snapshot: ViewProperty,
}

/// Result of resolving a rule against the registry.
#[derive(Clone, Debug)]
pub enum Lookup {
    /// The rule is applied and its widget is alive.
    Live {
        view_id: ViewId,
        view: ViewRef,
        snapshot: ViewProperty,
    },
    /// The rule was applied to a widget the host has since dropped. Both
    /// entries are already purged.
    Stale { view_id: ViewId },
    /// The rule is not applied.
    Absent,
}

impl Lookup {
    /// The live widget, if any.
    #[must_use]
    pub fn view(&self) -> Option<&ViewRef> {
        match self {
            Self::Live { view, .. } => Some(view),
            _ => None,
        }
    }
}

/// Counters describing the registry contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Number of rule edges.
    pub rules: usize,
    /// Number of widget entries.
    pub views: usize,
    /// Dead handles purged by lookups since creation or last clear.
    pub stale_purges: u64,
}

/// The rule/widget index.
#[derive(Debug, Default)]
pub struct Registry {
    rule_to_view: HashMap<RuleFingerprint, ViewId>,
    view_to_state: HashMap<ViewId, ViewEntry>,
    stale_purges: u64,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `rule` to its widget, purging the pair if the widget is gone.
    pub fn lookup_by_rule(&mut self, rule: RuleFingerprint) -> Lookup {
        let Some(&view_id) = self.rule_to_view.get(&rule) else {
            return Lookup::Absent;
        };
        let Some(entry) = self.view_to_state.get(&view_id) else {
            self.rule_to_view.remove(&rule);
            return Lookup::Absent;
        };
        let snapshot = entry.snapshot;
        match entry.handle.upgrade() {
            Some(view) => Lookup::Live {
                view_id,
                view,
                snapshot,
            },
            None => {
                self.forget_by_rule(rule);
                self.stale_purges += 1;
                crate::debug!(%rule, %view_id, "purged stale view cache");
                Lookup::Stale { view_id }
            }
        }
    }

    /// Snapshot recorded for `view`, if this exact instance is registered
    /// under `view_id`.
    ///
    /// Takes the id from the caller so no host method runs while the
    /// registry is borrowed.
    #[must_use]
    pub fn snapshot_for(&self, view_id: ViewId, view: &ViewRef) -> Option<ViewProperty> {
        let entry = self.view_to_state.get(&view_id)?;
        let live = entry.handle.upgrade()?;
        Rc::ptr_eq(&live, view).then_some(entry.snapshot)
    }

    /// Bind `rule` to `view_id`.
    ///
    /// Replaces the previous edge of `rule` (dropping the state of the widget
    /// it pointed at), replaces the state of `view_id`, and drops any other
    /// rule edge that pointed at `view_id`.
    pub fn record(
        &mut self,
        rule: RuleFingerprint,
        view_id: ViewId,
        handle: WeakViewRef,
        snapshot: ViewProperty,
    ) {
        if let Some(previous) = self.rule_to_view.insert(rule, view_id)
            && previous != view_id
        {
            self.view_to_state.remove(&previous);
        }
        self.rule_to_view
            .retain(|&other, &mut target| other == rule || target != view_id);
        self.view_to_state
            .insert(view_id, ViewEntry { handle, snapshot });
    }

    /// Remove `rule` and the widget entry it points to.
    pub fn forget_by_rule(&mut self, rule: RuleFingerprint) -> Option<ViewId> {
        let view_id = self.rule_to_view.remove(&rule)?;
        self.view_to_state.remove(&view_id);
        Some(view_id)
    }

    /// Remove the entry of `view_id` and the rule edge pointing at it.
    ///
    /// Reverse lookup is a linear scan; the working set is a few dozen
    /// widgets at most.
    pub fn forget_by_view(&mut self, view_id: ViewId) -> Option<RuleFingerprint> {
        self.view_to_state.remove(&view_id);
        let rule = self
            .rule_to_view
            .iter()
            .find(|&(_, &target)| target == view_id)
            .map(|(&rule, _)| rule)?;
        self.rule_to_view.remove(&rule);
        Some(rule)
    }

    #[inline]
    #[must_use]
    pub fn contains_rule(&self, rule: RuleFingerprint) -> bool {
        self.rule_to_view.contains_key(&rule)
    }

    #[inline]
    #[must_use]
    pub fn contains_view(&self, view_id: ViewId) -> bool {
        self.view_to_state.contains_key(&view_id)
    }

    /// View id bound to `rule`, without resolving the handle.
    #[inline]
    #[must_use]
    pub fn view_of(&self, rule: RuleFingerprint) -> Option<ViewId> {
        self.rule_to_view.get(&rule).copied()
    }

    /// Number of applied rules.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rule_to_view.len()
    }

    /// True if nothing is applied and no widget state is held.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rule_to_view.is_empty() && self.view_to_state.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            rules: self.rule_to_view.len(),
            views: self.view_to_state.len(),
            stale_purges: self.stale_purges,
        }
    }

    /// Drop every entry and reset counters.
    pub fn clear(&mut self) {
        self.rule_to_view.clear();
        self.view_to_state.clear();
        self.stale_purges = 0;
    }
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::new());
}

/// Read the registry of the current thread.
///
/// `f` must not call back into the host: a host callback may re-enter the
/// registry.
pub fn with<R>(f: impl FnOnce(&Registry) -> R) -> R {
    REGISTRY.with(|registry| f(&registry.borrow()))
}

/// Mutate the registry of the current thread. Same re-entrancy rule as
/// [`with`].
pub fn with_mut<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

/// Counters of the current thread's registry.
pub fn stats() -> RegistryStats {
    with(Registry::stats)
}

/// Empty the current thread's registry.
///
/// Widgets stay as they are; a later revoke falls back to a best-effort
/// reset.
pub fn clear() {
    with_mut(Registry::clear);
}
