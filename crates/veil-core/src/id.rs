#![forbid(unsafe_code)]

//! Identity tokens for widgets and rules.
//!
//! Two kinds of identity are kept strictly apart:
//!
//! - [`ViewId`] names one live widget *instance*. Two widgets with identical
//!   content still get different ids.
//! - [`RuleFingerprint`] names a rule by its *content*. Two rule values built
//!   from the same descriptor share a fingerprint.
//!
//! Both are 64 bits wide so collisions inside a working set of a few dozen
//! widgets are not a practical concern.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Stable per-instance identity of a live widget.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ViewId(pub u64);

impl ViewId {
    /// Allocate a fresh id from a process-wide counter.
    ///
    /// Hosts without a native identity token should call this once per widget
    /// and keep the result for the widget's lifetime.
    #[inline]
    pub fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Derive an id from a memory address.
    ///
    /// Only valid while the widget is alive and not moved; an address may be
    /// reused after the widget is dropped, so prefer [`ViewId::next`] when the
    /// host can store the id.
    #[inline]
    pub fn from_ptr<T: ?Sized>(ptr: &T) -> Self {
        Self(ptr as *const T as *const () as usize as u64)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Content-derived identity of a rule.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct RuleFingerprint(pub u64);

impl RuleFingerprint {
    /// Hash any value into a fingerprint.
    ///
    /// Stable for the lifetime of the process, which is as long as the
    /// registry lives.
    #[inline]
    pub fn from_hash<T: Hash + ?Sized>(value: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        Self(hasher.finish())
    }
}

impl fmt::Display for RuleFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
