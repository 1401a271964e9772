#![forbid(unsafe_code)]

//! Core: hide widgets of a live UI tree by rule, remember how they looked,
//! and put them back.
//!
//! - [`batch::BatchDriver`] runs a rule list against one screen.
//! - [`controller`] covers callers that already hold the widget.
//! - [`registry`] binds applied rules to affected widgets and their
//!   [`property::ViewProperty`] snapshots.
//! - [`lifecycle`] drops bindings when the host detaches a widget.
//!
//! The host plugs in through [`host::View`] and [`matcher::ViewMatcher`].
//! Everything runs on the host UI thread.

pub mod batch;
pub mod controller;
pub mod error;
pub mod host;
pub mod id;
pub mod lifecycle;
pub mod logging;
pub mod matcher;
pub mod mutator;
pub mod property;
pub mod registry;
pub mod rule;

#[cfg(test)]
mod test_support;

pub use batch::{BatchDriver, BatchReport, RuleOutcome, RuleReport};
pub use controller::{applied_count, apply_single, is_applied, revoke_single};
pub use error::ControlError;
pub use host::{AttachStateListener, LayoutSize, ListenerRef, View, ViewRef, Visibility, WeakViewRef};
pub use id::{RuleFingerprint, ViewId};
pub use matcher::ViewMatcher;
pub use mutator::RevokeOutcome;
pub use property::ViewProperty;
pub use rule::{ViewBounds, ViewRule};

// Re-export tracing macros at crate root for use inside the crate.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
