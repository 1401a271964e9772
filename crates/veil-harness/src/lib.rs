#![forbid(unsafe_code)]

//! Test host for `veil-core`.
//!
//! - [`host`]: an in-memory widget tree that honours the host contract
//!   (listener dedup, detach notifications, layout-param semantics).
//! - [`matcher`]: a reference [`veil_core::ViewMatcher`] over that tree.
//! - [`logging`]: a `tracing` layer that records controller log lines.
//! - [`fixtures`]: JSON rule lists.
//!
//! # Quick Start
//!
//! ```
//! use veil_core::{BatchDriver, ViewRule, Visibility};
//! use veil_harness::{HierarchyMatcher, TestScreen, TestView};
//!
//! let banner = TestView::builder("AdView").layout(1080, 180).build();
//! let root = TestView::builder("FrameLayout").build().push_child(banner.clone());
//! let screen = TestScreen::new("MainActivity", root);
//!
//! let driver = BatchDriver::new(HierarchyMatcher::new());
//! let rules = [ViewRule::new("MainActivity", "AdView", Visibility::Gone).with_depth(1)];
//! assert_eq!(driver.apply_batch(&screen, &rules).applied(), 1);
//! assert_eq!(banner.state().visibility, Visibility::Gone);
//! ```

pub mod fixtures;
pub mod host;
pub mod logging;
pub mod matcher;

pub use host::{TestScreen, TestView, TestViewBuilder};
pub use logging::{CaptureConfig, CapturedEvent, CapturedLogs, LogCapture, with_captured_logs};
pub use matcher::HierarchyMatcher;
