#![forbid(unsafe_code)]

//! Log sink for the controller.
//!
//! With the `tracing` feature the controller emits `tracing` events under the
//! `veil_core` target. Without it every logging macro expands to nothing, so
//! call sites stay identical and the host pays nothing for log lines it
//! never reads.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Swallows a trace line.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Swallows a debug line.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Swallows an info line.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Swallows a warning.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Yields a span that records nothing.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::BatchSpan
        };
    }
}

/// Stand-in for a batch span when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct BatchSpan;

#[cfg(not(feature = "tracing"))]
impl BatchSpan {
    /// Enter the span. The guard does nothing on drop.
    pub fn entered(self) -> BatchSpanGuard {
        BatchSpanGuard
    }
}

/// Guard returned by [`BatchSpan::entered`].
#[cfg(not(feature = "tracing"))]
pub struct BatchSpanGuard;
