#![forbid(unsafe_code)]

//! Seam to the widget-matching heuristic.

use crate::host::ViewRef;
use crate::rule::ViewRule;

/// Finds the live widget a rule describes.
///
/// The result is authoritative: the controller does not second-guess it.
/// Implementations must not touch the registry.
pub trait ViewMatcher<S: ?Sized> {
    fn find_best_match(&self, screen: &S, rule: &ViewRule) -> Option<ViewRef>;
}

impl<S, F> ViewMatcher<S> for F
where
    S: ?Sized,
    F: Fn(&S, &ViewRule) -> Option<ViewRef>,
{
    fn find_best_match(&self, screen: &S, rule: &ViewRule) -> Option<ViewRef> {
        self(screen, rule)
    }
}
