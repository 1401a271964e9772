#![forbid(unsafe_code)]

//! Single-widget entry points for callers that already hold the widget,
//! e.g. from a tree walk when a screen is set up.

use crate::host::ViewRef;
use crate::lifecycle;
use crate::mutator::{self, RevokeOutcome};
use crate::registry;
use crate::rule::ViewRule;

/// Apply `rule` to `view` and watch the widget for detach.
///
/// Returns `false` when the rule was already in effect on this widget.
pub fn apply_single(view: &ViewRef, rule: &ViewRule) -> bool {
    let changed = mutator::apply(view, rule);
    if changed {
        lifecycle::attach(view);
    }
    changed
}

/// Undo `rule` on `view`. See [`mutator::revoke`].
pub fn revoke_single(view: &ViewRef, rule: &ViewRule) -> RevokeOutcome {
    mutator::revoke(view, rule)
}

/// Whether `rule` is currently bound to a widget on this thread.
///
/// Does not check that the widget is still alive.
pub fn is_applied(rule: &ViewRule) -> bool {
    let fingerprint = rule.fingerprint();
    registry::with(|reg| reg.contains_rule(fingerprint))
}

/// Number of rules currently bound on this thread.
pub fn applied_count() -> usize {
    registry::with(|reg| reg.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Visibility;
    use crate::test_support::FakeView;

    #[test]
    fn apply_single_attaches_hook_once() {
        registry::clear();
        let fake = FakeView::shown(120, 40);
        let view: ViewRef = fake.clone();
        let rule = ViewRule::new("Main", "TextView", Visibility::Gone);

        assert!(apply_single(&view, &rule));
        assert!(!apply_single(&view, &rule));
        assert_eq!(fake.listener_count(), 1);
        assert!(is_applied(&rule));
        assert_eq!(applied_count(), 1);

        assert!(revoke_single(&view, &rule).is_restored());
        assert_eq!(fake.listener_count(), 0);
        assert!(!is_applied(&rule));
    }

    #[test]
    fn detach_after_apply_single_unbinds_rule() {
        registry::clear();
        let fake = FakeView::shown(120, 40);
        let view: ViewRef = fake.clone();
        let rule = ViewRule::new("Main", "TextView", Visibility::Invisible);

        assert!(apply_single(&view, &rule));
        fake.detach();
        assert!(!is_applied(&rule));
        assert_eq!(applied_count(), 0);
    }
}
