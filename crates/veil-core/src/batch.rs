#![forbid(unsafe_code)]

//! Drives a list of rules against one screen.
//!
//! For every rule the driver prefers the widget already bound in the
//! registry, falls back to the matcher when the binding is missing or dead,
//! and hands the widget to the mutator. A rule that matches nothing is
//! reported and skipped; it never aborts the batch.

use std::fmt;

use crate::controller;
use crate::error::ControlError;
use crate::host::ViewRef;
use crate::id::{RuleFingerprint, ViewId};
use crate::matcher::ViewMatcher;
use crate::mutator::RevokeOutcome;
use crate::registry::{self, Lookup};
use crate::rule::ViewRule;

/// Result of one rule within a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// The widget was hidden.
    Applied { view_id: ViewId },
    /// The rule was already in effect on the widget.
    Skipped { view_id: ViewId },
    /// The widget was restored from its snapshot.
    Revoked { view_id: ViewId },
    /// No binding was found; the widget only got a best-effort reset.
    Reset { view_id: ViewId },
    /// No widget could be found for the rule.
    Failed(ControlError),
}

/// Outcome of one input rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleReport {
    pub fingerprint: RuleFingerprint,
    pub view_class: String,
    pub outcome: RuleOutcome,
}

/// Per-rule outcomes of a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub rules: Vec<RuleReport>,
}

impl BatchReport {
    fn count(&self, pred: impl Fn(&RuleOutcome) -> bool) -> usize {
        self.rules.iter().filter(|r| pred(&r.outcome)).count()
    }

    #[must_use]
    pub fn applied(&self) -> usize {
        self.count(|o| matches!(o, RuleOutcome::Applied { .. }))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RuleOutcome::Skipped { .. }))
    }

    /// Restored or reset.
    #[must_use]
    pub fn revoked(&self) -> usize {
        self.count(|o| matches!(o, RuleOutcome::Revoked { .. } | RuleOutcome::Reset { .. }))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RuleOutcome::Failed(_)))
    }

    /// Errors of the failed rules, in input order.
    pub fn errors(&self) -> impl Iterator<Item = &ControlError> {
        self.rules.iter().filter_map(|r| match &r.outcome {
            RuleOutcome::Failed(err) => Some(err),
            _ => None,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Applies and revokes rule lists using a matcher for cache misses.
#[derive(Debug, Clone, Default)]
pub struct BatchDriver<M> {
    matcher: M,
}

impl<M> BatchDriver<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    #[inline]
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// Hide every widget described by `rules` in `screen`.
    pub fn apply_batch<S>(&self, screen: &S, rules: &[ViewRule]) -> BatchReport
    where
        S: fmt::Display + ?Sized,
        M: ViewMatcher<S>,
    {
        // Work on a copy: matcher callbacks may edit the caller's rule store.
        let rules = rules.to_vec();
        let _span = crate::debug_span!("apply_batch", screen = %screen, rules = rules.len()).entered();
        crate::debug!("[ApplyRuleBatch info start------------------------------------]");
        let mut report = BatchReport::default();
        for rule in &rules {
            crate::debug!(%rule, "[Apply rule]");
            let fingerprint = rule.fingerprint();
            let outcome = match self.resolve(screen, rule, fingerprint, false) {
                Ok(view) => {
                    let view_id = view.view_id();
                    if controller::apply_single(&view, rule) {
                        crate::info!("[Success] {screen}#{view:?} has been blocked");
                        RuleOutcome::Applied { view_id }
                    } else {
                        crate::info!("[Skipped] {screen}#{view:?} already be blocked");
                        RuleOutcome::Skipped { view_id }
                    }
                }
                Err(err) => {
                    crate::warn!("[Failed] {screen}#{} block failed because {err}", rule.view_class);
                    RuleOutcome::Failed(err)
                }
            };
            report.rules.push(RuleReport {
                fingerprint,
                view_class: rule.view_class.clone(),
                outcome,
            });
        }
        crate::debug!("[ApplyRuleBatch info end------------------------------------]");
        report
    }

    /// Restore every widget described by `rules` in `screen`.
    pub fn revoke_batch<S>(&self, screen: &S, rules: &[ViewRule]) -> BatchReport
    where
        S: fmt::Display + ?Sized,
        M: ViewMatcher<S>,
    {
        let rules = rules.to_vec();
        let _span = crate::debug_span!("revoke_batch", screen = %screen, rules = rules.len()).entered();
        let mut report = BatchReport::default();
        for rule in &rules {
            crate::debug!(%rule, "revoke rule");
            let fingerprint = rule.fingerprint();
            let outcome = match self.resolve(screen, rule, fingerprint, true) {
                Ok(view) => {
                    let view_id = view.view_id();
                    let outcome = match controller::revoke_single(&view, rule) {
                        RevokeOutcome::Restored(_) => RuleOutcome::Revoked { view_id },
                        RevokeOutcome::CacheMiss => RuleOutcome::Reset { view_id },
                    };
                    crate::info!("###revoke rule success [Act]:{screen}  [View]:{view:?}");
                    outcome
                }
                Err(err) => {
                    crate::warn!("###revoke rule fail [Act]:{screen}  [View]:None [Reason]:{err}");
                    RuleOutcome::Failed(err)
                }
            };
            report.rules.push(RuleReport {
                fingerprint,
                view_class: rule.view_class.clone(),
                outcome,
            });
        }
        report
    }

    /// Registry binding first, matcher second.
    fn resolve<S>(
        &self,
        screen: &S,
        rule: &ViewRule,
        fingerprint: RuleFingerprint,
        revoking: bool,
    ) -> Result<ViewRef, ControlError>
    where
        S: fmt::Display + ?Sized,
        M: ViewMatcher<S>,
    {
        // A dead binding is purged by the lookup itself.
        match registry::with_mut(|reg| reg.lookup_by_rule(fingerprint)) {
            Lookup::Live { view, .. } => return Ok(view),
            Lookup::Stale { view_id: _view_id } => {
                crate::debug!(rule = %fingerprint, view_id = %_view_id, "cached view is gone, matching again");
            }
            Lookup::Absent => {
                if revoking {
                    crate::warn!(rule = %fingerprint, "view cache not found");
                }
            }
        }
        let found = self.matcher.find_best_match(screen, rule);
        if revoking {
            crate::warn!("find view in activity {found:?}");
        }
        found.ok_or_else(|| ControlError::NoMatch {
            fingerprint,
            view_class: rule.view_class.clone(),
        })
    }
}
