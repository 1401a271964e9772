#![forbid(unsafe_code)]

//! Reference matcher over [`TestScreen`] trees.
//!
//! Candidates must be attached and share the rule's class. Among them the
//! one agreeing on the most structural hints wins; ties go to the first view
//! in pre-order.

use veil_core::{ViewMatcher, ViewRef, ViewRule};

use crate::host::TestScreen;

/// Score for exact bounds agreement.
const BOUNDS_WEIGHT: u32 = 4;
/// Score for depth agreement.
const DEPTH_WEIGHT: u32 = 2;

/// Class-then-structure matcher.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyMatcher {
    /// Ignore rules recorded on another screen class.
    pub strict_screen: bool,
}

impl HierarchyMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            strict_screen: true,
        }
    }

    /// Accept rules regardless of the screen they were recorded on.
    #[must_use]
    pub fn any_screen() -> Self {
        Self {
            strict_screen: false,
        }
    }
}

impl Default for HierarchyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewMatcher<TestScreen> for HierarchyMatcher {
    fn find_best_match(&self, screen: &TestScreen, rule: &ViewRule) -> Option<ViewRef> {
        if self.strict_screen && screen.name() != rule.screen_class {
            return None;
        }
        let mut best = None;
        let mut best_score = 0;
        for (view, depth) in screen.walk() {
            if view.class_name() != rule.view_class {
                continue;
            }
            let mut score = 1;
            if view.bounds() == rule.bounds {
                score += BOUNDS_WEIGHT;
            }
            if depth == rule.depth {
                score += DEPTH_WEIGHT;
            }
            if score > best_score {
                best_score = score;
                best = Some(view);
            }
        }
        best.map(|view| view.as_view())
    }
}
