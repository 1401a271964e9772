#![forbid(unsafe_code)]

//! Rules as handed over by the rule source.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::host::Visibility;
use crate::id::RuleFingerprint;

/// On-screen rectangle of the widget when the rule was recorded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ViewBounds {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl fmt::Display for ViewBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{} {}x{}]", self.x, self.y, self.width, self.height)
    }
}

/// One widget to hide, described well enough for a matcher to find it again.
///
/// Identity is content-based: [`ViewRule::fingerprint`] covers the screen,
/// class, bounds and depth. The user-facing `alias` and the requested
/// `visibility` are not part of it, so editing either keeps the rule bound to
/// the widget it already affects.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewRule {
    /// Class name of the screen the widget lives in.
    pub screen_class: String,
    /// Class name of the widget itself.
    pub view_class: String,
    /// Free-form label shown to the user.
    #[cfg_attr(feature = "serde", serde(default))]
    pub alias: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bounds: ViewBounds,
    /// Distance from the screen's root in the view tree.
    #[cfg_attr(feature = "serde", serde(default))]
    pub depth: u32,
    pub visibility: Visibility,
}

impl ViewRule {
    /// Create a rule with empty structural hints.
    pub fn new(
        screen_class: impl Into<String>,
        view_class: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            screen_class: screen_class.into(),
            view_class: view_class.into(),
            alias: None,
            bounds: ViewBounds::default(),
            depth: 0,
            visibility,
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: ViewBounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Content-derived identity of this rule.
    #[must_use]
    pub fn fingerprint(&self) -> RuleFingerprint {
        RuleFingerprint::from_hash(&IdentityKey(self))
    }
}

/// Hashes only the fields that identify the target widget.
struct IdentityKey<'a>(&'a ViewRule);

impl Hash for IdentityKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let rule = self.0;
        rule.screen_class.hash(state);
        rule.view_class.hash(state);
        rule.bounds.hash(state);
        rule.depth.hash(state);
    }
}

impl fmt::Display for ViewRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ViewRule{{screen={}, view_class={}, bounds={}, depth={}, visibility={}",
            self.screen_class, self.view_class, self.bounds, self.depth, self.visibility
        )?;
        if let Some(alias) = &self.alias {
            write!(f, ", alias={alias}")?;
        }
        f.write_str("}")
    }
}
