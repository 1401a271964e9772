#![forbid(unsafe_code)]

//! Snapshot of a widget's presentation before the controller touched it.

use std::fmt;

use crate::host::{LayoutSize, View, Visibility};

/// Width recorded for a widget that has no layout params.
pub const DEFAULT_WIDTH: i32 = 0;
/// Height recorded for a widget that has no layout params.
///
/// Not symmetric with [`DEFAULT_WIDTH`]. Only observable if the widget gains
/// layout params between apply and revoke.
pub const DEFAULT_HEIGHT: i32 = 1;

/// The five fields the controller mutates, as they were before it did.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ViewProperty {
    pub alpha: f32,
    pub clickable: bool,
    pub visibility: Visibility,
    pub layout_width: i32,
    pub layout_height: i32,
}

impl ViewProperty {
    /// Read the current presentation of `view`.
    pub fn capture(view: &dyn View) -> Self {
        let (layout_width, layout_height) = match view.layout_size() {
            Some(size) => (size.width, size.height),
            None => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
        };
        Self {
            alpha: view.alpha(),
            clickable: view.is_clickable(),
            visibility: view.visibility(),
            layout_width,
            layout_height,
        }
    }

    /// Recorded layout size.
    #[inline]
    #[must_use]
    pub const fn layout_size(&self) -> LayoutSize {
        LayoutSize::new(self.layout_width, self.layout_height)
    }
}

impl fmt::Display for ViewProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ViewProperty{{alpha={}, clickable={}, visibility={}, layout_params_width={}, layout_params_height={}}}",
            self.alpha, self.clickable, self.visibility, self.layout_width, self.layout_height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeView;

    #[test]
    fn capture_reads_all_fields() {
        let view = FakeView::new(0.5, true, Visibility::Invisible, Some(LayoutSize::new(300, 120)));
        let prop = ViewProperty::capture(&*view);
        assert_eq!(prop.alpha, 0.5);
        assert!(prop.clickable);
        assert_eq!(prop.visibility, Visibility::Invisible);
        assert_eq!(prop.layout_size(), LayoutSize::new(300, 120));
    }

    #[test]
    fn capture_without_layout_params_defaults_to_zero_by_one() {
        let view = FakeView::new(1.0, false, Visibility::Visible, None);
        let prop = ViewProperty::capture(&*view);
        assert_eq!(prop.layout_width, 0);
        assert_eq!(prop.layout_height, 1);
    }

    #[test]
    fn display_names_every_field() {
        let view = FakeView::new(1.0, true, Visibility::Visible, Some(LayoutSize::new(200, 80)));
        let text = ViewProperty::capture(&*view).to_string();
        assert_eq!(
            text,
            "ViewProperty{alpha=1, clickable=true, visibility=VISIBLE, layout_params_width=200, layout_params_height=80}"
        );
    }
}
