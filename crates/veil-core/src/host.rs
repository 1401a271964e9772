#![forbid(unsafe_code)]

//! Host widget API consumed by the controller.
//!
//! The host owns every widget. The controller only sees widgets through
//! [`ViewRef`] (a shared handle handed out by the host or the matcher) and
//! keeps nothing but [`WeakViewRef`]s between calls.
//!
//! All methods take `&self`: widgets are shared objects mutated through
//! interior mutability, and every call happens on the host UI thread.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::id::ViewId;

/// Shared handle to a live widget.
pub type ViewRef = Rc<dyn View>;

/// Non-owning handle to a widget that may already be gone.
pub type WeakViewRef = Weak<dyn View>;

/// Shared handle to an attach-state observer.
pub type ListenerRef = Rc<dyn AttachStateListener>;

/// Visibility state of a widget.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Visibility {
    /// Drawn and laid out.
    #[default]
    Visible,
    /// Not drawn, still occupies its layout slot.
    Invisible,
    /// Not drawn and takes no layout space.
    Gone,
}

impl Visibility {
    /// Host integer code (`VISIBLE = 0`, `INVISIBLE = 4`, `GONE = 8`).
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Visible => 0,
            Self::Invisible => 4,
            Self::Gone => 8,
        }
    }

    /// Parse a host integer code.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Visible),
            4 => Some(Self::Invisible),
            8 => Some(Self::Gone),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Visible => "VISIBLE",
            Self::Invisible => "INVISIBLE",
            Self::Gone => "GONE",
        };
        f.write_str(name)
    }
}

/// Requested layout size of a widget, in host units.
///
/// Negative values are host sentinels rather than sizes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct LayoutSize {
    pub width: i32,
    pub height: i32,
}

impl LayoutSize {
    /// Fill the parent along this axis.
    pub const MATCH_PARENT: i32 = -1;
    /// Size to content along this axis.
    pub const WRAP_CONTENT: i32 = -2;
    /// Collapsed to nothing.
    pub const ZERO: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// A node of the host UI tree.
///
/// `Debug` output is used verbatim in log lines, so keep it short.
pub trait View: fmt::Debug {
    /// Stable identity of this instance. Must not change while it is alive.
    fn view_id(&self) -> ViewId;

    fn alpha(&self) -> f32;
    fn set_alpha(&self, alpha: f32);

    fn is_clickable(&self) -> bool;
    fn set_clickable(&self, clickable: bool);

    fn visibility(&self) -> Visibility;
    fn set_visibility(&self, visibility: Visibility);

    /// Current layout params, or `None` when the widget has none yet.
    fn layout_size(&self) -> Option<LayoutSize>;

    /// Overwrite layout params. Hosts ignore this when the widget has none.
    fn set_layout_size(&self, size: LayoutSize);

    /// Schedule a layout pass after layout params changed.
    fn request_layout(&self);

    /// Register an observer.
    ///
    /// Hosts must deduplicate by identity ([`Rc::ptr_eq`]): registering the
    /// same listener twice leaves exactly one registration.
    fn add_attach_state_listener(&self, listener: ListenerRef);

    /// Unregister an observer. Unknown listeners are ignored.
    fn remove_attach_state_listener(&self, listener: &ListenerRef);
}

/// Observer of a widget entering or leaving its window.
///
/// Hosts must not hold any borrow of their own listener list while invoking
/// these callbacks, since a listener may unregister itself.
pub trait AttachStateListener {
    fn on_attached(&self, _view: &ViewRef) {}

    fn on_detached(&self, view: &ViewRef);
}

/// Whether two handles point at the same widget instance.
#[inline]
pub fn same_view(a: &ViewRef, b: &ViewRef) -> bool {
    Rc::ptr_eq(a, b)
}
