//! Minimal in-crate host used by unit tests.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::host::{LayoutSize, ListenerRef, View, ViewRef, Visibility};
use crate::id::ViewId;

pub(crate) struct FakeView {
    id: ViewId,
    alpha: Cell<f32>,
    clickable: Cell<bool>,
    visibility: Cell<Visibility>,
    layout: Cell<Option<LayoutSize>>,
    layout_requests: Cell<u32>,
    listeners: RefCell<Vec<ListenerRef>>,
}

impl FakeView {
    pub(crate) fn new(
        alpha: f32,
        clickable: bool,
        visibility: Visibility,
        layout: Option<LayoutSize>,
    ) -> Rc<Self> {
        Rc::new(Self {
            id: ViewId::next(),
            alpha: Cell::new(alpha),
            clickable: Cell::new(clickable),
            visibility: Cell::new(visibility),
            layout: Cell::new(layout),
            layout_requests: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// `{alpha=1.0, clickable=true, VISIBLE, w x h}`.
    pub(crate) fn shown(width: i32, height: i32) -> Rc<Self> {
        Self::new(1.0, true, Visibility::Visible, Some(LayoutSize::new(width, height)))
    }

    /// Give the widget layout params (or take them away) behind the
    /// mutator's back, the way a host re-inflating a view would.
    pub(crate) fn set_layout_params(&self, size: Option<LayoutSize>) {
        self.layout.set(size);
    }

    pub(crate) fn layout_requests(&self) -> u32 {
        self.layout_requests.get()
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Fire `on_detached` on a copy of the listener list.
    pub(crate) fn detach(self: &Rc<Self>) {
        let listeners: Vec<ListenerRef> = self.listeners.borrow().clone();
        let as_view: ViewRef = self.clone();
        for listener in listeners {
            listener.on_detached(&as_view);
        }
    }
}

impl fmt::Debug for FakeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FakeView({})", self.id)
    }
}

impl View for FakeView {
    fn view_id(&self) -> ViewId {
        self.id
    }

    fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
    }

    fn is_clickable(&self) -> bool {
        self.clickable.get()
    }

    fn set_clickable(&self, clickable: bool) {
        self.clickable.set(clickable);
    }

    fn visibility(&self) -> Visibility {
        self.visibility.get()
    }

    fn set_visibility(&self, visibility: Visibility) {
        self.visibility.set(visibility);
    }

    fn layout_size(&self) -> Option<LayoutSize> {
        self.layout.get()
    }

    fn set_layout_size(&self, size: LayoutSize) {
        if self.layout.get().is_some() {
            self.layout.set(Some(size));
        }
    }

    fn request_layout(&self) {
        self.layout_requests.set(self.layout_requests.get() + 1);
    }

    fn add_attach_state_listener(&self, listener: ListenerRef) {
        let mut listeners = self.listeners.borrow_mut();
        if !listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            listeners.push(listener);
        }
    }

    fn remove_attach_state_listener(&self, listener: &ListenerRef) {
        self.listeners.borrow_mut().retain(|l| !Rc::ptr_eq(l, listener));
    }
}
