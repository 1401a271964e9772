#![forbid(unsafe_code)]

//! In-memory widget tree implementing the host contract.
//!
//! [`TestView`] stores its presentation in `Cell`s, dedups attach listeners
//! by identity, and counts layout requests. [`TestScreen`] owns a tree of
//! them and can detach subtrees, firing `on_detached` the way a real host
//! does when a view leaves its window.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use veil_core::{
    LayoutSize, ListenerRef, View, ViewBounds, ViewId, ViewProperty, ViewRef, Visibility,
};

/// A widget of the in-memory host.
pub struct TestView {
    id: ViewId,
    class_name: String,
    bounds: ViewBounds,
    alpha: Cell<f32>,
    clickable: Cell<bool>,
    visibility: Cell<Visibility>,
    layout: Cell<Option<LayoutSize>>,
    layout_requests: Cell<u32>,
    attached: Cell<bool>,
    listeners: RefCell<Vec<ListenerRef>>,
    children: RefCell<Vec<Rc<TestView>>>,
}

/// Builder for [`TestView`].
#[derive(Debug, Clone)]
pub struct TestViewBuilder {
    class_name: String,
    bounds: ViewBounds,
    alpha: f32,
    clickable: bool,
    visibility: Visibility,
    layout: Option<LayoutSize>,
}

impl TestViewBuilder {
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Give the view layout params of `width` x `height`.
    #[must_use]
    pub fn layout(mut self, width: i32, height: i32) -> Self {
        self.layout = Some(LayoutSize::new(width, height));
        self
    }

    /// Build a view that has no layout params.
    #[must_use]
    pub fn no_layout(mut self) -> Self {
        self.layout = None;
        self
    }

    #[must_use]
    pub fn bounds(mut self, bounds: ViewBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn build(self) -> Rc<TestView> {
        Rc::new(TestView {
            id: ViewId::next(),
            class_name: self.class_name,
            bounds: self.bounds,
            alpha: Cell::new(self.alpha),
            clickable: Cell::new(self.clickable),
            visibility: Cell::new(self.visibility),
            layout: Cell::new(self.layout),
            layout_requests: Cell::new(0),
            attached: Cell::new(true),
            listeners: RefCell::new(Vec::new()),
            children: RefCell::new(Vec::new()),
        })
    }
}

impl TestView {
    /// Start a view of `class_name`: opaque, clickable, visible, wrap-content.
    pub fn builder(class_name: impl Into<String>) -> TestViewBuilder {
        TestViewBuilder {
            class_name: class_name.into(),
            bounds: ViewBounds::default(),
            alpha: 1.0,
            clickable: true,
            visibility: Visibility::Visible,
            layout: Some(LayoutSize::new(
                LayoutSize::WRAP_CONTENT,
                LayoutSize::WRAP_CONTENT,
            )),
        }
    }

    /// This view as a controller handle.
    pub fn as_view(self: &Rc<Self>) -> ViewRef {
        Rc::clone(self) as ViewRef
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn bounds(&self) -> ViewBounds {
        self.bounds
    }

    /// Current values of the five fields the controller touches.
    pub fn state(&self) -> ViewProperty {
        ViewProperty::capture(self)
    }

    pub fn layout_requests(&self) -> u32 {
        self.layout_requests.get()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    /// Append `child` and return `self` for chaining.
    pub fn push_child(self: &Rc<Self>, child: Rc<TestView>) -> Rc<Self> {
        self.children.borrow_mut().push(child);
        Rc::clone(self)
    }

    pub fn children(&self) -> Vec<Rc<TestView>> {
        self.children.borrow().clone()
    }

    fn remove_child(&self, target: &Rc<TestView>) -> bool {
        let mut children = self.children.borrow_mut();
        let before = children.len();
        children.retain(|child| !Rc::ptr_eq(child, target));
        before != children.len()
    }

    fn fire_detached(self: &Rc<Self>) {
        self.attached.set(false);
        for child in self.children() {
            child.fire_detached();
        }
        let listeners: Vec<ListenerRef> = self.listeners.borrow().clone();
        let view = self.as_view();
        for listener in listeners {
            listener.on_detached(&view);
        }
    }
}

impl fmt::Debug for TestView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}}}", self.class_name, self.id)
    }
}

impl View for TestView {
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
        if !listeners.iter().any(|known| Rc::ptr_eq(known, &listener)) {
            listeners.push(listener);
        }
    }

    fn remove_attach_state_listener(&self, listener: &ListenerRef) {
        self.listeners
            .borrow_mut()
            .retain(|known| !Rc::ptr_eq(known, listener));
    }
}

/// A screen: a named root of attached views.
pub struct TestScreen {
    name: String,
    root: Rc<TestView>,
}

impl TestScreen {
    pub fn new(name: impl Into<String>, root: Rc<TestView>) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Rc<TestView> {
        &self.root
    }

    /// Attached views in pre-order with their depth (root is 0).
    pub fn walk(&self) -> Vec<(Rc<TestView>, u32)> {
        let mut out = Vec::new();
        let mut stack = vec![(Rc::clone(&self.root), 0u32)];
        while let Some((view, depth)) = stack.pop() {
            for child in view.children().into_iter().rev() {
                stack.push((child, depth + 1));
            }
            out.push((view, depth));
        }
        out
    }

    /// First attached view of `class_name` in walk order.
    pub fn find_by_class(&self, class_name: &str) -> Option<Rc<TestView>> {
        self.walk()
            .into_iter()
            .map(|(view, _)| view)
            .find(|view| view.class_name() == class_name)
    }

    /// Remove `view` and its subtree from the tree, notifying listeners.
    ///
    /// Returns `false` if `view` is not part of this screen.
    pub fn detach(&self, view: &Rc<TestView>) -> bool {
        let parent = self
            .walk()
            .into_iter()
            .map(|(candidate, _)| candidate)
            .find(|candidate| candidate.children().iter().any(|c| Rc::ptr_eq(c, view)));
        match parent {
            Some(parent) if parent.remove_child(view) => {
                view.fire_detached();
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for TestScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for TestScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestScreen")
            .field("name", &self.name)
            .field("views", &self.walk().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (TestScreen, Rc<TestView>, Rc<TestView>) {
        let leaf = TestView::builder("android.widget.TextView").build();
        let group = TestView::builder("android.widget.LinearLayout")
            .build()
            .push_child(Rc::clone(&leaf));
        let root = TestView::builder("android.widget.FrameLayout")
            .build()
            .push_child(Rc::clone(&group));
        (TestScreen::new("MainActivity", root), group, leaf)
    }

    #[test]
    fn walk_reports_depths_in_preorder() {
        let (screen, _, _) = tree();
        let depths: Vec<(String, u32)> = screen
            .walk()
            .into_iter()
            .map(|(v, d)| (v.class_name().to_string(), d))
            .collect();
        assert_eq!(
            depths,
            vec![
                ("android.widget.FrameLayout".to_string(), 0),
                ("android.widget.LinearLayout".to_string(), 1),
                ("android.widget.TextView".to_string(), 2),
            ]
        );
    }

    #[test]
    fn detach_removes_subtree() {
        let (screen, group, leaf) = tree();
        assert!(screen.detach(&group));
        assert!(!group.is_attached());
        assert!(!leaf.is_attached());
        assert!(screen.find_by_class("android.widget.TextView").is_none());
        assert!(!screen.detach(&group));
    }

    #[test]
    fn layout_writes_need_layout_params() {
        let view = TestView::builder("View").no_layout().build();
        view.set_layout_size(LayoutSize::ZERO);
        assert_eq!(view.layout_size(), None);
    }
}
