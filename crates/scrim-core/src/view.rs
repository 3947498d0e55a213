#![forbid(unsafe_code)]

//! Retained view tree.
//!
//! A [`ViewTree`] is an arena of [`View`] nodes keyed by [`ViewId`]. Views
//! carry a frame, an alpha, a presentation transform, an optional integer
//! [`ViewTag`], an autoresizing mask, and an ordered child list. The tree is
//! the shared mutable surface of the presentation layer: orchestration code
//! mutates it from lifecycle calls and animation completion callbacks, all on
//! one thread.
//!
//! # Invariants
//!
//! 1. Parent/child links are symmetric: `parent(c) == Some(p)` iff `c` is in
//!    `children(p)`, at exactly one position.
//! 2. Subview order is append order; later subviews sit above earlier ones.
//! 3. `remove_from_parent` detaches a subtree but keeps every node allocated;
//!    `remove` destroys the node and its whole subtree.
//! 4. `set_frame` cascades to children along the axes their [`ResizeMask`]
//!    marks flexible, recursively.
//!
//! # Failure Modes
//!
//! Every operation on a stale or foreign `ViewId` is a no-op (mutators) or
//! returns `None`/a default (accessors). Nothing panics on a dangling id.

use bitflags::bitflags;
use slotmap::{SlotMap, new_key_type};

use crate::geometry::{Rect, Size};

new_key_type! {
    /// Arena key for a view in a [`ViewTree`].
    pub struct ViewId;
}

/// Integer tag marker used to locate views without holding a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewTag(pub i32);

bitflags! {
    /// Autoresizing behavior of a view when its parent's frame changes.
    ///
    /// A flexible axis absorbs the parent's size delta on that axis; a fixed
    /// axis leaves the child untouched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ResizeMask: u8 {
        const FLEX_WIDTH = 1 << 0;
        const FLEX_HEIGHT = 1 << 1;
    }
}

/// Presentation transform applied on top of a view's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub dx: i32,
    pub dy: i32,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        dx: 0,
        dy: 0,
    };

    /// A pure translation.
    pub const fn translate(dx: i32, dy: i32) -> Self {
        Self { scale: 1.0, dx, dy }
    }

    /// A pure scale about the view center.
    pub const fn scaled(scale: f32) -> Self {
        Self {
            scale,
            dx: 0,
            dy: 0,
        }
    }

    /// Whether this is the identity transform.
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A node in the view tree.
#[derive(Debug, Clone)]
pub struct View {
    frame: Rect,
    alpha: f32,
    transform: Transform,
    tag: Option<ViewTag>,
    autoresizing: ResizeMask,
    enabled: bool,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
}

impl View {
    fn new(frame: Rect) -> Self {
        Self {
            frame,
            alpha: 1.0,
            transform: Transform::IDENTITY,
            tag: None,
            autoresizing: ResizeMask::empty(),
            enabled: true,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Arena of views plus the hierarchy between them.
#[derive(Debug, Default)]
pub struct ViewTree {
    views: SlotMap<ViewId, View>,
}

impl ViewTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new detached view with the given frame.
    pub fn create(&mut self, frame: Rect) -> ViewId {
        self.views.insert(View::new(frame))
    }

    /// Whether the id refers to a live view.
    pub fn contains(&self, id: ViewId) -> bool {
        self.views.contains_key(id)
    }

    /// Number of live views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn frame(&self, id: ViewId) -> Option<Rect> {
        self.views.get(id).map(|v| v.frame)
    }

    /// The view's own coordinate space: its size at the origin.
    pub fn bounds(&self, id: ViewId) -> Option<Rect> {
        self.views.get(id).map(|v| Rect::from_size(v.frame.size()))
    }

    pub fn alpha(&self, id: ViewId) -> Option<f32> {
        self.views.get(id).map(|v| v.alpha)
    }

    pub fn set_alpha(&mut self, id: ViewId, alpha: f32) {
        if let Some(v) = self.views.get_mut(id) {
            v.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    pub fn transform(&self, id: ViewId) -> Option<Transform> {
        self.views.get(id).map(|v| v.transform)
    }

    pub fn set_transform(&mut self, id: ViewId, transform: Transform) {
        if let Some(v) = self.views.get_mut(id) {
            v.transform = transform;
        }
    }

    pub fn tag(&self, id: ViewId) -> Option<ViewTag> {
        self.views.get(id).and_then(|v| v.tag)
    }

    pub fn set_tag(&mut self, id: ViewId, tag: Option<ViewTag>) {
        if let Some(v) = self.views.get_mut(id) {
            v.tag = tag;
        }
    }

    pub fn autoresizing(&self, id: ViewId) -> ResizeMask {
        self.views.get(id).map(|v| v.autoresizing).unwrap_or_default()
    }

    pub fn set_autoresizing(&mut self, id: ViewId, mask: ResizeMask) {
        if let Some(v) = self.views.get_mut(id) {
            v.autoresizing = mask;
        }
    }

    pub fn is_enabled(&self, id: ViewId) -> bool {
        self.views.get(id).is_some_and(|v| v.enabled)
    }

    pub fn set_enabled(&mut self, id: ViewId, enabled: bool) {
        if let Some(v) = self.views.get_mut(id) {
            v.enabled = enabled;
        }
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.views.get(id).and_then(|v| v.parent)
    }

    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.views.get(id).map(|v| v.children.as_slice()).unwrap_or(&[])
    }

    /// Append `child` to `parent`'s subview list, detaching it from any
    /// previous parent first. Cycles (adding an ancestor under its own
    /// descendant) and self-adoption are rejected as no-ops.
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        if self.is_descendant(parent, child) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.views.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.views.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Detach a subtree from its parent, keeping every node alive.
    pub fn remove_from_parent(&mut self, id: ViewId) {
        self.detach(id);
    }

    /// Destroy a view and its entire subtree.
    pub fn remove(&mut self, id: ViewId) {
        if !self.contains(id) {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(view) = self.views.remove(next) {
                stack.extend(view.children);
            }
        }
    }

    /// Whether `id` is `ancestor` or sits somewhere below it.
    pub fn is_descendant(&self, id: ViewId, ancestor: ViewId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Depth-first search for a tagged view in the subtree rooted at `root`,
    /// the root itself included. Returns the first match in document order.
    pub fn view_with_tag(&self, root: ViewId, tag: ViewTag) -> Option<ViewId> {
        if !self.contains(root) {
            return None;
        }
        let mut stack = vec![root];
        while let Some(next) = stack.pop() {
            let Some(view) = self.views.get(next) else {
                continue;
            };
            if view.tag == Some(tag) {
                return Some(next);
            }
            // Reverse push so earlier subviews are visited first.
            stack.extend(view.children.iter().rev().copied());
        }
        None
    }

    /// Set a view's frame, cascading the size delta to flexible children.
    pub fn set_frame(&mut self, id: ViewId, frame: Rect) {
        let Some(view) = self.views.get_mut(id) else {
            return;
        };
        let old = view.frame;
        view.frame = frame;
        let dw = i32::from(frame.width) - i32::from(old.width);
        let dh = i32::from(frame.height) - i32::from(old.height);
        if dw == 0 && dh == 0 {
            return;
        }
        let children: Vec<ViewId> = self.children(id).to_vec();
        for child in children {
            let mask = self.autoresizing(child);
            if mask.is_empty() {
                continue;
            }
            let Some(mut child_frame) = self.frame(child) else {
                continue;
            };
            if mask.contains(ResizeMask::FLEX_WIDTH) {
                child_frame.width = clamp_dim(child_frame.width, dw);
            }
            if mask.contains(ResizeMask::FLEX_HEIGHT) {
                child_frame.height = clamp_dim(child_frame.height, dh);
            }
            self.set_frame(child, child_frame);
        }
    }

    fn detach(&mut self, id: ViewId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(p) = self.views.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        if let Some(c) = self.views.get_mut(id) {
            c.parent = None;
        }
    }
}

fn clamp_dim(dim: u16, delta: i32) -> u16 {
    (i32::from(dim) + delta).clamp(0, i32::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_root() -> (ViewTree, ViewId) {
        let mut tree = ViewTree::new();
        let root = tree.create(Rect::new(0, 0, 80, 24));
        (tree, root)
    }

    #[test]
    fn add_subview_links_both_directions() {
        let (mut tree, root) = tree_with_root();
        let child = tree.create(Rect::new(0, 0, 10, 5));
        tree.add_subview(root, child);
        assert_eq!(tree.parent(child), Some(root));
        assert_eq!(tree.children(root), &[child]);
    }

    #[test]
    fn add_subview_reparents() {
        let (mut tree, root) = tree_with_root();
        let other = tree.create(Rect::new(0, 0, 20, 20));
        let child = tree.create(Rect::new(0, 0, 10, 5));
        tree.add_subview(root, child);
        tree.add_subview(other, child);
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.parent(child), Some(other));
    }

    #[test]
    fn add_subview_rejects_cycles() {
        let (mut tree, root) = tree_with_root();
        let child = tree.create(Rect::new(0, 0, 10, 5));
        tree.add_subview(root, child);
        tree.add_subview(child, root);
        assert_eq!(tree.parent(root), None);
        tree.add_subview(root, root);
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn subview_order_is_append_order() {
        let (mut tree, root) = tree_with_root();
        let a = tree.create(Rect::default());
        let b = tree.create(Rect::default());
        let c = tree.create(Rect::default());
        tree.add_subview(root, a);
        tree.add_subview(root, b);
        tree.add_subview(root, c);
        assert_eq!(tree.children(root), &[a, b, c]);
    }

    #[test]
    fn remove_from_parent_keeps_subtree_alive() {
        let (mut tree, root) = tree_with_root();
        let child = tree.create(Rect::default());
        let grandchild = tree.create(Rect::default());
        tree.add_subview(root, child);
        tree.add_subview(child, grandchild);
        tree.remove_from_parent(child);
        assert!(tree.contains(child));
        assert!(tree.contains(grandchild));
        assert_eq!(tree.parent(child), None);
        assert_eq!(tree.children(child), &[grandchild]);
    }

    #[test]
    fn remove_destroys_subtree() {
        let (mut tree, root) = tree_with_root();
        let child = tree.create(Rect::default());
        let grandchild = tree.create(Rect::default());
        tree.add_subview(root, child);
        tree.add_subview(child, grandchild);
        tree.remove(child);
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert!(tree.children(root).is_empty());
        assert!(tree.contains(root));
    }

    #[test]
    fn stale_ids_are_noops() {
        let (mut tree, root) = tree_with_root();
        let child = tree.create(Rect::default());
        tree.add_subview(root, child);
        tree.remove(child);
        tree.set_alpha(child, 0.5);
        tree.set_frame(child, Rect::new(0, 0, 5, 5));
        assert_eq!(tree.frame(child), None);
        assert_eq!(tree.alpha(child), None);
        assert!(!tree.is_enabled(child));
    }

    #[test]
    fn view_with_tag_searches_subtree_including_root() {
        let (mut tree, root) = tree_with_root();
        let child = tree.create(Rect::default());
        tree.add_subview(root, child);
        tree.set_tag(root, Some(ViewTag(7)));
        tree.set_tag(child, Some(ViewTag(9)));
        assert_eq!(tree.view_with_tag(root, ViewTag(7)), Some(root));
        assert_eq!(tree.view_with_tag(root, ViewTag(9)), Some(child));
        assert_eq!(tree.view_with_tag(root, ViewTag(1)), None);
        // The search does not escape the given subtree.
        assert_eq!(tree.view_with_tag(child, ViewTag(7)), None);
    }

    #[test]
    fn view_with_tag_prefers_earlier_subviews() {
        let (mut tree, root) = tree_with_root();
        let a = tree.create(Rect::default());
        let b = tree.create(Rect::default());
        tree.add_subview(root, a);
        tree.add_subview(root, b);
        tree.set_tag(a, Some(ViewTag(3)));
        tree.set_tag(b, Some(ViewTag(3)));
        assert_eq!(tree.view_with_tag(root, ViewTag(3)), Some(a));
    }

    #[test]
    fn flexible_child_tracks_parent_resize() {
        let (mut tree, root) = tree_with_root();
        let child = tree.create(Rect::new(0, 0, 80, 24));
        tree.set_autoresizing(child, ResizeMask::FLEX_WIDTH | ResizeMask::FLEX_HEIGHT);
        tree.add_subview(root, child);
        tree.set_frame(root, Rect::new(0, 0, 80, 18));
        assert_eq!(tree.frame(child), Some(Rect::new(0, 0, 80, 18)));
        tree.set_frame(root, Rect::new(0, 0, 100, 30));
        assert_eq!(tree.frame(child), Some(Rect::new(0, 0, 100, 30)));
    }

    #[test]
    fn fixed_child_ignores_parent_resize() {
        let (mut tree, root) = tree_with_root();
        let child = tree.create(Rect::new(10, 5, 20, 4));
        tree.add_subview(root, child);
        tree.set_frame(root, Rect::new(0, 0, 100, 30));
        assert_eq!(tree.frame(child), Some(Rect::new(10, 5, 20, 4)));
    }

    #[test]
    fn resize_cascades_through_flexible_grandchildren() {
        let (mut tree, root) = tree_with_root();
        let child = tree.create(Rect::new(0, 0, 80, 24));
        let grandchild = tree.create(Rect::new(0, 0, 80, 24));
        let full = ResizeMask::FLEX_WIDTH | ResizeMask::FLEX_HEIGHT;
        tree.set_autoresizing(child, full);
        tree.set_autoresizing(grandchild, full);
        tree.add_subview(root, child);
        tree.add_subview(child, grandchild);
        tree.set_frame(root, Rect::new(0, 0, 40, 12));
        assert_eq!(tree.frame(grandchild), Some(Rect::new(0, 0, 40, 12)));
    }

    #[test]
    fn shrink_clamps_at_zero() {
        let (mut tree, root) = tree_with_root();
        let child = tree.create(Rect::new(0, 0, 2, 2));
        tree.set_autoresizing(child, ResizeMask::FLEX_WIDTH | ResizeMask::FLEX_HEIGHT);
        tree.add_subview(root, child);
        tree.set_frame(root, Rect::new(0, 0, 0, 0));
        assert_eq!(tree.frame(child), Some(Rect::new(0, 0, 0, 0)));
    }

    #[test]
    fn alpha_is_clamped() {
        let (mut tree, root) = tree_with_root();
        tree.set_alpha(root, 2.0);
        assert_eq!(tree.alpha(root), Some(1.0));
        tree.set_alpha(root, -1.0);
        assert_eq!(tree.alpha(root), Some(0.0));
    }
}
