// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays element storage with allocation, topology, and property access.

use alloc::vec::Vec;
use core::fmt;

use super::id::{ElementId, INVALID};
use super::traverse::Children;
use crate::message::Handler;
use crate::rect::Rectangle;
use crate::trace::Tracer;

/// Per-window state, stored on the window's root slot.
#[derive(Debug, Default)]
pub(crate) struct WindowSurface {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Row-major, `width * height` colours. Detached while a flush is running.
    pub(crate) pixels: Vec<u32>,
    /// Union of pending damage. Always a valid rectangle when set.
    pub(crate) update_region: Option<Rectangle>,
}

impl WindowSurface {
    pub(crate) fn rect(&self) -> Rectangle {
        Rectangle::from_size(self.width, self.height)
    }
}

/// Struct-of-arrays storage for the elements of every window.
///
/// Elements are addressed by [`ElementId`] handles. Each element occupies a
/// slot in parallel arrays; destroyed elements are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// `P` is the per-element payload, typically an enum over the application's
/// element kinds.
pub struct ElementTree<P> {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) children: Vec<Vec<u32>>,
    /// Root slot of the owning window.
    pub(crate) window: Vec<u32>,

    // -- Geometry (written only by `move_element`) --
    pub(crate) bounds: Vec<Rectangle>,
    pub(crate) clip: Vec<Rectangle>,

    // -- Behaviour --
    pub(crate) flags: Vec<u32>,
    pub(crate) class_handler: Vec<Option<Handler<P>>>,
    pub(crate) user_handler: Vec<Option<Handler<P>>>,
    /// `None` exactly for free slots.
    pub(crate) payload: Vec<Option<P>>,

    // -- Windows (only root slots carry a surface) --
    pub(crate) surface: Vec<Option<WindowSurface>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Diagnostics --
    pub(crate) tracer: Tracer,
}

impl<P> fmt::Debug for ElementTree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementTree")
            .field("len", &self.len)
            .field("free", &self.free_list.len())
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}

impl<P> Default for ElementTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ElementTree<P> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            children: Vec::new(),
            window: Vec::new(),
            bounds: Vec::new(),
            clip: Vec::new(),
            flags: Vec::new(),
            class_handler: Vec::new(),
            user_handler: Vec::new(),
            payload: Vec::new(),
            surface: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            tracer: Tracer::none(),
        }
    }

    /// Installs the tracer that receives layout, damage and flush events.
    pub fn set_tracer(&mut self, tracer: Tracer) {
        self.tracer = tracer;
    }

    /// Removes and returns the current tracer, leaving a silent one.
    pub fn take_tracer(&mut self) -> Tracer {
        core::mem::replace(&mut self.tracer, Tracer::none())
    }

    // -- Allocation API --

    /// Creates a new element and returns its handle.
    ///
    /// With a `parent`, the element is appended to the parent's children (so
    /// it paints above its earlier siblings) and belongs to the parent's
    /// window. Without one, the element is the root of a new window whose
    /// surface starts at 0×0; see
    /// [`create_window`](Self::create_window) for the usual way to make one.
    ///
    /// Bounds start zeroed and the clip starts invalid, so the element is
    /// not painted until [`move_element`](Self::move_element) places it. A `None` class handler is legal and
    /// makes the element a no-op until a user handler is attached.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn create_element(
        &mut self,
        parent: Option<ElementId>,
        flags: u32,
        class_handler: Option<Handler<P>>,
        payload: P,
    ) -> ElementId {
        if let Some(parent) = parent {
            self.validate(parent);
        }

        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot. Its generation was bumped on destroy.
            let i = idx as usize;
            self.parent[i] = INVALID;
            self.children[i].clear();
            self.bounds[i] = Rectangle::default();
            self.clip[i] = Rectangle::INVALID;
            self.flags[i] = flags;
            self.class_handler[i] = class_handler;
            self.user_handler[i] = None;
            self.payload[i] = Some(payload);
            self.surface[i] = None;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.children.push(Vec::new());
            self.window.push(idx);
            self.bounds.push(Rectangle::default());
            self.clip.push(Rectangle::INVALID);
            self.flags.push(flags);
            self.class_handler.push(class_handler);
            self.user_handler.push(None);
            self.payload.push(Some(payload));
            self.surface.push(None);
            self.generation.push(0);
            idx
        };

        let i = idx as usize;
        match parent {
            Some(parent) => {
                let p = parent.idx as usize;
                self.parent[i] = parent.idx;
                self.window[i] = self.window[p];
                self.children[p].push(idx);
            }
            None => {
                self.window[i] = idx;
                self.surface[i] = Some(WindowSurface::default());
            }
        }

        ElementId {
            idx,
            generation: self.generation[i],
        }
    }

    /// Destroys an element and, recursively, all of its descendants.
    ///
    /// The element is removed from its parent's child list. Destroying a root
    /// releases its window surface. Pixels the element drew stay in the
    /// window buffer until something repaints over them.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_element(&mut self, id: ElementId) {
        self.validate(id);
        let idx = id.idx;
        let p = self.parent[idx as usize];
        if p != INVALID {
            self.children[p as usize].retain(|&c| c != idx);
        }
        self.release_subtree(idx);
    }

    /// Returns whether the given handle refers to a live element.
    #[must_use]
    pub fn is_alive(&self, id: ElementId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && self.payload[id.idx as usize].is_some()
    }

    // -- Topology API --

    /// Returns the parent of an element, or `None` for a window root.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.id_at(p))
    }

    /// Returns an iterator over the direct children of an element, in paint
    /// order.
    #[must_use]
    pub fn children(&self, id: ElementId) -> Children<'_> {
        self.validate(id);
        Children::new(&self.children[id.idx as usize], &self.generation)
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn child_count(&self, id: ElementId) -> usize {
        self.validate(id);
        self.children[id.idx as usize].len()
    }

    /// Returns the `index`-th child, if any.
    ///
    /// Handlers that move or repaint children use this instead of
    /// [`children`](Self::children), which borrows the tree.
    #[must_use]
    pub fn child(&self, id: ElementId, index: usize) -> Option<ElementId> {
        self.validate(id);
        self.children[id.idx as usize]
            .get(index)
            .map(|&c| self.id_at(c))
    }

    /// Returns the root element of the window that owns `id`.
    #[must_use]
    pub fn window_of(&self, id: ElementId) -> ElementId {
        self.validate(id);
        self.id_at(self.window[id.idx as usize])
    }

    /// Returns whether `id` is a window root.
    #[must_use]
    pub fn is_window(&self, id: ElementId) -> bool {
        self.validate(id);
        self.surface[id.idx as usize].is_some()
    }

    /// Returns the handles of all live windows, in creation-slot order.
    #[must_use]
    pub fn windows(&self) -> Vec<ElementId> {
        (0..self.len)
            .filter(|&idx| self.surface[idx as usize].is_some())
            .map(|idx| self.id_at(idx))
            .collect()
    }

    // -- Property access --

    /// Returns the element's bounds, in window coordinates.
    #[must_use]
    pub fn bounds(&self, id: ElementId) -> Rectangle {
        self.validate(id);
        self.bounds[id.idx as usize]
    }

    /// Returns the element's clip: its bounds intersected with every
    /// ancestor's clip. May be invalid when the element is fully clipped away.
    #[must_use]
    pub fn clip(&self, id: ElementId) -> Rectangle {
        self.validate(id);
        self.clip[id.idx as usize]
    }

    /// Returns the element's flags.
    #[must_use]
    pub fn flags(&self, id: ElementId) -> u32 {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Sets the element's flags. The core stores them without interpreting them.
    pub fn set_flags(&mut self, id: ElementId, flags: u32) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
    }

    /// Returns the element's payload.
    #[must_use]
    pub fn payload(&self, id: ElementId) -> &P {
        self.validate(id);
        match &self.payload[id.idx as usize] {
            Some(payload) => payload,
            None => unreachable!("live element {id:?} without payload"),
        }
    }

    /// Returns the element's payload mutably.
    pub fn payload_mut(&mut self, id: ElementId) -> &mut P {
        self.validate(id);
        match &mut self.payload[id.idx as usize] {
            Some(payload) => payload,
            None => unreachable!("live element {id:?} without payload"),
        }
    }

    /// Installs or removes the user handler, which is consulted before the
    /// class handler on every dispatch.
    pub fn set_user_handler(&mut self, id: ElementId, handler: Option<Handler<P>>) {
        self.validate(id);
        self.user_handler[id.idx as usize] = handler;
    }

    /// Returns whether a user handler is installed.
    #[must_use]
    pub fn has_user_handler(&self, id: ElementId) -> bool {
        self.validate(id);
        self.user_handler[id.idx as usize].is_some()
    }

    // -- Window access --

    /// Returns the window's pixel buffer size.
    ///
    /// # Panics
    ///
    /// Panics if `window` is stale or not a window root.
    #[must_use]
    pub fn window_size(&self, window: ElementId) -> (u32, u32) {
        let surface = self.surface(window);
        (surface.width, surface.height)
    }

    /// Returns the window's pending damage, or `None` if nothing needs
    /// repainting.
    ///
    /// # Panics
    ///
    /// Panics if `window` is stale or not a window root.
    #[must_use]
    pub fn update_region(&self, window: ElementId) -> Option<Rectangle> {
        self.surface(window).update_region
    }

    /// Returns the window's pixel buffer (row-major, origin top-left).
    ///
    /// # Panics
    ///
    /// Panics if `window` is stale or not a window root.
    #[must_use]
    pub fn pixels(&self, window: ElementId) -> &[u32] {
        &self.surface(window).pixels
    }

    // -- Internal helpers --

    /// Builds the current handle for a live slot.
    pub(crate) fn id_at(&self, idx: u32) -> ElementId {
        ElementId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ElementId) {
        assert!(
            self.is_alive(id),
            "stale ElementId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    pub(crate) fn surface(&self, window: ElementId) -> &WindowSurface {
        self.validate(window);
        match &self.surface[window.idx as usize] {
            Some(surface) => surface,
            None => panic!("element is not a window: {window:?}"),
        }
    }

    pub(crate) fn surface_mut(&mut self, window: ElementId) -> &mut WindowSurface {
        self.validate(window);
        match &mut self.surface[window.idx as usize] {
            Some(surface) => surface,
            None => panic!("element is not a window: {window:?}"),
        }
    }

    /// Frees `idx` and every slot below it, children first.
    fn release_subtree(&mut self, idx: u32) {
        let i = idx as usize;
        for child in core::mem::take(&mut self.children[i]) {
            self.release_subtree(child);
        }
        self.parent[i] = INVALID;
        self.class_handler[i] = None;
        self.user_handler[i] = None;
        self.payload[i] = None;
        self.surface[i] = None;
        // Bump generation so old handles immediately fail validation.
        self.generation[i] = self.generation[i].wrapping_add(1);
        self.free_list.push(idx);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn tree_with_root() -> (ElementTree<u32>, ElementId) {
        let mut tree = ElementTree::new();
        let root = tree.create_element(None, 0, None, 0);
        (tree, root)
    }

    #[test]
    fn create_and_destroy() {
        let (mut tree, root) = tree_with_root();
        assert!(tree.is_alive(root));
        assert!(tree.is_window(root));
        tree.destroy_element(root);
        assert!(!tree.is_alive(root));
        assert!(tree.windows().is_empty());
    }

    #[test]
    fn generation_prevents_stale_access() {
        let (mut tree, root) = tree_with_root();
        let a = tree.create_element(Some(root), 0, None, 1);
        tree.destroy_element(a);
        let b = tree.create_element(Some(root), 0, None, 2);
        // b reuses the same slot but has a different generation.
        assert!(!tree.is_alive(a));
        assert!(tree.is_alive(b));
        assert_eq!(a.idx, b.idx);
        assert_ne!(a.generation, b.generation);
    }

    #[test]
    fn children_keep_creation_order() {
        let (mut tree, root) = tree_with_root();
        let a = tree.create_element(Some(root), 0, None, 1);
        let b = tree.create_element(Some(root), 0, None, 2);
        let c = tree.create_element(Some(root), 0, None, 3);

        let kids: Vec<_> = tree.children(root).collect();
        assert_eq!(kids, vec![a, b, c]);
        assert_eq!(tree.child_count(root), 3);
        assert_eq!(tree.child(root, 1), Some(b));
        assert_eq!(tree.child(root, 3), None);
        assert_eq!(tree.parent(b), Some(root));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn children_inherit_window() {
        let (mut tree, root) = tree_with_root();
        let a = tree.create_element(Some(root), 0, None, 1);
        let b = tree.create_element(Some(a), 0, None, 2);
        assert_eq!(tree.window_of(b), root);
        assert_eq!(tree.window_of(root), root);
        assert!(!tree.is_window(b));
    }

    #[test]
    fn destroy_is_recursive() {
        let (mut tree, root) = tree_with_root();
        let a = tree.create_element(Some(root), 0, None, 1);
        let b = tree.create_element(Some(a), 0, None, 2);
        let c = tree.create_element(Some(b), 0, None, 3);
        let sibling = tree.create_element(Some(root), 0, None, 4);

        tree.destroy_element(a);

        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert!(!tree.is_alive(c));
        assert!(tree.is_alive(sibling));
        let kids: Vec<_> = tree.children(root).collect();
        assert_eq!(kids, vec![sibling]);
    }

    #[test]
    fn reused_slot_is_reset() {
        let (mut tree, root) = tree_with_root();
        let a = tree.create_element(Some(root), 7, None, 1);
        let _ = tree.create_element(Some(a), 0, None, 2);
        tree.destroy_element(a);

        let fresh = tree.create_element(None, 0, None, 9);
        assert_eq!(tree.child_count(fresh), 0);
        assert_eq!(tree.flags(fresh), 0);
        assert_eq!(tree.bounds(fresh), Rectangle::default());
        assert!(!tree.clip(fresh).is_valid());
        assert!(tree.is_window(fresh));
        assert_eq!(*tree.payload(fresh), 9);
    }

    #[test]
    fn payload_and_flags() {
        let (mut tree, root) = tree_with_root();
        let a = tree.create_element(Some(root), 0b10, None, 5);
        assert_eq!(tree.flags(a), 0b10);
        tree.set_flags(a, 0b11);
        assert_eq!(tree.flags(a), 0b11);
        *tree.payload_mut(a) += 1;
        assert_eq!(*tree.payload(a), 6);
    }

    #[test]
    fn windows_lists_roots() {
        let (mut tree, root) = tree_with_root();
        let _child = tree.create_element(Some(root), 0, None, 1);
        let other = tree.create_element(None, 0, None, 2);
        assert_eq!(tree.windows(), vec![root, other]);
    }

    #[test]
    #[should_panic(expected = "stale ElementId")]
    fn destroyed_handle_panics_on_bounds() {
        let (mut tree, root) = tree_with_root();
        tree.destroy_element(root);
        let _ = tree.bounds(root);
    }

    #[test]
    #[should_panic(expected = "stale ElementId")]
    fn destroyed_parent_panics_on_create() {
        let (mut tree, root) = tree_with_root();
        tree.destroy_element(root);
        let _ = tree.create_element(Some(root), 0, None, 1);
    }

    #[test]
    #[should_panic(expected = "element is not a window")]
    fn window_query_on_child_panics() {
        let (mut tree, root) = tree_with_root();
        let a = tree.create_element(Some(root), 0, None, 1);
        let _ = tree.update_region(a);
    }
}
