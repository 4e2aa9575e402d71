// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry changes and layout notification.
//!
//! [`ElementTree::move_element`] is the only path that writes an element's
//! bounds and clip. It re-establishes `clip = parent.clip ∩ bounds` and sends
//! [`Message::LAYOUT`] only when the committed geometry differs from the old
//! geometry (or the caller forces it). A `LAYOUT` handler positions its
//! direct children with further `move_element` calls, so layout work is
//! proportional to the number of elements whose geometry actually changed.

use super::id::{ElementId, INVALID};
use super::store::ElementTree;
use crate::message::{Arg, Message};
use crate::rect::Rectangle;
use crate::trace::LayoutEvent;

impl<P> ElementTree<P> {
    /// Moves `id` to `bounds` (window coordinates) and recomputes its clip.
    ///
    /// The new geometry is committed before `LAYOUT` is sent, so the handler
    /// observes its final bounds and clip. `LAYOUT` is sent iff the bounds or
    /// the clip changed, or `always_layout` is set. A window root is clipped
    /// against the full window rectangle.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn move_element(&mut self, id: ElementId, bounds: Rectangle, always_layout: bool) {
        self.validate(id);
        let i = id.idx as usize;

        let parent_clip = match self.parent[i] {
            INVALID => self.surface(id).rect(),
            p => self.clip[p as usize],
        };
        let clip = parent_clip.intersection(bounds);
        let changed = bounds != self.bounds[i] || clip != self.clip[i];

        self.bounds[i] = bounds;
        self.clip[i] = clip;

        if changed || always_layout {
            self.tracer.layout(&LayoutEvent {
                element: id,
                bounds,
                clip,
                forced: !changed,
            });
            self.dispatch(id, Message::LAYOUT, 0, Arg::None);
        }
    }
}
