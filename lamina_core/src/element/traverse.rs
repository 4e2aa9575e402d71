// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use core::slice;

use super::id::ElementId;

/// An iterator over the direct children of an element, in paint order.
///
/// Created by [`ElementTree::children`](super::ElementTree::children).
#[derive(Debug)]
pub struct Children<'a> {
    slots: slice::Iter<'a, u32>,
    generation: &'a [u32],
}

impl<'a> Children<'a> {
    pub(crate) fn new(slots: &'a [u32], generation: &'a [u32]) -> Self {
        Self {
            slots: slots.iter(),
            generation,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let idx = *self.slots.next()?;
        Some(ElementId {
            idx,
            generation: self.generation[idx as usize],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}
