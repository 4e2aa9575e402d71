// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element identity.

use core::fmt;

/// Sentinel value indicating "no element" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to an element in an [`ElementTree`](super::ElementTree).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after an element is destroyed and the slot is reused.
/// A window is addressed by the handle of its root element.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    /// Slot index into the tree's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the tree's generation for this slot.
    pub(crate) generation: u32,
}

impl ElementId {
    /// Reassembles a handle from its [`index`](Self::index) and
    /// [`generation`](Self::generation), e.g. when decoding a trace recording.
    ///
    /// The result is not guaranteed to refer to a live element.
    #[inline]
    #[must_use]
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self {
            idx: index,
            generation,
        }
    }

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({}@gen{})", self.idx, self.generation)
    }
}
