// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping from native window handles to window roots.
//!
//! The platform layer receives events addressed to its own handle type
//! (an `HWND`, an X11 window id, a surface pointer). It looks the handle up
//! here to find the element tree root that should receive the event.

use alloc::vec::Vec;

use crate::element::ElementId;

/// A small registry of `(native handle, window root)` pairs.
///
/// Lookup is linear; applications have a handful of windows.
#[derive(Clone, Debug)]
pub struct WindowRegistry<H> {
    entries: Vec<(H, ElementId)>,
}

impl<H> Default for WindowRegistry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H: Copy + PartialEq> WindowRegistry<H> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `handle` with `window`, replacing any previous association
    /// of the same handle.
    pub fn register(&mut self, handle: H, window: ElementId) {
        match self.entries.iter_mut().find(|(h, _)| *h == handle) {
            Some(entry) => entry.1 = window,
            None => self.entries.push((handle, window)),
        }
    }

    /// Returns the window root registered for `handle`.
    #[must_use]
    pub fn find(&self, handle: H) -> Option<ElementId> {
        self.entries
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|&(_, window)| window)
    }

    /// Removes `handle`, returning the window root it mapped to.
    pub fn unregister(&mut self, handle: H) -> Option<ElementId> {
        let pos = self.entries.iter().position(|(h, _)| *h == handle)?;
        Some(self.entries.remove(pos).1)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of registered handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(handle, window)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (H, ElementId)> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(idx: u32) -> ElementId {
        ElementId::from_raw_parts(idx, 0)
    }

    #[test]
    fn register_and_find() {
        let mut registry = WindowRegistry::new();
        assert!(registry.is_empty());
        registry.register(0x10_usize, id(0));
        registry.register(0x20, id(5));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find(0x10), Some(id(0)));
        assert_eq!(registry.find(0x20), Some(id(5)));
        assert_eq!(registry.find(0x30), None);
    }

    #[test]
    fn reregister_replaces() {
        let mut registry = WindowRegistry::new();
        registry.register(7_u32, id(1));
        registry.register(7, id(2));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find(7), Some(id(2)));
    }

    #[test]
    fn unregister_and_clear() {
        let mut registry = WindowRegistry::new();
        registry.register(1_u8, id(1));
        registry.register(2, id(2));
        registry.register(3, id(3));

        assert_eq!(registry.unregister(2), Some(id(2)));
        assert_eq!(registry.unregister(2), None);
        assert_eq!(
            registry.iter().collect::<Vec<_>>(),
            [(1, id(1)), (3, id(3))]
        );

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.find(1), None);
    }
}
