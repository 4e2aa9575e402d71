// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window roots: creation, resize notification and the default window
//! behaviour.

use alloc::vec::Vec;

use super::id::ElementId;
use super::store::ElementTree;
use crate::message::{Arg, Message, handler};
use crate::rect::Rectangle;
use crate::trace::ResizeEvent;

/// Initial settings for [`ElementTree::create_window`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    /// Initial buffer width in pixels.
    pub width: u32,
    /// Initial buffer height in pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl WindowConfig {
    /// A config for a `width × height` window.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Default class handler of window roots.
///
/// On `LAYOUT` it stretches the first child over the whole window and
/// damages the window. Other messages are left unhandled.
pub fn window_class_handler<P>(
    tree: &mut ElementTree<P>,
    window: ElementId,
    message: Message,
    _di: i32,
    _arg: Arg<'_>,
) -> i32 {
    if message != Message::LAYOUT {
        return 0;
    }
    if let Some(first) = tree.child(window, 0) {
        let bounds = tree.bounds(window);
        tree.move_element(first, bounds, false);
    }
    tree.repaint(window, None);
    1
}

impl<P: 'static> ElementTree<P> {
    /// Creates a window root with [`window_class_handler`] as its class
    /// handler and a `config.width × config.height` buffer.
    ///
    /// The root is laid out immediately, so the whole window starts damaged.
    pub fn create_window(&mut self, config: WindowConfig, payload: P) -> ElementId {
        let window = self.create_element(None, 0, Some(handler(window_class_handler)), payload);
        self.resize_window(window, config.width, config.height);
        window
    }
}

impl<P> ElementTree<P> {
    /// Notifies the tree that the platform resized `window`.
    ///
    /// Reallocates the pixel buffer (contents are zeroed), moves the root to
    /// the new window rectangle and damages the whole window, since the new
    /// buffer holds no drawing yet. Pending damage outside the new size is
    /// discarded.
    ///
    /// # Panics
    ///
    /// Panics if `window` is stale or not a window root.
    pub fn resize_window(&mut self, window: ElementId, width: u32, height: u32) {
        let surface = self.surface_mut(window);
        surface.width = width;
        surface.height = height;
        surface.pixels = Vec::new();
        surface.pixels.resize(width as usize * height as usize, 0);
        let rect = surface.rect();
        surface.update_region = surface
            .update_region
            .map(|r| r.intersection(rect))
            .filter(|r| r.is_valid());

        self.tracer.resize(&ResizeEvent {
            window,
            width,
            height,
        });

        self.move_element(window, Rectangle::from_size(width, height), false);
        self.repaint(window, None);
    }
}
