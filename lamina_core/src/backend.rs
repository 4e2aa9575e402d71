// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Lamina leaves everything that touches the operating system to a thin
//! platform layer. That layer provides the following pieces:
//!
//! - **Event pump**: Reads native events and routes them to the owning
//!   window, typically through a [`WindowRegistry`](crate::registry::WindowRegistry).
//!   This is backend-specific and not abstracted by a trait.
//!
//! - **Resize notification**: Calls
//!   [`ElementTree::resize_window`](crate::element::ElementTree::resize_window)
//!   whenever the native window changes size.
//!
//! - **Presenter**: Implements the [`Presenter`] trait to copy a window's
//!   pixels onto the display surface at the end of each flush.
//!
//! The pixel buffer's origin is the top-left corner, rows running downwards.
//! Platforms whose surfaces are bottom-up flip the axis inside their
//! presenter; the core never sees an inverted coordinate.

use crate::element::ElementId;
use crate::rect::Rectangle;

/// Copies flushed pixels to the display.
///
/// # Frame loop pseudocode
///
/// A typical platform loop wires the pieces together like this:
///
/// ```rust,ignore
/// loop {
///     match next_native_event() {
///         Resized { handle, width, height } => {
///             let window = registry.find(handle).unwrap();
///             tree.resize_window(window, width, height);
///         }
///         Idle => {
///             for window in tree.windows() {
///                 tree.flush(window, &mut presenter);
///             }
///         }
///         Closed => break,
///     }
/// }
/// ```
pub trait Presenter {
    /// Presents `region` of `window`'s buffer.
    ///
    /// `pixels` is the whole `width × height` buffer, row-major with the
    /// origin at the top-left; only `region` (always valid and inside the
    /// buffer) changed since the previous present.
    fn present(
        &mut self,
        window: ElementId,
        pixels: &[u32],
        width: u32,
        height: u32,
        region: Rectangle,
    );
}
