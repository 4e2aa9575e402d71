// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-flush drawing context.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Shape};

use crate::rect::Rectangle;

/// Drawing context handed to [`Message::PAINT`](crate::message::Message::PAINT)
/// handlers.
///
/// The painter owns the window's pixel buffer for the duration of a flush
/// (row-major, one `u32` colour per pixel, origin top-left). Its
/// [`clip`](Self::clip) is the part of the flush region the current element may
/// draw into; the drawing primitives never write outside it.
///
/// [`pixels_mut`](Self::pixels_mut) exposes the raw buffer. Writes through it
/// are not clipped.
pub struct Painter {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    pub(crate) clip: Rectangle,
}

impl fmt::Debug for Painter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Painter")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("clip", &self.clip)
            .finish_non_exhaustive()
    }
}

impl Painter {
    /// Creates a painter over a `width × height` buffer.
    ///
    /// The clip is narrowed to the buffer rectangle.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height`.
    #[must_use]
    pub fn new(pixels: Vec<u32>, width: u32, height: u32, clip: Rectangle) -> Self {
        assert!(
            pixels.len() == width as usize * height as usize,
            "pixel buffer of length {} does not match {width}x{height}",
            pixels.len()
        );
        Self {
            pixels,
            width,
            height,
            clip: clip.intersection(Rectangle::from_size(width, height)),
        }
    }

    /// Consumes the painter and returns its buffer.
    #[must_use]
    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Buffer width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The rectangle the current element may draw into.
    #[must_use]
    pub fn clip(&self) -> Rectangle {
        self.clip
    }

    /// The raw buffer.
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The raw buffer, for handlers that rasterize on their own.
    ///
    /// Handlers are expected to stay within [`clip`](Self::clip).
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Returns the colour of pixel `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if !Rectangle::from_size(self.width, self.height).contains(x, y) {
            return None;
        }
        Some(self.pixels[self.offset(x, y)])
    }

    /// Fills `rect ∩ clip` with `color`.
    pub fn fill_rect(&mut self, rect: Rectangle, color: u32) {
        let r = rect.intersection(self.clip);
        if r.is_empty() {
            return;
        }
        for y in r.top..r.bottom {
            let start = self.offset(r.left, y);
            let end = self.offset(r.right, y);
            self.pixels[start..end].fill(color);
        }
    }

    /// Fills every pixel of the clip whose centre lies inside `shape`.
    pub fn fill_shape(&mut self, shape: &impl Shape, color: u32) {
        let r = Rectangle::enclosing(shape.bounding_box()).intersection(self.clip);
        if r.is_empty() {
            return;
        }
        for y in r.top..r.bottom {
            for x in r.left..r.right {
                let centre = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if shape.contains(centre) {
                    let i = self.offset(x, y);
                    self.pixels[i] = color;
                }
            }
        }
    }

    /// Buffer offset of `(x, y)`; callers guarantee the point is in range.
    fn offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(x >= 0 && y >= 0, "offset of negative coordinate");
        y as usize * self.width as usize + x as usize
    }
}
