// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layout, damage and flush.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`ElementTree`](crate::element::ElementTree) calls as it works. All method
//! bodies default to no-ops, so implementing only the events you care about is
//! fine.
//!
//! [`Tracer`] owns an optional boxed sink and is installed with
//! [`ElementTree::set_tracer`](crate::element::ElementTree::set_tracer). When
//! the `trace` feature is **off**, every `Tracer` method compiles to nothing
//! (zero overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! Sinks that must stay readable while installed can be shared through
//! `Rc<RefCell<S>>`, which implements [`TraceSink`] by forwarding.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates the per-element [`PaintEvent`].

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use crate::element::ElementId;
use crate::rect::Rectangle;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when `move_element` decides to send `LAYOUT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutEvent {
    /// The element being laid out.
    pub element: ElementId,
    /// Its committed bounds.
    pub bounds: Rectangle,
    /// Its committed clip (may be invalid).
    pub clip: Rectangle,
    /// Whether layout fired only because the caller forced it.
    pub forced: bool,
}

/// Emitted for every `repaint` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageEvent {
    /// The element that requested the repaint.
    pub element: ElementId,
    /// The window whose update region was affected.
    pub window: ElementId,
    /// The requested region, before clipping.
    pub requested: Rectangle,
    /// The clipped region merged into the update region, or `None` if the
    /// request fell outside the element's clip.
    pub accepted: Option<Rectangle>,
    /// The window's update region after the request.
    pub update_region: Option<Rectangle>,
}

/// Emitted when a window's pixel buffer is resized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    /// The resized window.
    pub window: ElementId,
    /// New width in pixels.
    pub width: u32,
    /// New height in pixels.
    pub height: u32,
}

/// Emitted before a flush walks the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlushBeginEvent {
    /// The window being flushed.
    pub window: ElementId,
    /// The region being repainted.
    pub region: Rectangle,
}

/// Emitted after a flush handed its pixels to the presenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlushEndEvent {
    /// The window that was flushed.
    pub window: ElementId,
    /// The region that was repainted and presented.
    pub region: Rectangle,
    /// Number of elements that received `PAINT`.
    pub painted: u32,
    /// Number of subtrees skipped because they lie outside the region.
    pub pruned: u32,
}

/// Emitted for each element that receives `PAINT`.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintEvent {
    /// The painted element.
    pub element: ElementId,
    /// The painter clip it was given.
    pub clip: Rectangle,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from an element tree.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when an element is about to receive `LAYOUT`.
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }

    /// Called after a repaint request was processed.
    fn on_damage(&mut self, e: &DamageEvent) {
        _ = e;
    }

    /// Called after a window buffer was resized.
    fn on_resize(&mut self, e: &ResizeEvent) {
        _ = e;
    }

    /// Called when a flush starts.
    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        _ = e;
    }

    /// Called when a flush finishes.
    fn on_flush_end(&mut self, e: &FlushEndEvent) {
        _ = e;
    }

    /// Called for every painted element (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_paint(&mut self, e: &PaintEvent) {
        _ = e;
    }
}

impl<S: TraceSink + ?Sized> TraceSink for Rc<RefCell<S>> {
    fn on_layout(&mut self, e: &LayoutEvent) {
        self.borrow_mut().on_layout(e);
    }

    fn on_damage(&mut self, e: &DamageEvent) {
        self.borrow_mut().on_damage(e);
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        self.borrow_mut().on_resize(e);
    }

    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        self.borrow_mut().on_flush_begin(e);
    }

    fn on_flush_end(&mut self, e: &FlushEndEvent) {
        self.borrow_mut().on_flush_end(e);
    }

    #[cfg(feature = "trace-rich")]
    fn on_paint(&mut self, e: &PaintEvent) {
        self.borrow_mut().on_paint(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owner of an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing and
/// the sink passed to [`new`](Self::new) is dropped. When **on**, each method
/// checks the inner `Option` (one branch) before dispatching to the sink.
#[derive(Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            drop(sink);
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns whether events reach a sink.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits a [`LayoutEvent`].
    #[inline]
    pub fn layout(&mut self, e: &LayoutEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DamageEvent`].
    #[inline]
    pub fn damage(&mut self, e: &DamageEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_damage(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResizeEvent`].
    #[inline]
    pub fn resize(&mut self, e: &ResizeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_resize(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FlushBeginEvent`].
    #[inline]
    pub fn flush_begin(&mut self, e: &FlushBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_flush_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FlushEndEvent`].
    #[inline]
    pub fn flush_end(&mut self, e: &FlushEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_flush_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PaintEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn paint(&mut self, e: &PaintEvent) {
        if let Some(s) = &mut self.sink {
            s.on_paint(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
