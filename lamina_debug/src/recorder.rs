// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as tagged little-endian records. [`decode`] reads them back as
//! an iterator of [`RecordedEvent`].
//!
//! Element handles are stored as `(index, generation)`, rectangles as four
//! `i32`s in `left, right, top, bottom` order, and optional rectangles as a
//! presence byte followed by the rectangle (zeroed when absent).

use lamina_core::element::ElementId;
use lamina_core::rect::Rectangle;
use lamina_core::trace::{
    DamageEvent, FlushBeginEvent, FlushEndEvent, LayoutEvent, PaintEvent, ResizeEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_LAYOUT: u8 = 1;
const TAG_DAMAGE: u8 = 2;
const TAG_RESIZE: u8 = 3;
const TAG_FLUSH_BEGIN: u8 = 4;
const TAG_FLUSH_END: u8 = 5;
const TAG_PAINT: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_id(&mut self, id: ElementId) {
        self.write_u32(id.index());
        self.write_u32(id.generation());
    }

    fn write_rect(&mut self, r: Rectangle) {
        self.write_i32(r.left);
        self.write_i32(r.right);
        self.write_i32(r.top);
        self.write_i32(r.bottom);
    }

    fn write_option_rect(&mut self, r: Option<Rectangle>) {
        self.write_u8(u8::from(r.is_some()));
        self.write_rect(r.unwrap_or_default());
    }
}

impl TraceSink for RecorderSink {
    fn on_layout(&mut self, e: &LayoutEvent) {
        self.write_u8(TAG_LAYOUT);
        self.write_id(e.element);
        self.write_rect(e.bounds);
        self.write_rect(e.clip);
        self.write_u8(u8::from(e.forced));
    }

    fn on_damage(&mut self, e: &DamageEvent) {
        self.write_u8(TAG_DAMAGE);
        self.write_id(e.element);
        self.write_id(e.window);
        self.write_rect(e.requested);
        self.write_option_rect(e.accepted);
        self.write_option_rect(e.update_region);
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        self.write_u8(TAG_RESIZE);
        self.write_id(e.window);
        self.write_u32(e.width);
        self.write_u32(e.height);
    }

    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        self.write_u8(TAG_FLUSH_BEGIN);
        self.write_id(e.window);
        self.write_rect(e.region);
    }

    fn on_flush_end(&mut self, e: &FlushEndEvent) {
        self.write_u8(TAG_FLUSH_END);
        self.write_id(e.window);
        self.write_rect(e.region);
        self.write_u32(e.painted);
        self.write_u32(e.pruned);
    }

    fn on_paint(&mut self, e: &PaintEvent) {
        self.write_u8(TAG_PAINT);
        self.write_id(e.element);
        self.write_rect(e.clip);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`LayoutEvent`].
    Layout(LayoutEvent),
    /// A [`DamageEvent`].
    Damage(DamageEvent),
    /// A [`ResizeEvent`].
    Resize(ResizeEvent),
    /// A [`FlushBeginEvent`].
    FlushBegin(FlushBeginEvent),
    /// A [`FlushEndEvent`].
    FlushEnd(FlushEndEvent),
    /// A [`PaintEvent`].
    Paint(PaintEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        self.read_u8().map(|v| v != 0)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    fn read_id(&mut self) -> Option<ElementId> {
        let index = self.read_u32()?;
        let generation = self.read_u32()?;
        Some(ElementId::from_raw_parts(index, generation))
    }

    fn read_rect(&mut self) -> Option<Rectangle> {
        Some(Rectangle {
            left: self.read_i32()?,
            right: self.read_i32()?,
            top: self.read_i32()?,
            bottom: self.read_i32()?,
        })
    }

    fn read_option_rect(&mut self) -> Option<Option<Rectangle>> {
        let present = self.read_bool()?;
        let rect = self.read_rect()?;
        Some(present.then_some(rect))
    }

    fn decode_layout(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Layout(LayoutEvent {
            element: self.read_id()?,
            bounds: self.read_rect()?,
            clip: self.read_rect()?,
            forced: self.read_bool()?,
        }))
    }

    fn decode_damage(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Damage(DamageEvent {
            element: self.read_id()?,
            window: self.read_id()?,
            requested: self.read_rect()?,
            accepted: self.read_option_rect()?,
            update_region: self.read_option_rect()?,
        }))
    }

    fn decode_resize(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Resize(ResizeEvent {
            window: self.read_id()?,
            width: self.read_u32()?,
            height: self.read_u32()?,
        }))
    }

    fn decode_flush_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FlushBegin(FlushBeginEvent {
            window: self.read_id()?,
            region: self.read_rect()?,
        }))
    }

    fn decode_flush_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FlushEnd(FlushEndEvent {
            window: self.read_id()?,
            region: self.read_rect()?,
            painted: self.read_u32()?,
            pruned: self.read_u32()?,
        }))
    }

    fn decode_paint(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Paint(PaintEvent {
            element: self.read_id()?,
            clip: self.read_rect()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_LAYOUT => self.decode_layout(),
            TAG_DAMAGE => self.decode_damage(),
            TAG_RESIZE => self.decode_resize(),
            TAG_FLUSH_BEGIN => self.decode_flush_begin(),
            TAG_FLUSH_END => self.decode_flush_end(),
            TAG_PAINT => self.decode_paint(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
