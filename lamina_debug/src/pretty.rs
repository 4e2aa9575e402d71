// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Rectangles
//! print as `[left,right)x[top,bottom)`; invalid ones print as `invalid`.

use std::fmt;
use std::io::Write;

use lamina_core::element::ElementId;
use lamina_core::rect::Rectangle;
use lamina_core::trace::{
    DamageEvent, FlushBeginEvent, FlushEndEvent, LayoutEvent, PaintEvent, ResizeEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Short display form of an element handle.
struct Id(ElementId);

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.index())?;
        if self.0.generation() != 0 {
            write!(f, "/{}", self.0.generation())?;
        }
        Ok(())
    }
}

struct Rect(Rectangle);

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        if r.is_valid() {
            write!(f, "[{},{})x[{},{})", r.left, r.right, r.top, r.bottom)
        } else {
            f.write_str("invalid")
        }
    }
}

struct MaybeRect(Option<Rectangle>);

impl fmt::Display for MaybeRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(r) => Rect(r).fmt(f),
            None => f.write_str("none"),
        }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_layout(&mut self, e: &LayoutEvent) {
        let forced = if e.forced { " forced" } else { "" };
        let _ = writeln!(
            self.writer,
            "[layout] {} bounds={} clip={}{forced}",
            Id(e.element),
            Rect(e.bounds),
            Rect(e.clip),
        );
    }

    fn on_damage(&mut self, e: &DamageEvent) {
        let _ = writeln!(
            self.writer,
            "[damage] {} window={} requested={} accepted={} region={}",
            Id(e.element),
            Id(e.window),
            Rect(e.requested),
            MaybeRect(e.accepted),
            MaybeRect(e.update_region),
        );
    }

    fn on_resize(&mut self, e: &ResizeEvent) {
        let _ = writeln!(
            self.writer,
            "[resize] window={} {}x{}",
            Id(e.window),
            e.width,
            e.height,
        );
    }

    fn on_flush_begin(&mut self, e: &FlushBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[flush:begin] window={} region={}",
            Id(e.window),
            Rect(e.region),
        );
    }

    fn on_flush_end(&mut self, e: &FlushEndEvent) {
        let _ = writeln!(
            self.writer,
            "[flush:end] window={} region={} painted={} pruned={}",
            Id(e.window),
            Rect(e.region),
            e.painted,
            e.pruned,
        );
    }

    fn on_paint(&mut self, e: &PaintEvent) {
        let _ = writeln!(
            self.writer,
            "[paint] {} clip={}",
            Id(e.element),
            Rect(e.clip),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(f: impl FnOnce(&mut PrettyPrintSink<Vec<u8>>)) -> String {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        f(&mut sink);
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn pretty_print_layout() {
        let out = output(|sink| {
            sink.on_layout(&LayoutEvent {
                element: ElementId::from_raw_parts(2, 0),
                bounds: Rectangle::new(20, 280, 20, 180),
                clip: Rectangle::new(20, 280, 20, 180),
                forced: true,
            });
        });
        assert_eq!(
            out,
            "[layout] #2 bounds=[20,280)x[20,180) clip=[20,280)x[20,180) forced\n"
        );
    }

    #[test]
    fn pretty_print_rejected_damage() {
        let out = output(|sink| {
            sink.on_damage(&DamageEvent {
                element: ElementId::from_raw_parts(4, 1),
                window: ElementId::from_raw_parts(0, 0),
                requested: Rectangle::new(0, 10, 0, 10),
                accepted: None,
                update_region: None,
            });
        });
        assert!(out.starts_with("[damage] #4/1 window=#0"), "got: {out}");
        assert!(out.contains("accepted=none region=none"), "got: {out}");
    }

    #[test]
    fn pretty_print_invalid_clip() {
        let out = output(|sink| {
            sink.on_paint(&PaintEvent {
                element: ElementId::from_raw_parts(1, 0),
                clip: Rectangle::INVALID,
            });
        });
        assert_eq!(out, "[paint] #1 clip=invalid\n");
    }
}
