// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Recordings carry no clock, so each event's timestamp is its ordinal in
//! the recording, in microseconds. Flushes appear as duration slices with the
//! layout, damage and paint events of the frame nested inside.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use lamina_core::rect::Rectangle;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for (ts, recorded) in decode(bytes).enumerate() {
        match recorded {
            RecordedEvent::Layout(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Layout",
                    "cat": "Layout",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "element": e.element.index(),
                        "bounds": rect(e.bounds),
                        "clip": rect(e.clip),
                        "forced": e.forced,
                    }
                }));
            }
            RecordedEvent::Damage(e) => {
                let name = if e.accepted.is_some() {
                    "Damage"
                } else {
                    "DamageRejected"
                };
                events.push(json!({
                    "ph": "i",
                    "name": name,
                    "cat": "Damage",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "element": e.element.index(),
                        "window": e.window.index(),
                        "requested": rect(e.requested),
                        "accepted": e.accepted.map(rect),
                        "update_region": e.update_region.map(rect),
                    }
                }));
            }
            RecordedEvent::Resize(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Resize",
                    "cat": "Window",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "window": e.window.index(),
                        "width": e.width,
                        "height": e.height,
                    }
                }));
            }
            RecordedEvent::FlushBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Flush",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "window": e.window.index(),
                        "region": rect(e.region),
                    }
                }));
            }
            RecordedEvent::FlushEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Flush",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "painted": e.painted,
                        "pruned": e.pruned,
                    }
                }));
            }
            RecordedEvent::Paint(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Paint",
                    "cat": "Rich",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "element": e.element.index(),
                        "clip": rect(e.clip),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

/// `[left, right, top, bottom]`, or `null` for an invalid rectangle.
fn rect(r: Rectangle) -> Value {
    if r.is_valid() {
        json!([r.left, r.right, r.top, r.bottom])
    } else {
        Value::Null
    }
}
