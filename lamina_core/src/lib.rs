// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core element tree, message dispatch and damage-driven painting.
//!
//! `lamina_core` is a minimal retained-mode UI core. A window owns a tree of
//! rectangular elements; elements react to messages through handler
//! functions; geometry changes cascade through `LAYOUT` messages; and painting
//! happens lazily, only where damage was requested. It is `no_std`
//! compatible (with `alloc`) and stores elements in struct-of-arrays layout
//! with generational handles.
//!
//! # Architecture
//!
//! ```text
//!   Platform (event pump)
//!       │ resize
//!       ▼
//!   ElementTree::resize_window ──► move_element ──► LAYOUT handlers
//!                                                       │
//!                                                       ▼
//!                                         repaint ──► update region
//!                                                       │
//!       ┌───────────────────────────────────────────────┘
//!       ▼
//!   ElementTree::flush ──► PAINT handlers ──► Presenter::present()
//! ```
//!
//! **[`element`]**: Struct-of-arrays element tree with generational handles,
//! two-tier dispatch, layout and the paint walk.
//!
//! **[`rect`]**: Half-open integer [`Rectangle`](rect::Rectangle) with
//! intersection and bounding union.
//!
//! **[`message`]**: Message identifiers, the handler type and the borrowed
//! argument passed with a message.
//!
//! **[`painter`]**: Clipped drawing context handed to `PAINT` handlers.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait that platform
//! layers implement to show flushed pixels.
//!
//! **[`registry`]**: Native handle to window root lookup for event routing.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! layout, damage and flush instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-element
//!   paint events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod element;
pub mod message;
pub mod painter;
pub mod rect;
pub mod registry;
pub mod trace;
