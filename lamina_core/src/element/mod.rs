// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element tree data model.
//!
//! An *element* is a rectangular node in a window's UI tree. Each element has:
//!
//! - An identity ([`ElementId`]): a generational handle that becomes stale
//!   when the element is destroyed.
//! - Topology: a parent (none for a window root) and an ordered list of
//!   children. Child order is creation order and is also paint order.
//! - Geometry: `bounds` in window coordinates and a derived `clip`, both
//!   written only by [`move_element`](ElementTree::move_element). The clip is
//!   always `parent.clip ∩ bounds`, so it never escapes any ancestor.
//! - Behaviour: a class handler fixed at creation, a replaceable user
//!   handler, opaque flags and a typed payload.
//!
//! A window root additionally owns a pixel buffer and the pending update
//! region. Elements never move between windows.
//!
//! # Frame lifecycle
//!
//! 1. [`resize_window`](ElementTree::resize_window) or an explicit
//!    `move_element` starts a layout cascade; each `LAYOUT` handler places its
//!    children.
//! 2. [`repaint`](ElementTree::repaint) accumulates damage into the window's
//!    update region.
//! 3. [`flush`](ElementTree::flush) sends `PAINT` to every element that
//!    intersects the damage and presents the result.

mod dispatch;
mod id;
mod layout;
mod paint;
mod store;
mod traverse;
mod window;

pub use id::{ElementId, INVALID};
pub use store::ElementTree;
pub use traverse::Children;
pub use window::{WindowConfig, window_class_handler};
