// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Message identifiers, arguments and handler types.
//!
//! Every behaviour of an element is routed through
//! [`ElementTree::dispatch`](crate::element::ElementTree::dispatch) as a
//! [`Message`] plus two arguments: a plain integer (`di`) and an [`Arg`]
//! carrying borrowed data such as the [`Painter`] for [`Message::PAINT`].
//!
//! Handlers return an `i32`. Zero means "unhandled"; any other value means
//! "handled" and, for a user handler, stops the class handler from running.

use alloc::rc::Rc;
use core::fmt;

use crate::element::{ElementId, ElementTree};
use crate::painter::Painter;

/// A message identifier.
///
/// Identifiers below [`Message::USER`] are reserved for the framework. The
/// core never interprets user messages beyond comparing them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Message(pub u32);

impl Message {
    /// Draw the element. Carries [`Arg::Painter`].
    pub const PAINT: Self = Self(1);
    /// Geometry changed; position direct children. Carries [`Arg::None`].
    pub const LAYOUT: Self = Self(2);
    /// First identifier available to applications.
    pub const USER: Self = Self(0x1000);

    /// Returns the application message `USER + offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` exceeds `u32::MAX - USER`.
    #[inline]
    #[must_use]
    pub const fn user(offset: u32) -> Self {
        match Self::USER.0.checked_add(offset) {
            Some(id) => Self(id),
            None => panic!("user message offset out of range"),
        }
    }

    /// Returns whether this is an application-defined message.
    #[inline]
    #[must_use]
    pub const fn is_user(self) -> bool {
        self.0 >= Self::USER.0
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::PAINT => f.write_str("Message::PAINT"),
            Self::LAYOUT => f.write_str("Message::LAYOUT"),
            m if m.is_user() => write!(f, "Message::user({})", m.0 - Self::USER.0),
            Self(raw) => write!(f, "Message({raw})"),
        }
    }
}

/// Borrowed data passed alongside a message.
#[derive(Debug)]
pub enum Arg<'a> {
    /// No data.
    None,
    /// The painter for the current flush.
    Painter(&'a mut Painter),
}

impl Arg<'_> {
    /// Reborrows the argument for a shorter call.
    #[must_use]
    pub fn reborrow(&mut self) -> Arg<'_> {
        match self {
            Self::None => Arg::None,
            Self::Painter(painter) => Arg::Painter(&mut **painter),
        }
    }

    /// Returns the painter, if this argument carries one.
    #[must_use]
    pub fn painter(&mut self) -> Option<&mut Painter> {
        match self {
            Self::None => None,
            Self::Painter(painter) => Some(&mut **painter),
        }
    }
}

/// A message handler: `(tree, element, message, di, arg) -> result`.
///
/// Handlers are reference counted so that dispatch can hold a handler while
/// the handler itself mutates the tree.
pub type Handler<P> = Rc<dyn Fn(&mut ElementTree<P>, ElementId, Message, i32, Arg<'_>) -> i32>;

/// Wraps a function or closure as a [`Handler`].
pub fn handler<P, F>(f: F) -> Handler<P>
where
    F: Fn(&mut ElementTree<P>, ElementId, Message, i32, Arg<'_>) -> i32 + 'static,
{
    Rc::new(f)
}
