// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-tier message dispatch.
//!
//! Each element carries an optional *user* handler and an optional *class*
//! handler. The user handler gets first refusal: a non-zero return ends
//! dispatch with that value. A zero return (or no user handler) falls through
//! to the class handler, whose return value is final. With neither handler
//! the result is 0, "unhandled".
//!
//! This replaces overriding through a class hierarchy: any element can have
//! its default behaviour replaced per message without a new element kind.

use super::id::ElementId;
use super::store::ElementTree;
use crate::message::{Arg, Message};

impl<P> ElementTree<P> {
    /// Sends `message` to `id` and returns the handler's result.
    ///
    /// Dispatch has no side effects of its own; geometry and damage change
    /// only through what the invoked handlers do.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn dispatch(&mut self, id: ElementId, message: Message, di: i32, mut arg: Arg<'_>) -> i32 {
        self.validate(id);

        if let Some(user) = self.user_handler[id.idx as usize].clone() {
            let result = user(self, id, message, di, arg.reborrow());
            if result != 0 {
                return result;
            }
            // The user handler may have destroyed its own element.
            if !self.is_alive(id) {
                return 0;
            }
        }

        match self.class_handler[id.idx as usize].clone() {
            Some(class) => class(self, id, message, di, arg),
            None => 0,
        }
    }
}
