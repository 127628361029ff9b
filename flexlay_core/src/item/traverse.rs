// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, ItemId};
use super::store::Context;
use crate::scalar::Scalar;

/// An iterator over the direct children of an item, in list order.
///
/// Created by [`Context::children`].
#[derive(Debug)]
pub struct Children<'a> {
    next_sibling: &'a [u32],
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(next_sibling: &'a [u32], first: u32) -> Self {
        Self {
            next_sibling,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ItemId;

    fn next(&mut self) -> Option<ItemId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.next_sibling[idx as usize];
        Some(ItemId(idx))
    }
}

impl<S: Scalar> Context<S> {
    /// Rebuilds the pre-order list of items reachable from the root.
    ///
    /// Uses an explicit stack, so depth is bounded only by memory. Children
    /// appear after their parent and in list order.
    pub(crate) fn rebuild_order(&mut self) {
        let mut order = core::mem::take(&mut self.order);
        let mut stack = core::mem::take(&mut self.stack);
        order.clear();
        stack.clear();

        if !self.first_child.is_empty() {
            stack.push(ItemId::ROOT.0);
        }
        while let Some(idx) = stack.pop() {
            order.push(idx);
            let mark = stack.len();
            let mut child = self.first_child[idx as usize];
            while child != INVALID {
                stack.push(child);
                child = self.next_sibling[child as usize];
            }
            stack[mark..].reverse();
        }

        self.order = order;
        self.stack = stack;
    }

    /// Items reachable from the root, in pre-order.
    ///
    /// Valid after [`run`](Self::run); empty before the first run.
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.order
    }
}
