// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom-up size calculation.
//!
//! For one axis, each reachable item gets its leading margin as a provisional
//! position and an extent that is either its explicit size or derived from
//! its children. The arrange pass later adds parent offsets and may resize.

use crate::flags::{BoxModel, Direction};
use crate::item::{Context, INVALID};
use crate::scalar::{self, Scalar};

impl<S: Scalar> Context<S> {
    /// Sizes every reachable item on axis `dim`, children before parents.
    ///
    /// Requires a fresh [`rebuild_order`](Self::rebuild_order). Walking the
    /// pre-order list backwards visits every subtree before its root.
    pub(crate) fn calc_sizes(&mut self, dim: usize) {
        for i in (0..self.order.len()).rev() {
            let idx = self.order[i];
            self.calc_size(idx, dim);
        }
    }

    fn calc_size(&mut self, idx: u32, dim: usize) {
        let i = idx as usize;
        self.rects[i][dim] = self.margins[i][dim];

        let explicit = self.size[i][dim];
        if explicit != S::ZERO {
            self.rects[i][2 + dim] = explicit;
            return;
        }

        let extent = match self.contain[i].model() {
            BoxModel::Flex {
                direction: Direction::Column,
                wrap: true,
            } => {
                if dim == 1 {
                    self.stacked_extent(idx, 1)
                } else {
                    self.overlaid_extent(idx, 0)
                }
            }
            BoxModel::Flex {
                direction: Direction::Row,
                wrap: true,
            } => {
                if dim == 0 {
                    self.wrapped_stacked_extent(idx, 0)
                } else {
                    self.wrapped_overlaid_extent(idx, 1)
                }
            }
            BoxModel::Flex {
                direction,
                wrap: false,
            } if direction.main_axis().index() == dim => self.stacked_extent(idx, dim),
            _ => self.overlaid_extent(idx, dim),
        };
        self.rects[i][2 + dim] = extent;
    }

    /// Space a sized child claims on `dim`: leading margin, extent and
    /// trailing margin.
    ///
    /// Sums in this pass saturate, so oversized integer trees clamp to the
    /// scalar range.
    #[inline]
    fn claimed(&self, child: u32, dim: usize) -> S {
        let rect = self.rects[child as usize];
        rect[dim]
            .saturating_add(rect[2 + dim])
            .saturating_add(self.margins[child as usize][2 + dim])
    }

    /// Largest claim among the children.
    fn overlaid_extent(&self, idx: u32, dim: usize) -> S {
        let mut need = S::ZERO;
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            need = scalar::max(need, self.claimed(child, dim));
            child = self.next_sibling[child as usize];
        }
        need
    }

    /// Sum of the children's claims.
    fn stacked_extent(&self, idx: u32, dim: usize) -> S {
        let mut need = S::ZERO;
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            need = need.saturating_add(self.claimed(child, dim));
            child = self.next_sibling[child as usize];
        }
        need
    }

    /// Longest line, lines being split at break markers.
    fn wrapped_stacked_extent(&self, idx: u32, dim: usize) -> S {
        let mut line = S::ZERO;
        let mut longest = S::ZERO;
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            if self.breaks_at(child) {
                longest = scalar::max(line, longest);
                line = S::ZERO;
            }
            line = line.saturating_add(self.claimed(child, dim));
            child = self.next_sibling[child as usize];
        }
        scalar::max(longest, line)
    }

    /// Sum over lines of each line's largest claim.
    fn wrapped_overlaid_extent(&self, idx: u32, dim: usize) -> S {
        let mut line = S::ZERO;
        let mut total = S::ZERO;
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            if self.breaks_at(child) {
                total = total.saturating_add(line);
                line = S::ZERO;
            }
            line = scalar::max(line, self.claimed(child, dim));
            child = self.next_sibling[child as usize];
        }
        total.saturating_add(line)
    }
}
