// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-down positioning.
//!
//! A container places its direct children on one axis, then each child
//! places its own. Three strategies cover every container:
//!
//! - **stacked**: children consume the main axis in list order, sharing
//!   leftover space or overflow. Wrapping splits them into lines and marks
//!   the first child of each new line.
//! - **overlay**: each child is anchored independently within the full span.
//! - **squeezed overlay**: like overlay, but extents are capped to the span.
//!   Wrapping containers run it once per line, each line getting a band as
//!   tall as its tallest child.
//!
//! Distribution math runs in `f32` and each edge is converted back with
//! [`Scalar::from_f32`].

use crate::flags::{Anchor, Axis, BoxModel, Direction, Justify};
use crate::item::{Context, INVALID};
use crate::scalar::{self, Scalar};
#[cfg(feature = "trace-rich")]
use crate::item::ItemId;
#[cfg(feature = "trace-rich")]
use crate::trace::LineBreakEvent;
use crate::trace::Tracer;

impl<S: Scalar> Context<S> {
    /// Positions every reachable item on axis `dim`, parents before children.
    ///
    /// Returns the number of lines started by wrapping containers.
    pub(crate) fn arrange_all(&mut self, dim: usize, tracer: &mut Tracer<'_>) -> u32 {
        let mut breaks = 0;
        for i in 0..self.order.len() {
            let idx = self.order[i];
            breaks += self.arrange(idx, dim, tracer);
        }
        breaks
    }

    fn arrange(&mut self, idx: u32, dim: usize, tracer: &mut Tracer<'_>) -> u32 {
        let i = idx as usize;
        match self.contain[i].model() {
            BoxModel::Flex {
                direction: Direction::Column,
                wrap: true,
            } => {
                if dim == 0 {
                    return 0;
                }
                let breaks = self.arrange_stacked(idx, 1, true, tracer);
                let offset = self.arrange_wrapped_overlay_squeezed(idx, 0);
                self.rects[i][2] = offset - self.rects[i][0];
                breaks
            }
            BoxModel::Flex {
                direction: Direction::Row,
                wrap: true,
            } => {
                if dim == 0 {
                    self.arrange_stacked(idx, 0, true, tracer)
                } else {
                    self.arrange_wrapped_overlay_squeezed(idx, 1);
                    0
                }
            }
            BoxModel::Flex {
                direction,
                wrap: false,
            } => {
                if direction.main_axis().index() == dim {
                    self.arrange_stacked(idx, dim, false, tracer)
                } else {
                    let rect = self.rects[i];
                    self.arrange_overlay_squeezed_range(
                        dim,
                        self.first_child[i],
                        INVALID,
                        rect[dim],
                        rect[2 + dim],
                    );
                    0
                }
            }
            BoxModel::Layout => {
                self.arrange_overlay(idx, dim);
                0
            }
        }
    }

    /// Lays children out one after another along `dim`, line by line.
    ///
    /// Returns the number of new lines started.
    fn arrange_stacked(
        &mut self,
        idx: u32,
        dim: usize,
        wrap: bool,
        tracer: &mut Tracer<'_>,
    ) -> u32 {
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = tracer;
        }

        let wdim = dim + 2;
        let justify = self.contain[idx as usize].justify();
        let rect = self.rects[idx as usize];
        let space = rect[2 + dim];
        let max_x2 = rect[dim].saturating_add(space).to_f32();

        let mut breaks = 0;
        let mut start_child = self.first_child[idx as usize];
        while start_child != INVALID {
            let mut used = S::ZERO;
            // Fillers, shrinkable children, and children on this line.
            let mut fill_count: u32 = 0;
            let mut squeezed_count: u32 = 0;
            let mut total: u32 = 0;
            let mut hard_break = false;
            let mut end_child = INVALID;

            // Measure one line.
            let mut child = start_child;
            while child != INVALID {
                let c = child as usize;
                let child_rect = self.rects[c];
                let mut extend = used;
                if self.behave[c].anchor(Axis::ALL[dim]) == Anchor::Fill {
                    fill_count += 1;
                    extend = extend
                        .saturating_add(child_rect[dim])
                        .saturating_add(self.margins[c][wdim]);
                } else {
                    if !self.marks[c].fixed[dim] {
                        squeezed_count += 1;
                    }
                    extend = extend
                        .saturating_add(child_rect[dim])
                        .saturating_add(child_rect[2 + dim])
                        .saturating_add(self.margins[c][wdim]);
                }

                let forced = self.breaks_at(child);
                if wrap && total > 0 && (extend > space || forced) {
                    end_child = child;
                    hard_break = forced;
                    self.marks[c].line_break = true;
                    breaks += 1;
                    #[cfg(feature = "trace-rich")]
                    tracer.line_break(&LineBreakEvent {
                        run_index: self.runs,
                        container: ItemId::new(idx),
                        child: ItemId::new(child),
                        axis: Axis::ALL[dim],
                        hard: forced,
                    });
                    break;
                }
                used = extend;
                child = self.next_sibling[c];
                total += 1;
            }

            // Distribute leftover space or overflow.
            let extra_space = space - used;
            let mut filler = 0.0_f32;
            let mut spacer = 0.0_f32;
            let mut extra_margin = 0.0_f32;
            let mut eater = 0.0_f32;

            if extra_space > S::ZERO {
                let extra = extra_space.to_f32();
                if fill_count > 0 {
                    filler = extra / fill_count as f32;
                } else if total > 0 {
                    match justify {
                        Justify::SpaceBetween => {
                            // The last line and lines ended by a forced break
                            // keep start alignment.
                            if !wrap || (end_child != INVALID && !hard_break) {
                                spacer = extra / (total - 1) as f32;
                            }
                        }
                        Justify::Start => {}
                        Justify::End => extra_margin = extra,
                        Justify::Middle => extra_margin = extra / 2.0,
                    }
                }
            } else if !wrap && squeezed_count > 0 {
                eater = extra_space.to_f32() / squeezed_count as f32;
            }

            // Place the line.
            let mut x = rect[dim].to_f32();
            let mut child = start_child;
            while child != end_child {
                let c = child as usize;
                let margins = self.margins[c];
                let mut child_rect = self.rects[c];

                x += child_rect[dim].to_f32() + extra_margin;
                let x1 = if self.behave[c].anchor(Axis::ALL[dim]) == Anchor::Fill {
                    x + filler
                } else if self.marks[c].fixed[dim] {
                    x + child_rect[2 + dim].to_f32()
                } else {
                    x + (child_rect[2 + dim].to_f32() + eater).max(0.0)
                };

                let ix0 = S::from_f32(x);
                let ix1 = if wrap {
                    S::from_f32((max_x2 - margins[wdim].to_f32()).min(x1))
                } else {
                    S::from_f32(x1)
                };
                child_rect[dim] = ix0;
                child_rect[2 + dim] = ix1 - ix0;
                self.rects[c] = child_rect;

                x = x1 + margins[wdim].to_f32();
                child = self.next_sibling[c];
                extra_margin = spacer;
            }

            start_child = end_child;
        }
        breaks
    }

    /// Anchors each child independently within the full span on `dim`.
    fn arrange_overlay(&mut self, idx: u32, dim: usize) {
        let wdim = dim + 2;
        let rect = self.rects[idx as usize];
        let offset = rect[dim];
        let space = rect[2 + dim];

        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            let c = child as usize;
            let margin = self.margins[c][wdim];
            let mut child_rect = self.rects[c];
            let extent = child_rect[2 + dim];
            match self.behave[c].anchor(Axis::ALL[dim]) {
                Anchor::Center => {
                    child_rect[dim] += (space - extent) / S::TWO - margin;
                }
                Anchor::End => {
                    child_rect[dim] += space - extent - margin;
                }
                Anchor::Fill => {
                    child_rect[2 + dim] = scalar::max(S::ZERO, space - child_rect[dim] - margin);
                }
                Anchor::Start => {}
            }
            child_rect[dim] += offset;
            self.rects[c] = child_rect;
            child = self.next_sibling[c];
        }
    }

    /// Anchors the children in `[start, end)` within a band on `dim`,
    /// capping each extent to the band.
    fn arrange_overlay_squeezed_range(
        &mut self,
        dim: usize,
        start: u32,
        end: u32,
        offset: S,
        space: S,
    ) {
        let wdim = dim + 2;
        let mut child = start;
        while child != end {
            let c = child as usize;
            let margin = self.margins[c][wdim];
            let mut child_rect = self.rects[c];
            let min_size = scalar::max(S::ZERO, space - child_rect[dim] - margin);
            match self.behave[c].anchor(Axis::ALL[dim]) {
                Anchor::Center => {
                    let extent = scalar::min(child_rect[2 + dim], min_size);
                    child_rect[2 + dim] = extent;
                    child_rect[dim] += (space - extent) / S::TWO - margin;
                }
                Anchor::End => {
                    let extent = scalar::min(child_rect[2 + dim], min_size);
                    child_rect[2 + dim] = extent;
                    child_rect[dim] = space - extent - margin;
                }
                Anchor::Fill => {
                    child_rect[2 + dim] = min_size;
                }
                Anchor::Start => {
                    child_rect[2 + dim] = scalar::min(child_rect[2 + dim], min_size);
                }
            }
            child_rect[dim] += offset;
            self.rects[c] = child_rect;
            child = self.next_sibling[c];
        }
    }

    /// Gives each line of a wrapping container a band on `dim` and anchors
    /// its children inside it.
    ///
    /// Returns the trailing edge of the last band.
    fn arrange_wrapped_overlay_squeezed(&mut self, idx: u32, dim: usize) -> S {
        let wdim = dim + 2;
        let mut offset = self.rects[idx as usize][dim];
        let mut need = S::ZERO;

        let mut child = self.first_child[idx as usize];
        let mut start_child = child;
        while child != INVALID {
            if self.breaks_at(child) {
                self.arrange_overlay_squeezed_range(dim, start_child, child, offset, need);
                offset = offset.saturating_add(need);
                start_child = child;
                need = S::ZERO;
            }
            let c = child as usize;
            let rect = self.rects[c];
            let child_size = rect[dim]
                .saturating_add(rect[2 + dim])
                .saturating_add(self.margins[c][wdim]);
            need = scalar::max(need, child_size);
            child = self.next_sibling[c];
        }
        self.arrange_overlay_squeezed_range(dim, start_child, INVALID, offset, need);
        offset.saturating_add(need)
    }
}
