// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run orchestration: the fixed pass sequence over both axes.

use crate::flags::Axis;
use crate::item::{Context, LayoutState};
use crate::scalar::Scalar;
use crate::trace::{PassBeginEvent, PassEndEvent, PassKind, RunBeginEvent, RunSummary, Tracer};

impl<S: Scalar> Context<S> {
    /// Computes the rectangle of every item reachable from the root.
    ///
    /// Equivalent to [`run_traced`](Self::run_traced) without a sink.
    pub fn run(&mut self) -> RunSummary {
        self.run_traced(&mut Tracer::none())
    }

    /// Computes the rectangle of every item reachable from the root,
    /// reporting each pass to `tracer`.
    ///
    /// Break markers computed by the previous run are cleared first; explicit
    /// [`BREAK`](crate::BehaveFlags::BREAK) requests are kept. The passes then
    /// run as size, arrange on the horizontal axis followed by size, arrange
    /// on the vertical axis. The vertical size pass depends on where the
    /// horizontal arrange pass broke lines.
    ///
    /// Running twice without mutating in between produces identical results.
    pub fn run_traced(&mut self, tracer: &mut Tracer<'_>) -> RunSummary {
        let run_index = self.runs;
        tracer.run_begin(&RunBeginEvent {
            run_index,
            item_count: self.len,
        });

        for marks in &mut self.marks {
            marks.line_break = false;
        }

        let mut line_breaks = 0;
        let mut visited = 0;
        if self.len > 0 {
            self.rebuild_order();
            visited = u32::try_from(self.order.len()).unwrap_or(u32::MAX);
            for axis in Axis::ALL {
                let dim = axis.index();

                tracer.pass_begin(&PassBeginEvent {
                    run_index,
                    pass: PassKind::Size,
                    axis,
                });
                self.calc_sizes(dim);
                tracer.pass_end(&PassEndEvent {
                    run_index,
                    pass: PassKind::Size,
                    axis,
                    visited,
                });

                tracer.pass_begin(&PassBeginEvent {
                    run_index,
                    pass: PassKind::Arrange,
                    axis,
                });
                line_breaks += self.arrange_all(dim, tracer);
                tracer.pass_end(&PassEndEvent {
                    run_index,
                    pass: PassKind::Arrange,
                    axis,
                    visited,
                });
            }
            self.state = LayoutState::Laid;
        }

        self.runs += 1;
        let summary = RunSummary {
            run_index,
            item_count: self.len,
            visited,
            line_breaks,
        };
        tracer.run_summary(&summary);
        summary
    }

    /// Number of completed runs since construction.
    #[must_use]
    pub fn run_count(&self) -> u64 {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::flags::{BehaveFlags, ContainFlags};
    use crate::item::{Context, ItemId, LayoutState};
    use crate::scalar::Vec4;

    fn rect(x: i16, y: i16, w: i16, h: i16) -> Vec4<i16> {
        Vec4::new(x, y, w, h)
    }

    fn boxed(ctx: &mut Context<i16>, parent: ItemId, w: i16, h: i16) -> ItemId {
        let id = ctx.create();
        ctx.set_size(id, w, h);
        ctx.insert(parent, id);
        id
    }

    fn grid(ctx: &mut Context<i16>, parent: ItemId, n: usize) -> Vec<ItemId> {
        (0..n).map(|_| boxed(ctx, parent, 10, 10)).collect()
    }

    fn coord(i: usize) -> i16 {
        i16::try_from(i).unwrap()
    }

    #[test]
    fn empty_context_runs() {
        let mut ctx = Context::<i16>::new();
        let summary = ctx.run();
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.visited, 0);
        assert_eq!(ctx.state(), LayoutState::Empty);
        assert_eq!(ctx.run_count(), 1);
    }

    #[test]
    fn simple_fill() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        let child = ctx.create();
        ctx.set_size(root, 30, 40);
        ctx.set_behave(child, BehaveFlags::FILL);
        ctx.insert(root, child);
        ctx.run();

        assert_eq!(ctx.rect(root), rect(0, 0, 30, 40));
        assert_eq!(ctx.rect(child), rect(0, 0, 30, 40));
        assert_eq!(ctx.state(), LayoutState::Laid);
    }

    #[test]
    fn reserve_capacity() {
        let mut ctx = Context::<i16>::new();
        ctx.reserve(512);
        assert!(ctx.capacity() >= 512, "reserve must grow capacity");
        let root = ctx.create();
        let child = ctx.create();
        ctx.set_size(root, 30, 40);
        ctx.set_behave(child, BehaveFlags::FILL);
        ctx.insert(root, child);
        ctx.run();

        assert_eq!(ctx.rect(child), rect(0, 0, 30, 40));
        assert!(ctx.capacity() >= 512, "run must not shrink capacity");
    }

    #[test]
    fn multiple_uninserted() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        let child1 = ctx.create();
        let child2 = ctx.create();
        ctx.set_size(root, 155, 177);
        ctx.set_size(child2, 1, 1);
        ctx.set_margins(child2, 3, 3, 3, 3);
        let summary = ctx.run();

        assert_eq!(ctx.rect(root), rect(0, 0, 155, 177));
        assert_eq!(ctx.rect(child1), Vec4::ZERO);
        assert_eq!(ctx.rect(child2), Vec4::ZERO);
        assert_eq!(summary.visited, 1);
    }

    #[test]
    fn column_even_fill() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 50, 60);
        ctx.set_contain(root, ContainFlags::COLUMN);
        let kids: Vec<_> = (0..3)
            .map(|_| {
                let id = ctx.create();
                ctx.set_behave(id, BehaveFlags::FILL);
                ctx.insert(root, id);
                id
            })
            .collect();
        ctx.run();

        assert_eq!(ctx.rect(root), rect(0, 0, 50, 60));
        assert_eq!(ctx.rect(kids[0]), rect(0, 0, 50, 20));
        assert_eq!(ctx.rect(kids[1]), rect(0, 20, 50, 20));
        assert_eq!(ctx.rect(kids[2]), rect(0, 40, 50, 20));
    }

    #[test]
    fn row_even_fill() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 90, 3);
        ctx.set_contain(root, ContainFlags::ROW);
        let flags = [
            BehaveFlags::HFILL | BehaveFlags::TOP,
            BehaveFlags::HFILL | BehaveFlags::VCENTER,
            BehaveFlags::HFILL | BehaveFlags::BOTTOM,
        ];
        let kids: Vec<_> = flags
            .iter()
            .map(|&f| {
                let id = boxed(&mut ctx, root, 0, 1);
                ctx.set_behave(id, f);
                id
            })
            .collect();
        ctx.run();

        assert_eq!(ctx.rect(root), rect(0, 0, 90, 3));
        assert_eq!(ctx.rect(kids[0]), rect(0, 0, 30, 1));
        assert_eq!(ctx.rect(kids[1]), rect(30, 1, 30, 1));
        assert_eq!(ctx.rect(kids[2]), rect(60, 2, 30, 1));
    }

    #[test]
    fn fixed_and_fill() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_contain(root, ContainFlags::COLUMN);
        ctx.set_size(root, 50, 60);
        let fixed_a = boxed(&mut ctx, root, 50, 15);
        let filler = ctx.create();
        ctx.set_behave(filler, BehaveFlags::FILL);
        ctx.insert(root, filler);
        let fixed_b = boxed(&mut ctx, root, 50, 15);
        ctx.run();

        assert_eq!(ctx.rect(root), rect(0, 0, 50, 60));
        assert_eq!(ctx.rect(fixed_a), rect(0, 0, 50, 15));
        assert_eq!(ctx.rect(filler), rect(0, 15, 50, 30));
        assert_eq!(ctx.rect(fixed_b), rect(0, 45, 50, 15));
    }

    #[test]
    fn simple_margins() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_contain(root, ContainFlags::COLUMN);
        ctx.set_size(root, 100, 90);

        let a = boxed(&mut ctx, root, 0, 30 - (5 + 10));
        ctx.set_behave(a, BehaveFlags::HFILL);
        ctx.set_margins(a, 3, 5, 7, 10);
        let b = ctx.create();
        ctx.set_behave(b, BehaveFlags::FILL);
        ctx.insert(root, b);
        let c = boxed(&mut ctx, root, 0, 30);
        ctx.set_behave(c, BehaveFlags::HFILL);
        ctx.run();

        assert_eq!(ctx.rect(a), rect(3, 5, 90, 5 + 10));
        assert_eq!(ctx.rect(b), rect(0, 30, 100, 30));
        assert_eq!(ctx.rect(c), rect(0, 60, 100, 30));
    }

    #[test]
    fn nested_boxes_are_stable_across_runs() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        let main = ctx.create();
        ctx.set_size(root, 70, 4 * 10 + 2 * 10);
        ctx.set_margins(main, 10, 10, 10, 10);
        ctx.set_contain(main, ContainFlags::COLUMN);
        ctx.insert(root, main);
        ctx.set_behave(main, BehaveFlags::FILL);

        let new_row = |ctx: &mut Context<i16>, behave| {
            let row = ctx.create();
            ctx.set_contain(row, ContainFlags::ROW);
            ctx.set_behave(row, behave);
            row
        };

        // Auto-filling columns.
        let row0 = new_row(&mut ctx, BehaveFlags::FILL);
        let cols1: Vec<_> = (0..5)
            .map(|_| {
                let col = ctx.create();
                ctx.set_behave(col, BehaveFlags::FILL);
                ctx.insert(row0, col);
                col
            })
            .collect();

        // Fixed width, filling vertically.
        let row1 = new_row(&mut ctx, BehaveFlags::VFILL);
        let cols2: Vec<_> = (0..5)
            .map(|_| {
                let col = boxed(&mut ctx, row1, 10, 0);
                ctx.set_behave(col, BehaveFlags::VFILL);
                col
            })
            .collect();

        // Columns sized by an inner item; only the second has height.
        let row2 = new_row(&mut ctx, BehaveFlags::empty());
        let cols3: Vec<_> = (0..2)
            .map(|i| {
                let col = ctx.create();
                let sizer = ctx.create();
                ctx.set_size(sizer, 25, 10 * i);
                ctx.set_behave(col, BehaveFlags::BOTTOM);
                ctx.insert(col, sizer);
                ctx.insert(row2, col);
                col
            })
            .collect();

        // Collapses to zero height.
        let row3 = new_row(&mut ctx, BehaveFlags::HFILL);
        let cols4: Vec<_> = (0..99)
            .map(|_| {
                let col = ctx.create();
                ctx.insert(row3, col);
                col
            })
            .collect();

        // Fifty one-unit-wide columns.
        let row4 = new_row(&mut ctx, BehaveFlags::FILL);
        let cols5: Vec<_> = (0..50)
            .map(|_| {
                let col = ctx.create();
                ctx.set_behave(col, BehaveFlags::FILL);
                ctx.insert(row4, col);
                col
            })
            .collect();

        for row in [row0, row1, row2, row3, row4] {
            ctx.insert(main, row);
        }

        for _ in 0..5 {
            ctx.run();

            assert_eq!(ctx.rect(main), rect(10, 10, 50, 40));
            assert_eq!(ctx.rect(row0), rect(10, 10, 50, 10));
            assert_eq!(ctx.rect(row1), rect(10, 20, 50, 10));
            assert_eq!(ctx.rect(row2), rect(10, 30, 50, 10));
            assert_eq!(ctx.rect(row3), rect(10, 40, 50, 0));
            assert_eq!(ctx.rect(row4), rect(10, 40, 50, 10));

            for (i, &col) in cols1.iter().enumerate() {
                assert_eq!(ctx.rect(col), rect(10 + 10 * coord(i), 10, 10, 10));
            }
            for (i, &col) in cols2.iter().enumerate() {
                assert_eq!(ctx.rect(col), rect(10 + 10 * coord(i), 20, 10, 10));
            }
            assert_eq!(ctx.rect(cols3[0]), rect(10, 40, 25, 0));
            assert_eq!(ctx.rect(cols3[1]), rect(35, 30, 25, 10));
            for &col in &cols4 {
                assert_eq!(ctx.rect(col), rect(25 + 10, 40, 0, 0));
            }
            for (i, &col) in cols5.iter().enumerate() {
                assert_eq!(ctx.rect(col), rect(10 + coord(i), 40, 1, 10));
            }
        }
    }

    #[test]
    fn deep_nest() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        let mut parent = root;
        for _ in 0..500 {
            let item = ctx.create();
            ctx.insert(parent, item);
            parent = item;
        }
        ctx.set_size(parent, 77, 99);
        ctx.run();

        assert_eq!(ctx.rect(root), rect(0, 0, 77, 99));
    }

    #[test]
    fn very_deep_nest_does_not_recurse() {
        let mut ctx = Context::<i32>::new();
        let root = ctx.create();
        let mut parent = root;
        for _ in 0..200_000 {
            let item = ctx.create();
            ctx.insert(parent, item);
            parent = item;
        }
        ctx.set_size(parent, 3, 4);
        let summary = ctx.run();

        assert_eq!(ctx.rect(root), Vec4::new(0, 0, 3, 4));
        assert_eq!(ctx.rect(parent), Vec4::new(0, 0, 3, 4));
        assert_eq!(summary.visited, 200_001);
    }

    #[test]
    fn many_children() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 1, 0);
        ctx.set_contain(root, ContainFlags::COLUMN);
        let mut prev = boxed(&mut ctx, root, 1, 1);
        for _ in 0..20_000 - 1 {
            let item = ctx.create();
            ctx.set_size(item, 1, 1);
            ctx.append(prev, item);
            prev = item;
        }
        ctx.run();

        assert_eq!(ctx.rect(root), rect(0, 0, 1, 20_000));
        assert_eq!(ctx.rect(prev), rect(0, 19_999, 1, 1));
    }

    #[test]
    fn child_align_anchors() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 50, 50);
        let cases = [
            (BehaveFlags::TOP | BehaveFlags::LEFT, rect(0, 0, 10, 10)),
            (BehaveFlags::TOP | BehaveFlags::RIGHT, rect(40, 0, 10, 10)),
            (BehaveFlags::TOP | BehaveFlags::HCENTER, rect(20, 0, 10, 10)),
            (BehaveFlags::VCENTER | BehaveFlags::LEFT, rect(0, 20, 10, 10)),
            (BehaveFlags::VCENTER | BehaveFlags::RIGHT, rect(40, 20, 10, 10)),
            (BehaveFlags::VCENTER | BehaveFlags::HCENTER, rect(20, 20, 10, 10)),
            (BehaveFlags::BOTTOM | BehaveFlags::LEFT, rect(0, 40, 10, 10)),
            (BehaveFlags::BOTTOM | BehaveFlags::RIGHT, rect(40, 40, 10, 10)),
            (BehaveFlags::BOTTOM | BehaveFlags::HCENTER, rect(20, 40, 10, 10)),
        ];
        let ids: Vec<_> = cases
            .iter()
            .map(|&(flags, _)| {
                let id = boxed(&mut ctx, root, 10, 10);
                ctx.set_behave(id, flags);
                id
            })
            .collect();
        ctx.run();

        for (&id, &(flags, expected)) in ids.iter().zip(&cases) {
            assert_eq!(ctx.rect(id), expected, "anchors {flags:?}");
        }
    }

    #[test]
    fn child_align_fills() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 50, 50);
        let cases = [
            (BehaveFlags::TOP | BehaveFlags::HFILL, rect(0, 0, 50, 10)),
            (BehaveFlags::VCENTER | BehaveFlags::HFILL, rect(0, 20, 50, 10)),
            (BehaveFlags::BOTTOM | BehaveFlags::HFILL, rect(0, 40, 50, 10)),
            (BehaveFlags::VFILL | BehaveFlags::LEFT, rect(0, 0, 10, 50)),
            (BehaveFlags::VFILL | BehaveFlags::RIGHT, rect(40, 0, 10, 50)),
            (BehaveFlags::VFILL | BehaveFlags::HCENTER, rect(20, 0, 10, 50)),
        ];
        let ids: Vec<_> = cases
            .iter()
            .map(|&(flags, _)| {
                let id = boxed(&mut ctx, root, 10, 10);
                ctx.set_behave(id, flags);
                id
            })
            .collect();
        ctx.run();

        for (&id, &(flags, expected)) in ids.iter().zip(&cases) {
            assert_eq!(ctx.rect(id), expected, "anchors {flags:?}");
        }
    }

    #[test]
    fn wrap_row_exact_grid() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 50, 50);
        ctx.set_contain(root, ContainFlags::ROW | ContainFlags::WRAP);
        let items = grid(&mut ctx, root, 25);
        let summary = ctx.run();

        for (i, &id) in items.iter().enumerate() {
            let (x, y) = (coord(i % 5), coord(i / 5));
            assert_eq!(ctx.rect(id), rect(10 * x, 10 * y, 10, 10));
            assert_eq!(ctx.is_break(id), i > 0 && i % 5 == 0);
        }
        assert_eq!(summary.line_breaks, 4);
    }

    #[test]
    fn wrap_row_start() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 57, 57);
        ctx.set_contain(root, ContainFlags::ROW | ContainFlags::WRAP | ContainFlags::START);
        let items = grid(&mut ctx, root, 25);
        ctx.run();

        for (i, &id) in items.iter().enumerate() {
            let (x, y) = (coord(i % 5), coord(i / 5));
            assert_eq!(ctx.rect(id), rect(10 * x, 10 * y, 10, 10));
        }
    }

    #[test]
    fn wrap_row_end() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 57, 57);
        ctx.set_contain(root, ContainFlags::ROW | ContainFlags::WRAP | ContainFlags::END);
        let items = grid(&mut ctx, root, 25);
        ctx.run();

        for (i, &id) in items.iter().enumerate() {
            let (x, y) = (coord(i % 5), coord(i / 5));
            assert_eq!(ctx.rect(id), rect(7 + 10 * x, 10 * y, 10, 10));
        }
    }

    #[test]
    fn wrap_row_middle() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 58, 57);
        ctx.set_contain(root, ContainFlags::ROW | ContainFlags::WRAP | ContainFlags::MIDDLE);
        boxed(&mut ctx, root, 58, 7);
        let items = grid(&mut ctx, root, 25);
        ctx.run();

        for (i, &id) in items.iter().enumerate() {
            let (x, y) = (coord(i % 5), coord(i / 5));
            assert_eq!(ctx.rect(id), rect(4 + 10 * x, 7 + 10 * y, 10, 10));
        }
    }

    #[test]
    fn wrap_row_justify_packs_last_line_at_start() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 54, 50);
        ctx.set_contain(root, ContainFlags::ROW | ContainFlags::WRAP | ContainFlags::JUSTIFY);
        let items = grid(&mut ctx, root, 25);
        ctx.run();

        for (i, &id) in items.iter().enumerate() {
            let (x, y) = (coord(i % 5), coord(i / 5));
            let step = if i < 20 { 11 } else { 10 };
            assert_eq!(ctx.rect(id), rect(step * x, 10 * y, 10, 10));
        }
    }

    #[test]
    fn wrap_row_justify_skips_lines_before_forced_break() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 54, 50);
        ctx.set_contain(root, ContainFlags::ROW | ContainFlags::WRAP | ContainFlags::JUSTIFY);
        let items = grid(&mut ctx, root, 10);
        ctx.set_behave(items[3], BehaveFlags::BREAK);
        ctx.run();

        // [0..3) ends at a forced break, [3..8) at an automatic one, [8..10)
        // is the last line.
        assert_eq!(ctx.rect(items[1]).x(), 10);
        assert_eq!(ctx.rect(items[4]), rect(11, 10, 10, 10));
        assert_eq!(ctx.rect(items[9]), rect(10, 20, 10, 10));
    }

    #[test]
    fn wrap_column_exact_grid() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 50, 50);
        ctx.set_contain(root, ContainFlags::COLUMN | ContainFlags::WRAP);
        let items = grid(&mut ctx, root, 25);
        ctx.run();

        for (i, &id) in items.iter().enumerate() {
            let (x, y) = (coord(i / 5), coord(i % 5));
            assert_eq!(ctx.rect(id), rect(10 * x, 10 * y, 10, 10));
        }
        assert_eq!(ctx.rect(root), rect(0, 0, 50, 50));
    }

    #[test]
    fn wrap_column_start() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 57, 57);
        ctx.set_contain(root, ContainFlags::COLUMN | ContainFlags::WRAP | ContainFlags::START);
        let items = grid(&mut ctx, root, 25);
        ctx.run();

        for (i, &id) in items.iter().enumerate() {
            let (x, y) = (coord(i / 5), coord(i % 5));
            assert_eq!(ctx.rect(id), rect(10 * x, 10 * y, 10, 10));
        }
    }

    #[test]
    fn wrap_column_end() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 57, 57);
        ctx.set_contain(root, ContainFlags::COLUMN | ContainFlags::WRAP | ContainFlags::END);
        let items = grid(&mut ctx, root, 25);
        ctx.run();

        for (i, &id) in items.iter().enumerate() {
            let (x, y) = (coord(i / 5), coord(i % 5));
            assert_eq!(ctx.rect(id), rect(10 * x, 7 + 10 * y, 10, 10));
        }
    }

    #[test]
    fn wrap_column_middle() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 57, 58);
        ctx.set_contain(root, ContainFlags::COLUMN | ContainFlags::WRAP | ContainFlags::MIDDLE);
        boxed(&mut ctx, root, 7, 58);
        let items = grid(&mut ctx, root, 25);
        ctx.run();

        for (i, &id) in items.iter().enumerate() {
            let (x, y) = (coord(i / 5), coord(i % 5));
            assert_eq!(ctx.rect(id), rect(7 + 10 * x, 4 + 10 * y, 10, 10));
        }
    }

    #[test]
    fn break_markers_are_recomputed_each_run() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 20, 0);
        ctx.set_contain(root, ContainFlags::ROW | ContainFlags::WRAP | ContainFlags::START);
        let items = grid(&mut ctx, root, 4);
        ctx.run();
        assert!(ctx.is_break(items[2]), "third item wraps in a 20-wide row");
        assert_eq!(ctx.rect(root).height(), 20);

        ctx.set_size(root, 40, 0);
        assert_eq!(ctx.state(), LayoutState::Built);
        let summary = ctx.run();
        assert!(!ctx.is_break(items[2]), "stale marker must not survive");
        assert_eq!(summary.line_breaks, 0);
        assert_eq!(ctx.rect(root).height(), 10);
        assert_eq!(ctx.rect(items[3]), rect(30, 0, 10, 10));
    }

    #[test]
    fn explicit_breaks_survive_runs() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 100, 0);
        ctx.set_contain(root, ContainFlags::ROW | ContainFlags::WRAP | ContainFlags::START);
        let items = grid(&mut ctx, root, 3);
        ctx.set_behave(items[1], BehaveFlags::BREAK);

        for _ in 0..3 {
            ctx.run();
            assert_eq!(ctx.rect(items[1]), rect(0, 10, 10, 10));
            assert_eq!(ctx.rect(items[2]), rect(10, 10, 10, 10));
        }
        assert!(ctx.behave(items[1]).is_break());
    }

    #[test]
    fn reset_then_rebuild() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 10, 10);
        ctx.run();
        let capacity = ctx.capacity();

        ctx.reset();
        assert_eq!(ctx.count(), 0);
        assert_eq!(ctx.capacity(), capacity);

        let root = ctx.create();
        let child = ctx.create();
        ctx.set_size(root, 30, 40);
        ctx.set_behave(child, BehaveFlags::FILL);
        ctx.insert(root, child);
        ctx.run();
        assert_eq!(ctx.rect(child), rect(0, 0, 30, 40));
        assert_eq!(ctx.capacity(), capacity);
    }

    #[test]
    fn root_margins_offset_root() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 30, 40);
        ctx.set_margins(root, 2, 3, 0, 0);
        let child = ctx.create();
        ctx.set_behave(child, BehaveFlags::FILL);
        ctx.insert(root, child);
        ctx.run();

        assert_eq!(ctx.rect(root), rect(2, 3, 30, 40));
        assert_eq!(ctx.rect(child), rect(2, 3, 30, 40));
    }

    #[test]
    fn float_row_splits_fractionally() {
        let mut ctx = Context::<f32>::new();
        let root = ctx.create();
        ctx.set_size(root, 10.0, 3.0);
        ctx.set_contain(root, ContainFlags::ROW);
        let kids: Vec<_> = (0..4)
            .map(|_| {
                let id = ctx.create();
                ctx.set_behave(id, BehaveFlags::FILL);
                ctx.insert(root, id);
                id
            })
            .collect();
        ctx.run();

        assert_eq!(ctx.rect(kids[1]), Vec4::new(2.5, 0.0, 2.5, 3.0));
        assert_eq!(ctx.rect(kids[3]), Vec4::new(7.5, 0.0, 2.5, 3.0));
    }

    #[test]
    fn float_center_is_exact() {
        let mut ctx = Context::<f32>::new();
        let root = ctx.create();
        ctx.set_size(root, 11.0, 11.0);
        let child = ctx.create();
        ctx.set_size(child, 2.0, 2.0);
        ctx.insert(root, child);
        ctx.run();

        assert_eq!(ctx.rect(child), Vec4::new(4.5, 4.5, 2.0, 2.0));
        assert_eq!(ctx.kurbo_rect(child), kurbo::Rect::new(4.5, 4.5, 6.5, 6.5));
    }

    #[test]
    fn oversized_integer_row_clamps_instead_of_overflowing() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_contain(root, ContainFlags::ROW);
        let kids: Vec<_> = (0..4).map(|_| boxed(&mut ctx, root, 10_000, 1)).collect();
        ctx.run();

        assert_eq!(ctx.rect(root), rect(0, 0, i16::MAX, 1));
        assert_eq!(ctx.rect(kids[2]), rect(20_000, 0, 10_000, 1));
        assert_eq!(ctx.rect(kids[3]).x(), 30_000);
    }

    #[test]
    fn oversized_integer_wrap_bands_clamp() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 10, 0);
        ctx.set_contain(root, ContainFlags::ROW | ContainFlags::WRAP | ContainFlags::START);
        let kids: Vec<_> = (0..4).map(|_| boxed(&mut ctx, root, 10, 10_000)).collect();
        let summary = ctx.run();

        assert_eq!(summary.line_breaks, 3);
        assert_eq!(ctx.rect(root).height(), i16::MAX);
        assert_eq!(ctx.rect(kids[2]).y(), 20_000);
    }

    #[test]
    fn integer_center_truncates() {
        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 11, 11);
        let child = boxed(&mut ctx, root, 2, 2);
        ctx.run();

        assert_eq!(ctx.rect(child), rect(4, 4, 2, 2));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn run_reports_passes_in_order() {
        use crate::flags::Axis;
        use crate::trace::{PassBeginEvent, PassKind, RunSummary, TraceSink, Tracer};

        #[derive(Default)]
        struct Passes {
            begun: Vec<(PassKind, Axis)>,
            summary: Option<RunSummary>,
        }
        impl TraceSink for Passes {
            fn on_pass_begin(&mut self, e: &PassBeginEvent) {
                self.begun.push((e.pass, e.axis));
            }
            fn on_run_summary(&mut self, s: &RunSummary) {
                self.summary = Some(*s);
            }
        }

        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 10, 10);
        let mut sink = Passes::default();
        let returned = ctx.run_traced(&mut Tracer::new(&mut sink));

        assert_eq!(
            sink.begun,
            [
                (PassKind::Size, Axis::Horizontal),
                (PassKind::Arrange, Axis::Horizontal),
                (PassKind::Size, Axis::Vertical),
                (PassKind::Arrange, Axis::Vertical),
            ]
        );
        assert_eq!(sink.summary, Some(returned));
    }

    #[cfg(feature = "trace-rich")]
    #[test]
    fn run_reports_line_breaks() {
        use crate::trace::{LineBreakEvent, TraceSink, Tracer};

        #[derive(Default)]
        struct Breaks(Vec<LineBreakEvent>);
        impl TraceSink for Breaks {
            fn on_line_break(&mut self, e: &LineBreakEvent) {
                self.0.push(*e);
            }
        }

        let mut ctx = Context::<i16>::new();
        let root = ctx.create();
        ctx.set_size(root, 20, 20);
        ctx.set_contain(root, ContainFlags::ROW | ContainFlags::WRAP);
        let items = grid(&mut ctx, root, 3);
        let mut sink = Breaks::default();
        ctx.run_traced(&mut Tracer::new(&mut sink));

        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].container, root);
        assert_eq!(sink.0[0].child, items[2]);
        assert!(!sink.0[0].hard);
    }
}
