// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays item storage with creation, linking, and directive access.

use alloc::vec::Vec;

use crate::config::ContextConfig;
use crate::flags::{BehaveFlags, ContainFlags, ITEM_HFIXED, ITEM_INSERTED, ITEM_VFIXED, USER_MASK};
use crate::scalar::{DefaultScalar, Scalar, Vec2, Vec4};

use super::id::{INVALID, ItemId};
use super::traverse::Children;

/// Per-item markers maintained by the context itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Marks {
    /// Linked into some child list.
    pub(crate) inserted: bool,
    /// Explicit nonzero size on each axis.
    pub(crate) fixed: [bool; 2],
    /// A wrapping parent started a new line here during the last run.
    pub(crate) line_break: bool,
}

/// Where a context is in its build/run cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutState {
    /// No items.
    Empty,
    /// Items exist but rectangles are stale.
    Built,
    /// Rectangles reflect the current tree.
    Laid,
}

/// An arena of layout items plus their computed rectangles.
///
/// Items are addressed by [`ItemId`]. Item 0 is the root of the tree that
/// [`run`](Self::run) lays out; a run leaves the rectangles of items not
/// reachable from it untouched.
///
/// Contract violations (bad ids, relinking, out-of-range flags) panic. Use
/// the `try_*` methods when ids or flags come from untrusted input.
#[derive(Debug)]
pub struct Context<S: Scalar = DefaultScalar> {
    // -- Topology --
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,

    // -- Directives (set by callers) --
    pub(crate) contain: Vec<ContainFlags>,
    pub(crate) behave: Vec<BehaveFlags>,
    pub(crate) user_flags: Vec<u32>,
    pub(crate) margins: Vec<Vec4<S>>,
    pub(crate) size: Vec<Vec2<S>>,
    pub(crate) marks: Vec<Marks>,

    // -- Computed (written by run) --
    pub(crate) rects: Vec<Vec4<S>>,

    // -- Allocation --
    pub(crate) len: u32,
    capacity: u32,
    config: ContextConfig,

    // -- Run state --
    pub(crate) state: LayoutState,
    pub(crate) runs: u64,
    pub(crate) order: Vec<u32>,
    pub(crate) stack: Vec<u32>,
}

impl<S: Scalar> Default for Context<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar> Context<S> {
    /// Creates an empty context with the default storage policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ContextConfig::new())
    }

    /// Creates an empty context with the given storage policy.
    #[must_use]
    pub fn with_config(config: ContextConfig) -> Self {
        let mut ctx = Self {
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            contain: Vec::new(),
            behave: Vec::new(),
            user_flags: Vec::new(),
            margins: Vec::new(),
            size: Vec::new(),
            marks: Vec::new(),
            rects: Vec::new(),
            len: 0,
            capacity: 0,
            config,
            state: LayoutState::Empty,
            runs: 0,
            order: Vec::new(),
            stack: Vec::new(),
        };
        ctx.reserve(config.initial_capacity);
        ctx
    }

    /// Returns the storage policy.
    #[must_use]
    pub fn config(&self) -> ContextConfig {
        self.config
    }

    /// Returns the current build/run state.
    #[must_use]
    pub fn state(&self) -> LayoutState {
        self.state
    }

    // -- Allocation API --

    /// Number of items created since construction or the last reset.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.len
    }

    /// Number of items that fit without reallocating.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Ensures room for at least `count` items. Never shrinks.
    pub fn reserve(&mut self, count: u32) {
        if count > self.capacity {
            self.set_capacity(count);
        }
    }

    /// Forgets every item while keeping the allocated storage.
    pub fn reset(&mut self) {
        self.first_child.clear();
        self.next_sibling.clear();
        self.contain.clear();
        self.behave.clear();
        self.user_flags.clear();
        self.margins.clear();
        self.size.clear();
        self.marks.clear();
        self.rects.clear();
        self.order.clear();
        self.stack.clear();
        self.len = 0;
        self.state = LayoutState::Empty;
    }

    /// Forgets every item and releases the storage.
    ///
    /// The context stays usable and behaves like a new one with the same
    /// configuration, except that `initial_capacity` is not re-reserved.
    pub fn destroy(&mut self) {
        self.first_child = Vec::new();
        self.next_sibling = Vec::new();
        self.contain = Vec::new();
        self.behave = Vec::new();
        self.user_flags = Vec::new();
        self.margins = Vec::new();
        self.size = Vec::new();
        self.marks = Vec::new();
        self.rects = Vec::new();
        self.order = Vec::new();
        self.stack = Vec::new();
        self.len = 0;
        self.capacity = 0;
        self.state = LayoutState::Empty;
    }

    /// Creates a new item and returns its handle.
    ///
    /// The item starts unlinked with no flags, zero margins, automatic size,
    /// and a zero rectangle.
    ///
    /// # Panics
    ///
    /// Panics if the id space is exhausted.
    pub fn create(&mut self) -> ItemId {
        let idx = self.len;
        assert!(idx < INVALID, "item id space exhausted");
        if idx >= self.capacity {
            self.set_capacity(self.config.next_capacity(self.capacity));
        }
        self.first_child.push(INVALID);
        self.next_sibling.push(INVALID);
        self.contain.push(ContainFlags::empty());
        self.behave.push(BehaveFlags::empty());
        self.user_flags.push(0);
        self.margins.push(Vec4::ZERO);
        self.size.push(Vec2::ZERO);
        self.marks.push(Marks::default());
        self.rects.push(Vec4::ZERO);
        self.len += 1;
        self.state = LayoutState::Built;
        ItemId(idx)
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// Walks `parent`'s existing children to find the tail.
    ///
    /// # Panics
    ///
    /// Panics if either id is invalid, if `child` is the root, if
    /// `parent == child`, or if `child` is already inserted.
    pub fn insert(&mut self, parent: ItemId, child: ItemId) {
        self.validate_link(parent, child);
        let p = parent.0 as usize;
        if self.first_child[p] == INVALID {
            self.first_child[p] = child.0;
            self.marks[child.0 as usize].inserted = true;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.splice_after(last, child.0);
        }
        self.state = LayoutState::Built;
    }

    /// Links `later` directly after `earlier` in whatever list `earlier`
    /// belongs to. Constant time.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`insert`](Self::insert), with
    /// `earlier` in place of the parent.
    pub fn append(&mut self, earlier: ItemId, later: ItemId) {
        self.validate_link(earlier, later);
        self.splice_after(earlier.0, later.0);
        self.state = LayoutState::Built;
    }

    /// Adds `child` as the first child of `parent`. Constant time.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`insert`](Self::insert).
    pub fn push(&mut self, parent: ItemId, child: ItemId) {
        self.validate_link(parent, child);
        let p = parent.0 as usize;
        let c = child.0 as usize;
        self.next_sibling[c] = self.first_child[p];
        self.marks[c].inserted = true;
        self.first_child[p] = child.0;
        self.state = LayoutState::Built;
    }

    /// Returns the first child of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn first_child(&self, id: ItemId) -> Option<ItemId> {
        self.validate(id);
        ItemId::from_link(self.first_child[id.0 as usize])
    }

    /// Returns the sibling following `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn next_sibling(&self, id: ItemId) -> Option<ItemId> {
        self.validate(id);
        ItemId::from_link(self.next_sibling[id.0 as usize])
    }

    /// Returns the last child of `id`, walking the child list.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn last_child(&self, id: ItemId) -> Option<ItemId> {
        self.children(id).last()
    }

    /// Returns an iterator over the children of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn children(&self, id: ItemId) -> Children<'_> {
        self.validate(id);
        Children::new(&self.next_sibling, self.first_child[id.0 as usize])
    }

    /// Whether `id` has been linked into a child list.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn is_inserted(&self, id: ItemId) -> bool {
        self.validate(id);
        self.marks[id.0 as usize].inserted
    }

    // -- Directive API --

    /// Returns the explicit size of `id`. Zero components are automatic.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn size(&self, id: ItemId) -> Vec2<S> {
        self.validate(id);
        self.size[id.0 as usize]
    }

    /// Sets the explicit size of `id`. Zero on an axis means automatic.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    pub fn set_size(&mut self, id: ItemId, width: S, height: S) {
        self.set_size_vec(id, Vec2::new(width, height));
    }

    /// Sets the explicit size of `id` from a vector.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    pub fn set_size_vec(&mut self, id: ItemId, size: Vec2<S>) {
        self.validate(id);
        let idx = id.0 as usize;
        self.size[idx] = size;
        self.marks[idx].fixed = [size[0] != S::ZERO, size[1] != S::ZERO];
        self.state = LayoutState::Built;
    }

    /// Returns the margins of `id` as `[left, top, right, bottom]`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn margins(&self, id: ItemId) -> Vec4<S> {
        self.validate(id);
        self.margins[id.0 as usize]
    }

    /// Sets the margins of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    pub fn set_margins(&mut self, id: ItemId, left: S, top: S, right: S, bottom: S) {
        self.set_margins_vec(id, Vec4::new(left, top, right, bottom));
    }

    /// Sets the margins of `id` from a `[left, top, right, bottom]` vector.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    pub fn set_margins_vec(&mut self, id: ItemId, margins: Vec4<S>) {
        self.validate(id);
        self.margins[id.0 as usize] = margins;
        self.state = LayoutState::Built;
    }

    /// Returns the container flags of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn contain(&self, id: ItemId) -> ContainFlags {
        self.validate(id);
        self.contain[id.0 as usize]
    }

    /// Replaces the container flags of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid or `flags` carries bits outside the
    /// container range.
    pub fn set_contain(&mut self, id: ItemId, flags: ContainFlags) {
        self.validate(id);
        assert!(
            flags.bits() & !ContainFlags::all().bits() == 0,
            "container flags {:#x} outside mask {:#x}",
            flags.bits(),
            ContainFlags::all().bits()
        );
        self.contain[id.0 as usize] = flags;
        self.state = LayoutState::Built;
    }

    /// Returns the child flags of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn behave(&self, id: ItemId) -> BehaveFlags {
        self.validate(id);
        self.behave[id.0 as usize]
    }

    /// Replaces the child flags of `id`, including its explicit break bit.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid or `flags` carries bits outside the
    /// child range.
    pub fn set_behave(&mut self, id: ItemId, flags: BehaveFlags) {
        self.validate(id);
        assert!(
            flags.bits() & !BehaveFlags::all().bits() == 0,
            "child flags {:#x} outside mask {:#x}",
            flags.bits(),
            BehaveFlags::all().bits()
        );
        self.behave[id.0 as usize] = flags;
        self.state = LayoutState::Built;
    }

    /// Returns the application bits of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn user_flags(&self, id: ItemId) -> u32 {
        self.validate(id);
        self.user_flags[id.0 as usize]
    }

    /// Replaces the application bits of `id`. Layout ignores them.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid or `flags` has bits outside [`USER_MASK`].
    pub fn set_user_flags(&mut self, id: ItemId, flags: u32) {
        self.validate(id);
        assert!(
            flags & !USER_MASK == 0,
            "user flags {flags:#x} outside mask {USER_MASK:#x}"
        );
        self.user_flags[id.0 as usize] = flags;
    }

    /// Returns the packed flag word of `id` in the classic encoding.
    ///
    /// The break bit reports either an explicit break or one computed by
    /// the last run.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn flags(&self, id: ItemId) -> u32 {
        self.validate(id);
        let idx = id.0 as usize;
        let marks = self.marks[idx];
        let mut packed = self.contain[idx].bits() | self.behave[idx].bits() | self.user_flags[idx];
        if marks.line_break {
            packed |= BehaveFlags::BREAK.bits();
        }
        if marks.inserted {
            packed |= ITEM_INSERTED;
        }
        if marks.fixed[0] {
            packed |= ITEM_HFIXED;
        }
        if marks.fixed[1] {
            packed |= ITEM_VFIXED;
        }
        packed
    }

    /// Whether a new line starts at `id`, by request or by the last run.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn is_break(&self, id: ItemId) -> bool {
        self.validate(id);
        self.breaks_at(id.0)
    }

    // -- Results --

    /// Returns the computed rectangle `[x, y, width, height]` of `id`.
    ///
    /// Reflects the last run; mutations since then are not applied.
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn rect(&self, id: ItemId) -> Vec4<S> {
        self.validate(id);
        self.rects[id.0 as usize]
    }

    /// Returns the computed rectangle of `id` as a [`kurbo::Rect`].
    ///
    /// # Panics
    ///
    /// Panics if `id` is invalid.
    #[must_use]
    pub fn kurbo_rect(&self, id: ItemId) -> kurbo::Rect {
        self.rect(id).to_rect()
    }

    // -- Internal helpers --

    /// Whether the item at raw index `idx` starts a new line.
    #[inline]
    pub(crate) fn breaks_at(&self, idx: u32) -> bool {
        self.behave[idx as usize].is_break() || self.marks[idx as usize].line_break
    }

    /// Panics if `id` is not a live item.
    pub(crate) fn validate(&self, id: ItemId) {
        assert!(
            id.0 != INVALID && id.0 < self.len,
            "invalid ItemId: {id:?} (count {})",
            self.len
        );
    }

    /// Panics unless `anchor`/`item` may be linked.
    fn validate_link(&self, anchor: ItemId, item: ItemId) {
        self.validate(anchor);
        self.validate(item);
        assert!(item != ItemId::ROOT, "cannot insert the root item");
        assert!(anchor != item, "cannot link {item:?} to itself");
        assert!(
            !self.marks[item.0 as usize].inserted,
            "{item:?} is already inserted"
        );
    }

    /// Links `item` after `earlier` and marks it inserted.
    fn splice_after(&mut self, earlier: u32, item: u32) {
        self.next_sibling[item as usize] = self.next_sibling[earlier as usize];
        self.marks[item as usize].inserted = true;
        self.next_sibling[earlier as usize] = item;
    }

    fn set_capacity(&mut self, capacity: u32) {
        self.capacity = capacity;
        let additional = (capacity as usize).saturating_sub(self.first_child.len());
        self.first_child.reserve_exact(additional);
        self.next_sibling.reserve_exact(additional);
        self.contain.reserve_exact(additional);
        self.behave.reserve_exact(additional);
        self.user_flags.reserve_exact(additional);
        self.margins.reserve_exact(additional);
        self.size.reserve_exact(additional);
        self.marks.reserve_exact(additional);
        self.rects.reserve_exact(additional);
    }
}
