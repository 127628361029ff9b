// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flexbox-like layout for trees of rectangular items.
//!
//! `flexlay_core` computes a rectangle for every item in a tree from a small
//! set of per-item inputs: an optional fixed size, outer margins, container
//! flags describing how children are distributed, and child flags describing
//! how an item anchors or fills inside its parent. It is `no_std` compatible
//! (with `alloc`) and keeps items in struct-of-arrays storage addressed by
//! index handles.
//!
//! # Architecture
//!
//! ```text
//!   Context::create() ──► ItemId
//!        │
//!        ▼
//!   insert / append / push ──► set_size / set_margins / set_contain / set_behave
//!        │
//!        ▼
//!   Context::run() ──► size(x) ► arrange(x) ► size(y) ► arrange(y) ──► RunSummary
//!        │
//!        ▼
//!   Context::rect(id) ──► Vec4 [x, y, width, height]
//! ```
//!
//! **[`item`]**: The [`Context`] arena, [`ItemId`] handles, tree building,
//! and child iteration. Items are never freed individually; [`Context::reset`]
//! discards them all while keeping capacity.
//!
//! **[`flags`]**: Typed container and child flags. [`ContainFlags`] selects
//! free layout or a flex row/column with optional wrapping and main-axis
//! justification. [`BehaveFlags`] anchors a child to edges, fills along an
//! axis, or forces a line break.
//!
//! **[`scalar`]**: The [`Scalar`] coordinate trait and the [`Vec2`] and
//! [`Vec4`] vectors, with conversions to `kurbo` geometry.
//!
//! **[`error`]**: [`LayoutError`] and the checked `try_*` entry points.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! run instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Example
//!
//! ```
//! use flexlay_core::{BehaveFlags, ContainFlags, Context, Vec4};
//!
//! let mut ctx = Context::<i16>::new();
//! let root = ctx.create();
//! ctx.set_size(root, 90, 30);
//! ctx.set_contain(root, ContainFlags::ROW);
//!
//! let sidebar = ctx.create();
//! ctx.set_size(sidebar, 20, 0);
//! ctx.set_behave(sidebar, BehaveFlags::VFILL);
//! ctx.insert(root, sidebar);
//!
//! let body = ctx.create();
//! ctx.set_behave(body, BehaveFlags::FILL);
//! ctx.insert(root, body);
//!
//! ctx.run();
//! assert_eq!(ctx.rect(sidebar), Vec4::new(0, 0, 20, 30));
//! assert_eq!(ctx.rect(body), Vec4::new(20, 0, 70, 30));
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `float` (disabled by default): Makes [`DefaultScalar`] `f32` instead of
//!   `i16`. Any [`Scalar`] can still be chosen explicitly.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-line
//!   break events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod error;
pub mod flags;
pub mod item;
mod layout;
pub mod scalar;
pub mod trace;

pub use config::ContextConfig;
pub use error::LayoutError;
pub use flags::{Anchor, Axis, BehaveFlags, BoxModel, ContainFlags, Direction, Justify};
pub use item::{Children, Context, INVALID, ItemId, LayoutState};
pub use scalar::{DefaultScalar, Scalar, Vec2, Vec4};
pub use trace::RunSummary;
