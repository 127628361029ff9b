// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item arena and tree builder.
//!
//! An *item* is a node in a layout tree. Each item has:
//!
//! - An identity ([`ItemId`]): a dense index assigned at creation. Item 0 is
//!   the root of the laid-out tree.
//! - Topology: first-child and next-sibling links. Child order is the
//!   stacking order along a flex container's main axis.
//! - **Directives** set by the caller: [`size`](Context::set_size),
//!   [`margins`](Context::set_margins), [`contain`](Context::set_contain)
//!   and [`behave`](Context::set_behave) flags.
//! - A **rectangle** produced by [`run`](Context::run).
//!
//! Items live in struct-of-arrays storage. Handles survive storage growth;
//! nothing else that points into the arena does.
//!
//! Linking is one-shot: an item enters exactly one child list, once, and
//! the root never enters any.

mod id;
mod store;
mod traverse;

pub use id::{INVALID, ItemId};
pub use store::{Context, LayoutState};
pub use traverse::Children;
