// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout passes.
//!
//! A run evaluates the horizontal axis completely before the vertical one:
//!
//! ```text
//!   size(x) ──► arrange(x) ──► size(y) ──► arrange(y)
//! ```
//!
//! The size pass walks the traversal order backwards so children are sized
//! before their parents. The arrange pass walks it forwards so parents are
//! positioned before their children. Line breaks found while arranging the
//! horizontal axis feed the vertical size pass.

mod arrange;
mod run;
mod size;
