// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, recording, and JSON snapshots for flexlay diagnostics.
//!
//! This crate provides [`TraceSink`](flexlay_core::trace::TraceSink)
//! implementations and tree dumps for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`snapshot::snapshot`]: the laid-out item tree as JSON.

pub mod pretty;
pub mod recorder;
pub mod snapshot;
