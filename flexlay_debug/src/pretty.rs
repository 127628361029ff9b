// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use flexlay_core::Axis;
use flexlay_core::trace::{
    LineBreakEvent, PassBeginEvent, PassEndEvent, PassKind, RunBeginEvent, RunSummary, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn pass_name(pass: PassKind) -> &'static str {
    match pass {
        PassKind::Size => "size",
        PassKind::Arrange => "arrange",
    }
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Horizontal => "x",
        Axis::Vertical => "y",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_run_begin(&mut self, e: &RunBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[run:begin] run={} items={}",
            e.run_index, e.item_count,
        );
    }

    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:begin] run={} {} {}",
            e.run_index,
            pass_name(e.pass),
            axis_name(e.axis),
        );
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        let _ = writeln!(
            self.writer,
            "[pass:end] run={} {} {} visited={}",
            e.run_index,
            pass_name(e.pass),
            axis_name(e.axis),
            e.visited,
        );
    }

    fn on_run_summary(&mut self, s: &RunSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] run={} items={} visited={} breaks={}",
            s.run_index, s.item_count, s.visited, s.line_breaks,
        );
    }

    fn on_line_break(&mut self, e: &LineBreakEvent) {
        let kind = if e.hard { "forced" } else { "wrap" };
        let _ = writeln!(
            self.writer,
            "[break] run={} container={} child={} {} {kind}",
            e.run_index,
            e.container.index(),
            e.child.index(),
            axis_name(e.axis),
        );
    }
}
