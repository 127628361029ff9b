// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layout runs.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`Context::run_traced`](crate::Context::run_traced) calls at each stage of
//! a run. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Every run returns a [`RunSummary`] whether or not tracing is enabled.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`LineBreakEvent`] and the
//!   corresponding `TraceSink` method.

use crate::flags::Axis;
#[cfg(feature = "trace-rich")]
use crate::item::ItemId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which pass of a run is executing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// Bottom-up size calculation.
    Size,
    /// Top-down positioning.
    Arrange,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted before a run touches any item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunBeginEvent {
    /// Monotonic run counter for the context.
    pub run_index: u64,
    /// Items in the context, reachable or not.
    pub item_count: u32,
}

/// Marks the beginning of one pass over one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassBeginEvent {
    /// Run counter.
    pub run_index: u64,
    /// Which pass is starting.
    pub pass: PassKind,
    /// Axis being evaluated.
    pub axis: Axis,
}

/// Marks the end of one pass over one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassEndEvent {
    /// Run counter.
    pub run_index: u64,
    /// Which pass is ending.
    pub pass: PassKind,
    /// Axis that was evaluated.
    pub axis: Axis,
    /// Items the pass visited.
    pub visited: u32,
}

/// Emitted when a wrapping container starts a new line.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineBreakEvent {
    /// Run counter.
    pub run_index: u64,
    /// The wrapping container.
    pub container: ItemId,
    /// First child of the new line.
    pub child: ItemId,
    /// Main axis of the container.
    pub axis: Axis,
    /// Whether the child requested the break explicitly.
    pub hard: bool,
}

/// Per-run statistics returned by [`Context::run`](crate::Context::run).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Run counter.
    pub run_index: u64,
    /// Items in the context.
    pub item_count: u32,
    /// Items reachable from the root.
    pub visited: u32,
    /// Lines started by wrapping containers, including forced breaks.
    pub line_breaks: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from layout runs.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a run starts.
    fn on_run_begin(&mut self, e: &RunBeginEvent) {
        _ = e;
    }

    /// Called at the beginning of a pass.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called at the end of a pass.
    fn on_pass_end(&mut self, e: &PassEndEvent) {
        _ = e;
    }

    /// Called with the summary after a run completes.
    fn on_run_summary(&mut self, s: &RunSummary) {
        _ = s;
    }

    /// Called for every new line in a wrapping container (requires
    /// `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_line_break(&mut self, e: &LineBreakEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`RunBeginEvent`].
    #[inline]
    pub fn run_begin(&mut self, e: &RunBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_run_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassEndEvent`].
    #[inline]
    pub fn pass_end(&mut self, e: &PassEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RunSummary`].
    #[inline]
    pub fn run_summary(&mut self, s: &RunSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_run_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`LineBreakEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn line_break(&mut self, e: &LineBreakEvent) {
        if let Some(s) = &mut self.sink {
            s.on_line_break(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pass() -> PassBeginEvent {
        PassBeginEvent {
            run_index: 3,
            pass: PassKind::Arrange,
            axis: Axis::Vertical,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_run_begin(&RunBeginEvent {
            run_index: 0,
            item_count: 1,
        });
        sink.on_pass_begin(&sample_pass());
        sink.on_run_summary(&RunSummary::default());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.pass_begin(&sample_pass());
        tracer.run_summary(&RunSummary::default());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            passes: Vec<(PassKind, Axis)>,
        }
        impl TraceSink for RecordingSink {
            fn on_pass_begin(&mut self, e: &PassBeginEvent) {
                self.passes.push((e.pass, e.axis));
            }
        }

        let mut sink = RecordingSink { passes: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.pass_begin(&sample_pass());
        drop(tracer);
        assert_eq!(sink.passes, &[(PassKind::Arrange, Axis::Vertical)]);
    }
}
