// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records, each led by a one-byte tag.
//! [`decode`] reads them back as an iterator of [`RecordedEvent`].

use flexlay_core::trace::{
    LineBreakEvent, PassBeginEvent, PassEndEvent, PassKind, RunBeginEvent, RunSummary, TraceSink,
};
use flexlay_core::{Axis, ItemId};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_RUN_BEGIN: u8 = 1;
const TAG_PASS_BEGIN: u8 = 2;
const TAG_PASS_END: u8 = 3;
const TAG_RUN_SUMMARY: u8 = 4;
const TAG_LINE_BREAK: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_pass(&mut self, p: PassKind) {
        self.write_u8(match p {
            PassKind::Size => 0,
            PassKind::Arrange => 1,
        });
    }

    fn write_axis(&mut self, a: Axis) {
        self.write_u8(match a {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_run_begin(&mut self, e: &RunBeginEvent) {
        self.write_u8(TAG_RUN_BEGIN);
        self.write_u64(e.run_index);
        self.write_u32(e.item_count);
    }

    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.write_u8(TAG_PASS_BEGIN);
        self.write_u64(e.run_index);
        self.write_pass(e.pass);
        self.write_axis(e.axis);
    }

    fn on_pass_end(&mut self, e: &PassEndEvent) {
        self.write_u8(TAG_PASS_END);
        self.write_u64(e.run_index);
        self.write_pass(e.pass);
        self.write_axis(e.axis);
        self.write_u32(e.visited);
    }

    fn on_run_summary(&mut self, s: &RunSummary) {
        self.write_u8(TAG_RUN_SUMMARY);
        self.write_u64(s.run_index);
        self.write_u32(s.item_count);
        self.write_u32(s.visited);
        self.write_u32(s.line_breaks);
    }

    fn on_line_break(&mut self, e: &LineBreakEvent) {
        self.write_u8(TAG_LINE_BREAK);
        self.write_u64(e.run_index);
        self.write_u32(e.container.index());
        self.write_u32(e.child.index());
        self.write_axis(e.axis);
        self.write_u8(u8::from(e.hard));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`RunBeginEvent`].
    RunBegin(RunBeginEvent),
    /// A [`PassBeginEvent`].
    PassBegin(PassBeginEvent),
    /// A [`PassEndEvent`].
    PassEnd(PassEndEvent),
    /// A [`RunSummary`].
    RunSummary(RunSummary),
    /// A [`LineBreakEvent`].
    LineBreak(LineBreakEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_pass(&mut self) -> Option<PassKind> {
        Some(match self.read_u8()? {
            0 => PassKind::Size,
            _ => PassKind::Arrange,
        })
    }

    fn read_axis(&mut self) -> Option<Axis> {
        Some(match self.read_u8()? {
            0 => Axis::Horizontal,
            _ => Axis::Vertical,
        })
    }

    fn decode_run_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RunBegin(RunBeginEvent {
            run_index: self.read_u64()?,
            item_count: self.read_u32()?,
        }))
    }

    fn decode_pass_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassBegin(PassBeginEvent {
            run_index: self.read_u64()?,
            pass: self.read_pass()?,
            axis: self.read_axis()?,
        }))
    }

    fn decode_pass_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassEnd(PassEndEvent {
            run_index: self.read_u64()?,
            pass: self.read_pass()?,
            axis: self.read_axis()?,
            visited: self.read_u32()?,
        }))
    }

    fn decode_run_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RunSummary(RunSummary {
            run_index: self.read_u64()?,
            item_count: self.read_u32()?,
            visited: self.read_u32()?,
            line_breaks: self.read_u32()?,
        }))
    }

    fn decode_line_break(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LineBreak(LineBreakEvent {
            run_index: self.read_u64()?,
            container: ItemId::new(self.read_u32()?),
            child: ItemId::new(self.read_u32()?),
            axis: self.read_axis()?,
            hard: self.read_u8()? != 0,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_RUN_BEGIN => self.decode_run_begin(),
            TAG_PASS_BEGIN => self.decode_pass_begin(),
            TAG_PASS_END => self.decode_pass_end(),
            TAG_RUN_SUMMARY => self.decode_run_summary(),
            TAG_LINE_BREAK => self.decode_line_break(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
