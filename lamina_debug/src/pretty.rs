// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use lamina_core::trace::{
    ApplyEvent, CollectEvent, CoverageEvent, PickBeginEvent, PickSummary, TraceSink,
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
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pick_begin(&mut self, e: &PickBeginEvent) {
        let _ = writeln!(self.writer, "[pick] roots={}", e.roots);
    }

    fn on_collect(&mut self, e: &CollectEvent) {
        let _ = writeln!(self.writer, "[collect] visible_leaves={}", e.visible_leaves);
    }

    fn on_coverage(&mut self, e: &CoverageEvent) {
        let _ = writeln!(
            self.writer,
            "[coverage] layer={:?} count={}",
            e.layer, e.count
        );
    }

    fn on_apply(&mut self, e: &ApplyEvent) {
        let _ = writeln!(self.writer, "[apply] selected={}", e.selected);
    }

    fn on_pick_summary(&mut self, s: &PickSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] visited={} qualified={} applied={}",
            s.visited, s.qualified, s.applied
        );
    }
}
