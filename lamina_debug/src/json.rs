// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export for pick diagnostics.
//!
//! [`JsonLinesSink`] records each trace event as one JSON object per line
//! (newline-delimited JSON), and [`report_json`] renders a completed
//! [`PickReport`] for log pipelines or test assertions.

use std::io::Write;

use lamina_core::pick::PickReport;
use lamina_core::trace::{
    ApplyEvent, CollectEvent, CoverageEvent, PickBeginEvent, PickSummary, TraceSink,
};
use serde_json::json;

/// Renders a [`PickReport`] as a JSON object.
#[must_use]
pub fn report_json(report: &PickReport) -> serde_json::Value {
    json!({
        "visited": report.visited,
        "qualified": report.qualified,
        "applied": report.applied,
    })
}

/// Writes each trace event as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink").finish_non_exhaustive()
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink writing to the given destination.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn emit(&mut self, value: &serde_json::Value) {
        let _ = serde_json::to_writer(&mut self.writer, value);
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_pick_begin(&mut self, e: &PickBeginEvent) {
        self.emit(&json!({"event": "pick_begin", "roots": e.roots}));
    }

    fn on_collect(&mut self, e: &CollectEvent) {
        self.emit(&json!({"event": "collect", "visible_leaves": e.visible_leaves}));
    }

    fn on_coverage(&mut self, e: &CoverageEvent) {
        self.emit(&json!({
            "event": "coverage",
            "layer": e.layer.index(),
            "count": e.count,
        }));
    }

    fn on_apply(&mut self, e: &ApplyEvent) {
        self.emit(&json!({"event": "apply", "selected": e.selected}));
    }

    fn on_pick_summary(&mut self, s: &PickSummary) {
        self.emit(&json!({
            "event": "pick_summary",
            "visited": s.visited,
            "qualified": s.qualified,
            "applied": s.applied,
        }));
    }
}
