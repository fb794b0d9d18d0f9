// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON export for lamina pick diagnostics.
//!
//! This crate provides [`TraceSink`](lamina_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`json::JsonLinesSink`] — one JSON object per event, for machine
//!   consumption.
//! - [`json::report_json`] — renders a completed
//!   [`PickReport`](lamina_core::pick::PickReport) as a JSON value.

pub mod json;
pub mod pretty;
