// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the pick operation.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the pick pipeline calls at each stage. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates the per-layer [`CoverageEvent`]
//!   and the corresponding `TraceSink` method.

use crate::layer::LayerId;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a pick operation starts, before any scopes are opened.
#[derive(Clone, Copy, Debug)]
pub struct PickBeginEvent {
    /// Number of top-level layers the collector will walk.
    pub roots: usize,
}

/// Emitted after the collector has flattened the tree.
#[derive(Clone, Copy, Debug)]
pub struct CollectEvent {
    /// Number of visible leaf layers found.
    pub visible_leaves: usize,
}

/// Emitted for each coverage query (requires the `trace-rich` feature).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct CoverageEvent {
    /// The layer that was queried.
    pub layer: LayerId,
    /// Qualifying-pixel count the host returned.
    pub count: u64,
}

/// Emitted when the selected-layer set is replaced on the host.
#[derive(Clone, Copy, Debug)]
pub struct ApplyEvent {
    /// Number of layers in the new selected set.
    pub selected: usize,
}

/// Emitted once at the end of a successful pick.
#[derive(Clone, Copy, Debug)]
pub struct PickSummary {
    /// Visible leaf layers the filter examined.
    pub visited: usize,
    /// Layers with non-zero coverage.
    pub qualified: usize,
    /// Whether the selected set was replaced (false when nothing qualified).
    pub applied: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the pick pipeline.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a pick operation starts.
    fn on_pick_begin(&mut self, e: &PickBeginEvent) {
        _ = e;
    }

    /// Called after visible-leaf collection.
    fn on_collect(&mut self, e: &CollectEvent) {
        _ = e;
    }

    /// Called per coverage query (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_coverage(&mut self, e: &CoverageEvent) {
        _ = e;
    }

    /// Called when the selected-layer set is replaced.
    fn on_apply(&mut self, e: &ApplyEvent) {
        _ = e;
    }

    /// Called with the end-of-pick summary.
    fn on_pick_summary(&mut self, s: &PickSummary) {
        _ = s;
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
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
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

    /// Emits a [`PickBeginEvent`].
    #[inline]
    pub fn pick_begin(&mut self, e: &PickBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pick_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CollectEvent`].
    #[inline]
    pub fn collect(&mut self, e: &CollectEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_collect(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a per-layer [`CoverageEvent`] (a no-op unless the `trace-rich`
    /// feature is enabled).
    #[inline]
    pub fn coverage(&mut self, layer: LayerId, count: u64) {
        #[cfg(feature = "trace-rich")]
        if let Some(s) = &mut self.sink {
            s.on_coverage(&CoverageEvent { layer, count });
        }
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = (layer, count);
        }
    }

    /// Emits an [`ApplyEvent`].
    #[inline]
    pub fn apply(&mut self, e: &ApplyEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_apply(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PickSummary`].
    #[inline]
    pub fn pick_summary(&mut self, s: &PickSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_pick_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}
