// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-engine contract for editor integrations.
//!
//! Lamina runs inside a host image editor and leans on the host's imaging
//! engine for everything pixel-related. Each host integration provides one
//! [`HostEngine`] implementation covering:
//!
//! - **Coverage query** — How many pixels inside the host's *current
//!   selection region* belong to a given layer's non-transparent content.
//!   The selection region itself stays host-owned and is never modeled
//!   here; it is implicit in the query. The host is free to compute the
//!   count however it likes (GIMP answers it from a full-range histogram
//!   of the layer restricted to the selection).
//! - **Selected-set replacement** — Replacing the host's selected-layer
//!   set wholesale with a non-empty collection of leaf layers. Hosts
//!   reject empty sets, so [`pick_layers`](crate::pick::pick_layers) never
//!   issues the call with one.
//! - **Undo-group and context scopes** — Host bookkeeping that brackets
//!   the operation so it lands in the undo history as one user action,
//!   executed under a default tool context. Scope calls carry no result;
//!   the pick operation guarantees they are balanced on every exit path.
//!
//! # Crate boundaries
//!
//! `lamina_core` owns the layer model, the collector, the filter, and this
//! contract module. Host glue crates implement `HostEngine` against a real
//! editor; `lamina_harness` implements it against an in-memory raster for
//! tests and demos.

use alloc::string::String;

use thiserror::Error;

use crate::layer::LayerId;

/// An error reported by the host engine during a pick.
///
/// Engine errors are never retried or locally recovered; they abort the
/// whole pick and propagate to the host's own error surface.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The selection-coverage query failed for a layer.
    #[error("coverage query failed for {layer:?}: {reason}")]
    Coverage {
        /// The layer whose query failed.
        layer: LayerId,
        /// Host-provided failure description.
        reason: String,
    },
    /// The host rejected the selected-layer replacement.
    #[error("selected-layer replacement rejected: {reason}")]
    Apply {
        /// Host-provided failure description.
        reason: String,
    },
}

/// Capabilities a host image editor exposes to the pick operation.
///
/// Both real editor glue and the in-memory test harness implement this
/// trait, enabling a generic pick pipeline and test doubles.
///
/// # Pick pseudocode
///
/// A host invokes the operation like this:
///
/// ```rust,ignore
/// let report = pick_layers(&store, &roots, &mut engine, Tracer::none())?;
/// if report.applied {
///     // selected-layer set was replaced
/// }
/// ```
pub trait HostEngine {
    /// Returns the number of pixels within the current selection region
    /// that belong to `layer`'s non-transparent content.
    ///
    /// Layers are always queried one at a time and only for visible leaf
    /// layers. An empty selection region yields 0 for every layer.
    fn selection_coverage(&self, layer: LayerId) -> Result<u64, EngineError>;

    /// Replaces the host's selected-layer set with `layers`.
    ///
    /// Callers must pass a non-empty slice; hosts reject empty sets.
    fn replace_selected(&mut self, layers: &[LayerId]) -> Result<(), EngineError>;

    /// Opens an undo-group scope so the whole pick is one undoable action.
    fn begin_undo_group(&mut self);

    /// Closes the undo-group scope opened by
    /// [`begin_undo_group`](Self::begin_undo_group).
    fn end_undo_group(&mut self);

    /// Pushes a default execution context for the duration of the pick.
    fn push_context(&mut self);

    /// Pops the context pushed by [`push_context`](Self::push_context).
    fn pop_context(&mut self);
}
