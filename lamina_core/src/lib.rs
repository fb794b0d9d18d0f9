// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree and selection-driven layer picking.
//!
//! `lamina_core` implements the "select layers under the selection" operation
//! of a multi-layer image editor: walk the document's layer tree, keep the
//! visible leaf layers, ask the host engine how many selected pixels each one
//! actually paints, and hand every layer with a non-zero count back to the
//! host as the new selected-layer set. It is `no_std` compatible (with
//! `alloc`) and uses array-based struct-of-arrays storage with index handles
//! for cache-friendly traversal.
//!
//! # Architecture
//!
//! One pick runs as a straight-line pipeline over host-owned state:
//!
//! ```text
//!   Host document (layer tree, selection mask)
//!       │
//!       ▼
//!   LayerStore::visible_leaves() ──► ordered leaf list
//!                                         │
//!                                         ▼
//!   coverage_filter() ──► HostEngine::selection_coverage() per leaf
//!                                         │
//!                                         ▼
//!   HostEngine::replace_selected() ──► PickReport
//! ```
//!
//! **[`layer`]** — Struct-of-arrays layer tree with generational handles.
//! Groups gate their whole subtree through their own visibility flag; the
//! collector produces the depth-first pre-order list of visible leaves.
//!
//! **[`engine`]** — The [`HostEngine`](engine::HostEngine) trait that host
//! integrations implement: the per-layer selection-coverage query, the
//! selected-set replacement, and the undo-group/context scope primitives.
//!
//! **[`pick`]** — The pick operation itself: collect, filter by coverage,
//! apply, with balanced undo/context scope release on every exit path.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! pick instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-layer
//!   coverage events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod engine;
pub mod layer;
pub mod pick;
pub mod trace;
