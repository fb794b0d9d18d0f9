// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree data model.
//!
//! A *layer* is a node in the document's layer hierarchy. Each layer has:
//!
//! - An identity ([`LayerId`]) — a generational handle that becomes stale when
//!   the layer is destroyed, preventing use-after-free bugs at the API level.
//! - Topology — parent, first-child, and sibling links forming an ordered tree.
//! - [`Flags`](LayerStore::flags) — a `visible` bit and a `group` bit. Groups
//!   are container nodes without paintable content of their own; a group's
//!   `visible` flag gates its entire subtree. Non-groups are paintable leaf
//!   layers.
//! - An optional display [`name`](LayerStore::name) for diagnostics.
//!
//! Layers are stored in struct-of-arrays layout with index-based handles
//! for cache-friendly traversal. The pick operation only reads the tree;
//! mutation happens on the host-document side (or in the test harness).
//!
//! # Collection
//!
//! [`LayerStore::visible_leaves`] and
//! [`LayerStore::visible_leaves_from`] produce the depth-first pre-order
//! list of visible leaf layers reachable through visible ancestors. An
//! invisible node prunes its whole subtree; the descendants' own flags are
//! never consulted.

mod collect;
mod id;
mod store;
mod traverse;

pub use id::{INVALID, LayerId};
pub use store::{LayerFlags, LayerStore};
pub use traverse::Children;
