// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-leaf collection.
//!
//! The collector flattens the layer tree into the ordered list of leaf
//! layers that can contribute pixels: depth-first, pre-order, each level in
//! its stacking order, restricted to nodes reachable through visible
//! ancestors only. An invisible node prunes its entire subtree without
//! looking at the descendants' own flags — this matches how editors
//! composite, where a hidden group hides everything inside it.
//!
//! Collection is pure: it never mutates the store and yields a fresh list
//! on every call.

use alloc::vec::Vec;

use super::id::{INVALID, LayerId};
use super::store::LayerStore;

impl LayerStore {
    /// Returns the visible leaf layers under `roots`, depth-first pre-order.
    ///
    /// Groups are descended into but never appear in the output; invisible
    /// nodes are skipped together with their whole subtree.
    ///
    /// # Panics
    ///
    /// Panics if any root handle is stale.
    #[must_use]
    pub fn visible_leaves_from(&self, roots: &[LayerId]) -> Vec<LayerId> {
        let mut out = Vec::new();
        for &root in roots {
            self.validate(root);
            self.collect_visible(root.idx, &mut out);
        }
        out
    }

    /// Returns the visible leaf layers of the whole store, depth-first
    /// pre-order over [`roots`](Self::roots).
    #[must_use]
    pub fn visible_leaves(&self) -> Vec<LayerId> {
        self.visible_leaves_from(&self.roots())
    }

    /// Depth-first pre-order collection starting from `idx`.
    ///
    /// Recursion depth equals tree depth, which is bounded by the host's
    /// own nesting limits.
    fn collect_visible(&self, idx: u32, out: &mut Vec<LayerId>) {
        if !self.flags[idx as usize].visible {
            return;
        }
        if self.flags[idx as usize].group {
            let mut child = self.first_child[idx as usize];
            while child != INVALID {
                self.collect_visible(child, out);
                child = self.next_sibling[child as usize];
            }
        } else {
            out.push(LayerId {
                idx,
                generation: self.generation[idx as usize],
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn flat_forest_in_root_order() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let b = store.create_layer();
        let c = store.create_layer();

        assert_eq!(store.visible_leaves(), vec![a, b, c]);
    }

    #[test]
    fn invisible_leaf_is_skipped() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let b = store.create_layer();
        store.set_visible(b, false);
        let c = store.create_layer();

        assert_eq!(store.visible_leaves(), vec![a, c]);
    }

    #[test]
    fn invisible_group_prunes_subtree() {
        let mut store = LayerStore::new();
        let g = store.create_group();
        let inner = store.create_layer();
        store.add_child(g, inner);
        store.set_visible(g, false);

        // `inner` is itself visible, but its ancestor gates it out.
        assert!(store.flags(inner).visible);
        assert!(store.visible_leaves().is_empty());
    }

    #[test]
    fn invisible_group_hides_descendants_regardless_of_their_flags() {
        let mut store = LayerStore::new();
        let outer = store.create_group();
        let mid = store.create_group();
        let deep = store.create_layer();
        store.add_child(outer, mid);
        store.add_child(mid, deep);
        store.set_visible(outer, false);
        // Flip descendant flags both ways; the outer gate wins either way.
        store.set_visible(mid, true);
        store.set_visible(deep, true);
        assert!(store.visible_leaves().is_empty());

        store.set_visible(deep, false);
        assert!(store.visible_leaves().is_empty());
    }

    #[test]
    fn visible_group_with_only_invisible_children_yields_nothing() {
        let mut store = LayerStore::new();
        let g = store.create_group();
        let a = store.create_layer();
        let b = store.create_layer();
        store.add_child(g, a);
        store.add_child(g, b);
        store.set_visible(a, false);
        store.set_visible(b, false);

        assert!(store.visible_leaves().is_empty());
    }

    #[test]
    fn groups_never_appear_in_output() {
        let mut store = LayerStore::new();
        let g = store.create_group();
        let leaf = store.create_layer();
        store.add_child(g, leaf);

        assert_eq!(store.visible_leaves(), vec![leaf]);
    }

    #[test]
    fn empty_visible_group_yields_nothing() {
        let mut store = LayerStore::new();
        let _g = store.create_group();
        assert!(store.visible_leaves().is_empty());
    }

    #[test]
    fn preorder_across_nested_groups() {
        // Tree (stacking order):
        //   a (leaf)
        //   g1 (group): [b (leaf), g2 (group): [c (leaf)], d (leaf)]
        //   e (leaf)
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let g1 = store.create_group();
        let b = store.create_layer();
        let g2 = store.create_group();
        let c = store.create_layer();
        let d = store.create_layer();
        let e = store.create_layer();

        store.add_child(g1, b);
        store.add_child(g1, g2);
        store.add_child(g2, c);
        store.add_child(g1, d);

        let roots = vec![a, g1, e];
        assert_eq!(store.visible_leaves_from(&roots), vec![a, b, c, d, e]);
    }

    #[test]
    fn sibling_order_is_preserved_after_insert_before() {
        let mut store = LayerStore::new();
        let g = store.create_group();
        let a = store.create_layer();
        let c = store.create_layer();
        store.add_child(g, a);
        store.add_child(g, c);

        let b = store.create_layer();
        store.insert_before(b, c);

        assert_eq!(store.visible_leaves_from(&[g]), vec![a, b, c]);
    }

    #[test]
    fn collection_is_idempotent() {
        let mut store = LayerStore::new();
        let g = store.create_group();
        let a = store.create_layer();
        let b = store.create_layer();
        store.add_child(g, a);
        store.add_child(g, b);
        store.set_visible(b, false);

        let first = store.visible_leaves();
        let second = store.visible_leaves();
        assert_eq!(first, second);
    }

    #[test]
    fn deep_nesting_is_supported() {
        let mut store = LayerStore::new();
        let root = store.create_group();
        let mut cursor = root;
        for _ in 0..200 {
            let g = store.create_group();
            store.add_child(cursor, g);
            cursor = g;
        }
        let leaf = store.create_layer();
        store.add_child(cursor, leaf);

        assert_eq!(store.visible_leaves_from(&[root]), vec![leaf]);
    }

    #[test]
    fn explicit_roots_control_order() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let b = store.create_layer();

        // Hosts may present roots in any stacking order they maintain.
        assert_eq!(store.visible_leaves_from(&[b, a]), vec![b, a]);
    }

    #[test]
    fn spec_scenario_tree() {
        // [A(visible,leaf), B(invisible,leaf),
        //  C(visible,group: [D(visible,leaf), E(invisible,leaf)])]
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let b = store.create_layer();
        store.set_visible(b, false);
        let c = store.create_group();
        let d = store.create_layer();
        let e = store.create_layer();
        store.add_child(c, d);
        store.add_child(c, e);
        store.set_visible(e, false);

        let leaves: Vec<_> = store.visible_leaves_from(&[a, b, c]);
        assert_eq!(leaves, vec![a, d]);
    }
}
