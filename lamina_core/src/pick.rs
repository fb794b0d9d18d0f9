// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pick operation: select the layers with painted content under the
//! current selection.
//!
//! A pick runs in three steps over a host-owned document:
//!
//! 1. **Collect** — flatten the layer tree into the depth-first pre-order
//!    list of visible leaf layers
//!    ([`visible_leaves_from`](LayerStore::visible_leaves_from)).
//! 2. **Filter** — query the host for each leaf's qualifying-pixel count
//!    inside the current selection region and keep the layers with a
//!    strictly positive count ([`coverage_filter`]).
//! 3. **Apply** — if anything qualified, replace the host's selected-layer
//!    set wholesale; otherwise leave the host's selection state untouched
//!    (hosts reject empty selected sets).
//!
//! The whole operation is bracketed by the host's undo-group and context
//! scopes. Both scopes are released on every exit path, including an engine
//! error part-way through the filter.

use alloc::vec::Vec;

use crate::engine::{EngineError, HostEngine};
use crate::layer::{LayerId, LayerStore};
use crate::trace::{ApplyEvent, CollectEvent, PickBeginEvent, PickSummary, Tracer};

/// Counters describing one completed pick.
///
/// A pick that finds nothing under the selection is still a success;
/// `applied` records whether the host's selected-layer set was actually
/// replaced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PickReport {
    /// Visible leaf layers whose coverage was queried.
    pub visited: usize,
    /// Layers with a non-zero qualifying-pixel count.
    pub qualified: usize,
    /// Whether the selected-layer set was replaced on the host.
    pub applied: bool,
}

/// Keeps the layers whose qualifying-pixel count under the current
/// selection is strictly greater than zero.
///
/// Layers are queried in the order given; the output preserves that order,
/// though consumers treat it as an unordered set. The first engine error
/// aborts the filter — no retry, no silent skip, no partial result.
pub fn coverage_filter<E: HostEngine + ?Sized>(
    layers: &[LayerId],
    engine: &E,
    tracer: &mut Tracer<'_>,
) -> Result<Vec<LayerId>, EngineError> {
    let mut qualified = Vec::new();
    for &layer in layers {
        let count = engine.selection_coverage(layer)?;
        tracer.coverage(layer, count);
        if count > 0 {
            qualified.push(layer);
        }
    }
    Ok(qualified)
}

/// Runs a full pick: collect visible leaves under `roots`, filter them by
/// selection coverage, and replace the host's selected-layer set with the
/// qualifying layers.
///
/// The host's undo-group and context scopes bracket the operation and are
/// released whether the pick succeeds or an [`EngineError`] aborts it.
/// When no layer qualifies, the host's selected-layer state is left
/// untouched and the returned report has `applied == false`.
///
/// # Panics
///
/// Panics if any root handle is stale.
pub fn pick_layers<E: HostEngine + ?Sized>(
    store: &LayerStore,
    roots: &[LayerId],
    engine: &mut E,
    tracer: &mut Tracer<'_>,
) -> Result<PickReport, EngineError> {
    tracer.pick_begin(&PickBeginEvent { roots: roots.len() });

    engine.begin_undo_group();
    engine.push_context();

    let result = pick_inner(store, roots, engine, tracer);

    // Balanced release on success and error alike.
    engine.pop_context();
    engine.end_undo_group();

    result
}

fn pick_inner<E: HostEngine + ?Sized>(
    store: &LayerStore,
    roots: &[LayerId],
    engine: &mut E,
    tracer: &mut Tracer<'_>,
) -> Result<PickReport, EngineError> {
    let leaves = store.visible_leaves_from(roots);
    tracer.collect(&CollectEvent {
        visible_leaves: leaves.len(),
    });

    let qualified = coverage_filter(&leaves, engine, tracer)?;

    let applied = !qualified.is_empty();
    if applied {
        engine.replace_selected(&qualified)?;
        tracer.apply(&ApplyEvent {
            selected: qualified.len(),
        });
    }

    let report = PickReport {
        visited: leaves.len(),
        qualified: qualified.len(),
        applied,
    };
    tracer.pick_summary(&PickSummary {
        visited: report.visited,
        qualified: report.qualified,
        applied: report.applied,
    });
    Ok(report)
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    /// Scripted engine: per-layer coverage counts keyed by slot index, with
    /// optional failure injection and full call accounting.
    #[derive(Debug, Default)]
    struct ScriptEngine {
        coverage: BTreeMap<u32, u64>,
        fail_on: Option<u32>,
        reject_apply: bool,
        applied: Vec<Vec<LayerId>>,
        undo_depth: i32,
        context_depth: i32,
        undo_opens: u32,
        context_pushes: u32,
    }

    impl ScriptEngine {
        fn with_coverage(pairs: &[(LayerId, u64)]) -> Self {
            let mut engine = Self::default();
            for &(layer, count) in pairs {
                engine.coverage.insert(layer.index(), count);
            }
            engine
        }

        fn balanced(&self) -> bool {
            self.undo_depth == 0 && self.context_depth == 0
        }
    }

    impl HostEngine for ScriptEngine {
        fn selection_coverage(&self, layer: LayerId) -> Result<u64, EngineError> {
            if self.fail_on == Some(layer.index()) {
                return Err(EngineError::Coverage {
                    layer,
                    reason: String::from("histogram unavailable"),
                });
            }
            Ok(self.coverage.get(&layer.index()).copied().unwrap_or(0))
        }

        fn replace_selected(&mut self, layers: &[LayerId]) -> Result<(), EngineError> {
            assert!(!layers.is_empty(), "hosts reject empty selected sets");
            if self.reject_apply {
                return Err(EngineError::Apply {
                    reason: String::from("image is locked"),
                });
            }
            self.applied.push(layers.to_vec());
            Ok(())
        }

        fn begin_undo_group(&mut self) {
            self.undo_depth += 1;
            self.undo_opens += 1;
        }

        fn end_undo_group(&mut self) {
            self.undo_depth -= 1;
        }

        fn push_context(&mut self) {
            self.context_depth += 1;
            self.context_pushes += 1;
        }

        fn pop_context(&mut self) {
            self.context_depth -= 1;
        }
    }

    fn scenario_tree() -> (LayerStore, Vec<LayerId>, [LayerId; 5]) {
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
        let roots = vec![a, b, c];
        (store, roots, [a, b, c, d, e])
    }

    #[test]
    fn filter_boundary_zero_excluded_one_included() {
        let mut store = LayerStore::new();
        let zero = store.create_layer();
        let one = store.create_layer();
        let engine = ScriptEngine::with_coverage(&[(zero, 0), (one, 1)]);

        let kept = coverage_filter(&[zero, one], &engine, &mut Tracer::none()).unwrap();
        assert_eq!(kept, vec![one]);
    }

    #[test]
    fn filter_propagates_engine_error() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let b = store.create_layer();
        let mut engine = ScriptEngine::with_coverage(&[(a, 5), (b, 5)]);
        engine.fail_on = Some(b.index());

        let err = coverage_filter(&[a, b], &engine, &mut Tracer::none()).unwrap_err();
        assert!(matches!(err, EngineError::Coverage { layer, .. } if layer == b));
    }

    #[test]
    fn pick_selects_covered_layers() {
        let (store, roots, [a, _b, _c, d, _e]) = scenario_tree();
        let mut engine = ScriptEngine::with_coverage(&[(a, 12), (d, 3)]);

        let report = pick_layers(&store, &roots, &mut engine, &mut Tracer::none()).unwrap();

        assert_eq!(
            report,
            PickReport {
                visited: 2,
                qualified: 2,
                applied: true,
            }
        );
        assert_eq!(engine.applied, vec![vec![a, d]]);
        assert!(engine.balanced());
    }

    #[test]
    fn pick_with_partial_coverage_selects_subset() {
        let (store, roots, [a, _b, _c, d, _e]) = scenario_tree();
        // Selection only touches D's content.
        let mut engine = ScriptEngine::with_coverage(&[(a, 0), (d, 1)]);

        let report = pick_layers(&store, &roots, &mut engine, &mut Tracer::none()).unwrap();

        assert_eq!(report.visited, 2);
        assert_eq!(report.qualified, 1);
        assert!(report.applied);
        assert_eq!(engine.applied, vec![vec![d]]);
    }

    #[test]
    fn empty_result_leaves_host_selection_untouched() {
        let (store, roots, _ids) = scenario_tree();
        // Selection overlaps no layer's content.
        let mut engine = ScriptEngine::default();

        let report = pick_layers(&store, &roots, &mut engine, &mut Tracer::none()).unwrap();

        assert_eq!(
            report,
            PickReport {
                visited: 2,
                qualified: 0,
                applied: false,
            }
        );
        assert!(engine.applied.is_empty(), "no replace_selected call");
        assert!(engine.balanced());
    }

    #[test]
    fn scopes_are_released_on_coverage_failure() {
        let (store, roots, [a, _b, _c, d, _e]) = scenario_tree();
        let mut engine = ScriptEngine::with_coverage(&[(a, 7)]);
        engine.fail_on = Some(d.index());

        let err = pick_layers(&store, &roots, &mut engine, &mut Tracer::none()).unwrap_err();

        assert!(matches!(err, EngineError::Coverage { .. }));
        assert!(engine.applied.is_empty());
        assert!(engine.balanced(), "undo/context scopes must be released");
        assert_eq!(engine.undo_opens, 1);
        assert_eq!(engine.context_pushes, 1);
    }

    #[test]
    fn scopes_are_released_on_apply_failure() {
        let (store, roots, [a, _b, _c, _d, _e]) = scenario_tree();
        let mut engine = ScriptEngine::with_coverage(&[(a, 1)]);
        engine.reject_apply = true;

        let err = pick_layers(&store, &roots, &mut engine, &mut Tracer::none()).unwrap_err();

        assert!(matches!(err, EngineError::Apply { .. }));
        assert!(engine.balanced(), "undo/context scopes must be released");
    }

    #[test]
    fn invisible_layers_are_never_queried() {
        let (store, roots, [a, b, _c, d, e]) = scenario_tree();
        // Give the invisible layers coverage; they must still not qualify.
        let mut engine =
            ScriptEngine::with_coverage(&[(a, 1), (b, 100), (d, 1), (e, 100)]);

        let report = pick_layers(&store, &roots, &mut engine, &mut Tracer::none()).unwrap();

        assert_eq!(report.visited, 2);
        assert_eq!(engine.applied, vec![vec![a, d]]);
    }

    #[test]
    fn pick_on_empty_forest_reports_nothing() {
        let store = LayerStore::new();
        let mut engine = ScriptEngine::default();

        let report = pick_layers(&store, &[], &mut engine, &mut Tracer::none()).unwrap();

        assert_eq!(report, PickReport::default());
        assert!(engine.balanced());
    }
}
