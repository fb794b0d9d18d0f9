// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory raster host engine for tests and demos.
//!
//! [`RasterEngine`] implements [`HostEngine`] against a fixed-size pixel
//! grid instead of a real editor: per-layer painted content and the current
//! selection region are boolean [`Mask`]s filled from [`kurbo::Rect`]
//! regions, and the coverage query counts the pixels where a layer's
//! content and the selection overlap.
//!
//! The engine also does the bookkeeping a real host would: it records
//! every selected-set replacement, rejects empty sets, and counts
//! undo-group and context scope calls so tests can assert balanced
//! release. A layer can be *poisoned* to make its coverage query fail,
//! for error-path tests.

#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;
use lamina_core::engine::{EngineError, HostEngine};
use lamina_core::layer::LayerId;

/// A boolean pixel mask over a `width x height` canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Creates an all-clear mask.
    #[must_use]
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Sets every pixel whose unit cell lies inside `rect`.
    ///
    /// The rectangle is clamped to the canvas; coordinates are interpreted
    /// as pixel-grid bounds, so `Rect::new(0.0, 0.0, 2.0, 1.0)` covers
    /// exactly two pixels.
    pub fn fill_rect(&mut self, rect: Rect) {
        let (x0, x1) = Self::span(rect.x0, rect.x1, self.width);
        let (y0, y1) = Self::span(rect.y0, rect.y1, self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.bits[(y * self.width + x) as usize] = true;
            }
        }
    }

    /// Clears every pixel.
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Sets every pixel.
    pub fn fill(&mut self) {
        self.bits.fill(true);
    }

    /// Returns the number of set pixels.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.bits.iter().filter(|&&b| b).count() as u64
    }

    /// Returns the number of pixels set in both `self` and `other`.
    ///
    /// Masks of mismatched dimensions overlap nowhere.
    #[must_use]
    pub fn overlap(&self, other: &Self) -> u64 {
        if self.width != other.width || self.height != other.height {
            return 0;
        }
        self.bits
            .iter()
            .zip(&other.bits)
            .filter(|&(&a, &b)| a && b)
            .count() as u64
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "values are clamped to the u32 canvas extent before the cast"
    )]
    fn span(lo: f64, hi: f64, extent: u32) -> (u32, u32) {
        let lo = lo.max(0.0).min(f64::from(extent));
        let hi = hi.max(0.0).min(f64::from(extent));
        if hi <= lo {
            return (0, 0);
        }
        (lo as u32, hi as u32)
    }
}

/// Undo-group and context scope accounting.
///
/// Depths go up on begin/push and down on end/pop; a well-behaved caller
/// leaves both depths at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScopeStats {
    /// Current undo-group nesting depth.
    pub undo_depth: i32,
    /// Current context nesting depth.
    pub context_depth: i32,
    /// Total undo-group opens.
    pub undo_begins: u32,
    /// Total undo-group closes.
    pub undo_ends: u32,
    /// Total context pushes.
    pub context_pushes: u32,
    /// Total context pops.
    pub context_pops: u32,
}

impl ScopeStats {
    /// Returns whether every opened scope has been released.
    #[must_use]
    pub const fn balanced(&self) -> bool {
        self.undo_depth == 0 && self.context_depth == 0
    }
}

/// A [`HostEngine`] backed by an in-memory pixel grid.
#[derive(Clone, Debug)]
pub struct RasterEngine {
    width: u32,
    height: u32,
    selection: Mask,
    content: BTreeMap<u32, Mask>,
    poisoned: Option<u32>,
    applied: Vec<Vec<LayerId>>,
    scopes: ScopeStats,
}

impl RasterEngine {
    /// Creates an engine with an empty selection over a blank canvas.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            selection: Mask::empty(width, height),
            content: BTreeMap::new(),
            poisoned: None,
            applied: Vec::new(),
            scopes: ScopeStats::default(),
        }
    }

    /// Paints opaque content for `layer` inside `rect`.
    ///
    /// Repeated calls accumulate, so a layer's content can be any union of
    /// rectangles.
    pub fn paint(&mut self, layer: LayerId, rect: Rect) {
        self.content
            .entry(layer.index())
            .or_insert_with(|| Mask::empty(self.width, self.height))
            .fill_rect(rect);
    }

    /// Adds `rect` to the current selection region.
    pub fn select(&mut self, rect: Rect) {
        self.selection.fill_rect(rect);
    }

    /// Selects the whole canvas.
    pub fn select_all(&mut self) {
        self.selection.fill();
    }

    /// Clears the selection region.
    pub fn select_none(&mut self) {
        self.selection.clear();
    }

    /// Makes every future coverage query for `layer` fail.
    pub fn poison(&mut self, layer: LayerId) {
        self.poisoned = Some(layer.index());
    }

    /// Returns every selected-set replacement, oldest first.
    #[must_use]
    pub fn applied(&self) -> &[Vec<LayerId>] {
        &self.applied
    }

    /// Returns the most recent selected set, if any replacement happened.
    #[must_use]
    pub fn last_applied(&self) -> Option<&[LayerId]> {
        self.applied.last().map(Vec::as_slice)
    }

    /// Returns the scope accounting so far.
    #[must_use]
    pub const fn scopes(&self) -> &ScopeStats {
        &self.scopes
    }
}

impl HostEngine for RasterEngine {
    fn selection_coverage(&self, layer: LayerId) -> Result<u64, EngineError> {
        if self.poisoned == Some(layer.index()) {
            return Err(EngineError::Coverage {
                layer,
                reason: String::from("poisoned layer"),
            });
        }
        Ok(self
            .content
            .get(&layer.index())
            .map_or(0, |mask| mask.overlap(&self.selection)))
    }

    fn replace_selected(&mut self, layers: &[LayerId]) -> Result<(), EngineError> {
        if layers.is_empty() {
            return Err(EngineError::Apply {
                reason: String::from("empty selected set"),
            });
        }
        self.applied.push(layers.to_vec());
        Ok(())
    }

    fn begin_undo_group(&mut self) {
        self.scopes.undo_depth += 1;
        self.scopes.undo_begins += 1;
    }

    fn end_undo_group(&mut self) {
        self.scopes.undo_depth -= 1;
        self.scopes.undo_ends += 1;
    }

    fn push_context(&mut self) {
        self.scopes.context_depth += 1;
        self.scopes.context_pushes += 1;
    }

    fn pop_context(&mut self) {
        self.scopes.context_depth -= 1;
        self.scopes.context_pops += 1;
    }
}
