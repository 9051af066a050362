//! Document model: layers, the flattened layer tree, and optimistic updates.
//!
//! Layers are stored top-down in a flat list. A `Group` layer opens a child
//! range which is closed by a matching `GroupEnd` sentinel, so the subtree of
//! a group is always a contiguous slice `[group, ..children, group_end]`.
//! Artboards are groups flagged with `is_artboard` that also carry bounds of
//! their own.
//!
//! The engine treats a `Document` as read-only input. The only mutation path
//! is [`Document::apply_payload`] / [`Document::reconcile`], used by the store
//! that owns the document to apply optimistic and authoritative geometry.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bounds::Bounds;
use crate::payload::LocalPayload;

/// Unique identifier for a layer.
pub type LayerId = Uuid;

/// Unique identifier for a document.
pub type DocumentId = Uuid;

/// The kind of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerKind {
    Pixel,
    Adjustment,
    Text,
    Vector,
    SmartObject,
    SolidColor,
    Gradient,
    Pattern,
    /// Opens a child range in the flattened list.
    Group,
    /// Closes the child range opened by the nearest unmatched `Group`.
    GroupEnd,
}

/// A single layer as seen by the transform engine.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    #[serde(default)]
    pub name: String,
    pub kind: LayerKind,
    #[serde(default)]
    pub is_artboard: bool,
    #[serde(default)]
    pub is_background: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub proportional_scaling: bool,
    #[serde(default)]
    pub selected: bool,
    /// Own extent. `None` for plain groups and group-end sentinels, whose
    /// extent is derived from their children.
    #[serde(default)]
    pub bounds: Option<Bounds>,
}

impl Layer {
    /// Create an unselected, unlocked layer.
    #[must_use]
    pub fn new(kind: LayerKind, bounds: Option<Bounds>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            kind,
            is_artboard: false,
            is_background: false,
            locked: false,
            proportional_scaling: false,
            selected: false,
            bounds,
        }
    }

    #[must_use]
    pub fn is_group_end(&self) -> bool {
        self.kind == LayerKind::GroupEnd
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        self.kind == LayerKind::Group
    }

    /// Own bounds when present and non-empty.
    #[must_use]
    pub fn visible_bounds(&self) -> Option<Bounds> {
        self.bounds.filter(|b| !b.is_empty())
    }
}

/// Flattened, ordered layer tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerStore {
    layers: Vec<Layer>,
}

impl LayerStore {
    #[must_use]
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Wrap an already-flattened top-down layer list.
    #[must_use]
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    #[must_use]
    pub fn get(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    fn get_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| &l.id == id)
    }

    fn index_of(&self, id: &LayerId) -> Option<usize> {
        self.layers.iter().position(|l| &l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Index of the `GroupEnd` closing the group at `start`, or `start` itself
    /// for non-group layers. An unterminated group runs to the end of the list.
    fn range_end(&self, start: usize) -> usize {
        if !self.layers.get(start).is_some_and(Layer::is_group) {
            return start;
        }
        let mut depth = 0_usize;
        for (idx, layer) in self.layers.iter().enumerate().skip(start) {
            match layer.kind {
                LayerKind::Group => depth += 1,
                LayerKind::GroupEnd => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return idx;
                    }
                }
                _ => {}
            }
        }
        self.layers.len().saturating_sub(1)
    }

    /// The layer itself followed by its whole subtree, in list order.
    ///
    /// For a group this includes the closing `GroupEnd` sentinel. A layer that
    /// is not in the store yields an empty list.
    #[must_use]
    pub fn descendants(&self, layer: &Layer) -> Vec<&Layer> {
        let Some(start) = self.index_of(&layer.id) else {
            return Vec::new();
        };
        let end = self.range_end(start);
        self.layers.iter().skip(start).take(end - start + 1).collect()
    }

    /// Every group that encloses `layer`, nearest first. Excludes `layer`.
    #[must_use]
    pub fn strict_ancestors(&self, layer: &Layer) -> Vec<&Layer> {
        let Some(target) = self.index_of(&layer.id) else {
            return Vec::new();
        };
        let mut open: Vec<&Layer> = Vec::new();
        for candidate in self.layers.iter().take(target) {
            match candidate.kind {
                LayerKind::Group => open.push(candidate),
                LayerKind::GroupEnd => {
                    open.pop();
                }
                _ => {}
            }
        }
        open.reverse();
        open
    }

    /// Bounding box of the layer's visible content.
    ///
    /// Layers with their own bounds (leaves and artboards) report those;
    /// plain groups report the union of their descendants' visible bounds.
    /// Returns `None` when nothing in the subtree has a visible extent.
    #[must_use]
    pub fn child_bounds(&self, layer: &Layer) -> Option<Bounds> {
        if let Some(own) = layer.bounds {
            return Some(own);
        }
        self.descendants(layer)
            .into_iter()
            .filter_map(Layer::visible_bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Currently selected layers in list order, excluding sentinels.
    #[must_use]
    pub fn selected(&self) -> Vec<&Layer> {
        self.layers.iter().filter(|l| l.selected && !l.is_group_end()).collect()
    }

    /// Replace a layer's own bounds. Returns false if the layer doesn't exist.
    pub fn set_bounds(&mut self, id: &LayerId, bounds: Bounds) -> bool {
        let Some(layer) = self.get_mut(id) else {
            return false;
        };
        layer.bounds = Some(bounds);
        true
    }
}

/// A document: canvas bounds plus its layer tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub bounds: Bounds,
    pub layers: LayerStore,
}

impl Document {
    /// Create an empty document with a canvas of `width` x `height`.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            bounds: Bounds::from_origin_size(0.0, 0.0, width, height),
            layers: LayerStore::new(),
        }
    }

    /// Selected layers, excluding group-end sentinels.
    #[must_use]
    pub fn selected(&self) -> Vec<&Layer> {
        self.layers.selected()
    }

    /// Apply an optimistic local payload. Returns the number of layers whose
    /// bounds changed; payloads for another document are ignored.
    pub fn apply_payload(&mut self, payload: &LocalPayload) -> usize {
        if payload.document_id() != self.id {
            return 0;
        }
        match payload {
            LocalPayload::Reposition { positions, .. } => {
                let mut changed = 0;
                for pos in positions {
                    changed += self.reposition(&pos.layer_id, pos.x, pos.y);
                }
                changed
            }
            LocalPayload::Resize { sizes, .. } => {
                let updates: Vec<(LayerId, Bounds)> = sizes
                    .iter()
                    .map(|s| (s.layer_id, Bounds::from_origin_size(s.x, s.y, s.w, s.h)))
                    .collect();
                self.reconcile(&updates)
            }
            LocalPayload::ResizeDocument { size, .. } => {
                self.bounds = Bounds::from_origin_size(self.bounds.left, self.bounds.top, size.w, size.h);
                0
            }
            LocalPayload::DragBounds { layer_ids, size, position, .. } => {
                let bounds = Bounds::from_origin_size(position.left, position.top, size.w, size.h);
                let updates: Vec<(LayerId, Bounds)> = layer_ids.iter().map(|id| (*id, bounds)).collect();
                self.reconcile(&updates)
            }
            LocalPayload::RadiiChanged { .. } => 0,
        }
    }

    /// Move a layer's top-left to `(x, y)`. Artboards carry their content
    /// along as a rigid unit.
    fn reposition(&mut self, id: &LayerId, x: f64, y: f64) -> usize {
        let Some(layer) = self.layers.get(id) else {
            return 0;
        };
        let Some(own) = layer.bounds else {
            return 0;
        };
        let (dx, dy) = (x - own.left, y - own.top);
        let moved: Vec<(LayerId, Bounds)> = if layer.is_artboard {
            self.layers
                .descendants(layer)
                .into_iter()
                .filter_map(|l| l.bounds.map(|b| (l.id, b.translate(dx, dy))))
                .collect()
        } else {
            vec![(layer.id, own.moved_to(x, y))]
        };
        self.reconcile(&moved)
    }

    /// Apply authoritative bounds reported by the host after confirmation.
    pub fn reconcile(&mut self, bounds: &[(LayerId, Bounds)]) -> usize {
        let mut changed = 0;
        for (id, b) in bounds {
            if self.layers.set_bounds(id, *b) {
                changed += 1;
            }
        }
        changed
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
