//! Bounds redistribution: move, resize, set-bounds, rotate, and radius commands.
//!
//! DESIGN
//! ======
//! A transform requested on a group is decomposed into one request per
//! descendant with visible bounds. Groups are logical containers, so their
//! members each receive an absolute translation or an affine share of the
//! resize. Artboards are rigid containers and are never decomposed: the
//! artboard itself is transformed to an explicit bounding box and its content
//! follows along inside the host.
//!
//! Every function here is pure. It reads the document and returns a
//! [`TransformPlan`]; applying the plan is the orchestrator's job.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::doc::{Document, Layer, LayerId};
use crate::payload::{
    Command, HostRequest, LayerPosition, LayerRef, LayerSize, LocalPayload, Origin, Radii, Size, TransformPlan,
};

// =============================================================================
// TYPES
// =============================================================================

/// Requested top-left. Absent coordinates are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Position {
    #[must_use]
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y) }
    }
}

/// Requested size. Absent dimensions are left unchanged (or derived, when
/// scaling proportionally).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeSpec {
    pub w: Option<f64>,
    pub h: Option<f64>,
}

impl SizeSpec {
    #[must_use]
    pub fn wh(w: f64, h: f64) -> Self {
        Self { w: Some(w), h: Some(h) }
    }

    #[must_use]
    pub fn width(w: f64) -> Self {
        Self { w: Some(w), h: None }
    }

    #[must_use]
    pub fn height(h: f64) -> Self {
        Self { w: None, h: Some(h) }
    }
}

/// `part / whole`, or 1.0 when the whole has no extent on that axis.
fn ratio(part: f64, whole: f64) -> f64 {
    if whole == 0.0 { 1.0 } else { part / whole }
}

// =============================================================================
// SIZE
// =============================================================================

/// Resolve a possibly partial size request against `bounds`.
///
/// With `proportional`, a single given dimension drives the other through the
/// original aspect ratio; width wins when both are given. Without it, missing
/// dimensions keep their original value.
#[must_use]
pub fn calculate_new_size(bounds: &Bounds, size: SizeSpec, proportional: bool) -> Size {
    let (width, height) = (bounds.width(), bounds.height());
    if proportional {
        if let Some(w) = size.w {
            return Size { w, h: w * ratio(height, width) };
        }
        if let Some(h) = size.h {
            return Size { w: h * ratio(width, height), h };
        }
        return Size { w: width, h: height };
    }
    Size { w: size.w.unwrap_or(width), h: size.h.unwrap_or(height) }
}

// =============================================================================
// MOVE
// =============================================================================

/// Append the per-layer moves that bring `target`'s content to `position`.
pub(crate) fn push_move_actions(
    document: &Document,
    target: &Layer,
    position: Position,
    positions: &mut Vec<LayerPosition>,
    requests: &mut Vec<HostRequest>,
) {
    let Some(overall) = document.layers.child_bounds(target) else {
        return;
    };
    let dx = position.x.map_or(0.0, |x| x - overall.left);
    let dy = position.y.map_or(0.0, |y| y - overall.top);
    let moving = if target.is_artboard { vec![target] } else { document.layers.descendants(target) };

    for layer in moving {
        let Some(bounds) = layer.visible_bounds() else {
            continue;
        };
        let layer_ref = LayerRef::id(document.id, layer.id);
        if layer.is_artboard {
            let x = position.x.unwrap_or(bounds.left);
            let y = position.y.unwrap_or(bounds.top);
            positions.push(LayerPosition { layer_id: layer.id, x, y });
            requests.push(HostRequest::TransformArtboard { target: layer_ref, bounding_box: bounds.moved_to(x, y) });
        } else {
            positions.push(LayerPosition { layer_id: layer.id, x: bounds.left + dx, y: bounds.top + dy });
            requests.push(HostRequest::Translate { target: layer_ref, dx, dy });
        }
    }
}

/// Move each target layer so its content's top-left lands on `position`.
///
/// Every target is positioned independently. Group-end sentinels are ignored.
#[must_use]
pub fn move_layers(document: &Document, layers: &[&Layer], position: Position) -> TransformPlan {
    let mut positions = Vec::new();
    let mut requests = Vec::new();
    for layer in layers.iter().filter(|l| !l.is_group_end()) {
        push_move_actions(document, layer, position, &mut positions, &mut requests);
    }
    if requests.is_empty() {
        return TransformPlan::noop(Command::SetPosition, document.id);
    }
    TransformPlan {
        command: Command::SetPosition,
        document_id: document.id,
        payload: Some(LocalPayload::Reposition { document_id: document.id, positions }),
        requests,
        refresh: Vec::new(),
    }
}

// =============================================================================
// RESIZE
// =============================================================================

/// Append the per-layer resizes that bring `target`'s content to `size`.
///
/// Each descendant keeps its share of the aggregate: its size is scaled by
/// its width/height fraction of the aggregate, and its offset from the
/// aggregate's origin is scaled by the overall resize ratio.
fn push_resize_actions(
    document: &Document,
    target: &Layer,
    size: SizeSpec,
    sizes: &mut Vec<LayerSize>,
    requests: &mut Vec<HostRequest>,
) {
    let Some(overall) = document.layers.child_bounds(target) else {
        return;
    };
    let resizing = if target.is_artboard { vec![target] } else { document.layers.descendants(target) };
    let overall_w_ratio = size.w.map_or(0.0, |w| ratio(w, overall.width()));
    let overall_h_ratio = size.h.map_or(0.0, |h| ratio(h, overall.height()));

    for layer in resizing {
        let Some(bounds) = layer.visible_bounds() else {
            continue;
        };
        let mut share = SizeSpec::default();
        let (mut left, mut top) = (bounds.left, bounds.top);
        if let Some(w) = size.w {
            share.w = Some(w * ratio(bounds.width(), overall.width()));
            left = overall.left + (bounds.left - overall.left) * overall_w_ratio;
        }
        if let Some(h) = size.h {
            share.h = Some(h * ratio(bounds.height(), overall.height()));
            top = overall.top + (bounds.top - overall.top) * overall_h_ratio;
        }

        let new_size = calculate_new_size(&bounds, share, target.proportional_scaling);
        sizes.push(LayerSize { layer_id: layer.id, w: new_size.w, h: new_size.h, x: left, y: top });

        let layer_ref = LayerRef::id(document.id, layer.id);
        if layer.is_artboard {
            requests.push(HostRequest::TransformArtboard {
                target: layer_ref,
                bounding_box: Bounds::from_origin_size(left, top, new_size.w, new_size.h),
            });
        } else {
            requests.push(HostRequest::SetSize {
                target: layer_ref,
                w: new_size.w,
                h: new_size.h,
                anchored: false,
                x: left,
                y: top,
            });
        }
    }
}

/// Resize each target layer's content to `size`.
///
/// Group-end sentinels and layers whose ancestor is also a target are
/// dropped first. With nothing left to resize, the document canvas itself is
/// resized, anchored at the top-left.
#[must_use]
pub fn resize_layers(document: &Document, layers: &[&Layer], size: SizeSpec) -> TransformPlan {
    let targets: Vec<&Layer> = layers
        .iter()
        .copied()
        .filter(|layer| {
            !layer.is_group_end()
                && !document
                    .layers
                    .strict_ancestors(layer)
                    .iter()
                    .any(|ancestor| layers.iter().any(|l| l.id == ancestor.id))
        })
        .collect();

    if targets.is_empty() {
        let new_size = calculate_new_size(&document.bounds, size, false);
        return TransformPlan {
            command: Command::SetSize,
            document_id: document.id,
            payload: Some(LocalPayload::ResizeDocument { document_id: document.id, size: new_size }),
            requests: vec![HostRequest::ResizeDocument { document_id: document.id, w: new_size.w, h: new_size.h }],
            refresh: Vec::new(),
        };
    }

    let mut sizes = Vec::new();
    let mut requests = Vec::new();
    for layer in targets {
        push_resize_actions(document, layer, size, &mut sizes, &mut requests);
    }
    if requests.is_empty() {
        return TransformPlan::noop(Command::SetSize, document.id);
    }
    TransformPlan {
        command: Command::SetSize,
        document_id: document.id,
        payload: Some(LocalPayload::Resize { document_id: document.id, sizes }),
        requests,
        refresh: Vec::new(),
    }
}

// =============================================================================
// INTERACTIVE COMMIT
// =============================================================================

/// Ids of every layer in the subtrees of `layers`.
pub(crate) fn descendant_ids(document: &Document, layers: &[&Layer]) -> Vec<LayerId> {
    let mut ids: Vec<LayerId> = Vec::new();
    for layer in layers {
        for descendant in document.layers.descendants(layer) {
            if !ids.contains(&descendant.id) {
                ids.push(descendant.id);
            }
        }
    }
    ids
}

/// Commit a resize drag of the current selection from `old` to `new`.
///
/// A lone selected artboard is transformed to the normalized new bounds.
/// Anything else gets a single size request against the host's current
/// selection; inverted bounds are passed through so the host mirrors the
/// content. Unchanged bounds produce a no-op.
#[must_use]
pub fn set_bounds(document: &Document, old: &Bounds, new: &Bounds) -> TransformPlan {
    let selected = document.selected();
    if selected.is_empty() || old == new {
        return TransformPlan::noop(Command::SetBounds, document.id);
    }
    let target = LayerRef::current(document.id);
    let request = match selected.as_slice() {
        [only] if only.is_artboard => {
            HostRequest::TransformArtboard { target, bounding_box: new.normalize() }
        }
        _ => HostRequest::SetSize {
            target,
            w: new.width(),
            h: new.height(),
            anchored: false,
            x: new.left,
            y: new.top,
        },
    };
    TransformPlan {
        command: Command::SetBounds,
        document_id: document.id,
        payload: None,
        requests: vec![request],
        refresh: descendant_ids(document, &selected),
    }
}

/// Live bounds for the current selection during a resize drag.
///
/// Only a local payload is produced; the host is not involved until the drag
/// is committed through [`set_bounds`].
#[must_use]
pub fn set_drag_bounds(document: &Document, bounds: &Bounds) -> TransformPlan {
    let layer_ids: Vec<LayerId> = document.selected().iter().map(|l| l.id).collect();
    if layer_ids.is_empty() {
        return TransformPlan::noop(Command::SetDragBounds, document.id);
    }
    let (mut w, mut h) = (bounds.width(), bounds.height());
    let (mut left, mut top) = (bounds.left, bounds.top);
    if w < 0.0 {
        w = -w;
        left -= w;
    }
    if h < 0.0 {
        h = -h;
        top -= h;
    }
    TransformPlan {
        command: Command::SetDragBounds,
        document_id: document.id,
        payload: Some(LocalPayload::DragBounds {
            document_id: document.id,
            layer_ids,
            size: Size { w, h },
            position: Origin { top, left },
        }),
        requests: Vec::new(),
        refresh: Vec::new(),
    }
}

// =============================================================================
// ROTATE / RADIUS
// =============================================================================

/// Rotate the current selection by `angle` degrees about its center.
#[must_use]
pub fn rotate(document: &Document, angle: f64) -> TransformPlan {
    let selected = document.selected();
    if selected.is_empty() || angle == 0.0 {
        return TransformPlan::noop(Command::Rotate, document.id);
    }
    TransformPlan {
        command: Command::Rotate,
        document_id: document.id,
        payload: None,
        requests: vec![HostRequest::Rotate { target: LayerRef::current(document.id), angle }],
        refresh: descendant_ids(document, &selected),
    }
}

/// Set a uniform corner radius on rectangle shapes in `layers`.
///
/// `coalesce` merges this change into the previous history state, for
/// continuous scrubbing.
#[must_use]
pub fn set_radius(document: &Document, layers: &[&Layer], radius: f64, coalesce: bool) -> TransformPlan {
    let layer_ids: Vec<LayerId> = layers.iter().filter(|l| !l.is_group_end()).map(|l| l.id).collect();
    if layer_ids.is_empty() {
        return TransformPlan::noop(Command::SetRadius, document.id);
    }
    TransformPlan {
        command: Command::SetRadius,
        document_id: document.id,
        payload: Some(LocalPayload::RadiiChanged {
            document_id: document.id,
            layer_ids: layer_ids.clone(),
            radii: Radii::uniform(radius),
            coalesce,
        }),
        requests: vec![HostRequest::SetRadius { document_id: document.id, layer_ids, radius }],
        refresh: Vec::new(),
    }
}
