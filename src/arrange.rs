//! Relative placement: align, distribute, flip, and swap.
//!
//! Align, distribute and flip are computed by the host. The engine only
//! validates the selection and picks a representative layer reference: the
//! host requires a non-background layer even though it acts on the whole
//! selection. Swap is computed locally from edge-proximity heuristics.

#[cfg(test)]
#[path = "arrange_test.rs"]
mod arrange_test;

use crate::bounds::Bounds;
use crate::consts::SWAP_SENSITIVITY;
use crate::doc::{Document, Layer};
use crate::error::TransformError;
use crate::payload::{AlignEdge, Command, DistributeAxis, FlipAxis, HostRequest, LayerRef, LocalPayload, TransformPlan};
use crate::transform::{Position, descendant_ids, push_move_actions};

// =============================================================================
// HOST-COMPUTED ARRANGEMENTS
// =============================================================================

/// First non-background layer in `layers`, as required by the host protocol.
fn representative<'a>(layers: &[&'a Layer], operation: &'static str) -> Result<&'a Layer, TransformError> {
    if layers.is_empty() {
        return Err(TransformError::invalid(operation, "expected at least one layer"));
    }
    layers
        .iter()
        .copied()
        .find(|l| !l.is_background && !l.is_group_end())
        .ok_or_else(|| TransformError::invalid(operation, "no valid non-background layer"))
}

fn host_plan(
    document: &Document,
    layers: &[&Layer],
    command: Command,
    operation: &'static str,
    request: impl FnOnce(LayerRef) -> HostRequest,
) -> Result<TransformPlan, TransformError> {
    let rep = representative(layers, operation)?;
    let participants: Vec<&Layer> = layers.iter().copied().filter(|l| !l.is_group_end()).collect();
    Ok(TransformPlan {
        command,
        document_id: document.id,
        payload: None,
        requests: vec![request(LayerRef::id(document.id, rep.id))],
        refresh: descendant_ids(document, &participants),
    })
}

/// Align `layers` to one of their shared edges or centers.
///
/// # Errors
///
/// Returns [`TransformError::InvalidInput`] when `layers` is empty or has no
/// non-background layer.
pub fn align(document: &Document, layers: &[&Layer], edge: AlignEdge) -> Result<TransformPlan, TransformError> {
    host_plan(document, layers, Command::Align, "align", |target| HostRequest::Align { target, edge })
}

/// Space `layers` evenly along `axis`.
///
/// # Errors
///
/// Same conditions as [`align`].
pub fn distribute(
    document: &Document,
    layers: &[&Layer],
    axis: DistributeAxis,
) -> Result<TransformPlan, TransformError> {
    host_plan(document, layers, Command::Distribute, "distribute", |target| HostRequest::Distribute {
        target,
        axis,
    })
}

/// Mirror `layers` across `axis`.
///
/// # Errors
///
/// Same conditions as [`align`].
pub fn flip(document: &Document, layers: &[&Layer], axis: FlipAxis) -> Result<TransformPlan, TransformError> {
    host_plan(document, layers, Command::Flip, "flip", |target| HostRequest::Flip { target, axis })
}

// =============================================================================
// SWAP
// =============================================================================

/// New top-left corners for two layers trading places.
///
/// The pair is classified against a threshold of `1 / sensitivity` of their
/// shared bounding box on each axis, checked in this order:
///
/// 1. left, right or horizontal centers are close: a vertical stack (a list),
///    so only the tops are exchanged.
/// 2. top, bottom or vertical centers are close: side by side, so each layer
///    is mirrored horizontally across the shared box and keeps its top.
/// 3. otherwise the top-left corners are exchanged outright.
#[must_use]
pub fn calculate_swap_locations(l1: &Bounds, l2: &Bounds, sensitivity: f64) -> [(f64, f64); 2] {
    let shared = l1.union(l2);
    let width_fraction = shared.width() / sensitivity;
    let height_fraction = shared.height() / sensitivity;

    let vertical_edge_close = (l1.left - l2.left).abs() < width_fraction
        || (l1.right - l2.right).abs() < width_fraction
        || (l1.x_center() - l2.x_center()).abs() < width_fraction;
    let horizontal_edge_close = (l1.top - l2.top).abs() < height_fraction
        || (l1.bottom - l2.bottom).abs() < height_fraction
        || (l1.y_center() - l2.y_center()).abs() < height_fraction;

    if vertical_edge_close {
        [(l1.left, l2.top), (l2.left, l1.top)]
    } else if horizontal_edge_close {
        let mirror = shared.left + shared.right;
        [(mirror - l1.right, l1.top), (mirror - l2.right, l2.top)]
    } else {
        [(l2.left, l2.top), (l1.left, l1.top)]
    }
}

/// Swap the positions of exactly two layers, using the default sensitivity.
///
/// # Errors
///
/// Returns [`TransformError::InvalidInput`] unless exactly two layers are given.
pub fn swap(document: &Document, layers: &[&Layer]) -> Result<TransformPlan, TransformError> {
    swap_with_sensitivity(document, layers, SWAP_SENSITIVITY)
}

/// [`swap`] with an explicit proximity sensitivity.
///
/// # Errors
///
/// Returns [`TransformError::InvalidInput`] unless exactly two layers are given.
pub fn swap_with_sensitivity(
    document: &Document,
    layers: &[&Layer],
    sensitivity: f64,
) -> Result<TransformPlan, TransformError> {
    let [first, second] = layers else {
        return Err(TransformError::invalid("swap", format!("expected two layers, got {}", layers.len())));
    };
    Ok(swap_pair(document, first, second, sensitivity))
}

fn swap_pair(document: &Document, first: &Layer, second: &Layer, sensitivity: f64) -> TransformPlan {
    if first.is_group_end() && second.is_group_end() {
        return TransformPlan::noop(Command::SwapLayers, document.id);
    }
    let (Some(b1), Some(b2)) = (document.layers.child_bounds(first), document.layers.child_bounds(second)) else {
        return TransformPlan::noop(Command::SwapLayers, document.id);
    };

    let [(x1, y1), (x2, y2)] = calculate_swap_locations(&b1, &b2, sensitivity);
    let mut positions = Vec::new();
    let mut requests = Vec::new();
    push_move_actions(document, first, Position::xy(x1, y1), &mut positions, &mut requests);
    push_move_actions(document, second, Position::xy(x2, y2), &mut positions, &mut requests);

    TransformPlan {
        command: Command::SwapLayers,
        document_id: document.id,
        payload: Some(LocalPayload::Reposition { document_id: document.id, positions }),
        requests,
        refresh: Vec::new(),
    }
}

/// Swap the document's two selected layers; anything but a pair is a no-op.
#[must_use]
pub fn swap_selected(document: &Document, sensitivity: f64) -> TransformPlan {
    let selected = document.selected();
    let [first, second] = selected.as_slice() else {
        return TransformPlan::noop(Command::SwapLayers, document.id);
    };
    swap_pair(document, first, second, sensitivity)
}
