//! Engine outputs: the optimistic local payload, host-protocol requests, and
//! the plan that bundles them.
//!
//! Every engine operation is a pure function returning a [`TransformPlan`].
//! The orchestrator applies `plan.payload` to the document store right away
//! and plays `plan.requests` against the host; the two are never coupled
//! through shared state.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::doc::{DocumentId, LayerId};

// =============================================================================
// LOCAL PAYLOAD
// =============================================================================

/// New top-left for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerPosition {
    pub layer_id: LayerId,
    pub x: f64,
    pub y: f64,
}

/// New size and top-left for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerSize {
    pub layer_id: LayerId,
    pub w: f64,
    pub h: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub top: f64,
    pub left: f64,
}

/// Corner radii of a rectangle shape, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Radii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl Radii {
    #[must_use]
    pub fn uniform(radius: f64) -> Self {
        Self { top_left: radius, top_right: radius, bottom_right: radius, bottom_left: radius }
    }
}

/// Geometry the document store applies optimistically, ahead of host
/// confirmation. One flavor per operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LocalPayload {
    #[serde(rename_all = "camelCase")]
    Reposition { document_id: DocumentId, positions: Vec<LayerPosition> },
    #[serde(rename_all = "camelCase")]
    Resize { document_id: DocumentId, sizes: Vec<LayerSize> },
    #[serde(rename_all = "camelCase")]
    ResizeDocument { document_id: DocumentId, size: Size },
    /// Live, uncommitted bounds broadcast during a resize drag.
    #[serde(rename_all = "camelCase")]
    DragBounds { document_id: DocumentId, layer_ids: Vec<LayerId>, size: Size, position: Origin },
    #[serde(rename_all = "camelCase")]
    RadiiChanged { document_id: DocumentId, layer_ids: Vec<LayerId>, radii: Radii, coalesce: bool },
}

impl LocalPayload {
    #[must_use]
    pub fn document_id(&self) -> DocumentId {
        match self {
            Self::Reposition { document_id, .. }
            | Self::Resize { document_id, .. }
            | Self::ResizeDocument { document_id, .. }
            | Self::DragBounds { document_id, .. }
            | Self::RadiiChanged { document_id, .. } => *document_id,
        }
    }
}

// =============================================================================
// HOST REQUESTS
// =============================================================================

/// Reference to the layer(s) a host request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "camelCase")]
pub enum LayerRef {
    /// A specific layer by id.
    #[serde(rename_all = "camelCase")]
    Id { document_id: DocumentId, layer_id: LayerId },
    /// Whatever the host currently has selected in the document.
    #[serde(rename_all = "camelCase")]
    Current { document_id: DocumentId },
}

impl LayerRef {
    #[must_use]
    pub fn id(document_id: DocumentId, layer_id: LayerId) -> Self {
        Self::Id { document_id, layer_id }
    }

    #[must_use]
    pub fn current(document_id: DocumentId) -> Self {
        Self::Current { document_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlignEdge {
    Left,
    Right,
    Top,
    Bottom,
    HCenter,
    VCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistributeAxis {
    Horizontally,
    Vertically,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

/// A declarative request for the host rendering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum HostRequest {
    Translate { target: LayerRef, dx: f64, dy: f64 },
    SetSize { target: LayerRef, w: f64, h: f64, anchored: bool, x: f64, y: f64 },
    /// Artboards are repositioned/resized as a unit to an explicit box.
    #[serde(rename_all = "camelCase")]
    TransformArtboard { target: LayerRef, bounding_box: Bounds },
    /// Canvas resize anchored at the top-left.
    #[serde(rename_all = "camelCase")]
    ResizeDocument { document_id: DocumentId, w: f64, h: f64 },
    Rotate { target: LayerRef, angle: f64 },
    Align { target: LayerRef, edge: AlignEdge },
    Distribute { target: LayerRef, axis: DistributeAxis },
    Flip { target: LayerRef, axis: FlipAxis },
    #[serde(rename_all = "camelCase")]
    SetRadius { document_id: DocumentId, layer_ids: Vec<LayerId>, radius: f64 },
}

// =============================================================================
// COMMANDS & RESOURCES
// =============================================================================

/// Shared state an entry point touches; used by an external scheduler to
/// serialize conflicting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    /// The authoritative document inside the host engine.
    HostDocument,
    /// The in-memory document model.
    LocalDocument,
    /// Application-level state such as the current document.
    Application,
}

const DOC_RESOURCES: &[Resource] = &[Resource::HostDocument, Resource::LocalDocument];
const CURRENT_DOC_READS: &[Resource] = &[Resource::HostDocument, Resource::LocalDocument, Resource::Application];

/// The engine entry point that produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    SetPosition,
    SetSize,
    SetBounds,
    SetDragBounds,
    SwapLayers,
    Align,
    Distribute,
    Flip,
    Rotate,
    Nudge,
    SetRadius,
}

impl Command {
    /// Name of the undo history state this command creates.
    #[must_use]
    pub fn history_name(self) -> &'static str {
        match self {
            Self::SetPosition => "Set Layer Position",
            Self::SetSize => "Set Layer Size",
            Self::SetBounds | Self::SetDragBounds => "Transform Layers",
            Self::SwapLayers => "Swap Layers",
            Self::Align => "Align Layers",
            Self::Distribute => "Distribute Layers",
            Self::Flip => "Flip Layers",
            Self::Rotate => "Rotate Layers",
            Self::Nudge => "Nudge Layers",
            Self::SetRadius => "Set Radius",
        }
    }

    /// Resources read by this command.
    #[must_use]
    pub fn reads(self) -> &'static [Resource] {
        match self {
            Self::Nudge => CURRENT_DOC_READS,
            _ => DOC_RESOURCES,
        }
    }

    /// Resources written by this command.
    #[must_use]
    pub fn writes(self) -> &'static [Resource] {
        DOC_RESOURCES
    }

    /// Whether two commands may not run concurrently.
    #[must_use]
    pub fn conflicts_with(self, other: Command) -> bool {
        let overlaps = |a: &[Resource], b: &[Resource]| a.iter().any(|r| b.contains(r));
        overlaps(self.writes(), other.reads())
            || overlaps(self.writes(), other.writes())
            || overlaps(self.reads(), other.writes())
    }
}

// =============================================================================
// PLAN
// =============================================================================

/// Result of one engine operation: what to apply locally, what to send to the
/// host, and which layers to refresh once the host confirms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformPlan {
    pub command: Command,
    pub document_id: DocumentId,
    pub payload: Option<LocalPayload>,
    pub requests: Vec<HostRequest>,
    /// Layers whose bounds must be re-read from the host after confirmation.
    pub refresh: Vec<LayerId>,
}

impl TransformPlan {
    /// A plan that does nothing; returned when preconditions are unmet.
    #[must_use]
    pub fn noop(command: Command, document_id: DocumentId) -> Self {
        Self { command, document_id, payload: None, requests: Vec::new(), refresh: Vec::new() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_none() && self.requests.is_empty()
    }
}
