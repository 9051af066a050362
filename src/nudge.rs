//! Keyboard nudge: small incremental moves of the current selection.

#[cfg(test)]
#[path = "nudge_test.rs"]
mod nudge_test;

use crate::consts::{BIG_NUDGE_STEP, NUDGE_STEP};
use crate::doc::Document;
use crate::input::Direction;
use crate::payload::{Command, LocalPayload, TransformPlan};
use crate::transform::{Position, push_move_actions};

/// Nudge distances, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NudgeSteps {
    pub small: f64,
    pub big: f64,
}

impl Default for NudgeSteps {
    fn default() -> Self {
        Self { small: NUDGE_STEP, big: BIG_NUDGE_STEP }
    }
}

/// Move every selected layer one step in `direction`.
///
/// Each selected layer is moved relative to its own current bounds, not as
/// part of a shared aggregate. Nothing moves when the selection is empty or
/// when any selected layer is locked.
#[must_use]
pub fn nudge(document: &Document, direction: Direction, big_step: bool, steps: NudgeSteps) -> TransformPlan {
    let selected = document.selected();
    if selected.is_empty() || selected.iter().any(|l| l.locked) {
        return TransformPlan::noop(Command::Nudge, document.id);
    }

    let distance = if big_step { steps.big } else { steps.small };
    let (ux, uy) = direction.unit();
    let (dx, dy) = (ux * distance, uy * distance);

    let mut positions = Vec::new();
    let mut requests = Vec::new();
    for layer in selected {
        let Some(current) = document.layers.child_bounds(layer) else {
            continue;
        };
        let position = Position::xy(current.left + dx, current.top + dy);
        push_move_actions(document, layer, position, &mut positions, &mut requests);
    }
    if requests.is_empty() {
        return TransformPlan::noop(Command::Nudge, document.id);
    }
    TransformPlan {
        command: Command::Nudge,
        document_id: document.id,
        payload: Some(LocalPayload::Reposition { document_id: document.id, positions }),
        requests,
        refresh: Vec::new(),
    }
}
