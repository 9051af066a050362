//! Layer transform geometry for a layered image editor.
//!
//! Computes new bounds for hierarchical layers (groups, artboards, leaves) in
//! response to programmatic commands and interactive drag gestures, and turns
//! them into a [`payload::TransformPlan`]: an optimistic local payload plus
//! the requests the host rendering engine must play to make it real.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`bounds`] | Edge-based rectangles and derived geometry |
//! | [`doc`] | Layers, the flattened layer tree, and documents |
//! | [`input`] | Handle keys, buttons, modifiers, pointer ticks |
//! | [`hit`] | Overlay handle geometry and hit-testing |
//! | [`payload`] | Local payloads, host requests, commands, plans |
//! | [`transform`] | Move, resize, set-bounds, rotate, radius |
//! | [`arrange`] | Align, distribute, flip, swap |
//! | [`nudge`] | Keyboard nudging |
//! | [`session`] | Resize/rotate drag state machine |
//! | [`engine`] | Facade routing pointer events and selection commands |
//! | [`host`] | Async host adapter trait |
//! | [`dispatch`] | Optimistic apply and ordered host playback |
//! | [`config`] | Environment-driven tuning |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants |

pub mod arrange;
pub mod bounds;
pub mod config;
pub mod consts;
pub mod dispatch;
pub mod doc;
pub mod engine;
pub mod error;
pub mod hit;
pub mod host;
pub mod input;
pub mod nudge;
pub mod payload;
pub mod session;
pub mod transform;
