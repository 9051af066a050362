use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use layerform::config::EngineConfig;
use layerform::dispatch::{Dispatcher, reconcile};
use layerform::doc::Document;
use layerform::engine::TransformEngine;
use layerform::error::TransformError;
use layerform::host::DryRunHost;
use layerform::input::Direction;
use layerform::payload::{AlignEdge, DistributeAxis, FlipAxis, TransformPlan};
use layerform::transform::{Position, SizeSpec, move_layers, resize_layers};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid document JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),
}

#[derive(Parser, Debug)]
#[command(name = "layerform", about = "Compute layer transform plans for a document")]
struct Cli {
    /// Document JSON. Commands act on its selected layers.
    document: PathBuf,

    /// Apply the plan to the document and print the result instead of the plan.
    #[arg(long)]
    apply: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Move each selected layer's top-left to (x, y).
    Move {
        #[arg(long, allow_hyphen_values = true)]
        x: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        y: Option<f64>,
    },
    /// Resize the selection, or the canvas when nothing is selected.
    Resize {
        #[arg(long)]
        w: Option<f64>,
        #[arg(long)]
        h: Option<f64>,
    },
    /// Swap the positions of the two selected layers.
    Swap,
    Align { edge: EdgeArg },
    Distribute { axis: AxisArg },
    Flip { axis: AxisArg },
    /// Rotate the selection about its center, in degrees.
    Rotate {
        #[arg(allow_hyphen_values = true)]
        angle: f64,
    },
    Nudge {
        direction: DirectionArg,
        /// Use the big step (Shift).
        #[arg(long)]
        big: bool,
    },
    /// Set a uniform corner radius on the selection.
    Radius { radius: f64 },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum EdgeArg {
    Left,
    Right,
    Top,
    Bottom,
    HCenter,
    VCenter,
}

impl From<EdgeArg> for AlignEdge {
    fn from(edge: EdgeArg) -> Self {
        match edge {
            EdgeArg::Left => Self::Left,
            EdgeArg::Right => Self::Right,
            EdgeArg::Top => Self::Top,
            EdgeArg::Bottom => Self::Bottom,
            EdgeArg::HCenter => Self::HCenter,
            EdgeArg::VCenter => Self::VCenter,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum AxisArg {
    Horizontal,
    Vertical,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum DirectionArg {
    Up,
    Down,
    Left,
    Right,
}

impl From<DirectionArg> for Direction {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Up => Self::Up,
            DirectionArg::Down => Self::Down,
            DirectionArg::Left => Self::Left,
            DirectionArg::Right => Self::Right,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let raw = std::fs::read_to_string(&cli.document)
        .map_err(|source| CliError::Read { path: cli.document.clone(), source })?;
    let mut document: Document = serde_json::from_str(&raw)?;
    let engine = TransformEngine::new(EngineConfig::from_env())?;

    let plan = build_plan(&engine, &document, cli.command)?;
    info!(command = plan.command.history_name(), requests = plan.requests.len(), "plan computed");

    if !cli.apply {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let dispatcher = Dispatcher::new(Arc::new(DryRunHost));
    if let Some(pending) = dispatcher.dispatch(&mut document, plan) {
        let confirmation = pending.wait().await;
        let changed = reconcile(&mut document, &confirmation);
        info!(changed, "host confirmation reconciled");
    }
    dispatcher.shutdown().await;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn build_plan(engine: &TransformEngine, document: &Document, command: Command) -> Result<TransformPlan, CliError> {
    let selected = document.selected();
    let plan = match command {
        Command::Move { x, y } => move_layers(document, &selected, Position { x, y }),
        Command::Resize { w, h } => resize_layers(document, &selected, SizeSpec { w, h }),
        Command::Swap => engine.swap_selected(document),
        Command::Align { edge } => engine.align_selected(document, edge.into())?,
        Command::Distribute { axis } => {
            let axis = match axis {
                AxisArg::Horizontal => DistributeAxis::Horizontally,
                AxisArg::Vertical => DistributeAxis::Vertically,
            };
            engine.distribute_selected(document, axis)?
        }
        Command::Flip { axis } => {
            let axis = match axis {
                AxisArg::Horizontal => FlipAxis::Horizontal,
                AxisArg::Vertical => FlipAxis::Vertical,
            };
            engine.flip_selected(document, axis)?
        }
        Command::Rotate { angle } => engine.rotate_selected(document, angle),
        Command::Nudge { direction, big } => engine.nudge(document, direction.into(), big),
        Command::Radius { radius } => engine.set_radius_selected(document, radius, false),
    };
    Ok(plan)
}
