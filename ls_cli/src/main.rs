// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `logiksim`: a thin headless driver over the editable circuit engine.
//!
//! Not a GUI. Given a file, it loads the circuit and replays every persisted
//! element through [`ls_circuit::Modifier`]'s own insertion-mode state
//! machine (the same path a real load feature would use), then reports what
//! it built. Given no file, it exercises the same machinery on a small
//! built-in circuit.

use anyhow::Result;
use clap::Parser;
use ls_circuit::Modifier;
use ls_grid::{DisplayState, InsertionMode, LogicItemType, Orientation, TransitionHint};
use ls_layout::Layout;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;

/// Command-line arguments for the `logiksim` driver.
#[derive(Parser, Debug)]
#[command(name = "logiksim", version, about = "LogikSim editable circuit driver")]
struct Args {
    /// Optional circuit file to open at startup. If omitted, starts empty.
    path: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("logiksim.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "logiksim.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(_err) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Replays every `Normal`-state element of `source` through `modifier`'s
/// public mutation API, returning the counts inserted.
fn ingest_layout(modifier: &mut Modifier, source: &Layout) -> (usize, usize, usize) {
    let mut logic_items = 0;
    for id in source.logic_items().ids() {
        if source.logic_items().state(id) != DisplayState::Normal {
            continue;
        }
        let placed = source.logic_items().get(id).clone();
        let new_id = modifier.add_logic_item(placed.definition, placed.position, placed.orientation);
        if modifier
            .set_logic_item_insertion_mode(new_id, InsertionMode::InsertOrDiscard, TransitionHint::ExpectValid)
            .is_ok()
        {
            logic_items += 1;
        }
    }

    let mut decorations = 0;
    for id in source.decorations().ids() {
        if source.decorations().state(id) != DisplayState::Normal {
            continue;
        }
        let placed = source.decorations().get(id).clone();
        let new_id = modifier.add_decoration(placed.decoration_type, placed.position, placed.width, placed.height, placed.text);
        if modifier.set_decoration_insertion_mode(new_id, InsertionMode::InsertOrDiscard).is_ok() {
            decorations += 1;
        }
    }

    let mut wire_segments = 0;
    for wire_id in source.wires().wire_ids() {
        if source.wires().wire_state(wire_id) != DisplayState::Normal {
            continue;
        }
        let new_wire = modifier.create_wire();
        for segment in source.wires().segments(wire_id) {
            let geometry = source.wires().geometry(segment);
            modifier.add_wire_segment(new_wire, geometry.line, geometry.endpoints);
            wire_segments += 1;
        }
        modifier.set_wire_insertion_mode(new_wire, InsertionMode::InsertOrDiscard, TransitionHint::ExpectValid);
    }

    (logic_items, decorations, wire_segments)
}

/// Builds a tiny built-in circuit (one button) so the engine is exercised
/// even when no file is given.
fn demo_circuit(modifier: &mut Modifier) {
    let definition = ls_grid::LogicItemDefinition {
        logicitem_type: LogicItemType::Button,
        input_count: ls_grid::ConnectionCount::try_new(0).expect("0 is a valid connection count"),
        output_count: ls_grid::ConnectionCount::try_new(1).expect("1 is a valid connection count"),
        input_inverters: ls_grid::InverterBits::cleared(0),
        output_inverters: ls_grid::InverterBits::cleared(1),
        clock_attributes: None,
    };
    let id = modifier.add_logic_item(definition, ls_grid::Point::new(ls_grid::Grid::ZERO, ls_grid::Grid::ZERO), Orientation::Right);
    let _ = modifier.set_logic_item_insertion_mode(id, InsertionMode::InsertOrDiscard, TransitionHint::ExpectValid);
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    tracing::info!(target: "runtime", "startup");

    let args = Args::parse();
    let mut modifier = Modifier::new();

    if let Some(path) = args.path.as_ref() {
        match ls_persist::load(path) {
            Ok((layout, save_position, view_config, simulation_config)) => {
                let (logic_items, decorations, wire_segments) = ingest_layout(&mut modifier, &layout);
                tracing::info!(
                    target: "runtime.startup",
                    file = %path.display(),
                    logic_items,
                    decorations,
                    wire_segments,
                    save_x = save_position.x.value(),
                    save_y = save_position.y.value(),
                    device_scale = view_config.device_scale,
                    simulation_time_rate_ns = simulation_config.simulation_time_rate_ns,
                    "circuit_loaded"
                );
                println!(
                    "loaded {} ({logic_items} logic items, {decorations} decorations, {wire_segments} wire segments)",
                    path.display()
                );
            }
            Err(err) => {
                tracing::error!(target: "runtime.startup", file = %path.display(), %err, "circuit_load_failed");
                println!("could not load {}: {err}", path.display());
            }
        }
    } else {
        demo_circuit(&mut modifier);
        tracing::info!(target: "runtime.startup", "no file given, built demo circuit");
        println!("no file given; built a one-item demo circuit");
    }

    println!(
        "circuit: {} logic items, {} decorations, can_undo={}",
        modifier.layout().logic_items().len(),
        modifier.layout().decorations().len(),
        modifier.can_undo()
    );

    Ok(())
}
