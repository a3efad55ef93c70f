// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! LogikSim Persist: the `.ls2` circuit file format, the GUI settings file,
//! and the clipboard payload codec (spec.md §6).
//!
//! None of these types reach into `ls_index` or `ls_circuit` — they only
//! round-trip `ls_layout::Layout`, the same boundary `ls_layout` itself
//! keeps towards its observers.

mod circuit_file;
mod clipboard;
mod codec;
mod error;
mod settings;

pub use circuit_file::{load, save, CircuitFile, SimulationConfig, ViewConfig, CURRENT_VERSION, SUPPORTED_VERSIONS};
pub use clipboard::{copy as copy_to_clipboard, paste as paste_from_clipboard};
pub use error::{LoadError, LoadErrorKind, SaveError};
pub use settings::{discover as discover_settings, load_from as load_settings, save_to as save_settings, Settings, ThreadCount, WireRenderStyle, SETTINGS_VERSION};
