// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The GUI settings file (spec.md §6): plain prettified JSON, not the
//! gzip+Base64 container used for circuits. Loading follows the
//! discovery-then-parse pattern of `core_config::load_from`: an override
//! path takes precedence, otherwise a platform-conventional default
//! location is probed, a missing file yields defaults, and a malformed one
//! is a [`LoadError`].

use crate::error::{LoadError, LoadErrorKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The version this crate writes and expects on read.
pub const SETTINGS_VERSION: u32 = 200;

/// Worker thread pool size for the simulation backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadCount {
    /// Single-threaded simulation.
    Synchronous,
    /// Two worker threads.
    Two,
    /// Four worker threads.
    #[default]
    Four,
    /// Eight worker threads.
    Eight,
}

/// Rendering style for inserted wires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRenderStyle {
    /// Plain red wires.
    #[default]
    Red,
    /// Bold wires in the default color.
    Bold,
    /// Bold red wires.
    BoldRed,
}

/// The GUI settings file's contents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The settings schema version.
    pub version: u32,
    /// Simulation worker thread count.
    pub thread_count: ThreadCount,
    /// Wire rendering style.
    pub wire_render_style: WireRenderStyle,
    /// Whether direct (GPU) rendering is enabled.
    pub direct_rendering: bool,
    /// Whether JIT-compiled simulation is enabled.
    pub jit_rendering: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            thread_count: ThreadCount::default(),
            wire_render_style: WireRenderStyle::default(),
            direct_rendering: false,
            jit_rendering: false,
        }
    }
}

/// Best-effort settings file location following platform conventions.
#[must_use]
pub fn discover() -> PathBuf {
    let local = PathBuf::from("logiksim_settings.json");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("logiksim").join("settings.json");
    }
    local
}

/// Loads settings from `path`, or from [`discover`]'s result if `path` is
/// `None`. A missing file yields [`Settings::default`]; a present but
/// malformed file is an error.
///
/// # Errors
///
/// Returns [`LoadError`] if the file exists but fails to parse, or declares
/// an unsupported version.
pub fn load_from(path: Option<PathBuf>) -> Result<Settings, LoadError> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        tracing::info!(target: "persist", path = %path.display(), "no settings file found, using defaults");
        return Ok(Settings::default());
    };

    let settings: Settings =
        serde_json::from_str(&content).map_err(|err| LoadError::new(LoadErrorKind::JsonParse, format!("{} is not a valid settings file: {err}", path.display())))?;
    if settings.version != SETTINGS_VERSION {
        return Err(LoadError::new(
            LoadErrorKind::JsonVersion {
                expected: vec![SETTINGS_VERSION],
                actual: settings.version,
            },
            "unsupported settings file version",
        ));
    }
    Ok(settings)
}

/// Writes `settings` to `path` as prettified JSON.
///
/// # Errors
///
/// Returns [`crate::SaveError`] if the file cannot be written.
pub fn save_to(path: &Path, settings: &Settings) -> Result<(), crate::SaveError> {
    let json = serde_json::to_string_pretty(settings).expect("Settings always serializes");
    fs::write(path, json).map_err(|err| crate::SaveError::new(format!("could not write {}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_from(Some(PathBuf::from("__nonexistent_settings__.json"))).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            thread_count: ThreadCount::Eight,
            wire_render_style: WireRenderStyle::BoldRed,
            direct_rendering: true,
            jit_rendering: true,
            ..Settings::default()
        };

        save_to(&path, &settings).unwrap();
        let loaded = load_from(Some(path)).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn unsupported_version_is_a_json_version_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"version":100,"thread_count":"four","wire_render_style":"red","direct_rendering":false,"jit_rendering":false}"#).unwrap();

        let err = load_from(Some(path)).unwrap_err();
        assert_eq!(
            *err.kind(),
            LoadErrorKind::JsonVersion {
                expected: vec![SETTINGS_VERSION],
                actual: 100
            }
        );
    }
}
