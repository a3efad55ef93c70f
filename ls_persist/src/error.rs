// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `load_error` / `save_error` taxonomy (spec.md §6, §7).

/// The structured reason a load failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// The file could not be opened (missing, permissions, not a regular file).
    FileOpen,
    /// The file's size could not be determined, or it was empty.
    FileSize,
    /// The payload did not decompress as gzip.
    GzipDecompress,
    /// The payload was not valid Base64.
    Base64Decode,
    /// The decompressed payload was not valid JSON, or did not match the
    /// expected schema.
    JsonParse,
    /// The payload declared a `version` this crate does not know how to read.
    JsonVersion {
        /// Versions this crate can read.
        expected: Vec<u32>,
        /// The version the payload declared.
        actual: u32,
    },
}

/// A recoverable failure loading a circuit file, clipboard payload, or
/// settings file.
///
/// Unlike [`ls_circuit::InvariantViolation`]-style programmer errors,
/// callers are expected to catch this and restore the previously valid state
/// (spec.md §7 recovery policy) rather than propagate it further. `message`
/// is always a single, complete, human-readable sentence regardless of
/// `kind`, so a caller never has to match on `kind` just to log something
/// readable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LoadError {
    kind: LoadErrorKind,
    message: String,
}

impl LoadError {
    pub(crate) fn new(kind: LoadErrorKind, context: impl Into<String>) -> Self {
        let context = context.into();
        let message = match &kind {
            LoadErrorKind::JsonVersion { expected, actual } => {
                format!("{context}: expected one of {expected:?}, found version {actual}")
            }
            _ => context,
        };
        Self { kind, message }
    }

    /// The structured reason this load failed.
    #[must_use]
    pub fn kind(&self) -> &LoadErrorKind {
        &self.kind
    }
}

/// Why a save attempt failed. Surfaced as a boolean-like result (spec.md
/// §7: "surfaced as boolean return; GUI prompts user"), so this carries just
/// enough detail for a log line, not a recovery strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SaveError {
    message: String,
}

impl SaveError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_always_renders_one_sentence() {
        let err = LoadError::new(LoadErrorKind::FileOpen, "could not open circuit.ls2");
        assert_eq!(err.to_string(), "could not open circuit.ls2");
    }

    #[test]
    fn version_error_names_expected_and_actual() {
        let err = LoadError::new(
            LoadErrorKind::JsonVersion {
                expected: vec![100, 200],
                actual: 50,
            },
            "unsupported circuit file version",
        );
        let rendered = err.to_string();
        assert!(rendered.contains("100"));
        assert!(rendered.contains("200"));
        assert!(rendered.contains("50"));
    }
}
