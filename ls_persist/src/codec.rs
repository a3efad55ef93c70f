// Copyright 2025 the LogikSim Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The JSON → gzip → Base64 container shared by circuit files and clipboard
//! payloads (spec.md §6).

use crate::error::{LoadError, LoadErrorKind};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::io::{Read, Write};

/// Serializes `value` to JSON, gzip-compresses it, and Base64-encodes the
/// result, matching the original's `serialize_inserted` + `base64_encode`
/// pipeline.
pub(crate) fn encode<T: serde::Serialize>(value: &T) -> String {
    let json = serde_json::to_vec(value).expect("DTO types always serialize");
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&json).expect("writing to an in-memory buffer cannot fail");
    let compressed = encoder.finish().expect("flushing an in-memory buffer cannot fail");
    BASE64.encode(compressed)
}

/// Reverses [`encode`], returning a structured [`LoadError`] at whichever
/// stage fails first.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(payload: &str) -> Result<T, LoadError> {
    let compressed = BASE64
        .decode(payload.trim())
        .map_err(|err| LoadError::new(LoadErrorKind::Base64Decode, format!("payload is not valid base64: {err}")))?;

    let mut decoder = flate2::read::GzDecoder::new(compressed.as_slice());
    let mut json = Vec::new();
    decoder
        .read_to_end(&mut json)
        .map_err(|err| LoadError::new(LoadErrorKind::GzipDecompress, format!("payload did not decompress as gzip: {err}")))?;

    serde_json::from_slice(&json).map_err(|err| LoadError::new(LoadErrorKind::JsonParse, format!("payload is not valid JSON: {err}")))
}
