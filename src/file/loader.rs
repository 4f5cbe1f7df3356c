//! JSON file loading functionality.
//!
//! This module provides functions to load JSON documents from files or stdin,
//! decoding them into `JsonValue` trees ready for path lookups. Gzip input is
//! decompressed transparently.

use crate::document::node::JsonValue;
use crate::document::parser::decode_reader;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs;
use std::io::Read;
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and decodes a JSON file from the filesystem.
///
/// The file is treated as gzip when its extension is `.gz` or its content
/// starts with the gzip magic bytes.
///
/// # Examples
///
/// ```no_run
/// use jsonpick::file::loader::load_json_file;
///
/// let root = load_json_file("config.json").unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - The file is gzipped but corrupted
/// - The contents are not valid JSON
pub fn load_json_file<P: AsRef<Path>>(path: P) -> Result<JsonValue> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let bytes = fs::read(path_ref)
        .with_context(|| format!("Failed to read file {}", path_ref.display()))?;

    let content = if is_gzipped || bytes.starts_with(&GZIP_MAGIC) {
        log::debug!("decompressing gzipped input {}", path_ref.display());
        decompress_gzip_bytes(&bytes)
            .context("Failed to decompress gzipped file - file may be corrupted")?
    } else {
        bytes
    };

    decode_reader(content.as_slice()).context("Failed to parse JSON")
}

/// Loads and decodes JSON from standard input.
///
/// Gzipped input is detected by its magic bytes.
///
/// # Errors
///
/// This function will return an error if:
/// - Reading from stdin fails
/// - The input contents are not valid JSON
pub fn load_json_from_stdin() -> Result<JsonValue> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = if buffer.starts_with(&GZIP_MAGIC) {
        log::debug!("decompressing gzipped stdin");
        decompress_gzip_bytes(&buffer).context("Failed to decompress gzipped stdin")?
    } else {
        buffer
    };

    decode_reader(content.as_slice()).context("Failed to parse JSON from stdin")
}

fn decompress_gzip_bytes(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut content = Vec::new();
    decoder.read_to_end(&mut content)?;
    Ok(content)
}
