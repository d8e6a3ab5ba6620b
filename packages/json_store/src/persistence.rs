//! Whole-file reads and writes of JSON documents.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::value::Value as JsonValue;

use crate::error::{Error, Result};
use crate::options::StoreOptions;

/// Reads the whole file at `file`.
pub fn read_bytes(file: &Path) -> Result<Vec<u8>> {
    log::debug!("Reading {}...", file.display());

    fs::read(file).map_err(|source| Error::FileRead {
        path: file.to_path_buf(),
        source,
    })
}

/// Decodes `bytes` read from `file` into a generic JSON value.
pub fn decode(file: &Path, bytes: &[u8]) -> Result<JsonValue> {
    decode_as(file, bytes)
}

/// Decodes `bytes` read from `file` straight into `T`.
pub fn decode_as<T: DeserializeOwned>(file: &Path, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| Error::JsonDecode {
        path: file.to_path_buf(),
        source,
    })
}

/// Reads and decodes the document stored at `file`.
pub fn read_document(file: &Path) -> Result<JsonValue> {
    let bytes = read_bytes(file)?;
    decode(file, &bytes)
}

/// Encodes `value` as pretty-printed JSON followed by a newline.
pub fn encode(value: &JsonValue, options: &StoreOptions) -> Result<Vec<u8>> {
    let indent = " ".repeat(options.indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|source| Error::Encode { source })?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Encodes `value` and replaces the contents of `file` with it, creating any missing
/// parent directories first.
pub fn write_document(file: &Path, value: &JsonValue, options: &StoreOptions) -> Result<()> {
    let bytes = encode(value, options)?;
    let directory = ensure_parent_directory(file)?;

    log::debug!("Writing {}...", file.display());

    if options.atomic_write {
        write_atomic(file, directory, &bytes)
    } else {
        fs::write(file, &bytes).map_err(|source| Error::FileWrite {
            path: file.to_path_buf(),
            source,
        })
    }
}

/// Creates the directory `file` lives in if it does not exist and returns it.
fn ensure_parent_directory(file: &Path) -> Result<&Path> {
    let directory = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !directory.is_dir() {
        log::debug!("Creating directory {}...", directory.display());
        fs::create_dir_all(directory).map_err(|source| Error::DirectoryCreate {
            path: directory.to_path_buf(),
            source,
        })?;
    }

    Ok(directory)
}

fn write_atomic(file: &Path, directory: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |source| Error::FileWrite {
        path: file.to_path_buf(),
        source,
    };

    let mut temp = tempfile::NamedTempFile::new_in(directory).map_err(write_error)?;
    temp.write_all(bytes).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;
    temp.persist(file)
        .map_err(|persist_error| write_error(persist_error.error))?;
    Ok(())
}
