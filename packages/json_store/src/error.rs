//! Error types for JSON file operations.

use std::io;
use std::path::PathBuf;

use crate::path::DotPath;

/// Errors returned by [`JsonFile`](crate::JsonFile) operations.
///
/// Every error is terminal for the operation that produced it. Nothing is retried and
/// nothing is written once an error is returned.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The file could not be opened or read.
    #[error("Could not read file {path:?}: {source}")]
    FileRead { path: PathBuf, source: io::Error },

    /// The file contents are not valid JSON, or do not fit the requested type.
    #[error("File {path:?} does not contain valid JSON: {source}")]
    JsonDecode {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The parent directory of the file was missing and could not be created.
    #[error("Could not create directory {path:?}: {source}")]
    DirectoryCreate { path: PathBuf, source: io::Error },

    /// The file could not be written.
    #[error("Could not write file {path:?}: {source}")]
    FileWrite { path: PathBuf, source: io::Error },

    /// The root value of the file is neither an array nor an object.
    #[error("The content of file {path:?} is not iterable, {operation} needs an array or object")]
    NotIterableFile {
        path: PathBuf,
        operation: &'static str,
    },

    /// The value at a dot path location is neither an array nor an object.
    #[error("The element at \"{path}\" is not iterable, {operation} needs an array or object")]
    NotIterableElement {
        path: DotPath,
        operation: &'static str,
    },

    /// An integer-keyed object already uses `i64::MAX` as a key, so there is no next key
    /// to append under.
    #[error(
        "No integer key is left to {operation} into in file {file:?}{}",
        .path.as_ref().map(|p| format!(" at \"{}\"", p)).unwrap_or_default()
    )]
    IndexOverflow {
        file: PathBuf,
        path: Option<DotPath>,
        operation: &'static str,
    },

    /// Caller supplied content could not be converted into a JSON value.
    #[error("Could not encode content as JSON: {source}")]
    Encode { source: serde_json::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
