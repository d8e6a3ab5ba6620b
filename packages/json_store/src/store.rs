//! The file-backed document handle.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::value::Value as JsonValue;

use crate::error::{Error, Result};
use crate::mutation::{Applied, Operation};
use crate::options::StoreOptions;
use crate::path::DotPath;
use crate::persistence;

/// A JSON document stored in a single file.
///
/// `JsonFile` holds nothing but the file path and its options. Every operation reads
/// the whole file, decodes it, applies its change and writes the whole file back, so
/// no state is carried between calls and no file handle outlives a call. Two writers
/// on the same file can lose each other's updates.
///
/// Paths are given in dot notation, e.g. `"users.0.name"`. Passing `None` as the path
/// makes the operation act on the whole document.
///
/// # Example
///
/// ```rust
/// use dotjson_store::JsonFile;
/// use serde_json::json;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = JsonFile::new(dir.path().join("config").join("app.json"));
///
/// store.set(json!({"servers": []}), None).unwrap();
/// store.push(json!({"host": "a.example"}), Some("servers")).unwrap();
/// store.set("b.example", Some("servers.1.host")).unwrap();
///
/// let removed = store.shift(Some("servers")).unwrap();
/// assert_eq!(removed, json!({"host": "a.example"}));
/// assert_eq!(store.get().unwrap(), json!({"servers": [{"host": "b.example"}]}));
/// ```
#[derive(Clone, Debug)]
pub struct JsonFile {
    path: PathBuf,
    options: StoreOptions,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> JsonFile {
        JsonFile::with_options(path, StoreOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> JsonFile {
        JsonFile {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Whether the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// The decoded contents of the file.
    pub fn get(&self) -> Result<JsonValue> {
        persistence::read_document(&self.path)
    }

    /// The contents of the file decoded straight into `T`.
    ///
    /// Fails with [`Error::JsonDecode`] if the file is not valid JSON or does not have
    /// the shape of `T`.
    pub fn get_as<T: DeserializeOwned>(&self) -> Result<T> {
        let bytes = persistence::read_bytes(&self.path)?;
        persistence::decode_as(&self.path, &bytes)
    }

    /// Replaces the value at `dot`, or the whole document when `dot` is `None`.
    ///
    /// Replacing the whole document never reads the file, so it also creates a missing
    /// file along with its missing parent directories. Setting a path reads the file
    /// first and creates any missing segments of the path. A file whose root is a
    /// scalar or `null` then fails with [`Error::NotIterableFile`], whatever the path.
    pub fn set<C: Serialize>(&self, content: C, dot: Option<&str>) -> Result<JsonValue> {
        let content = to_json(content)?;
        match dot {
            None => self.save(content),
            Some(dot) => self.modify(Operation::Set(content), Some(dot)),
        }
    }

    /// Shallow-merges `content` into the array or object at `dot`.
    ///
    /// String keys in `content` replace existing ones. Integer keys and array elements
    /// are appended after the existing integer keys, which are renumbered from 0.
    /// The file's root must be an array or object even when `dot` points further in.
    pub fn merge<C: Serialize>(&self, content: C, dot: Option<&str>) -> Result<JsonValue> {
        self.modify(Operation::Merge(to_json(content)?), dot)
    }

    /// Removes and returns the last element at `dot`, or `null` if it is empty.
    pub fn pop(&self, dot: Option<&str>) -> Result<JsonValue> {
        self.take(Operation::Pop, dot)
    }

    /// Appends `content` to the array or object at `dot`.
    ///
    /// An object receives the key after its largest integer key. Fails with
    /// [`Error::IndexOverflow`] if that key would not fit in an `i64`.
    pub fn push<C: Serialize>(&self, content: C, dot: Option<&str>) -> Result<JsonValue> {
        self.modify(Operation::Push(to_json(content)?), dot)
    }

    /// Removes and returns the first element at `dot`, or `null` if it is empty.
    pub fn shift(&self, dot: Option<&str>) -> Result<JsonValue> {
        self.take(Operation::Shift, dot)
    }

    /// Inserts `content` at the start of the array or object at `dot`.
    pub fn unshift<C: Serialize>(&self, content: C, dot: Option<&str>) -> Result<JsonValue> {
        self.modify(Operation::Unshift(to_json(content)?), dot)
    }

    /// Removes the key or index named by the last segment of `dot`.
    ///
    /// Removing from the middle of an array keeps the remaining indices as object keys
    /// unless `reindexed` is set, in which case they are compacted back into an array.
    pub fn unset(&self, dot: &str, reindexed: bool) -> Result<JsonValue> {
        self.modify(Operation::Unset { reindexed }, Some(dot))
    }

    fn modify(&self, operation: Operation, dot: Option<&str>) -> Result<JsonValue> {
        let (document, _) = self.apply(operation, dot)?;
        Ok(document)
    }

    fn take(&self, operation: Operation, dot: Option<&str>) -> Result<JsonValue> {
        match self.apply(operation, dot)? {
            (_, Applied::Removed(value)) => Ok(value),
            (_, Applied::Document) => Ok(JsonValue::Null),
        }
    }

    fn apply(&self, operation: Operation, dot: Option<&str>) -> Result<(JsonValue, Applied)> {
        let mut document = self.get()?;
        let path = dot.map(DotPath::parse);

        log::debug!(
            "Applying {} at {:?} in {}",
            operation.name(),
            dot,
            self.path.display()
        );
        let applied = operation.apply(&mut document, path.as_ref(), &self.path)?;

        let document = self.save(document)?;
        Ok((document, applied))
    }

    fn save(&self, document: JsonValue) -> Result<JsonValue> {
        persistence::write_document(&self.path, &document, &self.options)?;
        Ok(document)
    }
}

fn to_json<C: Serialize>(content: C) -> Result<JsonValue> {
    serde_json::to_value(content).map_err(|source| Error::Encode { source })
}
