//! Structural edits applied to a decoded document.

use std::path::Path;

use serde_json::value::Value as JsonValue;

use crate::error::{Error, Result};
use crate::path::DotPath;
use crate::resolve::{self, is_iterable};
use crate::sparse;

/// One edit to apply to a document, either at a dot path or at the document root.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// Replace the addressed value.
    Set(JsonValue),
    /// Shallow-merge into the addressed array or object. Incoming string keys win and
    /// incoming integer keys are appended after the existing ones.
    Merge(JsonValue),
    /// Append to the addressed array or object.
    Push(JsonValue),
    /// Remove the last element of the addressed array or object.
    Pop,
    /// Remove the first element of the addressed array or object.
    Shift,
    /// Insert at the start of the addressed array or object.
    Unshift(JsonValue),
    /// Remove the key or index named by the last path segment from its parent.
    Unset { reindexed: bool },
}

/// What an applied [`Operation`] produced besides the edited document.
#[derive(Clone, Debug, PartialEq)]
pub enum Applied {
    /// The document itself is the result.
    Document,
    /// An element was taken out of the document (`null` when there was none).
    Removed(JsonValue),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Set(_) => "set",
            Operation::Merge(_) => "merge",
            Operation::Push(_) => "push",
            Operation::Pop => "pop",
            Operation::Shift => "shift",
            Operation::Unshift(_) => "unshift",
            Operation::Unset { .. } => "unset",
        }
    }

    /// Applies this operation to `root`.
    ///
    /// Without a `path` the operation acts on the root itself. Every operation other
    /// than a root `Set` needs the root to be an array or object and reports
    /// [`Error::NotIterableFile`] against `file` otherwise. Locations reached through a
    /// path are reported as [`Error::NotIterableElement`].
    pub fn apply(
        self,
        root: &mut JsonValue,
        path: Option<&DotPath>,
        file: &Path,
    ) -> Result<Applied> {
        let operation = self.name();

        if let Operation::Unset { reindexed } = self {
            return unset(root, path, reindexed, file).map(|()| Applied::Document);
        }

        let target = match (path, &self) {
            (None, Operation::Set(_)) => root,
            (None, _) => {
                resolve::ensure_iterable_root(root, file, operation)?;
                root
            }
            (Some(path), _) => resolve::resolve_mut(root, path, file, operation)?,
        };

        if !matches!(self, Operation::Set(_)) && !is_iterable(target) {
            return Err(not_iterable(path, file, operation));
        }

        match self {
            Operation::Set(content) => *target = content,
            Operation::Merge(content) => merge(target, content),
            Operation::Push(content) => push(target, content, path, file)?,
            Operation::Pop => return Ok(Applied::Removed(pop(target))),
            Operation::Shift => return Ok(Applied::Removed(shift(target))),
            Operation::Unshift(content) => unshift(target, content),
            Operation::Unset { .. } => {}
        }

        Ok(Applied::Document)
    }
}

fn not_iterable(path: Option<&DotPath>, file: &Path, operation: &'static str) -> Error {
    match path {
        Some(path) => Error::NotIterableElement {
            path: path.clone(),
            operation,
        },
        None => Error::NotIterableFile {
            path: file.to_path_buf(),
            operation,
        },
    }
}

fn merge(target: &mut JsonValue, content: JsonValue) {
    let incoming = match content {
        JsonValue::Object(map) => map,
        other => {
            let values = match other {
                JsonValue::Array(values) => values,
                JsonValue::Null => Vec::new(),
                scalar => vec![scalar],
            };
            if let JsonValue::Array(arr) = &mut *target {
                arr.extend(values);
                return;
            }
            sparse::sparsify(values)
        }
    };

    let current = match &mut *target {
        JsonValue::Array(arr) => sparse::sparsify(std::mem::take(arr)),
        JsonValue::Object(map) => std::mem::take(map),
        _ => return,
    };

    // Once every key is an integer the entries are numbered 0.. in order again.
    *target = match sparse::compact(sparse::merge(current, incoming)) {
        Ok(values) => JsonValue::Array(values),
        Err(map) => JsonValue::Object(map),
    };
}

fn push(
    target: &mut JsonValue,
    content: JsonValue,
    path: Option<&DotPath>,
    file: &Path,
) -> Result<()> {
    match target {
        JsonValue::Array(arr) => arr.push(content),
        JsonValue::Object(map) => {
            if sparse::append(map, content).is_err() {
                return Err(Error::IndexOverflow {
                    file: file.to_path_buf(),
                    path: path.cloned(),
                    operation: "push",
                });
            }
        }
        _ => {}
    }
    Ok(())
}

fn pop(target: &mut JsonValue) -> JsonValue {
    let removed = match target {
        JsonValue::Array(arr) => arr.pop(),
        JsonValue::Object(map) => match map.keys().next_back().cloned() {
            Some(key) => map.shift_remove(&key),
            None => None,
        },
        _ => None,
    };
    removed.unwrap_or(JsonValue::Null)
}

fn shift(target: &mut JsonValue) -> JsonValue {
    let removed = match target {
        JsonValue::Array(arr) if !arr.is_empty() => Some(arr.remove(0)),
        JsonValue::Object(map) => {
            let removed = match map.keys().next().cloned() {
                Some(key) => map.shift_remove(&key),
                None => None,
            };
            *map = sparse::renumber(std::mem::take(map), 0);
            removed
        }
        _ => None,
    };
    removed.unwrap_or(JsonValue::Null)
}

fn unshift(target: &mut JsonValue, content: JsonValue) {
    match target {
        JsonValue::Array(arr) => arr.insert(0, content),
        JsonValue::Object(map) => {
            let rest = sparse::renumber(std::mem::take(map), 1);
            map.insert("0".to_string(), content);
            map.extend(rest);
        }
        _ => {}
    }
}

fn unset(
    root: &mut JsonValue,
    path: Option<&DotPath>,
    reindexed: bool,
    file: &Path,
) -> Result<()> {
    let Some(path) = path else {
        resolve::ensure_iterable_root(root, file, "unset")?;
        if reindexed {
            reindex(root);
        }
        return Ok(());
    };

    let Some((parent, key)) = resolve::resolve_parent_mut(root, path, file, "unset")? else {
        return Ok(());
    };

    match parent {
        JsonValue::Object(map) => {
            map.shift_remove(key);
        }
        JsonValue::Array(arr) => match sparse::array_index(key) {
            Some(index) if index + 1 == arr.len() => {
                arr.pop();
            }
            Some(index) if index < arr.len() => {
                if reindexed {
                    arr.remove(index);
                } else {
                    let mut map = sparse::sparsify(std::mem::take(arr));
                    map.shift_remove(key);
                    *parent = JsonValue::Object(map);
                }
            }
            _ => {}
        },
        _ => {}
    }

    if reindexed {
        reindex(parent);
    }
    Ok(())
}

fn reindex(container: &mut JsonValue) {
    if let JsonValue::Object(map) = container {
        match sparse::compact(std::mem::take(map)) {
            Ok(values) => *container = JsonValue::Array(values),
            Err(unchanged) => *map = unchanged,
        }
    }
}
