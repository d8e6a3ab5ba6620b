//! Locating values inside a decoded document by dot path.

use std::path::Path;

use serde_json::map::Map;
use serde_json::value::Value as JsonValue;

use crate::error::{Error, Result};
use crate::path::DotPath;
use crate::sparse;

/// True for the values a path can descend into: arrays and objects.
pub fn is_iterable(value: &JsonValue) -> bool {
    matches!(value, JsonValue::Array(_) | JsonValue::Object(_))
}

/// Fails with [`Error::NotIterableFile`] unless the document root is an array or object.
pub fn ensure_iterable_root(
    root: &JsonValue,
    file: &Path,
    operation: &'static str,
) -> Result<()> {
    if is_iterable(root) {
        return Ok(());
    }
    Err(Error::NotIterableFile {
        path: file.to_path_buf(),
        operation,
    })
}

/// Walks `path` from `tree`, creating whatever is missing, and returns the addressed
/// location.
///
/// Missing intermediate segments become empty objects and a missing final segment
/// becomes `null`, so the caller always gets a location to act on. An existing value on
/// the way that is not an array or object stops the walk with
/// [`Error::NotIterableElement`] naming the path up to that value.
pub fn resolve_mut<'tree>(
    tree: &'tree mut JsonValue,
    path: &DotPath,
    file: &Path,
    operation: &'static str,
) -> Result<&'tree mut JsonValue> {
    ensure_iterable_root(tree, file, operation)?;

    let last = path.len().saturating_sub(1);
    let mut cursor: &mut JsonValue = tree;
    for (i, segment) in path.iter().enumerate() {
        let fill = if i == last {
            JsonValue::Null
        } else {
            JsonValue::Object(Map::new())
        };

        cursor = child_or_insert(cursor, segment, fill).ok_or_else(|| {
            Error::NotIterableElement {
                path: path.prefix(i),
                operation,
            }
        })?;

        if i < last && !is_iterable(cursor) {
            return Err(Error::NotIterableElement {
                path: path.prefix(i + 1),
                operation,
            });
        }
    }

    Ok(cursor)
}

/// Walks all but the final segment of `path` and returns the container holding it,
/// together with that final segment.
///
/// Nothing is created: `Ok(None)` means some part of the prefix does not exist.
pub fn resolve_parent_mut<'tree, 'path>(
    tree: &'tree mut JsonValue,
    path: &'path DotPath,
    file: &Path,
    operation: &'static str,
) -> Result<Option<(&'tree mut JsonValue, &'path str)>> {
    ensure_iterable_root(tree, file, operation)?;

    let Some((last, prefix)) = path.split_last() else {
        return Ok(None);
    };

    let mut cursor: &mut JsonValue = tree;
    for (i, segment) in prefix.iter().enumerate() {
        let next = match cursor {
            JsonValue::Object(map) => map.get_mut(segment.as_str()),
            JsonValue::Array(arr) => match sparse::array_index(segment) {
                Some(index) => arr.get_mut(index),
                None => None,
            },
            _ => None,
        };

        let Some(next) = next else {
            return Ok(None);
        };
        cursor = next;

        if !is_iterable(cursor) {
            return Err(Error::NotIterableElement {
                path: path.prefix(i + 1),
                operation,
            });
        }
    }

    Ok(Some((cursor, last.as_str())))
}

/// Returns the child of `container` named by `segment`, inserting `fill` if absent.
///
/// Object children are looked up by key. Array children are looked up by index, where
/// the index one past the end appends a new slot. Any other segment turns the array into
/// an integer-keyed object first and is then applied as a key. Returns `None` if
/// `container` is not an array or object.
fn child_or_insert<'tree>(
    container: &'tree mut JsonValue,
    segment: &str,
    fill: JsonValue,
) -> Option<&'tree mut JsonValue> {
    if let JsonValue::Array(arr) = &mut *container {
        let addressable = sparse::array_index(segment).is_some_and(|index| index <= arr.len());
        if !addressable {
            let arr = std::mem::take(arr);
            *container = JsonValue::Object(sparse::sparsify(arr));
        }
    }

    match container {
        JsonValue::Object(map) => Some(map.entry(segment.to_owned()).or_insert(fill)),
        JsonValue::Array(arr) => {
            let index = sparse::array_index(segment)?;
            if index == arr.len() {
                arr.push(fill);
            }
            arr.get_mut(index)
        }
        JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file() -> &'static Path {
        Path::new("/data/store.json")
    }

    #[test]
    fn resolves_existing_nested_value() {
        let mut tree = json!({"a": {"b": {"c": 1}}});
        let found = resolve_mut(&mut tree, &DotPath::parse("a.b.c"), file(), "set").unwrap();
        assert_eq!(found, &json!(1));
    }

    #[test]
    fn creates_missing_segments() {
        let mut tree = json!({});
        let found = resolve_mut(&mut tree, &DotPath::parse("a.b.c"), file(), "set").unwrap();
        assert_eq!(found, &JsonValue::Null);
        *found = json!("x");
        assert_eq!(tree, json!({"a": {"b": {"c": "x"}}}));
    }

    #[test]
    fn numeric_segments_index_arrays() {
        let mut tree = json!({"list": [{"id": 1}, {"id": 2}]});
        let found = resolve_mut(&mut tree, &DotPath::parse("list.1.id"), file(), "set").unwrap();
        assert_eq!(found, &json!(2));
    }

    #[test]
    fn index_one_past_the_end_appends() {
        let mut tree = json!({"list": [1]});
        let found = resolve_mut(&mut tree, &DotPath::parse("list.1"), file(), "set").unwrap();
        *found = json!(2);
        assert_eq!(tree, json!({"list": [1, 2]}));
    }

    #[test]
    fn non_index_segment_turns_array_into_object() {
        let mut tree = json!({"list": ["a"]});
        let found = resolve_mut(&mut tree, &DotPath::parse("list.name"), file(), "set").unwrap();
        *found = json!("b");
        assert_eq!(tree, json!({"list": {"0": "a", "name": "b"}}));
    }

    #[test]
    fn numeric_segment_is_a_key_on_objects() {
        let mut tree = json!({"0": {"1": "x"}});
        let found = resolve_mut(&mut tree, &DotPath::parse("0.1"), file(), "set").unwrap();
        assert_eq!(found, &json!("x"));
    }

    #[test]
    fn empty_segments_are_keys() {
        let mut tree = json!({});
        let found = resolve_mut(&mut tree, &DotPath::parse("a..b"), file(), "set").unwrap();
        *found = json!(true);
        assert_eq!(tree, json!({"a": {"": {"b": true}}}));
    }

    #[test]
    fn scalar_root_is_a_file_error() {
        let mut tree = json!(5);
        let err = resolve_mut(&mut tree, &DotPath::parse("a"), file(), "push").unwrap_err();
        match err {
            Error::NotIterableFile { path, operation } => {
                assert_eq!(path, file());
                assert_eq!(operation, "push");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn scalar_on_the_way_is_an_element_error() {
        let mut tree = json!({"a": {"b": 5}});
        let err = resolve_mut(&mut tree, &DotPath::parse("a.b.c.d"), file(), "set").unwrap_err();
        match err {
            Error::NotIterableElement { path, .. } => assert_eq!(format!("{}", path), "a.b"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn existing_null_on_the_way_is_an_element_error() {
        let mut tree = json!({"a": null});
        let err = resolve_mut(&mut tree, &DotPath::parse("a.b"), file(), "set").unwrap_err();
        assert!(matches!(err, Error::NotIterableElement { .. }));
    }

    #[test]
    fn parent_of_nested_key() {
        let mut tree = json!({"a": {"b": 1, "c": 2}});
        let path = DotPath::parse("a.b");
        let (parent, key) = resolve_parent_mut(&mut tree, &path, file(), "unset")
            .unwrap()
            .unwrap();
        assert_eq!(parent, &json!({"b": 1, "c": 2}));
        assert_eq!(key, "b");
    }

    #[test]
    fn parent_of_top_level_key_is_root() {
        let mut tree = json!({"a": 1});
        let path = DotPath::parse("a");
        let (parent, key) = resolve_parent_mut(&mut tree, &path, file(), "unset")
            .unwrap()
            .unwrap();
        assert_eq!(parent, &json!({"a": 1}));
        assert_eq!(key, "a");
    }

    #[test]
    fn parent_lookup_creates_nothing() {
        let mut tree = json!({"a": {}});
        let path = DotPath::parse("a.x.y");
        assert!(resolve_parent_mut(&mut tree, &path, file(), "unset")
            .unwrap()
            .is_none());
        assert_eq!(tree, json!({"a": {}}));
    }

    #[test]
    fn scalar_parent_is_an_element_error() {
        let mut tree = json!({"a": "text"});
        let path = DotPath::parse("a.b");
        let err = resolve_parent_mut(&mut tree, &path, file(), "unset").unwrap_err();
        match err {
            Error::NotIterableElement { path, operation } => {
                assert_eq!(format!("{}", path), "a");
                assert_eq!(operation, "unset");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
