//! Helpers for objects that stand in for sparse arrays.
//!
//! When an element is removed from the middle of an array without reindexing, or an
//! array is addressed with a key that is not a usable index, the array is turned into an
//! object keyed by the decimal form of each index. These helpers detect such integer
//! keys and keep them consistent when elements are added or removed.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::map::Map;
use serde_json::value::Value as JsonValue;

lazy_static! {
    static ref INTEGER_KEY: Regex = Regex::new(r"^(0|-?[1-9][0-9]*)$").unwrap();
}

/// Parses `key` as an integer key. Keys with leading zeros, a leading `+` or surrounding
/// whitespace are plain string keys.
pub fn integer_key(key: &str) -> Option<i64> {
    if !INTEGER_KEY.is_match(key) {
        return None;
    }
    key.parse::<i64>().ok()
}

/// Parses `key` as an array index.
pub fn array_index(key: &str) -> Option<usize> {
    integer_key(key).and_then(|i| usize::try_from(i).ok())
}

/// Converts an array into an object keyed by each element's index.
pub fn sparsify(arr: Vec<JsonValue>) -> Map<String, JsonValue> {
    arr.into_iter()
        .enumerate()
        .map(|(i, value)| (i.to_string(), value))
        .collect()
}

/// The key the next appended element receives: one past the largest integer key, or 0.
///
/// Returns `None` when the largest integer key is already `i64::MAX`.
pub fn next_index(map: &Map<String, JsonValue>) -> Option<i64> {
    match map.keys().filter_map(|key| integer_key(key)).max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

/// Appends `value` under the next integer key. Returns the value back if no integer key
/// is left, in which case `map` is untouched.
pub fn append(map: &mut Map<String, JsonValue>, value: JsonValue) -> Result<(), JsonValue> {
    match next_index(map) {
        Some(next) => {
            map.insert(next.to_string(), value);
            Ok(())
        }
        None => Err(value),
    }
}

/// Merges `incoming` into `map`. Integer keys on both sides are renumbered in order from
/// 0, so incoming integer keys always land after the existing ones. An incoming string
/// key replaces the existing value and keeps its position.
pub fn merge(
    map: Map<String, JsonValue>,
    incoming: Map<String, JsonValue>,
) -> Map<String, JsonValue> {
    let mut merged = renumber(map, 0);
    let mut next = merged.keys().filter(|key| integer_key(key).is_some()).count();
    for (key, value) in incoming {
        match integer_key(&key) {
            Some(_) => {
                merged.insert(next.to_string(), value);
                next += 1;
            }
            None => {
                merged.insert(key, value);
            }
        }
    }
    merged
}

/// Renumbers integer keys in order starting at `start`. String keys keep their name and
/// every entry keeps its position.
pub fn renumber(map: Map<String, JsonValue>, start: i64) -> Map<String, JsonValue> {
    let mut next = start;
    map.into_iter()
        .map(|(key, value)| match integer_key(&key) {
            Some(_) => {
                let key = next.to_string();
                next += 1;
                (key, value)
            }
            None => (key, value),
        })
        .collect()
}

/// Collapses an integer-keyed object into an array of its values, in entry order.
///
/// Returns the object unchanged as `Err` if it is empty or has any string key.
pub fn compact(map: Map<String, JsonValue>) -> Result<Vec<JsonValue>, Map<String, JsonValue>> {
    if map.is_empty() || !map.keys().all(|key| integer_key(key).is_some()) {
        return Err(map);
    }
    Ok(map.into_iter().map(|(_, value)| value).collect())
}
