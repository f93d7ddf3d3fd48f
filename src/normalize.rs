//! Property key normalization and paint/layout merging.
//!
//! Style documents spell property keys with dashes (`icon-allow-overlap`);
//! descriptors use the camel form (`iconAllowOverlap`). Both operations here
//! are pure and allocate a fresh map; inputs are never mutated.

use serde_json::{Map, Value};
use std::borrow::Cow;

const DASH: char = '-';

fn is_separator(c: char) -> bool {
    matches!(c, '-' | '_')
}

/// Convert a dash-separated property key to its camel form.
///
/// Keys without a dash come back unchanged (borrowed). Otherwise every run of
/// `-`/`_` that is directly followed by an ASCII letter is dropped and the
/// letter uppercased; all other characters keep their case. Separators not
/// followed by a letter (`line-1`, trailing `-`) are left in place, which
/// keeps the function idempotent.
pub fn normalize_key(key: &str) -> Cow<'_, str> {
    if !key.contains(DASH) {
        return Cow::Borrowed(key);
    }

    let mut out = String::with_capacity(key.len());
    let mut pending = String::new();
    for c in key.chars() {
        if is_separator(c) {
            pending.push(c);
            continue;
        }
        if !pending.is_empty() {
            if c.is_ascii_alphabetic() {
                out.push(c.to_ascii_uppercase());
                pending.clear();
                continue;
            }
            out.push_str(&pending);
            pending.clear();
        }
        out.push(c);
    }
    out.push_str(&pending);
    Cow::Owned(out)
}

/// Apply [`normalize_key`] to every key of `bag`.
///
/// Keys that collide after normalization resolve in input order: the later
/// value wins, stored at the position of the first colliding key.
pub fn normalize_bag(bag: &Map<String, Value>) -> Map<String, Value> {
    let mut normalized = Map::with_capacity(bag.len());
    for (key, value) in bag {
        normalized.insert(normalize_key(key).into_owned(), value.clone());
    }
    normalized
}

/// Merge a layer's paint and layout bags into one normalized style bag.
///
/// Every key from both bags is kept. A key present in both (after
/// normalization) takes the `layout` value.
pub fn merge_properties(
    paint: Option<&Map<String, Value>>,
    layout: Option<&Map<String, Value>>,
) -> Map<String, Value> {
    let mut style = paint.map(normalize_bag).unwrap_or_default();
    if let Some(layout) = layout {
        for (key, value) in normalize_bag(layout) {
            style.insert(key, value);
        }
    }
    style
}
