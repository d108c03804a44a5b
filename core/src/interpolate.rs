//! URL template interpolation.
//!
//! # Design
//! A template such as `/users/:userId(/posts/:postId)` is resolved against an
//! ordered list of key/value collections. Every label pops the first matching
//! key out of the collections, so whatever remains afterwards can be sent as
//! query parameters or a request body without re-filtering. Parentheses and
//! pipes only document optional label paths for a human reader and are
//! stripped before any label is resolved.
//!
//! Collections are taken as `&mut` borrows: the removal of consumed keys is
//! part of the contract, not an implementation detail.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::types::Params;

static DECORATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*|\s*\)|\s*\|\s*").expect("decoration pattern"));

static LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([A-Za-z][A-Za-z0-9_]*)").expect("label pattern"));

// The leading `[^:]` keeps the `//` of `http://` intact.
static REPEATED_SLASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[^:])/{2,}").expect("slash pattern"));

static TRAILING_SLASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/+$").expect("trailing slash pattern"));

/// Resolve every label in `template` against `collections`, highest
/// precedence first, removing each consumed key from the collection that
/// supplied it.
///
/// Labels without a matching key resolve to the empty string. The result is
/// free of decoration, of repeated slashes (except after a `:`) and of
/// trailing slashes. This function never fails.
pub fn interpolate_url(template: &str, collections: &mut [&mut Params]) -> String {
    let stripped = strip_decoration(template);

    let resolved = LABEL.replace_all(&stripped, |caps: &Captures| {
        let label = &caps[1];
        match pop_first_key(collections, label) {
            Some(value) => {
                tracing::trace!(label, %value, "consumed label");
                value_to_segment(&value)
            }
            None => {
                tracing::trace!(label, "label has no value");
                String::new()
            }
        }
    });

    let url = clean_url(&resolved);
    tracing::debug!(template, url = %url, "interpolated url");
    url
}

/// Remove the readability-only `(`, `)` and `|` decoration, together with
/// the whitespace that hugs it.
pub fn strip_decoration(template: &str) -> String {
    DECORATION.replace_all(template, "").into_owned()
}

/// Collapse repeated slashes and drop trailing ones.
///
/// Applying this twice gives the same result as applying it once.
pub fn clean_url(url: &str) -> String {
    let collapsed = REPEATED_SLASHES.replace_all(url, "${1}/");
    TRAILING_SLASHES.replace(&collapsed, "").into_owned()
}

/// Pop `key` from the first collection that owns it.
///
/// Collections further down the list keep their copy of the key untouched.
pub fn pop_first_key(collections: &mut [&mut Params], key: &str) -> Option<Value> {
    collections
        .iter_mut()
        .find(|collection| collection.contains_key(key))
        .and_then(|collection| pop_key(collection, key))
}

/// Remove `key` from `collection` and return its value.
pub fn pop_key(collection: &mut Params, key: &str) -> Option<Value> {
    collection.remove(key)
}

/// String form of a value substituted into a URL.
///
/// Strings are used verbatim (no JSON quoting), `null` becomes empty, arrays
/// are joined with commas and objects fall back to compact JSON.
pub fn value_to_segment(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_segment)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}
