//! Deserializer: JSON text / tree → host value.
//!
//! | JSON | host |
//! |---|---|
//! | `null`, `false` | `nil` |
//! | `true` | `t` |
//! | integral number | integer |
//! | other number | float |
//! | string | string |
//! | array | vector |
//! | object | alist (or hash table, see [`ObjectType`]) |
//!
//! The number rule is a heuristic: `2.0` comes back as the integer `2`.
//! `false` and `null` both become `nil`, so they cannot be told apart
//! afterwards.

use serde_json::Number;
use tracing::debug;

use crate::error::Result;
use crate::json::{parse_text_with, JsonValue};
use crate::options::{descend, ObjectType, ParseOptions};
use crate::value::HostValue;

/// Parse JSON text into a host value, returning `nil` on any failure.
///
/// This is the host-facing behaviour of `parson-parse`: malformed input and
/// the literal `null` are indistinguishable. Use [`try_parse`] to tell them
/// apart.
///
/// ```
/// use parson_core::{parse, HostValue};
/// assert_eq!(parse("[1, 2.5]"), HostValue::vector([HostValue::Integer(1), HostValue::Float(2.5)]));
/// assert_eq!(parse("{bad"), HostValue::Nil);
/// ```
pub fn parse(text: &str) -> HostValue {
    match try_parse(text) {
        Ok(value) => value,
        Err(err) => {
            debug!(%err, "parse failed, returning nil");
            HostValue::Nil
        }
    }
}

/// Parse JSON text into a host value with default options, reporting
/// malformed input as an error.
pub fn try_parse(text: &str) -> Result<HostValue> {
    parse_with(text, &ParseOptions::default())
}

/// Parse JSON text into a host value.
pub fn parse_with(text: &str, opts: &ParseOptions) -> Result<HostValue> {
    let tree = parse_text_with(text, opts.max_depth)?;
    let value = deserialize_with(&tree, opts)?;
    debug!(
        input_len = text.len(),
        kind = value.type_name(),
        "parsed JSON text"
    );
    Ok(value)
}

/// Convert a parsed tree into a host value with default options.
pub fn deserialize(tree: &JsonValue) -> Result<HostValue> {
    deserialize_with(tree, &ParseOptions::default())
}

/// Convert a parsed tree into a host value.
///
/// Every JSON value has a host counterpart; the only failure is nesting
/// deeper than [`ParseOptions::max_depth`].
pub fn deserialize_with(tree: &JsonValue, opts: &ParseOptions) -> Result<HostValue> {
    to_host(tree, opts, 0)
}

fn to_host(tree: &JsonValue, opts: &ParseOptions, depth: usize) -> Result<HostValue> {
    let value = match tree {
        JsonValue::Null | JsonValue::Bool(false) => HostValue::Nil,
        JsonValue::Bool(true) => HostValue::True,
        JsonValue::Number(n) => number_to_host(n),
        JsonValue::String(s) => HostValue::String(s.clone()),
        JsonValue::Array(items) => {
            let depth = descend(depth, opts.max_depth)?;
            let items = items
                .iter()
                .map(|item| to_host(item, opts, depth))
                .collect::<Result<Vec<_>>>()?;
            HostValue::Vector(items)
        }
        JsonValue::Object(members) => {
            let depth = descend(depth, opts.max_depth)?;
            let pairs = members
                .iter()
                .map(|(name, val)| Ok((name.clone(), to_host(val, opts, depth)?)))
                .collect::<Result<Vec<_>>>()?;
            match opts.object_type {
                ObjectType::Alist => HostValue::alist(pairs),
                ObjectType::HashTable => HostValue::Map(
                    pairs
                        .into_iter()
                        .map(|(name, val)| (HostValue::String(name), val))
                        .collect(),
                ),
            }
        }
    };
    Ok(value)
}

/// Integer literals within `i64` are taken exactly; everything else goes
/// through the double view.
fn number_to_host(n: &Number) -> HostValue {
    if let Some(i) = n.as_i64() {
        return HostValue::Integer(i);
    }
    // Without `arbitrary_precision` every Number has an f64 view.
    float_to_host(n.as_f64().unwrap_or(f64::NAN))
}

/// `2^63`, the first double past `i64::MAX`.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// A double becomes an integer iff it equals its own floor and fits in
/// `i64`; integral values outside that range stay floats.
fn float_to_host(f: f64) -> HostValue {
    if f.floor() == f && (-I64_UPPER..I64_UPPER).contains(&f) {
        HostValue::Integer(f as i64)
    } else {
        HostValue::Float(f)
    }
}
