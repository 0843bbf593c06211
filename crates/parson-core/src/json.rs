//! The parsed JSON document tree.
//!
//! `serde_json` does the tokenizing and validation; this module only decides
//! what the tree looks like. `serde_json::Value` collapses duplicate object
//! members, so objects here are kept as a `Vec` of members built by a custom
//! `Visitor`, in source order and with every duplicate intact.
//!
//! Two things are relaxed or tightened compared to plain `serde_json`:
//!
//! - raw C0 control characters inside string literals are accepted, since
//!   the serializer writes them unescaped
//! - nesting is bounded by the caller's `max_depth` rather than by
//!   `serde_json`'s fixed limit

use std::borrow::Cow;
use std::cell::Cell;
use std::fmt;

use serde::de::{self, Deserialize, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Number;

use crate::error::{ParsonError, Result};
use crate::options::DEFAULT_MAX_DEPTH;

/// A JSON value as produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    /// Keeps the parser's integer/float distinction; see [`JsonValue::as_f64`]
    /// for the plain double view.
    Number(Number),
    String(String),
    Array(Vec<JsonValue>),
    /// Members in source order. Names are not unique.
    Object(Vec<(String, JsonValue)>),
}

/// The type tag of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

/// Parse JSON text into a [`JsonValue`] tree, nesting at most
/// [`DEFAULT_MAX_DEPTH`] containers.
///
/// Fails with [`ParsonError::Parse`] on malformed input, including trailing
/// characters after the document.
pub fn parse_text(text: &str) -> Result<JsonValue> {
    parse_text_with(text, DEFAULT_MAX_DEPTH)
}

/// Parse JSON text into a [`JsonValue`] tree, failing with
/// [`ParsonError::RecursionLimitExceeded`] once more than `max_depth` arrays
/// and objects are open.
///
/// ```
/// use parson_core::{parse_text_with, ParsonError};
/// assert!(parse_text_with("[[1]]", 2).is_ok());
/// assert!(matches!(
///     parse_text_with("[[1]]", 1),
///     Err(ParsonError::RecursionLimitExceeded { limit: 1 })
/// ));
/// ```
pub fn parse_text_with(text: &str, max_depth: usize) -> Result<JsonValue> {
    let text = escape_raw_controls(text);
    let exceeded = Cell::new(false);
    let seed = TreeSeed {
        depth: 0,
        limit: max_depth,
        exceeded: &exceeded,
    };

    let mut de = serde_json::Deserializer::from_str(&text);
    de.disable_recursion_limit();
    let parsed = seed
        .deserialize(&mut de)
        .and_then(|tree| de.end().map(|()| tree));

    match parsed {
        Ok(tree) => Ok(tree),
        Err(_) if exceeded.get() => Err(ParsonError::RecursionLimitExceeded { limit: max_depth }),
        Err(err) => Err(err.into()),
    }
}

/// Rewrite raw control characters inside string literals as `\u00XX`.
/// Characters outside strings are left alone so the tokenizer still rejects
/// them there.
fn escape_raw_controls(text: &str) -> Cow<'_, str> {
    if !text.bytes().any(|b| b < 0x20) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    let mut in_string = false;
    let mut after_backslash = false;
    for ch in text.chars() {
        if in_string {
            if after_backslash {
                after_backslash = false;
            } else if ch == '\\' {
                after_backslash = true;
            } else if ch == '"' {
                in_string = false;
            } else if ch < '\u{20}' {
                out.push_str(&format!("\\u{:04x}", u32::from(ch)));
                continue;
            }
        } else if ch == '"' {
            in_string = true;
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

impl JsonValue {
    pub fn kind(&self) -> JsonType {
        match self {
            JsonValue::Null => JsonType::Null,
            JsonValue::Bool(_) => JsonType::Bool,
            JsonValue::Number(_) => JsonType::Number,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Element count of an array or member count of an object; 0 otherwise.
    pub fn len(&self) -> usize {
        match self {
            JsonValue::Array(items) => items.len(),
            JsonValue::Object(members) => members.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `index`-th object member as `(name, value)`.
    pub fn member(&self, index: usize) -> Option<(&str, &JsonValue)> {
        match self {
            JsonValue::Object(members) => members.get(index).map(|(k, v)| (k.as_str(), v)),
            _ => None,
        }
    }

    /// The `index`-th array element.
    pub fn element(&self, index: usize) -> Option<&JsonValue> {
        match self {
            JsonValue::Array(items) => items.get(index),
            _ => None,
        }
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(n.into())
    }
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for JsonValue {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let exceeded = Cell::new(false);
        TreeSeed {
            depth: 0,
            limit: DEFAULT_MAX_DEPTH,
            exceeded: &exceeded,
        }
        .deserialize(deserializer)
    }
}

/// Builds one tree node with `depth` containers already open around it.
/// Sets `exceeded` when it refuses to open another one.
#[derive(Clone, Copy)]
struct TreeSeed<'a> {
    depth: usize,
    limit: usize,
    exceeded: &'a Cell<bool>,
}

impl TreeSeed<'_> {
    fn enter<E: de::Error>(self) -> std::result::Result<Self, E> {
        if self.depth >= self.limit {
            self.exceeded.set(true);
            return Err(E::custom(format_args!(
                "nesting exceeds the maximum depth of {}",
                self.limit
            )));
        }
        Ok(TreeSeed {
            depth: self.depth + 1,
            ..self
        })
    }
}

impl<'de> DeserializeSeed<'de> for TreeSeed<'_> {
    type Value = JsonValue;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<JsonValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for TreeSeed<'_> {
    type Value = JsonValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any valid JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Number(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> std::result::Result<JsonValue, E>
    where
        E: de::Error,
    {
        Number::from_f64(v)
            .map(JsonValue::Number)
            .ok_or_else(|| de::Error::custom("non-finite number"))
    }

    fn visit_str<E>(self, v: &str) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::String(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::String(v))
    }

    fn visit_unit<E>(self) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E>(self) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<JsonValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<JsonValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let child = self.enter()?;
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(child)? {
            items.push(item);
        }
        Ok(JsonValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<JsonValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let child = self.enter()?;
        let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(name) = map.next_key::<String>()? {
            let value = map.next_value_seed(child)?;
            members.push((name, value));
        }
        Ok(JsonValue::Object(members))
    }
}
