//! # parson-core
//!
//! Converts between Emacs-style host values and JSON, in both directions.
//!
//! - **stringify**: [`HostValue`] → JSON text. Hash tables become objects,
//!   vectors become arrays, `nil` is `null` and `t` is `true`.
//! - **parse**: JSON text → [`HostValue`]. Objects become association lists,
//!   arrays become vectors, integral numbers become integers.
//!
//! JSON tokenizing is done by `serde_json`; this crate owns the value
//! mapping, string escaping, output buffering and nesting limits.
//!
//! ## Quick start
//!
//! ```rust
//! use parson_core::{parse, stringify, HostValue};
//!
//! let value = HostValue::vector([HostValue::Integer(1), HostValue::string("two"), HostValue::Nil]);
//! let json = stringify(&value).unwrap();
//! assert_eq!(json, r#"[1,"two",null]"#);
//!
//! // JSON → host value (roundtrip)
//! assert_eq!(parse(&json), value);
//! ```
//!
//! ## Modules
//!
//! - [`serializer`]: host value → JSON text
//! - [`deserializer`]: JSON text / tree → host value
//! - [`json`]: parsed JSON tree (`JsonValue`) and text parsing
//! - [`value`]: `HostValue` model and its Lisp printed form
//! - [`escape`]: JSON string literal escaping
//! - [`buffer`]: growable output buffer
//! - [`options`]: per-call options
//! - [`host`]: registration of `parson-parse` / `parson-stringify` into a host
//! - [`error`]: error types

pub mod buffer;
pub mod deserializer;
pub mod error;
pub mod escape;
pub mod host;
pub mod json;
pub mod options;
pub mod serializer;
pub mod value;

pub use deserializer::{deserialize, deserialize_with, parse, parse_with, try_parse};
pub use error::ParsonError;
pub use escape::escape;
pub use json::{parse_text, parse_text_with, JsonType, JsonValue};
pub use options::{ObjectType, ParseOptions, StringifyOptions, DEFAULT_MAX_DEPTH};
pub use serializer::{stringify, stringify_with};
pub use value::{HostKind, HostValue};
