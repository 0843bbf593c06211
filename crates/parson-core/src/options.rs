//! Per-call conversion options.

use crate::error::{ParsonError, Result};

/// Default nesting limit for both directions. Matches the recursion limit of
/// the `serde_json` tokenizer, so text that parses also converts.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for [`stringify_with`](crate::stringify_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringifyOptions {
    /// Emit symbol names verbatim instead of as quoted JSON strings.
    ///
    /// On by default for compatibility: `foo` serializes to the bare token
    /// `foo`, which is only valid JSON when the name itself is a JSON literal
    /// or number. Turn it off to get `"foo"`.
    pub symbol_as_raw_token: bool,
    /// Maximum number of nested vectors and hash tables.
    pub max_depth: usize,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            symbol_as_raw_token: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl StringifyOptions {
    pub fn with_symbol_as_raw_token(mut self, raw: bool) -> Self {
        self.symbol_as_raw_token = raw;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Host representation chosen for JSON objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ObjectType {
    /// `(("name" . value) ...)`, every member kept in source order.
    #[default]
    Alist,
    /// A hash table keyed by member-name strings. Duplicates are kept as
    /// separate entries.
    HashTable,
}

/// Options for [`parse_with`](crate::parse_with) and
/// [`deserialize_with`](crate::deserialize_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub object_type: ObjectType,
    /// Maximum number of nested arrays and objects.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            object_type: ObjectType::Alist,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_object_type(mut self, object_type: ObjectType) -> Self {
        self.object_type = object_type;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Enter one more container level, failing once `limit` levels are open.
pub(crate) fn descend(depth: usize, limit: usize) -> Result<usize> {
    if depth >= limit {
        return Err(ParsonError::RecursionLimitExceeded { limit });
    }
    Ok(depth + 1)
}
