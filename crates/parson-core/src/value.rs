//! Host values: the Emacs Lisp objects the converter reads and builds.
//!
//! The host runtime's own type inspection (`type-of`, `eq` against interned
//! symbols) is replaced by a closed enum, so every conversion is an
//! exhaustive `match`.

use std::fmt;

/// Name of the canonical truth symbol. A `Symbol` with this name is the same
/// object as [`HostValue::True`].
pub const TRUE_SYMBOL: &str = "t";

/// Name of the symbol that is the same object as `nil`.
pub const NIL_SYMBOL: &str = "nil";

/// A dynamically typed host object.
///
/// `Nil` through `Map` are the kinds the serializer knows how to spell. The
/// remaining variants exist so that values coming back from the host can be
/// represented faithfully; the serializer rejects them.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Nil,
    True,
    Integer(i64),
    Float(f64),
    /// An interned symbol, identified by its printed name.
    Symbol(String),
    String(String),
    Vector(Vec<HostValue>),
    /// Hash table entries in the order the host enumerates its keys.
    Map(Vec<(HostValue, HostValue)>),
    /// Association list `(("name" . value) ...)`, the shape `parse` builds
    /// for JSON objects.
    Alist(Vec<(String, HostValue)>),
    /// A false singleton distinct from `nil`, such as `:false`.
    False,
    /// Any other host object (buffer, marker, subr...), named by its type.
    Opaque(&'static str),
}

/// The dynamic kind of a [`HostValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKind {
    Nil,
    True,
    Integer,
    Float,
    Symbol,
    String,
    Vector,
    Map,
    Alist,
    False,
    Opaque,
}

impl HostKind {
    /// Short lowercase name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            HostKind::Nil => "nil",
            HostKind::True => "t",
            HostKind::Integer => "integer",
            HostKind::Float => "float",
            HostKind::Symbol => "symbol",
            HostKind::String => "string",
            HostKind::Vector => "vector",
            HostKind::Map => "hash-table",
            HostKind::Alist => "alist",
            HostKind::False => "false",
            HostKind::Opaque => "opaque",
        }
    }
}

impl HostValue {
    pub fn string(s: impl Into<String>) -> Self {
        HostValue::String(s.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        HostValue::Symbol(name.into())
    }

    pub fn vector(items: impl IntoIterator<Item = HostValue>) -> Self {
        HostValue::Vector(items.into_iter().collect())
    }

    pub fn map(pairs: impl IntoIterator<Item = (HostValue, HostValue)>) -> Self {
        HostValue::Map(pairs.into_iter().collect())
    }

    /// Build an association list. An empty list is `nil` in the host, so no
    /// pairs yields [`HostValue::Nil`].
    pub fn alist(pairs: impl IntoIterator<Item = (String, HostValue)>) -> Self {
        let pairs: Vec<_> = pairs.into_iter().collect();
        if pairs.is_empty() {
            HostValue::Nil
        } else {
            HostValue::Alist(pairs)
        }
    }

    pub fn kind(&self) -> HostKind {
        match self {
            HostValue::Nil => HostKind::Nil,
            HostValue::True => HostKind::True,
            HostValue::Integer(_) => HostKind::Integer,
            HostValue::Float(_) => HostKind::Float,
            HostValue::Symbol(_) => HostKind::Symbol,
            HostValue::String(_) => HostKind::String,
            HostValue::Vector(_) => HostKind::Vector,
            HostValue::Map(_) => HostKind::Map,
            HostValue::Alist(_) => HostKind::Alist,
            HostValue::False => HostKind::False,
            HostValue::Opaque(_) => HostKind::Opaque,
        }
    }

    /// Type name for error messages; opaque objects report their own type.
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Opaque(name) => *name,
            other => other.kind().name(),
        }
    }

    /// True for `nil` and for the symbol named `nil`.
    pub fn is_nil(&self) -> bool {
        match self {
            HostValue::Nil => true,
            HostValue::Symbol(name) => name == NIL_SYMBOL,
            _ => false,
        }
    }

    /// True for `t` and for the symbol named `t`.
    pub fn is_true(&self) -> bool {
        match self {
            HostValue::True => true,
            HostValue::Symbol(name) => name == TRUE_SYMBOL,
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            HostValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            HostValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Keys of a hash table in enumeration order; empty for other kinds.
    pub fn map_keys(&self) -> Vec<&HostValue> {
        match self {
            HostValue::Map(pairs) => pairs.iter().map(|(k, _)| k).collect(),
            _ => Vec::new(),
        }
    }

    /// Look up `key` in a hash table with `equal` semantics.
    pub fn map_get(&self, key: &HostValue) -> Option<&HostValue> {
        match self {
            HostValue::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Look up the first association for `name` in an alist.
    pub fn assoc(&self, name: &str) -> Option<&HostValue> {
        match self {
            HostValue::Alist(pairs) => pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<i64> for HostValue {
    fn from(n: i64) -> Self {
        HostValue::Integer(n)
    }
}

impl From<f64> for HostValue {
    fn from(f: f64) -> Self {
        HostValue::Float(f)
    }
}

/// `true` is `t`, `false` is `nil`.
impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        if b {
            HostValue::True
        } else {
            HostValue::Nil
        }
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::String(s)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(items: Vec<HostValue>) -> Self {
        HostValue::Vector(items)
    }
}

/// Prints the value the way the Lisp printer would (`prin1`).
impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Nil => f.write_str("nil"),
            HostValue::True => f.write_str(TRUE_SYMBOL),
            HostValue::False => f.write_str(":false"),
            HostValue::Integer(n) => write!(f, "{n}"),
            HostValue::Float(x) => write!(f, "{x:?}"),
            HostValue::Symbol(name) => f.write_str(name),
            HostValue::String(s) => write_lisp_string(s, f),
            HostValue::Vector(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            HostValue::Map(pairs) => {
                write!(f, "#s(hash-table size {} test equal data (", pairs.len())?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k} {v}")?;
                }
                f.write_str("))")
            }
            HostValue::Alist(pairs) => {
                f.write_str("(")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    f.write_str("(")?;
                    write_lisp_string(k, f)?;
                    write!(f, " . {v})")?;
                }
                f.write_str(")")
            }
            HostValue::Opaque(name) => write!(f, "#<{name}>"),
        }
    }
}

/// Lisp string literals only escape the quote and the backslash.
fn write_lisp_string(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            _ => fmt::Write::write_char(f, ch)?,
        }
    }
    f.write_str("\"")
}
