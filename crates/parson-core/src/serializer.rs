//! Serializer: host value → JSON text.
//!
//! Walks the value recursively, writing straight into one [`OutputBuffer`].
//! The mapping is:
//!
//! - `nil` (and the symbol `nil`) → `null`, `t` (and the symbol `t`) → `true`
//! - integers → decimal, floats → shortest round-trip form
//! - symbols → the bare name, or a quoted string when
//!   [`StringifyOptions::symbol_as_raw_token`] is off
//! - strings → escaped JSON string
//! - vectors → arrays
//! - hash tables → objects; each key is serialized with the same rules and
//!   its text is used verbatim before the `:`
//!
//! # Example
//! ```
//! use parson_core::{stringify, HostValue};
//! let items = HostValue::vector([HostValue::Integer(1), HostValue::Integer(2)]);
//! let value = HostValue::map([(HostValue::string("k"), items)]);
//! assert_eq!(stringify(&value).unwrap(), r#"{"k":[1,2]}"#);
//! ```

use tracing::debug;

use crate::buffer::OutputBuffer;
use crate::error::{ParsonError, Result};
use crate::escape::escape_into;
use crate::options::{descend, StringifyOptions};
use crate::value::{HostValue, NIL_SYMBOL, TRUE_SYMBOL};

/// Serialize a host value to JSON text with default options.
///
/// Fails if the value, or anything nested in it, has no JSON spelling. No
/// partial output is returned on failure.
pub fn stringify(value: &HostValue) -> Result<String> {
    stringify_with(value, &StringifyOptions::default())
}

/// Serialize a host value to JSON text.
pub fn stringify_with(value: &HostValue, opts: &StringifyOptions) -> Result<String> {
    let mut serializer = Serializer {
        opts,
        out: OutputBuffer::for_value(value),
    };
    if let Err(err) = serializer.write_value(value, 0) {
        debug!(%err, "stringify failed");
        return Err(err);
    }
    debug!(
        kind = value.type_name(),
        len = serializer.out.len(),
        "stringified host value"
    );
    Ok(serializer.out.into_string())
}

struct Serializer<'a> {
    opts: &'a StringifyOptions,
    out: OutputBuffer,
}

impl Serializer<'_> {
    /// `depth` is the number of containers already open around `value`.
    fn write_value(&mut self, value: &HostValue, depth: usize) -> Result<()> {
        match value {
            HostValue::Nil => self.out.push_str("null"),
            HostValue::True => self.out.push_str("true"),
            // `t` and `nil` would otherwise print as their own names.
            HostValue::Symbol(name) if name == TRUE_SYMBOL => self.out.push_str("true"),
            HostValue::Symbol(name) if name == NIL_SYMBOL => self.out.push_str("null"),
            HostValue::Integer(n) => self.out.push_fmt(format_args!("{n}")),
            HostValue::Float(f) => self.write_float(*f)?,
            HostValue::Symbol(name) => {
                if self.opts.symbol_as_raw_token {
                    self.out.push_str(name);
                } else {
                    escape_into(&mut self.out, name);
                }
            }
            HostValue::String(s) => escape_into(&mut self.out, s),
            HostValue::Vector(items) => {
                let depth = descend(depth, self.opts.max_depth)?;
                self.out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.write_value(item, depth)?;
                }
                self.out.push(']');
            }
            HostValue::Map(pairs) => {
                let depth = descend(depth, self.opts.max_depth)?;
                self.out.push('{');
                for (i, (key, val)) in pairs.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.write_value(key, depth)?;
                    self.out.push(':');
                    self.write_value(val, depth)?;
                }
                self.out.push('}');
            }
            HostValue::False | HostValue::Alist(_) | HostValue::Opaque(_) => {
                return Err(ParsonError::Unrepresentable {
                    kind: value.type_name(),
                });
            }
        }
        Ok(())
    }

    /// Shortest text that reads back as the same double. Large and tiny
    /// magnitudes use exponent form (`1e300`), which JSON accepts.
    fn write_float(&mut self, f: f64) -> Result<()> {
        if !f.is_finite() {
            return Err(ParsonError::NonFiniteNumber(f));
        }
        self.out.push_fmt(format_args!("{f:?}"));
        Ok(())
    }
}
