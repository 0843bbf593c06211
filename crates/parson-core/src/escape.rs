//! JSON string literal escaping.
//!
//! Only the seven short escapes are produced. Other control characters and
//! non-ASCII text are copied through unchanged; no `\uXXXX` sequences are
//! generated.

use crate::buffer::OutputBuffer;

/// Escape `s` and wrap it in double quotes.
///
/// ```
/// assert_eq!(parson_core::escape("say \"hi\"\n"), r#""say \"hi\"\n""#);
/// ```
pub fn escape(s: &str) -> String {
    let mut out = OutputBuffer::with_capacity(s.len() + 2);
    escape_into(&mut out, s);
    out.into_string()
}

/// Append the quoted, escaped form of `s` to `out`.
pub fn escape_into(out: &mut OutputBuffer, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}
