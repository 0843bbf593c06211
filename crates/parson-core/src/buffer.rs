//! Growable output buffer for the serializer.
//!
//! Capacity starts from an estimate of the root value's size and doubles
//! whenever a write would not fit, so the serializer never needs to know the
//! final length up front.

use std::fmt;

use tracing::trace;

use crate::value::HostValue;

/// Smallest capacity a buffer is created with.
pub const MIN_CAPACITY: usize = 64;

/// Output bytes reserved per element of the root container.
const BYTES_PER_ELEMENT: usize = 8;

/// Accumulates JSON text for one `stringify` call.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    buf: String,
}

impl OutputBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity.max(MIN_CAPACITY)),
        }
    }

    /// Create a buffer sized from the shallow size of `value`.
    pub fn for_value(value: &HostValue) -> Self {
        Self::with_capacity(estimate_len(value))
    }

    pub fn push(&mut self, ch: char) {
        self.grow_for(ch.len_utf8());
        self.buf.push(ch);
    }

    pub fn push_str(&mut self, s: &str) {
        self.grow_for(s.len());
        self.buf.push_str(s);
    }

    /// Append the `Display` or `Debug` rendering of a value via `format_args!`.
    pub fn push_fmt(&mut self, args: fmt::Arguments<'_>) {
        // Writing into memory cannot fail.
        let _ = fmt::Write::write_fmt(self, args);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    /// Ensure room for `additional` more bytes, at least doubling the
    /// capacity when it has to grow.
    fn grow_for(&mut self, additional: usize) {
        let needed = self.buf.len() + additional;
        let capacity = self.buf.capacity();
        if needed <= capacity {
            return;
        }
        let target = needed.max(capacity.saturating_mul(2));
        trace!(from = capacity, to = target, "growing output buffer");
        self.buf.reserve_exact(target - self.buf.len());
    }
}

impl fmt::Write for OutputBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

/// Guess the output length from the top level of `value` only.
fn estimate_len(value: &HostValue) -> usize {
    let shallow = match value {
        HostValue::String(s) | HostValue::Symbol(s) => s.len() + 2,
        HostValue::Vector(items) => items.len() * BYTES_PER_ELEMENT + 2,
        HostValue::Map(pairs) => pairs.len() * 2 * BYTES_PER_ELEMENT + 2,
        _ => BYTES_PER_ELEMENT,
    };
    shallow.saturating_mul(2)
}
