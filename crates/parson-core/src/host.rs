//! Host adapter: binds the two entry points into a host runtime.
//!
//! A host runtime exposes a way to define named functions and to announce a
//! loaded feature. [`register`] uses those two operations to install
//! `parson-parse` and `parson-stringify` and then provides `parson-core`.
//! [`FunctionTable`] is a plain in-memory host, used by the CLI and tests.

use std::collections::BTreeMap;

use tracing::debug;

use crate::deserializer::parse;
use crate::error::{ParsonError, Result};
use crate::serializer::stringify;
use crate::value::HostValue;

/// Feature name announced once both functions are bound.
pub const FEATURE: &str = "parson-core";
pub const PARSE_FUNCTION: &str = "parson-parse";
pub const STRINGIFY_FUNCTION: &str = "parson-stringify";

/// Signature of a function callable from the host.
pub type HostFn = fn(&[HostValue]) -> Result<HostValue>;

/// The subset of a host runtime needed to install the converter.
pub trait Host {
    /// Bind `name` to `function`, taking exactly `arity` arguments.
    fn defun(&mut self, name: &'static str, arity: usize, doc: &'static str, function: HostFn);

    /// Mark `feature` as loaded.
    fn provide(&mut self, feature: &'static str);
}

/// Install `parson-parse` and `parson-stringify` into `host`.
pub fn register<H: Host + ?Sized>(host: &mut H) {
    host.defun(PARSE_FUNCTION, 1, "Parse JSON", parson_parse);
    host.defun(
        STRINGIFY_FUNCTION,
        1,
        "Stringify JSON to Emacs Lisp object",
        parson_stringify,
    );
    host.provide(FEATURE);
    debug!(feature = FEATURE, "registered host functions");
}

/// `(parson-parse STRING)`: nil on malformed input.
fn parson_parse(args: &[HostValue]) -> Result<HostValue> {
    let arg = single_arg(PARSE_FUNCTION, args)?;
    let text = arg.as_str().ok_or_else(|| ParsonError::WrongType {
        expected: "stringp",
        got: arg.type_name(),
    })?;
    Ok(parse(text))
}

/// `(parson-stringify OBJECT)`.
fn parson_stringify(args: &[HostValue]) -> Result<HostValue> {
    let value = single_arg(STRINGIFY_FUNCTION, args)?;
    stringify(value).map(HostValue::String)
}

fn single_arg<'a>(function: &'static str, args: &'a [HostValue]) -> Result<&'a HostValue> {
    match args {
        [arg] => Ok(arg),
        _ => Err(ParsonError::WrongNumberOfArguments {
            function,
            expected: 1,
            got: args.len(),
        }),
    }
}

struct Entry {
    arity: usize,
    doc: &'static str,
    function: HostFn,
}

/// An in-memory host: a function table plus the list of provided features.
#[derive(Default)]
pub struct FunctionTable {
    functions: BTreeMap<&'static str, Entry>,
    features: Vec<&'static str>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with the converter already registered.
    pub fn with_parson() -> Self {
        let mut table = Self::new();
        register(&mut table);
        table
    }

    /// Call `name` with `args`, as the host's `funcall` would.
    pub fn call(&self, name: &str, args: &[HostValue]) -> Result<HostValue> {
        let (&function, entry) = self
            .functions
            .get_key_value(name)
            .ok_or_else(|| ParsonError::UnknownFunction(name.to_string()))?;
        if args.len() != entry.arity {
            return Err(ParsonError::WrongNumberOfArguments {
                function,
                expected: entry.arity,
                got: args.len(),
            });
        }
        (entry.function)(args)
    }

    pub fn arity(&self, name: &str) -> Option<usize> {
        self.functions.get(name).map(|e| e.arity)
    }

    pub fn documentation(&self, name: &str) -> Option<&'static str> {
        self.functions.get(name).map(|e| e.doc)
    }

    pub fn function_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    pub fn is_provided(&self, feature: &str) -> bool {
        self.features.iter().any(|f| *f == feature)
    }
}

impl Host for FunctionTable {
    fn defun(&mut self, name: &'static str, arity: usize, doc: &'static str, function: HostFn) {
        self.functions.insert(
            name,
            Entry {
                arity,
                doc,
                function,
            },
        );
    }

    fn provide(&mut self, feature: &'static str) {
        if !self.is_provided(feature) {
            self.features.push(feature);
        }
    }
}
