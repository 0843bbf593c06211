//! Tests for registering the converter into a host and calling it through
//! the host's function table.

use parson_core::host::{
    register, FunctionTable, Host, HostFn, FEATURE, PARSE_FUNCTION, STRINGIFY_FUNCTION,
};
use parson_core::{HostValue, ParsonError};

/// A host that only records what was registered, in order.
#[derive(Default)]
struct RecordingHost {
    events: Vec<String>,
}

impl Host for RecordingHost {
    fn defun(&mut self, name: &'static str, arity: usize, _doc: &'static str, _function: HostFn) {
        self.events.push(format!("defun {name}/{arity}"));
    }

    fn provide(&mut self, feature: &'static str) {
        self.events.push(format!("provide {feature}"));
    }
}

#[test]
fn register_binds_both_functions_then_provides_feature() {
    let mut host = RecordingHost::default();
    register(&mut host);
    assert_eq!(
        host.events,
        vec![
            "defun parson-parse/1".to_string(),
            "defun parson-stringify/1".to_string(),
            "provide parson-core".to_string(),
        ]
    );
}

#[test]
fn register_into_trait_object() {
    let mut host = RecordingHost::default();
    let dyn_host: &mut dyn Host = &mut host;
    register(dyn_host);
    assert_eq!(host.events.len(), 3);
}

#[test]
fn function_table_exposes_registered_functions() {
    let table = FunctionTable::with_parson();
    assert!(table.is_provided(FEATURE));
    assert!(!table.is_provided("json"));
    assert_eq!(table.arity(PARSE_FUNCTION), Some(1));
    assert_eq!(table.arity(STRINGIFY_FUNCTION), Some(1));
    assert_eq!(table.documentation(PARSE_FUNCTION), Some("Parse JSON"));
    assert_eq!(
        table.function_names().collect::<Vec<_>>(),
        vec![PARSE_FUNCTION, STRINGIFY_FUNCTION]
    );
}

#[test]
fn call_parse() {
    let table = FunctionTable::with_parson();
    let value = table
        .call(PARSE_FUNCTION, &[HostValue::string(r#"{"a":[1,2.5]}"#)])
        .unwrap();
    assert_eq!(
        value,
        HostValue::Alist(vec![(
            "a".to_string(),
            HostValue::vector([HostValue::Integer(1), HostValue::Float(2.5)])
        )])
    );
}

#[test]
fn call_parse_malformed_returns_nil() {
    let table = FunctionTable::with_parson();
    let value = table
        .call(PARSE_FUNCTION, &[HostValue::string("{bad")])
        .unwrap();
    assert_eq!(value, HostValue::Nil);
}

#[test]
fn call_stringify() {
    let table = FunctionTable::with_parson();
    let arg = HostValue::map([(HostValue::string("k"), HostValue::True)]);
    let value = table.call(STRINGIFY_FUNCTION, &[arg]).unwrap();
    assert_eq!(value, HostValue::string(r#"{"k":true}"#));
}

#[test]
fn call_stringify_unrepresentable_is_error() {
    let table = FunctionTable::with_parson();
    let err = table
        .call(STRINGIFY_FUNCTION, &[HostValue::Opaque("process")])
        .unwrap_err();
    assert!(matches!(err, ParsonError::Unrepresentable { kind: "process" }));
}

#[test]
fn call_parse_with_wrong_type() {
    let table = FunctionTable::with_parson();
    let err = table
        .call(PARSE_FUNCTION, &[HostValue::Integer(1)])
        .unwrap_err();
    assert!(matches!(
        err,
        ParsonError::WrongType {
            expected: "stringp",
            got: "integer"
        }
    ));
}

#[test]
fn call_with_wrong_arity() {
    let table = FunctionTable::with_parson();
    let err = table.call(STRINGIFY_FUNCTION, &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "parson-stringify: expected 1 argument(s), got 0"
    );
    let err = table
        .call(PARSE_FUNCTION, &[HostValue::Nil, HostValue::Nil])
        .unwrap_err();
    assert!(matches!(
        err,
        ParsonError::WrongNumberOfArguments { got: 2, .. }
    ));
}

fn count_args(args: &[HostValue]) -> parson_core::error::Result<HostValue> {
    Ok(HostValue::Integer(args.len() as i64))
}

#[test]
fn table_checks_declared_arity_before_dispatch() {
    let mut table = FunctionTable::new();
    table.defun("count-args", 2, "Count arguments.", count_args);
    assert_eq!(
        table
            .call("count-args", &[HostValue::Nil, HostValue::True])
            .unwrap(),
        HostValue::Integer(2)
    );
    let err = table.call("count-args", &[HostValue::Nil]).unwrap_err();
    assert!(matches!(
        err,
        ParsonError::WrongNumberOfArguments {
            function: "count-args",
            expected: 2,
            got: 1,
        }
    ));
}

#[test]
fn call_unknown_function() {
    let table = FunctionTable::with_parson();
    let err = table.call("json-read", &[]).unwrap_err();
    assert_eq!(err.to_string(), "void function: json-read");
}

#[test]
fn stringify_then_parse_through_host() {
    let table = FunctionTable::with_parson();
    let original = HostValue::vector([
        HostValue::string("line\nbreak"),
        HostValue::Integer(-3),
        HostValue::True,
    ]);
    let json = table.call(STRINGIFY_FUNCTION, &[original.clone()]).unwrap();
    let back = table.call(PARSE_FUNCTION, &[json]).unwrap();
    assert_eq!(back, original);
}

#[test]
fn provide_is_idempotent() {
    let mut table = FunctionTable::new();
    table.provide(FEATURE);
    table.provide(FEATURE);
    assert!(table.is_provided(FEATURE));
    assert_eq!(table.function_names().count(), 0);
}
