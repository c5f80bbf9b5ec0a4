#![allow(dead_code)]

use emit_js::emit_js;
use emit_js::EmitOptions;
use parse_js::ast::node::Node;
use parse_js::ast::stx::TopLevel;
use serde_json::Value;
use similar::TextDiff;

pub fn parse(source: &str) -> Node<TopLevel> {
  parse_js::parse(source).unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"))
}

pub fn emit(top: &Node<TopLevel>, opts: &EmitOptions) -> String {
  emit_js(top, opts).unwrap_or_else(|err| panic!("failed to emit: {err}"))
}

pub fn minify(source: &str) -> String {
  emit(&parse(source), &EmitOptions::default())
}

pub fn syntax_value(top: &Node<TopLevel>) -> Value {
  serde_json::to_value(top).expect("serialize syntax")
}

fn pretty(value: &Value) -> String {
  serde_json::to_string_pretty(value).expect("format syntax")
}

/// Emits `source`, then checks the output parses to the same tree and emits to the same text again.
pub fn assert_roundtrip(source: &str, opts: &EmitOptions) -> String {
  let original = parse(source);
  let first = emit(&original, opts);
  let reparsed = parse_js::parse(&first)
    .unwrap_or_else(|err| panic!("output {first:?} of {source:?} does not parse: {err}"));
  let (expected, actual) = (syntax_value(&original), syntax_value(&reparsed));
  if expected != actual {
    let (expected, actual) = (pretty(&expected), pretty(&actual));
    let diff = TextDiff::from_lines(&expected, &actual);
    panic!(
      "tree changed for {source:?} emitted as {first:?}:\n{}",
      diff.unified_diff().header("source", "output")
    );
  }
  let second = emit(&reparsed, opts);
  assert_eq!(first, second, "emitting {source:?} is not stable");
  first
}
