use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::util::test::assert_json_eq;
use serde_json::json;

// Parses a single expression statement and returns its expression.
fn parse_expr(code: &str) -> Node<Expr> {
  let mut top = crate::parse(code).unwrap();
  assert_eq!(top.stx.body.len(), 1, "expected one statement in {:?}", code);
  match *top.stx.body.remove(0).stx {
    Stmt::Expr(stmt) => stmt.stx.expr,
    other => panic!("expected expression statement, got {:?}", other),
  }
}

fn id(name: &str) -> serde_json::Value {
  json!({ "$t": "Id", "name": name })
}

fn num(value: f64) -> serde_json::Value {
  json!({ "$t": "LitNum", "value": value })
}

#[test]
fn test_binary_precedence() {
  assert_json_eq(
    &parse_expr("a + b * c"),
    json!({
      "$t": "Binary",
      "operator": "Addition",
      "left": id("a"),
      "right": {
        "$t": "Binary",
        "operator": "Multiplication",
        "left": id("b"),
        "right": id("c"),
      },
    }),
  );
}

#[test]
fn test_binary_left_associative() {
  assert_json_eq(
    &parse_expr("a - b - c"),
    json!({
      "$t": "Binary",
      "operator": "Subtraction",
      "left": {
        "$t": "Binary",
        "operator": "Subtraction",
        "left": id("a"),
        "right": id("b"),
      },
      "right": id("c"),
    }),
  );
}

#[test]
fn test_assignment_right_associative() {
  assert_json_eq(
    &parse_expr("a = b += 1"),
    json!({
      "$t": "Assign",
      "operator": "Assignment",
      "target": id("a"),
      "value": {
        "$t": "Assign",
        "operator": "AssignmentAddition",
        "target": id("b"),
        "value": num(1.0),
      },
    }),
  );
}

#[test]
fn test_conditional_and_sequence() {
  assert_json_eq(
    &parse_expr("a ? b : c, d"),
    json!({
      "$t": "Seq",
      "exprs": [
        {
          "$t": "Cond",
          "test": id("a"),
          "consequent": id("b"),
          "alternate": id("c"),
        },
        id("d"),
      ],
    }),
  );
}

#[test]
fn test_division_and_regex() {
  assert_json_eq(
    &parse_expr("a / b / c"),
    json!({
      "$t": "Binary",
      "operator": "Division",
      "left": {
        "$t": "Binary",
        "operator": "Division",
        "left": id("a"),
        "right": id("b"),
      },
      "right": id("c"),
    }),
  );
  assert_json_eq(
    &parse_expr("x = /ab+c/gi"),
    json!({
      "$t": "Assign",
      "operator": "Assignment",
      "target": id("x"),
      "value": { "$t": "LitRegex", "pattern": "ab+c", "flags": "gi" },
    }),
  );
}

#[test]
fn test_regex_at_statement_start() {
  assert_json_eq(
    &parse_expr("/re/.test(s)"),
    json!({
      "$t": "Call",
      "callee": {
        "$t": "Member",
        "left": { "$t": "LitRegex", "pattern": "re", "flags": "" },
        "right": "test",
      },
      "arguments": [id("s")],
    }),
  );
}

#[test]
fn test_member_call_chain() {
  assert_json_eq(
    &parse_expr("a.b[c](1, 'x').if"),
    json!({
      "$t": "Member",
      "left": {
        "$t": "Call",
        "callee": {
          "$t": "ComputedMember",
          "object": { "$t": "Member", "left": id("a"), "right": "b" },
          "member": id("c"),
        },
        "arguments": [num(1.0), { "$t": "LitStr", "value": "x" }],
      },
      "right": "if",
    }),
  );
}

#[test]
fn test_new_without_arguments() {
  assert_json_eq(
    &parse_expr("new a.B"),
    json!({
      "$t": "New",
      "callee": { "$t": "Member", "left": id("a"), "right": "B" },
      "arguments": [],
    }),
  );
}

#[test]
fn test_new_callee_stops_at_call() {
  // The first argument list belongs to `new`; the second is a call on the result.
  assert_json_eq(
    &parse_expr("new F(1)(2)"),
    json!({
      "$t": "Call",
      "callee": {
        "$t": "New",
        "callee": id("F"),
        "arguments": [num(1.0)],
      },
      "arguments": [num(2.0)],
    }),
  );
}

#[test]
fn test_unary_operators() {
  assert_json_eq(
    &parse_expr("!typeof -x++"),
    json!({
      "$t": "Unary",
      "operator": "LogicalNot",
      "argument": {
        "$t": "Unary",
        "operator": "Typeof",
        "argument": {
          "$t": "Unary",
          "operator": "UnaryNegation",
          "argument": {
            "$t": "UnaryPostfix",
            "operator": "PostfixIncrement",
            "argument": id("x"),
          },
        },
      },
    }),
  );
}

#[test]
fn test_postfix_requires_same_line() {
  let top = crate::parse("a\n++b").unwrap();
  assert_eq!(top.stx.body.len(), 2);
}

#[test]
fn test_literals() {
  assert_json_eq(
    &parse_expr("[1, , 'two', true, null, {a: 1, 'b c': 2, 3: x,}]"),
    json!({
      "$t": "LitArr",
      "elements": [
        { "Single": num(1.0) },
        "Empty",
        { "Single": { "$t": "LitStr", "value": "two" } },
        { "Single": { "$t": "LitAtom", "value": "True" } },
        { "Single": { "$t": "LitAtom", "value": "Null" } },
        { "Single": {
          "$t": "LitObj",
          "members": [
            { "key": "a", "value": num(1.0) },
            { "key": "b c", "value": num(2.0) },
            { "key": "3", "value": id("x") },
          ],
        } },
      ],
    }),
  );
}

#[test]
fn test_function_expression() {
  assert_json_eq(
    &parse_expr("(function f(a, b) { return a; })"),
    json!({
      "$t": "Func",
      "func": {
        "name": { "name": "f" },
        "params": [{ "name": "a" }, { "name": "b" }],
        "body": [{ "$t": "Return", "value": id("a") }],
      },
    }),
  );
}

#[test]
fn test_in_operator() {
  assert_json_eq(
    &parse_expr("'k' in o"),
    json!({
      "$t": "Binary",
      "operator": "In",
      "left": { "$t": "LitStr", "value": "k" },
      "right": id("o"),
    }),
  );
}

#[test]
fn test_invalid_assignment_target() {
  let err = crate::parse("a + b = c").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssigmentTarget);
  let err = crate::parse("f() = 1").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssigmentTarget);
}

#[test]
fn test_invalid_update_target() {
  let err = crate::parse("++f()").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidUpdateTarget("++"));
  let err = crate::parse("1--").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidUpdateTarget("--"));
  assert!(crate::parse("a.b++; --c[0]").is_ok());
}

#[test]
fn test_unexpected_end_of_input() {
  let err = crate::parse("a + ").unwrap_err();
  assert_eq!(err.actual_token, Some(crate::token::TT::EOF));
  assert_eq!(err.message(), "Unexpected end of input");
}
