use crate::ast::stmt::Stmt;
use crate::ast::stmt::StmtTokens;
use crate::error::SyntaxErrorType;
use crate::parse::ParseOptions;
use crate::util::test::assert_json_eq;
use serde_json::json;
use serde_json::Value;

fn parse_body(code: &str) -> Value {
  serde_json::to_value(&crate::parse(code).unwrap().stx.body).unwrap()
}

fn parse_err(code: &str) -> SyntaxErrorType {
  crate::parse(code).unwrap_err().typ
}

fn id(name: &str) -> Value {
  json!({ "$t": "Id", "name": name })
}

#[test]
fn test_asi_splits_statements() {
  assert_json_eq(
    &crate::parse("a = 1\nb = 2").unwrap().stx.body,
    json!([
      {
        "$t": "Expr",
        "expr": { "$t": "Assign", "operator": "Assignment", "target": id("a"), "value": { "$t": "LitNum", "value": 1.0 } },
      },
      {
        "$t": "Expr",
        "expr": { "$t": "Assign", "operator": "Assignment", "target": id("b"), "value": { "$t": "LitNum", "value": 2.0 } },
      },
    ]),
  );
}

#[test]
fn test_var_and_const() {
  assert_json_eq(
    &parse_body("var a = 1, b; const c = a"),
    json!([
      {
        "$t": "VarDecl",
        "mode": "Var",
        "declarators": [
          { "name": { "name": "a" }, "initializer": { "$t": "LitNum", "value": 1.0 } },
          { "name": { "name": "b" }, "initializer": null },
        ],
      },
      {
        "$t": "VarDecl",
        "mode": "Const",
        "declarators": [{ "name": { "name": "c" }, "initializer": id("a") }],
      },
    ]),
  );
}

#[test]
fn test_function_declaration() {
  assert_json_eq(
    &parse_body("function f(x) { return x }"),
    json!([{
      "$t": "FunctionDecl",
      "name": { "name": "f" },
      "function": {
        "name": null,
        "params": [{ "name": "x" }],
        "body": [{ "$t": "Return", "value": id("x") }],
      },
    }]),
  );
}

#[test]
fn test_return_is_restricted() {
  // A newline after `return` ends the statement.
  assert_json_eq(
    &parse_body("function f() { return\nx }"),
    json!([{
      "$t": "FunctionDecl",
      "name": { "name": "f" },
      "function": {
        "name": null,
        "params": [],
        "body": [
          { "$t": "Return", "value": null },
          { "$t": "Expr", "expr": id("x") },
        ],
      },
    }]),
  );
}

#[test]
fn test_for_in() {
  assert_json_eq(
    &parse_body("for (var k in o) ; for (k in o) {}"),
    json!([
      {
        "$t": "ForIn",
        "lhs": { "Decl": { "name": "k" } },
        "rhs": id("o"),
        "body": { "$t": "Empty" },
      },
      {
        "$t": "ForIn",
        "lhs": { "Assign": { "name": "k" } },
        "rhs": id("o"),
        "body": { "$t": "Block", "body": [] },
      },
    ]),
  );
}

#[test]
fn test_for_triple() {
  assert_json_eq(
    &parse_body("for (var i = 0; i < n; i++) {} for (;;) break"),
    json!([
      {
        "$t": "ForTriple",
        "init": { "Decl": {
          "mode": "Var",
          "declarators": [{ "name": { "name": "i" }, "initializer": { "$t": "LitNum", "value": 0.0 } }],
        } },
        "cond": { "$t": "Binary", "operator": "LessThan", "left": id("i"), "right": id("n") },
        "post": { "$t": "UnaryPostfix", "operator": "PostfixIncrement", "argument": id("i") },
        "body": { "$t": "Block", "body": [] },
      },
      {
        "$t": "ForTriple",
        "init": "None",
        "cond": null,
        "post": null,
        "body": { "$t": "Break", "label": null },
      },
    ]),
  );
}

#[test]
fn test_for_init_stops_at_in() {
  // With `in` excluded from the init, `a in b` can't be part of a classic for head.
  assert_eq!(
    parse_err("for (x = a in b;;) {}"),
    SyntaxErrorType::RequiredTokenNotFound(";")
  );
  assert!(crate::parse("for (x = (a in b);;) {}").is_ok());
}

#[test]
fn test_if_else_binds_to_nearest() {
  assert_json_eq(
    &parse_body("if (a) if (b) x; else y;"),
    json!([{
      "$t": "If",
      "test": id("a"),
      "consequent": {
        "$t": "If",
        "test": id("b"),
        "consequent": { "$t": "Expr", "expr": id("x") },
        "alternate": { "$t": "Expr", "expr": id("y") },
      },
      "alternate": null,
    }]),
  );
}

#[test]
fn test_switch() {
  assert_json_eq(
    &parse_body("switch (x) { case 1: a; break; default: b }"),
    json!([{
      "$t": "Switch",
      "test": id("x"),
      "branches": [
        {
          "case": { "$t": "LitNum", "value": 1.0 },
          "body": [{ "$t": "Expr", "expr": id("a") }, { "$t": "Break", "label": null }],
        },
        { "case": null, "body": [{ "$t": "Expr", "expr": id("b") }] },
      ],
    }]),
  );
  assert!(matches!(parse_err("switch (x) { a; }"), SyntaxErrorType::UnexpectedToken(_)));
}

#[test]
fn test_try() {
  assert_json_eq(
    &parse_body("try { a } catch (e) { b } finally { c }"),
    json!([{
      "$t": "Try",
      "wrapped": { "body": [{ "$t": "Expr", "expr": id("a") }] },
      "catch": {
        "parameter": { "name": "e" },
        "body": { "body": [{ "$t": "Expr", "expr": id("b") }] },
      },
      "finally": { "body": [{ "$t": "Expr", "expr": id("c") }] },
    }]),
  );
  assert_eq!(
    parse_err("try {}"),
    SyntaxErrorType::TryStatementHasNoCatchOrFinally
  );
}

#[test]
fn test_labels() {
  assert_json_eq(
    &parse_body("outer: for (;;) { while (a) continue outer; }"),
    json!([{
      "$t": "Label",
      "name": "outer",
      "statement": {
        "$t": "ForTriple",
        "init": "None",
        "cond": null,
        "post": null,
        "body": { "$t": "Block", "body": [{
          "$t": "While",
          "condition": id("a"),
          "body": { "$t": "Continue", "label": "outer" },
        }] },
      },
    }]),
  );
  assert_eq!(
    parse_err("a: x = 1;"),
    SyntaxErrorType::ExpectedSyntax("loop or switch")
  );
  assert_eq!(
    parse_err("a: while (1) break b;"),
    SyntaxErrorType::UnknownLabel("b".into())
  );
}

#[test]
fn test_labels_do_not_cross_functions() {
  assert_eq!(
    parse_err("a: while (1) { (function () { break a; }); }"),
    SyntaxErrorType::UnknownLabel("a".into())
  );
  assert_eq!(
    parse_err("while (1) { (function () { break; }); }"),
    SyntaxErrorType::JumpOutsideLoop("break")
  );
}

#[test]
fn test_jump_outside_loop() {
  assert_eq!(parse_err("break;"), SyntaxErrorType::JumpOutsideLoop("break"));
  assert_eq!(
    parse_err("if (a) continue"),
    SyntaxErrorType::JumpOutsideLoop("continue")
  );
  assert!(crate::parse("switch (a) { case 1: break }").is_ok());
}

#[test]
fn test_return_outside_function() {
  let err = crate::parse("\n  return 1;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ReturnOutsideFunction);
  assert_eq!((err.line, err.col), (1, 2));
}

#[test]
fn test_throw_requires_same_line() {
  assert_eq!(
    parse_err("throw\nnew Error()"),
    SyntaxErrorType::LineTerminatorAfterThrow
  );
  assert!(crate::parse("throw new Error()").is_ok());
}

#[test]
fn test_do_while_terminator_follows_asi() {
  assert_eq!(parse_body("do x(); while (a)\ny()").as_array().unwrap().len(), 2);
  assert_eq!(parse_body("{ do x(); while (a) }").as_array().unwrap().len(), 1);
  assert_eq!(
    parse_err("do x(); while (a) y()"),
    SyntaxErrorType::UnexpectedToken("y".into())
  );
  let opts = ParseOptions {
    strict_semicolons: true,
    ..ParseOptions::default()
  };
  assert!(crate::parse_with_options("do x(); while (a);", opts).is_ok());
  assert!(crate::parse_with_options("do x(); while (a)", opts).is_err());
}

#[test]
fn test_with_and_debugger() {
  assert_json_eq(
    &parse_body("with (o) debugger;"),
    json!([{
      "$t": "With",
      "object": id("o"),
      "body": { "$t": "Debugger" },
    }]),
  );
}

#[test]
fn test_embed_tokens() {
  let opts = ParseOptions {
    embed_tokens: true,
    ..ParseOptions::default()
  };
  let top = crate::parse_with_options("a = 1;\nif (b) { c }", opts).unwrap();
  let first = top.stx.body[0].assoc.get::<StmtTokens>().unwrap();
  assert_eq!(first.start.text(), "a");
  assert!(first.end.is_punc(";"));
  let second = top.stx.body[1].assoc.get::<StmtTokens>().unwrap();
  assert!(second.start.is_keyword("if"));
  assert!(second.end.is_punc("}"));
  assert_eq!(second.start.line, 1);

  let Stmt::If(if_stmt) = top.stx.body[1].stx.as_ref() else {
    panic!("expected if statement");
  };
  assert!(if_stmt.stx.consequent.assoc.get::<StmtTokens>().is_some());

  let top = crate::parse("a = 1;").unwrap();
  assert!(top.stx.body[0].assoc.get::<StmtTokens>().is_none());
}
