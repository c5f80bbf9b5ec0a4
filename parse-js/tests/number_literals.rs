use parse_js::ast::expr::Expr;
use parse_js::ast::stmt::Stmt;
use parse_js::error::SyntaxErrorType;
use parse_js::num::JsNumber;
use parse_js::parse;

fn parse_number_value(src: &str) -> JsNumber {
  let parsed = parse(src).unwrap();
  let stmt = parsed.stx.body.first().expect("expected a statement");
  match stmt.stx.as_ref() {
    Stmt::Expr(expr_stmt) => match expr_stmt.stx.expr.stx.as_ref() {
      Expr::LitNum(num) => num.stx.value,
      other => panic!("expected numeric literal, got {:?}", other),
    },
    other => panic!("expected expression statement, got {:?}", other),
  }
}

#[test]
fn parses_max_finite_literal() {
  let value = parse_number_value("1.7976931348623157e308");
  assert_eq!(value.0, f64::MAX);
}

#[test]
fn overflows_to_infinity() {
  let value = parse_number_value("1e400");
  assert!(value.0.is_infinite() && value.0.is_sign_positive());
}

#[test]
fn parses_min_subnormal() {
  let value = parse_number_value("5e-324");
  assert_eq!(value.0.to_bits(), f64::from_bits(1).to_bits());
}

#[test]
fn parses_legacy_octal_literal() {
  assert_eq!(parse_number_value("0777").0, 0o777 as f64);
  // Not octal once a non-octal digit appears.
  assert_eq!(parse_number_value("0779").0, 779.0);
}

#[test]
fn parses_hex_literal() {
  assert_eq!(parse_number_value("0xFF").0, 255.0);
  assert_eq!(parse_number_value("0Xa").0, 10.0);
}

#[test]
fn parses_fraction_forms() {
  assert_eq!(parse_number_value(".25").0, 0.25);
  assert_eq!(parse_number_value("3.").0, 3.0);
  assert_eq!(parse_number_value("1.5e+2").0, 150.0);
  assert_eq!(parse_number_value("2E-1").0, 0.2);
}

#[test]
fn rejects_malformed_numbers() {
  for src in ["0x", "1e", "12abc", "0xg1"] {
    let err = parse(src).unwrap_err();
    assert!(
      matches!(err.typ, SyntaxErrorType::MalformedLiteralNumber(_)),
      "{} gave {:?}",
      src,
      err
    );
  }
}

#[test]
fn displays_like_number_to_string() {
  assert_eq!(JsNumber(1e21).to_string(), "1e+21");
  assert_eq!(JsNumber(123456.0).to_string(), "123456");
  assert_eq!(JsNumber(0.000001).to_string(), "0.000001");
  assert_eq!(JsNumber(1e-7).to_string(), "1e-7");
  assert_eq!(JsNumber(-2.5).to_string(), "-2.5");
}
