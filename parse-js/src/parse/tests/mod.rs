mod expr;
mod stmt;

use super::ParseOptions;
use super::Parser;
use crate::error::SyntaxErrorType;
use crate::lex::Lexer;
use crate::token::TT;

fn parser(code: &str) -> Parser<'_> {
  Parser::new(Lexer::new(code), ParseOptions::default()).unwrap()
}

#[test]
fn test_parser() {
  let mut p = parser("var x = /a/ / 1;");
  let cp = p.checkpoint();
  assert!(p.token().is_keyword("var"));

  // Peeking doesn't consume.
  assert_eq!(p.peek().unwrap().typ, TT::Identifier);
  assert!(p.token().is_keyword("var"));

  let t = p.consume().unwrap();
  assert!(t.is_keyword("var"));
  assert_eq!(p.token().text(), "x");
  assert_eq!(p.prev.as_ref().map(|t| t.text()), Some("var"));

  p.consume().unwrap();
  p.consume().unwrap();
  // After `=` a slash starts a regex, and after the regex it is division.
  assert_eq!(p.token().typ, TT::LiteralRegex);
  p.consume().unwrap();
  assert!(p.token().is_operator("/"));

  p.restore_checkpoint(cp);
  assert!(p.token().is_keyword("var"));
  assert!(p.prev.is_none());
  assert_eq!(p.consume().unwrap().loc.0, 0);
}

#[test]
fn test_consume_if_and_require() {
  let mut p = parser("( a )");
  assert!(!p.consume_if(TT::Punctuation, ")").unwrap().is_match());
  assert!(p.consume_if(TT::Punctuation, "(").unwrap().is_match());
  assert_eq!(p.require_name().unwrap(), "a");
  let err = p.require_punc("]").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::RequiredTokenNotFound("]"));
  assert_eq!(err.message(), "Unexpected token punc, expected ]");
  p.require_punc(")").unwrap();
  assert_eq!(p.token().typ, TT::EOF);
}

#[test]
fn test_semicolon_insertion() {
  let mut p = parser("a\nb c");
  p.consume().unwrap();
  // Newline before `b`.
  p.semicolon().unwrap();
  p.consume().unwrap();
  let err = p.semicolon().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedToken("c".into()));
}

#[test]
fn test_strict_semicolons() {
  let opts = ParseOptions {
    strict_semicolons: true,
    ..ParseOptions::default()
  };
  assert!(crate::parse_with_options("a = 1;\nb = 2;", opts).is_ok());
  let err = crate::parse_with_options("a = 1\nb = 2;", opts).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedToken("b".into()));
  assert_eq!(err.line, 1);
  assert_eq!(err.col, 0);
  // Even the last statement needs its terminator.
  assert!(crate::parse_with_options("a = 1", opts).is_err());
}

#[test]
fn test_top_level_loc_covers_source() {
  let top = crate::parse("  x;  ").unwrap();
  assert_eq!(top.loc.0, 0);
  assert_eq!(top.loc.1, 6);
  assert_eq!(top.stx.body.len(), 1);
}

#[test]
fn test_lexical_errors_propagate() {
  let err = crate::parse("var s = 'abc").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnterminatedString);
  assert!(err.is_lexical());
  let err = crate::parse("x = 1 /* open").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnterminatedComment);
}
