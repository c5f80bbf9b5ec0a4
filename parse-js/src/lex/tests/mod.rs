use crate::error::SyntaxErrorType;
use crate::lex::tokenize;
use crate::lex::Lexer;
use crate::num::JsNumber;
use crate::token::TokenValue;
use crate::token::TT;
use crate::token::TT::*;

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lexer.next_token().unwrap();
    assert_eq!(t.typ, expected, "in {:?}", code);
  }
  let t = lexer.next_token().unwrap();
  assert_eq!(EOF, t.typ, "in {:?}", code);
}

fn single(code: &str) -> TokenValue {
  let mut lexer = Lexer::new(code);
  let t = lexer.next_token().unwrap();
  assert_eq!(lexer.next_token().unwrap().typ, EOF);
  t.value
}

fn error(code: &str) -> SyntaxErrorType {
  tokenize(code, true)
    .find_map(|t| t.err())
    .expect("expected a lexical error")
    .typ
}

#[test]
fn test_lex_words() {
  check("instanceof", [Operator]);
  check("typeof x", [Operator, Identifier]);
  check("return", [Keyword]);
  check("null true false", [Atom, Atom, Atom]);
  check("h929 $_a", [Identifier, Identifier]);
  // Reserved words are plain names to the lexer.
  check("class", [Identifier]);
  check("caf\u{e9}", [Identifier]);
}

#[test]
fn test_lex_escaped_words() {
  assert_eq!(single("\\u0061b"), TokenValue::Str("ab".into()));
  // An escaped keyword is a name.
  check("\\u0069f", [Identifier]);
  assert_eq!(error("\\x61"), SyntaxErrorType::InvalidCharacterEscape);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber]);
  check(".929", [LiteralNumber]);
  check(". 929", [Punctuation, LiteralNumber]);
  check("a.b", [Identifier, Punctuation, Identifier]);
  assert_eq!(single("0xff"), TokenValue::Num(JsNumber(255.0)));
  assert_eq!(single("0X1F"), TokenValue::Num(JsNumber(31.0)));
  assert_eq!(single("017"), TokenValue::Num(JsNumber(15.0)));
  assert_eq!(single("019"), TokenValue::Num(JsNumber(19.0)));
  assert_eq!(single("1e3"), TokenValue::Num(JsNumber(1000.0)));
  assert_eq!(single("2.5E-1"), TokenValue::Num(JsNumber(0.25)));
  assert_eq!(single("1.e2"), TokenValue::Num(JsNumber(100.0)));
  assert_eq!(single(".5"), TokenValue::Num(JsNumber(0.5)));
}

#[test]
fn test_lex_malformed_numbers() {
  assert_eq!(
    error("12abc"),
    SyntaxErrorType::MalformedLiteralNumber("12abc".into())
  );
  assert_eq!(
    error("0xg"),
    SyntaxErrorType::MalformedLiteralNumber("0xg".into())
  );
}

#[test]
fn test_lex_literal_strings() {
  assert_eq!(single("'hello world'"), TokenValue::Str("hello world".into()));
  assert_eq!(single(r#""a\"b""#), TokenValue::Str("a\"b".into()));
  assert_eq!(single(r"'\n\t\x41B'"), TokenValue::Str("\n\tAB".into()));
  assert_eq!(single(r"'\q'"), TokenValue::Str("q".into()));
  assert_eq!(single("'a\\\nb'"), TokenValue::Str("ab".into()));
  assert_eq!(
    single(r"'\uD83D\uDE00'"),
    TokenValue::Str("\u{1F600}".into())
  );
  assert_eq!(error(r"'\uD83D'"), SyntaxErrorType::InvalidCharacterEscape);
  assert_eq!(error("'hello world\n'"), SyntaxErrorType::UnterminatedString);
  assert_eq!(error("'abc"), SyntaxErrorType::UnterminatedString);
  assert_eq!(error(r"'\xZZ'"), SyntaxErrorType::InvalidCharacterEscape);
}

#[test]
fn test_lex_operators() {
  check("a>>>=b", [Identifier, Operator, Identifier]);
  check("a+++b", [Identifier, Operator, Operator, Identifier]);
  check("a!==b", [Identifier, Operator, Identifier]);
  let values: Vec<_> = tokenize("a>>>=b===c", true)
    .map(|t| t.unwrap().describe_value())
    .collect();
  assert_eq!(values, vec!["a", ">>>=", "b", "===", "c"]);
}

#[test]
fn test_lex_punctuation() {
  check("f(a, [b]);", [
    Identifier,
    Punctuation,
    Identifier,
    Punctuation,
    Punctuation,
    Identifier,
    Punctuation,
    Punctuation,
    Punctuation,
  ]);
  assert_eq!(error("#"), SyntaxErrorType::UnexpectedCharacter('#'));
}

#[test]
fn test_lex_regex_context() {
  check("x = /a/g", [Identifier, Operator, LiteralRegex]);
  check("x / a / g", [
    Identifier,
    Operator,
    Identifier,
    Operator,
    Identifier,
  ]);
  check("return /a/", [Keyword, LiteralRegex]);
  check("(/[/]/)", [Punctuation, LiteralRegex, Punctuation]);
  check("x++ / 2", [Identifier, Operator, Operator, LiteralNumber]);
  check("a++ /b/ c", [
    Identifier,
    Operator,
    Operator,
    Identifier,
    Operator,
    Identifier,
  ]);
  check("a-- /b/ c", [
    Identifier,
    Operator,
    Operator,
    Identifier,
    Operator,
    Identifier,
  ]);
  assert_eq!(single("/a\\/b[/]/gi"), TokenValue::Regex {
    pattern: "a\\/b[/]".into(),
    flags: "gi".into(),
  });
  assert_eq!(error("/abc\n/"), SyntaxErrorType::UnterminatedRegex);
}

#[test]
fn test_lex_comments() {
  check("a // b\nc", [Identifier, Identifier]);
  check("a /* b */ c", [Identifier, Identifier]);
  let kept: Vec<_> = tokenize("a /* b */ // c", false)
    .map(|t| t.unwrap().typ)
    .collect();
  assert_eq!(kept, vec![Identifier, CommentMultiline, CommentSingle]);
  assert_eq!(error("/* abc"), SyntaxErrorType::UnterminatedComment);
}

#[test]
fn test_lex_positions_and_newlines() {
  let tokens: Vec<_> = tokenize("a\n  b /*\n*/ c", true)
    .map(|t| t.unwrap())
    .collect();
  assert_eq!(
    tokens
      .iter()
      .map(|t| (t.line, t.col, t.preceded_by_line_terminator))
      .collect::<Vec<_>>(),
    vec![(0, 0, false), (1, 2, true), (2, 3, true)]
  );
  assert_eq!(tokens[1].loc.0, 4);
}

#[test]
fn test_lex_checkpoint() {
  let mut lexer = Lexer::new("a b");
  let cp = lexer.checkpoint();
  let first = lexer.next_token().unwrap();
  lexer.apply_checkpoint(cp);
  assert_eq!(lexer.next_token().unwrap(), first);
  assert_eq!(lexer.context().offset, 1);
}

#[test]
fn test_token_stream_peek() {
  let mut stream = tokenize("a b", true);
  assert_eq!(stream.peek().unwrap().text(), "a");
  assert_eq!(stream.peek().unwrap().text(), "a");
  assert_eq!(stream.next_token().unwrap().text(), "a");
  assert_eq!(stream.next_token().unwrap().text(), "b");
  assert_eq!(stream.next_token().unwrap().typ, EOF);
}
