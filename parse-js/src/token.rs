use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use crate::num::JsNumber;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  // `false`, `null`, `true`.
  Atom,
  CommentMultiline,
  CommentSingle,
  // Special token used to represent the end of the source code.
  EOF,
  Identifier,
  Keyword,
  LiteralNumber,
  LiteralRegex,
  LiteralString,
  // Symbolic operators and the word operators `in`, `instanceof`, `typeof`, `new`, `void`, `delete`.
  Operator,
  // One of `[ ] { } ( ) , ; : .`.
  Punctuation,
}

impl TT {
  /// Short name used in error messages.
  pub fn name(self) -> &'static str {
    match self {
      TT::Atom => "atom",
      TT::CommentMultiline => "comment2",
      TT::CommentSingle => "comment1",
      TT::EOF => "eof",
      TT::Identifier => "name",
      TT::Keyword => "keyword",
      TT::LiteralNumber => "num",
      TT::LiteralRegex => "regexp",
      TT::LiteralString => "string",
      TT::Operator => "operator",
      TT::Punctuation => "punc",
    }
  }

  pub fn is_comment(self) -> bool {
    matches!(self, TT::CommentMultiline | TT::CommentSingle)
  }
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
  None,
  // Identifier, keyword, operator, punctuation, atom, and comment text, as well as decoded string literal contents.
  Str(String),
  Num(JsNumber),
  Regex { pattern: String, flags: String },
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Token {
  pub typ: TT,
  pub value: TokenValue,
  #[serde(skip)]
  pub loc: Loc,
  // 0-based.
  pub line: usize,
  // 0-based, in characters.
  pub col: usize,
  // Whether one or more line terminators (including inside comments) precede this token.
  pub preceded_by_line_terminator: bool,
}

impl Token {
  /// The token's text, or the empty string for numbers, regexes, and EOF.
  pub fn text(&self) -> &str {
    match &self.value {
      TokenValue::Str(s) => s.as_str(),
      _ => "",
    }
  }

  pub fn is(&self, typ: TT, value: &str) -> bool {
    self.typ == typ && self.text() == value
  }

  pub fn is_punc(&self, value: &str) -> bool {
    self.is(TT::Punctuation, value)
  }

  pub fn is_operator(&self, value: &str) -> bool {
    self.is(TT::Operator, value)
  }

  pub fn is_keyword(&self, value: &str) -> bool {
    self.is(TT::Keyword, value)
  }

  /// Renders the value for diagnostics.
  pub fn describe_value(&self) -> String {
    match &self.value {
      TokenValue::None => String::new(),
      TokenValue::Str(s) => s.clone(),
      TokenValue::Num(n) => n.to_string(),
      TokenValue::Regex { pattern, flags } => format!("/{}/{}", pattern, flags),
    }
  }

  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    SyntaxError::new(typ, self.loc, self.line, self.col, Some(self.typ))
  }

  /// An "Unexpected token" error pointing at this token.
  pub fn unexpected(&self) -> SyntaxError {
    self.error(SyntaxErrorType::UnexpectedToken(self.describe_value()))
  }
}
