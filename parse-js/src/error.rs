use crate::loc::Loc;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of errors produced by the lexer and parser.
///
/// Diagnostic codes (prefix `PS`) are assigned per variant and are stable:
/// - `PS0001`: [`SyntaxErrorType::UnexpectedCharacter`]
/// - `PS0002`: [`SyntaxErrorType::UnterminatedString`]
/// - `PS0003`: [`SyntaxErrorType::UnterminatedComment`]
/// - `PS0004`: [`SyntaxErrorType::UnterminatedRegex`]
/// - `PS0005`: [`SyntaxErrorType::MalformedLiteralNumber`]
/// - `PS0006`: [`SyntaxErrorType::InvalidCharacterEscape`]
/// - `PS0007`: [`SyntaxErrorType::UnexpectedToken`]
/// - `PS0008`: [`SyntaxErrorType::RequiredTokenNotFound`]
/// - `PS0009`: [`SyntaxErrorType::ExpectedSyntax`]
/// - `PS0010`: [`SyntaxErrorType::InvalidAssigmentTarget`]
/// - `PS0011`: [`SyntaxErrorType::InvalidUpdateTarget`]
/// - `PS0012`: [`SyntaxErrorType::ReturnOutsideFunction`]
/// - `PS0013`: [`SyntaxErrorType::JumpOutsideLoop`]
/// - `PS0014`: [`SyntaxErrorType::UnknownLabel`]
/// - `PS0015`: [`SyntaxErrorType::LineTerminatorAfterThrow`]
/// - `PS0016`: [`SyntaxErrorType::TryStatementHasNoCatchOrFinally`]
/// - `PS0017`: [`SyntaxErrorType::Custom`]
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  UnexpectedCharacter(char),
  UnterminatedString,
  UnterminatedComment,
  UnterminatedRegex,
  MalformedLiteralNumber(String),
  InvalidCharacterEscape,
  // The raw value of the offending token.
  UnexpectedToken(String),
  // Expected punctuation, operator, or keyword text.
  RequiredTokenNotFound(&'static str),
  ExpectedSyntax(&'static str),
  InvalidAssigmentTarget,
  InvalidUpdateTarget(&'static str),
  ReturnOutsideFunction,
  // `break` or `continue`.
  JumpOutsideLoop(&'static str),
  UnknownLabel(String),
  LineTerminatorAfterThrow,
  TryStatementHasNoCatchOrFinally,
  // Raised by parser extensions.
  Custom(String),
}

impl SyntaxErrorType {
  /// Stable diagnostic code for this error variant.
  pub fn code(&self) -> &'static str {
    match self {
      SyntaxErrorType::UnexpectedCharacter(_) => "PS0001",
      SyntaxErrorType::UnterminatedString => "PS0002",
      SyntaxErrorType::UnterminatedComment => "PS0003",
      SyntaxErrorType::UnterminatedRegex => "PS0004",
      SyntaxErrorType::MalformedLiteralNumber(_) => "PS0005",
      SyntaxErrorType::InvalidCharacterEscape => "PS0006",
      SyntaxErrorType::UnexpectedToken(_) => "PS0007",
      SyntaxErrorType::RequiredTokenNotFound(_) => "PS0008",
      SyntaxErrorType::ExpectedSyntax(_) => "PS0009",
      SyntaxErrorType::InvalidAssigmentTarget => "PS0010",
      SyntaxErrorType::InvalidUpdateTarget(_) => "PS0011",
      SyntaxErrorType::ReturnOutsideFunction => "PS0012",
      SyntaxErrorType::JumpOutsideLoop(_) => "PS0013",
      SyntaxErrorType::UnknownLabel(_) => "PS0014",
      SyntaxErrorType::LineTerminatorAfterThrow => "PS0015",
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => "PS0016",
      SyntaxErrorType::Custom(_) => "PS0017",
    }
  }

  /// Whether this error was raised while tokenizing rather than while parsing the grammar.
  pub fn is_lexical(&self) -> bool {
    matches!(
      self,
      SyntaxErrorType::UnexpectedCharacter(_)
        | SyntaxErrorType::UnterminatedString
        | SyntaxErrorType::UnterminatedComment
        | SyntaxErrorType::UnterminatedRegex
        | SyntaxErrorType::MalformedLiteralNumber(_)
        | SyntaxErrorType::InvalidCharacterEscape
    )
  }

  /// Human-readable message describing this error.
  pub fn message(&self, actual_token: Option<TT>) -> String {
    match self {
      SyntaxErrorType::UnexpectedCharacter(c) => format!("Unexpected character '{}'", c),
      SyntaxErrorType::UnterminatedString => "Unterminated string constant".into(),
      SyntaxErrorType::UnterminatedComment => "Unterminated multiline comment".into(),
      SyntaxErrorType::UnterminatedRegex => "Unterminated regular expression".into(),
      SyntaxErrorType::MalformedLiteralNumber(raw) => format!("Invalid syntax: {}", raw),
      SyntaxErrorType::InvalidCharacterEscape => "Invalid hex-character pattern in string".into(),
      SyntaxErrorType::UnexpectedToken(value) => match actual_token {
        Some(TT::EOF) => "Unexpected end of input".into(),
        Some(tt) => format!("Unexpected token {} ({})", tt.name(), value),
        None => format!("Unexpected token ({})", value),
      },
      SyntaxErrorType::RequiredTokenNotFound(expected) => match actual_token {
        Some(tt) => format!("Unexpected token {}, expected {}", tt.name(), expected),
        None => format!("Expected {}", expected),
      },
      SyntaxErrorType::ExpectedSyntax(expected) => format!("{} expected", expected),
      SyntaxErrorType::InvalidAssigmentTarget => "Invalid assignment".into(),
      SyntaxErrorType::InvalidUpdateTarget(op) => format!("Invalid use of {} operator", op),
      SyntaxErrorType::ReturnOutsideFunction => "'return' outside of function".into(),
      SyntaxErrorType::JumpOutsideLoop(keyword) => {
        format!("{} not inside a loop or switch", keyword)
      }
      SyntaxErrorType::UnknownLabel(label) => {
        format!("Label {} without matching loop or statement", label)
      }
      SyntaxErrorType::LineTerminatorAfterThrow => {
        "Line terminator not allowed after 'throw'".into()
      }
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => {
        "Missing catch/finally blocks".into()
      }
      SyntaxErrorType::Custom(message) => message.clone(),
    }
  }
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  // 0-based.
  pub line: usize,
  // 0-based, counted in characters.
  pub col: usize,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(
    typ: SyntaxErrorType,
    loc: Loc,
    line: usize,
    col: usize,
    actual_token: Option<TT>,
  ) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      line,
      col,
      actual_token,
    }
  }

  pub fn message(&self) -> String {
    self.typ.message(self.actual_token)
  }

  /// Absolute byte offset of the error.
  pub fn offset(&self) -> usize {
    self.loc.0
  }

  pub fn is_lexical(&self) -> bool {
    self.typ.is_lexical()
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} [{}] around loc [{}:{}]",
      self,
      self.typ.code(),
      self.loc.0,
      self.loc.1
    )
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} (line: {}, col: {}, pos: {})",
      self.message(),
      self.line,
      self.col,
      self.offset()
    )
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;
