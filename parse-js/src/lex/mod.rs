use crate::char::is_identifier_char;
use crate::char::is_identifier_start;
use crate::char::is_line_terminator;
use crate::char::DIGIT;
use crate::char::DIGIT_OCT;
use crate::char::OPERATOR_CHARS;
use crate::char::PUNC_CHARS;
use crate::char::REGEXP_MODIFIERS;
use crate::char::WHITESPACE;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::grammar::KEYWORDS;
use crate::grammar::KEYWORDS_ATOM;
use crate::grammar::KEYWORDS_BEFORE_EXPRESSION;
use crate::grammar::OPERATORS;
use crate::grammar::PUNC_BEFORE_EXPRESSION;
use crate::grammar::UNARY_POSTFIX;
use crate::loc::Loc;
use crate::num::is_decimal_literal;
use crate::num::parse_decimal;
use crate::num::parse_radix;
use crate::num::JsNumber;
use crate::token::Token;
use crate::token::TokenValue;
use crate::token::TT;
use ahash::HashMap;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use core::ops::Index;
use memchr::memchr2;
use memchr::memmem;
use once_cell::sync::Lazy;

#[cfg(test)]
mod tests;

/// A custom reader for tokens starting with a specific character. It is called with the lexer positioned on (not past) that character.
pub type TokenReader = Box<dyn Fn(&mut Lexer<'_>) -> SyntaxResult<Token> + Send + Sync>;

#[derive(Copy, Clone, Debug)]
pub struct LexerCheckpoint {
  next: usize,
  line: usize,
  col: usize,
  regex_allowed: bool,
  newline_before: bool,
}

/// Position and state of the lexer, for error reporting.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct LexerContext {
  pub line: usize,
  pub col: usize,
  pub offset: usize,
  pub regex_allowed: bool,
  pub newline_before: bool,
}

// Contains the match length.
#[derive(Copy, Clone)]
struct Match(usize);

impl Match {
  pub fn len(&self) -> usize {
    self.0
  }
}

struct PatternMatcher {
  matcher: AhoCorasick,
}

impl PatternMatcher {
  pub fn new<D: AsRef<str>>(patterns: Vec<D>) -> Self {
    let byte_patterns: Vec<&[u8]> = patterns.iter().map(|p| p.as_ref().as_bytes()).collect();
    let matcher = AhoCorasickBuilder::new()
      .start_kind(StartKind::Anchored)
      .kind(Some(AhoCorasickKind::DFA))
      .match_kind(MatchKind::LeftmostLongest)
      .build(byte_patterns)
      .expect("static lexer patterns must compile");
    PatternMatcher { matcher }
  }

  pub fn find(&self, lexer: &Lexer) -> Option<Match> {
    self
      .matcher
      .find(Input::new(&lexer.source[lexer.next..]).anchored(Anchored::Yes))
      .map(|m| Match(m.end()))
  }
}

// Leftmost-longest matching over the symbolic operators. Every prefix of an operator is itself an operator, so this is the same as growing the operator one character at a time while it remains known.
static SYMBOLIC_OPERATORS: Lazy<PatternMatcher> = Lazy::new(|| {
  PatternMatcher::new(
    OPERATORS
      .iter()
      .filter(|op| !op.chars().all(|c| c.is_ascii_alphabetic()))
      .copied()
      .collect(),
  )
});

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
  line: usize,
  col: usize,
  regex_allowed: bool,
  newline_before: bool,
  skip_comments: bool,
  // Offset, line, and column of the token being lexed.
  token_start: (usize, usize, usize),
  readers: Option<&'a HashMap<char, TokenReader>>,
}

impl<'a> Lexer<'a> {
  pub fn new(code: &'a str) -> Lexer<'a> {
    Lexer {
      source: code,
      next: 0,
      line: 0,
      col: 0,
      regex_allowed: false,
      newline_before: false,
      skip_comments: true,
      token_start: (0, 0, 0),
      readers: None,
    }
  }

  /// Keep comments as `CommentSingle`/`CommentMultiline` tokens instead of skipping them.
  pub fn retain_comments(mut self) -> Lexer<'a> {
    self.skip_comments = false;
    self
  }

  pub fn with_token_readers(mut self, readers: &'a HashMap<char, TokenReader>) -> Lexer<'a> {
    self.readers = Some(readers);
    self
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  pub fn next(&self) -> usize {
    self.next
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.source.len())
  }

  pub fn regex_allowed(&self) -> bool {
    self.regex_allowed
  }

  pub fn set_regex_allowed(&mut self, regex_allowed: bool) {
    self.regex_allowed = regex_allowed;
  }

  pub fn context(&self) -> LexerContext {
    LexerContext {
      line: self.line,
      col: self.col,
      offset: self.next,
      regex_allowed: self.regex_allowed,
      newline_before: self.newline_before,
    }
  }

  pub fn checkpoint(&self) -> LexerCheckpoint {
    LexerCheckpoint {
      next: self.next,
      line: self.line,
      col: self.col,
      regex_allowed: self.regex_allowed,
      newline_before: self.newline_before,
    }
  }

  pub fn since_checkpoint(&self, checkpoint: LexerCheckpoint) -> Loc {
    Loc(checkpoint.next, self.next)
  }

  pub fn apply_checkpoint(&mut self, checkpoint: LexerCheckpoint) {
    self.next = checkpoint.next;
    self.line = checkpoint.line;
    self.col = checkpoint.col;
    self.regex_allowed = checkpoint.regex_allowed;
    self.newline_before = checkpoint.newline_before;
  }

  /// Moves back to the start of `token`, e.g. to lex it again in a different regex context.
  pub fn rewind(&mut self, token: &Token) {
    self.next = token.loc.0;
    self.line = token.line;
    self.col = token.col;
    self.newline_before = token.preceded_by_line_terminator;
  }

  pub fn peek_char(&self) -> Option<char> {
    self.source[self.next..].chars().next()
  }

  pub fn peek_char_at(&self, n: usize) -> Option<char> {
    self.source[self.next..].chars().nth(n)
  }

  /// Consumes one character, tracking line and column.
  pub fn next_char(&mut self) -> Option<char> {
    let c = self.peek_char()?;
    self.next += c.len_utf8();
    if c == '\n' {
      self.line += 1;
      self.col = 0;
      self.newline_before = true;
    } else {
      if is_line_terminator(c) {
        self.newline_before = true;
      };
      self.col += 1;
    };
    Some(c)
  }

  fn advance_to(&mut self, end: usize) {
    while self.next < end && self.next_char().is_some() {}
  }

  fn read_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
    let start = self.next;
    while let Some(c) = self.peek_char() {
      if !pred(c) {
        break;
      };
      self.next_char();
    }
    &self.source[start..self.next]
  }

  fn start_token(&mut self) {
    self.token_start = (self.next, self.line, self.col);
  }

  /// An error positioned at the start of the token currently being lexed.
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    let (offset, line, col) = self.token_start;
    SyntaxError::new(typ, Loc(offset, self.next.max(offset)), line, col, None)
  }

  /// Builds a token spanning from the current token start to the current position, then updates whether a following `/` would begin a regex.
  pub fn make_token(&mut self, typ: TT, value: TokenValue) -> Token {
    let (offset, line, col) = self.token_start;
    let token = Token {
      typ,
      value,
      loc: Loc(offset, self.next),
      line,
      col,
      preceded_by_line_terminator: self.newline_before,
    };
    // Comments neither change the regex context nor consume a pending line terminator.
    if !typ.is_comment() {
      let text = token.text();
      self.regex_allowed = match typ {
        // A postfix `++`/`--` ends an operand, so a `/` after it divides.
        TT::Operator => !UNARY_POSTFIX.contains(text),
        TT::Keyword => KEYWORDS_BEFORE_EXPRESSION.contains(text),
        TT::Punctuation => PUNC_BEFORE_EXPRESSION.contains(text),
        _ => false,
      };
      self.newline_before = false;
    };
    token
  }

  fn skip_whitespace(&mut self) {
    while self.peek_char().is_some_and(|c| WHITESPACE.has(c)) {
      self.next_char();
    }
  }

  pub fn next_token(&mut self) -> SyntaxResult<Token> {
    loop {
      self.skip_whitespace();
      self.start_token();
      let Some(c) = self.peek_char() else {
        return Ok(self.make_token(TT::EOF, TokenValue::None));
      };
      if let Some(reader) = self.readers.and_then(|readers| readers.get(&c)) {
        return reader(self);
      };
      if c == '/' {
        match self.peek_char_at(1) {
          Some('/') => {
            let token = lex_single_comment(self);
            if self.skip_comments {
              continue;
            };
            return Ok(token);
          }
          Some('*') => {
            let token = lex_multiline_comment(self)?;
            if self.skip_comments {
              continue;
            };
            return Ok(token);
          }
          _ if self.regex_allowed => return lex_regex(self),
          _ => return Ok(lex_operator(self)),
        };
      };
      return if DIGIT.has(c) {
        lex_number(self, false)
      } else if c == '"' || c == '\'' {
        lex_string(self)
      } else if c == '.' {
        if self.peek_char_at(1).is_some_and(|c| DIGIT.has(c)) {
          lex_number(self, true)
        } else {
          self.next_char();
          Ok(self.make_token(TT::Punctuation, TokenValue::Str(".".into())))
        }
      } else if PUNC_CHARS.has(c) {
        self.next_char();
        Ok(self.make_token(TT::Punctuation, TokenValue::Str(c.to_string())))
      } else if OPERATOR_CHARS.has(c) {
        Ok(lex_operator(self))
      } else if is_identifier_start(c) || c == '\\' || (!c.is_ascii() && c.is_alphabetic()) {
        lex_word(self)
      } else {
        self.next_char();
        Err(self.error(SyntaxErrorType::UnexpectedCharacter(c)))
      };
    }
  }
}

impl<'a> Index<Loc> for Lexer<'a> {
  type Output = str;

  fn index(&self, index: Loc) -> &Self::Output {
    &self.source[index.0..index.1]
  }
}

fn lex_single_comment(lexer: &mut Lexer<'_>) -> Token {
  // Consume `//`.
  lexer.next_char();
  lexer.next_char();
  let rest = lexer.source[lexer.next..].as_bytes();
  let end = lexer.next + memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
  let text = &lexer.source[lexer.next..end];
  lexer.advance_to(end);
  lexer.make_token(TT::CommentSingle, TokenValue::Str(text.to_string()))
}

fn lex_multiline_comment(lexer: &mut Lexer<'_>) -> SyntaxResult<Token> {
  // Consume `/*`.
  lexer.next_char();
  lexer.next_char();
  let start = lexer.next;
  let Some(len) = memmem::find(lexer.source[start..].as_bytes(), b"*/") else {
    return Err(lexer.error(SyntaxErrorType::UnterminatedComment));
  };
  let text = &lexer.source[start..start + len];
  lexer.advance_to(start + len + 2);
  Ok(lexer.make_token(TT::CommentMultiline, TokenValue::Str(text.to_string())))
}

fn lex_operator(lexer: &mut Lexer<'_>) -> Token {
  let len = SYMBOLIC_OPERATORS.find(lexer).map(|m| m.len()).unwrap_or(1);
  let text = &lexer.source[lexer.next..lexer.next + len];
  lexer.advance_to(lexer.next + len);
  lexer.make_token(TT::Operator, TokenValue::Str(text.to_string()))
}

fn lex_number(lexer: &mut Lexer<'_>, leading_dot: bool) -> SyntaxResult<Token> {
  let mut has_e = false;
  let mut after_e = false;
  let mut has_x = false;
  let mut has_dot = false;
  let mut first = true;
  let raw = lexer.read_while(|c| {
    let is_first = first;
    first = false;
    match c {
      '.' if is_first && leading_dot => {
        has_dot = true;
        true
      }
      'x' | 'X' if !has_x => {
        has_x = true;
        true
      }
      'e' | 'E' if !has_x => {
        if has_e {
          return false;
        };
        has_e = true;
        after_e = true;
        true
      }
      '+' | '-' => {
        let sign_allowed = after_e;
        after_e = false;
        sign_allowed
      }
      '.' => {
        after_e = false;
        if !has_dot && !has_x && !has_e {
          has_dot = true;
          true
        } else {
          false
        }
      }
      c => {
        after_e = false;
        c.is_ascii_alphanumeric()
      }
    }
  });
  let value = if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
    parse_radix(hex, 16)
  } else if raw.len() > 1 && raw.starts_with('0') && raw[1..].chars().all(|c| DIGIT_OCT.has(c)) {
    parse_radix(&raw[1..], 8)
  } else if is_decimal_literal(raw) {
    parse_decimal(raw)
  } else {
    None
  };
  match value {
    Some(value) => Ok(lexer.make_token(TT::LiteralNumber, TokenValue::Num(JsNumber(value)))),
    None => Err(lexer.error(SyntaxErrorType::MalformedLiteralNumber(raw.to_string()))),
  }
}

fn lex_hex_digits(lexer: &mut Lexer<'_>, n: usize) -> SyntaxResult<u32> {
  let mut value = 0;
  for _ in 0..n {
    match lexer.next_char().and_then(|c| c.to_digit(16)) {
      Some(d) => value = value * 16 + d,
      None => return Err(lexer.error(SyntaxErrorType::InvalidCharacterEscape)),
    };
  }
  Ok(value)
}

fn lex_unicode_escape(lexer: &mut Lexer<'_>) -> SyntaxResult<char> {
  let unit = lex_hex_digits(lexer, 4)?;
  if (0xD800..0xDC00).contains(&unit) {
    // A high surrogate must be followed by an escaped low surrogate.
    if lexer.peek_char() == Some('\\') && lexer.peek_char_at(1) == Some('u') {
      lexer.next_char();
      lexer.next_char();
      let low = lex_hex_digits(lexer, 4)?;
      if (0xDC00..0xE000).contains(&low) {
        let cp = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
        if let Some(c) = char::from_u32(cp) {
          return Ok(c);
        };
      };
    };
    return Err(lexer.error(SyntaxErrorType::InvalidCharacterEscape));
  };
  char::from_u32(unit).ok_or_else(|| lexer.error(SyntaxErrorType::InvalidCharacterEscape))
}

fn lex_string(lexer: &mut Lexer<'_>) -> SyntaxResult<Token> {
  let Some(quote) = lexer.next_char() else {
    return Err(lexer.error(SyntaxErrorType::UnterminatedString));
  };
  let mut value = String::new();
  loop {
    let Some(c) = lexer.next_char() else {
      return Err(lexer.error(SyntaxErrorType::UnterminatedString));
    };
    match c {
      c if c == quote => break,
      '\\' => {
        let Some(escaped) = lexer.next_char() else {
          return Err(lexer.error(SyntaxErrorType::UnterminatedString));
        };
        match escaped {
          'n' => value.push('\n'),
          'r' => value.push('\r'),
          't' => value.push('\t'),
          'b' => value.push('\x08'),
          'v' => value.push('\x0b'),
          'f' => value.push('\x0c'),
          '0' => value.push('\0'),
          'x' => {
            let code = lex_hex_digits(lexer, 2)?;
            // Two hex digits are always a valid scalar value.
            value.extend(char::from_u32(code));
          }
          'u' => value.push(lex_unicode_escape(lexer)?),
          // Line continuation.
          '\r' => {
            if lexer.peek_char() == Some('\n') {
              lexer.next_char();
            };
          }
          c if is_line_terminator(c) => {}
          c => value.push(c),
        };
      }
      '\n' | '\r' => return Err(lexer.error(SyntaxErrorType::UnterminatedString)),
      c => value.push(c),
    };
  }
  Ok(lexer.make_token(TT::LiteralString, TokenValue::Str(value)))
}

fn lex_regex(lexer: &mut Lexer<'_>) -> SyntaxResult<Token> {
  // Consume slash.
  lexer.next_char();
  let mut pattern = String::new();
  let mut in_charset = false;
  loop {
    let c = match lexer.next_char() {
      Some(c) if !is_line_terminator(c) => c,
      _ => return Err(lexer.error(SyntaxErrorType::UnterminatedRegex)),
    };
    match c {
      '\\' => {
        let escaped = match lexer.next_char() {
          Some(c) if !is_line_terminator(c) => c,
          _ => return Err(lexer.error(SyntaxErrorType::UnterminatedRegex)),
        };
        pattern.push('\\');
        pattern.push(escaped);
        continue;
      }
      '/' if !in_charset => break,
      '[' => in_charset = true,
      ']' if in_charset => in_charset = false,
      _ => {}
    };
    pattern.push(c);
  }
  let flags = lexer.read_while(|c| REGEXP_MODIFIERS.has(c)).to_string();
  Ok(lexer.make_token(TT::LiteralRegex, TokenValue::Regex { pattern, flags }))
}

fn lex_word(lexer: &mut Lexer<'_>) -> SyntaxResult<Token> {
  let mut word = String::new();
  let mut escaped = false;
  loop {
    match lexer.peek_char() {
      Some('\\') => {
        lexer.next_char();
        if lexer.next_char() != Some('u') {
          return Err(lexer.error(SyntaxErrorType::InvalidCharacterEscape));
        };
        let c = lex_unicode_escape(lexer)?;
        let valid = if word.is_empty() {
          is_identifier_start(c) || c.is_alphabetic()
        } else {
          is_identifier_char(c) || c.is_alphanumeric()
        };
        if !valid {
          return Err(lexer.error(SyntaxErrorType::InvalidCharacterEscape));
        };
        word.push(c);
        escaped = true;
      }
      Some(c) if is_identifier_char(c) || (!c.is_ascii() && c.is_alphanumeric()) => {
        lexer.next_char();
        word.push(c);
      }
      _ => break,
    };
  }
  // An escaped word is always a plain name, even if it spells a keyword.
  let typ = if escaped || !KEYWORDS.contains(word.as_str()) {
    TT::Identifier
  } else if OPERATORS.contains(word.as_str()) {
    TT::Operator
  } else if KEYWORDS_ATOM.contains(word.as_str()) {
    TT::Atom
  } else {
    TT::Keyword
  };
  Ok(lexer.make_token(typ, TokenValue::Str(word)))
}

/// A pull-based token stream with one token of lookahead.
pub struct TokenStream<'a> {
  lexer: Lexer<'a>,
  peeked: Option<Token>,
  done: bool,
}

impl<'a> TokenStream<'a> {
  pub fn new(lexer: Lexer<'a>) -> TokenStream<'a> {
    TokenStream {
      lexer,
      peeked: None,
      done: false,
    }
  }

  /// Returns the next token, including the final EOF token.
  pub fn next_token(&mut self) -> SyntaxResult<Token> {
    match self.peeked.take() {
      Some(t) => Ok(t),
      None => self.lexer.next_token(),
    }
  }

  pub fn peek(&mut self) -> SyntaxResult<&Token> {
    let token = match self.peeked.take() {
      Some(t) => t,
      None => self.lexer.next_token()?,
    };
    Ok(self.peeked.insert(token))
  }

  pub fn context(&self) -> LexerContext {
    self.lexer.context()
  }
}

impl<'a> Iterator for TokenStream<'a> {
  type Item = SyntaxResult<Token>;

  // Yields every token before EOF. A lexical error is yielded once and ends the stream.
  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    };
    match self.next_token() {
      Ok(t) if t.typ == TT::EOF => {
        self.done = true;
        None
      }
      Ok(t) => Some(Ok(t)),
      Err(err) => {
        self.done = true;
        Some(Err(err))
      }
    }
  }
}

pub fn tokenize(text: &str, skip_comments: bool) -> TokenStream<'_> {
  let lexer = Lexer::new(text);
  TokenStream::new(if skip_comments {
    lexer
  } else {
    lexer.retain_comments()
  })
}
