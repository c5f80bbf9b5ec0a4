//! Boundary-aware byte buffer writer used by the code generator.
//!
//! Callers emit token-like fragments (keywords, identifiers, numbers,
//! punctuation) and the [`Emitter`] inserts the minimal whitespace required to
//! prevent the concatenation from being lexed as a different token (e.g.
//! `returnx`, `a++b`, `a--b`, `/a//b/`). Prefer the typed helpers so the
//! emitter can classify fragments; [`Emitter::write_str`] is for a single
//! lexical token such as a string or regex literal.
//!
//! Layout lives here too: in [`EmitMode::Beautified`] the newline, indent and
//! soft space helpers produce whitespace, in [`EmitMode::Minified`] they are
//! no-ops and statement terminators are deferred so that the last `;` before a
//! `}` or the end of the output is never written.

use parse_js::loc::Loc;
use thiserror::Error;

/// Controls how the emitter lays out whitespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitMode {
  /// Only inserts whitespace when necessary to avoid token ambiguity.
  Minified,
  /// One statement per line, indented blocks, spaced operators.
  Beautified,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmitOptions {
  pub mode: EmitMode,
  /// Columns prepended to every line in beautified mode.
  pub indent_start: usize,
  /// Columns per nesting level in beautified mode.
  pub indent_width: usize,
  /// Always quote object literal keys.
  pub quote_keys: bool,
}

impl EmitOptions {
  pub fn beautified() -> EmitOptions {
    EmitOptions {
      mode: EmitMode::Beautified,
      ..EmitOptions::default()
    }
  }
}

impl Default for EmitOptions {
  fn default() -> Self {
    EmitOptions {
      mode: EmitMode::Minified,
      indent_start: 0,
      indent_width: 4,
      quote_keys: false,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitErrorKind {
  #[error("identifier is empty")]
  EmptyName,
  #[error("declaration has no declarators")]
  EmptyDeclaration,
  #[error("`{0}` cannot be written as a member name")]
  InvalidMemberName(String),
  #[error("NaN has no literal form")]
  NanLiteral,
  #[error("a sequence needs at least two expressions")]
  ShortSequence,
}

/// A syntax tree that cannot be rendered. Trees produced by the parser always render; this indicates a hand-built or corrupted tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", pos_suffix(.loc))]
pub struct EmitError {
  pub kind: EmitErrorKind,
  pub loc: Option<Loc>,
}

fn pos_suffix(loc: &Option<Loc>) -> String {
  match loc {
    Some(loc) => format!(" (pos: {})", loc.0),
    None => String::new(),
  }
}

impl EmitError {
  pub(crate) fn new(kind: EmitErrorKind) -> Self {
    Self { kind, loc: None }
  }

  pub(crate) fn with_loc(mut self, loc: Loc) -> Self {
    if self.loc.is_none() {
      self.loc = Some(loc);
    }
    self
  }
}

pub type EmitResult = Result<(), EmitError>;

pub(crate) fn with_node_context<T>(
  loc: Loc,
  f: impl FnOnce() -> Result<T, EmitError>,
) -> Result<T, EmitError> {
  f().map_err(|err| err.with_loc(loc))
}

#[derive(Debug, Clone)]
pub struct Emitter {
  out: Vec<u8>,
  opts: EmitOptions,
  state: State,
}

#[derive(Debug, Clone, Copy)]
struct State {
  trailing: Boundary,
  // A statement ended and its `;` has not been written yet.
  pending_semicolon: bool,
  // Indentation is written lazily, by the first token on a line.
  line_start: bool,
  depth: usize,
}

impl Default for State {
  fn default() -> Self {
    State {
      trailing: Boundary::None,
      pending_semicolon: false,
      line_start: true,
      depth: 0,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
  None,
  Word,
  Number,
  Plus,
  PlusPlus,
  Minus,
  MinusMinus,
  Slash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leading {
  Word,
  Number,
  Plus,
  Minus,
  Slash,
  Star,
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
  Word,
  Number,
  Other,
}

impl Emitter {
  pub fn new(opts: EmitOptions) -> Self {
    Emitter {
      out: Vec::new(),
      opts,
      state: State::default(),
    }
  }

  pub fn mode(&self) -> EmitMode {
    self.opts.mode
  }

  pub fn options(&self) -> EmitOptions {
    self.opts
  }

  pub fn is_beautified(&self) -> bool {
    self.opts.mode == EmitMode::Beautified
  }

  /// Returns a read-only view of the buffer, without any deferred `;`.
  pub fn as_bytes(&self) -> &[u8] {
    &self.out
  }

  /// Consumes the emitter, returning the underlying buffer. A deferred final `;` is dropped.
  pub fn into_bytes(self) -> Vec<u8> {
    self.out
  }

  /// Clears the buffer and resets token-boundary state.
  pub fn clear(&mut self) {
    self.out.clear();
    self.state = State::default();
  }

  /// Writes a single lexical token, e.g. a string or regex literal, inserting a space if it would otherwise merge with the previous token.
  pub fn write_str(&mut self, text: &str) {
    self.write_with_kind(text, TokenKind::Other);
  }

  pub fn write_keyword(&mut self, keyword: &str) {
    self.write_with_kind(keyword, TokenKind::Word);
  }

  pub fn write_identifier(&mut self, identifier: &str) {
    self.write_with_kind(identifier, TokenKind::Word);
  }

  pub fn write_number(&mut self, number: &str) {
    self.write_with_kind(number, TokenKind::Number);
  }

  /// Emits punctuation or a symbolic operator.
  pub fn write_punct(&mut self, punct: &str) {
    self.write_with_kind(punct, TokenKind::Other);
  }

  /// Emits a `;` immediately, e.g. inside a `for` head or as an empty statement.
  pub fn write_semicolon(&mut self) {
    self.write_punct(";");
  }

  /// Terminates a statement. When minified the `;` is deferred and dropped if the next token closes a block or nothing follows.
  pub fn end_statement(&mut self) {
    match self.opts.mode {
      EmitMode::Minified => {
        self.flush_semicolon();
        self.state.pending_semicolon = true;
      }
      EmitMode::Beautified => self.write_semicolon(),
    }
  }

  /// Emits the `}` closing a block, function body or switch, dropping a deferred `;` before it.
  pub fn close_brace(&mut self) {
    self.state.pending_semicolon = false;
    self.write_punct("}");
  }

  /// A space that only exists in beautified output.
  pub fn space(&mut self) {
    if self.is_beautified() && !self.state.line_start {
      self.out.push(b' ');
      self.state.trailing = Boundary::None;
    }
  }

  /// A line break that only exists in beautified output.
  pub fn newline(&mut self) {
    if self.is_beautified() {
      self.flush_semicolon();
      self.out.push(b'\n');
      self.state.line_start = true;
      self.state.trailing = Boundary::None;
    }
  }

  pub fn indent(&mut self) {
    self.state.depth += 1;
  }

  pub fn dedent(&mut self) {
    self.state.depth = self.state.depth.saturating_sub(1);
  }

  /// Emits `items` separated by `separator`, with a soft space after each separator.
  pub fn emit_punctuated_list<T, E>(
    &mut self,
    items: &[T],
    separator: &str,
    mut emit_item: impl FnMut(&mut Self, &T) -> Result<(), E>,
  ) -> Result<(), E> {
    for (idx, item) in items.iter().enumerate() {
      if idx > 0 {
        self.write_punct(separator);
        self.space();
      }
      emit_item(self, item)?;
    }
    Ok(())
  }

  fn flush_semicolon(&mut self) {
    if self.state.pending_semicolon {
      self.state.pending_semicolon = false;
      self.out.push(b';');
      self.state.trailing = Boundary::None;
    }
  }

  fn write_with_kind(&mut self, text: &str, kind: TokenKind) {
    if text.is_empty() {
      return;
    }
    self.flush_semicolon();
    if self.state.line_start {
      self.state.line_start = false;
      if self.is_beautified() {
        let width = self.opts.indent_start + self.state.depth * self.opts.indent_width;
        self.out.resize(self.out.len() + width, b' ');
      }
    }

    let bytes = text.as_bytes();
    let leading = match kind {
      TokenKind::Word => Leading::Word,
      TokenKind::Number => Leading::Number,
      TokenKind::Other => classify_leading_char(bytes[0]),
    };
    if needs_space(self.state.trailing, leading) || self.would_open_html_comment(bytes) {
      self.out.push(b' ');
    }
    self.out.extend_from_slice(bytes);
    self.state.trailing = match kind {
      TokenKind::Word => Boundary::Word,
      TokenKind::Number => Boundary::Number,
      TokenKind::Other => classify_trailing(bytes),
    };
  }

  // `<!--` starts a comment in browsers even mid-line.
  fn would_open_html_comment(&self, next: &[u8]) -> bool {
    let tail_len = self.out.len().min(3);
    let mut joined = self.out[self.out.len() - tail_len..].to_vec();
    joined.extend(next.iter().take(3));
    joined.windows(4).any(|w| w == b"<!--")
  }
}

impl Default for Emitter {
  fn default() -> Self {
    Emitter::new(EmitOptions::default())
  }
}

fn needs_space(prev: Boundary, next: Leading) -> bool {
  matches!(
    (prev, next),
    (Boundary::Word | Boundary::Number, Leading::Word | Leading::Number)
      | (Boundary::Plus | Boundary::PlusPlus, Leading::Plus)
      | (Boundary::Minus | Boundary::MinusMinus, Leading::Minus)
      | (Boundary::Slash, Leading::Slash | Leading::Star)
  )
}

fn classify_leading_char(ch: u8) -> Leading {
  match ch {
    b'0'..=b'9' => Leading::Number,
    b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' | b'\\' => Leading::Word,
    b'+' => Leading::Plus,
    b'-' => Leading::Minus,
    b'/' => Leading::Slash,
    b'*' => Leading::Star,
    c if c >= 0x80 => Leading::Word,
    _ => Leading::Other,
  }
}

fn classify_trailing(bytes: &[u8]) -> Boundary {
  let idx = bytes.len() - 1;
  let doubled = idx >= 1 && bytes[idx - 1] == bytes[idx];
  match bytes[idx] {
    b'0'..=b'9' => Boundary::Number,
    b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => Boundary::Word,
    b'+' if doubled => Boundary::PlusPlus,
    b'+' => Boundary::Plus,
    b'-' if doubled => Boundary::MinusMinus,
    b'-' => Boundary::Minus,
    b'/' => Boundary::Slash,
    c if c >= 0x80 => Boundary::Word,
    _ => Boundary::None,
  }
}
