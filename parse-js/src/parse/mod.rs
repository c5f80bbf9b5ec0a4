use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::Lexer;
use crate::lex::LexerCheckpoint;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TokenValue;
use crate::token::TT;
use ext::ParserExtensions;

pub mod expr;
pub mod ext;
pub mod func;
pub mod operator;
pub mod stmt;
#[cfg(test)]
mod tests;
pub mod toplevel;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
  /// Require an explicit `;` after every statement that takes one; no automatic semicolon insertion.
  pub strict_semicolons: bool,
  /// Attach the first and last token of every statement as `StmtTokens` associated data.
  pub embed_tokens: bool,
}

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    if self.matched {
      Some(self.loc)
    } else {
      None
    }
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }
}

pub struct ParserCheckpoint {
  lexer: LexerCheckpoint,
  token: Token,
  peeked: Option<Token>,
  prev: Option<Token>,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  extensions: Option<&'a ParserExtensions>,
  options: ParseOptions,
  // The current token, not yet consumed.
  token: Token,
  peeked: Option<Token>,
  // The most recently consumed token.
  prev: Option<Token>,
  in_function: usize,
  // Depth of enclosing loops and switches within the current function.
  in_loop: usize,
  labels: Vec<String>,
}

// We extend this struct with added methods in the various submodules, instead of simply using free functions and passing `&mut Parser` around, for several reasons:
// - Avoid needing to redeclare `<'a>` on every function.
// - More lifetime elision is available for `self` than if it was just another reference parameter.
// - Don't need to import each function.
// - Extension callbacks receive `&mut Parser` and can call the same methods the grammar uses.
impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>, options: ParseOptions) -> SyntaxResult<Parser<'a>> {
    Parser::build(lexer, options, None)
  }

  pub fn with_extensions(
    lexer: Lexer<'a>,
    options: ParseOptions,
    extensions: &'a ParserExtensions,
  ) -> SyntaxResult<Parser<'a>> {
    let lexer = lexer.with_token_readers(&extensions.token_readers);
    Parser::build(lexer, options, Some(extensions))
  }

  fn build(
    lexer: Lexer<'a>,
    options: ParseOptions,
    extensions: Option<&'a ParserExtensions>,
  ) -> SyntaxResult<Parser<'a>> {
    let mut parser = Parser {
      lexer,
      extensions,
      options,
      token: Token {
        typ: TT::EOF,
        value: TokenValue::None,
        loc: Loc(0, 0),
        line: 0,
        col: 0,
        preceded_by_line_terminator: false,
      },
      peeked: None,
      prev: None,
      in_function: 0,
      in_loop: 0,
      labels: Vec::new(),
    };
    parser.token = parser.pull()?;
    Ok(parser)
  }

  pub fn options(&self) -> ParseOptions {
    self.options
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  pub fn str(&self, loc: Loc) -> &str {
    &self.lexer[loc]
  }

  // Lexes the next token and runs it through any registered token processors.
  fn pull(&mut self) -> SyntaxResult<Token> {
    let mut token = self.lexer.next_token()?;
    if let Some(ext) = self.extensions {
      for processor in ext.token_processors.iter() {
        token = processor(token)?;
      }
    };
    Ok(token)
  }

  /// The current token, which has not been consumed yet.
  pub fn token(&self) -> &Token {
    &self.token
  }

  /// The token after the current one.
  pub fn peek(&mut self) -> SyntaxResult<&Token> {
    let token = match self.peeked.take() {
      Some(t) => t,
      None => self.pull()?,
    };
    Ok(self.peeked.insert(token))
  }

  /// Consumes the current token and returns it.
  pub fn consume(&mut self) -> SyntaxResult<Token> {
    let next = match self.peeked.take() {
      Some(t) => t,
      None => self.pull()?,
    };
    let current = std::mem::replace(&mut self.token, next);
    self.prev = Some(current.clone());
    Ok(current)
  }

  pub fn is(&self, typ: TT, value: &str) -> bool {
    self.token.is(typ, value)
  }

  pub fn is_punc(&self, value: &str) -> bool {
    self.token.is_punc(value)
  }

  pub fn is_operator(&self, value: &str) -> bool {
    self.token.is_operator(value)
  }

  pub fn is_keyword(&self, value: &str) -> bool {
    self.token.is_keyword(value)
  }

  pub fn consume_if(&mut self, typ: TT, value: &str) -> SyntaxResult<MaybeToken> {
    let matched = self.is(typ, value);
    let t = MaybeToken {
      typ: self.token.typ,
      loc: self.token.loc,
      matched,
    };
    if matched {
      self.consume()?;
    };
    Ok(t)
  }

  /// Consumes the current token if it matches, otherwise fails with "Unexpected token X, expected Y".
  pub fn require(&mut self, typ: TT, value: &'static str) -> SyntaxResult<Token> {
    if self.is(typ, value) {
      self.consume()
    } else {
      Err(self.token.error(SyntaxErrorType::RequiredTokenNotFound(value)))
    }
  }

  pub fn require_punc(&mut self, value: &'static str) -> SyntaxResult<Token> {
    self.require(TT::Punctuation, value)
  }

  /// Consumes an identifier token and returns its name.
  pub fn require_name(&mut self) -> SyntaxResult<String> {
    if self.token.typ != TT::Identifier {
      return Err(self.token.error(SyntaxErrorType::RequiredTokenNotFound("name")));
    };
    Ok(self.consume()?.text().to_string())
  }

  /// An "Unexpected token" error at the current token.
  pub fn unexpected(&self) -> SyntaxError {
    self.token.unexpected()
  }

  /// An error of the given type at the current token.
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.token.error(typ)
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      lexer: self.lexer.checkpoint(),
      token: self.token.clone(),
      peeked: self.peeked.clone(),
      prev: self.prev.clone(),
    }
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.lexer.apply_checkpoint(checkpoint.lexer);
    self.token = checkpoint.token;
    self.peeked = checkpoint.peeked;
    self.prev = checkpoint.prev;
  }

  /// Whether we're inside a function body, where `return` is allowed.
  pub fn in_function(&self) -> bool {
    self.in_function > 0
  }

  // Location from `start` to the end of the most recently consumed token.
  fn loc_from(&self, start: Loc) -> Loc {
    let end = self.prev.as_ref().map_or(start.1, |t| t.loc.1);
    Loc(start.0, end.max(start.0))
  }

  fn can_insert_semicolon(&self) -> bool {
    !self.options.strict_semicolons
      && (self.token.preceded_by_line_terminator
        || self.token.typ == TT::EOF
        || self.token.is_punc("}"))
  }

  /// Consumes a statement terminator: an explicit `;`, or (unless strict) an inserted one before a newline, `}`, or the end of input.
  pub fn semicolon(&mut self) -> SyntaxResult<()> {
    if self.consume_if(TT::Punctuation, ";")?.is_match() || self.can_insert_semicolon() {
      Ok(())
    } else {
      Err(self.unexpected())
    }
  }

  // Re-lexes the current token with a regex allowed at this position, for a statement starting with `/`.
  fn relex_as_regex(&mut self) -> SyntaxResult<()> {
    self.peeked = None;
    self.lexer.rewind(&self.token);
    self.lexer.set_regex_allowed(true);
    self.token = self.pull()?;
    Ok(())
  }
}
