//! Hooks for extending the grammar without modifying the parser.
//!
//! A macro or templating layer registers callbacks here and passes the set to [`crate::parse_with_extensions`]:
//! - token readers take over lexing whenever a specific character starts a token;
//! - statement readers take over after a given keyword or name starts a statement;
//! - call parsers take over when a given name is called, e.g. `name(...)`;
//! - token processors see (and may replace) every token before the grammar does.

use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxResult;
use crate::lex::Lexer;
use crate::lex::TokenReader;
use crate::token::Token;
use ahash::HashMap;

/// Called after the statement's leading keyword or name has been consumed.
pub type StatementReader = Box<dyn Fn(&mut Parser<'_>) -> SyntaxResult<Node<Stmt>> + Send + Sync>;
/// Called with the callee and the parser positioned on the opening `(`.
pub type CallParser =
  Box<dyn Fn(&mut Parser<'_>, Node<Expr>) -> SyntaxResult<Node<Expr>> + Send + Sync>;
pub type TokenProcessor = Box<dyn Fn(Token) -> SyntaxResult<Token> + Send + Sync>;

#[derive(Default)]
pub struct ParserExtensions {
  pub(crate) token_readers: HashMap<char, TokenReader>,
  pub(crate) statements: HashMap<String, StatementReader>,
  pub(crate) call_parsers: HashMap<String, CallParser>,
  pub(crate) token_processors: Vec<TokenProcessor>,
}

impl ParserExtensions {
  pub fn new() -> ParserExtensions {
    ParserExtensions::default()
  }

  pub fn with_token_reader(
    mut self,
    trigger: char,
    reader: impl Fn(&mut Lexer<'_>) -> SyntaxResult<Token> + Send + Sync + 'static,
  ) -> ParserExtensions {
    self.token_readers.insert(trigger, Box::new(reader));
    self
  }

  pub fn with_statement(
    mut self,
    word: impl Into<String>,
    reader: impl Fn(&mut Parser<'_>) -> SyntaxResult<Node<Stmt>> + Send + Sync + 'static,
  ) -> ParserExtensions {
    self.statements.insert(word.into(), Box::new(reader));
    self
  }

  pub fn with_call_parser(
    mut self,
    name: impl Into<String>,
    parser: impl Fn(&mut Parser<'_>, Node<Expr>) -> SyntaxResult<Node<Expr>> + Send + Sync + 'static,
  ) -> ParserExtensions {
    self.call_parsers.insert(name.into(), Box::new(parser));
    self
  }

  /// Processors run in registration order.
  pub fn with_token_processor(
    mut self,
    processor: impl Fn(Token) -> SyntaxResult<Token> + Send + Sync + 'static,
  ) -> ParserExtensions {
    self.token_processors.push(Box::new(processor));
    self
  }

  pub fn is_empty(&self) -> bool {
    self.token_readers.is_empty()
      && self.statements.is_empty()
      && self.call_parsers.is_empty()
      && self.token_processors.is_empty()
  }
}
