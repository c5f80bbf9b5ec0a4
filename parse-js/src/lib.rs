use ast::node::Node;
use ast::stx::TopLevel;
use error::SyntaxResult;
use lex::Lexer;
use parse::ext::ParserExtensions;
use parse::ParseOptions;
use parse::Parser;

pub mod ast;
pub mod char;
pub mod error;
pub mod grammar;
pub mod lex;
pub mod loc;
pub mod num;
pub mod operator;
pub mod parse;
pub mod token;
mod util;

pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  parse_with_options(source, ParseOptions::default())
}

pub fn parse_with_options(source: &str, options: ParseOptions) -> SyntaxResult<Node<TopLevel>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer, options)?;
  parser.parse_top_level()
}

/// Parses with grammar hooks installed, e.g. for a macro layer.
pub fn parse_with_extensions(
  source: &str,
  options: ParseOptions,
  extensions: &ParserExtensions,
) -> SyntaxResult<Node<TopLevel>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::with_extensions(lexer, options, extensions)?;
  parser.parse_top_level()
}
