use super::Parser;
use crate::ast::expr::pat::IdPat;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses the parameter list and body of a function, starting at `(`.
  pub fn func(&mut self, name: Option<Node<IdPat>>) -> SyntaxResult<Node<Func>> {
    let start = self.require_punc("(")?.loc;
    let mut params = Vec::new();
    while !self.is_punc(")") {
      if !params.is_empty() {
        self.require_punc(",")?;
      };
      let loc = self.token().loc;
      let name = self.require_name()?;
      params.push(Node::new(loc, IdPat { name }));
    }
    self.consume()?;
    self.require_punc("{")?;

    // A function body starts a fresh context: labels and loops of the enclosing code are not visible.
    let outer_loop = std::mem::replace(&mut self.in_loop, 0);
    let outer_labels = std::mem::take(&mut self.labels);
    self.in_function += 1;
    let body = self.block_body();
    self.in_function -= 1;
    self.in_loop = outer_loop;
    self.labels = outer_labels;

    Ok(Node::new(self.loc_from(start), Func {
      name,
      params,
      body: body?,
    }))
  }

  /// Parses `function [name](...) {...}` in expression position.
  pub fn func_expr_name(&mut self) -> SyntaxResult<Option<Node<IdPat>>> {
    if self.token().typ != TT::Identifier {
      return Ok(None);
    };
    let loc = self.token().loc;
    let name = self.require_name()?;
    Ok(Some(Node::new(loc, IdPat { name })))
  }
}
