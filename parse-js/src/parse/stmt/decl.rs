use crate::ast::expr::pat::IdPat;
use crate::ast::node::Node;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::parse::Parser;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses a `var` or `const` statement, including its terminator.
  pub fn var_stmt(&mut self) -> SyntaxResult<Node<VarDecl>> {
    let start = self.token().loc;
    let mode = if self.is_keyword("const") {
      VarDeclMode::Const
    } else if self.is_keyword("var") {
      VarDeclMode::Var
    } else {
      return Err(self.unexpected());
    };
    self.consume()?;
    let decl = self.var_declarators(start, mode, false)?;
    self.semicolon()?;
    Ok(decl)
  }

  /// Parses `a = 1, b` after the keyword starting at `start`. With `no_in`, initializers stop before a bare `in` operator (for loop heads).
  pub fn var_declarators(
    &mut self,
    start: Loc,
    mode: VarDeclMode,
    no_in: bool,
  ) -> SyntaxResult<Node<VarDecl>> {
    let mut declarators = Vec::new();
    loop {
      let name_loc = self.token().loc;
      let name = self.require_name()?;
      let initializer = if self.consume_if(TT::Operator, "=")?.is_match() {
        Some(self.assignment_expression(no_in)?)
      } else {
        None
      };
      declarators.push(VarDeclarator {
        name: Node::new(name_loc, IdPat { name }),
        initializer,
      });
      if !self.consume_if(TT::Punctuation, ",")?.is_match() {
        break;
      };
    }
    Ok(Node::new(self.loc_from(start), VarDecl { mode, declarators }))
  }

  pub fn func_decl(&mut self) -> SyntaxResult<Node<FuncDecl>> {
    let start = self.require(TT::Keyword, "function")?.loc;
    let name_loc = self.token().loc;
    let name = self.require_name()?;
    let function = self.func(None)?;
    Ok(Node::new(self.loc_from(start), FuncDecl {
      name: Node::new(name_loc, IdPat { name }),
      function,
    }))
  }
}
