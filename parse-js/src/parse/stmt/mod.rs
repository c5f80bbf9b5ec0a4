pub mod decl;

use super::Parser;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForInLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::StmtTokens;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::grammar::STATEMENTS_WITH_LABELS;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn statement(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.token().clone();
    let mut stmt = self.statement_inner()?;
    if self.options().embed_tokens {
      if let Some(end) = self.prev.clone() {
        stmt.assoc.set(StmtTokens { start, end });
      };
    };
    Ok(stmt)
  }

  fn statement_inner(&mut self) -> SyntaxResult<Node<Stmt>> {
    if self.is_operator("/") || self.is_operator("/=") {
      self.relex_as_regex()?;
    };

    if matches!(self.token().typ, TT::Identifier | TT::Keyword) {
      let ext = self.extensions;
      if let Some(reader) = ext.and_then(|e| e.statements.get(self.token().text())) {
        self.consume()?;
        return reader(self);
      };
    };

    let t = self.token().clone();
    #[rustfmt::skip]
    let stmt: Node<Stmt> = match t.typ {
      TT::Identifier if self.peek()?.is_punc(":") => self.labeled_stmt()?.into_wrapped(),
      TT::Punctuation => match t.text() {
        "{" => self.block_stmt()?.into_wrapped(),
        ";" => {
          self.consume()?;
          Node::new(t.loc, EmptyStmt {}).into_wrapped()
        }
        "(" | "[" => self.expr_stmt()?.into_wrapped(),
        _ => return Err(self.unexpected()),
      },
      TT::Keyword => match t.text() {
        "break" => self.break_stmt()?.into_wrapped(),
        "const" | "var" => self.var_stmt()?.into_wrapped(),
        "continue" => self.continue_stmt()?.into_wrapped(),
        "debugger" => self.debugger_stmt()?.into_wrapped(),
        "do" => self.do_while_stmt()?.into_wrapped(),
        "for" => self.for_stmt()?,
        "function" => self.func_decl()?.into_wrapped(),
        "if" => self.if_stmt()?.into_wrapped(),
        "return" => self.return_stmt()?.into_wrapped(),
        "switch" => self.switch_stmt()?.into_wrapped(),
        "throw" => self.throw_stmt()?.into_wrapped(),
        "try" => self.try_stmt()?.into_wrapped(),
        "while" => self.while_stmt()?.into_wrapped(),
        "with" => self.with_stmt()?.into_wrapped(),
        _ => return Err(self.unexpected()),
      },
      TT::EOF => return Err(self.unexpected()),
      _ => self.expr_stmt()?.into_wrapped(),
    };
    Ok(stmt)
  }

  // Runs `f` with one more level of loop nesting, so `break` and `continue` are allowed.
  fn loop_body<T>(&mut self, f: impl FnOnce(&mut Self) -> SyntaxResult<T>) -> SyntaxResult<T> {
    self.in_loop += 1;
    let res = f(self);
    self.in_loop -= 1;
    res
  }

  pub fn expr_stmt(&mut self) -> SyntaxResult<Node<ExprStmt>> {
    let start = self.token().loc;
    let expr = self.expression()?;
    self.semicolon()?;
    Ok(Node::new(self.loc_from(start), ExprStmt { expr }))
  }

  /// Parses `{ ... }`.
  pub fn block_stmt(&mut self) -> SyntaxResult<Node<BlockStmt>> {
    let start = self.require_punc("{")?.loc;
    let body = self.block_body()?;
    Ok(Node::new(self.loc_from(start), BlockStmt { body }))
  }

  /// Parses `{ ... }` and returns just the statements, for hooks that build their own node.
  pub fn block(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.require_punc("{")?;
    self.block_body()
  }

  // Statements up to and including the closing `}`.
  pub(crate) fn block_body(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    let mut body = Vec::new();
    while !self.is_punc("}") {
      if self.token().typ == TT::EOF {
        return Err(self.unexpected());
      };
      body.push(self.statement()?);
    }
    self.consume()?;
    Ok(body)
  }

  fn parenthesised(&mut self) -> SyntaxResult<Node<Expr>> {
    self.require_punc("(")?;
    let expr = self.expression()?;
    self.require_punc(")")?;
    Ok(expr)
  }

  fn labeled_stmt(&mut self) -> SyntaxResult<Node<LabelStmt>> {
    let start = self.token().loc;
    let name = self.require_name()?;
    self.require_punc(":")?;
    let t = self.token();
    if t.typ != TT::Keyword || !STATEMENTS_WITH_LABELS.contains(t.text()) {
      return Err(self.error(SyntaxErrorType::ExpectedSyntax("loop or switch")));
    };
    self.labels.push(name.clone());
    let statement = self.statement();
    self.labels.pop();
    let statement = statement?;
    Ok(Node::new(self.loc_from(start), LabelStmt { name, statement }))
  }

  // Parses the optional label of `break`/`continue` and validates the jump.
  fn jump_label(&mut self, keyword: &Token) -> SyntaxResult<Option<String>> {
    let label = if !self.can_insert_semicolon() && self.token().typ == TT::Identifier {
      let t = self.consume()?;
      let label = t.text().to_string();
      if !self.labels.contains(&label) {
        return Err(t.error(SyntaxErrorType::UnknownLabel(label)));
      };
      Some(label)
    } else {
      if self.in_loop == 0 {
        let keyword_name = if keyword.is_keyword("break") {
          "break"
        } else {
          "continue"
        };
        return Err(keyword.error(SyntaxErrorType::JumpOutsideLoop(keyword_name)));
      };
      None
    };
    self.semicolon()?;
    Ok(label)
  }

  fn break_stmt(&mut self) -> SyntaxResult<Node<BreakStmt>> {
    let keyword = self.require(TT::Keyword, "break")?;
    let label = self.jump_label(&keyword)?;
    Ok(Node::new(self.loc_from(keyword.loc), BreakStmt { label }))
  }

  fn continue_stmt(&mut self) -> SyntaxResult<Node<ContinueStmt>> {
    let keyword = self.require(TT::Keyword, "continue")?;
    let label = self.jump_label(&keyword)?;
    Ok(Node::new(self.loc_from(keyword.loc), ContinueStmt { label }))
  }

  fn debugger_stmt(&mut self) -> SyntaxResult<Node<DebuggerStmt>> {
    let start = self.require(TT::Keyword, "debugger")?.loc;
    self.semicolon()?;
    Ok(Node::new(self.loc_from(start), DebuggerStmt {}))
  }

  fn do_while_stmt(&mut self) -> SyntaxResult<Node<DoWhileStmt>> {
    let start = self.require(TT::Keyword, "do")?.loc;
    let body = self.loop_body(|p| p.statement())?;
    self.require(TT::Keyword, "while")?;
    let condition = self.parenthesised()?;
    self.semicolon()?;
    Ok(Node::new(self.loc_from(start), DoWhileStmt { condition, body }))
  }

  // Whether the current token is a name immediately followed by `in`, i.e. the head of a for-in loop.
  fn at_for_in_lhs(&mut self) -> SyntaxResult<bool> {
    Ok(self.token().typ == TT::Identifier && self.peek()?.is_operator("in"))
  }

  fn for_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::Keyword, "for")?.loc;
    self.require_punc("(")?;
    let init = if self.is_punc(";") {
      ForTripleStmtInit::None
    } else if self.is_keyword("var") {
      let var_start = self.consume()?.loc;
      if self.at_for_in_lhs()? {
        let t = self.consume()?;
        let name = Node::new(t.loc, IdPat {
          name: t.text().to_string(),
        });
        return Ok(self.for_in_stmt(start, ForInLhs::Decl(name))?.into_wrapped());
      };
      ForTripleStmtInit::Decl(self.var_declarators(var_start, VarDeclMode::Var, true)?)
    } else if self.at_for_in_lhs()? {
      let t = self.consume()?;
      let name = Node::new(t.loc, IdExpr {
        name: t.text().to_string(),
      });
      return Ok(self.for_in_stmt(start, ForInLhs::Assign(name))?.into_wrapped());
    } else {
      ForTripleStmtInit::Expr(self.expression_with(true)?)
    };
    self.require_punc(";")?;
    let cond = if self.is_punc(";") {
      None
    } else {
      Some(self.expression()?)
    };
    self.require_punc(";")?;
    let post = if self.is_punc(")") {
      None
    } else {
      Some(self.expression()?)
    };
    self.require_punc(")")?;
    let body = self.loop_body(|p| p.statement())?;
    Ok(
      Node::new(self.loc_from(start), ForTripleStmt {
        init,
        cond,
        post,
        body,
      })
      .into_wrapped(),
    )
  }

  // Continues after the loop variable of `for (var k in o)` or `for (k in o)`.
  fn for_in_stmt(&mut self, start: Loc, lhs: ForInLhs) -> SyntaxResult<Node<ForInStmt>> {
    self.require(TT::Operator, "in")?;
    let rhs = self.expression()?;
    self.require_punc(")")?;
    let body = self.loop_body(|p| p.statement())?;
    Ok(Node::new(self.loc_from(start), ForInStmt { lhs, rhs, body }))
  }

  fn if_stmt(&mut self) -> SyntaxResult<Node<IfStmt>> {
    let start = self.require(TT::Keyword, "if")?.loc;
    let test = self.parenthesised()?;
    let consequent = self.statement()?;
    let alternate = if self.consume_if(TT::Keyword, "else")?.is_match() {
      Some(self.statement()?)
    } else {
      None
    };
    Ok(Node::new(self.loc_from(start), IfStmt {
      test,
      consequent,
      alternate,
    }))
  }

  fn return_stmt(&mut self) -> SyntaxResult<Node<ReturnStmt>> {
    if !self.in_function() {
      return Err(self.error(SyntaxErrorType::ReturnOutsideFunction));
    };
    let start = self.require(TT::Keyword, "return")?.loc;
    let value = if self.consume_if(TT::Punctuation, ";")?.is_match() || self.can_insert_semicolon() {
      None
    } else {
      let value = self.expression()?;
      self.semicolon()?;
      Some(value)
    };
    Ok(Node::new(self.loc_from(start), ReturnStmt { value }))
  }

  fn switch_stmt(&mut self) -> SyntaxResult<Node<SwitchStmt>> {
    let start = self.require(TT::Keyword, "switch")?.loc;
    let test = self.parenthesised()?;
    self.require_punc("{")?;
    let branches = self.loop_body(|p| p.switch_branches())?;
    Ok(Node::new(self.loc_from(start), SwitchStmt { test, branches }))
  }

  fn switch_branches(&mut self) -> SyntaxResult<Vec<Node<SwitchBranch>>> {
    let mut branches = Vec::<Node<SwitchBranch>>::new();
    while !self.is_punc("}") {
      let t = self.token().clone();
      if t.is_keyword("case") || t.is_keyword("default") {
        self.consume()?;
        let case = if t.is_keyword("case") {
          Some(self.expression()?)
        } else {
          None
        };
        self.require_punc(":")?;
        branches.push(Node::new(self.loc_from(t.loc), SwitchBranch {
          case,
          body: Vec::new(),
        }));
        continue;
      };
      let Some(branch) = branches.last_mut() else {
        return Err(self.unexpected());
      };
      if t.typ == TT::EOF {
        return Err(self.unexpected());
      };
      let stmt = self.statement()?;
      branch.stx.body.push(stmt);
    }
    self.consume()?;
    Ok(branches)
  }

  fn throw_stmt(&mut self) -> SyntaxResult<Node<ThrowStmt>> {
    let start = self.require(TT::Keyword, "throw")?.loc;
    if self.token().preceded_by_line_terminator {
      return Err(self.error(SyntaxErrorType::LineTerminatorAfterThrow));
    };
    let value = self.expression()?;
    self.semicolon()?;
    Ok(Node::new(self.loc_from(start), ThrowStmt { value }))
  }

  fn try_stmt(&mut self) -> SyntaxResult<Node<TryStmt>> {
    let try_token = self.require(TT::Keyword, "try")?;
    let start = try_token.loc;
    let wrapped = self.block_stmt()?;
    let catch = if self.is_keyword("catch") {
      let catch_start = self.consume()?.loc;
      self.require_punc("(")?;
      let param_loc = self.token().loc;
      let name = self.require_name()?;
      let parameter = Node::new(param_loc, IdPat { name });
      self.require_punc(")")?;
      let body = self.block_stmt()?;
      Some(Node::new(self.loc_from(catch_start), CatchBlock {
        parameter,
        body,
      }))
    } else {
      None
    };
    let finally = if self.consume_if(TT::Keyword, "finally")?.is_match() {
      Some(self.block_stmt()?)
    } else {
      None
    };
    if catch.is_none() && finally.is_none() {
      return Err(try_token.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
    };
    Ok(Node::new(self.loc_from(start), TryStmt {
      wrapped,
      catch,
      finally,
    }))
  }

  fn while_stmt(&mut self) -> SyntaxResult<Node<WhileStmt>> {
    let start = self.require(TT::Keyword, "while")?.loc;
    let condition = self.parenthesised()?;
    let body = self.loop_body(|p| p.statement())?;
    Ok(Node::new(self.loc_from(start), WhileStmt { condition, body }))
  }

  fn with_stmt(&mut self) -> SyntaxResult<Node<WithStmt>> {
    let start = self.require(TT::Keyword, "with")?.loc;
    let object = self.parenthesised()?;
    let body = self.statement()?;
    Ok(Node::new(self.loc_from(start), WithStmt { object, body }))
  }
}
