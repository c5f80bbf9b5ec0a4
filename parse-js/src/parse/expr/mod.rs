pub mod lit;

use super::Parser;
use crate::ast::expr::AssignExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::SeqExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::grammar::PRECEDENCE;
use crate::operator::OperatorName;
use crate::parse::operator::ASSIGNMENT_OPERATOR_MAPPING;
use crate::parse::operator::BINARY_OPERATOR_MAPPING;
use crate::parse::operator::UNARY_POSTFIX_OPERATOR_MAPPING;
use crate::parse::operator::UNARY_PREFIX_OPERATOR_MAPPING;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses a full expression, including the comma operator.
  pub fn expression(&mut self) -> SyntaxResult<Node<Expr>> {
    self.expression_with(false)
  }

  /// Like `expression`, but with `no_in` a bare `in` operator ends the expression, as required in a classic `for` head.
  pub fn expression_with(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let first = self.assignment_expression(no_in)?;
    if !self.is_punc(",") {
      return Ok(first);
    };
    let start = first.loc;
    let mut exprs = vec![first];
    while self.consume_if(TT::Punctuation, ",")?.is_match() {
      exprs.push(self.assignment_expression(no_in)?);
    }
    Ok(Node::new(self.loc_from(start), SeqExpr { exprs }).into_wrapped())
  }

  /// Parses an expression without a top level comma, e.g. a call argument.
  pub fn assignment_expression(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let left = self.conditional(no_in)?;
    let t = self.token();
    if t.typ != TT::Operator {
      return Ok(left);
    };
    let Some(&operator) = ASSIGNMENT_OPERATOR_MAPPING.get(t.text()) else {
      return Ok(left);
    };
    if !left.stx.is_assignable() {
      return Err(self.error(SyntaxErrorType::InvalidAssigmentTarget));
    };
    self.consume()?;
    let value = self.assignment_expression(no_in)?;
    Ok(
      Node::new(self.loc_from(left.loc), AssignExpr {
        operator,
        target: left,
        value,
      })
      .into_wrapped(),
    )
  }

  fn conditional(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let test = self.binary(no_in)?;
    if !self.consume_if(TT::Operator, "?")?.is_match() {
      return Ok(test);
    };
    let consequent = self.assignment_expression(false)?;
    self.require_punc(":")?;
    let alternate = self.assignment_expression(no_in)?;
    Ok(
      Node::new(self.loc_from(test.loc), CondExpr {
        test,
        consequent,
        alternate,
      })
      .into_wrapped(),
    )
  }

  fn binary(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let left = self.unary(true)?;
    self.binary_rhs(left, 0, no_in)
  }

  // Precedence climbing: absorbs operators binding tighter than `min_prec` into `left`.
  fn binary_rhs(
    &mut self,
    mut left: Node<Expr>,
    min_prec: u8,
    no_in: bool,
  ) -> SyntaxResult<Node<Expr>> {
    loop {
      let t = self.token();
      if t.typ != TT::Operator || (no_in && t.text() == "in") {
        return Ok(left);
      };
      let (Some(&prec), Some(&operator)) = (
        PRECEDENCE.get(t.text()),
        BINARY_OPERATOR_MAPPING.get(t.text()),
      ) else {
        return Ok(left);
      };
      if prec <= min_prec {
        return Ok(left);
      };
      self.consume()?;
      let right = self.unary(true)?;
      let right = self.binary_rhs(right, prec, no_in)?;
      left = Node::new(self.loc_from(left.loc), BinaryExpr {
        operator,
        left,
        right,
      })
      .into_wrapped();
    }
  }

  fn unary(&mut self, allow_calls: bool) -> SyntaxResult<Node<Expr>> {
    let t = self.token().clone();
    if t.typ == TT::Operator {
      if let Some(&operator) = UNARY_PREFIX_OPERATOR_MAPPING.get(t.text()) {
        self.consume()?;
        let argument = self.unary(allow_calls)?;
        if matches!(
          operator,
          OperatorName::PrefixIncrement | OperatorName::PrefixDecrement
        ) && !argument.stx.is_assignable()
        {
          return Err(t.error(SyntaxErrorType::InvalidUpdateTarget(operator.text())));
        };
        return Ok(Node::new(self.loc_from(t.loc), UnaryExpr { operator, argument }).into_wrapped());
      };
    };

    let mut expr = self.primary(allow_calls)?;
    // A postfix operator must be on the same line as its operand.
    while self.token().typ == TT::Operator && !self.token().preceded_by_line_terminator {
      let Some(&operator) = UNARY_POSTFIX_OPERATOR_MAPPING.get(self.token().text()) else {
        break;
      };
      if !expr.stx.is_assignable() {
        return Err(self.error(SyntaxErrorType::InvalidUpdateTarget(operator.text())));
      };
      self.consume()?;
      expr = Node::new(self.loc_from(expr.loc), UnaryPostfixExpr {
        operator,
        argument: expr,
      })
      .into_wrapped();
    }
    Ok(expr)
  }

  fn primary(&mut self, allow_calls: bool) -> SyntaxResult<Node<Expr>> {
    if self.is_operator("new") {
      return self.new_expr(allow_calls);
    };
    let t = self.token().clone();
    let expr: Node<Expr> = match t.typ {
      TT::Punctuation => match t.text() {
        "(" => {
          self.consume()?;
          let expr = self.expression()?;
          self.require_punc(")")?;
          expr
        }
        "[" => self.array_lit()?.into_wrapped(),
        "{" => self.object_lit()?.into_wrapped(),
        _ => return Err(self.unexpected()),
      },
      TT::Keyword if t.text() == "function" => {
        self.consume()?;
        let name = self.func_expr_name()?;
        let func = self.func(name)?;
        Node::new(self.loc_from(t.loc), FuncExpr { func }).into_wrapped()
      }
      TT::Identifier => {
        self.consume()?;
        Node::new(t.loc, IdExpr {
          name: t.text().to_string(),
        })
        .into_wrapped()
      }
      TT::Atom | TT::LiteralNumber | TT::LiteralRegex | TT::LiteralString => self.literal()?,
      _ => return Err(self.unexpected()),
    };
    self.subscripts(expr, allow_calls)
  }

  fn new_expr(&mut self, allow_calls: bool) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::Operator, "new")?.loc;
    let callee = self.primary(false)?;
    let arguments = if self.consume_if(TT::Punctuation, "(")?.is_match() {
      self.expr_list(")")?
    } else {
      Vec::new()
    };
    let expr = Node::new(self.loc_from(start), NewExpr { callee, arguments }).into_wrapped();
    self.subscripts(expr, allow_calls)
  }

  // Member accesses and (if allowed) calls following `expr`.
  fn subscripts(&mut self, mut expr: Node<Expr>, allow_calls: bool) -> SyntaxResult<Node<Expr>> {
    loop {
      if self.consume_if(TT::Punctuation, ".")?.is_match() {
        let right = self.member_name()?;
        expr = Node::new(self.loc_from(expr.loc), MemberExpr { left: expr, right }).into_wrapped();
      } else if self.consume_if(TT::Punctuation, "[")?.is_match() {
        let member = self.expression()?;
        self.require_punc("]")?;
        expr = Node::new(self.loc_from(expr.loc), ComputedMemberExpr {
          object: expr,
          member,
        })
        .into_wrapped();
      } else if allow_calls && self.is_punc("(") {
        let ext = self.extensions;
        let call_parser = match expr.stx.as_ref() {
          Expr::Id(id) => ext.and_then(|e| e.call_parsers.get(id.stx.name.as_str())),
          _ => None,
        };
        if let Some(call_parser) = call_parser {
          expr = call_parser(self, expr)?;
          continue;
        };
        self.consume()?;
        let arguments = self.expr_list(")")?;
        expr = Node::new(self.loc_from(expr.loc), CallExpr {
          callee: expr,
          arguments,
        })
        .into_wrapped();
      } else {
        return Ok(expr);
      };
    }
  }

  /// Parses comma separated expressions up to and including `closing`; the opening token must already be consumed.
  pub fn expr_list(&mut self, closing: &'static str) -> SyntaxResult<Vec<Node<Expr>>> {
    let mut list = Vec::new();
    while !self.is_punc(closing) {
      if !list.is_empty() {
        self.require_punc(",")?;
      };
      list.push(self.assignment_expression(false)?);
    }
    self.consume()?;
    Ok(list)
  }

  // The name after `.`; keywords and atoms are allowed here.
  fn member_name(&mut self) -> SyntaxResult<String> {
    let t = self.token();
    let is_word = match t.typ {
      TT::Atom | TT::Identifier | TT::Keyword => true,
      TT::Operator => t.text().chars().all(|c| c.is_ascii_alphabetic()),
      _ => false,
    };
    if !is_word {
      return Err(self.error(SyntaxErrorType::RequiredTokenNotFound("name")));
    };
    Ok(self.consume()?.text().to_string())
  }
}
