use crate::parse::Parser;
use crate::ast::expr::lit::Atom;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitAtomExpr;
use crate::ast::expr::lit::LitNumExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::LitRegexExpr;
use crate::ast::expr::lit::LitStrExpr;
use crate::ast::expr::lit::ObjMember;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::error::SyntaxResult;
use crate::token::TokenValue;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Consumes a number, string, regex, or atom token.
  pub fn literal(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.token().clone();
    #[rustfmt::skip]
    let expr: Node<Expr> = match (&t.typ, &t.value) {
      (TT::LiteralNumber, TokenValue::Num(value)) => Node::new(t.loc, LitNumExpr { value: *value }).into_wrapped(),
      (TT::LiteralString, TokenValue::Str(value)) => Node::new(t.loc, LitStrExpr { value: value.clone() }).into_wrapped(),
      (TT::LiteralRegex, TokenValue::Regex { pattern, flags }) => Node::new(t.loc, LitRegexExpr {
        pattern: pattern.clone(),
        flags: flags.clone(),
      }).into_wrapped(),
      (TT::Atom, _) => {
        let Some(value) = Atom::from_keyword(t.text()) else {
          return Err(t.unexpected());
        };
        Node::new(t.loc, LitAtomExpr { value }).into_wrapped()
      }
      _ => return Err(t.unexpected()),
    };
    self.consume()?;
    Ok(expr)
  }

  pub fn array_lit(&mut self) -> SyntaxResult<Node<LitArrExpr>> {
    let start = self.require_punc("[")?.loc;
    let mut elements = Vec::new();
    while !self.is_punc("]") {
      if self.consume_if(TT::Punctuation, ",")?.is_match() {
        elements.push(LitArrElem::Empty);
        continue;
      };
      elements.push(LitArrElem::Single(self.assignment_expression(false)?));
      if !self.is_punc("]") {
        self.require_punc(",")?;
      };
    }
    self.consume()?;
    Ok(Node::new(self.loc_from(start), LitArrExpr { elements }))
  }

  pub fn object_lit(&mut self) -> SyntaxResult<Node<LitObjExpr>> {
    let start = self.require_punc("{")?.loc;
    let mut members = Vec::new();
    while !self.is_punc("}") {
      if !members.is_empty() {
        self.require_punc(",")?;
        // Trailing comma.
        if self.is_punc("}") {
          break;
        };
      };
      let key_loc = self.token().loc;
      let key = self.property_name()?;
      self.require_punc(":")?;
      let value = self.assignment_expression(false)?;
      members.push(Node::new(self.loc_from(key_loc), ObjMember { key, value }));
    }
    self.consume()?;
    Ok(Node::new(self.loc_from(start), LitObjExpr { members }))
  }

  // An object literal key: a name, keyword, string, or number.
  fn property_name(&mut self) -> SyntaxResult<String> {
    let t = self.token();
    let key = match (&t.typ, &t.value) {
      (TT::LiteralNumber, TokenValue::Num(n)) => n.to_string(),
      (TT::Atom | TT::Identifier | TT::Keyword | TT::LiteralString, TokenValue::Str(s)) => s.clone(),
      (TT::Operator, TokenValue::Str(s)) if s.chars().all(|c| c.is_ascii_alphabetic()) => s.clone(),
      _ => return Err(self.unexpected()),
    };
    self.consume()?;
    Ok(key)
  }
}
