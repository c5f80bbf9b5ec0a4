use crate::precedence::child_min_prec_for_binary;
use crate::precedence::expr_prec;
use crate::precedence::needs_parens;
use crate::precedence::Prec;
use crate::precedence::Side;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LeadingToken {
  BraceOpen,
  Function,
  Other,
}

/// The first token `expr` renders to, looking through operands that are written without parentheses.
pub(crate) fn expr_leading_token(expr: &Node<Expr>) -> LeadingToken {
  let (child, min_prec) = match expr.stx.as_ref() {
    Expr::LitObj(_) => return LeadingToken::BraceOpen,
    Expr::Func(_) => return LeadingToken::Function,
    Expr::Assign(assign) => (&assign.stx.target, Prec::CALL_MEMBER),
    Expr::Binary(bin) => (
      &bin.stx.left,
      child_min_prec_for_binary(bin.stx.operator, Side::Left),
    ),
    Expr::Call(call) => (&call.stx.callee, Prec::CALL_MEMBER),
    Expr::ComputedMember(mem) => (&mem.stx.object, Prec::CALL_MEMBER),
    Expr::Cond(cond) => (&cond.stx.test, Prec::CONDITIONAL.tighter()),
    Expr::Member(mem) => (&mem.stx.left, Prec::CALL_MEMBER),
    Expr::Seq(seq) => match seq.stx.exprs.first() {
      Some(first) => (first, Prec::ASSIGNMENT),
      None => return LeadingToken::Other,
    },
    Expr::UnaryPostfix(post) => (&post.stx.argument, Prec::CALL_MEMBER),
    _ => return LeadingToken::Other,
  };
  if needs_parens(expr_prec(child.stx.as_ref()), min_prec) {
    return LeadingToken::Other;
  }
  expr_leading_token(child)
}

/// An expression statement may not begin with `{` (a block) or `function` (a declaration).
pub fn expr_stmt_needs_parens(expr: &Node<Expr>) -> bool {
  expr_leading_token(expr) != LeadingToken::Other
}
