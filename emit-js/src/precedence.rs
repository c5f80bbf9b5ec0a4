use parse_js::ast::expr::Expr;
use parse_js::operator::Associativity;
use parse_js::operator::OperatorName;
use parse_js::operator::PRECEDENCE_ASSIGNMENT;
use parse_js::operator::PRECEDENCE_CALL_MEMBER;
use parse_js::operator::PRECEDENCE_COMMA;
use parse_js::operator::PRECEDENCE_CONDITIONAL;
use parse_js::operator::PRECEDENCE_POSTFIX;
use parse_js::operator::PRECEDENCE_PRIMARY;
use parse_js::operator::PRECEDENCE_UNARY;

/// Wrapper around a precedence value with total ordering. Higher binds tighter.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Prec(u8);

impl Prec {
  pub const LOWEST: Prec = Prec(0);
  pub const COMMA: Prec = Prec(PRECEDENCE_COMMA);
  pub const ASSIGNMENT: Prec = Prec(PRECEDENCE_ASSIGNMENT);
  pub const CONDITIONAL: Prec = Prec(PRECEDENCE_CONDITIONAL);
  pub const UNARY: Prec = Prec(PRECEDENCE_UNARY);
  pub const POSTFIX: Prec = Prec(PRECEDENCE_POSTFIX);
  pub const CALL_MEMBER: Prec = Prec(PRECEDENCE_CALL_MEMBER);
  pub const PRIMARY: Prec = Prec(PRECEDENCE_PRIMARY);

  pub const fn new(value: u8) -> Self {
    Prec(value)
  }

  pub const fn tighter(self) -> Self {
    Prec(self.0 + 1)
  }

  pub const fn value(self) -> u8 {
    self.0
  }
}

#[derive(Clone, Copy, Debug)]
pub enum Side {
  Left,
  Right,
}

pub fn needs_parens(child_prec: Prec, min_prec: Prec) -> bool {
  child_prec < min_prec
}

/// The weakest operand precedence that can sit on `side` of `op` without parentheses. The side that equal precedence would reassociate away from needs one level tighter.
pub fn child_min_prec_for_binary(op: OperatorName, side: Side) -> Prec {
  let operator = op.operator();
  let prec = Prec::new(operator.precedence);
  match (operator.associativity, side) {
    (Associativity::Left, Side::Left) | (Associativity::Right, Side::Right) => prec,
    (Associativity::Left, Side::Right) | (Associativity::Right, Side::Left) => prec.tighter(),
  }
}

pub fn expr_prec(expr: &Expr) -> Prec {
  match expr {
    Expr::Seq(_) => Prec::COMMA,
    Expr::Assign(_) => Prec::ASSIGNMENT,
    Expr::Cond(_) => Prec::CONDITIONAL,
    Expr::Binary(bin) => Prec::new(bin.stx.operator.precedence()),
    Expr::Unary(_) => Prec::UNARY,
    Expr::UnaryPostfix(_) => Prec::POSTFIX,
    Expr::Call(_) | Expr::Member(_) | Expr::ComputedMember(_) | Expr::New(_) => Prec::CALL_MEMBER,
    // Only hand-built trees hold negative literals; they render with a leading `-`.
    Expr::LitNum(num) if num.stx.value.0.is_sign_negative() && !num.stx.value.0.is_nan() => {
      Prec::UNARY
    }
    Expr::Func(_)
    | Expr::Id(_)
    | Expr::LitArr(_)
    | Expr::LitAtom(_)
    | Expr::LitNum(_)
    | Expr::LitObj(_)
    | Expr::LitRegex(_)
    | Expr::LitStr(_) => Prec::PRIMARY,
  }
}
