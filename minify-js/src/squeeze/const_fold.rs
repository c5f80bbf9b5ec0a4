use super::expr_len;
use super::Pass;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use parse_js::ast::expr::lit::LitNumExpr;
use parse_js::ast::expr::lit::LitStrExpr;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::UnaryExpr;
use parse_js::ast::node::Node;
use parse_js::ast::stx::TopLevel;
use parse_js::loc::Loc;
use parse_js::num::JsNumber;
use parse_js::operator::OperatorName;

/// Folds `+ - * /` between number and string literals, when the result is no longer than the expression it replaces.
pub(super) struct ConstFoldPass;

impl Pass for ConstFoldPass {
  fn name(&self) -> &'static str {
    "const-fold"
  }

  fn run(&mut self, top: &mut Node<TopLevel>) -> bool {
    let mut visitor = FoldVisitor { changed: false };
    top.drive_mut(&mut visitor);
    visitor.changed
  }
}

type ExprNode = Node<Expr>;

// Exit order folds operands before the expressions that contain them, so `1+2+3` folds completely in one walk.
#[derive(VisitorMut)]
#[visitor(ExprNode(exit))]
struct FoldVisitor {
  changed: bool,
}

impl FoldVisitor {
  fn exit_expr_node(&mut self, node: &mut ExprNode) {
    let Some(folded) = fold(node) else {
      return;
    };
    match (expr_len(node), expr_len(&folded)) {
      (Some(before), Some(after)) if after <= before => {
        *node = folded;
        self.changed = true;
      }
      _ => {}
    };
  }
}

enum Const<'a> {
  Num(f64),
  Str(&'a str),
}

impl Const<'_> {
  fn to_number(&self) -> f64 {
    match self {
      Const::Num(v) => *v,
      Const::Str(s) => JsNumber::from_js_str(s).0,
    }
  }
}

fn literal(expr: &Node<Expr>) -> Option<Const<'_>> {
  match expr.stx.as_ref() {
    Expr::LitNum(num) => Some(Const::Num(num.stx.value.0)),
    Expr::LitStr(lit) => Some(Const::Str(&lit.stx.value)),
    _ => None,
  }
}

fn fold(node: &Node<Expr>) -> Option<Node<Expr>> {
  let Expr::Binary(bin) = node.stx.as_ref() else {
    return None;
  };
  let left = literal(&bin.stx.left)?;
  let right = literal(&bin.stx.right)?;
  let loc = node.loc;
  // `+` concatenates when either side is a string; the other operators always convert to numbers.
  match (bin.stx.operator, left, right) {
    (OperatorName::Addition, Const::Str(l), Const::Str(r)) => Some(str_node(loc, format!("{l}{r}"))),
    (OperatorName::Addition, Const::Str(l), Const::Num(r)) => {
      Some(str_node(loc, format!("{l}{}", JsNumber(r))))
    }
    (OperatorName::Addition, Const::Num(l), Const::Str(r)) => {
      Some(str_node(loc, format!("{}{r}", JsNumber(l))))
    }
    (op, l, r) => {
      let (l, r) = (l.to_number(), r.to_number());
      let value = match op {
        OperatorName::Addition => l + r,
        OperatorName::Subtraction => l - r,
        OperatorName::Multiplication => l * r,
        OperatorName::Division => l / r,
        _ => return None,
      };
      num_node(loc, value)
    }
  }
}

fn str_node(loc: Loc, value: String) -> Node<Expr> {
  Node::new(loc, LitStrExpr { value }).into_wrapped()
}

// Literals are never negative in parsed trees, so a negative result is written as unary minus.
fn num_node(loc: Loc, value: f64) -> Option<Node<Expr>> {
  if !value.is_finite() {
    return None;
  };
  let magnitude: Node<Expr> = Node::new(loc, LitNumExpr {
    value: JsNumber(value.abs()),
  })
  .into_wrapped();
  if value.is_sign_negative() && value != 0.0 {
    Some(
      Node::new(loc, UnaryExpr {
        operator: OperatorName::UnaryNegation,
        argument: magnitude,
      })
      .into_wrapped(),
    )
  } else {
    Some(magnitude)
  }
}
