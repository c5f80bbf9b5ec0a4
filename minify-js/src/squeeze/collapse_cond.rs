use super::stmts_len;
use super::traverse::apply_to_stmt_lists;
use super::Pass;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use parse_js::ast::expr::BinaryExpr;
use parse_js::ast::expr::CondExpr;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::ExprStmt;
use parse_js::ast::stmt::IfStmt;
use parse_js::ast::stmt::ReturnStmt;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stmt::ThrowStmt;
use parse_js::ast::stx::TopLevel;
use parse_js::loc::Loc;
use parse_js::operator::OperatorName;

/// Turns `if` statements into conditional and logical expressions:
///
/// - `if(c)a;else b;` to `c?a:b;`
/// - `if(c)return a;else return b;` to `return c?a:b;`, and likewise for `throw`
/// - `if(c)return a;return b;` to `return c?a:b;`
/// - `if(c)a;` to `c&&a;`, or `x||a;` when `c` is `!x`
///
/// A rewrite is only kept when its compact output is shorter.
pub(super) struct CollapseCondPass;

impl Pass for CollapseCondPass {
  fn name(&self) -> &'static str {
    "collapse-cond"
  }

  fn run(&mut self, top: &mut Node<TopLevel>) -> bool {
    let merged = apply_to_stmt_lists(top, merge_trailing_returns);
    let mut visitor = CollapseVisitor { changed: false };
    top.drive_mut(&mut visitor);
    merged || visitor.changed
  }
}

type StmtNode = Node<Stmt>;

#[derive(VisitorMut)]
#[visitor(StmtNode(enter))]
struct CollapseVisitor {
  changed: bool,
}

impl CollapseVisitor {
  fn enter_stmt_node(&mut self, node: &mut StmtNode) {
    let Stmt::If(if_stmt) = node.stx.as_ref() else {
      return;
    };
    let Some(candidate) = collapse_if(node.loc, if_stmt) else {
      return;
    };
    if is_shorter(&[&candidate], &[&*node]) {
      *node = candidate;
      self.changed = true;
    };
  }
}

fn is_shorter(candidate: &[&Node<Stmt>], original: &[&Node<Stmt>]) -> bool {
  match (
    stmts_len(candidate.iter().copied()),
    stmts_len(original.iter().copied()),
  ) {
    (Some(after), Some(before)) => after < before,
    _ => false,
  }
}

fn collapse_if(loc: Loc, if_stmt: &Node<IfStmt>) -> Option<Node<Stmt>> {
  let IfStmt {
    test,
    consequent,
    alternate,
  } = if_stmt.stx.as_ref();
  let Some(alternate) = alternate else {
    let Stmt::Expr(then) = consequent.stx.as_ref() else {
      return None;
    };
    let expr = guard(loc, test, &then.stx.expr);
    return Some(expr_stmt(loc, expr));
  };
  match (consequent.stx.as_ref(), alternate.stx.as_ref()) {
    (Stmt::Expr(a), Stmt::Expr(b)) => Some(expr_stmt(
      loc,
      cond(loc, test, &a.stx.expr, &b.stx.expr),
    )),
    (Stmt::Return(a), Stmt::Return(b)) => {
      let (Some(a), Some(b)) = (&a.stx.value, &b.stx.value) else {
        return None;
      };
      Some(return_stmt(loc, cond(loc, test, a, b)))
    }
    (Stmt::Throw(a), Stmt::Throw(b)) => Some(
      Node::new(loc, ThrowStmt {
        value: cond(loc, test, &a.stx.value, &b.stx.value),
      })
      .into_wrapped(),
    ),
    _ => None,
  }
}

// `if(c)return a;return b;` anywhere in a statement list.
fn merge_trailing_returns(stmts: Vec<Node<Stmt>>, changed: &mut bool) -> Vec<Node<Stmt>> {
  let mut out = Vec::with_capacity(stmts.len());
  let mut iter = stmts.into_iter().peekable();
  while let Some(stmt) = iter.next() {
    if let Some(next) = iter.peek() {
      if let Some(merged) = merge_return_pair(&stmt, next) {
        if is_shorter(&[&merged], &[&stmt, next]) {
          out.push(merged);
          iter.next();
          *changed = true;
          continue;
        };
      };
    };
    out.push(stmt);
  }
  out
}

fn merge_return_pair(first: &Node<Stmt>, second: &Node<Stmt>) -> Option<Node<Stmt>> {
  let Stmt::If(if_stmt) = first.stx.as_ref() else {
    return None;
  };
  if if_stmt.stx.alternate.is_some() {
    return None;
  };
  let Stmt::Return(then) = if_stmt.stx.consequent.stx.as_ref() else {
    return None;
  };
  let Stmt::Return(after) = second.stx.as_ref() else {
    return None;
  };
  let (Some(a), Some(b)) = (&then.stx.value, &after.stx.value) else {
    return None;
  };
  Some(return_stmt(first.loc, cond(first.loc, &if_stmt.stx.test, a, b)))
}

// `c?a:b`, or `x?b:a` when `c` is `!x`.
fn cond(loc: Loc, test: &Node<Expr>, a: &Node<Expr>, b: &Node<Expr>) -> Node<Expr> {
  let (test, consequent, alternate) = match negated(test) {
    Some(inner) => (inner, b, a),
    None => (test, a, b),
  };
  Node::new(loc, CondExpr {
    test: test.clone(),
    consequent: consequent.clone(),
    alternate: alternate.clone(),
  })
  .into_wrapped()
}

// `c&&a`, or `x||a` when `c` is `!x`.
fn guard(loc: Loc, test: &Node<Expr>, then: &Node<Expr>) -> Node<Expr> {
  let (operator, left) = match negated(test) {
    Some(inner) => (OperatorName::LogicalOr, inner),
    None => (OperatorName::LogicalAnd, test),
  };
  Node::new(loc, BinaryExpr {
    operator,
    left: left.clone(),
    right: then.clone(),
  })
  .into_wrapped()
}

fn negated(expr: &Node<Expr>) -> Option<&Node<Expr>> {
  match expr.stx.as_ref() {
    Expr::Unary(unary) if unary.stx.operator == OperatorName::LogicalNot => Some(&unary.stx.argument),
    _ => None,
  }
}

fn expr_stmt(loc: Loc, expr: Node<Expr>) -> Node<Stmt> {
  Node::new(loc, ExprStmt { expr }).into_wrapped()
}

fn return_stmt(loc: Loc, value: Node<Expr>) -> Node<Stmt> {
  Node::new(loc, ReturnStmt { value: Some(value) }).into_wrapped()
}
