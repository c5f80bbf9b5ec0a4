use super::take_expr;
use super::Pass;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::MemberExpr;
use parse_js::ast::node::Node;
use parse_js::ast::stx::TopLevel;
use parse_js::grammar::is_identifier;

/// Rewrites `o["name"]` to `o.name` where `name` can be written bare.
pub(super) struct SubToDotPass;

impl Pass for SubToDotPass {
  fn name(&self) -> &'static str {
    "sub-to-dot"
  }

  fn run(&mut self, top: &mut Node<TopLevel>) -> bool {
    let mut visitor = SubToDotVisitor { changed: false };
    top.drive_mut(&mut visitor);
    visitor.changed
  }
}

type ExprNode = Node<Expr>;

#[derive(VisitorMut)]
#[visitor(ExprNode(exit))]
struct SubToDotVisitor {
  changed: bool,
}

impl SubToDotVisitor {
  fn exit_expr_node(&mut self, node: &mut ExprNode) {
    let Expr::ComputedMember(member) = node.stx.as_mut() else {
      return;
    };
    let Expr::LitStr(key) = member.stx.member.stx.as_ref() else {
      return;
    };
    if !is_identifier(&key.stx.value) {
      return;
    };
    let right = key.stx.value.clone();
    let loc = node.loc;
    let object = take_expr(&mut member.stx.object);
    *node = Node::new(loc, MemberExpr {
      left: object,
      right,
    })
    .into_wrapped();
    self.changed = true;
  }
}
