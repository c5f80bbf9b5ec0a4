use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use parse_js::ast::func::Func;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::BlockStmt;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stmt::SwitchBranch;
use parse_js::ast::stx::TopLevel;

type TopLevelNode = Node<TopLevel>;
type FuncNode = Node<Func>;
type BlockStmtNode = Node<BlockStmt>;
type SwitchBranchNode = Node<SwitchBranch>;

#[derive(VisitorMut)]
#[visitor(
  TopLevelNode(enter),
  FuncNode(enter),
  BlockStmtNode(enter),
  SwitchBranchNode(enter)
)]
struct StmtListVisitor<'a> {
  apply: &'a mut dyn FnMut(Vec<Node<Stmt>>, &mut bool) -> Vec<Node<Stmt>>,
  changed: bool,
}

impl StmtListVisitor<'_> {
  fn rewrite(&mut self, stmts: &mut Vec<Node<Stmt>>) {
    let owned = std::mem::take(stmts);
    *stmts = (self.apply)(owned, &mut self.changed);
  }

  fn enter_top_level_node(&mut self, node: &mut TopLevelNode) {
    self.rewrite(&mut node.stx.body);
  }

  fn enter_func_node(&mut self, node: &mut FuncNode) {
    self.rewrite(&mut node.stx.body);
  }

  fn enter_block_stmt_node(&mut self, node: &mut BlockStmtNode) {
    self.rewrite(&mut node.stx.body);
  }

  fn enter_switch_branch_node(&mut self, node: &mut SwitchBranchNode) {
    self.rewrite(&mut node.stx.body);
  }
}

/// Runs `apply` on every statement list in the program: the program body, function bodies, blocks (including `try`, `catch` and `finally` bodies) and `switch` branches. Lists are rewritten before their statements are visited.
pub(super) fn apply_to_stmt_lists<F>(top: &mut Node<TopLevel>, apply: F) -> bool
where
  F: FnMut(Vec<Node<Stmt>>, &mut bool) -> Vec<Node<Stmt>>,
{
  let mut apply = apply;
  let mut visitor = StmtListVisitor {
    apply: &mut apply,
    changed: false,
  };
  top.drive_mut(&mut visitor);
  visitor.changed
}
