use super::traverse::apply_to_stmt_lists;
use super::Pass;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use emit_js::ends_with_open_if;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stx::TopLevel;

/// Replaces blocks holding a single statement with that statement.
///
/// A `then` block stays when its statement ends in an `if` without `else` and the outer `if` has an `else`, as the `else` would otherwise bind to the inner `if`. Blocks around function declarations also stay.
pub(super) struct UnwrapBlocksPass;

impl Pass for UnwrapBlocksPass {
  fn name(&self) -> &'static str {
    "unwrap-blocks"
  }

  fn run(&mut self, top: &mut Node<TopLevel>) -> bool {
    let mut visitor = UnwrapVisitor { changed: false };
    top.drive_mut(&mut visitor);
    let spliced = apply_to_stmt_lists(top, unwrap_in_list);
    visitor.changed || spliced
  }
}

type StmtNode = Node<Stmt>;

// Rewrites the statement slots of each statement before the walk descends into them.
#[derive(VisitorMut)]
#[visitor(StmtNode(enter))]
struct UnwrapVisitor {
  changed: bool,
}

impl UnwrapVisitor {
  fn enter_stmt_node(&mut self, node: &mut StmtNode) {
    let changed = &mut self.changed;
    match node.stx.as_mut() {
      Stmt::DoWhile(s) => unwrap_slot(&mut s.stx.body, false, changed),
      Stmt::ForIn(s) => unwrap_slot(&mut s.stx.body, false, changed),
      Stmt::ForTriple(s) => unwrap_slot(&mut s.stx.body, false, changed),
      Stmt::If(s) => {
        let s = s.stx.as_mut();
        unwrap_slot(&mut s.consequent, s.alternate.is_some(), changed);
        if let Some(alternate) = &mut s.alternate {
          unwrap_slot(alternate, false, changed);
        };
      }
      Stmt::Label(s) => unwrap_slot(&mut s.stx.statement, false, changed),
      Stmt::While(s) => unwrap_slot(&mut s.stx.body, false, changed),
      Stmt::With(s) => unwrap_slot(&mut s.stx.body, false, changed),
      _ => {}
    };
  }
}

fn single_unwrappable(stmt: &Node<Stmt>, keep_open_if: bool) -> bool {
  let Stmt::Block(block) = stmt.stx.as_ref() else {
    return false;
  };
  let [inner] = block.stx.body.as_slice() else {
    return false;
  };
  !matches!(inner.stx.as_ref(), Stmt::FunctionDecl(_)) && !(keep_open_if && ends_with_open_if(inner))
}

// Unwraps nested single-statement blocks one level at a time.
fn unwrap_slot(slot: &mut Node<Stmt>, keep_open_if: bool, changed: &mut bool) {
  while single_unwrappable(slot, keep_open_if) {
    let Stmt::Block(block) = slot.stx.as_mut() else {
      return;
    };
    let Some(inner) = block.stx.body.pop() else {
      return;
    };
    *slot = inner;
    *changed = true;
  }
}

fn unwrap_in_list(stmts: Vec<Node<Stmt>>, changed: &mut bool) -> Vec<Node<Stmt>> {
  stmts
    .into_iter()
    .map(|mut stmt| {
      unwrap_slot(&mut stmt, false, changed);
      stmt
    })
    .collect()
}
