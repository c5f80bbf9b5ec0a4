use super::traverse::apply_to_stmt_lists;
use super::Pass;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stx::TopLevel;

/// Merges adjacent `var` (or adjacent `const`) statements: `var a=1;var b;` becomes `var a=1,b;`.
pub(super) struct JoinVarsPass;

impl Pass for JoinVarsPass {
  fn name(&self) -> &'static str {
    "join-vars"
  }

  fn run(&mut self, top: &mut Node<TopLevel>) -> bool {
    apply_to_stmt_lists(top, join_vars)
  }
}

fn join_vars(stmts: Vec<Node<Stmt>>, changed: &mut bool) -> Vec<Node<Stmt>> {
  let mut out: Vec<Node<Stmt>> = Vec::with_capacity(stmts.len());
  for mut stmt in stmts {
    if let Some(prev) = out.last_mut() {
      if let (Stmt::VarDecl(prev_decl), Stmt::VarDecl(next_decl)) =
        (prev.stx.as_mut(), stmt.stx.as_mut())
      {
        if prev_decl.stx.mode == next_decl.stx.mode {
          prev_decl
            .stx
            .declarators
            .append(&mut next_decl.stx.declarators);
          *changed = true;
          continue;
        };
      };
    };
    out.push(stmt);
  }
  out
}
