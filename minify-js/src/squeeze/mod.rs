//! Size-reducing tree rewrites that never change behavior.
//!
//! Each rewrite is a [`Pass`]; the [`PassPipeline`] repeats all passes until none of them changes the tree, so squeezing an already squeezed tree is a no-op.

use emit_js::emit_js_expr;
use emit_js::emit_stmt;
use emit_js::EmitOptions;
use emit_js::Emitter;
use parse_js::ast::expr::lit::Atom;
use parse_js::ast::expr::lit::LitAtomExpr;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stx::TopLevel;
use std::fmt;
use tracing::debug;
use tracing::debug_span;

mod collapse_cond;
mod const_fold;
mod join_vars;
mod sub_to_dot;
mod traverse;
mod unwrap_blocks;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SqueezeOptions {
  /// Upper bound on rounds of the pass pipeline. Each round runs every pass once.
  pub max_iterations: usize,
}

impl Default for SqueezeOptions {
  fn default() -> Self {
    SqueezeOptions { max_iterations: 8 }
  }
}

/// Rewrites `top` in place into a smaller equivalent program.
pub fn squeeze(top: &mut Node<TopLevel>, opts: &SqueezeOptions) {
  let span = debug_span!("squeeze", max_iterations = opts.max_iterations);
  let _guard = span.enter();

  let mut pipeline = PassPipeline::new(vec![
    Box::new(const_fold::ConstFoldPass),
    Box::new(sub_to_dot::SubToDotPass),
    Box::new(unwrap_blocks::UnwrapBlocksPass),
    Box::new(join_vars::JoinVarsPass),
    Box::new(collapse_cond::CollapseCondPass),
  ]);
  let rounds = pipeline.run(top, opts.max_iterations);
  debug!(rounds, "squeezed");
}

trait Pass {
  fn name(&self) -> &'static str;
  fn run(&mut self, top: &mut Node<TopLevel>) -> bool;
}

struct PassPipeline {
  passes: Vec<Box<dyn Pass>>,
}

impl PassPipeline {
  fn new(passes: Vec<Box<dyn Pass>>) -> Self {
    Self { passes }
  }

  // Returns the number of rounds that changed something.
  fn run(&mut self, top: &mut Node<TopLevel>, max_iters: usize) -> usize {
    let mut rounds = 0;
    for _ in 0..max_iters {
      let mut changed = false;
      for pass in self.passes.iter_mut() {
        let pass_changed = pass.run(top);
        if pass_changed {
          debug!(pass = pass.name(), "pass rewrote tree");
        };
        changed |= pass_changed;
      }
      if !changed {
        break;
      }
      rounds += 1;
    }
    rounds
  }
}

impl fmt::Debug for PassPipeline {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PassPipeline")
      .field(
        "passes",
        &self.passes.iter().map(|p| p.name()).collect::<Vec<_>>(),
      )
      .finish()
  }
}

// Sizes are measured in compact output, where rewrites are decided.

fn expr_len(expr: &Node<Expr>) -> Option<usize> {
  emit_js_expr(expr, &EmitOptions::default())
    .ok()
    .map(|text| text.len())
}

fn stmts_len<'a>(stmts: impl IntoIterator<Item = &'a Node<Stmt>>) -> Option<usize> {
  let mut em = Emitter::new(EmitOptions::default());
  for stmt in stmts {
    emit_stmt(&mut em, stmt).ok()?;
  }
  Some(em.as_bytes().len())
}

// Moves a subtree out of a node that is about to be overwritten.
fn take_expr(slot: &mut Node<Expr>) -> Node<Expr> {
  let placeholder = Node::new(slot.loc, LitAtomExpr { value: Atom::Null }).into_wrapped();
  std::mem::replace(slot, placeholder)
}
