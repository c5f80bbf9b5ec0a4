//! Renders parse-js syntax trees back to source text.
//!
//! Output re-parses to an equal tree, and rendering that tree again yields
//! byte-identical text. Parentheses are only written where precedence,
//! statement-start or `for`-head rules require them.

mod emitter;
mod escape;
mod expr;
mod precedence;
mod stmt;
mod stmt_start;

pub use emitter::EmitError;
pub use emitter::EmitErrorKind;
pub use emitter::EmitMode;
pub use emitter::EmitOptions;
pub use emitter::EmitResult;
pub use emitter::Emitter;
pub use escape::string_literal_double_quoted;
pub use expr::emit_expr;
pub use expr::number_literal;
pub use expr::ExprCtx;
pub use precedence::Prec;
pub use stmt::emit_stmt;
pub use stmt::emit_top_level;
pub use stmt::ends_with_open_if;
pub use stmt_start::expr_stmt_needs_parens;

use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stx::TopLevel;

/// Renders a whole program.
pub fn emit_js(top: &Node<TopLevel>, opts: &EmitOptions) -> Result<String, EmitError> {
  let mut em = Emitter::new(*opts);
  emit_top_level(&mut em, top)?;
  Ok(into_string(em))
}

/// Renders a standalone expression, e.g. to measure the size of a rewrite.
pub fn emit_js_expr(expr: &Node<Expr>, opts: &EmitOptions) -> Result<String, EmitError> {
  let mut em = Emitter::new(*opts);
  emit_expr(&mut em, expr, Prec::LOWEST, ExprCtx::Default)?;
  Ok(into_string(em))
}

// Every fragment is written from a `&str`, so the buffer is always valid UTF-8.
fn into_string(em: Emitter) -> String {
  match String::from_utf8(em.into_bytes()) {
    Ok(text) => text,
    Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
  }
}
