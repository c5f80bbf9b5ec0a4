use crate::emitter::with_node_context;
use crate::emitter::EmitError;
use crate::emitter::EmitErrorKind;
use crate::emitter::EmitResult;
use crate::emitter::Emitter;
use crate::expr::emit_expr;
use crate::expr::write_id_pat;
use crate::expr::write_name;
use crate::expr::ExprCtx;
use crate::precedence::Prec;
use crate::stmt_start::expr_stmt_needs_parens;
use parse_js::ast::expr::pat::IdPat;
use parse_js::ast::expr::Expr;
use parse_js::ast::func::Func;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::VarDecl;
use parse_js::ast::stmt::*;
use parse_js::ast::stx::TopLevel;

pub fn emit_top_level(em: &mut Emitter, top: &Node<TopLevel>) -> EmitResult {
  emit_stmt_list(em, &top.stx.body)
}

fn emit_stmt_list(em: &mut Emitter, stmts: &[Node<Stmt>]) -> EmitResult {
  for stmt in stmts {
    emit_stmt(em, stmt)?;
    em.newline();
  }
  Ok(())
}

/// Emits `{ ... }` around `body`.
pub(crate) fn emit_block_body(em: &mut Emitter, body: &[Node<Stmt>]) -> EmitResult {
  em.write_punct("{");
  if !body.is_empty() {
    em.newline();
    em.indent();
    emit_stmt_list(em, body)?;
    em.dedent();
  }
  em.close_brace();
  Ok(())
}

pub fn emit_stmt(em: &mut Emitter, stmt: &Node<Stmt>) -> EmitResult {
  with_node_context(stmt.loc, || match stmt.stx.as_ref() {
    Stmt::Block(block) => emit_block_body(em, &block.stx.body),
    Stmt::Break(brk) => emit_jump(em, "break", brk.stx.label.as_deref()),
    Stmt::Continue(cnt) => emit_jump(em, "continue", cnt.stx.label.as_deref()),
    Stmt::Debugger(_) => {
      em.write_keyword("debugger");
      em.end_statement();
      Ok(())
    }
    Stmt::DoWhile(do_while) => {
      em.write_keyword("do");
      emit_body(em, &do_while.stx.body)?;
      em.space();
      em.write_keyword("while");
      emit_paren_expr(em, &do_while.stx.condition)?;
      em.end_statement();
      Ok(())
    }
    Stmt::Empty(_) => {
      em.write_semicolon();
      Ok(())
    }
    Stmt::Expr(expr) => emit_expr_stmt(em, &expr.stx.expr),
    Stmt::ForIn(for_in) => {
      let for_in = for_in.stx.as_ref();
      em.write_keyword("for");
      em.space();
      em.write_punct("(");
      match &for_in.lhs {
        ForInLhs::Decl(pat) => {
          em.write_keyword("var");
          write_id_pat(em, pat)?;
        }
        ForInLhs::Assign(id) => with_node_context(id.loc, || write_name(em, &id.stx.name))?,
      };
      em.write_keyword("in");
      emit_expr(em, &for_in.rhs, Prec::LOWEST, ExprCtx::Default)?;
      em.write_punct(")");
      emit_body(em, &for_in.body)
    }
    Stmt::ForTriple(for_stmt) => emit_for_triple(em, for_stmt),
    Stmt::If(if_stmt) => emit_if(em, if_stmt),
    Stmt::Label(label) => {
      write_name(em, &label.stx.name)?;
      em.write_punct(":");
      em.space();
      emit_stmt(em, &label.stx.statement)
    }
    Stmt::Return(ret) => {
      em.write_keyword("return");
      if let Some(value) = &ret.stx.value {
        em.space();
        emit_expr(em, value, Prec::LOWEST, ExprCtx::Default)?;
      }
      em.end_statement();
      Ok(())
    }
    Stmt::Switch(switch) => emit_switch(em, switch),
    Stmt::Throw(throw) => {
      em.write_keyword("throw");
      em.space();
      emit_expr(em, &throw.stx.value, Prec::LOWEST, ExprCtx::Default)?;
      em.end_statement();
      Ok(())
    }
    Stmt::Try(try_stmt) => emit_try(em, try_stmt),
    Stmt::While(while_stmt) => {
      em.write_keyword("while");
      emit_paren_expr(em, &while_stmt.stx.condition)?;
      emit_body(em, &while_stmt.stx.body)
    }
    Stmt::With(with) => {
      em.write_keyword("with");
      emit_paren_expr(em, &with.stx.object)?;
      emit_body(em, &with.stx.body)
    }
    Stmt::FunctionDecl(decl) => {
      em.write_keyword("function");
      emit_func(em, Some(&decl.stx.name), &decl.stx.function)
    }
    Stmt::VarDecl(decl) => {
      emit_var_decl(em, decl, ExprCtx::Default)?;
      em.end_statement();
      Ok(())
    }
  })
}

/// Emits the name (if any), parameter list and body of a function; the `function` keyword is already written.
pub(crate) fn emit_func(
  em: &mut Emitter,
  name: Option<&Node<IdPat>>,
  func: &Node<Func>,
) -> EmitResult {
  with_node_context(func.loc, || {
    if let Some(name) = name {
      write_id_pat(em, name)?;
    }
    em.write_punct("(");
    em.emit_punctuated_list(&func.stx.params, ",", |em, param| write_id_pat(em, param))?;
    em.write_punct(")");
    em.space();
    emit_block_body(em, &func.stx.body)
  })
}

// ` (expr)` after a keyword.
fn emit_paren_expr(em: &mut Emitter, expr: &Node<Expr>) -> EmitResult {
  em.space();
  em.write_punct("(");
  emit_expr(em, expr, Prec::LOWEST, ExprCtx::Default)?;
  em.write_punct(")");
  Ok(())
}

// The body of a loop, `if`, `else` or `with`.
fn emit_body(em: &mut Emitter, body: &Node<Stmt>) -> EmitResult {
  em.space();
  emit_stmt(em, body)
}

fn emit_jump(em: &mut Emitter, keyword: &str, label: Option<&str>) -> EmitResult {
  em.write_keyword(keyword);
  if let Some(label) = label {
    write_name(em, label)?;
  }
  em.end_statement();
  Ok(())
}

fn emit_expr_stmt(em: &mut Emitter, expr: &Node<Expr>) -> EmitResult {
  if expr_stmt_needs_parens(expr) {
    em.write_punct("(");
    emit_expr(em, expr, Prec::LOWEST, ExprCtx::Default)?;
    em.write_punct(")");
  } else {
    emit_expr(em, expr, Prec::LOWEST, ExprCtx::Default)?;
  }
  em.end_statement();
  Ok(())
}

pub(crate) fn emit_var_decl(em: &mut Emitter, decl: &Node<VarDecl>, ctx: ExprCtx) -> EmitResult {
  let decl = decl.stx.as_ref();
  if decl.declarators.is_empty() {
    return Err(EmitError::new(EmitErrorKind::EmptyDeclaration));
  }
  em.write_keyword(decl.mode.keyword());
  em.emit_punctuated_list(&decl.declarators, ",", |em, declarator| {
    write_id_pat(em, &declarator.name)?;
    if let Some(init) = &declarator.initializer {
      em.space();
      em.write_punct("=");
      em.space();
      emit_expr(em, init, Prec::ASSIGNMENT, ctx)?;
    }
    Ok(())
  })
}

fn emit_for_triple(em: &mut Emitter, for_stmt: &Node<ForTripleStmt>) -> EmitResult {
  let for_stmt = for_stmt.stx.as_ref();
  em.write_keyword("for");
  em.space();
  em.write_punct("(");
  match &for_stmt.init {
    ForTripleStmtInit::None => {}
    ForTripleStmtInit::Expr(expr) => emit_expr(em, expr, Prec::LOWEST, ExprCtx::NoIn)?,
    ForTripleStmtInit::Decl(decl) => emit_var_decl(em, decl, ExprCtx::NoIn)?,
  };
  em.write_semicolon();
  if let Some(cond) = &for_stmt.cond {
    em.space();
    emit_expr(em, cond, Prec::LOWEST, ExprCtx::Default)?;
  }
  em.write_semicolon();
  if let Some(post) = &for_stmt.post {
    em.space();
    emit_expr(em, post, Prec::LOWEST, ExprCtx::Default)?;
  }
  em.write_punct(")");
  emit_body(em, &for_stmt.body)
}

fn emit_if(em: &mut Emitter, if_stmt: &Node<IfStmt>) -> EmitResult {
  let if_stmt = if_stmt.stx.as_ref();
  em.write_keyword("if");
  emit_paren_expr(em, &if_stmt.test)?;
  let Some(alternate) = &if_stmt.alternate else {
    return emit_body(em, &if_stmt.consequent);
  };
  if ends_with_open_if(&if_stmt.consequent) {
    // Braces keep our `else` from binding to the inner `if`.
    em.space();
    emit_block_body(em, std::slice::from_ref(&if_stmt.consequent))?;
  } else {
    emit_body(em, &if_stmt.consequent)?;
  }
  em.space();
  em.write_keyword("else");
  emit_body(em, alternate)
}

/// Whether `stmt` ends with an `if` that has no `else`, which would capture an `else` written right after it.
pub fn ends_with_open_if(stmt: &Node<Stmt>) -> bool {
  match stmt.stx.as_ref() {
    Stmt::If(if_stmt) => match &if_stmt.stx.alternate {
      None => true,
      Some(alternate) => ends_with_open_if(alternate),
    },
    Stmt::ForIn(s) => ends_with_open_if(&s.stx.body),
    Stmt::ForTriple(s) => ends_with_open_if(&s.stx.body),
    Stmt::Label(s) => ends_with_open_if(&s.stx.statement),
    Stmt::While(s) => ends_with_open_if(&s.stx.body),
    Stmt::With(s) => ends_with_open_if(&s.stx.body),
    _ => false,
  }
}

fn emit_switch(em: &mut Emitter, switch: &Node<SwitchStmt>) -> EmitResult {
  let switch = switch.stx.as_ref();
  em.write_keyword("switch");
  emit_paren_expr(em, &switch.test)?;
  em.space();
  em.write_punct("{");
  em.newline();
  em.indent();
  for branch in &switch.branches {
    with_node_context(branch.loc, || {
      match &branch.stx.case {
        Some(case) => {
          em.write_keyword("case");
          em.space();
          emit_expr(em, case, Prec::LOWEST, ExprCtx::Default)?;
        }
        None => em.write_keyword("default"),
      };
      em.write_punct(":");
      em.newline();
      em.indent();
      emit_stmt_list(em, &branch.stx.body)?;
      em.dedent();
      Ok(())
    })?;
  }
  em.dedent();
  em.close_brace();
  Ok(())
}

fn emit_try(em: &mut Emitter, try_stmt: &Node<TryStmt>) -> EmitResult {
  let try_stmt = try_stmt.stx.as_ref();
  em.write_keyword("try");
  em.space();
  emit_block_body(em, &try_stmt.wrapped.stx.body)?;
  if let Some(catch) = &try_stmt.catch {
    em.space();
    em.write_keyword("catch");
    em.space();
    em.write_punct("(");
    write_id_pat(em, &catch.stx.parameter)?;
    em.write_punct(")");
    em.space();
    emit_block_body(em, &catch.stx.body.stx.body)?;
  }
  if let Some(finally) = &try_stmt.finally {
    em.space();
    em.write_keyword("finally");
    em.space();
    emit_block_body(em, &finally.stx.body)?;
  }
  Ok(())
}
