use crate::emitter::with_node_context;
use crate::emitter::EmitError;
use crate::emitter::EmitErrorKind;
use crate::emitter::EmitResult;
use crate::emitter::Emitter;
use crate::escape::string_literal_double_quoted;
use crate::precedence::child_min_prec_for_binary;
use crate::precedence::expr_prec;
use crate::precedence::needs_parens;
use crate::precedence::Prec;
use crate::precedence::Side;
use crate::stmt::emit_func;
use parse_js::ast::expr::lit::LitArrElem;
use parse_js::ast::expr::lit::LitArrExpr;
use parse_js::ast::expr::lit::LitObjExpr;
use parse_js::ast::expr::pat::IdPat;
use parse_js::ast::expr::BinaryExpr;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::NewExpr;
use parse_js::ast::node::Node;
use parse_js::char::is_identifier_char;
use parse_js::char::is_identifier_start;
use parse_js::grammar::is_identifier;
use parse_js::grammar::KEYWORDS;
use parse_js::num::JsNumber;
use parse_js::operator::OperatorName;

/// Where an expression is being written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExprCtx {
  Default,
  /// Inside a classic `for` head, where a bare `in` would be read as a `for-in` loop.
  NoIn,
}

/// Emits `expr`, parenthesised if it binds looser than `min_prec`.
pub fn emit_expr(em: &mut Emitter, expr: &Node<Expr>, min_prec: Prec, ctx: ExprCtx) -> EmitResult {
  with_node_context(expr.loc, || {
    if needs_parens(expr_prec(expr.stx.as_ref()), min_prec) {
      em.write_punct("(");
      emit_expr_unparenthesized(em, expr, ExprCtx::Default)?;
      em.write_punct(")");
      Ok(())
    } else {
      emit_expr_unparenthesized(em, expr, ctx)
    }
  })
}

fn emit_expr_unparenthesized(em: &mut Emitter, expr: &Node<Expr>, ctx: ExprCtx) -> EmitResult {
  match expr.stx.as_ref() {
    Expr::Assign(assign) => {
      let assign = assign.stx.as_ref();
      emit_expr(em, &assign.target, Prec::CALL_MEMBER, ctx)?;
      em.space();
      em.write_punct(assign.operator.text());
      em.space();
      emit_expr(em, &assign.value, Prec::ASSIGNMENT, ctx)
    }
    Expr::Binary(bin) => emit_binary(em, bin, ctx),
    Expr::Call(call) => {
      emit_member_object(em, &call.stx.callee)?;
      emit_arguments(em, &call.stx.arguments)
    }
    Expr::ComputedMember(mem) => {
      emit_member_object(em, &mem.stx.object)?;
      em.write_punct("[");
      emit_expr(em, &mem.stx.member, Prec::LOWEST, ExprCtx::Default)?;
      em.write_punct("]");
      Ok(())
    }
    Expr::Cond(cond) => {
      let cond = cond.stx.as_ref();
      emit_expr(em, &cond.test, Prec::CONDITIONAL.tighter(), ctx)?;
      em.space();
      em.write_punct("?");
      em.space();
      emit_expr(em, &cond.consequent, Prec::ASSIGNMENT, ctx)?;
      em.space();
      em.write_punct(":");
      em.space();
      emit_expr(em, &cond.alternate, Prec::ASSIGNMENT, ctx)
    }
    Expr::Func(func) => {
      em.write_keyword("function");
      emit_func(em, func.stx.func.stx.name.as_ref(), &func.stx.func)
    }
    Expr::Id(id) => write_name(em, &id.stx.name),
    Expr::Member(mem) => {
      let mem = mem.stx.as_ref();
      match mem.left.stx.as_ref() {
        // `1.x` would lex as the number `1.` followed by `x`.
        Expr::LitNum(num) if !num.stx.value.0.is_sign_negative() => {
          let text = with_node_context(mem.left.loc, || number_literal(num.stx.value))?;
          em.write_number(&text);
          if text.bytes().all(|b| b.is_ascii_digit()) {
            em.write_punct(".");
          }
        }
        _ => emit_member_object(em, &mem.left)?,
      };
      if !is_member_name(&mem.right) {
        return Err(EmitError::new(EmitErrorKind::InvalidMemberName(
          mem.right.clone(),
        )));
      }
      em.write_punct(".");
      em.write_identifier(&mem.right);
      Ok(())
    }
    Expr::New(new) => emit_new(em, new, false),
    Expr::Seq(seq) => {
      if seq.stx.exprs.len() < 2 {
        return Err(EmitError::new(EmitErrorKind::ShortSequence));
      }
      em.emit_punctuated_list(&seq.stx.exprs, ",", |em, e| {
        emit_expr(em, e, Prec::ASSIGNMENT, ctx)
      })
    }
    Expr::Unary(unary) => {
      let unary = unary.stx.as_ref();
      let text = unary.operator.text();
      if matches!(
        unary.operator,
        OperatorName::Delete | OperatorName::Typeof | OperatorName::Void
      ) {
        em.write_keyword(text);
      } else {
        em.write_punct(text);
      }
      emit_expr(em, &unary.argument, Prec::UNARY, ctx)
    }
    Expr::UnaryPostfix(post) => {
      emit_expr(em, &post.stx.argument, Prec::CALL_MEMBER, ctx)?;
      em.write_punct(post.stx.operator.text());
      Ok(())
    }
    Expr::LitArr(arr) => emit_array(em, arr),
    Expr::LitAtom(atom) => {
      em.write_keyword(atom.stx.value.keyword());
      Ok(())
    }
    Expr::LitNum(num) => {
      let text = number_literal(num.stx.value)?;
      em.write_number(&text);
      Ok(())
    }
    Expr::LitObj(obj) => emit_object(em, obj),
    Expr::LitRegex(regex) => {
      em.write_str(&format!("/{}/{}", regex.stx.pattern, regex.stx.flags));
      Ok(())
    }
    Expr::LitStr(s) => {
      em.write_str(&string_literal_double_quoted(&s.stx.value));
      Ok(())
    }
  }
}

fn emit_binary(em: &mut Emitter, bin: &Node<BinaryExpr>, ctx: ExprCtx) -> EmitResult {
  let bin = bin.stx.as_ref();
  if bin.operator == OperatorName::In && ctx == ExprCtx::NoIn {
    em.write_punct("(");
    emit_binary_operands(em, bin, ExprCtx::Default)?;
    em.write_punct(")");
    return Ok(());
  }
  emit_binary_operands(em, bin, ctx)
}

fn emit_binary_operands(em: &mut Emitter, bin: &BinaryExpr, ctx: ExprCtx) -> EmitResult {
  emit_expr(
    em,
    &bin.left,
    child_min_prec_for_binary(bin.operator, Side::Left),
    ctx,
  )?;
  em.space();
  match bin.operator {
    OperatorName::In | OperatorName::Instanceof => em.write_keyword(bin.operator.text()),
    op => em.write_punct(op.text()),
  };
  em.space();
  emit_expr(
    em,
    &bin.right,
    child_min_prec_for_binary(bin.operator, Side::Right),
    ctx,
  )
}

// Objects of `.`, `[]` and calls. A `new` without arguments keeps an empty argument list here, otherwise the following `(` or member would be absorbed into it.
fn emit_member_object(em: &mut Emitter, object: &Node<Expr>) -> EmitResult {
  match object.stx.as_ref() {
    Expr::New(new) if new.stx.arguments.is_empty() => {
      with_node_context(object.loc, || emit_new(em, new, true))
    }
    _ => emit_expr(em, object, Prec::CALL_MEMBER, ExprCtx::Default),
  }
}

fn emit_new(em: &mut Emitter, new: &Node<NewExpr>, force_arguments: bool) -> EmitResult {
  let new = new.stx.as_ref();
  em.write_keyword("new");
  if callee_contains_call(&new.callee) {
    em.write_punct("(");
    emit_expr(em, &new.callee, Prec::LOWEST, ExprCtx::Default)?;
    em.write_punct(")");
  } else {
    emit_member_object(em, &new.callee)?;
  }
  if force_arguments || !new.arguments.is_empty() {
    emit_arguments(em, &new.arguments)?;
  }
  Ok(())
}

// The argument list of `new a().b()` belongs to `new a`, so a callee holding a call needs parentheses.
fn callee_contains_call(callee: &Node<Expr>) -> bool {
  match callee.stx.as_ref() {
    Expr::Call(_) => true,
    Expr::Member(mem) => callee_contains_call(&mem.stx.left),
    Expr::ComputedMember(mem) => callee_contains_call(&mem.stx.object),
    _ => false,
  }
}

fn emit_arguments(em: &mut Emitter, arguments: &[Node<Expr>]) -> EmitResult {
  em.write_punct("(");
  em.emit_punctuated_list(arguments, ",", |em, arg| {
    emit_expr(em, arg, Prec::ASSIGNMENT, ExprCtx::Default)
  })?;
  em.write_punct(")");
  Ok(())
}

fn emit_array(em: &mut Emitter, arr: &Node<LitArrExpr>) -> EmitResult {
  let elements = &arr.stx.elements;
  em.write_punct("[");
  em.emit_punctuated_list(elements, ",", |em, elem| match elem {
    LitArrElem::Single(value) => emit_expr(em, value, Prec::ASSIGNMENT, ExprCtx::Default),
    LitArrElem::Empty => Ok(()),
  })?;
  // A trailing comma is dropped by the parser, so a trailing hole needs one more.
  if matches!(elements.last(), Some(LitArrElem::Empty)) {
    em.write_punct(",");
  }
  em.write_punct("]");
  Ok(())
}

fn emit_object(em: &mut Emitter, obj: &Node<LitObjExpr>) -> EmitResult {
  let members = &obj.stx.members;
  em.write_punct("{");
  if members.is_empty() {
    em.write_punct("}");
    return Ok(());
  }
  em.newline();
  em.indent();
  for (idx, member) in members.iter().enumerate() {
    with_node_context(member.loc, || {
      write_property_key(em, &member.stx.key);
      em.write_punct(":");
      em.space();
      emit_expr(em, &member.stx.value, Prec::ASSIGNMENT, ExprCtx::Default)
    })?;
    if idx + 1 < members.len() {
      em.write_punct(",");
    }
    em.newline();
  }
  em.dedent();
  em.write_punct("}");
  Ok(())
}

fn write_property_key(em: &mut Emitter, key: &str) {
  if !em.options().quote_keys {
    if is_identifier(key) {
      em.write_identifier(key);
      return;
    }
    if is_canonical_number_key(key) {
      em.write_number(key);
      return;
    }
  }
  em.write_str(&string_literal_double_quoted(key));
}

// Keys like `1` or `0.5` survive being written bare, as the parser stores a number key as its string form.
fn is_canonical_number_key(key: &str) -> bool {
  key.starts_with(|c: char| c.is_ascii_digit()) && JsNumber::from_js_str(key).to_string() == key
}

/// A name that can follow `.`; keywords are allowed there.
pub(crate) fn is_member_name(name: &str) -> bool {
  let mut chars = name.chars();
  let Some(first) = chars.next() else {
    return false;
  };
  (is_identifier_start(first) || (!first.is_ascii() && first.is_alphabetic()))
    && chars.all(|c| is_identifier_char(c) || (!c.is_ascii() && c.is_alphanumeric()))
}

/// Writes a variable name. A name spelling a keyword (only possible via escapes in the source) keeps its first character escaped.
pub(crate) fn write_name(em: &mut Emitter, name: &str) -> EmitResult {
  let Some(first) = name.chars().next() else {
    return Err(EmitError::new(EmitErrorKind::EmptyName));
  };
  if KEYWORDS.contains(name) {
    let escaped = format!("\\u{:04x}{}", first as u32, &name[first.len_utf8()..]);
    em.write_identifier(&escaped);
  } else {
    em.write_identifier(name);
  }
  Ok(())
}

pub(crate) fn write_id_pat(em: &mut Emitter, pat: &Node<IdPat>) -> EmitResult {
  with_node_context(pat.loc, || write_name(em, &pat.stx.name))
}

/// The shortest source text that lexes back to `value`. Infinity is written as an overflowing literal.
pub fn number_literal(value: JsNumber) -> Result<String, EmitError> {
  let v = value.0;
  if v.is_nan() {
    return Err(EmitError::new(EmitErrorKind::NanLiteral));
  }
  if v.is_sign_negative() {
    return Ok(format!("-{}", number_literal(JsNumber(-v))?));
  }
  if v.is_infinite() {
    return Ok("1e999".into());
  }
  let canonical = value.to_string();
  let mut candidates = vec![
    canonical.replacen("e+", "e", 1),
    format!("{:e}", v),
  ];
  if let Some(frac) = canonical.strip_prefix("0.") {
    candidates.push(format!(".{}", frac));
  }
  if v.fract() == 0.0 && v <= 9007199254740992.0 {
    candidates.push(format!("0x{:x}", v as u64));
  }
  Ok(
    candidates
      .into_iter()
      .fold(canonical, |best, c| if c.len() < best.len() { c } else { best }),
  )
}

#[cfg(test)]
mod tests {
  use super::is_member_name;
  use super::number_literal;
  use parse_js::num::JsNumber;

  fn num(v: f64) -> String {
    number_literal(JsNumber(v)).unwrap()
  }

  #[test]
  fn numbers_use_the_shortest_form() {
    assert_eq!(num(0.0), "0");
    assert_eq!(num(3.0), "3");
    assert_eq!(num(0.5), ".5");
    assert_eq!(num(100.0), "100");
    assert_eq!(num(1000.0), "1e3");
    assert_eq!(num(10000.0), "1e4");
    assert_eq!(num(1e21), "1e21");
    assert_eq!(num(0.000001), "1e-6");
    assert_eq!(num(1.5e-7), "1.5e-7");
    assert_eq!(num(1e300), "1e300");
    assert_eq!(num(-2.0), "-2");
    assert_eq!(num(-0.0), "-0");
    assert_eq!(num(281474976710655.0), "0xffffffffffff");
    assert_eq!(num(f64::INFINITY), "1e999");
    assert!(number_literal(JsNumber(f64::NAN)).is_err());
  }

  #[test]
  fn member_names_allow_keywords_but_not_punctuation() {
    assert!(is_member_name("if"));
    assert!(is_member_name("$x_1"));
    assert!(!is_member_name("a-b"));
    assert!(!is_member_name("1a"));
    assert!(!is_member_name(""));
  }
}
