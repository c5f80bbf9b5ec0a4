mod util;

use emit_js::emit_js;
use emit_js::EmitErrorKind;
use emit_js::EmitOptions;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::IdExpr;
use parse_js::ast::expr::MemberExpr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::ExprStmt;
use parse_js::ast::stmt::Stmt;
use parse_js::loc::Loc;
use util::minify;
use util::parse;

#[test]
fn precedence_keeps_only_required_parentheses() {
  assert_eq!(minify("a + b * c"), "a+b*c");
  assert_eq!(minify("(a + b) * c"), "(a+b)*c");
  assert_eq!(minify("a - (b - c)"), "a-(b-c)");
  assert_eq!(minify("(a - b) - c"), "a-b-c");
  assert_eq!(minify("(a * b) + c"), "a*b+c");
  assert_eq!(minify("a = (b = c)"), "a=b=c");
  assert_eq!(minify("x = (a, b)"), "x=(a,b)");
  assert_eq!(minify("(a ? b : c) ? d : e"), "(a?b:c)?d:e");
  assert_eq!(minify("a ? (b, c) : d = e"), "a?(b,c):d=e");
  assert_eq!(minify("typeof (a + b)"), "typeof(a+b)");
  assert_eq!(minify("(a || b) && c"), "(a||b)&&c");
  assert_eq!(minify("(a.b)(c)"), "a.b(c)");
}

#[test]
fn adjacent_operators_are_separated() {
  assert_eq!(minify("x = a + +b"), "x=a+ +b");
  assert_eq!(minify("x = a - --b"), "x=a- --b");
  assert_eq!(minify("x = -(-y)"), "x=- -y");
  assert_eq!(minify("x = a++ + b"), "x=a++ +b");
  assert_eq!(minify("x = a / /re/g"), "x=a/ /re/g");
  assert_eq!(minify("x = 'a' in o"), "x=\"a\"in o");
}

#[test]
fn new_expressions() {
  assert_eq!(minify("new F"), "new F");
  assert_eq!(minify("new F()"), "new F");
  assert_eq!(minify("(new F).x"), "new F().x");
  assert_eq!(minify("new (f())()"), "new(f())");
  assert_eq!(minify("new (a.b().c)(1)"), "new(a.b().c)(1)");
  assert_eq!(minify("new a.b.C(1)(2)"), "new a.b.C(1)(2)");
}

#[test]
fn numeric_member_receivers() {
  assert_eq!(minify("1..toString()"), "1..toString()");
  assert_eq!(minify("1.5.toFixed()"), "1.5.toFixed()");
  assert_eq!(minify("(1000).x"), "1e3.x");
  assert_eq!(minify("x = 0.5 + 255"), "x=.5+255");
}

#[test]
fn statement_start_hazards_are_parenthesised() {
  assert_eq!(minify("(function () {})()"), "(function(){}())");
  assert_eq!(minify("({}).x = 1"), "({}.x=1)");
  assert_eq!(minify("x = function () {}"), "x=function(){}");
  assert_eq!(minify("({ a: 1 })"), "({a:1})");
}

#[test]
fn final_semicolons_are_dropped() {
  assert_eq!(minify("a = 1\nb = 2"), "a=1;b=2");
  assert_eq!(minify("function f() { a(); return b; }"), "function f(){a();return b}");
  assert_eq!(minify("if (a) b(); else c();"), "if(a)b();else c()");
  assert_eq!(minify("do x(); while (y)"), "do x();while(y)");
  assert_eq!(minify("for (;;) ;"), "for(;;);");
  assert_eq!(minify("if (a) ; else ;"), "if(a);else;");
}

#[test]
fn statements() {
  assert_eq!(minify("var a = 1, b; const c = 2;"), "var a=1,b;const c=2");
  assert_eq!(
    minify("outer: for (var i = 0; i < n; i++) { continue outer; }"),
    "outer:for(var i=0;i<n;i++){continue outer}"
  );
  assert_eq!(minify("for (var k in o) {}"), "for(var k in o){}");
  assert_eq!(
    minify("switch (x) { case 1: a(); break; default: b(); }"),
    "switch(x){case 1:a();break;default:b()}"
  );
  assert_eq!(
    minify("try { a() } catch (e) { b() } finally { c() }"),
    "try{a()}catch(e){b()}finally{c()}"
  );
  assert_eq!(minify("function f() { throw new E(1); }"), "function f(){throw new E(1)}");
  assert_eq!(minify("with (o) x; debugger;"), "with(o)x;debugger");
}

#[test]
fn in_operator_in_for_head_is_parenthesised() {
  assert_eq!(minify("for (var i = ('x' in o); i;) ;"), "for(var i=(\"x\"in o);i;);");
  assert_eq!(minify("for (x = a(b in c); x;) ;"), "for(x=a(b in c);x;);");
  assert_eq!(minify("for (;a in b;) ;"), "for(;a in b;);");
}

#[test]
fn dangling_else_gets_braces() {
  assert_eq!(minify("if (a) if (b) c(); else d();"), "if(a)if(b)c();else d()");
  assert_eq!(minify("if (a) { if (b) c(); } else d();"), "if(a){if(b)c()}else d()");

  // The tree a squeeze pass would produce by unwrapping the block.
  let mut top = parse("if (a) { while (x) if (b) c(); } else d();");
  let Stmt::If(if_stmt) = top.stx.body[0].stx.as_mut() else {
    panic!("expected if");
  };
  let Stmt::Block(block) = if_stmt.stx.consequent.stx.as_mut() else {
    panic!("expected block");
  };
  let inner = block.stx.body.remove(0);
  if_stmt.stx.consequent = inner;
  assert_eq!(
    emit_js(&top, &EmitOptions::default()).unwrap(),
    "if(a){while(x)if(b)c()}else d()"
  );
}

#[test]
fn literals() {
  assert_eq!(minify("x = 'it\\'s \"q\"'"), "x=\"it's \\\"q\\\"\"");
  assert_eq!(minify("x = [1,,2,]; y = [,]; z = [1,,]"), "x=[1,,2];y=[,];z=[1,,]");
  assert_eq!(
    minify("x = { a: 1, 'b c': 2, 3: 4, 'if': 5, '01': 6 }"),
    "x={a:1,\"b c\":2,3:4,\"if\":5,\"01\":6}"
  );
  assert_eq!(minify("x = /a\\/b[/]/gi"), "x=/a\\/b[/]/gi");
  assert_eq!(minify("x = true; y = null"), "x=true;y=null");
}

#[test]
fn quoted_keys() {
  let opts = EmitOptions {
    quote_keys: true,
    ..EmitOptions::default()
  };
  assert_eq!(
    emit_js(&parse("x = { a: 1, 3: 4 }"), &opts).unwrap(),
    "x={\"a\":1,\"3\":4}"
  );
}

#[test]
fn escaped_keyword_names_stay_escaped() {
  assert_eq!(minify("var \\u0069f = 1"), "var \\u0069f=1");
}

#[test]
fn malformed_trees_are_rejected() {
  let member = Node::new(Loc(3, 9), MemberExpr {
    left: Node::new(Loc(3, 4), IdExpr { name: "a".into() }).into_wrapped(),
    right: "b-c".into(),
  });
  let stmt: Node<Stmt> = Node::new(Loc(0, 10), ExprStmt {
    expr: member.into_wrapped::<Expr>(),
  })
  .into_wrapped();
  let mut top = parse("");
  top.stx.body.push(stmt);
  let err = emit_js(&top, &EmitOptions::default()).unwrap_err();
  assert_eq!(err.kind, EmitErrorKind::InvalidMemberName("b-c".into()));
  assert_eq!(err.loc, Some(Loc(3, 9)));
  assert_eq!(err.to_string(), "`b-c` cannot be written as a member name (pos: 3)");

  let empty: Node<Stmt> = Node::new(Loc(0, 0), ExprStmt {
    expr: Node::new(Loc(0, 0), IdExpr { name: String::new() }).into_wrapped(),
  })
  .into_wrapped();
  top.stx.body = vec![empty];
  let err = emit_js(&top, &EmitOptions::default()).unwrap_err();
  assert_eq!(err.kind, EmitErrorKind::EmptyName);
}
