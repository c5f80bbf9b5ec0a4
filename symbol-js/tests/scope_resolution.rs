use derive_visitor::Drive;
use derive_visitor::Visitor;
use parse_js::ast::expr::pat::IdPat;
use parse_js::ast::expr::IdExpr;
use parse_js::ast::node::Node;
use parse_js::ast::stx::TopLevel;
use parse_js::parse;
use symbol_js::compute_scopes;
use symbol_js::scope_tree;
use symbol_js::DeclKind;
use symbol_js::ScopeId;
use symbol_js::ScopeTree;
use symbol_js::ScopeType;

fn resolve(source: &str) -> Node<TopLevel> {
  let mut top_level = parse(source).unwrap();
  compute_scopes(&mut top_level);
  top_level
}

fn tree(top_level: &Node<TopLevel>) -> &ScopeTree {
  scope_tree(top_level).expect("scope tree")
}

// The `n`th child of `scope`.
fn child(tree: &ScopeTree, scope: ScopeId, n: usize) -> ScopeId {
  tree.get(scope).children[n]
}

type IdPatNode = Node<IdPat>;
type IdExprNode = Node<IdExpr>;

#[derive(Default, Visitor)]
#[visitor(IdPatNode(enter), IdExprNode(enter))]
struct ScopeCollector {
  bindings: Vec<(String, ScopeId)>,
  uses: Vec<(String, ScopeId)>,
}

impl ScopeCollector {
  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    let scope = *node.assoc.get::<ScopeId>().unwrap();
    self.bindings.push((node.stx.name.clone(), scope));
  }

  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    let scope = *node.assoc.get::<ScopeId>().unwrap();
    self.uses.push((node.stx.name.clone(), scope));
  }
}

#[test]
fn var_and_function_declarations_hoist_past_catch() {
  let top_level = resolve("function f() { try {} catch (e) { var x = 1; function g() {} } }");
  let tree = tree(&top_level);
  let root = tree.root();
  let f = child(tree, root, 0);
  let catch = child(tree, f, 0);
  assert_eq!(tree.get(root).names(), ["f".to_string()]);
  assert_eq!(tree.get(root).decl_kind("f"), Some(DeclKind::Defun));
  assert_eq!(tree.get(f).typ, ScopeType::Function);
  assert_eq!(tree.get(f).names(), ["x".to_string(), "g".to_string()]);
  assert_eq!(tree.get(catch).typ, ScopeType::Catch);
  assert_eq!(tree.get(catch).names(), ["e".to_string()]);
  assert_eq!(tree.get(catch).decl_kind("e"), Some(DeclKind::Catch));
  assert_eq!(tree.hoist_target(catch), f);
}

#[test]
fn function_expression_name_binds_inside() {
  let top_level = resolve("var h = function k(a) { return k(a); };");
  let tree = tree(&top_level);
  let root = tree.root();
  let k = child(tree, root, 0);
  assert_eq!(tree.get(root).names(), ["h".to_string()]);
  assert!(!tree.get(root).declares("k"));
  assert_eq!(tree.get(k).decl_kind("k"), Some(DeclKind::Lambda));
  assert_eq!(tree.get(k).decl_kind("a"), Some(DeclKind::Arg));
}

#[test]
fn const_is_distinct_from_var() {
  let top_level = resolve("const c = 1; var v;");
  let tree = tree(&top_level);
  assert_eq!(tree.get(tree.root()).decl_kind("c"), Some(DeclKind::Const));
  assert_eq!(tree.get(tree.root()).decl_kind("v"), Some(DeclKind::Var));
}

#[test]
fn references_propagate_to_origin() {
  let top_level = resolve("var a; function f() { function g() { return a + b; } }");
  let tree = tree(&top_level);
  let root = tree.root();
  let f = child(tree, root, 0);
  let g = child(tree, f, 0);
  for scope in [g, f, root] {
    assert_eq!(tree.get(scope).reference("a"), Some(Some(root)));
    assert_eq!(tree.get(scope).reference("b"), Some(None));
  }
}

#[test]
fn references_stop_at_declaring_scope() {
  let top_level = resolve("function f() { var x; function g() { return x; } }");
  let tree = tree(&top_level);
  let root = tree.root();
  let f = child(tree, root, 0);
  let g = child(tree, f, 0);
  assert_eq!(tree.get(g).reference("x"), Some(Some(f)));
  assert_eq!(tree.get(f).reference("x"), Some(Some(f)));
  assert_eq!(tree.get(root).reference("x"), None);
}

#[test]
fn initialized_var_and_for_in_count_as_references() {
  let top_level = resolve("function f(o) { var a = 1, b; for (var k in o) {} }");
  let tree = tree(&top_level);
  let f = child(tree, tree.root(), 0);
  assert!(tree.get(f).reference("a").is_some());
  assert!(tree.get(f).reference("b").is_none());
  assert_eq!(tree.get(f).reference("k"), Some(Some(f)));
}

#[test]
fn eval_taints_scope_and_ancestors() {
  let top_level = resolve("function f() { function g() { eval('x'); } function h() {} }");
  let tree = tree(&top_level);
  let root = tree.root();
  let f = child(tree, root, 0);
  let g = child(tree, f, 0);
  let h = child(tree, f, 1);
  assert!(tree.get(g).uses_eval());
  assert!(tree.get(f).uses_eval());
  assert!(tree.get(root).uses_eval());
  assert!(!tree.get(h).uses_eval());
}

#[test]
fn shadowed_eval_does_not_taint() {
  let top_level = resolve("function f(eval) { eval('x'); }");
  let tree = tree(&top_level);
  let f = child(tree, tree.root(), 0);
  assert!(!tree.get(f).uses_eval());
  assert!(!tree.get(tree.root()).uses_eval());
}

#[test]
fn eval_shadowed_by_an_ancestor_does_not_taint() {
  let top_level = resolve("function f(eval) { function g() { eval('x'); } }");
  let tree = tree(&top_level);
  assert!(tree.ids().all(|s| !tree.get(s).uses_eval()));

  let top_level = resolve("function eval() {} function g() { eval('x'); }");
  let tree = crate::tree(&top_level);
  assert!(tree.ids().all(|s| !tree.get(s).uses_eval()));
}

#[test]
fn eval_as_member_is_not_direct() {
  let top_level = resolve("function f() { o.eval('x'); }");
  let tree = tree(&top_level);
  assert!(tree.ids().all(|s| !tree.get(s).uses_eval()));
}

#[test]
fn with_taints_scope_and_ancestors() {
  let top_level = resolve("function f(o) { with (o) { x; } function g() {} }");
  let tree = tree(&top_level);
  let root = tree.root();
  let f = child(tree, root, 0);
  let g = child(tree, f, 0);
  assert!(tree.get(f).uses_with());
  assert!(tree.get(root).uses_with());
  assert!(!tree.get(g).uses_with());
  assert!(tree.get(f).is_dynamic());
}

#[test]
fn identifiers_carry_their_scope() {
  let top_level = resolve("var value = 1; function outer(p) { return function () { return value + p; }; }");
  let tree = tree(&top_level);
  let root = tree.root();
  let outer = child(tree, root, 0);
  let inner = child(tree, outer, 0);

  let mut collector = ScopeCollector::default();
  top_level.drive(&mut collector);
  assert_eq!(collector.bindings, vec![
    ("value".to_string(), root),
    ("outer".to_string(), root),
    ("p".to_string(), outer),
  ]);
  assert_eq!(collector.uses, vec![
    ("value".to_string(), inner),
    ("p".to_string(), inner),
  ]);
  assert_eq!(tree.find_decl(inner, "value"), Some(root));
  assert_eq!(tree.find_decl(inner, "p"), Some(outer));
}

#[test]
fn recomputing_replaces_previous_tree() {
  let mut top_level = resolve("function f() {}");
  compute_scopes(&mut top_level);
  assert_eq!(tree(&top_level).len(), 2);
}
