use crate::scope::DeclKind;
use crate::scope::ScopeId;
use crate::scope::ScopeTree;
use crate::scope::ScopeType;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use parse_js::ast::expr::pat::IdPat;
use parse_js::ast::expr::CallExpr;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::IdExpr;
use parse_js::ast::func::Func;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::FuncDecl;
use parse_js::ast::stmt::decl::VarDecl;
use parse_js::ast::stmt::decl::VarDeclMode;
use parse_js::ast::stmt::CatchBlock;
use parse_js::ast::stmt::ForInLhs;
use parse_js::ast::stmt::ForInStmt;
use parse_js::ast::stmt::WithStmt;
use parse_js::ast::stx::TopLevel;
use tracing::debug;
use tracing::debug_span;

type CallExprNode = Node<CallExpr>;
type CatchBlockNode = Node<CatchBlock>;
type ForInStmtNode = Node<ForInStmt>;
type FuncDeclNode = Node<FuncDecl>;
type FuncNode = Node<Func>;
type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type VarDeclNode = Node<VarDecl>;
type WithStmtNode = Node<WithStmt>;

/// Builds the scope tree of a program and attaches it to the top level node, replacing any previous one.
///
/// Afterwards every `Func` and `CatchBlock` node carries the `ScopeId` it introduces, and every `IdExpr` and `IdPat` carries the `ScopeId` it occurs in. The tree itself is available through [`scope_tree`].
pub fn compute_scopes(top_level_node: &mut Node<TopLevel>) {
  let span = debug_span!("compute_scopes");
  let _guard = span.enter();

  let mut visitor = ScopeVisitor::new();
  top_level_node.drive_mut(&mut visitor);
  let ScopeVisitor {
    mut tree,
    pending_eval,
    ..
  } = visitor;
  propagate_eval(&mut tree, &pending_eval);
  fix_refs(&mut tree);
  debug!(scopes = tree.len(), "computed scopes");
  top_level_node.assoc.set(tree);
}

/// The scope tree computed by [`compute_scopes`], if it has run.
pub fn scope_tree(top_level_node: &Node<TopLevel>) -> Option<&ScopeTree> {
  top_level_node.assoc.get::<ScopeTree>()
}

// A scope calling `eval` taints itself and every ancestor, unless `eval` resolves to a declared binding.
fn propagate_eval(tree: &mut ScopeTree, pending: &[ScopeId]) {
  for &scope in pending {
    if tree.find_decl(scope, "eval").is_some() {
      continue;
    };
    let chain: Vec<_> = tree.self_and_ancestors(scope).collect();
    for s in chain {
      tree.get_mut(s).uses_eval = true;
    }
  }
}

// Points every reference at its declaring scope and copies it into each scope between the use and the declaration.
fn fix_refs(tree: &mut ScopeTree) {
  for id in tree.ids().collect::<Vec<_>>() {
    let names: Vec<String> = tree.get(id).refs.keys().cloned().collect();
    for name in names {
      let origin = tree.find_decl(id, &name);
      let chain: Vec<_> = tree.self_and_ancestors(id).collect();
      for s in chain {
        tree.get_mut(s).refs.insert(name.clone(), origin);
        if Some(s) == origin {
          break;
        };
      }
    }
  }
}

#[derive(VisitorMut)]
#[visitor(
  CallExprNode(enter),
  CatchBlockNode,
  ForInStmtNode(enter),
  FuncDeclNode(enter),
  FuncNode,
  IdExprNode(enter),
  IdPatNode(enter),
  VarDeclNode(enter),
  WithStmtNode(enter)
)]
struct ScopeVisitor {
  tree: ScopeTree,
  stack: Vec<ScopeId>,
  pending_eval: Vec<ScopeId>,
}

impl ScopeVisitor {
  fn new() -> ScopeVisitor {
    let tree = ScopeTree::new();
    let root = tree.root();
    ScopeVisitor {
      tree,
      stack: vec![root],
      pending_eval: Vec::new(),
    }
  }

  fn current(&self) -> ScopeId {
    *self.stack.last().unwrap_or(&ScopeId::ROOT)
  }

  fn push_scope(&mut self, typ: ScopeType) -> ScopeId {
    let id = self.tree.create_child(self.current(), typ);
    self.stack.push(id);
    id
  }

  fn define(&mut self, scope: ScopeId, name: &str, kind: DeclKind) {
    self.tree.get_mut(scope).define(name, kind);
  }

  fn define_hoisted(&mut self, name: &str, kind: DeclKind) {
    let target = self.tree.hoist_target(self.current());
    self.define(target, name, kind);
  }

  // Recorded unresolved; `fix_refs` finds the origin once every declaration is known.
  fn add_ref(&mut self, name: &str) {
    let current = self.current();
    self.tree.get_mut(current).refs.insert(name.to_string(), None);
  }
}

impl ScopeVisitor {
  fn enter_call_expr_node(&mut self, node: &mut CallExprNode) {
    if let Expr::Id(callee) = node.stx.callee.stx.as_ref() {
      if callee.stx.name == "eval" {
        self.pending_eval.push(self.current());
      };
    };
  }

  fn enter_catch_block_node(&mut self, node: &mut CatchBlockNode) {
    let scope = self.push_scope(ScopeType::Catch);
    self.define(scope, &node.stx.parameter.stx.name, DeclKind::Catch);
    node.assoc.set(scope);
  }

  fn exit_catch_block_node(&mut self, _node: &mut CatchBlockNode) {
    self.stack.pop();
  }

  fn enter_for_in_stmt_node(&mut self, node: &mut ForInStmtNode) {
    if let ForInLhs::Decl(name) = &node.stx.lhs {
      self.define_hoisted(&name.stx.name, DeclKind::Var);
      self.add_ref(&name.stx.name);
    };
  }

  fn enter_func_decl_node(&mut self, node: &mut FuncDeclNode) {
    self.define_hoisted(&node.stx.name.stx.name, DeclKind::Defun);
  }

  fn enter_func_node(&mut self, node: &mut FuncNode) {
    let scope = self.push_scope(ScopeType::Function);
    if let Some(name) = &node.stx.name {
      self.define(scope, &name.stx.name, DeclKind::Lambda);
    };
    for param in node.stx.params.iter() {
      self.define(scope, &param.stx.name, DeclKind::Arg);
    }
    node.assoc.set(scope);
  }

  fn exit_func_node(&mut self, _node: &mut FuncNode) {
    self.stack.pop();
  }

  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    node.assoc.set(self.current());
    self.add_ref(&node.stx.name);
  }

  fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
    node.assoc.set(self.current());
  }

  fn enter_var_decl_node(&mut self, node: &mut VarDeclNode) {
    let kind = match node.stx.mode {
      VarDeclMode::Const => DeclKind::Const,
      VarDeclMode::Var => DeclKind::Var,
    };
    for declarator in node.stx.declarators.iter() {
      let name = &declarator.name.stx.name;
      self.define_hoisted(name, kind);
      if declarator.initializer.is_some() {
        self.add_ref(name);
      };
    }
  }

  fn enter_with_stmt_node(&mut self, _node: &mut WithStmtNode) {
    let chain: Vec<_> = self.tree.self_and_ancestors(self.current()).collect();
    for s in chain {
      self.tree.get_mut(s).uses_with = true;
    }
  }
}
