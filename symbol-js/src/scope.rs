use ahash::HashMap;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(u32);

impl ScopeId {
  /// The program scope, always the first scope of a tree.
  pub const ROOT: ScopeId = ScopeId(0);

  pub(crate) fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScopeType {
  Program,
  Function,
  // Only the catch parameter binds here; `var` and function declarations in the body hoist past it.
  Catch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DeclKind {
  Var,
  Const,
  // Function declaration.
  Defun,
  // Name of a function expression, visible only inside the function.
  Lambda,
  Arg,
  Catch,
}

#[derive(Clone, Debug, Serialize)]
pub struct Scope {
  pub typ: ScopeType,
  pub parent: Option<ScopeId>,
  pub children: Vec<ScopeId>,
  // Declared names in declaration order.
  names: Vec<String>,
  decls: HashMap<String, DeclKind>,
  // Names referenced in this scope or any descendant, mapped to the scope declaring them (None for globals).
  pub(crate) refs: HashMap<String, Option<ScopeId>>,
  pub(crate) uses_eval: bool,
  pub(crate) uses_with: bool,
  pub(crate) mangled: HashMap<String, String>,
  pub(crate) rev_mangled: HashMap<String, String>,
  // Next position in the short name sequence.
  pub(crate) counter: usize,
}

impl Scope {
  fn new(typ: ScopeType, parent: Option<ScopeId>) -> Scope {
    Scope {
      typ,
      parent,
      children: Vec::new(),
      names: Vec::new(),
      decls: HashMap::default(),
      refs: HashMap::default(),
      uses_eval: false,
      uses_with: false,
      mangled: HashMap::default(),
      rev_mangled: HashMap::default(),
      counter: 0,
    }
  }

  /// Declares `name`. Redeclaring keeps the original kind and position.
  pub(crate) fn define(&mut self, name: &str, kind: DeclKind) {
    if !self.decls.contains_key(name) {
      self.names.push(name.to_string());
      self.decls.insert(name.to_string(), kind);
    };
  }

  pub fn names(&self) -> &[String] {
    &self.names
  }

  pub fn decl_kind(&self, name: &str) -> Option<DeclKind> {
    self.decls.get(name).copied()
  }

  pub fn declares(&self, name: &str) -> bool {
    self.decls.contains_key(name)
  }

  /// Whether `name` is referenced here or in a descendant scope. The inner Option is the declaring scope, or None if the name is global.
  pub fn reference(&self, name: &str) -> Option<Option<ScopeId>> {
    self.refs.get(name).copied()
  }

  pub fn references(&self) -> impl Iterator<Item = (&str, Option<ScopeId>)> {
    self.refs.iter().map(|(n, s)| (n.as_str(), *s))
  }

  pub fn uses_eval(&self) -> bool {
    self.uses_eval
  }

  pub fn uses_with(&self) -> bool {
    self.uses_with
  }

  /// Whether names in this scope must keep their original spelling.
  pub fn is_dynamic(&self) -> bool {
    self.uses_eval || self.uses_with
  }

  pub fn mangled_name(&self, name: &str) -> Option<&str> {
    self.mangled.get(name).map(|m| m.as_str())
  }

  pub fn original_name(&self, mangled: &str) -> Option<&str> {
    self.rev_mangled.get(mangled).map(|n| n.as_str())
  }
}

/// All scopes of a program, indexed by `ScopeId`. Scopes are created in source order, so ascending ids are a pre-order walk.
#[derive(Clone, Debug, Serialize)]
pub struct ScopeTree {
  scopes: Vec<Scope>,
}

impl ScopeTree {
  pub fn new() -> ScopeTree {
    ScopeTree {
      scopes: vec![Scope::new(ScopeType::Program, None)],
    }
  }

  pub fn root(&self) -> ScopeId {
    ScopeId::ROOT
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.is_empty()
  }

  pub fn ids(&self) -> impl Iterator<Item = ScopeId> {
    (0..self.scopes.len() as u32).map(ScopeId)
  }

  pub fn get(&self, id: ScopeId) -> &Scope {
    &self.scopes[id.index()]
  }

  pub(crate) fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
    &mut self.scopes[id.index()]
  }

  pub(crate) fn create_child(&mut self, parent: ScopeId, typ: ScopeType) -> ScopeId {
    let id = ScopeId(self.scopes.len() as u32);
    self.scopes.push(Scope::new(typ, Some(parent)));
    self.get_mut(parent).children.push(id);
    id
  }

  /// `id` followed by each enclosing scope up to the root.
  pub fn self_and_ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
    std::iter::successors(Some(id), move |s| self.get(*s).parent)
  }

  /// Where `var` and function declarations made in `id` bind: the nearest function or program scope.
  pub fn hoist_target(&self, id: ScopeId) -> ScopeId {
    self
      .self_and_ancestors(id)
      .find(|s| self.get(*s).typ != ScopeType::Catch)
      .unwrap_or(self.root())
  }

  /// The nearest scope from `id` outwards that declares `name`.
  pub fn find_decl(&self, id: ScopeId, name: &str) -> Option<ScopeId> {
    self
      .self_and_ancestors(id)
      .find(|s| self.get(*s).declares(name))
  }

  /// The nearest scope from `id` outwards that renamed something to `mangled`.
  pub fn find_mangled(&self, id: ScopeId, mangled: &str) -> Option<ScopeId> {
    self
      .self_and_ancestors(id)
      .find(|s| self.get(*s).rev_mangled.contains_key(mangled))
  }

  /// The short name assigned to the binding that `name` refers to from scope `id`, if it was renamed.
  pub fn renamed(&self, id: ScopeId, name: &str) -> Option<&str> {
    if self.get(id).is_dynamic() {
      return None;
    };
    self
      .find_decl(id, name)
      .and_then(|s| self.get(s).mangled_name(name))
  }
}

impl Default for ScopeTree {
  fn default() -> Self {
    ScopeTree::new()
  }
}
