use crate::resolve::compute_scopes;
use crate::scope::ScopeId;
use crate::scope::ScopeTree;
use ahash::HashSet;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use parse_js::ast::expr::pat::IdPat;
use parse_js::ast::expr::IdExpr;
use parse_js::ast::node::Node;
use parse_js::ast::node::NodeAssocData;
use parse_js::ast::stx::TopLevel;
use parse_js::grammar::is_identifier;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing::debug_span;
use tracing::trace;

// Upper bound on candidates tried for a single binding.
const MAX_CANDIDATES: usize = 1 << 20;

/// Options controlling how identifier mangling behaves.
#[derive(Clone, Debug, Default)]
pub struct MangleOptions {
  /// Whether to rename bindings declared in the program scope. These are globals visible to other scripts, so this is off by default.
  pub include_toplevel: bool,
  /// Names that are never renamed, and that no other binding is renamed to.
  pub except: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenamedBinding {
  pub scope: ScopeId,
  pub original: String,
  pub mangled: String,
}

/// Every binding that was renamed, in the order names were assigned.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MangleResult {
  pub renamed: Vec<RenamedBinding>,
}

impl MangleResult {
  pub fn mangled_name(&self, original: &str) -> Option<&str> {
    self
      .renamed
      .iter()
      .find(|r| r.original == original)
      .map(|r| r.mangled.as_str())
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MangleError {
  #[error("no short name available for `{name}` after {attempts} candidates")]
  CandidatesExhausted { name: String, attempts: usize },
}

/// Renames bindings in place to short names, returning what was renamed.
///
/// Runs [`compute_scopes`] first if the program has no scope tree yet. Names in scopes tainted by `eval` or `with` keep their spelling, as do globals and (unless `include_toplevel`) program scope bindings.
pub fn mangle(
  top_level_node: &mut Node<TopLevel>,
  opts: &MangleOptions,
) -> Result<MangleResult, MangleError> {
  let span = debug_span!("mangle", include_toplevel = opts.include_toplevel);
  let _guard = span.enter();

  if top_level_node.assoc.get::<ScopeTree>().is_none() {
    compute_scopes(top_level_node);
  };
  let mut tree = top_level_node
    .assoc
    .remove::<ScopeTree>()
    .unwrap_or_default();
  let except: HashSet<&str> = opts.except.iter().map(|n| n.as_str()).collect();

  let mut result = MangleResult::default();
  // On failure the tree is dropped along with its partial assignments; the AST is untouched.
  assign_names(&mut tree, opts, &except, &mut result)?;

  let mut visitor = RenameVisitor { tree: &tree };
  top_level_node.drive_mut(&mut visitor);
  debug!(renamed = result.renamed.len(), "mangled bindings");
  top_level_node.assoc.set(tree);
  Ok(result)
}

fn assign_names(
  tree: &mut ScopeTree,
  opts: &MangleOptions,
  except: &HashSet<&str>,
  result: &mut MangleResult,
) -> Result<(), MangleError> {
  // Ascending ids visit parents before children, so ancestors' assignments are final when a scope picks its names.
  for id in tree.ids().collect::<Vec<_>>() {
    if id == tree.root() && !opts.include_toplevel {
      continue;
    };
    let scope = tree.get(id);
    if scope.is_dynamic() {
      continue;
    };
    let names: Vec<String> = scope
      .names()
      .iter()
      .filter(|n| !except.contains(n.as_str()))
      .cloned()
      .collect();
    for name in names {
      let mangled = next_mangled(tree, id, except).ok_or_else(|| MangleError::CandidatesExhausted {
        name: name.clone(),
        attempts: MAX_CANDIDATES,
      })?;
      trace!(%name, %mangled, "renaming");
      let scope = tree.get_mut(id);
      scope.rev_mangled.insert(mangled.clone(), name.clone());
      scope.mangled.insert(name.clone(), mangled.clone());
      result.renamed.push(RenamedBinding {
        scope: id,
        original: name,
        mangled,
      });
    }
  }
  Ok(())
}

const BASE54_DIGITS: &[u8; 54] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ$_";

/// The `n`th short name: `a`, `b`, ..., `_`, `ba`, `bb`, ... (most significant digit first).
pub fn base54(mut n: usize) -> String {
  let mut digits = Vec::new();
  loop {
    digits.push(BASE54_DIGITS[n % 54]);
    n /= 54;
    if n == 0 {
      break;
    };
  }
  digits.iter().rev().map(|&d| d as char).collect()
}

// Advances the scope's counter until a candidate can't capture or shadow anything referenced from this scope or below.
fn next_mangled(tree: &mut ScopeTree, id: ScopeId, except: &HashSet<&str>) -> Option<String> {
  for _ in 0..MAX_CANDIDATES {
    let scope = tree.get_mut(id);
    let candidate = base54(scope.counter);
    scope.counter += 1;
    let scope = tree.get(id);

    // Already the new name of some binding further out that's used in here.
    if let Some(prior) = tree.find_mangled(id, &candidate) {
      let renamed_from = tree.get(prior).original_name(&candidate);
      if renamed_from.is_some_and(|orig| scope.reference(orig) == Some(Some(prior))) {
        continue;
      };
    };
    // An outer binding that keeps its spelling and is used in here.
    if let Some(prior) = tree.find_decl(id, &candidate) {
      if prior != id
        && scope.reference(&candidate) == Some(Some(prior))
        && tree.get(prior).mangled_name(&candidate).is_none()
      {
        continue;
      };
    };
    // A global used in here.
    if scope.reference(&candidate) == Some(None) {
      continue;
    };
    if !is_identifier(&candidate)
      || matches!(candidate.as_str(), "arguments" | "eval" | "this")
      || except.contains(candidate.as_str())
    {
      continue;
    };
    return Some(candidate);
  }
  None
}

type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;

#[derive(VisitorMut)]
#[visitor(IdExprNode(enter), IdPatNode(enter))]
struct RenameVisitor<'a> {
  tree: &'a ScopeTree,
}

impl RenameVisitor<'_> {
  fn rename(&self, assoc: &NodeAssocData, name: &mut String) {
    let Some(&scope) = assoc.get::<ScopeId>() else {
      return;
    };
    if let Some(new_name) = self.tree.renamed(scope, name) {
      *name = new_name.to_string();
    };
  }

  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    self.rename(&node.assoc, &mut node.stx.name);
  }

  fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
    self.rename(&node.assoc, &mut node.stx.name);
  }
}
