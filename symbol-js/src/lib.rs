//! Lexical scope analysis and identifier mangling for parse-js syntax trees.
//!
//! [`compute_scopes`] annotates a parsed program with its scope tree; [`mangle::mangle`] then renames bindings to short names wherever that can't change behavior.

pub mod mangle;
pub mod resolve;
pub mod scope;

pub use resolve::compute_scopes;
pub use resolve::scope_tree;
pub use scope::DeclKind;
pub use scope::Scope;
pub use scope::ScopeId;
pub use scope::ScopeTree;
pub use scope::ScopeType;
