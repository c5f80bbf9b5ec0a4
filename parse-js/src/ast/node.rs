use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use ahash::HashMap;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;
use serde::Serializer;
use std::any::Any;
use std::any::TypeId;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::sync::Arc;

/// Arbitrary typed data attached to a node by later passes (scope handles, token spans, etc.). Values are shared on clone.
#[derive(Clone, Default)]
pub struct NodeAssocData {
  // Bounded by Send + Sync so nodes stay movable across threads.
  map: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl NodeAssocData {
  pub fn get<T: Any>(&self) -> Option<&T> {
    let t = TypeId::of::<T>();
    self.map.get(&t).and_then(|v| v.downcast_ref())
  }

  pub fn set<T: Any + Send + Sync>(&mut self, v: T) {
    let t = TypeId::of::<T>();
    self.map.insert(t, Arc::new(v));
  }

  /// Takes the value out, cloning it only if another node still shares it.
  pub fn remove<T: Any + Send + Sync + Clone>(&mut self) -> Option<T> {
    let t = TypeId::of::<T>();
    let v = self.map.remove(&t)?.downcast::<T>().ok()?;
    Some(Arc::try_unwrap(v).unwrap_or_else(|shared| (*shared).clone()))
  }
}

#[derive(Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  // A location is not a SourceRange; after some transformations, it's possible to create entirely new nodes that don't exist at all in the source code, so this may be approximate.
  #[drive(skip)]
  pub loc: Loc,
  pub stx: Box<S>,
  #[drive(skip)]
  pub assoc: NodeAssocData,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
      assoc: NodeAssocData::default(),
    }
  }

  pub fn into_stx<T: From<S> + Drive + DriveMut>(self) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(T::from(*self.stx)),
      assoc: self.assoc,
    }
  }

  /// Maps the syntax, keeping the location and associated data.
  pub fn map_stx<T: Drive + DriveMut, F: FnOnce(S) -> T>(self, f: F) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(f(*self.stx)),
      assoc: self.assoc,
    }
  }

  /// Wraps the node inside another node with the same loc, with syntax derived from the provided callback.
  pub fn wrap<T: Drive + DriveMut, F: FnOnce(Node<S>) -> T>(self, f: F) -> Node<T> {
    let loc = self.loc;
    let stx = f(self);
    Node::new(loc, stx)
  }

  /// Wraps the node in the enum variant that holds it, e.g. `Node<IfStmt>` to `Node<Stmt>`.
  pub fn into_wrapped<T: From<Node<S>> + Drive + DriveMut>(self) -> Node<T> {
    self.wrap(T::from)
  }

  /// Create an error at this node's location.
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, None)
  }
}

impl<S: Clone + Drive + DriveMut> Clone for Node<S> {
  fn clone(&self) -> Self {
    Node {
      loc: self.loc,
      stx: self.stx.clone(),
      assoc: self.assoc.clone(),
    }
  }
}

// Structural equality; locations and associated data are ignored.
impl<S: PartialEq + Drive + DriveMut> PartialEq for Node<S> {
  fn eq(&self, other: &Self) -> bool {
    self.stx == other.stx
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

impl<S: Serialize + Drive + DriveMut> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    self.stx.serialize(serializer)
  }
}

#[cfg(test)]
mod tests {
  use crate::ast::node::NodeAssocData;

  #[derive(Clone)]
  struct MyType(u32);

  #[test]
  fn test_node_assoc_data() {
    let mut assoc = NodeAssocData::default();
    assoc.set(MyType(32));
    let v = assoc.get::<MyType>().unwrap();
    assert_eq!(v.0, 32);
    assert!(assoc.get::<u8>().is_none());
  }

  #[test]
  fn test_node_assoc_data_shared_on_clone() {
    let mut assoc = NodeAssocData::default();
    assoc.set(MyType(7));
    let copy = assoc.clone();
    assert_eq!(assoc.remove::<MyType>().map(|v| v.0), Some(7));
    assert!(assoc.get::<MyType>().is_none());
    assert_eq!(copy.get::<MyType>().map(|v| v.0), Some(7));
  }
}
