use super::Expr;
use crate::ast::node::Node;
use crate::num::JsNumber;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub enum LitArrElem {
  Single(Node<Expr>),
  // A hole, as in `[1,,2]`.
  Empty,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<LitArrElem>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Atom {
  False,
  Null,
  True,
}

impl Atom {
  pub fn from_keyword(word: &str) -> Option<Atom> {
    match word {
      "false" => Some(Atom::False),
      "null" => Some(Atom::Null),
      "true" => Some(Atom::True),
      _ => None,
    }
  }

  pub fn keyword(self) -> &'static str {
    match self {
      Atom::False => "false",
      Atom::Null => "null",
      Atom::True => "true",
    }
  }
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitAtomExpr {
  #[drive(skip)]
  pub value: Atom,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: JsNumber,
}

// Keys are always stored as their string value; `{1: x}` and `{"1": x}` are equivalent.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct ObjMember {
  #[drive(skip)]
  pub key: String,
  pub value: Node<Expr>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitRegexExpr {
  #[drive(skip)]
  pub pattern: String,
  #[drive(skip)]
  pub flags: String,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}
