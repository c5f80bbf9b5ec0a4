use super::expr::pat::IdPat;
use super::node::Node;
use super::stmt::Stmt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// Shared by function declarations and function expressions. A function's scope starts at its parameters, so the name of a function expression lives here (it binds inside the function), while a declaration's name lives on FuncDecl (it binds in the enclosing scope).
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct Func {
  // Only set for named function expressions.
  pub name: Option<Node<IdPat>>,
  pub params: Vec<Node<IdPat>>,
  pub body: Vec<Node<Stmt>>,
}
