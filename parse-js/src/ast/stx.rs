use super::node::Node;
use super::stmt::Stmt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct TopLevel {
  pub body: Vec<Node<Stmt>>,
}
