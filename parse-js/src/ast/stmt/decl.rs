use crate::ast::expr::pat::IdPat;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct FuncDecl {
  pub name: Node<IdPat>,
  pub function: Node<Func>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum VarDeclMode {
  Const,
  Var,
}

impl VarDeclMode {
  pub fn keyword(self) -> &'static str {
    match self {
      VarDeclMode::Const => "const",
      VarDeclMode::Var => "var",
    }
  }
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct VarDeclarator {
  pub name: Node<IdPat>,
  pub initializer: Option<Node<Expr>>,
}

#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct VarDecl {
  #[drive(skip)]
  pub mode: VarDeclMode,
  pub declarators: Vec<VarDeclarator>,
}
