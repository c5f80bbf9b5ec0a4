use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// A binding occurrence of a name: a declared variable, parameter, function name, or catch parameter.
#[derive(Clone, Debug, Drive, DriveMut, PartialEq, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}
