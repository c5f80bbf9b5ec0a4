use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentMultiplication,
  AssignmentRemainder,
  AssignmentSubtraction,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  Delete,
  Division,
  Equality,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MemberAccess,
  Multiplication,
  New,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

pub struct Operator {
  pub name: OperatorName,
  // Source text, e.g. `>>>=` or `typeof`.
  pub text: &'static str,
  // Higher binds tighter. Binary operators occupy 4 (`||`) to 13 (`* / %`), i.e. the grammar's binary precedence plus 3.
  pub precedence: u8,
  pub associativity: Associativity,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentBitwiseAnd
        | OperatorName::AssignmentBitwiseLeftShift
        | OperatorName::AssignmentBitwiseOr
        | OperatorName::AssignmentBitwiseRightShift
        | OperatorName::AssignmentBitwiseUnsignedRightShift
        | OperatorName::AssignmentBitwiseXor
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }

  pub fn operator(self) -> &'static Operator {
    &OPERATORS[&self]
  }

  pub fn text(self) -> &'static str {
    self.operator().text
  }

  pub fn precedence(self) -> u8 {
    self.operator().precedence
  }
}

pub const PRECEDENCE_COMMA: u8 = 1;
pub const PRECEDENCE_ASSIGNMENT: u8 = 2;
pub const PRECEDENCE_CONDITIONAL: u8 = 3;
pub const PRECEDENCE_UNARY: u8 = 14;
pub const PRECEDENCE_POSTFIX: u8 = 15;
pub const PRECEDENCE_CALL_MEMBER: u8 = 16;
pub const PRECEDENCE_PRIMARY: u8 = 17;

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;
  let table: [(OperatorName, &'static str, u8, Associativity); 52] = [
    (Comma, ",", PRECEDENCE_COMMA, Left),

    (Assignment, "=", PRECEDENCE_ASSIGNMENT, Right),
    (AssignmentAddition, "+=", PRECEDENCE_ASSIGNMENT, Right),
    (AssignmentBitwiseAnd, "&=", PRECEDENCE_ASSIGNMENT, Right),
    (AssignmentBitwiseLeftShift, "<<=", PRECEDENCE_ASSIGNMENT, Right),
    (AssignmentBitwiseOr, "|=", PRECEDENCE_ASSIGNMENT, Right),
    (AssignmentBitwiseRightShift, ">>=", PRECEDENCE_ASSIGNMENT, Right),
    (AssignmentBitwiseUnsignedRightShift, ">>>=", PRECEDENCE_ASSIGNMENT, Right),
    (AssignmentBitwiseXor, "^=", PRECEDENCE_ASSIGNMENT, Right),
    (AssignmentDivision, "/=", PRECEDENCE_ASSIGNMENT, Right),
    (AssignmentMultiplication, "*=", PRECEDENCE_ASSIGNMENT, Right),
    (AssignmentRemainder, "%=", PRECEDENCE_ASSIGNMENT, Right),
    (AssignmentSubtraction, "-=", PRECEDENCE_ASSIGNMENT, Right),

    (Conditional, "?", PRECEDENCE_CONDITIONAL, Right),

    (LogicalOr, "||", 4, Left),
    (LogicalAnd, "&&", 5, Left),
    (BitwiseOr, "|", 6, Left),
    (BitwiseXor, "^", 7, Left),
    (BitwiseAnd, "&", 8, Left),
    (Equality, "==", 9, Left),
    (Inequality, "!=", 9, Left),
    (StrictEquality, "===", 9, Left),
    (StrictInequality, "!==", 9, Left),
    (LessThan, "<", 10, Left),
    (LessThanOrEqual, "<=", 10, Left),
    (GreaterThan, ">", 10, Left),
    (GreaterThanOrEqual, ">=", 10, Left),
    (In, "in", 10, Left),
    (Instanceof, "instanceof", 10, Left),
    (BitwiseLeftShift, "<<", 11, Left),
    (BitwiseRightShift, ">>", 11, Left),
    (BitwiseUnsignedRightShift, ">>>", 11, Left),
    (Addition, "+", 12, Left),
    (Subtraction, "-", 12, Left),
    (Multiplication, "*", 13, Left),
    (Division, "/", 13, Left),
    (Remainder, "%", 13, Left),

    (BitwiseNot, "~", PRECEDENCE_UNARY, Right),
    (Delete, "delete", PRECEDENCE_UNARY, Right),
    (LogicalNot, "!", PRECEDENCE_UNARY, Right),
    (PrefixDecrement, "--", PRECEDENCE_UNARY, Right),
    (PrefixIncrement, "++", PRECEDENCE_UNARY, Right),
    (Typeof, "typeof", PRECEDENCE_UNARY, Right),
    (UnaryNegation, "-", PRECEDENCE_UNARY, Right),
    (UnaryPlus, "+", PRECEDENCE_UNARY, Right),
    (Void, "void", PRECEDENCE_UNARY, Right),

    (PostfixDecrement, "--", PRECEDENCE_POSTFIX, Left),
    (PostfixIncrement, "++", PRECEDENCE_POSTFIX, Left),

    (Call, "(", PRECEDENCE_CALL_MEMBER, Left),
    (ComputedMemberAccess, "[", PRECEDENCE_CALL_MEMBER, Left),
    (MemberAccess, ".", PRECEDENCE_CALL_MEMBER, Left),
    (New, "new", PRECEDENCE_CALL_MEMBER, Right),
  ];
  let mut map = HashMap::<OperatorName, Operator>::new();
  for (name, text, precedence, associativity) in table {
    map.insert(name, Operator { name, text, precedence, associativity });
  }
  map
});

#[cfg(test)]
mod tests {
  use super::OperatorName;
  use crate::grammar::PRECEDENCE;
  use crate::parse::operator::BINARY_OPERATOR_MAPPING;

  #[test]
  fn binary_precedence_agrees_with_grammar_table() {
    for (text, name) in BINARY_OPERATOR_MAPPING.iter() {
      assert_eq!(name.precedence(), PRECEDENCE[text] + 3, "{}", text);
      assert_eq!(name.text(), *text);
    }
  }

  #[test]
  fn assignment_classification() {
    assert!(OperatorName::AssignmentBitwiseUnsignedRightShift.is_assignment());
    assert!(!OperatorName::Equality.is_assignment());
  }
}
