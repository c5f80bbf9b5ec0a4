use crate::operator::OperatorName;
use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;

#[rustfmt::skip]
pub static BINARY_OPERATOR_MAPPING: Lazy<HashMap<&'static str, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, OperatorName>::new();
  map.insert("||", OperatorName::LogicalOr);
  map.insert("&&", OperatorName::LogicalAnd);
  map.insert("|", OperatorName::BitwiseOr);
  map.insert("^", OperatorName::BitwiseXor);
  map.insert("&", OperatorName::BitwiseAnd);
  map.insert("==", OperatorName::Equality);
  map.insert("===", OperatorName::StrictEquality);
  map.insert("!=", OperatorName::Inequality);
  map.insert("!==", OperatorName::StrictInequality);
  map.insert("<", OperatorName::LessThan);
  map.insert(">", OperatorName::GreaterThan);
  map.insert("<=", OperatorName::LessThanOrEqual);
  map.insert(">=", OperatorName::GreaterThanOrEqual);
  map.insert("in", OperatorName::In);
  map.insert("instanceof", OperatorName::Instanceof);
  map.insert(">>", OperatorName::BitwiseRightShift);
  map.insert("<<", OperatorName::BitwiseLeftShift);
  map.insert(">>>", OperatorName::BitwiseUnsignedRightShift);
  map.insert("+", OperatorName::Addition);
  map.insert("-", OperatorName::Subtraction);
  map.insert("*", OperatorName::Multiplication);
  map.insert("/", OperatorName::Division);
  map.insert("%", OperatorName::Remainder);
  map
});

#[rustfmt::skip]
pub static UNARY_PREFIX_OPERATOR_MAPPING: Lazy<HashMap<&'static str, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, OperatorName>::new();
  map.insert("typeof", OperatorName::Typeof);
  map.insert("void", OperatorName::Void);
  map.insert("delete", OperatorName::Delete);
  map.insert("--", OperatorName::PrefixDecrement);
  map.insert("++", OperatorName::PrefixIncrement);
  map.insert("!", OperatorName::LogicalNot);
  map.insert("~", OperatorName::BitwiseNot);
  map.insert("-", OperatorName::UnaryNegation);
  map.insert("+", OperatorName::UnaryPlus);
  map
});

pub static UNARY_POSTFIX_OPERATOR_MAPPING: Lazy<HashMap<&'static str, OperatorName>> =
  Lazy::new(|| {
    let mut map = HashMap::<&'static str, OperatorName>::new();
    map.insert("--", OperatorName::PostfixDecrement);
    map.insert("++", OperatorName::PostfixIncrement);
    map
  });

#[rustfmt::skip]
pub static ASSIGNMENT_OPERATOR_MAPPING: Lazy<HashMap<&'static str, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, OperatorName>::new();
  map.insert("=", OperatorName::Assignment);
  map.insert("+=", OperatorName::AssignmentAddition);
  map.insert("-=", OperatorName::AssignmentSubtraction);
  map.insert("/=", OperatorName::AssignmentDivision);
  map.insert("*=", OperatorName::AssignmentMultiplication);
  map.insert("%=", OperatorName::AssignmentRemainder);
  map.insert(">>=", OperatorName::AssignmentBitwiseRightShift);
  map.insert("<<=", OperatorName::AssignmentBitwiseLeftShift);
  map.insert(">>>=", OperatorName::AssignmentBitwiseUnsignedRightShift);
  map.insert("|=", OperatorName::AssignmentBitwiseOr);
  map.insert("^=", OperatorName::AssignmentBitwiseXor);
  map.insert("&=", OperatorName::AssignmentBitwiseAnd);
  map
});
