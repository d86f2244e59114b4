use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde::Serializer;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
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
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Decrement,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Increment,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  Multiplication,
  NullishCoalescing,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
}

impl OperatorName {
  pub fn symbol(self) -> &'static str {
    match self {
      OperatorName::Addition => "+",
      OperatorName::Assignment => "=",
      OperatorName::AssignmentAddition => "+=",
      OperatorName::AssignmentBitwiseAnd => "&=",
      OperatorName::AssignmentBitwiseLeftShift => "<<=",
      OperatorName::AssignmentBitwiseOr => "|=",
      OperatorName::AssignmentBitwiseRightShift => ">>=",
      OperatorName::AssignmentBitwiseUnsignedRightShift => ">>>=",
      OperatorName::AssignmentBitwiseXor => "^=",
      OperatorName::AssignmentDivision => "/=",
      OperatorName::AssignmentExponentiation => "**=",
      OperatorName::AssignmentLogicalAnd => "&&=",
      OperatorName::AssignmentLogicalOr => "||=",
      OperatorName::AssignmentMultiplication => "*=",
      OperatorName::AssignmentNullishCoalescing => "??=",
      OperatorName::AssignmentRemainder => "%=",
      OperatorName::AssignmentSubtraction => "-=",
      OperatorName::BitwiseAnd => "&",
      OperatorName::BitwiseLeftShift => "<<",
      OperatorName::BitwiseNot => "~",
      OperatorName::BitwiseOr => "|",
      OperatorName::BitwiseRightShift => ">>",
      OperatorName::BitwiseUnsignedRightShift => ">>>",
      OperatorName::BitwiseXor => "^",
      OperatorName::Decrement => "--",
      OperatorName::Delete => "delete",
      OperatorName::Division => "/",
      OperatorName::Equality => "==",
      OperatorName::Exponentiation => "**",
      OperatorName::GreaterThan => ">",
      OperatorName::GreaterThanOrEqual => ">=",
      OperatorName::In => "in",
      OperatorName::Increment => "++",
      OperatorName::Inequality => "!=",
      OperatorName::Instanceof => "instanceof",
      OperatorName::LessThan => "<",
      OperatorName::LessThanOrEqual => "<=",
      OperatorName::LogicalAnd => "&&",
      OperatorName::LogicalNot => "!",
      OperatorName::LogicalOr => "||",
      OperatorName::Multiplication => "*",
      OperatorName::NullishCoalescing => "??",
      OperatorName::Remainder => "%",
      OperatorName::StrictEquality => "===",
      OperatorName::StrictInequality => "!==",
      OperatorName::Subtraction => "-",
      OperatorName::Typeof => "typeof",
      OperatorName::UnaryNegation => "-",
      OperatorName::UnaryPlus => "+",
      OperatorName::Void => "void",
    }
  }

  /// Operators that produce a `LogicalExpression` rather than a `BinaryExpression`.
  pub fn is_logical(self) -> bool {
    matches!(
      self,
      OperatorName::LogicalAnd | OperatorName::LogicalOr | OperatorName::NullishCoalescing
    )
  }
}

impl Serialize for OperatorName {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.symbol())
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Clone, Copy, Debug)]
pub struct Operator {
  pub name: OperatorName,
  pub associativity: Associativity,
  pub precedence: u8,
}

const PRECEDENCE_LEVELS: &[(&[OperatorName], Associativity)] = &[
  (
    &[
      OperatorName::Assignment,
      OperatorName::AssignmentAddition,
      OperatorName::AssignmentBitwiseAnd,
      OperatorName::AssignmentBitwiseLeftShift,
      OperatorName::AssignmentBitwiseOr,
      OperatorName::AssignmentBitwiseRightShift,
      OperatorName::AssignmentBitwiseUnsignedRightShift,
      OperatorName::AssignmentBitwiseXor,
      OperatorName::AssignmentDivision,
      OperatorName::AssignmentExponentiation,
      OperatorName::AssignmentLogicalAnd,
      OperatorName::AssignmentLogicalOr,
      OperatorName::AssignmentMultiplication,
      OperatorName::AssignmentNullishCoalescing,
      OperatorName::AssignmentRemainder,
      OperatorName::AssignmentSubtraction,
    ],
    Associativity::Right,
  ),
  (
    &[OperatorName::LogicalOr, OperatorName::NullishCoalescing],
    Associativity::Left,
  ),
  (&[OperatorName::LogicalAnd], Associativity::Left),
  (&[OperatorName::BitwiseOr], Associativity::Left),
  (&[OperatorName::BitwiseXor], Associativity::Left),
  (&[OperatorName::BitwiseAnd], Associativity::Left),
  (
    &[
      OperatorName::Equality,
      OperatorName::Inequality,
      OperatorName::StrictEquality,
      OperatorName::StrictInequality,
    ],
    Associativity::Left,
  ),
  (
    &[
      OperatorName::GreaterThan,
      OperatorName::GreaterThanOrEqual,
      OperatorName::In,
      OperatorName::Instanceof,
      OperatorName::LessThan,
      OperatorName::LessThanOrEqual,
    ],
    Associativity::Left,
  ),
  (
    &[
      OperatorName::BitwiseLeftShift,
      OperatorName::BitwiseRightShift,
      OperatorName::BitwiseUnsignedRightShift,
    ],
    Associativity::Left,
  ),
  (
    &[OperatorName::Addition, OperatorName::Subtraction],
    Associativity::Left,
  ),
  (
    &[
      OperatorName::Division,
      OperatorName::Multiplication,
      OperatorName::Remainder,
    ],
    Associativity::Left,
  ),
  (&[OperatorName::Exponentiation], Associativity::Right),
];

/// Binary and assignment operators with their precedence; a higher precedence binds tighter.
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  let mut map = HashMap::<OperatorName, Operator>::new();
  for (i, (names, associativity)) in PRECEDENCE_LEVELS.iter().enumerate() {
    // Leave room below for the comma and conditional levels.
    let precedence = (i as u8) + 3;
    for &name in names.iter() {
      map.insert(name, Operator {
        name,
        associativity: *associativity,
        precedence,
      });
    }
  }
  map
});

#[cfg(test)]
mod tests {
  use super::OperatorName;
  use super::OPERATORS;

  #[test]
  fn test_precedence_order() {
    let p = |n: OperatorName| OPERATORS[&n].precedence;
    assert!(p(OperatorName::Multiplication) > p(OperatorName::Addition));
    assert!(p(OperatorName::Exponentiation) > p(OperatorName::Multiplication));
    assert!(p(OperatorName::LogicalAnd) > p(OperatorName::LogicalOr));
    assert_eq!(p(OperatorName::NullishCoalescing), p(OperatorName::LogicalOr));
    assert!(p(OperatorName::LogicalOr) > p(OperatorName::Assignment));
  }
}
