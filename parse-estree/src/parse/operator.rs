use crate::operator::Operator;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;

#[rustfmt::skip]
pub static BINARY_OPERATOR_MAPPING: Lazy<HashMap<TT, &'static Operator>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static Operator>::new();
  map.insert(TT::Plus, &OPERATORS[&OperatorName::Addition]);
  map.insert(TT::Ampersand, &OPERATORS[&OperatorName::BitwiseAnd]);
  map.insert(TT::ChevronLeftChevronLeft, &OPERATORS[&OperatorName::BitwiseLeftShift]);
  map.insert(TT::Bar, &OPERATORS[&OperatorName::BitwiseOr]);
  map.insert(TT::ChevronRightChevronRight, &OPERATORS[&OperatorName::BitwiseRightShift]);
  map.insert(TT::ChevronRightChevronRightChevronRight, &OPERATORS[&OperatorName::BitwiseUnsignedRightShift]);
  map.insert(TT::Caret, &OPERATORS[&OperatorName::BitwiseXor]);
  map.insert(TT::Slash, &OPERATORS[&OperatorName::Division]);
  map.insert(TT::EqualsEquals, &OPERATORS[&OperatorName::Equality]);
  map.insert(TT::AsteriskAsterisk, &OPERATORS[&OperatorName::Exponentiation]);
  map.insert(TT::ChevronRight, &OPERATORS[&OperatorName::GreaterThan]);
  map.insert(TT::ChevronRightEquals, &OPERATORS[&OperatorName::GreaterThanOrEqual]);
  map.insert(TT::KeywordIn, &OPERATORS[&OperatorName::In]);
  map.insert(TT::ExclamationEquals, &OPERATORS[&OperatorName::Inequality]);
  map.insert(TT::KeywordInstanceof, &OPERATORS[&OperatorName::Instanceof]);
  map.insert(TT::ChevronLeft, &OPERATORS[&OperatorName::LessThan]);
  map.insert(TT::ChevronLeftEquals, &OPERATORS[&OperatorName::LessThanOrEqual]);
  map.insert(TT::AmpersandAmpersand, &OPERATORS[&OperatorName::LogicalAnd]);
  map.insert(TT::BarBar, &OPERATORS[&OperatorName::LogicalOr]);
  map.insert(TT::Asterisk, &OPERATORS[&OperatorName::Multiplication]);
  map.insert(TT::QuestionQuestion, &OPERATORS[&OperatorName::NullishCoalescing]);
  map.insert(TT::Percent, &OPERATORS[&OperatorName::Remainder]);
  map.insert(TT::EqualsEqualsEquals, &OPERATORS[&OperatorName::StrictEquality]);
  map.insert(TT::ExclamationEqualsEquals, &OPERATORS[&OperatorName::StrictInequality]);
  map.insert(TT::Hyphen, &OPERATORS[&OperatorName::Subtraction]);
  map
});

#[rustfmt::skip]
pub static ASSIGNMENT_OPERATOR_MAPPING: Lazy<HashMap<TT, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<TT, OperatorName>::new();
  map.insert(TT::Equals, OperatorName::Assignment);
  map.insert(TT::PlusEquals, OperatorName::AssignmentAddition);
  map.insert(TT::AmpersandEquals, OperatorName::AssignmentBitwiseAnd);
  map.insert(TT::ChevronLeftChevronLeftEquals, OperatorName::AssignmentBitwiseLeftShift);
  map.insert(TT::BarEquals, OperatorName::AssignmentBitwiseOr);
  map.insert(TT::ChevronRightChevronRightEquals, OperatorName::AssignmentBitwiseRightShift);
  map.insert(TT::ChevronRightChevronRightChevronRightEquals, OperatorName::AssignmentBitwiseUnsignedRightShift);
  map.insert(TT::CaretEquals, OperatorName::AssignmentBitwiseXor);
  map.insert(TT::SlashEquals, OperatorName::AssignmentDivision);
  map.insert(TT::AsteriskAsteriskEquals, OperatorName::AssignmentExponentiation);
  map.insert(TT::AmpersandAmpersandEquals, OperatorName::AssignmentLogicalAnd);
  map.insert(TT::BarBarEquals, OperatorName::AssignmentLogicalOr);
  map.insert(TT::AsteriskEquals, OperatorName::AssignmentMultiplication);
  map.insert(TT::QuestionQuestionEquals, OperatorName::AssignmentNullishCoalescing);
  map.insert(TT::PercentEquals, OperatorName::AssignmentRemainder);
  map.insert(TT::HyphenEquals, OperatorName::AssignmentSubtraction);
  map
});

#[rustfmt::skip]
pub static UNARY_OPERATOR_MAPPING: Lazy<HashMap<TT, OperatorName>> = Lazy::new(|| {
  let mut map = HashMap::<TT, OperatorName>::new();
  // Update operators, `await` and `yield` are handled manually.
  map.insert(TT::Tilde, OperatorName::BitwiseNot);
  map.insert(TT::KeywordDelete, OperatorName::Delete);
  map.insert(TT::Exclamation, OperatorName::LogicalNot);
  map.insert(TT::Hyphen, OperatorName::UnaryNegation);
  map.insert(TT::Plus, OperatorName::UnaryPlus);
  map.insert(TT::KeywordTypeof, OperatorName::Typeof);
  map.insert(TT::KeywordVoid, OperatorName::Void);
  map
});
