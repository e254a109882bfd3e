use crate::core::{ScalarValue, TypeTag};

/// `IS NULL`: decides absence of an already evaluated operand.
pub struct IsNullOperator;

impl IsNullOperator {
    /// Always a non-null BOOLEAN; presence is decidable for every operand.
    pub fn evaluate(operand: &ScalarValue) -> ScalarValue {
        ScalarValue::boolean(Self::test(operand))
    }

    pub fn test(operand: &ScalarValue) -> bool {
        operand.is_null()
    }

    pub fn output_type() -> TypeTag {
        TypeTag::Boolean
    }
}

/// `IS NOT NULL`, defined as the complement of [`IsNullOperator`].
pub struct IsNotNullOperator;

impl IsNotNullOperator {
    pub fn evaluate(operand: &ScalarValue) -> ScalarValue {
        ScalarValue::boolean(!IsNullOperator::test(operand))
    }

    pub fn output_type() -> TypeTag {
        IsNullOperator::output_type()
    }
}
