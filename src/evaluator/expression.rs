use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::EvaluatorConfig;
use super::input_ref::InputRefOperator;
use super::is_null::{IsNotNullOperator, IsNullOperator};
use crate::core::{Result, Row, ScalarValue, Schema, TypeTag};

/// Immutable expression tree evaluated against one row at a time.
///
/// Children are owned exclusively, so a tree never shares nodes and never
/// contains cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Constant operand, independent of the row.
    Literal(ScalarValue),

    /// Field `index` of the row, expected to carry `declared_type`.
    InputRef {
        index: usize,
        declared_type: TypeTag,
    },

    IsNull(Box<Expression>),

    IsNotNull(Box<Expression>),
}

impl Expression {
    pub fn literal(value: impl Into<ScalarValue>) -> Self {
        Self::Literal(value.into())
    }

    pub fn input_ref(index: usize, declared_type: TypeTag) -> Self {
        Self::InputRef {
            index,
            declared_type,
        }
    }

    pub fn is_null(operand: Expression) -> Self {
        Self::IsNull(Box::new(operand))
    }

    pub fn is_not_null(operand: Expression) -> Self {
        Self::IsNotNull(Box::new(operand))
    }

    /// Evaluate with the default (strict) configuration.
    pub fn evaluate(&self, row: &Row) -> Result<ScalarValue> {
        self.evaluate_with(row, &EvaluatorConfig::default())
    }

    /// Operand failures propagate unchanged; they are never read as NULL.
    pub fn evaluate_with(&self, row: &Row, config: &EvaluatorConfig) -> Result<ScalarValue> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::InputRef {
                index,
                declared_type,
            } => InputRefOperator::evaluate(*index, *declared_type, row, config.strict_field_types),
            Self::IsNull(operand) => {
                let value = operand.evaluate_with(row, config)?;
                Ok(IsNullOperator::evaluate(&value))
            }
            Self::IsNotNull(operand) => {
                let value = operand.evaluate_with(row, config)?;
                Ok(IsNotNullOperator::evaluate(&value))
            }
        }
    }

    pub fn output_type(&self) -> TypeTag {
        match self {
            Self::Literal(value) => value.type_tag(),
            Self::InputRef { declared_type, .. } => *declared_type,
            Self::IsNull(_) => IsNullOperator::output_type(),
            Self::IsNotNull(_) => IsNotNullOperator::output_type(),
        }
    }

    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Self::Literal(_) | Self::InputRef { .. } => Vec::new(),
            Self::IsNull(operand) | Self::IsNotNull(operand) => vec![operand.as_ref()],
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.depth_up_to(usize::MAX)
    }

    /// Like [`Self::depth`], but stops walking once the depth exceeds
    /// `limit`; any result above `limit` is a lower bound.
    pub fn depth_up_to(&self, limit: usize) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1usize)];

        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            if deepest > limit {
                break;
            }
            pending.extend(node.children().into_iter().map(|child| (child, level + 1)));
        }

        deepest
    }

    fn detach_operand(&mut self, pending: &mut Vec<Box<Expression>>) {
        if let Self::IsNull(operand) | Self::IsNotNull(operand) = self {
            let leaf = Box::new(Self::Literal(ScalarValue::null(TypeTag::Boolean)));
            pending.push(std::mem::replace(operand, leaf));
        }
    }

    /// Check every input ref against `schema` before any row is seen.
    pub fn validate(&self, schema: &Schema) -> Result<()> {
        if let Self::InputRef {
            index,
            declared_type,
        } = self
        {
            InputRefOperator::validate(*index, *declared_type, schema)?;
        }

        self.children()
            .into_iter()
            .try_for_each(|child| child.validate(schema))
    }
}

// Operands are unlinked onto a heap stack so dropping a deep tree never recurses.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_operand(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_operand(&mut pending);
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) if value.is_null() => write!(f, "NULL:{}", value.type_tag()),
            Self::Literal(value) if value.type_tag().is_string() => write!(f, "'{}'", value),
            Self::Literal(value) => write!(f, "{}", value),
            Self::InputRef { index, .. } => write!(f, "${}", index),
            Self::IsNull(operand) => write!(f, "{} IS NULL", operand),
            Self::IsNotNull(operand) => write!(f, "{} IS NOT NULL", operand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, ExprError};

    fn record() -> Row {
        Row::new(vec![
            ScalarValue::bigint(1234),
            ScalarValue::null(TypeTag::BigInt),
            ScalarValue::varchar("cat"),
        ])
    }

    #[test]
    fn test_literal_ignores_row() {
        let expr = Expression::literal(ScalarValue::double(1.5));
        assert_eq!(expr.evaluate(&record()).unwrap(), ScalarValue::double(1.5));
        assert_eq!(
            expr.evaluate(&Row::default()).unwrap(),
            ScalarValue::double(1.5)
        );
    }

    #[test]
    fn test_is_null_on_input_refs() {
        let row = record();
        let present = Expression::is_null(Expression::input_ref(0, TypeTag::BigInt));
        let absent = Expression::is_null(Expression::input_ref(1, TypeTag::BigInt));

        assert_eq!(present.evaluate(&row).unwrap(), ScalarValue::boolean(false));
        assert_eq!(absent.evaluate(&row).unwrap(), ScalarValue::boolean(true));
    }

    #[test]
    fn test_is_not_null_on_input_refs() {
        let row = record();
        let present = Expression::is_not_null(Expression::input_ref(0, TypeTag::BigInt));
        let absent = Expression::is_not_null(Expression::input_ref(1, TypeTag::BigInt));

        assert_eq!(present.evaluate(&row).unwrap(), ScalarValue::boolean(true));
        assert_eq!(absent.evaluate(&row).unwrap(), ScalarValue::boolean(false));
    }

    #[test]
    fn test_nested_null_tests_are_never_null() {
        // The inner test yields a present BOOLEAN, so the outer one is false
        let expr = Expression::is_null(Expression::is_null(Expression::literal(
            ScalarValue::null(TypeTag::Date),
        )));
        assert_eq!(
            expr.evaluate(&record()).unwrap(),
            ScalarValue::boolean(false)
        );
    }

    #[test]
    fn test_operand_failure_propagates() {
        let row = record();
        let expected = ExprError::IndexOutOfRange { index: 9, len: 3 };

        let is_null = Expression::is_null(Expression::input_ref(9, TypeTag::BigInt));
        let is_not_null = Expression::is_not_null(Expression::input_ref(9, TypeTag::BigInt));

        assert_eq!(is_null.evaluate(&row).unwrap_err(), expected);
        assert_eq!(is_not_null.evaluate(&row).unwrap_err(), expected);
    }

    #[test]
    fn test_schema_mismatch_at_evaluation() {
        let expr = Expression::is_null(Expression::input_ref(2, TypeTag::BigInt));
        assert!(matches!(
            expr.evaluate(&record()),
            Err(ExprError::SchemaMismatch { index: 2, .. })
        ));

        let relaxed = EvaluatorConfig::new().relaxed();
        assert_eq!(
            expr.evaluate_with(&record(), &relaxed).unwrap(),
            ScalarValue::boolean(false)
        );
    }

    #[test]
    fn test_output_type_and_depth() {
        let leaf = Expression::input_ref(0, TypeTag::Timestamp);
        assert_eq!(leaf.output_type(), TypeTag::Timestamp);
        assert_eq!(leaf.depth(), 1);

        let expr = Expression::is_not_null(Expression::is_null(leaf));
        assert_eq!(expr.output_type(), TypeTag::Boolean);
        assert_eq!(expr.depth(), 3);
        assert_eq!(expr.children().len(), 1);
        assert_eq!(expr.depth_up_to(1), 2);
    }

    #[test]
    fn test_deep_tree_depth_and_drop() {
        let mut expr = Expression::input_ref(0, TypeTag::BigInt);
        for _ in 0..200_000 {
            expr = Expression::is_not_null(expr);
        }

        assert_eq!(expr.depth(), 200_001);
        assert_eq!(expr.depth_up_to(64), 65);
        drop(expr);
    }

    #[test]
    fn test_validate() {
        let schema = Schema::new(vec![
            Column::new("id", TypeTag::BigInt),
            Column::new("name", TypeTag::Varchar),
        ]);

        assert!(Expression::is_null(Expression::input_ref(1, TypeTag::Varchar))
            .validate(&schema)
            .is_ok());
        assert!(matches!(
            Expression::is_null(Expression::input_ref(1, TypeTag::BigInt)).validate(&schema),
            Err(ExprError::SchemaMismatch { index: 1, .. })
        ));
        assert!(matches!(
            Expression::is_not_null(Expression::input_ref(2, TypeTag::BigInt)).validate(&schema),
            Err(ExprError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_display() {
        let expr = Expression::is_not_null(Expression::input_ref(3, TypeTag::BigInt));
        assert_eq!(expr.to_string(), "$3 IS NOT NULL");

        let typed_null =
            Expression::is_null(Expression::literal(ScalarValue::null(TypeTag::BigInt)));
        assert_eq!(typed_null.to_string(), "NULL:BIGINT IS NULL");

        assert_eq!(Expression::literal("x").to_string(), "'x'");
    }
}
