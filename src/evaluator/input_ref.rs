use crate::core::{ExprError, Result, Row, ScalarValue, Schema, TypeTag};

/// Projection of one row field.
pub struct InputRefOperator;

impl InputRefOperator {
    pub fn evaluate(
        index: usize,
        declared_type: TypeTag,
        row: &Row,
        strict: bool,
    ) -> Result<ScalarValue> {
        let field = row.at(index)?;

        if strict && field.type_tag() != declared_type {
            return Err(ExprError::SchemaMismatch {
                index,
                declared: declared_type,
                actual: field.type_tag(),
            });
        }

        Ok(field.clone())
    }

    /// Construction-time counterpart of the check in [`Self::evaluate`].
    pub fn validate(index: usize, declared_type: TypeTag, schema: &Schema) -> Result<()> {
        let column = schema.column(index)?;

        if column.type_tag != declared_type {
            return Err(ExprError::SchemaMismatch {
                index,
                declared: declared_type,
                actual: column.type_tag,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Column;

    #[test]
    fn test_projects_field() {
        let row = Row::new(vec![
            ScalarValue::bigint(3),
            ScalarValue::null(TypeTag::Double),
        ]);
        assert_eq!(
            InputRefOperator::evaluate(0, TypeTag::BigInt, &row, true).unwrap(),
            ScalarValue::bigint(3)
        );
        assert_eq!(
            InputRefOperator::evaluate(1, TypeTag::Double, &row, true).unwrap(),
            ScalarValue::null(TypeTag::Double)
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let row = Row::new(vec![ScalarValue::bigint(3)]);
        assert_eq!(
            InputRefOperator::evaluate(4, TypeTag::BigInt, &row, true).unwrap_err(),
            ExprError::IndexOutOfRange { index: 4, len: 1 }
        );
    }

    #[test]
    fn test_declared_type_mismatch() {
        let row = Row::new(vec![ScalarValue::integer(3)]);
        assert_eq!(
            InputRefOperator::evaluate(0, TypeTag::BigInt, &row, true).unwrap_err(),
            ExprError::SchemaMismatch {
                index: 0,
                declared: TypeTag::BigInt,
                actual: TypeTag::Integer,
            }
        );
        // Relaxed mode hands back the field as stored
        assert_eq!(
            InputRefOperator::evaluate(0, TypeTag::BigInt, &row, false).unwrap(),
            ScalarValue::integer(3)
        );
    }

    #[test]
    fn test_validate_against_schema() {
        let schema = Schema::new(vec![Column::new("id", TypeTag::BigInt)]);
        assert!(InputRefOperator::validate(0, TypeTag::BigInt, &schema).is_ok());
        assert!(matches!(
            InputRefOperator::validate(0, TypeTag::Varchar, &schema),
            Err(ExprError::SchemaMismatch { .. })
        ));
        assert!(matches!(
            InputRefOperator::validate(1, TypeTag::BigInt, &schema),
            Err(ExprError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }
}
