use serde::{Deserialize, Serialize};

use super::{ExprError, Result, ScalarValue, Schema};

/// One record, addressed by position. Its length never changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    values: Vec<ScalarValue>,
}

impl Row {
    pub fn new(values: Vec<ScalarValue>) -> Self {
        Self { values }
    }

    pub fn at(&self, index: usize) -> Result<&ScalarValue> {
        self.values.get(index).ok_or(ExprError::IndexOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScalarValue> {
        self.values.iter()
    }

    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }

    /// Check the row against `schema`: arity, per-field type tags and
    /// NOT NULL columns.
    pub fn conforms_to(&self, schema: &Schema) -> Result<()> {
        if self.len() != schema.column_count() {
            return Err(ExprError::ConstraintViolation(format!(
                "Row has {} fields, schema expects {}",
                self.len(),
                schema.column_count()
            )));
        }

        for (index, (value, column)) in self.values.iter().zip(schema.columns()).enumerate() {
            if value.type_tag() != column.type_tag {
                return Err(ExprError::SchemaMismatch {
                    index,
                    declared: column.type_tag,
                    actual: value.type_tag(),
                });
            }
            if value.is_null() && !column.nullable {
                return Err(ExprError::ConstraintViolation(format!(
                    "Column '{}' cannot be NULL",
                    column.name
                )));
            }
        }

        Ok(())
    }
}

impl From<Vec<ScalarValue>> for Row {
    fn from(values: Vec<ScalarValue>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<ScalarValue> for Row {
    fn from_iter<I: IntoIterator<Item = ScalarValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
