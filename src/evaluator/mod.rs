pub mod config;
pub mod expression;
pub mod input_ref;
pub mod is_null;

pub use config::EvaluatorConfig;
pub use expression::Expression;

use crate::core::{ExprError, Result, Row, ScalarValue, Schema, TypeTag};

use log::{debug, trace, warn};

/// An expression checked against a schema once, then evaluated per row.
///
/// Holds no mutable state, so one evaluator may serve many threads.
#[derive(Debug, Clone)]
pub struct Evaluator {
    expression: Expression,
    schema: Schema,
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(expression: Expression, schema: Schema, config: EvaluatorConfig) -> Result<Self> {
        if expression.depth_up_to(config.max_depth) > config.max_depth {
            warn!(
                "Rejected expression: depth exceeds limit {}",
                config.max_depth
            );
            return Err(ExprError::InvalidExpression(format!(
                "Expression depth exceeds limit {}",
                config.max_depth
            )));
        }

        if let Err(e) = expression.validate(&schema) {
            warn!("Rejected expression {}: {}", expression, e);
            return Err(e);
        }

        debug!(
            "Prepared evaluator for {} over {} column(s), output {}",
            expression,
            schema.column_count(),
            expression.output_type()
        );

        Ok(Self {
            expression,
            schema,
            config,
        })
    }

    /// Prepare with [`EvaluatorConfig::default`].
    pub fn with_defaults(expression: Expression, schema: Schema) -> Result<Self> {
        Self::new(expression, schema, EvaluatorConfig::default())
    }

    pub fn evaluate(&self, row: &Row) -> Result<ScalarValue> {
        let result = self.expression.evaluate_with(row, &self.config);
        trace!("{} => {:?}", self.expression, result);
        result
    }

    /// Evaluate each row in order, stopping at the first failure.
    pub fn evaluate_all<'a, I>(&self, rows: I) -> Result<Vec<ScalarValue>>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        rows.into_iter().map(|row| self.evaluate(row)).collect()
    }

    pub fn output_type(&self) -> TypeTag {
        self.expression.output_type()
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }
}
