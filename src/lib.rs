// ============================================================================
// rowexpr Library
// ============================================================================

//! Typed nullable scalar values and row-oriented expression evaluation.
//!
//! A [`ScalarValue`] pairs a [`TypeTag`] with an optional payload, so a
//! `NULL` keeps its SQL type. An [`Expression`] tree is evaluated against a
//! [`Row`] of such values; `IS NULL` and `IS NOT NULL` observe absence
//! without ever failing on it.
//!
//! # Examples
//!
//! ```
//! use rowexpr::{Expression, Row, ScalarValue, TypeTag};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let row = Row::new(vec![
//!     ScalarValue::bigint(1234),
//!     ScalarValue::null(TypeTag::BigInt),
//! ]);
//!
//! let expr = Expression::is_null(Expression::input_ref(1, TypeTag::BigInt));
//! assert_eq!(expr.evaluate(&row)?, ScalarValue::boolean(true));
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod evaluator;

// Re-export main types for convenience
pub use crate::core::{Column, ExprError, Payload, Result, Row, ScalarValue, Schema, TypeTag};
pub use evaluator::{Evaluator, EvaluatorConfig, Expression};
