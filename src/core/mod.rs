pub mod error;
pub mod row;
pub mod types;
pub mod value;

pub use error::{ExprError, Result};
pub use row::Row;
pub use types::{Column, Schema, TypeTag};
pub use value::{Payload, ScalarValue};
