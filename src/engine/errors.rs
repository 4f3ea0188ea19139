use thiserror::Error;
use tracing::{debug, error, warn};

use crate::engine::aggregate::plan::AggregateFunction;
use crate::engine::types::LogicalType;

/// Failures of fixed-point arithmetic. Raised eagerly at the operation site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("numeric value out of range: decimal {op} overflowed 128 bits")]
    Overflow { op: &'static str },

    #[error("numeric value out of range: integer {op} overflowed 64 bits")]
    IntegerOverflow { op: &'static str },
}

/// Errors that can occur while advancing, merging or building aggregates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    #[error("{0}")]
    Arithmetic(#[from] ArithmeticError),

    #[error("decimal scale mismatch: aggregate holds scale {expected}, input has scale {found}")]
    ScaleMismatch { expected: u8, found: u8 },

    #[error("type mismatch: expected {expected} input, got {found}")]
    TypeMismatch {
        expected: LogicalType,
        found: LogicalType,
    },

    #[error("{function} is not defined over {input} values")]
    Unsupported {
        function: AggregateFunction,
        input: LogicalType,
    },

    #[error("{function} needs an input column")]
    MissingColumn { function: AggregateFunction },

    #[error("cannot merge {left} state into {right} state")]
    KindMismatch { left: String, right: String },

    #[error("column {column} out of range for row of width {width}")]
    ColumnOutOfRange { column: usize, width: usize },
}

impl AggregateError {
    /// True for conditions a well-formed plan can still hit at run time.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            AggregateError::Arithmetic(_) | AggregateError::ScaleMismatch { .. }
        )
    }

    pub fn log_error(&self) {
        match self {
            AggregateError::Arithmetic(e) => {
                warn!("Aggregate arithmetic failed: {}", e);
                debug!("Arithmetic error details: {:?}", e);
            }
            AggregateError::ScaleMismatch { expected, found } => {
                warn!("Decimal scale mismatch: {} vs {}", expected, found);
                debug!("Scale mismatch error details: {:?}", self);
            }
            AggregateError::TypeMismatch { expected, found } => {
                error!("Aggregate input type mismatch: {} vs {}", expected, found);
                debug!("Type mismatch error details: {:?}", self);
            }
            AggregateError::Unsupported { function, input } => {
                error!("Unsupported aggregate: {}({})", function, input);
                debug!("Unsupported aggregate error details: {:?}", self);
            }
            AggregateError::MissingColumn { function } => {
                error!("Aggregate {} has no input column", function);
                debug!("Missing column error details: {:?}", self);
            }
            AggregateError::KindMismatch { left, right } => {
                error!("Aggregate kind mismatch on merge: {} into {}", left, right);
                debug!("Kind mismatch error details: {:?}", self);
            }
            AggregateError::ColumnOutOfRange { column, width } => {
                error!("Column {} out of range (width {})", column, width);
                debug!("Column range error details: {:?}", self);
            }
        }
    }
}
