use std::fmt;

use crate::engine::errors::AggregateError;
use crate::engine::types::LogicalType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    /// COUNT of non-null values
    Count,
    /// COUNT of all rows
    CountStar,
    Sum,
    Min,
    Max,
    Avg,
}

impl AggregateFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::CountStar => "COUNT(*)",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
            AggregateFunction::Avg => "AVG",
        }
    }

    /// Whether the function is defined over inputs of `input` type.
    pub fn accepts(&self, input: LogicalType) -> bool {
        match self {
            AggregateFunction::Count | AggregateFunction::CountStar => true,
            AggregateFunction::Sum | AggregateFunction::Avg => input.is_numeric(),
            AggregateFunction::Min | AggregateFunction::Max => input != LogicalType::Null,
        }
    }

    /// Logical type of the finalized value.
    pub fn output_type(&self, input: LogicalType) -> LogicalType {
        match self {
            AggregateFunction::Count | AggregateFunction::CountStar => LogicalType::Integer,
            AggregateFunction::Avg => LogicalType::Real,
            AggregateFunction::Sum | AggregateFunction::Min | AggregateFunction::Max => input,
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes a single aggregate computed by the query
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOpSpec {
    pub function: AggregateFunction,
    pub input_type: LogicalType,
    /// Input column in the row; `None` only for COUNT(*)
    pub column: Option<usize>,
}

impl AggregateOpSpec {
    pub fn new(function: AggregateFunction, input_type: LogicalType, column: usize) -> Self {
        Self {
            function,
            input_type,
            column: Some(column),
        }
    }

    pub fn count_star() -> Self {
        Self {
            function: AggregateFunction::CountStar,
            input_type: LogicalType::Null,
            column: None,
        }
    }

    pub fn validate(&self) -> Result<(), AggregateError> {
        if !self.function.accepts(self.input_type) {
            return Err(AggregateError::Unsupported {
                function: self.function,
                input: self.input_type,
            });
        }
        if self.column.is_none() && self.function != AggregateFunction::CountStar {
            return Err(AggregateError::MissingColumn {
                function: self.function,
            });
        }
        Ok(())
    }

    pub fn output_type(&self) -> LogicalType {
        self.function.output_type(self.input_type)
    }
}

/// Aggregates to compute and the columns to group by
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatePlan {
    pub ops: Vec<AggregateOpSpec>,
    pub group_by: Vec<usize>,
}

impl AggregatePlan {
    /// Builds a plan, rejecting any op whose function is not defined over its input.
    pub fn new(ops: Vec<AggregateOpSpec>, group_by: Vec<usize>) -> Result<Self, AggregateError> {
        for op in &ops {
            op.validate()?;
        }
        Ok(Self { ops, group_by })
    }

    pub fn is_grouped(&self) -> bool {
        !self.group_by.is_empty()
    }
}
