use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};

use crate::engine::decimal::Decimal128;

pub mod kind;
pub mod nullable;

pub use kind::{ScalarKind, Summable, ValueKind};
pub use nullable::{
    DateVal, DecimalVal, Integer, Nullable, NullableValue, Real, StringVal, TimestampVal,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Null,
    Integer,
    Real,
    Decimal,
    String,
    Date,
    Timestamp,
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Null => "Null",
            LogicalType::Integer => "Integer",
            LogicalType::Real => "Real",
            LogicalType::Decimal => "Decimal",
            LogicalType::String => "String",
            LogicalType::Date => "Date",
            LogicalType::Timestamp => "Timestamp",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            LogicalType::Integer | LogicalType::Real | LogicalType::Decimal
        )
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Integer" | "BigInt" => Ok(LogicalType::Integer),
            "Real" | "Double" | "Float" => Ok(LogicalType::Real),
            "Decimal" | "Numeric" => Ok(LogicalType::Decimal),
            "String" | "Varchar" => Ok(LogicalType::String),
            "Date" => Ok(LogicalType::Date),
            "Timestamp" => Ok(LogicalType::Timestamp),
            "Null" => Ok(LogicalType::Null),
            _ => Err(()),
        }
    }
}

/// Dynamically typed SQL value as produced by the scan/expression layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Int64(i64),
    Float64(f64),
    Decimal { value: Decimal128, precision: u8 },
    Utf8(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl ScalarValue {
    pub fn logical_type(&self) -> LogicalType {
        match self {
            ScalarValue::Null => LogicalType::Null,
            ScalarValue::Int64(_) => LogicalType::Integer,
            ScalarValue::Float64(_) => LogicalType::Real,
            ScalarValue::Decimal { .. } => LogicalType::Decimal,
            ScalarValue::Utf8(_) => LogicalType::String,
            ScalarValue::Date(_) => LogicalType::Date,
            ScalarValue::Timestamp(_) => LogicalType::Timestamp,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Float64(f) => Some(*f),
            ScalarValue::Int64(i) => Some(*i as f64),
            ScalarValue::Decimal { value, precision } => Some(value.to_f64(*precision as u32)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<(Decimal128, u8)> {
        match self {
            ScalarValue::Decimal { value, precision } => Some((*value, *precision)),
            _ => None,
        }
    }

    /// Compares two values of the same logical type. NULL sorts first; values
    /// of different types have no order.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (ScalarValue::Null, ScalarValue::Null) => Some(Ordering::Equal),
            (ScalarValue::Null, _) => Some(Ordering::Less),
            (_, ScalarValue::Null) => Some(Ordering::Greater),
            (ScalarValue::Int64(a), ScalarValue::Int64(b)) => Some(a.cmp(b)),
            (ScalarValue::Float64(a), ScalarValue::Float64(b)) => Some(a.total_cmp(b)),
            (
                ScalarValue::Decimal {
                    value: a,
                    precision: pa,
                },
                ScalarValue::Decimal {
                    value: b,
                    precision: pb,
                },
            ) if pa == pb => Some(a.cmp(b)),
            (ScalarValue::Utf8(a), ScalarValue::Utf8(b)) => Some(a.cmp(b)),
            (ScalarValue::Date(a), ScalarValue::Date(b)) => Some(a.cmp(b)),
            (ScalarValue::Timestamp(a), ScalarValue::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float64(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Utf8(value)
    }
}

impl From<NaiveDate> for ScalarValue {
    fn from(value: NaiveDate) -> Self {
        ScalarValue::Date(value)
    }
}

impl From<NaiveDateTime> for ScalarValue {
    fn from(value: NaiveDateTime) -> Self {
        ScalarValue::Timestamp(value)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ScalarValue::Null, Into::into)
    }
}
