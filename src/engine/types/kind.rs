use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::engine::decimal::Decimal128;
use crate::engine::errors::ArithmeticError;
use crate::engine::types::{LogicalType, ScalarValue};

/// Payload types the generic MIN/MAX states can run over.
///
/// `lower_bound` seeds MAX and `upper_bound` seeds MIN. The seed is only a
/// placeholder for an empty state: the first non-null input always replaces
/// it, so types without a greatest value (strings) can return any value.
pub trait ValueKind: Clone + fmt::Debug + Send + 'static {
    fn lower_bound() -> Self;
    fn upper_bound() -> Self;
    fn sql_cmp(&self, other: &Self) -> Ordering;
}

/// Payload types the generic SUM state can run over.
pub trait Summable: ValueKind {
    fn zero() -> Self;
    fn checked_sum(&self, other: &Self) -> Result<Self, ArithmeticError>;
}

/// Payload types that map one-to-one onto a `ScalarValue` variant.
pub trait ScalarKind: Sized {
    const LOGICAL_TYPE: LogicalType;

    fn from_scalar(value: &ScalarValue) -> Option<Self>;
    fn into_scalar(self) -> ScalarValue;
}

impl ValueKind for i64 {
    fn lower_bound() -> Self {
        i64::MIN
    }

    fn upper_bound() -> Self {
        i64::MAX
    }

    fn sql_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Summable for i64 {
    fn zero() -> Self {
        0
    }

    fn checked_sum(&self, other: &Self) -> Result<Self, ArithmeticError> {
        self.checked_add(*other)
            .ok_or(ArithmeticError::IntegerOverflow { op: "add" })
    }
}

impl ValueKind for f64 {
    fn lower_bound() -> Self {
        f64::NEG_INFINITY
    }

    fn upper_bound() -> Self {
        f64::INFINITY
    }

    fn sql_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Summable for f64 {
    fn zero() -> Self {
        0.0
    }

    // IEEE-754 semantics: overflow saturates to infinity.
    fn checked_sum(&self, other: &Self) -> Result<Self, ArithmeticError> {
        Ok(self + other)
    }
}

impl ValueKind for Decimal128 {
    fn lower_bound() -> Self {
        Decimal128::MIN
    }

    fn upper_bound() -> Self {
        Decimal128::MAX
    }

    fn sql_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Summable for Decimal128 {
    fn zero() -> Self {
        Decimal128::ZERO
    }

    fn checked_sum(&self, other: &Self) -> Result<Self, ArithmeticError> {
        self.checked_add(*other)
    }
}

impl ValueKind for String {
    fn lower_bound() -> Self {
        String::new()
    }

    // No greatest string exists.
    fn upper_bound() -> Self {
        String::new()
    }

    fn sql_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl ValueKind for NaiveDate {
    fn lower_bound() -> Self {
        NaiveDate::MIN
    }

    fn upper_bound() -> Self {
        NaiveDate::MAX
    }

    fn sql_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl ValueKind for NaiveDateTime {
    fn lower_bound() -> Self {
        NaiveDateTime::MIN
    }

    fn upper_bound() -> Self {
        NaiveDateTime::MAX
    }

    fn sql_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl ScalarKind for i64 {
    const LOGICAL_TYPE: LogicalType = LogicalType::Integer;

    fn from_scalar(value: &ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Int64(i) => Some(*i),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Int64(self)
    }
}

impl ScalarKind for f64 {
    const LOGICAL_TYPE: LogicalType = LogicalType::Real;

    fn from_scalar(value: &ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Float64(f) => Some(*f),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Float64(self)
    }
}

impl ScalarKind for String {
    const LOGICAL_TYPE: LogicalType = LogicalType::String;

    fn from_scalar(value: &ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Utf8(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Utf8(self)
    }
}

impl ScalarKind for NaiveDate {
    const LOGICAL_TYPE: LogicalType = LogicalType::Date;

    fn from_scalar(value: &ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Date(self)
    }
}

impl ScalarKind for NaiveDateTime {
    const LOGICAL_TYPE: LogicalType = LogicalType::Timestamp;

    fn from_scalar(value: &ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Timestamp(self)
    }
}
