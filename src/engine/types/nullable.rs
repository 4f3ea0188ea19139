use chrono::{NaiveDate, NaiveDateTime};

use crate::engine::decimal::Decimal128;
use crate::engine::errors::AggregateError;
use crate::engine::types::{LogicalType, ScalarKind, ScalarValue};

/// Anything an aggregate can test for SQL NULL.
pub trait Nullable {
    fn is_null(&self) -> bool;
}

/// A typed SQL value that may be NULL.
///
/// A NULL carries no payload at all, so nothing can read one by accident.
#[derive(Debug, Clone, PartialEq)]
pub struct NullableValue<T> {
    payload: Option<T>,
}

pub type Integer = NullableValue<i64>;
pub type Real = NullableValue<f64>;
pub type StringVal = NullableValue<String>;
pub type DateVal = NullableValue<NaiveDate>;
pub type TimestampVal = NullableValue<NaiveDateTime>;

impl<T> NullableValue<T> {
    pub fn new(value: T) -> Self {
        Self {
            payload: Some(value),
        }
    }

    pub fn null() -> Self {
        Self { payload: None }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.payload.is_none()
    }

    #[inline]
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

impl<T> Default for NullableValue<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<Option<T>> for NullableValue<T> {
    fn from(payload: Option<T>) -> Self {
        Self { payload }
    }
}

impl Nullable for ScalarValue {
    fn is_null(&self) -> bool {
        ScalarValue::is_null(self)
    }
}

impl<T> Nullable for NullableValue<T> {
    fn is_null(&self) -> bool {
        NullableValue::is_null(self)
    }
}

impl<T: ScalarKind> NullableValue<T> {
    /// Reads a dynamically typed value. NULL of any type maps to a typed NULL.
    pub fn from_scalar(value: &ScalarValue) -> Result<Self, AggregateError> {
        if value.is_null() {
            return Ok(Self::null());
        }
        T::from_scalar(value)
            .map(Self::new)
            .ok_or(AggregateError::TypeMismatch {
                expected: T::LOGICAL_TYPE,
                found: value.logical_type(),
            })
    }

    pub fn into_scalar(self) -> ScalarValue {
        self.payload
            .map_or(ScalarValue::Null, ScalarKind::into_scalar)
    }
}

/// Nullable `Decimal128` together with the scale it is expressed at.
///
/// The precision travels with the value even when it is NULL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecimalVal {
    value: Option<Decimal128>,
    precision: u8,
}

impl DecimalVal {
    pub fn new(value: Decimal128, precision: u8) -> Self {
        Self {
            value: Some(value),
            precision,
        }
    }

    pub fn null(precision: u8) -> Self {
        Self {
            value: None,
            precision,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    #[inline]
    pub fn payload(&self) -> Option<&Decimal128> {
        self.value.as_ref()
    }

    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn from_scalar(value: &ScalarValue) -> Result<Self, AggregateError> {
        match value {
            ScalarValue::Null => Ok(Self::null(0)),
            ScalarValue::Decimal { value, precision } => Ok(Self::new(*value, *precision)),
            other => Err(AggregateError::TypeMismatch {
                expected: LogicalType::Decimal,
                found: other.logical_type(),
            }),
        }
    }

    pub fn into_scalar(self) -> ScalarValue {
        match self.value {
            Some(value) => ScalarValue::Decimal {
                value,
                precision: self.precision,
            },
            None => ScalarValue::Null,
        }
    }
}

impl Nullable for DecimalVal {
    fn is_null(&self) -> bool {
        DecimalVal::is_null(self)
    }
}
