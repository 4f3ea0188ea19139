use arrow_buffer::i256;

use crate::engine::decimal::pow10::{pow10_i128, pow10_i256};
use crate::engine::errors::ArithmeticError;

/// Smallest raw value a `Decimal128` can hold. Seeds MAX accumulators.
pub const DECIMAL128_MIN_RAW: i128 = i128::MIN;

/// Largest raw value a `Decimal128` can hold. Seeds MIN accumulators.
pub const DECIMAL128_MAX_RAW: i128 = i128::MAX;

/// Signed 128-bit fixed-point number.
///
/// The stored integer is the decimal value multiplied by `10^scale`. The scale
/// itself is not stored here: it travels alongside the value (see
/// `DecimalVal`) and every binary operation assumes both operands share it.
/// Ordering and equality therefore compare the raw integers directly.
///
/// No operation wraps. Anything that leaves the 128-bit range comes back as
/// `ArithmeticError::Overflow` and leaves the receiver untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal128 {
    raw: i128,
}

impl Decimal128 {
    pub const ZERO: Decimal128 = Decimal128 { raw: 0 };
    pub const MIN: Decimal128 = Decimal128 {
        raw: DECIMAL128_MIN_RAW,
    };
    pub const MAX: Decimal128 = Decimal128 {
        raw: DECIMAL128_MAX_RAW,
    };

    #[inline]
    pub const fn new(raw: i128) -> Self {
        Self { raw }
    }

    /// Builds `units` expressed at `scale` fractional digits, e.g.
    /// `from_integer(3, 2)` is `3.00` (raw 300).
    pub fn from_integer(units: i64, scale: u32) -> Result<Self, ArithmeticError> {
        let factor = pow10_i128(scale).ok_or(ArithmeticError::Overflow { op: "scale" })?;
        (units as i128)
            .checked_mul(factor)
            .map(Self::new)
            .ok_or(ArithmeticError::Overflow { op: "scale" })
    }

    #[inline]
    pub const fn raw(&self) -> i128 {
        self.raw
    }

    /// Replaces the stored integer in place.
    #[inline]
    pub fn set_value(&mut self, raw: i128) {
        self.raw = raw;
    }

    pub fn is_negative(&self) -> bool {
        self.raw < 0
    }

    pub fn checked_add(self, other: Decimal128) -> Result<Decimal128, ArithmeticError> {
        self.raw
            .checked_add(other.raw)
            .map(Self::new)
            .ok_or(ArithmeticError::Overflow { op: "add" })
    }

    pub fn checked_sub(self, other: Decimal128) -> Result<Decimal128, ArithmeticError> {
        self.raw
            .checked_sub(other.raw)
            .map(Self::new)
            .ok_or(ArithmeticError::Overflow { op: "subtract" })
    }

    pub fn add_and_set(&mut self, other: Decimal128) -> Result<(), ArithmeticError> {
        *self = self.checked_add(other)?;
        Ok(())
    }

    /// Multiplies at full 256-bit width, then divides the product by
    /// `10^result_precision` truncating toward zero.
    ///
    /// `result_precision` is the number of fractional digits dropped from the
    /// raw product: the sum of both operand scales minus the wanted scale.
    /// Two operands at scale `s` multiplied with `result_precision = s` give a
    /// result back at scale `s`.
    pub fn checked_mul(
        self,
        other: Decimal128,
        result_precision: u32,
    ) -> Result<Decimal128, ArithmeticError> {
        // |a|,|b| <= 2^127 so the product is bounded by 2^254 and cannot overflow i256.
        let product = i256::from_i128(self.raw).wrapping_mul(i256::from_i128(other.raw));

        let rescaled = match pow10_i256(result_precision) {
            Some(divisor) => product
                .checked_div(divisor)
                .ok_or(ArithmeticError::Overflow { op: "multiply" })?,
            // divisor exceeds 2^255 > |product|
            None => i256::ZERO,
        };

        rescaled
            .to_i128()
            .map(Self::new)
            .ok_or(ArithmeticError::Overflow { op: "multiply" })
    }

    pub fn multiply_and_set(
        &mut self,
        other: Decimal128,
        result_precision: u32,
    ) -> Result<(), ArithmeticError> {
        *self = self.checked_mul(other, result_precision)?;
        Ok(())
    }

    /// Lossy conversion to a float, interpreting the raw value at `scale`.
    pub fn to_f64(&self, scale: u32) -> f64 {
        let divisor = 10f64.powi(scale as i32);
        self.raw as f64 / divisor
    }
}

impl From<i128> for Decimal128 {
    fn from(raw: i128) -> Self {
        Self::new(raw)
    }
}
