pub mod decimal128;
pub mod pow10;

pub use decimal128::{DECIMAL128_MAX_RAW, DECIMAL128_MIN_RAW, Decimal128};
pub use pow10::{pow10_i128, pow10_i256};

#[cfg(test)]
mod decimal128_test;
