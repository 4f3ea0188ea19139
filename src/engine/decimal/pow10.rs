use arrow_buffer::i256;

/// Largest exponent for which 10^exp fits in an i128.
pub const MAX_POW10_I128: u32 = 38;

/// Largest exponent for which 10^exp fits in an i256.
pub const MAX_POW10_I256: u32 = 76;

/// Compute 10^exp in i128, `None` when it does not fit.
pub fn pow10_i128(exp: u32) -> Option<i128> {
    let mut out: i128 = 1;
    for _ in 0..exp {
        out = out.checked_mul(10)?;
    }
    Some(out)
}

/// Compute 10^exp in i256, `None` when it does not fit.
pub fn pow10_i256(exp: u32) -> Option<i256> {
    let mut out = i256::ONE;
    let ten = i256::from_i128(10);
    for _ in 0..exp {
        out = out.checked_mul(ten)?;
    }
    Some(out)
}
