use crate::engine::decimal::Decimal128;
use crate::engine::types::ScalarValue;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct RowFactory {
    values: Vec<ScalarValue>,
}

impl RowFactory {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn with(mut self, value: impl Into<ScalarValue>) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn with_null(mut self) -> Self {
        self.values.push(ScalarValue::Null);
        self
    }

    pub fn with_decimal(mut self, raw: i128, precision: u8) -> Self {
        self.values.push(ScalarValue::Decimal {
            value: Decimal128::new(raw),
            precision,
        });
        self
    }

    pub fn create(self) -> Vec<ScalarValue> {
        self.values
    }

    /// `count` rows of `[group, int, real, decimal(2)]`, roughly one value in
    /// five NULL. Same seed, same rows.
    pub fn create_mixed_list(count: usize, groups: i64, seed: u64) -> Vec<Vec<ScalarValue>> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                let group = ScalarValue::Int64(rng.gen_range(0..groups.max(1)));
                let int = if rng.gen_range(0..5) == 0 {
                    ScalarValue::Null
                } else {
                    ScalarValue::Int64(rng.gen_range(-1_000..1_000))
                };
                let real = if rng.gen_range(0..5) == 0 {
                    ScalarValue::Null
                } else {
                    // Quarter steps keep f64 sums exact in any order.
                    ScalarValue::Float64(rng.gen_range(-400..400) as f64 * 0.25)
                };
                let decimal = if rng.gen_range(0..5) == 0 {
                    ScalarValue::Null
                } else {
                    // Multiples of 0.25 too, so AVG over them is order independent.
                    ScalarValue::Decimal {
                        value: Decimal128::new(rng.gen_range(-40_000i128..40_000) * 25),
                        precision: 2,
                    }
                };
                vec![group, int, real, decimal]
            })
            .collect()
    }
}
