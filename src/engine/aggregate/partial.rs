use std::collections::HashMap;

use ahash::RandomState as AHashRandomState;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::engine::aggregate::ops::AggregatorImpl;
use crate::engine::aggregate::plan::{AggregateOpSpec, AggregatePlan};
use crate::engine::aggregate::pool::StatePool;
use crate::engine::decimal::Decimal128;
use crate::engine::errors::AggregateError;
use crate::engine::types::ScalarValue;

/// Hashable form of one group-by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Null,
    Int(i64),
    /// Bits of the float after folding -0.0 into 0.0 and every NaN into one.
    Real(u64),
    Decimal { raw: i128, precision: u8 },
    Str(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

fn normalized_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

impl KeyPart {
    pub fn from_scalar(value: &ScalarValue) -> Self {
        match value {
            ScalarValue::Null => KeyPart::Null,
            ScalarValue::Int64(v) => KeyPart::Int(*v),
            ScalarValue::Float64(v) => KeyPart::Real(normalized_bits(*v)),
            ScalarValue::Decimal { value, precision } => KeyPart::Decimal {
                raw: value.raw(),
                precision: *precision,
            },
            ScalarValue::Utf8(s) => KeyPart::Str(s.clone()),
            ScalarValue::Date(d) => KeyPart::Date(*d),
            ScalarValue::Timestamp(ts) => KeyPart::Timestamp(*ts),
        }
    }

    pub fn to_scalar(&self) -> ScalarValue {
        match self {
            KeyPart::Null => ScalarValue::Null,
            KeyPart::Int(v) => ScalarValue::Int64(*v),
            KeyPart::Real(bits) => ScalarValue::Float64(f64::from_bits(*bits)),
            KeyPart::Decimal { raw, precision } => ScalarValue::Decimal {
                value: Decimal128::new(*raw),
                precision: *precision,
            },
            KeyPart::Str(s) => ScalarValue::Utf8(s.clone()),
            KeyPart::Date(d) => ScalarValue::Date(*d),
            KeyPart::Timestamp(ts) => ScalarValue::Timestamp(*ts),
        }
    }
}

/// Group-by values of one row. Empty for a global aggregate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub parts: Vec<KeyPart>,
}

impl GroupKey {
    pub fn from_row(row: &[ScalarValue], columns: &[usize]) -> Result<Self, AggregateError> {
        let parts = columns
            .iter()
            .map(|&column| column_value(row, column).map(KeyPart::from_scalar))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { parts })
    }

    pub fn to_scalars(&self) -> Vec<ScalarValue> {
        self.parts.iter().map(KeyPart::to_scalar).collect()
    }
}

/// Input of ops without a column (COUNT(*)).
static NO_INPUT: ScalarValue = ScalarValue::Null;

fn apply_row(states: &mut [AggregatorImpl], inputs: &[&ScalarValue]) -> Result<(), AggregateError> {
    for (state, input) in states.iter_mut().zip(inputs) {
        state.update(input)?;
    }
    Ok(())
}

#[inline]
fn column_value(row: &[ScalarValue], column: usize) -> Result<&ScalarValue, AggregateError> {
    row.get(column).ok_or(AggregateError::ColumnOutOfRange {
        column,
        width: row.len(),
    })
}

/// Group table built over one partition of the input.
///
/// Two partials built from the same plan merge into the partial of the
/// combined input, whatever way the rows were split.
#[derive(Debug)]
pub struct AggPartial {
    specs: Vec<AggregateOpSpec>,
    group_by: Vec<usize>,
    groups: HashMap<GroupKey, Vec<AggregatorImpl>, AHashRandomState>, // states align with specs
    pool: StatePool,
}

impl AggPartial {
    pub fn new(plan: &AggregatePlan) -> Self {
        Self::with_pool(plan, StatePool::new(plan.ops.clone()))
    }

    pub fn with_pool(plan: &AggregatePlan, pool: StatePool) -> Self {
        debug!(
            target: "decimal_agg::partial",
            ops = plan.ops.len(),
            group_by = ?plan.group_by,
            "Creating partial aggregate table"
        );
        Self {
            specs: plan.ops.clone(),
            group_by: plan.group_by.clone(),
            groups: HashMap::with_hasher(AHashRandomState::new()),
            pool,
        }
    }

    pub fn specs(&self) -> &[AggregateOpSpec] {
        &self.specs
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn pool(&self) -> &StatePool {
        &self.pool
    }

    pub fn get(&self, key: &GroupKey) -> Option<&[AggregatorImpl]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Feeds one row to the states of its group.
    ///
    /// A row either lands in every state or in none: inputs are resolved and
    /// checked before anything is advanced, and a group created for a rejected
    /// row goes back to the pool.
    pub fn update_row(&mut self, row: &[ScalarValue]) -> Result<(), AggregateError> {
        let key = GroupKey::from_row(row, &self.group_by)?;
        let inputs = self
            .specs
            .iter()
            .map(|spec| match spec.column {
                Some(column) => column_value(row, column),
                None => Ok(&NO_INPUT),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(states) = self.groups.get_mut(&key) {
            for (state, input) in states.iter().zip(&inputs) {
                state.check_update(input)?;
            }
            return apply_row(states, &inputs);
        }

        let mut states = self.pool.acquire()?;
        if let Err(e) = apply_row(&mut states, &inputs) {
            self.pool.release(states);
            return Err(e);
        }
        self.groups.insert(key, states);
        Ok(())
    }

    /// Absorbs `other`: groups missing here are moved over, shared ones merged.
    ///
    /// Every shared group is checked first, so a failing merge leaves `self`
    /// as it was.
    pub fn merge(&mut self, other: AggPartial) -> Result<(), AggregateError> {
        if other.specs != self.specs || other.group_by != self.group_by {
            return Err(AggregateError::KindMismatch {
                left: "partial".into(),
                right: "partial with a different plan".into(),
            });
        }
        debug!(
            target: "decimal_agg::partial",
            left = self.groups.len(),
            right = other.groups.len(),
            "Merging partial aggregate tables"
        );
        for (key, incoming) in &other.groups {
            if let Some(states) = self.groups.get(key) {
                for (state, partial) in states.iter().zip(incoming) {
                    state.check_merge(partial)?;
                }
            }
        }
        for (key, incoming) in other.groups {
            match self.groups.get_mut(&key) {
                Some(states) => {
                    for (state, partial) in states.iter_mut().zip(incoming.iter()) {
                        state.merge(partial)?;
                    }
                    self.pool.release(incoming);
                }
                None => {
                    self.groups.insert(key, incoming);
                }
            }
        }
        Ok(())
    }

    /// Drops every group, returning their states to the pool.
    pub fn clear(&mut self) {
        let released = self.groups.len();
        for (_, states) in self.groups.drain() {
            self.pool.release(states);
        }
        debug!(
            target: "decimal_agg::partial",
            released,
            pooled = self.pool.available(),
            "Cleared partial aggregate table"
        );
    }

    /// One `(group values, aggregate results)` row per group.
    ///
    /// A global aggregate that saw no rows still yields a single row of
    /// empty-group results.
    pub fn finalize(&self) -> Result<Vec<(Vec<ScalarValue>, Vec<ScalarValue>)>, AggregateError> {
        if self.groups.is_empty() && self.group_by.is_empty() {
            let empty = self
                .specs
                .iter()
                .map(|spec| AggregatorImpl::from_spec(spec).map(|a| a.finalize()))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(vec![(Vec::new(), empty)]);
        }
        Ok(self
            .groups
            .iter()
            .map(|(key, states)| {
                (
                    key.to_scalars(),
                    states.iter().map(AggregatorImpl::finalize).collect(),
                )
            })
            .collect())
    }
}
