pub mod avg;
pub mod count;
pub mod decimal;
pub mod extremum;
pub mod ops;
pub mod parallel;
pub mod partial;
pub mod plan;
pub mod pool;
pub mod state;
pub mod sum;

pub use avg::AvgAggregate;
pub use count::{CountAggregate, CountStarAggregate};
pub use decimal::{DecimalMaxAggregate, DecimalMinAggregate, DecimalSumAggregate};
pub use extremum::{MaxAggregate, MinAggregate};
pub use ops::AggregatorImpl;
pub use parallel::aggregate_partitioned;
pub use partial::{AggPartial, GroupKey};
pub use plan::{AggregateFunction, AggregateOpSpec, AggregatePlan};
pub use pool::StatePool;
pub use state::{Advance, AggregateState};
pub use sum::SumAggregate;

#[cfg(test)]
mod sum_test;
