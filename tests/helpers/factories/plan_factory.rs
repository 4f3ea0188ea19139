use crate::engine::aggregate::plan::{AggregateFunction, AggregateOpSpec, AggregatePlan};
use crate::engine::types::LogicalType;

pub struct PlanFactory {
    ops: Vec<AggregateOpSpec>,
    group_by: Vec<usize>,
}

impl PlanFactory {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            group_by: Vec::new(),
        }
    }

    pub fn with_op(mut self, function: AggregateFunction, input: LogicalType, column: usize) -> Self {
        self.ops.push(AggregateOpSpec::new(function, input, column));
        self
    }

    pub fn with_count_star(mut self) -> Self {
        self.ops.push(AggregateOpSpec::count_star());
        self
    }

    pub fn with_group_by(mut self, column: usize) -> Self {
        self.group_by.push(column);
        self
    }

    /// Every aggregate over the `[group, int, real, decimal(2)]` rows built by
    /// `RowFactory::create_mixed_list`.
    pub fn mixed() -> Self {
        use AggregateFunction::*;
        let mut factory = Self::new().with_count_star();
        for (column, input) in [
            (1, LogicalType::Integer),
            (2, LogicalType::Real),
            (3, LogicalType::Decimal),
        ] {
            for function in [Count, Sum, Min, Max, Avg] {
                factory = factory.with_op(function, input, column);
            }
        }
        factory
    }

    pub fn create(self) -> AggregatePlan {
        AggregatePlan::new(self.ops, self.group_by).unwrap()
    }
}
