use crate::engine::aggregate::plan::{AggregateFunction, AggregateOpSpec};
use crate::engine::types::LogicalType;
use crate::test_helpers::factories::PlanFactory;
use crate::test_helpers::factory::Factory;

#[test]
fn test_plan_factory() {
    let plan = Factory::plan()
        .with_count_star()
        .with_op(AggregateFunction::Sum, LogicalType::Integer, 1)
        .with_group_by(0)
        .create();

    assert_eq!(
        plan.ops,
        vec![
            AggregateOpSpec::count_star(),
            AggregateOpSpec::new(AggregateFunction::Sum, LogicalType::Integer, 1),
        ]
    );
    assert_eq!(plan.group_by, vec![0]);
    assert!(plan.is_grouped());
}

#[test]
fn test_mixed_plan_covers_every_function() {
    let plan = PlanFactory::mixed().create();
    assert_eq!(plan.ops.len(), 16);
    assert!(!plan.is_grouped());
}
