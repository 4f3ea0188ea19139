use crate::engine::aggregate::state::{Advance, AggregateState};
use crate::engine::aggregate::sum::SumAggregate;
use crate::engine::errors::{AggregateError, ArithmeticError};
use crate::engine::types::{Integer, Real};

fn sum_of(values: &[Option<i64>]) -> SumAggregate<i64> {
    let mut sum = SumAggregate::new();
    for v in values {
        sum.advance(&Integer::from(*v)).unwrap();
    }
    sum
}

#[test]
fn sum_skips_nulls() {
    let sum = sum_of(&[Some(5), None, Some(3), None, Some(2)]);
    assert_eq!(sum.result(), Integer::new(10));
}

#[test]
fn sum_of_only_nulls_is_null() {
    let sum = sum_of(&[None, None]);
    assert!(sum.result().is_null());
    assert!(sum.is_empty());
}

#[test]
fn sum_of_zeros_is_zero_not_null() {
    let sum = sum_of(&[Some(0), None]);
    assert_eq!(sum.result(), Integer::new(0));
}

#[test]
fn integer_sum_overflow_is_reported_and_state_kept() {
    let mut sum = sum_of(&[Some(i64::MAX)]);
    let err = sum.advance(&Integer::new(1)).unwrap_err();
    assert_eq!(
        err,
        AggregateError::Arithmetic(ArithmeticError::IntegerOverflow { op: "add" })
    );
    assert_eq!(sum.result(), Integer::new(i64::MAX));
}

#[test]
fn real_sum_follows_ieee() {
    let mut sum = SumAggregate::<f64>::new();
    for v in [Some(1.5), None, Some(-0.25), Some(f64::INFINITY)] {
        sum.advance(&Real::from(v)).unwrap();
    }
    assert_eq!(sum.result(), Real::new(f64::INFINITY));
}

#[test]
fn sum_merge_ignores_empty_partials() {
    let mut a = sum_of(&[Some(4)]);
    let b = sum_of(&[None]);
    a.merge(&b).unwrap();
    assert_eq!(a.result(), Integer::new(4));

    let mut empty = sum_of(&[]);
    empty.merge(&sum_of(&[None])).unwrap();
    assert!(empty.result().is_null());

    empty.merge(&a).unwrap();
    assert_eq!(empty.result(), Integer::new(4));
}

#[test]
fn sum_reset_matches_fresh_state() {
    let mut sum = sum_of(&[Some(7), Some(8)]);
    sum.reset();
    assert_eq!(sum.result(), SumAggregate::<i64>::new().result());
    assert!(sum.is_empty());
}
