use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::engine::aggregate::state::{Advance, AggregateState};
use crate::engine::errors::AggregateError;
use crate::engine::types::{NullableValue, ValueKind};

/// Which end of the order an extremum aggregate keeps.
pub trait ExtremumSide: fmt::Debug + Send + 'static {
    const NAME: &'static str;

    fn seed<T: ValueKind>() -> T;

    /// Whether `candidate` displaces the current extremum, given
    /// `candidate.cmp(current)`.
    fn replaces(ordering: Ordering) -> bool;
}

#[derive(Debug)]
pub struct MinSide;

#[derive(Debug)]
pub struct MaxSide;

impl ExtremumSide for MinSide {
    const NAME: &'static str = "MIN";

    fn seed<T: ValueKind>() -> T {
        T::upper_bound()
    }

    fn replaces(ordering: Ordering) -> bool {
        ordering == Ordering::Less
    }
}

impl ExtremumSide for MaxSide {
    const NAME: &'static str = "MAX";

    fn seed<T: ValueKind>() -> T {
        T::lower_bound()
    }

    fn replaces(ordering: Ordering) -> bool {
        ordering == Ordering::Greater
    }
}

/// MIN or MAX over any ordered payload.
///
/// The extremum starts at the side's seed (the opposite bound of `T`), but the
/// first non-null input always replaces it, so the seed is never reported.
#[derive(Debug)]
pub struct ExtremumAggregate<T: ValueKind, S: ExtremumSide> {
    extremum: T,
    has_value: bool,
    _side: PhantomData<S>,
}

pub type MinAggregate<T> = ExtremumAggregate<T, MinSide>;
pub type MaxAggregate<T> = ExtremumAggregate<T, MaxSide>;

impl<T: ValueKind, S: ExtremumSide> ExtremumAggregate<T, S> {
    pub fn new() -> Self {
        Self {
            extremum: S::seed(),
            has_value: false,
            _side: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn offer(&mut self, candidate: &T) {
        if !self.has_value || S::replaces(candidate.sql_cmp(&self.extremum)) {
            self.extremum = candidate.clone();
        }
        self.has_value = true;
    }

    pub(crate) fn extremum(&self) -> Option<&T> {
        self.has_value.then_some(&self.extremum)
    }
}

impl<T: ValueKind, S: ExtremumSide> Default for ExtremumAggregate<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ValueKind, S: ExtremumSide> AggregateState for ExtremumAggregate<T, S> {
    type Output = NullableValue<T>;

    fn merge(&mut self, other: &Self) -> Result<(), AggregateError> {
        if let Some(partial) = other.extremum() {
            self.offer(partial);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.extremum = S::seed();
        self.has_value = false;
    }

    fn result(&self) -> NullableValue<T> {
        self.extremum().cloned().into()
    }

    fn is_empty(&self) -> bool {
        !self.has_value
    }
}

impl<T: ValueKind, S: ExtremumSide> Advance<NullableValue<T>> for ExtremumAggregate<T, S> {
    fn advance(&mut self, value: &NullableValue<T>) -> Result<(), AggregateError> {
        if let Some(v) = value.payload() {
            self.offer(v);
        }
        Ok(())
    }
}
