use crate::engine::errors::AggregateError;

/// Per-group aggregate state.
///
/// A state is owned by exactly one group for its whole life and is never
/// duplicated, hence no `Clone`. It moves between threads only as a whole, so
/// partial states built by different workers can be merged afterwards.
///
/// `merge` must be associative and commutative: merging partials built over
/// any split of the input gives the same `result` as one pass over all of it.
pub trait AggregateState: Default + Send {
    type Output;

    fn merge(&mut self, other: &Self) -> Result<(), AggregateError>;

    /// Fails exactly when `merge(other)` would, without touching `self`.
    fn check_merge(&self, _other: &Self) -> Result<(), AggregateError> {
        Ok(())
    }

    /// Back to the zero-row state, reusing the allocation.
    fn reset(&mut self);

    fn result(&self) -> Self::Output;

    /// True until a non-null input (or a non-empty partial) has been absorbed.
    fn is_empty(&self) -> bool;
}

/// Feeding one input row into a state.
pub trait Advance<V: ?Sized>: AggregateState {
    fn advance(&mut self, value: &V) -> Result<(), AggregateError>;

    /// Fails exactly when `advance(value)` would, without touching `self`.
    fn check_advance(&self, _value: &V) -> Result<(), AggregateError> {
        Ok(())
    }
}
