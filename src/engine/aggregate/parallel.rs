use rayon::prelude::*;
use tracing::{debug, info};

use crate::engine::aggregate::partial::AggPartial;
use crate::engine::aggregate::plan::AggregatePlan;
use crate::engine::errors::AggregateError;
use crate::engine::types::ScalarValue;
use crate::shared::config::CONFIG;

/// Worker count for `requested` partitions; 0 falls back to config, then rayon.
pub fn effective_partitions(requested: usize) -> usize {
    match requested {
        0 => match CONFIG.aggregate.partitions {
            0 => rayon::current_num_threads().max(1),
            n => n,
        },
        n => n,
    }
}

/// Builds one partial per chunk of `rows` on the rayon pool and merges them.
///
/// The result does not depend on `partitions`: any split merges back into the
/// single-pass table.
pub fn aggregate_partitioned(
    plan: &AggregatePlan,
    rows: &[Vec<ScalarValue>],
    partitions: usize,
) -> Result<AggPartial, AggregateError> {
    let partitions = effective_partitions(partitions);
    let chunk_size = rows.len().div_ceil(partitions).max(1);
    info!(
        target: "decimal_agg::parallel",
        rows = rows.len(),
        partitions,
        chunk_size,
        "Aggregating partitioned input"
    );

    let merged = rows
        .par_chunks(chunk_size)
        .map(|chunk| {
            let mut partial = AggPartial::new(plan);
            for row in chunk {
                partial.update_row(row)?;
            }
            debug!(
                target: "decimal_agg::parallel",
                rows = chunk.len(),
                groups = partial.group_count(),
                "Partition aggregated"
            );
            Ok::<_, AggregateError>(partial)
        })
        .try_reduce(
            || AggPartial::new(plan),
            |mut left, right| {
                left.merge(right)?;
                Ok(left)
            },
        );

    match merged {
        Ok(partial) => {
            info!(
                target: "decimal_agg::parallel",
                groups = partial.group_count(),
                "Partitioned aggregation finished"
            );
            Ok(partial)
        }
        Err(e) => {
            e.log_error();
            Err(e)
        }
    }
}
