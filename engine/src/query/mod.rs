// Query engine: filter -> sort -> aggregate over a dataset, driven by a `QuerySpec`.
//
// Every function here is pure; the caller owns the `QuerySpec` and re-runs the whole
// batch whenever any part of it changes.
pub mod aggregate;
pub mod facets;
pub mod filter;
pub mod sort;

use crate::data::Dataset;
use serde::Serialize;
use shared::models::{QuerySpec, Summary, Unit};
use std::time::Instant;

pub use aggregate::{aggregate, units_with_project};
pub use facets::{distinct_values, lexicographic_order, numeric_order};
pub use filter::filter;
pub use sort::sort;

/// Rows to render plus the dashboard figures for them.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult<'a> {
    pub units: Vec<&'a Unit>,
    pub summary: Summary,
}

impl QueryResult<'_> {
    pub fn count(&self) -> usize {
        self.units.len()
    }
}

pub fn run<'a>(dataset: &'a Dataset, spec: &QuerySpec) -> QueryResult<'a> {
    let started = Instant::now();

    let mut units = filter(dataset.units(), spec);
    if let Some(key) = spec.sort_key {
        sort(&mut units, key, spec.sort_direction);
    }
    let summary = aggregate(units.iter().copied());

    tracing::debug!(
        load_id = %dataset.load_id(),
        matched = units.len(),
        total = dataset.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "Query evaluated"
    );

    QueryResult { units, summary }
}
