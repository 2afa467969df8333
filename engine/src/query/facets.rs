// Choices offered by the filter controls.
use super::sort::leading_int;
use shared::models::{FilterDimension, Unit};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Distinct non-empty values of `dimension`, ordered by `comparator`.
pub fn distinct_values<'a, I, C>(units: I, dimension: FilterDimension, mut comparator: C) -> Vec<String>
where
    I: IntoIterator<Item = &'a Unit>,
    C: FnMut(&str, &str) -> Ordering,
{
    let unique: BTreeSet<&str> = units
        .into_iter()
        .map(|unit| unit.dimension_value(dimension))
        .filter(|value| !value.is_empty())
        .collect();
    let mut values: Vec<String> = unique.into_iter().map(str::to_string).collect();
    values.sort_by(|a, b| comparator(a, b));
    values
}

/// Region codes: "2" before "10".
pub fn numeric_order(a: &str, b: &str) -> Ordering {
    leading_int(a).cmp(&leading_int(b))
}

/// Byte-wise order, case and accents significant ("Z" before "a").
pub fn lexicographic_order(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}
