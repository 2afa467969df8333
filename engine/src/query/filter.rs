// Search and categorical filtering over a dataset or an existing view.
use shared::models::{QuerySpec, Unit};

/// Units passing the search term and every active filter, in their incoming order.
pub fn filter<'a, I>(units: I, spec: &QuerySpec) -> Vec<&'a Unit>
where
    I: IntoIterator<Item = &'a Unit>,
{
    let term = spec.search_term.to_lowercase();
    units
        .into_iter()
        .filter(|unit| matches_search(unit, &term) && matches_filters(unit, spec))
        .collect()
}

/// `term` must already be lower-cased. Codes are matched as written.
pub fn matches_search(unit: &Unit, term: &str) -> bool {
    term.is_empty()
        || unit.name.to_lowercase().contains(term)
        || unit.inep.contains(term)
        || unit.sec.contains(term)
}

pub fn matches_filters(unit: &Unit, spec: &QuerySpec) -> bool {
    spec.filters
        .iter()
        .all(|(dimension, selection)| selection.accepts(unit.dimension_value(*dimension)))
}
