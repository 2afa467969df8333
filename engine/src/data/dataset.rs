// Holds the units of one successful report load.
use chrono::{DateTime, Utc};
use shared::models::Unit;
use uuid::Uuid;

/// Immutable result of one load. A refresh builds a new `Dataset` and swaps it in whole.
#[derive(Debug, Clone)]
pub struct Dataset {
    load_id: Uuid,
    loaded_at: DateTime<Utc>,
    source: String,
    units: Vec<Unit>,
}

impl Dataset {
    pub fn new(source: impl Into<String>, units: Vec<Unit>) -> Self {
        Dataset {
            load_id: Uuid::new_v4(),
            loaded_at: Utc::now(),
            source: source.into(),
            units,
        }
    }

    /// The dataset held before the first successful load.
    pub fn empty() -> Self {
        Self::new("", Vec::new())
    }

    pub fn load_id(&self) -> Uuid {
        self.load_id
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Detail lookup by `sequence_index`; `None` when out of range.
    pub fn get(&self, sequence_index: usize) -> Option<&Unit> {
        self.units.get(sequence_index)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(sequence_index: usize, name: &str) -> Unit {
        Unit { sequence_index, name: name.to_string(), ..Default::default() }
    }

    #[test]
    fn test_get_by_sequence_index() {
        let dataset = Dataset::new("report.csv", vec![unit(0, "A"), unit(1, "B")]);
        assert_eq!(dataset.get(1).map(|u| u.name.as_str()), Some("B"));
        assert!(dataset.get(2).is_none());
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.source(), "report.csv");
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert!(dataset.get(0).is_none());
    }

    #[test]
    fn test_each_load_gets_its_own_id() {
        let a = Dataset::new("x", Vec::new());
        let b = Dataset::new("x", Vec::new());
        assert_ne!(a.load_id(), b.load_id());
        assert!(b.loaded_at() >= a.loaded_at());
    }
}
