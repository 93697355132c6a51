//! Aircraft capacity lookup.

use crate::domain::{Aircraft, SeatClass};

/// Seat capacity per aircraft model, built once per search from the
/// aircraft catalog.
///
/// The catalog is sorted by model on construction and never mutated
/// afterwards, so lookups are a binary search. Duplicate models keep the
/// first entry the catalog listed.
#[derive(Debug, Clone, Default)]
pub struct AircraftCapacityTable {
    aircraft: Vec<Aircraft>,
}

impl AircraftCapacityTable {
    pub fn new(mut catalog: Vec<Aircraft>) -> Self {
        // Stable sort so the first of any duplicates survives dedup.
        catalog.sort_by(|a, b| a.model.cmp(&b.model));
        catalog.dedup_by(|later, earlier| later.model == earlier.model);
        Self { aircraft: catalog }
    }

    /// Look up an aircraft model.
    pub fn get(&self, model: &str) -> Option<&Aircraft> {
        self.aircraft
            .binary_search_by(|a| a.model.as_str().cmp(model))
            .ok()
            .map(|idx| &self.aircraft[idx])
    }

    /// Capacity of `model` in `class`, or `None` if the model is unknown.
    pub fn capacity_for(&self, model: &str, class: SeatClass) -> Option<u32> {
        self.get(model).map(|a| a.capacity(class))
    }

    /// Number of distinct models.
    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AircraftCapacityTable {
        AircraftCapacityTable::new(vec![
            Aircraft::new("Boeing", "767", 200, 30),
            Aircraft::new("Airbus", "A320", 150, 12),
            Aircraft::new("Boeing", "737", 140, 10),
            Aircraft::new("Embraer", "E190", 96, 0),
        ])
    }

    #[test]
    fn lookup_known_models() {
        let table = table();
        assert_eq!(table.len(), 4);
        assert_eq!(table.capacity_for("737", SeatClass::Coach), Some(140));
        assert_eq!(table.capacity_for("737", SeatClass::FirstClass), Some(10));
        assert_eq!(table.capacity_for("A320", SeatClass::Coach), Some(150));
        assert_eq!(table.capacity_for("E190", SeatClass::FirstClass), Some(0));
        assert_eq!(table.get("767").unwrap().manufacturer, "Boeing");
    }

    #[test]
    fn unknown_model_is_none() {
        let table = table();
        assert_eq!(table.capacity_for("747", SeatClass::Coach), None);
        assert_eq!(table.capacity_for("", SeatClass::Coach), None);
        // Lookup is exact, not case-folded
        assert_eq!(table.capacity_for("a320", SeatClass::Coach), None);
    }

    #[test]
    fn duplicates_keep_first_listed() {
        let table = AircraftCapacityTable::new(vec![
            Aircraft::new("Boeing", "737", 140, 10),
            Aircraft::new("Boeing", "737", 999, 99),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.capacity_for("737", SeatClass::Coach), Some(140));
    }

    #[test]
    fn empty_catalog() {
        let table = AircraftCapacityTable::new(vec![]);
        assert!(table.is_empty());
        assert_eq!(table.capacity_for("737", SeatClass::Coach), None);
    }
}
