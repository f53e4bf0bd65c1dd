use std::{collections::HashSet, sync::Arc};

use serde::Serialize;

use salestrack_core::Collection;

/// Records whose area is in `areas` and whose year is in `years`, in their
/// original order. An empty set on either side selects nothing.
pub fn apply(collection: &Collection, areas: &HashSet<Arc<str>>, years: &HashSet<u16>) -> Collection {
    collection
        .iter()
        .filter(|r| areas.contains(r.area()) && years.contains(&r.year()))
        .cloned()
        .collect()
}

/// The areas and years a user chose to look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub areas: Vec<Arc<str>>,
    pub years: Vec<u16>,
}

impl Selection {
    /// Everything present in `collection`, which is the default view.
    pub fn all(collection: &Collection) -> Self {
        Self {
            areas: collection.distinct_areas(),
            years: collection.distinct_years(),
        }
    }

    /// Replaces each side that the user supplied values for; an empty input
    /// keeps the current side.
    pub fn narrow<S: AsRef<str>>(mut self, areas: &[S], years: &[u16]) -> Self {
        if !areas.is_empty() {
            self.areas = dedup(areas.iter().map(|a| Arc::from(a.as_ref().trim())));
        }
        if !years.is_empty() {
            self.years = dedup(years.iter().copied());
        }
        self
    }

    pub fn apply(&self, collection: &Collection) -> Collection {
        let areas: HashSet<Arc<str>> = self.areas.iter().cloned().collect();
        let years: HashSet<u16> = self.years.iter().copied().collect();
        apply(collection, &areas, &years)
    }
}

fn dedup<T: Eq + std::hash::Hash + Clone>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use salestrack_core::Record;

    fn scenario() -> Collection {
        Collection::from_records(vec![
            Record::new("A", "north", dec!(10), 1, 2024).unwrap(),
            Record::new("B", "south", dec!(5), 1, 2024).unwrap(),
            Record::new("C", "north", dec!(7), 2, 2025).unwrap(),
        ])
    }

    fn areas(values: &[&str]) -> HashSet<Arc<str>> {
        values.iter().map(|v| Arc::from(*v)).collect()
    }

    #[test]
    fn test_apply_keeps_matching_in_order() {
        let c = scenario();
        let result = apply(&c, &areas(&["north"]), &[2024, 2025].into_iter().collect());
        let names: Vec<&str> = result.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_apply_unknown_area_is_empty() {
        let result = apply(&scenario(), &areas(&["east"]), &[2024].into_iter().collect());
        assert!(result.is_empty());
    }

    #[test]
    fn test_apply_empty_sets_select_nothing() {
        let c = scenario();
        assert!(apply(&c, &HashSet::new(), &[2024].into_iter().collect()).is_empty());
        assert!(apply(&c, &areas(&["north"]), &HashSet::new()).is_empty());
    }

    #[test]
    fn test_apply_empty_collection() {
        let result = apply(&Collection::new(), &areas(&["north"]), &[2024].into_iter().collect());
        assert!(result.is_empty());
    }

    #[test]
    fn test_default_selection_is_identity() {
        let c = scenario();
        assert_eq!(Selection::all(&c).apply(&c), c);
    }

    #[test]
    fn test_narrow_replaces_only_supplied_sides() {
        let c = scenario();
        let selection = Selection::all(&c).narrow(&["south", "south"], &[]);

        assert_eq!(selection.areas, vec![Arc::<str>::from("south")]);
        assert_eq!(selection.years, vec![2024, 2025]);
        assert_eq!(selection.apply(&c).len(), 1);
    }
}
