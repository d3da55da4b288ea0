mod loader;
mod record;

pub use loader::{DatasetLoader, LoadError, ParseError};
pub use record::{EmployeeRecord, PROMOTED_LABEL};

use serde::Serialize;
use std::collections::HashSet;

/// Distinct values of a categorical column, in the order they first appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryLevels {
    values: Vec<String>,
}

impl CategoryLevels {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let values = values
            .into_iter()
            .filter(|value| seen.insert(*value))
            .map(str::to_string)
            .collect();
        Self { values }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|level| level == value)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.values
    }

    /// Levels in lexicographic order, independent of where they first appear.
    pub fn sorted(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.values.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }

    pub fn first(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Observed value sets for every categorical column.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Categories {
    pub department: CategoryLevels,
    pub region: CategoryLevels,
    pub education: CategoryLevels,
    pub gender: CategoryLevels,
    pub recruitment_channel: CategoryLevels,
    pub kpis_met: CategoryLevels,
    pub awards_won: CategoryLevels,
    pub is_promoted: CategoryLevels,
}

impl Categories {
    fn observe(records: &[EmployeeRecord]) -> Self {
        Self {
            department: levels(records, |r| &r.department),
            region: levels(records, |r| &r.region),
            education: levels(records, |r| &r.education),
            gender: levels(records, |r| &r.gender),
            recruitment_channel: levels(records, |r| &r.recruitment_channel),
            kpis_met: levels(records, |r| &r.kpis_met),
            awards_won: levels(records, |r| &r.awards_won),
            is_promoted: levels(records, |r| &r.is_promoted),
        }
    }
}

fn levels<F>(records: &[EmployeeRecord], field: F) -> CategoryLevels
where
    F: Fn(&EmployeeRecord) -> &String,
{
    CategoryLevels::from_values(records.iter().map(|record| field(record).as_str()))
}

/// Immutable employee table loaded once at startup.
///
/// Every aggregation takes a `&Dataset`; nothing mutates it after construction,
/// so it can be shared behind an `Arc` across request handlers.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<EmployeeRecord>,
    categories: Categories,
}

impl Dataset {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        let categories = Categories::observe(&records);
        Self {
            records,
            categories,
        }
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn departments(&self) -> &CategoryLevels {
        &self.categories.department
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_keep_first_appearance_order() {
        let levels = CategoryLevels::from_values(["Technology", "Sales", "Technology", "HR"]);
        assert_eq!(levels.as_slice(), ["Technology", "Sales", "HR"]);
        assert_eq!(levels.first(), Some("Technology"));
        assert!(levels.contains("HR"));
        assert!(!levels.contains("hr"));
        assert_eq!(levels.sorted(), ["HR", "Sales", "Technology"]);
        assert_eq!(levels.len(), 3);
    }

    #[test]
    fn empty_dataset_has_no_levels() {
        let dataset = Dataset::new(Vec::new());
        assert!(dataset.is_empty());
        assert!(dataset.departments().is_empty());
        assert_eq!(dataset.departments().first(), None);
    }
}
