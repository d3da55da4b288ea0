use crate::dataset::Dataset;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentPromotionCount {
    pub department: String,
    pub is_promoted: String,
    pub employees: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HireCount {
    pub join_date: NaiveDate,
    pub employees: usize,
}

/// Length-of-service values for one department, in dataset order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDistribution {
    pub department: String,
    pub values: Vec<u32>,
}

impl ServiceDistribution {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Employees per (department, is-promoted) pair, ascending by count.
///
/// Every combination of observed department and promotion label is emitted,
/// including empty ones. Groups start out in lexicographic level order
/// (department, then label) and the sort is stable, so equal counts keep that
/// order.
pub fn department_promotion_counts(dataset: &Dataset) -> Vec<DepartmentPromotionCount> {
    let mut tally: HashMap<(&str, &str), usize> = HashMap::new();
    for record in dataset.records() {
        *tally
            .entry((record.department.as_str(), record.is_promoted.as_str()))
            .or_default() += 1;
    }

    let categories = dataset.categories();
    let labels = categories.is_promoted.sorted();
    let mut counts: Vec<DepartmentPromotionCount> = categories
        .department
        .sorted()
        .into_iter()
        .flat_map(|department| labels.iter().map(move |label| (department, *label)))
        .map(|(department, label)| DepartmentPromotionCount {
            department: department.to_string(),
            is_promoted: label.to_string(),
            employees: tally.get(&(department, label)).copied().unwrap_or_default(),
        })
        .collect();

    counts.sort_by_key(|count| count.employees);
    counts
}

/// Hires per join date on or after `cutoff`, keeping the latest `window`
/// distinct dates in ascending order.
///
/// The window counts dates that have hires, not calendar days: with gaps in
/// hiring the series can reach back further than `window` days.
pub fn recent_hire_series(dataset: &Dataset, cutoff: NaiveDate, window: usize) -> Vec<HireCount> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in dataset
        .records()
        .iter()
        .filter(|record| record.join_date >= cutoff)
    {
        *per_day.entry(record.join_date).or_default() += 1;
    }

    let skip = per_day.len().saturating_sub(window);
    per_day
        .into_iter()
        .skip(skip)
        .map(|(join_date, employees)| HireCount {
            join_date,
            employees,
        })
        .collect()
}

pub fn service_distribution(dataset: &Dataset, department: &str) -> ServiceDistribution {
    let values = dataset
        .records()
        .iter()
        .filter(|record| record.department == department)
        .map(|record| record.length_of_service)
        .collect();

    ServiceDistribution {
        department: department.to_string(),
        values,
    }
}
