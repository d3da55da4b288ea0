use crate::dataset::Dataset;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    pub total_employees: usize,
    pub total_promoted: usize,
}

impl SummaryMetrics {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            total_employees: total_employees(dataset),
            total_promoted: total_promoted(dataset),
        }
    }
}

pub fn total_employees(dataset: &Dataset) -> usize {
    dataset.len()
}

/// Rows whose is-promoted label is [`crate::dataset::PROMOTED_LABEL`].
pub fn total_promoted(dataset: &Dataset) -> usize {
    dataset
        .records()
        .iter()
        .filter(|record| record.promoted())
        .count()
}
