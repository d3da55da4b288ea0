use super::aggregate::service_distribution;
use super::histogram::{box_summary, histogram_bins};
use super::views::{service_histogram_title, ServiceHistogramView};
use crate::dataset::Dataset;
use std::sync::Arc;
use tracing::debug;

/// Recomputes the length-of-service histogram for the chosen department.
///
/// Unknown departments produce an empty view; the function never fails and
/// keeps no state between calls.
pub fn on_department_selected(
    dataset: &Dataset,
    department: &str,
    bin_count: usize,
) -> ServiceHistogramView {
    let distribution = service_distribution(dataset, department);
    let bins = histogram_bins(&distribution.values, bin_count);
    let box_plot = box_summary(&distribution.values);

    ServiceHistogramView {
        title: service_histogram_title(&distribution.department),
        employees: distribution.values.len(),
        department: distribution.department,
        values: distribution.values,
        bins,
        box_plot,
    }
}

/// Binds [`on_department_selected`] to a shared dataset for the selection route.
#[derive(Debug, Clone)]
pub struct DepartmentSelector {
    dataset: Arc<Dataset>,
    bin_count: usize,
}

impl DepartmentSelector {
    pub fn new(dataset: Arc<Dataset>, bin_count: usize) -> Self {
        Self { dataset, bin_count }
    }

    pub fn select(&self, department: &str) -> ServiceHistogramView {
        let view = on_department_selected(&self.dataset, department, self.bin_count);
        if !self.dataset.departments().contains(department) {
            debug!(department, "selection matched no observed department");
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::EmployeeRecord;
    use chrono::NaiveDate;

    fn employee(id: &str, department: &str, service: u32) -> EmployeeRecord {
        let date = NaiveDate::from_ymd_opt(2015, 6, 1).expect("valid date");
        EmployeeRecord {
            employee_id: id.to_string(),
            department: department.to_string(),
            region: "region_2".to_string(),
            education: "Master's & above".to_string(),
            gender: "m".to_string(),
            recruitment_channel: "sourcing".to_string(),
            date_of_birth: date,
            join_date: date,
            length_of_service: service,
            kpis_met: "Yes".to_string(),
            awards_won: "No".to_string(),
            is_promoted: "No".to_string(),
        }
    }

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::new(vec![
            employee("1", "Technology", 1),
            employee("2", "Technology", 2),
            employee("3", "Sales", 10),
            employee("4", "Technology", 5),
            employee("5", "Sales", 10),
        ]))
    }

    #[test]
    fn selection_returns_department_values_and_shape() {
        let selector = DepartmentSelector::new(dataset(), 20);
        let view = selector.select("Technology");

        assert_eq!(view.values, vec![1, 2, 5]);
        assert_eq!(view.employees, 3);
        assert_eq!(
            view.title,
            "Length of Service Distribution in Technology Department"
        );
        assert_eq!(view.bins.iter().map(|b| b.count).sum::<usize>(), 3);
        let box_plot = view.box_plot.expect("box plot present");
        assert_eq!(box_plot.median, 2.0);
    }

    #[test]
    fn unknown_department_yields_empty_view() {
        let view = on_department_selected(&dataset(), "NonexistentDept", 20);
        assert!(view.values.is_empty());
        assert!(view.bins.is_empty());
        assert!(view.box_plot.is_none());
        assert_eq!(view.employees, 0);
    }

    #[test]
    fn selection_is_idempotent() {
        let selector = DepartmentSelector::new(dataset(), 20);
        assert_eq!(selector.select("Sales"), selector.select("Sales"));
        assert_eq!(selector.select("Sales").values, vec![10, 10]);
    }
}
