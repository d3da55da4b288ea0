use super::aggregate::{department_promotion_counts, recent_hire_series};
use super::histogram::DEFAULT_BIN_COUNT;
use super::selector::DepartmentSelector;
use super::summary::SummaryMetrics;
use super::views::{
    hire_series_title, DepartmentsView, HireSeriesView, PromotionChartView, ServiceHistogramView,
    PROMOTION_CHART_TITLE,
};
use super::{default_hire_cutoff, DEFAULT_HIRE_WINDOW};
use crate::dataset::Dataset;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub hire_cutoff: NaiveDate,
    pub hire_window: usize,
    pub histogram_bins: usize,
    pub default_department: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            hire_cutoff: default_hire_cutoff(),
            hire_window: DEFAULT_HIRE_WINDOW,
            histogram_bins: DEFAULT_BIN_COUNT,
            default_department: "Technology".to_string(),
        }
    }
}

/// Static views computed once from the dataset, plus the selector for the
/// one dynamic chart.
#[derive(Debug, Clone)]
pub struct Dashboard {
    settings: DashboardSettings,
    summary: SummaryMetrics,
    promotions: PromotionChartView,
    hires: HireSeriesView,
    departments: DepartmentsView,
    selector: DepartmentSelector,
}

impl Dashboard {
    pub fn build(dataset: Arc<Dataset>, settings: DashboardSettings) -> Self {
        let summary = SummaryMetrics::from_dataset(&dataset);

        let promotions = PromotionChartView {
            title: PROMOTION_CHART_TITLE,
            counts: department_promotion_counts(&dataset),
        };

        let hires = HireSeriesView {
            title: hire_series_title(settings.hire_window),
            cutoff: settings.hire_cutoff,
            window: settings.hire_window,
            entries: recent_hire_series(&dataset, settings.hire_cutoff, settings.hire_window),
        };

        let observed = dataset.departments();
        let default_department = if observed.contains(&settings.default_department) {
            Some(settings.default_department.clone())
        } else {
            observed.first().map(str::to_string)
        };
        let departments = DepartmentsView {
            departments: observed.as_slice().to_vec(),
            default_department,
        };

        let selector = DepartmentSelector::new(dataset, settings.histogram_bins);

        Self {
            settings,
            summary,
            promotions,
            hires,
            departments,
            selector,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn summary(&self) -> SummaryMetrics {
        self.summary
    }

    pub fn promotions(&self) -> &PromotionChartView {
        &self.promotions
    }

    pub fn hires(&self) -> &HireSeriesView {
        &self.hires
    }

    pub fn departments(&self) -> &DepartmentsView {
        &self.departments
    }

    pub fn default_department(&self) -> Option<&str> {
        self.departments.default_department.as_deref()
    }

    pub fn selector(&self) -> &DepartmentSelector {
        &self.selector
    }

    /// Selects `department` by exact name, or the default department when the
    /// name is missing or blank.
    pub fn select(&self, department: Option<&str>) -> ServiceHistogramView {
        let department = department
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.default_department())
            .unwrap_or_default();
        self.selector.select(department)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::EmployeeRecord;

    fn employee(id: &str, department: &str, joined: NaiveDate) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            department: department.to_string(),
            region: "region_7".to_string(),
            education: "Bachelor's".to_string(),
            gender: "f".to_string(),
            recruitment_channel: "referred".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1992, 2, 2).expect("valid date"),
            join_date: joined,
            length_of_service: 2,
            kpis_met: "Yes".to_string(),
            awards_won: "No".to_string(),
            is_promoted: "Yes".to_string(),
        }
    }

    fn dataset() -> Arc<Dataset> {
        let joined = NaiveDate::from_ymd_opt(2021, 4, 12).expect("valid date");
        Arc::new(Dataset::new(vec![
            employee("1", "Finance", joined),
            employee("2", "Technology", joined),
        ]))
    }

    #[test]
    fn prefers_configured_default_department() {
        let dashboard = Dashboard::build(dataset(), DashboardSettings::default());
        assert_eq!(dashboard.default_department(), Some("Technology"));
        assert_eq!(dashboard.select(None).department, "Technology");
        assert_eq!(dashboard.select(Some("  ")).department, "Technology");
        assert_eq!(dashboard.settings().histogram_bins, DEFAULT_BIN_COUNT);
        assert_eq!(dashboard.summary().total_promoted, 2);
        assert_eq!(
            dashboard.hires().title,
            "Number of new hires in the last 30 days"
        );
    }

    #[test]
    fn selection_matches_names_exactly() {
        let dashboard = Dashboard::build(dataset(), DashboardSettings::default());
        let padded = dashboard.select(Some(" Technology "));
        assert_eq!(padded.department, " Technology ");
        assert!(padded.values.is_empty());
        assert_eq!(dashboard.select(Some("Technology")).values, vec![2]);
    }

    #[test]
    fn falls_back_to_first_observed_department() {
        let settings = DashboardSettings {
            default_department: "Legal".to_string(),
            ..DashboardSettings::default()
        };
        let dashboard = Dashboard::build(dataset(), settings);
        assert_eq!(dashboard.default_department(), Some("Finance"));
        assert_eq!(dashboard.departments().departments, ["Finance", "Technology"]);
    }

    #[test]
    fn empty_dataset_still_renders() {
        let dashboard = Dashboard::build(Arc::new(Dataset::default()), DashboardSettings::default());
        assert_eq!(dashboard.summary(), SummaryMetrics::default());
        assert_eq!(dashboard.default_department(), None);
        let view = dashboard.select(None);
        assert!(view.values.is_empty());
        assert!(dashboard.promotions().counts.is_empty());
        assert!(dashboard.hires().entries.is_empty());
    }
}
