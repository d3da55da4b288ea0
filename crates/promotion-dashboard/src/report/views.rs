use super::aggregate::{DepartmentPromotionCount, HireCount};
use super::histogram::{BoxSummary, HistogramBin};
use chrono::NaiveDate;
use serde::Serialize;

pub const PROMOTION_CHART_TITLE: &str = "Number of employees in each department";

/// Response to a department selection: the raw values plus what the
/// histogram and its box-plot marginal need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceHistogramView {
    pub department: String,
    pub title: String,
    pub employees: usize,
    pub values: Vec<u32>,
    pub bins: Vec<HistogramBin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_plot: Option<BoxSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromotionChartView {
    pub title: &'static str,
    pub counts: Vec<DepartmentPromotionCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HireSeriesView {
    pub title: String,
    pub cutoff: NaiveDate,
    pub window: usize,
    pub entries: Vec<HireCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentsView {
    pub departments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_department: Option<String>,
}

pub fn service_histogram_title(department: &str) -> String {
    format!("Length of Service Distribution in {department} Department")
}

pub fn hire_series_title(window: usize) -> String {
    format!("Number of new hires in the last {window} days")
}
