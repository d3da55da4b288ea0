mod aggregate;
mod dashboard;
pub mod histogram;
mod router;
mod selector;
mod summary;
pub mod views;

pub use aggregate::{
    department_promotion_counts, recent_hire_series, service_distribution,
    DepartmentPromotionCount, HireCount, ServiceDistribution,
};
pub use dashboard::{Dashboard, DashboardSettings};
pub use router::dashboard_router;
pub use selector::{on_department_selected, DepartmentSelector};
pub use summary::{total_employees, total_promoted, SummaryMetrics};

use chrono::NaiveDate;

/// Number of distinct join dates kept in the new-hire series.
pub const DEFAULT_HIRE_WINDOW: usize = 30;

/// Earliest join date considered by the new-hire series.
pub fn default_hire_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}
