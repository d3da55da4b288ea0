use chrono::NaiveDate;
use serde::Serialize;

/// Label the dataset uses for a positive categorical flag.
pub const PROMOTED_LABEL: &str = "Yes";

/// One employee row after type coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub department: String,
    pub region: String,
    pub education: String,
    pub gender: String,
    pub recruitment_channel: String,
    pub date_of_birth: NaiveDate,
    pub join_date: NaiveDate,
    pub length_of_service: u32,
    pub kpis_met: String,
    pub awards_won: String,
    pub is_promoted: String,
}

impl EmployeeRecord {
    pub fn promoted(&self) -> bool {
        self.is_promoted == PROMOTED_LABEL
    }
}
