use super::{Dataset, EmployeeRecord};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// A date column held a value none of the accepted formats understand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: column '{column}' has unparseable date '{value}'")]
pub struct ParseError {
    pub line: u64,
    pub column: &'static str,
    pub value: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("dataset has no header row")]
    MissingHeader,
    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: &'static str },
    #[error("line {line}: employee_id '{employee_id}' appears more than once")]
    DuplicateEmployee { employee_id: String, line: u64 },
    #[error("employee_id '{employee_id}' joined on {join_date}, after {as_of}")]
    FutureJoinDate {
        employee_id: String,
        join_date: NaiveDate,
        as_of: NaiveDate,
    },
}

const REQUIRED_COLUMNS: [&str; 12] = [
    "employee_id",
    "department",
    "region",
    "education",
    "gender",
    "recruitment_channel",
    "date_of_birth",
    "join_date",
    "length_of_service",
    "KPIs_met >80%",
    "awards_won?",
    "is_promoted",
];

/// Reads the promotion CSV export into an immutable [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    as_of: Option<NaiveDate>,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference date for the join-date check; defaults to today.
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Dataset, LoadError> {
        Self::new().load_path(path)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
        Self::new().load_reader(reader)
    }

    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = self.load_reader(file)?;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            departments = dataset.departments().len(),
            "employee dataset loaded"
        );
        Ok(dataset)
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Dataset, LoadError> {
        let as_of = self.as_of.unwrap_or_else(|| Local::now().date_naive());
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        check_headers(&headers)?;

        let mut records = Vec::new();
        let mut seen: HashMap<String, u64> = HashMap::new();

        for result in csv_reader.records() {
            let raw = result?;
            let line = raw.position().map(|pos| pos.line()).unwrap_or_default();
            let row: PromotionRow = raw.deserialize(Some(&headers))?;
            let record = row.into_record(line)?;

            if seen.insert(record.employee_id.clone(), line).is_some() {
                return Err(LoadError::DuplicateEmployee {
                    employee_id: record.employee_id,
                    line,
                });
            }

            if record.join_date > as_of {
                return Err(LoadError::FutureJoinDate {
                    employee_id: record.employee_id,
                    join_date: record.join_date,
                    as_of,
                });
            }

            records.push(record);
        }

        debug!(rows = records.len(), "parsed promotion rows");
        Ok(Dataset::new(records))
    }
}

fn check_headers(headers: &csv::StringRecord) -> Result<(), LoadError> {
    if headers.iter().all(str::is_empty) {
        return Err(LoadError::MissingHeader);
    }

    match REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        Some(column) => Err(LoadError::MissingColumn { column: *column }),
        None => Ok(()),
    }
}

#[derive(Debug, Deserialize)]
struct PromotionRow {
    employee_id: String,
    department: String,
    region: String,
    education: String,
    gender: String,
    recruitment_channel: String,
    date_of_birth: String,
    join_date: String,
    length_of_service: u32,
    #[serde(rename = "KPIs_met >80%")]
    kpis_met: String,
    #[serde(rename = "awards_won?")]
    awards_won: String,
    is_promoted: String,
}

impl PromotionRow {
    fn into_record(self, line: u64) -> Result<EmployeeRecord, ParseError> {
        let date_of_birth = parse_date_column(&self.date_of_birth, "date_of_birth", line)?;
        let join_date = parse_date_column(&self.join_date, "join_date", line)?;

        Ok(EmployeeRecord {
            employee_id: self.employee_id,
            department: self.department,
            region: self.region,
            education: self.education,
            gender: self.gender,
            recruitment_channel: self.recruitment_channel,
            date_of_birth,
            join_date,
            length_of_service: self.length_of_service,
            kpis_met: self.kpis_met,
            awards_won: self.awards_won,
            is_promoted: self.is_promoted,
        })
    }
}

fn parse_date_column(value: &str, column: &'static str, line: u64) -> Result<NaiveDate, ParseError> {
    parse_date(value).ok_or_else(|| ParseError {
        line,
        column,
        value: value.to_string(),
    })
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
    {
        return Some(date);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}
