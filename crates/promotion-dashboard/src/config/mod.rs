use chrono::NaiveDate;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::report::{default_hire_cutoff, DashboardSettings, DEFAULT_HIRE_WINDOW};
use crate::report::histogram::{DEFAULT_BIN_COUNT, MAX_BIN_COUNT};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub dataset: DatasetConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dataset: DatasetConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the employee dataset lives and how the dashboard views are shaped.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub hire_cutoff: NaiveDate,
    pub hire_window: usize,
    pub histogram_bins: usize,
    pub default_department: String,
}

impl DatasetConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let path = env::var("DASHBOARD_DATASET")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("promotion_clean.csv"));

        let hire_cutoff = match env::var("DASHBOARD_HIRE_CUTOFF") {
            Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|_| ConfigError::InvalidHireCutoff { value: raw })?,
            Err(_) => default_hire_cutoff(),
        };

        let hire_window = match env::var("DASHBOARD_HIRE_WINDOW") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidHireWindow)?,
            Err(_) => DEFAULT_HIRE_WINDOW,
        };

        let histogram_bins = match env::var("DASHBOARD_HISTOGRAM_BINS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|bins| (1..=MAX_BIN_COUNT).contains(bins))
                .ok_or(ConfigError::InvalidHistogramBins)?,
            Err(_) => DEFAULT_BIN_COUNT,
        };

        let default_department = env::var("DASHBOARD_DEFAULT_DEPARTMENT")
            .unwrap_or_else(|_| "Technology".to_string());

        Ok(Self {
            path,
            hire_cutoff,
            hire_window,
            histogram_bins,
            default_department,
        })
    }

    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            hire_cutoff: self.hire_cutoff,
            hire_window: self.hire_window,
            histogram_bins: self.histogram_bins,
            default_department: self.default_department.clone(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidHireCutoff { value: String },
    InvalidHireWindow,
    InvalidHistogramBins,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidHireCutoff { value } => write!(
                f,
                "DASHBOARD_HIRE_CUTOFF must be a YYYY-MM-DD date (found '{}')",
                value
            ),
            ConfigError::InvalidHireWindow => {
                write!(f, "DASHBOARD_HIRE_WINDOW must be a non-negative integer")
            }
            ConfigError::InvalidHistogramBins => {
                write!(
                    f,
                    "DASHBOARD_HISTOGRAM_BINS must be an integer from 1 to {}",
                    MAX_BIN_COUNT
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidHireCutoff { .. }
            | ConfigError::InvalidHireWindow
            | ConfigError::InvalidHistogramBins => None,
        }
    }
}
