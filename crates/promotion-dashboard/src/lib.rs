pub mod config;
pub mod dataset;
pub mod error;
pub mod report;
pub mod telemetry;
