use crate::infra::load_dashboard;
use chrono::NaiveDate;
use clap::Args;
use promotion_dashboard::config::AppConfig;
use promotion_dashboard::error::AppError;
use promotion_dashboard::report::histogram::MAX_BIN_COUNT;
use promotion_dashboard::report::Dashboard;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Employee CSV to read (defaults to DASHBOARD_DATASET)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Department for the length-of-service histogram
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Earliest join date for the new-hire series (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) cutoff: Option<NaiveDate>,
    /// Number of distinct join dates in the new-hire series
    #[arg(long)]
    pub(crate) window: Option<usize>,
    /// Histogram bin count
    #[arg(
        long,
        value_parser = clap::value_parser!(u16).range(1..=MAX_BIN_COUNT as i64)
    )]
    pub(crate) bins: Option<u16>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        dataset,
        department,
        cutoff,
        window,
        bins,
    } = args;

    let mut config = AppConfig::load()?.dataset;
    if let Some(path) = dataset {
        config.path = path;
    }
    if let Some(cutoff) = cutoff {
        config.hire_cutoff = cutoff;
    }
    if let Some(window) = window {
        config.hire_window = window;
    }
    if let Some(bins) = bins {
        config.histogram_bins = usize::from(bins);
    }

    let dashboard = load_dashboard(&config)?;
    print!("{}", render_report(&dashboard, department.as_deref()));
    Ok(())
}

pub(crate) fn render_report(dashboard: &Dashboard, department: Option<&str>) -> String {
    let mut out = String::new();
    let summary = dashboard.summary();

    out.push_str("Employee Promotion Dashboard\n");
    out.push_str(&format!("Total employees: {}\n", summary.total_employees));
    out.push_str(&format!(
        "Number of employees promoted: {}\n",
        summary.total_promoted
    ));

    let promotions = dashboard.promotions();
    out.push_str(&format!("\n{}\n", promotions.title));
    if promotions.counts.is_empty() {
        out.push_str("- no employees\n");
    }
    for count in &promotions.counts {
        out.push_str(&format!(
            "- {} | promoted {} | {} employees\n",
            count.department, count.is_promoted, count.employees
        ));
    }

    let hires = dashboard.hires();
    out.push_str(&format!("\n{} (since {})\n", hires.title, hires.cutoff));
    if hires.entries.is_empty() {
        out.push_str("- no hires on or after the cutoff\n");
    }
    for entry in &hires.entries {
        out.push_str(&format!("- {}: {}\n", entry.join_date, entry.employees));
    }

    let view = dashboard.select(department);
    out.push_str(&format!("\n{}\n", view.title));
    match view.box_plot {
        Some(box_plot) => out.push_str(&format!(
            "{} employees | min {} | q1 {:.1} | median {:.1} | q3 {:.1} | max {}\n",
            view.employees, box_plot.min, box_plot.q1, box_plot.median, box_plot.q3, box_plot.max
        )),
        None => out.push_str("- no employees in this department\n"),
    }
    for bin in view.bins.iter().filter(|bin| bin.count > 0) {
        out.push_str(&format!(
            "- {:>5.1} to {:>5.1} years: {}\n",
            bin.lower, bin.upper, bin.count
        ));
    }

    out
}
