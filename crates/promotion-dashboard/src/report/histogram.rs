//! Shapes a raw service distribution into chart-ready bins and a box-plot
//! summary for the marginal above the histogram.

use serde::Serialize;

pub const DEFAULT_BIN_COUNT: usize = 20;
/// Upper bound on bins per histogram; larger requests are clamped.
pub const MAX_BIN_COUNT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Five-number summary using linearly interpolated quartiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Splits `[min, max]` into `bin_count` equal-width bins.
///
/// Bins are half-open except the last, which also takes `max`. A distribution
/// with a single distinct value lands in one bin `[v, v + 1)`.
pub fn histogram_bins(values: &[u32], bin_count: usize) -> Vec<HistogramBin> {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Vec::new();
    };
    if bin_count == 0 {
        return Vec::new();
    }
    let bin_count = bin_count.min(MAX_BIN_COUNT);

    let min = f64::from(min);
    let max = f64::from(max);

    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: min + 1.0,
            count: values.len(),
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|index| HistogramBin {
            lower: min + width * index as f64,
            upper: if index + 1 == bin_count {
                max
            } else {
                min + width * (index + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in values {
        let offset = (f64::from(*value) - min) / width;
        let index = (offset.floor() as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    bins
}

pub fn box_summary(values: &[u32]) -> Option<BoxSummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = values.iter().copied().map(f64::from).collect();
    sorted.sort_by(f64::total_cmp);

    Some(BoxSummary {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}
