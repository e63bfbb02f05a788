//! Inputs for the bar and share charts.

use chrono::NaiveDate;

use super::format::format_date;
use super::trace::{StatusBucket, TraceSet};

/// Buckets drawn on the charts, in axis order.
pub const CHARTED_BUCKETS: [StatusBucket; 4] = [
    StatusBucket::Ok,
    StatusBucket::NotFound,
    StatusBucket::BadRequest,
    StatusBucket::ServerError,
];

/// Counts and title for the status-code charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub bars: Vec<(StatusBucket, u64)>,
}

/// One slice of the share chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub bucket: StatusBucket,
    pub count: u64,
    /// Percentage of the charted total, 0.0 when nothing was charted.
    pub percent: f64,
}

impl ChartData {
    /// Build chart inputs from the current trace set.
    pub fn from_traces(traces: &TraceSet, as_of: NaiveDate) -> Self {
        Self {
            title: format!("Last {} Requests as of {}", traces.len(), format_date(as_of)),
            bars: CHARTED_BUCKETS
                .iter()
                .map(|&b| (b, traces.count(b) as u64))
                .collect(),
        }
    }

    pub fn total(&self) -> u64 {
        self.bars.iter().map(|(_, n)| n).sum()
    }

    /// Per-bucket share of the charted total.
    pub fn shares(&self) -> Vec<Share> {
        let total = self.total();
        self.bars
            .iter()
            .map(|&(bucket, count)| Share {
                bucket,
                count,
                percent: if total == 0 {
                    0.0
                } else {
                    count as f64 * 100.0 / total as f64
                },
            })
            .collect()
    }
}
