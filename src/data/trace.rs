//! HTTP trace records and status-code classification.
//!
//! Trace records are kept as opaque JSON so that unknown fields pass through
//! to the detail view untouched. Only `response.status` is interpreted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One logged HTTP request/response pair, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceRecord(Value);

impl TraceRecord {
    /// Wrap a raw JSON trace.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The raw JSON, for detail display and export.
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// The response status code, if present and a whole number.
    ///
    /// `200` and `200.0` both read as 200; `200.5` and `"200"` read as `None`.
    pub fn status(&self) -> Option<i64> {
        let status = self.0.pointer("/response/status")?;
        status.as_i64().or_else(|| {
            let f = status.as_f64()?;
            (f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64).then_some(f as i64)
        })
    }

    /// When the exchange happened, as reported by the backend.
    pub fn timestamp(&self) -> Option<&str> {
        self.0.get("timestamp").and_then(Value::as_str)
    }

    /// Request method (GET, POST, ...).
    pub fn method(&self) -> Option<&str> {
        self.0.pointer("/request/method").and_then(Value::as_str)
    }

    /// Request URI.
    pub fn uri(&self) -> Option<&str> {
        self.0.pointer("/request/uri").and_then(Value::as_str)
    }

    /// Time taken in milliseconds.
    pub fn time_taken_ms(&self) -> Option<u64> {
        self.0.get("timeTaken").and_then(Value::as_u64)
    }
}

impl From<Value> for TraceRecord {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Body of the http-trace resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceResponse {
    #[serde(default)]
    pub traces: Vec<TraceRecord>,
}

/// Status-code bucket a trace falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusBucket {
    /// 200
    Ok,
    /// 400
    BadRequest,
    /// 404
    NotFound,
    /// 500
    ServerError,
    /// Anything else, including a missing or non-numeric status.
    Other,
}

impl StatusBucket {
    /// All buckets in display order.
    pub const ALL: [StatusBucket; 5] = [
        StatusBucket::Ok,
        StatusBucket::BadRequest,
        StatusBucket::NotFound,
        StatusBucket::ServerError,
        StatusBucket::Other,
    ];

    /// Classify a status code by exact match against the four known codes.
    pub fn classify(status: Option<i64>) -> Self {
        match status {
            Some(200) => StatusBucket::Ok,
            Some(400) => StatusBucket::BadRequest,
            Some(404) => StatusBucket::NotFound,
            Some(500) => StatusBucket::ServerError,
            _ => StatusBucket::Other,
        }
    }

    /// Short label used for tabs and chart axes.
    pub fn label(&self) -> &'static str {
        match self {
            StatusBucket::Ok => "200",
            StatusBucket::BadRequest => "400",
            StatusBucket::NotFound => "404",
            StatusBucket::ServerError => "500",
            StatusBucket::Other => "Other",
        }
    }

    fn index(self) -> usize {
        match self {
            StatusBucket::Ok => 0,
            StatusBucket::BadRequest => 1,
            StatusBucket::NotFound => 2,
            StatusBucket::ServerError => 3,
            StatusBucket::Other => 4,
        }
    }
}

/// The current trace list together with its status buckets.
///
/// Buckets hold indices into `records` and are only ever computed by
/// [`TraceSet::new`], so they cannot outlive the list they describe.
#[derive(Debug, Clone, Default)]
pub struct TraceSet {
    records: Vec<TraceRecord>,
    buckets: [Vec<usize>; 5],
}

impl TraceSet {
    /// Take ownership of a trace list and classify it.
    pub fn new(records: Vec<TraceRecord>) -> Self {
        let mut buckets: [Vec<usize>; 5] = Default::default();
        for (idx, record) in records.iter().enumerate() {
            buckets[StatusBucket::classify(record.status()).index()].push(idx);
        }
        Self { records, buckets }
    }

    /// Every record in backend order.
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one bucket, in backend order.
    pub fn bucket(&self, bucket: StatusBucket) -> impl Iterator<Item = &TraceRecord> + '_ {
        self.buckets[bucket.index()].iter().map(|&idx| &self.records[idx])
    }

    /// Indices (into [`TraceSet::records`]) of one bucket.
    pub fn bucket_indices(&self, bucket: StatusBucket) -> &[usize] {
        &self.buckets[bucket.index()]
    }

    pub fn count(&self, bucket: StatusBucket) -> usize {
        self.buckets[bucket.index()].len()
    }

    pub fn get(&self, index: usize) -> Option<&TraceRecord> {
        self.records.get(index)
    }
}
