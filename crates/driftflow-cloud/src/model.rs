//! Data model for stacks and drift detections

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One stack returned by a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSummary {
    /// Stack name
    pub stack_name: String,

    /// Provider stack status (e.g. "CREATE_COMPLETE")
    pub stack_status: String,

    /// When the stack was created
    pub creation_time: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_time: Option<DateTime<Utc>>,

    /// Drift status from the last detection, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_status: Option<String>,
}

impl StackSummary {
    pub fn new(stack_name: impl Into<String>, stack_status: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            stack_status: stack_status.into(),
            creation_time: Utc::now(),
            last_updated_time: None,
            drift_status: None,
        }
    }
}

/// One page of a stack listing
#[derive(Debug, Clone, Default)]
pub struct StackPage {
    pub summaries: Vec<StackSummary>,

    /// Token for the next page; `None` on the last page
    pub next_token: Option<String>,
}

/// Progress of a drift detection operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionStatus {
    InProgress,
    Complete,
    Failed,
    Other(String),
}

impl DetectionStatus {
    pub fn from_provider(value: &str) -> Self {
        match value {
            "DETECTION_IN_PROGRESS" => DetectionStatus::InProgress,
            "DETECTION_COMPLETE" => DetectionStatus::Complete,
            "DETECTION_FAILED" => DetectionStatus::Failed,
            other => DetectionStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DetectionStatus::InProgress => "DETECTION_IN_PROGRESS",
            DetectionStatus::Complete => "DETECTION_COMPLETE",
            DetectionStatus::Failed => "DETECTION_FAILED",
            DetectionStatus::Other(s) => s,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, DetectionStatus::Complete)
    }
}

impl std::fmt::Display for DetectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a completed drift detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackDriftStatus {
    InSync,
    Drifted,
    NotChecked,
    Unknown,
    Other(String),
}

impl StackDriftStatus {
    pub fn from_provider(value: &str) -> Self {
        match value {
            "IN_SYNC" => StackDriftStatus::InSync,
            "DRIFTED" => StackDriftStatus::Drifted,
            "NOT_CHECKED" => StackDriftStatus::NotChecked,
            "UNKNOWN" => StackDriftStatus::Unknown,
            other => StackDriftStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StackDriftStatus::InSync => "IN_SYNC",
            StackDriftStatus::Drifted => "DRIFTED",
            StackDriftStatus::NotChecked => "NOT_CHECKED",
            StackDriftStatus::Unknown => "UNKNOWN",
            StackDriftStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for StackDriftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StackDriftStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Response of a single detection status call
#[derive(Debug, Clone)]
pub struct DetectionStatusReport {
    pub detection_status: DetectionStatus,

    /// Set once the detection has finished
    pub drift_status: Option<StackDriftStatus>,

    pub status_reason: Option<String>,
}

impl DetectionStatusReport {
    pub fn in_progress() -> Self {
        Self {
            detection_status: DetectionStatus::InProgress,
            drift_status: None,
            status_reason: None,
        }
    }

    pub fn complete(drift_status: StackDriftStatus) -> Self {
        Self {
            detection_status: DetectionStatus::Complete,
            drift_status: Some(drift_status),
            status_reason: None,
        }
    }
}

/// Stack name to detection id, in submission order
///
/// Serializes as a single JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionRequests {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl DetectionRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a detection id. Re-submitting a name replaces its id in place.
    pub fn insert(&mut self, stack_name: impl Into<String>, detection_id: impl Into<String>) {
        let stack_name = stack_name.into();
        let detection_id = detection_id.into();
        match self.index.get(&stack_name) {
            Some(&position) => self.entries[position].1 = detection_id,
            None => {
                self.index.insert(stack_name.clone(), self.entries.len());
                self.entries.push((stack_name, detection_id));
            }
        }
    }

    pub fn get(&self, stack_name: &str) -> Option<&str> {
        let position = *self.index.get(stack_name)?;
        Some(self.entries[position].1.as_str())
    }

    pub fn contains(&self, stack_name: &str) -> bool {
        self.get(stack_name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DetectionRequests {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, id) in &self.entries {
            map.serialize_entry(name, id)?;
        }
        map.end()
    }
}

/// Completed detection for one stack
///
/// Serializes as `{"<stack>": ["<detection id>", "<drift status>"]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionResult {
    pub stack_name: String,
    pub detection_id: String,
    pub drift_status: StackDriftStatus,
}

impl Serialize for DetectionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.stack_name,
            &(self.detection_id.as_str(), &self.drift_status),
        )?;
        map.end()
    }
}

/// What a `process_stacks` run did
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Stack names in selection order
    pub selected: Vec<String>,

    /// Detections that were started
    pub requests: DetectionRequests,

    /// Completed detections in poll order
    pub results: Vec<DetectionResult>,

    /// Stacks skipped because the provider reported them missing
    pub skipped: Vec<String>,
}

impl RunSummary {
    pub fn drifted(&self) -> impl Iterator<Item = &DetectionResult> {
        self.results
            .iter()
            .filter(|r| r.drift_status == StackDriftStatus::Drifted)
    }
}
