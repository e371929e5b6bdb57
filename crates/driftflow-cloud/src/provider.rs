//! Drift provider trait definition

use crate::error::Result;
use crate::model::{DetectionStatusReport, StackPage};
use async_trait::async_trait;
use std::time::Duration;

/// Infrastructure-as-code service that can detect stack drift
///
/// Implementations wrap a provider SDK (CloudFormation for AWS) and map its
/// errors into [`crate::CloudError::Api`] so the orchestrator never sees
/// SDK types.
#[async_trait]
pub trait DriftProvider: Send + Sync {
    /// Returns the provider name (e.g., "aws-cloudformation")
    fn name(&self) -> &str;

    /// Fetch one page of stack summaries, starting from `next_token`
    async fn list_stacks_page(&self, next_token: Option<String>) -> Result<StackPage>;

    /// Start drift detection for a stack and return the detection id
    async fn detect_stack_drift(&self, stack_name: &str) -> Result<String>;

    /// Read the status of a drift detection
    async fn describe_detection_status(&self, detection_id: &str)
    -> Result<DetectionStatusReport>;
}

/// Polling configuration for detection status checks
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Fixed delay between status calls
    pub interval: Duration,

    /// Maximum number of status calls per stack; `None` polls until complete
    pub max_polls: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_polls: None,
        }
    }
}

impl PollConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_polls(mut self, max_polls: Option<u32>) -> Self {
        self.max_polls = max_polls;
        self
    }
}
