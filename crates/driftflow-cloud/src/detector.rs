//! Drift detection orchestrator
//!
//! A run has two phases. The trigger phase starts a detection for every
//! selected stack and returns the [`DetectionRequests`] it created. The poll
//! phase takes that value and waits on each detection in submission order.

use crate::error::{CloudError, Result};
use crate::model::{DetectionRequests, DetectionResult, RunSummary, StackDriftStatus};
use crate::output::{OutputPaths, write_json_line};
use crate::provider::{DriftProvider, PollConfig};
use crate::stacks::{StackSelection, resolve_stack_names};
use std::time::Duration;
use tokio::time::sleep;

/// Result of triggering one stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Detection started with this id
    Submitted(String),
    /// Provider reported the stack missing; nothing was recorded
    StackNotFound,
}

/// Output of the trigger phase
#[derive(Debug, Clone, Default)]
pub struct TriggerPhase {
    pub requests: DetectionRequests,
    pub skipped: Vec<String>,
}

/// Runs drift detection against a [`DriftProvider`]
pub struct DriftDetector<P> {
    provider: P,
    poll: PollConfig,
    output: OutputPaths,
}

impl<P: DriftProvider> DriftDetector<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            poll: PollConfig::default(),
            output: OutputPaths::default(),
        }
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_output(mut self, output: OutputPaths) -> Self {
        self.output = output;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Start drift detection for one stack and record its detection id
    ///
    /// A missing stack is reported and skipped. Every other provider error is
    /// returned unchanged.
    pub async fn detect_stack_drift(
        &self,
        stack_name: &str,
        requests: &mut DetectionRequests,
    ) -> Result<TriggerOutcome> {
        match self.provider.detect_stack_drift(stack_name).await {
            Ok(detection_id) => {
                tracing::debug!("Detection {} started for {}", detection_id, stack_name);
                requests.insert(stack_name, detection_id.clone());
                Ok(TriggerOutcome::Submitted(detection_id))
            }
            Err(e) if e.is_stack_not_found() => {
                tracing::warn!("Skipping {}: {}", stack_name, e);
                println!("Stack {} does not exist", stack_name);
                Ok(TriggerOutcome::StackNotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Trigger detection for each stack in order, stopping at the first fatal error
    pub async fn trigger_all(&self, stack_names: &[String]) -> Result<TriggerPhase> {
        let mut phase = TriggerPhase::default();

        for stack_name in stack_names {
            println!("{}", stack_name);
            if let TriggerOutcome::StackNotFound =
                self.detect_stack_drift(stack_name, &mut phase.requests).await?
            {
                phase.skipped.push(stack_name.clone());
            }
        }

        tracing::info!(
            "Started {} detections ({} skipped)",
            phase.requests.len(),
            phase.skipped.len()
        );
        Ok(phase)
    }

    /// Wait for the detection of `stack_name` to finish
    ///
    /// Status is re-read at a fixed interval until the provider reports
    /// `DETECTION_COMPLETE`, or until `max_polls` calls have been made.
    pub async fn check_stack_drift(
        &self,
        requests: &DetectionRequests,
        stack_name: &str,
    ) -> Result<DetectionResult> {
        let detection_id = requests
            .get(stack_name)
            .ok_or_else(|| CloudError::DetectionNotFound(stack_name.to_string()))?;

        let mut polls: u32 = 0;
        loop {
            let report = self
                .provider
                .describe_detection_status(detection_id)
                .await?;
            polls += 1;

            if report.detection_status.is_complete() {
                let drift_status = report.drift_status.unwrap_or(StackDriftStatus::Unknown);
                tracing::info!("{}: {}", stack_name, drift_status);
                return Ok(DetectionResult {
                    stack_name: stack_name.to_string(),
                    detection_id: detection_id.to_string(),
                    drift_status,
                });
            }

            if let Some(max_polls) = self.poll.max_polls
                && polls >= max_polls
            {
                return Err(CloudError::Timeout(format!(
                    "drift detection {} for {} still {} after {} status checks",
                    detection_id, stack_name, report.detection_status, polls
                )));
            }

            tracing::debug!(
                "{} is {} (reason: {:?})",
                detection_id,
                report.detection_status,
                report.status_reason
            );
            println!("{}", still_waiting_message(self.poll.interval));
            sleep(self.poll.interval).await;
        }
    }

    /// Poll every request in submission order, appending each result as it completes
    pub async fn poll_all(&self, requests: &DetectionRequests) -> Result<Vec<DetectionResult>> {
        let mut results = Vec::with_capacity(requests.len());

        for stack_name in requests.names() {
            println!("{} stack object", stack_name);
            let result = self.check_stack_drift(requests, stack_name).await?;
            write_json_line(&self.output.results, &result).await?;
            results.push(result);
        }

        Ok(results)
    }

    /// Select stacks, trigger detection on each, and wait for every result
    ///
    /// The submitted map is written once after all triggers; results are
    /// appended one line per stack as each detection completes.
    pub async fn process_stacks(&self, selection: &StackSelection) -> Result<RunSummary> {
        let selected = resolve_stack_names(&self.provider, selection).await?;
        tracing::info!(
            "Selected {} stacks from {}",
            selected.len(),
            self.provider.name()
        );

        let TriggerPhase { requests, skipped } = self.trigger_all(&selected).await?;

        write_json_line(&self.output.submitted, &requests).await?;

        let results = self.poll_all(&requests).await?;

        println!("Complete");
        Ok(RunSummary {
            selected,
            requests,
            results,
            skipped,
        })
    }
}

fn still_waiting_message(interval: Duration) -> String {
    format!(
        "Still not done. Sleep for {} seconds and continue",
        interval.as_secs_f64()
    )
}
