//! CloudFormation drift provider implementation

use crate::convert::{api_error, detection_id, detection_report, stack_summary};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::config::Region;
use driftflow_cloud::{CloudError, DetectionStatusReport, DriftProvider, Result, StackPage};

/// Connection settings for the CloudFormation client
#[derive(Debug, Clone)]
pub struct AwsSettings {
    /// Named profile from the shared config files; `None` uses the default chain
    pub profile: Option<String>,

    pub region: String,

    /// Total attempts per API call, including the first (standard retry mode)
    pub max_attempts: u32,
}

impl AwsSettings {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            profile: None,
            region: region.into(),
            max_attempts: 3,
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// AWS CloudFormation provider
pub struct AwsDriftProvider {
    client: Client,
    region: String,
}

impl AwsDriftProvider {
    /// Build a client from the shared AWS config with standard retry
    ///
    /// Credentials are resolved lazily, so bad credentials surface as an API
    /// error from the first call.
    pub async fn connect(settings: &AwsSettings) -> Result<Self> {
        if settings.max_attempts == 0 {
            return Err(CloudError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .retry_config(RetryConfig::standard().with_max_attempts(settings.max_attempts));
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        tracing::debug!(
            "CloudFormation client ready (profile: {}, region: {}, max_attempts: {})",
            settings.profile.as_deref().unwrap_or("<default>"),
            settings.region,
            settings.max_attempts
        );
        Ok(Self::from_client(Client::new(&sdk_config), &settings.region))
    }

    pub fn from_client(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }
}

#[async_trait]
impl DriftProvider for AwsDriftProvider {
    fn name(&self) -> &str {
        "aws-cloudformation"
    }

    async fn list_stacks_page(&self, next_token: Option<String>) -> Result<StackPage> {
        let output = self
            .client
            .list_stacks()
            .set_next_token(next_token)
            .send()
            .await
            .map_err(api_error)?;

        Ok(StackPage {
            summaries: output.stack_summaries().iter().map(stack_summary).collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn detect_stack_drift(&self, stack_name: &str) -> Result<String> {
        tracing::debug!("DetectStackDrift {} ({})", stack_name, self.region);
        let output = self
            .client
            .detect_stack_drift()
            .stack_name(stack_name)
            .send()
            .await
            .map_err(api_error)?;

        detection_id(&output)
    }

    async fn describe_detection_status(
        &self,
        detection_id: &str,
    ) -> Result<DetectionStatusReport> {
        let output = self
            .client
            .describe_stack_drift_detection_status()
            .stack_drift_detection_id(detection_id)
            .send()
            .await
            .map_err(api_error)?;

        Ok(detection_report(&output))
    }
}
