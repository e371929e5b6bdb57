//! AWS CloudFormation provider for driftflow
//!
//! Implements [`DriftProvider`](driftflow_cloud::DriftProvider) on top of
//! `aws-sdk-cloudformation`.
//!
//! # Requirements
//!
//! - AWS credentials resolvable through the standard chain (a named profile,
//!   environment variables, SSO, instance metadata, ...)
//!
//! # Example
//!
//! ```ignore
//! use driftflow_cloud::{DriftDetector, StackSelection};
//! use driftflow_cloud_aws::{AwsDriftProvider, AwsSettings};
//!
//! let provider = AwsDriftProvider::connect(&AwsSettings::new("ap-southeast-1")).await?;
//! let detector = DriftDetector::new(provider);
//! detector
//!     .process_stacks(&StackSelection::new().with_filter("Datadog"))
//!     .await?;
//! ```

pub mod convert;
pub mod provider;

pub use provider::{AwsDriftProvider, AwsSettings};
