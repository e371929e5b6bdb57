//! Conversions from SDK types into driftflow types

use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::operation::describe_stack_drift_detection_status::DescribeStackDriftDetectionStatusOutput;
use aws_sdk_cloudformation::operation::detect_stack_drift::DetectStackDriftOutput;
use aws_sdk_cloudformation::primitives::DateTime as SdkDateTime;
use aws_sdk_cloudformation::types::StackSummary as SdkStackSummary;
use chrono::{DateTime, Utc};
use driftflow_cloud::{
    CloudError, DetectionStatus, DetectionStatusReport, Result, StackDriftStatus, StackSummary,
};
use std::error::Error;
use std::fmt::Debug;

/// Map an SDK failure into [`CloudError::Api`]
///
/// Service errors keep the code and message returned by CloudFormation.
/// Failures without a service response get a code describing the failure kind.
pub fn api_error<E, R>(err: SdkError<E, R>) -> CloudError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug,
{
    let fallback_code = match &err {
        SdkError::ConstructionFailure(_) => "ConstructionFailure",
        SdkError::TimeoutError(_) => "TimeoutError",
        SdkError::DispatchFailure(_) => "DispatchFailure",
        SdkError::ResponseError(_) => "ResponseError",
        _ => "Unknown",
    };
    let code = err.code().unwrap_or(fallback_code).to_string();
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => DisplayErrorContext(&err).to_string(),
    };
    CloudError::Api { code, message }
}

pub fn to_chrono(value: &SdkDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}

/// Convert a ListStacks entry. Absent required fields become empty values.
pub fn stack_summary(summary: &SdkStackSummary) -> StackSummary {
    StackSummary {
        stack_name: summary.stack_name().unwrap_or_default().to_string(),
        stack_status: summary
            .stack_status()
            .map(|status| status.as_str().to_string())
            .unwrap_or_default(),
        creation_time: summary
            .creation_time()
            .and_then(to_chrono)
            .unwrap_or_default(),
        last_updated_time: summary.last_updated_time().and_then(to_chrono),
        drift_status: summary
            .drift_information()
            .and_then(|info| info.stack_drift_status())
            .map(|status| status.as_str().to_string()),
    }
}

/// Detection id from a DetectStackDrift response
pub fn detection_id(output: &DetectStackDriftOutput) -> Result<String> {
    output
        .stack_drift_detection_id()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            CloudError::api(
                "MissingField",
                "DetectStackDrift response has no StackDriftDetectionId",
            )
        })
}

/// Status report from a DescribeStackDriftDetectionStatus response
///
/// A response without a detection status is reported as not complete.
pub fn detection_report(output: &DescribeStackDriftDetectionStatusOutput) -> DetectionStatusReport {
    let detection_status = match output.detection_status() {
        Some(status) => DetectionStatus::from_provider(status.as_str()),
        None => DetectionStatus::Other("MISSING".to_string()),
    };
    DetectionStatusReport {
        detection_status,
        drift_status: output
            .stack_drift_status()
            .map(|status| StackDriftStatus::from_provider(status.as_str())),
        status_reason: output.detection_status_reason().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_cloudformation::config::http::HttpResponse;
    use aws_sdk_cloudformation::error::{ConnectorError, ErrorMetadata};
    use aws_sdk_cloudformation::operation::detect_stack_drift::DetectStackDriftError;
    use aws_sdk_cloudformation::types::{
        StackDriftDetectionStatus, StackDriftInformationSummary, StackDriftStatus as SdkDriftStatus,
        StackStatus,
    };
    use aws_smithy_types::body::SdkBody;

    fn service_error(code: &str, message: &str) -> SdkError<DetectStackDriftError, HttpResponse> {
        SdkError::service_error(
            DetectStackDriftError::generic(
                ErrorMetadata::builder().code(code).message(message).build(),
            ),
            HttpResponse::new(400u16.try_into().unwrap(), SdkBody::empty()),
        )
    }

    #[test]
    fn test_api_error_keeps_service_code_and_message() {
        let err = api_error(service_error(
            "ValidationError",
            "Stack with id ghost does not exist",
        ));
        assert_eq!(err.code(), Some("ValidationError"));
        assert!(err.is_stack_not_found());
        assert!(err.to_string().contains("Stack with id ghost does not exist"));
    }

    #[test]
    fn test_api_error_access_denied_is_fatal() {
        let err = api_error(service_error("AccessDenied", "not authorized"));
        assert_eq!(err.code(), Some("AccessDenied"));
        assert!(!err.is_stack_not_found());
    }

    #[test]
    fn test_api_error_dispatch_failure_gets_fallback_code() {
        let err: SdkError<DetectStackDriftError, HttpResponse> =
            SdkError::dispatch_failure(ConnectorError::io("connection reset".into()));
        let mapped = api_error(err);
        assert_eq!(mapped.code(), Some("DispatchFailure"));
        assert!(!mapped.is_stack_not_found());
    }

    #[test]
    fn test_to_chrono_keeps_subsecond_precision() {
        let sdk = SdkDateTime::from_secs_and_nanos(1_709_296_200, 250_000_000);
        let converted = to_chrono(&sdk).unwrap();
        assert_eq!(converted.to_rfc3339(), "2024-03-01T12:30:00.250+00:00");
    }

    #[test]
    fn test_stack_summary_conversion() {
        let sdk = SdkStackSummary::builder()
            .stack_name("DatadogIntegration")
            .stack_status(StackStatus::UpdateComplete)
            .creation_time(SdkDateTime::from_secs(1_709_296_200))
            .drift_information(
                StackDriftInformationSummary::builder()
                    .stack_drift_status(SdkDriftStatus::Drifted)
                    .build(),
            )
            .build();

        let summary = stack_summary(&sdk);
        assert_eq!(summary.stack_name, "DatadogIntegration");
        assert_eq!(summary.stack_status, "UPDATE_COMPLETE");
        assert_eq!(summary.drift_status.as_deref(), Some("DRIFTED"));
        assert!(summary.last_updated_time.is_none());
        assert_eq!(
            summary.creation_time.to_rfc3339(),
            "2024-03-01T12:30:00+00:00"
        );
    }

    #[test]
    fn test_stack_summary_without_drift_status() {
        let sdk = SdkStackSummary::builder()
            .stack_name("network")
            .stack_status(StackStatus::CreateComplete)
            .drift_information(StackDriftInformationSummary::builder().build())
            .build();

        let summary = stack_summary(&sdk);
        assert_eq!(summary.stack_name, "network");
        assert!(summary.drift_status.is_none());
    }

    #[test]
    fn test_detection_id() {
        let output = DetectStackDriftOutput::builder()
            .stack_drift_detection_id("d-123")
            .build();
        assert_eq!(detection_id(&output).unwrap(), "d-123");
    }

    #[test]
    fn test_missing_detection_id_is_an_error() {
        let err = detection_id(&DetectStackDriftOutput::builder().build()).unwrap_err();
        assert_eq!(err.code(), Some("MissingField"));
        assert!(!err.is_stack_not_found());
    }

    #[test]
    fn test_detection_report_complete() {
        let output = DescribeStackDriftDetectionStatusOutput::builder()
            .stack_drift_detection_id("d-123")
            .detection_status(StackDriftDetectionStatus::DetectionComplete)
            .stack_drift_status(SdkDriftStatus::InSync)
            .build();

        let report = detection_report(&output);
        assert!(report.detection_status.is_complete());
        assert_eq!(report.drift_status, Some(StackDriftStatus::InSync));
    }

    #[test]
    fn test_detection_report_without_status_is_not_complete() {
        let output = DescribeStackDriftDetectionStatusOutput::builder()
            .stack_drift_detection_id("d-123")
            .build();

        let report = detection_report(&output);
        assert!(!report.detection_status.is_complete());
        assert!(report.drift_status.is_none());
    }
}
