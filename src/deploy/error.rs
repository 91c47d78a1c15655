// ABOUTME: Error types for deployment creation.
// ABOUTME: ClassifiedError is the closed set of typed rejections; DeployError is everything else.

use std::fmt;

use crate::certs::CertificateError;
use crate::platform::{ApiError, ApiFault, ClientError};
use crate::types::ContextName;

/// A recognised platform rejection. Every variant is terminal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifiedError {
    /// A domain referenced as alias suffix or explicitly does not exist.
    #[error("the domain {domain} was not found")]
    DomainNotFound { domain: String },

    /// A domain used in an alias has not been verified.
    #[error("the domain {domain} is not verified")]
    DomainNotVerified { domain: String },

    /// The domain used as a suffix failed verification.
    #[error("verification failed for the domain {domain}")]
    DomainVerificationFailed { domain: String },

    /// Build concurrency limits throttled the creation.
    #[error("deployment builds are rate limited: {message}")]
    BuildsRateLimited { message: String },

    /// No rights over the domain used as suffix.
    #[error("no permission to use the domain {domain} under {context}")]
    DomainPermissionDenied { domain: String, context: ContextName },

    /// The request body failed server-side schema validation.
    #[error("invalid request ({keyword} at `{data_path}`): {message}")]
    SchemaValidationFailed {
        message: String,
        keyword: String,
        data_path: String,
        params: serde_json::Value,
    },

    /// The referenced deployment or context does not exist.
    #[error("deployment not found under {context}")]
    DeploymentNotFound { context: ContextName },

    /// Certificate repair ended in a terminal provisioning failure.
    #[error(transparent)]
    Certificate(#[from] CertificateError),
}

impl ClassifiedError {
    /// Stable identifier for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            ClassifiedError::DomainNotFound { .. } => "domain_not_found",
            ClassifiedError::DomainNotVerified { .. } => "domain_not_verified",
            ClassifiedError::DomainVerificationFailed { .. } => "domain_verification_failed",
            ClassifiedError::BuildsRateLimited { .. } => "builds_rate_limited",
            ClassifiedError::DomainPermissionDenied { .. } => "domain_permission_denied",
            ClassifiedError::SchemaValidationFailed { .. } => "schema_validation_failed",
            ClassifiedError::DeploymentNotFound { .. } => "deployment_not_found",
            ClassifiedError::Certificate(err) => err.code(),
        }
    }

    /// Whether this rejection came out of certificate repair.
    pub fn is_certificate(&self) -> bool {
        matches!(self, ClassifiedError::Certificate(_))
    }
}

/// Suspension point at which a creation was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting on the remote creation call.
    Submitting,
    /// Waiting on certificate provisioning.
    Provisioning,
    /// Certificate repaired, retry not yet started.
    Retrying,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Submitting => write!(f, "submitting the deployment"),
            Stage::Provisioning => write!(f, "provisioning a certificate"),
            Stage::Retrying => write!(f, "about to retry after certificate repair"),
        }
    }
}

/// Failures that are not a recognised rejection.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The platform answered with a fault this crate does not recognise.
    /// The original fault is carried unchanged.
    #[error("unexpected platform error: {0}")]
    Unclassified(ApiFault),

    /// The platform could not be reached.
    #[error(transparent)]
    Transport(#[from] ClientError),

    #[error("deployment creation cancelled while {stage}")]
    Cancelled { stage: Stage },

    /// The platform kept reporting a missing certificate after repairs.
    #[error("certificate for {domain} still missing after {cycles} repair cycle(s)")]
    RepairLimitExceeded { domain: String, cycles: u32 },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    Unclassified,
    Transport,
    Cancelled,
    RepairLimitExceeded,
}

impl DeployError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Unclassified(_) => DeployErrorKind::Unclassified,
            DeployError::Transport(_) => DeployErrorKind::Transport,
            DeployError::Cancelled { .. } => DeployErrorKind::Cancelled,
            DeployError::RepairLimitExceeded { .. } => DeployErrorKind::RepairLimitExceeded,
        }
    }

    /// Returns the original fault if this is an unclassified platform error.
    pub fn fault(&self) -> Option<&ApiFault> {
        match self {
            DeployError::Unclassified(fault) => Some(fault),
            _ => None,
        }
    }
}

impl From<ApiError> for DeployError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Fault(fault) => DeployError::Unclassified(fault),
            ApiError::Transport(source) => DeployError::Transport(source),
        }
    }
}
