// ABOUTME: Terminal certificate provisioning failures.
// ABOUTME: Each variant is a final answer; none of them is retried.

use crate::types::ContextName;

/// A certificate could not be provisioned, for a reason the caller has to act on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CertificateError {
    #[error("wildcard certificates are not allowed for {domain}")]
    WildcardNotAllowed { domain: String },

    #[error("unable to solve the certificate challenge for {domain}: {message}")]
    CantSolveChallenge { domain: String, message: String },

    #[error("the DNS configuration of {domain} prevents issuing a certificate")]
    DomainConfigurationError { domain: String },

    #[error("no permission to issue a certificate for {domain} under {context}")]
    DomainPermissionDenied { domain: String, context: ContextName },

    #[error("all domains in a certificate must share the same root: {}", .domains.join(", "))]
    DomainsShouldShareRoot { domains: Vec<String> },

    #[error("verification of {domain} is still running")]
    DomainValidationRunning { domain: String },

    #[error("verification failed for {domain}")]
    DomainVerificationFailed { domain: String },

    #[error("too many certificates already issued for {}", .domains.join(", "))]
    TooManyCertificates { domains: Vec<String> },

    #[error("too many certificate requests{}", retry_hint(.retry_after))]
    TooManyRequests { retry_after: Option<u64> },

    #[error("{domain} is not a valid domain for a certificate")]
    InvalidDomain { domain: String },
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(", retry in {secs}s"))
        .unwrap_or_default()
}

impl CertificateError {
    /// Stable identifier for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            CertificateError::WildcardNotAllowed { .. } => "wildcard_not_allowed",
            CertificateError::CantSolveChallenge { .. } => "cant_solve_challenge",
            CertificateError::DomainConfigurationError { .. } => "domain_configuration_error",
            CertificateError::DomainPermissionDenied { .. } => "cert_permission_denied",
            CertificateError::DomainsShouldShareRoot { .. } => "domains_should_share_root",
            CertificateError::DomainValidationRunning { .. } => "domain_validation_running",
            CertificateError::DomainVerificationFailed { .. } => "cert_verification_failed",
            CertificateError::TooManyCertificates { .. } => "too_many_certificates",
            CertificateError::TooManyRequests { .. } => "too_many_requests",
            CertificateError::InvalidDomain { .. } => "invalid_domain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_message_mentions_retry_when_known() {
        let err = CertificateError::TooManyRequests {
            retry_after: Some(30),
        };
        assert_eq!(err.to_string(), "too many certificate requests, retry in 30s");

        let err = CertificateError::TooManyRequests { retry_after: None };
        assert_eq!(err.to_string(), "too many certificate requests");
    }

    #[test]
    fn share_root_lists_domains() {
        let err = CertificateError::DomainsShouldShareRoot {
            domains: vec!["a.com".to_string(), "b.org".to_string()],
        };
        assert!(err.to_string().ends_with("a.com, b.org"));
    }
}
