// ABOUTME: Certificate provisioner trait and its platform-backed implementation.
// ABOUTME: Maps certificate endpoint faults onto terminal CertificateError values.

use super::error::CertificateError;
use crate::platform::{ApiError, ApiFault, Certificate, CertificateApi, Routing};
use crate::types::ContextName;
use async_trait::async_trait;

/// Result of a provisioning attempt that the platform understood.
#[derive(Debug, Clone, PartialEq)]
pub enum ProvisionOutcome {
    /// A certificate now exists for the domain.
    Provisioned(Certificate),
    /// Provisioning failed for a reason that will not go away by retrying.
    Failed(CertificateError),
}

/// Obtains a certificate for a hostname.
///
/// Faults the provisioner cannot map are returned as `Err` so they are never
/// mistaken for a terminal certificate failure.
#[async_trait]
pub trait CertificateProvisioner: Send + Sync {
    async fn provision(
        &self,
        domain: &str,
        routing: &Routing,
    ) -> Result<ProvisionOutcome, ApiError>;
}

/// Provisioner that asks the platform's certificate endpoint directly.
#[derive(Debug, Clone)]
pub struct PlatformProvisioner<C> {
    api: C,
    include_wildcard: bool,
}

impl<C: CertificateApi> PlatformProvisioner<C> {
    pub fn new(api: C) -> Self {
        Self {
            api,
            include_wildcard: false,
        }
    }

    /// Also request `*.domain` alongside the domain itself.
    pub fn with_wildcard(mut self, include_wildcard: bool) -> Self {
        self.include_wildcard = include_wildcard;
        self
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    fn common_names(&self, domain: &str) -> Vec<String> {
        let mut cns = vec![domain.to_string()];
        if self.include_wildcard && !domain.starts_with("*.") {
            cns.push(format!("*.{domain}"));
        }
        cns
    }
}

#[async_trait]
impl<C: CertificateApi> CertificateProvisioner for PlatformProvisioner<C> {
    async fn provision(
        &self,
        domain: &str,
        routing: &Routing,
    ) -> Result<ProvisionOutcome, ApiError> {
        let cns = self.common_names(domain);
        tracing::info!(domain, ?cns, "provisioning certificate");

        match self.api.issue_certificate(&cns, routing).await {
            Ok(cert) => {
                tracing::info!(domain, certificate = %cert.id, "certificate issued");
                Ok(ProvisionOutcome::Provisioned(cert))
            }
            Err(ApiError::Fault(fault)) => match map_certificate_fault(&fault, &cns, &routing.context) {
                Some(err) => {
                    tracing::warn!(domain, code = err.code(), "certificate provisioning failed: {}", err);
                    Ok(ProvisionOutcome::Failed(err))
                }
                None => Err(ApiError::Fault(fault)),
            },
            Err(e) => Err(e),
        }
    }
}

/// Map a certificate endpoint fault onto a terminal error.
///
/// `cns` are the names that were requested; the first one stands in for the
/// domain when the fault does not name one. Returns `None` for codes this
/// mapping does not recognise.
pub fn map_certificate_fault(
    fault: &ApiFault,
    cns: &[String],
    context: &ContextName,
) -> Option<CertificateError> {
    let requested = cns.first().map(String::as_str).unwrap_or_default();
    let domain = fault
        .domain()
        .or(fault.value())
        .unwrap_or(requested)
        .to_string();
    let domains = || fault.domains.clone().unwrap_or_else(|| cns.to_vec());

    let err = match fault.code.as_str() {
        "wildcard_not_allowed" => CertificateError::WildcardNotAllowed { domain },
        "cant_solve_challenge" => CertificateError::CantSolveChallenge {
            domain,
            message: fault.message().unwrap_or_default().to_string(),
        },
        "configuration_error" => CertificateError::DomainConfigurationError { domain },
        "forbidden" => CertificateError::DomainPermissionDenied {
            domain,
            context: context.clone(),
        },
        "should_share_root_domain" => CertificateError::DomainsShouldShareRoot {
            domains: domains(),
        },
        "validation_running" => CertificateError::DomainValidationRunning { domain },
        "unverified_domain" => CertificateError::DomainVerificationFailed { domain },
        "too_many_certificates" => CertificateError::TooManyCertificates {
            domains: domains(),
        },
        "rate_limited" => CertificateError::TooManyRequests {
            retry_after: fault.retry_after,
        },
        "invalid_domain" | "invalid_wildcard_domain" => CertificateError::InvalidDomain { domain },
        _ => return None,
    };
    Some(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ContextName {
        ContextName::new("team-x").unwrap()
    }

    fn cns() -> Vec<String> {
        vec!["example.com".to_string()]
    }

    #[test]
    fn falls_back_to_requested_domain() {
        let err = map_certificate_fault(&ApiFault::new("wildcard_not_allowed"), &cns(), &context());
        assert_eq!(
            err,
            Some(CertificateError::WildcardNotAllowed {
                domain: "example.com".to_string()
            })
        );
    }

    #[test]
    fn prefers_domain_named_by_fault() {
        let fault = ApiFault::new("invalid_domain").with_domain("bad..example.com");
        let err = map_certificate_fault(&fault, &cns(), &context());
        assert_eq!(
            err,
            Some(CertificateError::InvalidDomain {
                domain: "bad..example.com".to_string()
            })
        );
    }

    #[test]
    fn unknown_code_is_not_mapped() {
        let fault = ApiFault::new("internal_error");
        assert_eq!(map_certificate_fault(&fault, &cns(), &context()), None);
    }

    #[test]
    fn wildcard_names_are_added_once() {
        struct Unused;

        #[async_trait]
        impl CertificateApi for Unused {
            async fn issue_certificate(
                &self,
                _domains: &[String],
                _routing: &Routing,
            ) -> Result<Certificate, ApiError> {
                unreachable!("not called")
            }
        }

        let provisioner = PlatformProvisioner::new(Unused).with_wildcard(true);
        assert_eq!(
            provisioner.common_names("example.com"),
            vec!["example.com".to_string(), "*.example.com".to_string()]
        );
        assert_eq!(
            provisioner.common_names("*.example.com"),
            vec!["*.example.com".to_string()]
        );
    }
}
