// ABOUTME: Pure mapping from a platform fault to a classification.
// ABOUTME: First matching (code, field presence) row wins; anything else is unclassified.

use super::error::ClassifiedError;
use crate::platform::ApiFault;
use crate::types::ContextName;

/// What a creation fault means to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// A terminal, typed rejection.
    Rejected(ClassifiedError),
    /// The certificate for `domain` is missing and can be provisioned.
    RepairCertificate { domain: String },
    /// Not a fault this mapping knows; must be propagated as-is.
    Unclassified,
}

/// Classify a fault returned by the creation call.
///
/// The result depends only on the fault's code and which auxiliary fields are
/// present, never on earlier attempts. Rows are checked in priority order:
///
/// | code                  | requires          | result                     |
/// |-----------------------|-------------------|----------------------------|
/// | `domain_missing`      |                   | `DomainNotFound(value)`    |
/// | `domain_not_found`    | `domain`          | `DomainNotFound(domain)`   |
/// | `domain_not_verified` | `domain`          | `DomainNotVerified`        |
/// | `domain_not_verified` | `value`           | `DomainVerificationFailed` |
/// | `builds_rate_limited` |                   | `BuildsRateLimited`        |
/// | `forbidden`           |                   | `DomainPermissionDenied`   |
/// | `bad_request`         | `keyword`         | `SchemaValidationFailed`   |
/// | `cert_missing`        | `value`           | repair certificate         |
/// | `not_found`           |                   | `DeploymentNotFound`       |
pub fn classify(fault: &ApiFault, context: &ContextName) -> Classification {
    let rejected = Classification::Rejected;
    let owned = |s: Option<&str>| s.unwrap_or_default().to_string();

    match (fault.code.as_str(), fault.domain(), fault.value()) {
        ("domain_missing", _, value) => rejected(ClassifiedError::DomainNotFound {
            domain: owned(value),
        }),
        ("domain_not_found", Some(domain), _) => rejected(ClassifiedError::DomainNotFound {
            domain: domain.to_string(),
        }),
        ("domain_not_verified", Some(domain), _) => {
            rejected(ClassifiedError::DomainNotVerified {
                domain: domain.to_string(),
            })
        }
        ("domain_not_verified", None, Some(value)) => {
            rejected(ClassifiedError::DomainVerificationFailed {
                domain: value.to_string(),
            })
        }
        ("builds_rate_limited", _, _) => rejected(ClassifiedError::BuildsRateLimited {
            message: owned(fault.message()),
        }),
        ("forbidden", _, value) => rejected(ClassifiedError::DomainPermissionDenied {
            domain: owned(value),
            context: context.clone(),
        }),
        ("bad_request", _, _) => match fault.keyword() {
            Some(keyword) => rejected(ClassifiedError::SchemaValidationFailed {
                message: owned(fault.message()),
                keyword: keyword.to_string(),
                data_path: owned(fault.data_path()),
                params: fault.params.clone().unwrap_or(serde_json::Value::Null),
            }),
            None => Classification::Unclassified,
        },
        ("cert_missing", _, Some(value)) => Classification::RepairCertificate {
            domain: value.to_string(),
        },
        ("not_found", _, _) => rejected(ClassifiedError::DeploymentNotFound {
            context: context.clone(),
        }),
        _ => Classification::Unclassified,
    }
}
