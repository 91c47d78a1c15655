// ABOUTME: Drives deployment creation through the create/repair cycle.
// ABOUTME: Races every suspension point against cancellation and caps repair cycles.

use crate::certs::CertificateProvisioner;
use crate::platform::{CreationRequest, DeploymentApi, DeploymentRecord, Routing};

use super::attempt::{AttemptStep, CreateAttempt, RepairStep};
use super::cancel::CancelSignal;
use super::error::{ClassifiedError, DeployError, Stage};

/// Default number of certificate repairs allowed per creation.
pub const DEFAULT_MAX_REPAIR_CYCLES: u32 = 3;

/// Limits on automatic certificate repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairPolicy {
    /// Completed repairs after which another missing certificate is an error.
    pub max_cycles: u32,
}

impl Default for RepairPolicy {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_REPAIR_CYCLES,
        }
    }
}

/// Final answer of a creation.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(DeploymentRecord),
    Rejected(ClassifiedError),
}

/// Outcome plus how much work it took.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateReport {
    pub outcome: CreateOutcome,
    /// Creation calls made.
    pub attempts: u32,
    /// Certificate repairs that completed and led to a retry.
    pub repair_cycles: u32,
}

impl CreateReport {
    pub fn record(&self) -> Option<&DeploymentRecord> {
        match &self.outcome {
            CreateOutcome::Created(record) => Some(record),
            CreateOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&ClassifiedError> {
        match &self.outcome {
            CreateOutcome::Created(_) => None,
            CreateOutcome::Rejected(err) => Some(err),
        }
    }
}

/// Creates deployments, classifying failures and repairing missing certificates.
///
/// Holds no per-request state; concurrent calls are independent.
#[derive(Debug)]
pub struct Orchestrator<A, P> {
    api: A,
    provisioner: P,
    policy: RepairPolicy,
}

impl<A: DeploymentApi, P: CertificateProvisioner> Orchestrator<A, P> {
    pub fn new(api: A, provisioner: P) -> Self {
        Self {
            api,
            provisioner,
            policy: RepairPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RepairPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn provisioner(&self) -> &P {
        &self.provisioner
    }

    /// Create a deployment.
    ///
    /// Returns the created record, or the typed rejection when the platform
    /// refused for a recognised reason. A missing certificate is provisioned
    /// and the identical request resubmitted; terminal provisioning failures
    /// are returned as rejections without a retry.
    ///
    /// # Errors
    ///
    /// - `DeployError::Unclassified` carries any fault that does not classify.
    /// - `DeployError::Transport` when the platform cannot be reached.
    /// - `DeployError::Cancelled` when `cancel` fires while a call is pending
    ///   or between a successful repair and its retry.
    /// - `DeployError::RepairLimitExceeded` when the certificate is still
    ///   reported missing after `max_cycles` repairs.
    pub async fn create_deployment(
        &self,
        request: &CreationRequest,
        routing: &Routing,
        cancel: &CancelSignal,
    ) -> Result<CreateReport, DeployError> {
        let mut attempt = CreateAttempt::new(request, routing);

        loop {
            let attempts = attempt.attempts() + 1;
            let repair_cycles = attempt.repair_cycles();
            let report = |outcome| CreateReport {
                outcome,
                attempts,
                repair_cycles,
            };

            let step = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!(attempts, "cancelled while creating deployment");
                    return Err(DeployError::Cancelled { stage: Stage::Submitting });
                }
                step = attempt.submit(&self.api) => step?,
            };

            let repairing = match step {
                AttemptStep::Created(record) => return Ok(report(CreateOutcome::Created(record))),
                AttemptStep::Rejected(err) => {
                    tracing::warn!(code = err.code(), "deployment rejected: {}", err);
                    return Ok(report(CreateOutcome::Rejected(err)));
                }
                AttemptStep::NeedsCertificate(repairing) => repairing,
            };

            if repairing.repair_cycles() >= self.policy.max_cycles {
                tracing::warn!(
                    domain = repairing.domain(),
                    cycles = repairing.repair_cycles(),
                    "certificate still missing, giving up"
                );
                return Err(DeployError::RepairLimitExceeded {
                    domain: repairing.domain().to_string(),
                    cycles: repairing.repair_cycles(),
                });
            }

            let step = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!("cancelled while provisioning certificate");
                    return Err(DeployError::Cancelled { stage: Stage::Provisioning });
                }
                step = repairing.repair(&self.provisioner) => step?,
            };

            attempt = match step {
                RepairStep::Ready(next) => next,
                RepairStep::Failed(err) => {
                    return Ok(report(CreateOutcome::Rejected(err.into())));
                }
            };

            if cancel.is_cancelled() {
                tracing::warn!("cancelled after certificate repair, skipping retry");
                return Err(DeployError::Cancelled {
                    stage: Stage::Retrying,
                });
            }
        }
    }
}
