// ABOUTME: One pass through the create/repair cycle, parameterized by state marker.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::certs::{CertificateError, CertificateProvisioner, ProvisionOutcome};
use crate::platform::{ApiError, CreationRequest, DeploymentApi, DeploymentRecord, Routing};

use super::classify::{Classification, classify};
use super::error::{ClassifiedError, DeployError};
use super::state::{Attempting, Repairing};

/// A creation attempt in progress over a borrowed, immutable request.
///
/// `CreateAttempt<Attempting>` can only submit. A missing certificate moves it
/// to `CreateAttempt<Repairing>`, which can only repair; a successful repair
/// is the single way back to `Attempting`.
#[derive(Debug)]
pub struct CreateAttempt<'a, S> {
    request: &'a CreationRequest,
    routing: &'a Routing,
    attempts: u32,
    repair_cycles: u32,
    state: S,
}

/// Result of submitting the request.
#[derive(Debug)]
pub enum AttemptStep<'a> {
    Created(DeploymentRecord),
    Rejected(ClassifiedError),
    NeedsCertificate(CreateAttempt<'a, Repairing>),
}

/// Result of repairing a missing certificate.
#[derive(Debug)]
pub enum RepairStep<'a> {
    Ready(CreateAttempt<'a, Attempting>),
    Failed(CertificateError),
}

impl<S> CreateAttempt<'_, S> {
    /// Creation calls made so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Certificate repairs completed so far.
    pub fn repair_cycles(&self) -> u32 {
        self.repair_cycles
    }
}

impl<'a> CreateAttempt<'a, Attempting> {
    pub fn new(request: &'a CreationRequest, routing: &'a Routing) -> Self {
        CreateAttempt {
            request,
            routing,
            attempts: 0,
            repair_cycles: 0,
            state: Attempting,
        }
    }

    /// Submit the request and classify the answer.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Unclassified` with the original fault when the
    /// platform answers with a fault that does not classify, and
    /// `DeployError::Transport` when the platform cannot be reached.
    pub async fn submit<A: DeploymentApi + ?Sized>(
        self,
        api: &A,
    ) -> Result<AttemptStep<'a>, DeployError> {
        let attempt = self.attempts + 1;
        tracing::info!(attempt, context = %self.routing.context, "creating deployment");

        let fault = match api.create_deployment(self.request, self.routing).await {
            Ok(record) => {
                tracing::info!(attempt, deployment = %record.id, "deployment created");
                return Ok(AttemptStep::Created(record));
            }
            Err(ApiError::Transport(e)) => return Err(DeployError::Transport(e)),
            Err(ApiError::Fault(fault)) => fault,
        };

        match classify(&fault, &self.routing.context) {
            Classification::Rejected(err) => Ok(AttemptStep::Rejected(err)),
            Classification::RepairCertificate { domain } => {
                tracing::info!(attempt, domain = %domain, "certificate missing, repairing");
                Ok(AttemptStep::NeedsCertificate(CreateAttempt {
                    request: self.request,
                    routing: self.routing,
                    attempts: attempt,
                    repair_cycles: self.repair_cycles,
                    state: Repairing { domain },
                }))
            }
            Classification::Unclassified => {
                tracing::debug!(attempt, fault = %fault, "fault did not classify");
                Err(DeployError::Unclassified(fault))
            }
        }
    }
}

impl<'a> CreateAttempt<'a, Repairing> {
    /// The domain whose certificate is missing.
    pub fn domain(&self) -> &str {
        self.state.domain()
    }

    /// Provision the missing certificate.
    ///
    /// On success returns an attempt over the identical request, ready to be
    /// submitted again.
    ///
    /// # Errors
    ///
    /// Faults the provisioner could not map are returned as
    /// `DeployError::Unclassified`.
    pub async fn repair<P: CertificateProvisioner + ?Sized>(
        self,
        provisioner: &P,
    ) -> Result<RepairStep<'a>, DeployError> {
        let outcome = provisioner
            .provision(self.state.domain(), self.routing)
            .await?;

        match outcome {
            ProvisionOutcome::Provisioned(_) => Ok(RepairStep::Ready(CreateAttempt {
                request: self.request,
                routing: self.routing,
                attempts: self.attempts,
                repair_cycles: self.repair_cycles + 1,
                state: Attempting,
            })),
            ProvisionOutcome::Failed(err) => Ok(RepairStep::Failed(err)),
        }
    }
}
