// ABOUTME: Collaborator traits for the remote platform API.
// ABOUTME: DeploymentApi creates deployments, CertificateApi issues certificates.

use super::error::ApiError;
use super::request::{Certificate, CreationRequest, DeploymentRecord, Routing};
use async_trait::async_trait;

/// Remote deployment creation.
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    /// Submit a creation request under the given routing context.
    ///
    /// Returns the platform's record on success, or the structured fault the
    /// platform answered with.
    async fn create_deployment(
        &self,
        request: &CreationRequest,
        routing: &Routing,
    ) -> Result<DeploymentRecord, ApiError>;
}

/// Remote certificate issuance.
#[async_trait]
pub trait CertificateApi: Send + Sync {
    /// Issue a certificate covering all of `domains`.
    async fn issue_certificate(
        &self,
        domains: &[String],
        routing: &Routing,
    ) -> Result<Certificate, ApiError>;
}
