// ABOUTME: Scripted doubles for the platform and the certificate provisioner.
// ABOUTME: Pop queued answers in order and record every call they receive.

use async_trait::async_trait;
use parking_lot::Mutex;
use shipyard::certs::{CertificateProvisioner, ProvisionOutcome};
use shipyard::deploy::CancelHandle;
use shipyard::platform::{
    ApiError, ApiFault, Certificate, CertificateApi, CreationRequest, DeploymentApi,
    DeploymentRecord, Routing,
};
use std::collections::VecDeque;

/// Platform answering creation calls from a queue.
#[derive(Default)]
pub struct ScriptedPlatform {
    responses: Mutex<VecDeque<Result<DeploymentRecord, ApiFault>>>,
    bodies: Mutex<Vec<Vec<u8>>>,
}

impl ScriptedPlatform {
    pub fn new(responses: impl IntoIterator<Item = Result<DeploymentRecord, ApiFault>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            bodies: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.bodies.lock().len()
    }

    /// Encoded request bodies, one per call.
    pub fn bodies(&self) -> Vec<Vec<u8>> {
        self.bodies.lock().clone()
    }
}

#[async_trait]
impl DeploymentApi for ScriptedPlatform {
    async fn create_deployment(
        &self,
        request: &CreationRequest,
        _routing: &Routing,
    ) -> Result<DeploymentRecord, ApiError> {
        self.bodies.lock().push(request.encode().unwrap());
        let next = self.responses.lock().pop_front();
        match next {
            Some(Ok(record)) => Ok(record),
            Some(Err(fault)) => Err(ApiError::Fault(fault)),
            None => panic!("unexpected create_deployment call"),
        }
    }
}

/// Platform whose creation call never completes.
pub struct PendingPlatform;

#[async_trait]
impl DeploymentApi for PendingPlatform {
    async fn create_deployment(
        &self,
        _request: &CreationRequest,
        _routing: &Routing,
    ) -> Result<DeploymentRecord, ApiError> {
        std::future::pending().await
    }
}

/// Provisioner answering from a queue.
#[derive(Default)]
pub struct ScriptedProvisioner {
    outcomes: Mutex<VecDeque<Result<ProvisionOutcome, ApiFault>>>,
    domains: Mutex<Vec<String>>,
    cancel_on_provision: Option<CancelHandle>,
}

impl ScriptedProvisioner {
    pub fn new(outcomes: impl IntoIterator<Item = Result<ProvisionOutcome, ApiFault>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            domains: Mutex::new(Vec::new()),
            cancel_on_provision: None,
        }
    }

    /// A provisioner that must never be called.
    pub fn unused() -> Self {
        Self::default()
    }

    /// Fire `handle` while provisioning, before answering.
    pub fn cancelling(mut self, handle: CancelHandle) -> Self {
        self.cancel_on_provision = Some(handle);
        self
    }

    pub fn calls(&self) -> usize {
        self.domains.lock().len()
    }

    pub fn domains(&self) -> Vec<String> {
        self.domains.lock().clone()
    }
}

#[async_trait]
impl CertificateProvisioner for ScriptedProvisioner {
    async fn provision(
        &self,
        domain: &str,
        _routing: &Routing,
    ) -> Result<ProvisionOutcome, ApiError> {
        self.domains.lock().push(domain.to_string());
        if let Some(handle) = &self.cancel_on_provision {
            handle.cancel();
        }
        let next = self.outcomes.lock().pop_front();
        match next {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(fault)) => Err(ApiError::Fault(fault)),
            None => panic!("unexpected provision call"),
        }
    }
}

/// Certificate endpoint answering from a queue.
#[derive(Default)]
pub struct ScriptedCertificates {
    responses: Mutex<VecDeque<Result<Certificate, ApiFault>>>,
    requests: Mutex<Vec<Vec<String>>>,
}

impl ScriptedCertificates {
    pub fn new(responses: impl IntoIterator<Item = Result<Certificate, ApiFault>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CertificateApi for ScriptedCertificates {
    async fn issue_certificate(
        &self,
        domains: &[String],
        _routing: &Routing,
    ) -> Result<Certificate, ApiError> {
        self.requests.lock().push(domains.to_vec());
        let next = self.responses.lock().pop_front();
        match next {
            Some(Ok(cert)) => Ok(cert),
            Some(Err(fault)) => Err(ApiError::Fault(fault)),
            None => panic!("unexpected issue_certificate call"),
        }
    }
}
