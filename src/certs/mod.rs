// ABOUTME: Certificate provisioning used to repair missing-certificate failures.
// ABOUTME: Exports the provisioner trait, its terminal errors, and the platform-backed implementation.

mod error;
mod provisioner;

pub use error::CertificateError;
pub use provisioner::{
    CertificateProvisioner, PlatformProvisioner, ProvisionOutcome, map_certificate_fault,
};
