// ABOUTME: Boundary with the remote deployment platform.
// ABOUTME: Request/record types, structured faults, collaborator traits, and the HTTP client.

mod client;
mod error;
mod fault;
mod request;
mod traits;

pub use client::HttpPlatformClient;
pub use error::{ApiError, ClientError};
pub use fault::ApiFault;
pub use request::{Certificate, CreateArgs, CreationRequest, DeploymentRecord, Routing};
pub use traits::{CertificateApi, DeploymentApi};
