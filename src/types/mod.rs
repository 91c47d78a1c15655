// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod context_name;
mod id;

pub use context_name::{ContextName, ContextNameError};
pub use id::{CertificateId, DeploymentId};
