// ABOUTME: Attempt state marker types for the type state pattern.
// ABOUTME: Attempting may only submit; Repairing may only provision and hand back an Attempting.

/// Ready to submit the creation request.
/// Available actions: `submit()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Attempting;

/// The platform reported a missing certificate.
/// Available actions: `repair()`
#[derive(Debug, Clone)]
pub struct Repairing {
    pub(crate) domain: String,
}

impl Repairing {
    /// The domain whose certificate is missing.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}
