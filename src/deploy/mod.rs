// ABOUTME: Deployment creation with typed failure classification.
// ABOUTME: Exports the orchestrator, the attempt state machine, and the error taxonomy.

mod attempt;
mod cancel;
mod classify;
mod error;
mod orchestrator;
mod state;

pub use attempt::{AttemptStep, CreateAttempt, RepairStep};
pub use cancel::{CancelHandle, CancelSignal, cancel_pair};
pub use classify::{Classification, classify};
pub use error::{ClassifiedError, DeployError, DeployErrorKind, Stage};
pub use orchestrator::{
    CreateOutcome, CreateReport, DEFAULT_MAX_REPAIR_CYCLES, Orchestrator, RepairPolicy,
};
pub use state::{Attempting, Repairing};
