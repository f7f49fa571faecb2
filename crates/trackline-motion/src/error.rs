//! Runtime errors for junction arming and actor loading

use std::fmt;
use thiserror::Error;

/// Why a trigger was not accepted by a junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerRejection {
    /// The actor is outside the junction's tolerance radius
    NotNear,
    /// The junction has no branch for this trigger symbol
    UnknownSymbol,
}

impl fmt::Display for TriggerRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerRejection::NotNear => write!(f, "actor is not within tolerance"),
            TriggerRejection::UnknownSymbol => write!(f, "no branch for this trigger"),
        }
    }
}

/// A rejected junction decision. Non-fatal: the input is simply ignored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JunctionError {
    #[error("Invalid trigger '{trigger}' at junction '{junction}': {reason}")]
    InvalidTrigger {
        junction: String,
        trigger: String,
        reason: TriggerRejection,
    },

    #[error("Junction '{junction}' already decided on '{choice}'")]
    AlreadyDecided { junction: String, choice: String },

    #[error("Unknown junction id {0}")]
    UnknownJunction(usize),

    #[error("No junctions to arm with trigger '{0}'")]
    NoJunctions(String),

    #[error("Junction branch points at unknown curve id {0}")]
    UnknownCurve(usize),
}

/// Terminal failure of the actor's asset load.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Asset load failed for '{path}': {reason}")]
pub struct LoadFailure {
    pub path: String,
    pub reason: String,
}
