//! Joint angle control module
//!
//! Computes per-joint acceleration commands for the chest, left arm and
//! right arm from desired joint positions, using an independent PD law on
//! each joint. The control is fully decoupled: each joint's output depends
//! only on that joint's own error and error derivative.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod diag;
mod gains;
mod index_map;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use diag::*;
pub use gains::*;
pub use index_map::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during JointCtrl operation.
///
/// All of these are caller programming errors: they are detected
/// synchronously at the call boundary and there is no internal recovery.
#[derive(Debug, thiserror::Error)]
pub enum JointCtrlError {
    #[error("Expected a joint vector of length {expected} but got {found}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("Joint index {index} is outside the joint vector (size {size})")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("Joint name {0:?} is not part of any joint group")]
    NameNotFound(String),
}

/// Possible errors that can occur during JointCtrl initialisation.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Failed to load the parameter file: {0}")]
    Params(#[from] util::params::LoadError),

    #[error("Invalid parameter set: {0}")]
    InvalidParams(String),
}
