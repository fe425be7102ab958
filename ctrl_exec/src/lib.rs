//! # Controller library.
//!
//! This library allows other crates in the workspace to access items defined inside the
//! controller crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Joint angle control module - converts desired joint positions into per-joint acceleration
/// commands using a decoupled PD law
pub mod joint_ctrl;

/// Simulated joint state provider - stands in for the real robot in demo runs and tests
pub mod sim_state;
