//! # Robot interface crate.
//!
//! Provides the interfaces between the control software and the robot:
//! the robot description, the joint state provider, and the whole-body
//! trajectory message.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Robot description - the joint layout of the robot
pub mod desc;

/// Joint state provider
pub mod state;

/// Whole-body trajectory message
pub mod traj;

// ------------------------------------------------------------------------------------------------
// RE-EXPORTS
// ------------------------------------------------------------------------------------------------

pub use desc::RobotDescription;
pub use state::RobotState;
pub use traj::JointTrajectory;
