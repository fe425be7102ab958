//! # Whole-Body Trajectory Message
//!
//! The trajectory message exchanged with the motion stack. The controller
//! reads the desired positions out of it and writes the commanded
//! accelerations back into it, leaving every other field untouched.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single whole-body trajectory point.
///
/// All vectors are in global joint order (chest, left arm, right arm) and
/// must have one entry per joint.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct JointTrajectory {
    /// Names of the joints the vectors below refer to, in global order.
    pub joint_names: Vec<String>,

    /// Desired joint positions.
    ///
    /// Units: radians
    pub positions: Vec<f64>,

    /// Desired joint velocities.
    ///
    /// Units: radians/second
    pub velocities: Vec<f64>,

    /// Commanded joint accelerations.
    ///
    /// Units: radians/second^2
    pub accelerations: Vec<f64>,

    /// Time at which this point should be reached, relative to the start of
    /// the trajectory.
    ///
    /// Units: seconds
    pub time_from_start_s: f64,
}
