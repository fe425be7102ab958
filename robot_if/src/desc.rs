//! # Robot Description
//!
//! The description fixes the joint layout of the robot: which joints exist,
//! which anatomical group each belongs to, and the order of the joints
//! within each group. It is loaded once at start up and never changes.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Static description of the robot's joint layout.
///
/// The full joint set is partitioned into three anatomical groups. The
/// global joint ordering is the concatenation chest, left arm, right arm,
/// with each group's joints in the order listed here.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RobotDescription {
    /// Ordered names of the chest (torso) joints.
    pub chest_joint_names: Vec<String>,

    /// Ordered names of the left arm joints.
    pub left_arm_joint_names: Vec<String>,

    /// Ordered names of the right arm joints.
    pub right_arm_joint_names: Vec<String>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl RobotDescription {
    /// Total number of joints across all three groups.
    pub fn total_joints(&self) -> usize {
        self.chest_joint_names.len()
            + self.left_arm_joint_names.len()
            + self.right_arm_joint_names.len()
    }
}
