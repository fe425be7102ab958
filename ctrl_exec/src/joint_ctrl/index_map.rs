//! Joint group index map
//!
//! The three anatomical groups are laid out back to back in one flat joint
//! vector: chest first, then left arm, then right arm. The map is built once
//! from the robot description and is immutable afterwards.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::JointCtrlError;
use robot_if::RobotDescription;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// One of the three anatomical joint groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointGroup {
    Chest,
    LeftArm,
    RightArm,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Static mapping of the three joint groups onto the flat joint vector.
///
/// The groups' index ranges partition `[0, N)` with no gaps and no overlap,
/// in the fixed order chest, left arm, right arm.
#[derive(Debug, Default, Clone)]
pub struct JointIndexMap {
    chest_names: Vec<String>,
    left_arm_names: Vec<String>,
    right_arm_names: Vec<String>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl JointIndexMap {
    /// Build the map from the robot description.
    pub fn new(desc: &RobotDescription) -> Self {
        Self {
            chest_names: desc.chest_joint_names.clone(),
            left_arm_names: desc.left_arm_joint_names.clone(),
            right_arm_names: desc.right_arm_joint_names.clone(),
        }
    }

    /// Total number of joints in the flat joint vector.
    pub fn total(&self) -> usize {
        self.chest_names.len() + self.left_arm_names.len() + self.right_arm_names.len()
    }

    /// First global index of the given group's range.
    pub fn group_start(&self, group: JointGroup) -> usize {
        match group {
            JointGroup::Chest => 0,
            JointGroup::LeftArm => self.chest_names.len(),
            JointGroup::RightArm => self.chest_names.len() + self.left_arm_names.len(),
        }
    }

    /// Number of joints in the given group.
    pub fn group_size(&self, group: JointGroup) -> usize {
        match group {
            JointGroup::Chest => self.chest_names.len(),
            JointGroup::LeftArm => self.left_arm_names.len(),
            JointGroup::RightArm => self.right_arm_names.len(),
        }
    }

    /// Resolve a joint name to its global index.
    pub fn resolve(&self, joint_name: &str) -> Result<usize, JointCtrlError> {
        let groups = [
            (JointGroup::Chest, &self.chest_names),
            (JointGroup::LeftArm, &self.left_arm_names),
            (JointGroup::RightArm, &self.right_arm_names),
        ];

        for (group, names) in groups.iter() {
            if let Some(i) = names.iter().position(|n| n == joint_name) {
                return Ok(self.group_start(*group) + i);
            }
        }

        Err(JointCtrlError::NameNotFound(joint_name.to_string()))
    }

    /// All joint names in global index order.
    pub fn joint_names(&self) -> Vec<String> {
        self.chest_names
            .iter()
            .chain(self.left_arm_names.iter())
            .chain(self.right_arm_names.iter())
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn test_desc() -> RobotDescription {
        RobotDescription {
            chest_joint_names: vec!["torso_yaw".into(), "torso_pitch".into()],
            left_arm_joint_names: vec![
                "l_shoulder_pitch".into(),
                "l_shoulder_roll".into(),
                "l_elbow_pitch".into(),
            ],
            right_arm_joint_names: vec!["r_shoulder_pitch".into(), "r_elbow_pitch".into()],
        }
    }

    #[test]
    fn test_groups_partition_joint_vector() {
        let map = JointIndexMap::new(&test_desc());

        assert_eq!(map.total(), 7);

        // Ranges are contiguous, in order, and cover [0, N)
        assert_eq!(map.group_start(JointGroup::Chest), 0);
        assert_eq!(
            map.group_start(JointGroup::LeftArm),
            map.group_size(JointGroup::Chest)
        );
        assert_eq!(
            map.group_start(JointGroup::RightArm),
            map.group_size(JointGroup::Chest) + map.group_size(JointGroup::LeftArm)
        );
        assert_eq!(
            map.group_start(JointGroup::RightArm) + map.group_size(JointGroup::RightArm),
            map.total()
        );
    }

    #[test]
    fn test_resolve_joint_names() {
        let map = JointIndexMap::new(&test_desc());

        assert_eq!(map.resolve("torso_yaw").unwrap(), 0);
        assert_eq!(map.resolve("l_shoulder_roll").unwrap(), 3);
        assert_eq!(map.resolve("r_elbow_pitch").unwrap(), 6);
    }

    #[test]
    fn test_resolve_unknown_name_fails() {
        let map = JointIndexMap::new(&test_desc());

        match map.resolve("l_wrist_yaw") {
            Err(JointCtrlError::NameNotFound(name)) => assert_eq!(name, "l_wrist_yaw"),
            other => panic!("Expected NameNotFound, got {:?}", other),
        }
    }
}
