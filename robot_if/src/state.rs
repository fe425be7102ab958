//! # Joint State Provider
//!
//! Abstraction over the source of the robot's current joint state. On the
//! real robot this is fed by the state estimator; in test and simulation it
//! is backed by a simulated robot model.

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Provider of the robot's current full-body joint positions.
///
/// Implementors must return positions in the global joint order fixed by the
/// [`RobotDescription`](crate::RobotDescription): chest, left arm, right
/// arm. Freshness of the returned state is the provider's contract; callers
/// treat it as the state "now".
pub trait RobotState {
    /// Current joint positions in global index order.
    ///
    /// Units: radians
    fn joint_positions(&self) -> Vec<f64>;
}
