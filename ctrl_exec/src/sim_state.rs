//! Simulated joint state provider
//!
//! A double-integrator stand-in for the real robot: commanded joint
//! accelerations are integrated into joint velocities and positions each
//! cycle. The handle is cheaply cloneable so that the controller can hold
//! one copy as its state informer while the demo loop drives another.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::cell::RefCell;
use std::rc::Rc;

// Internal
use robot_if::RobotState;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Simulated robot joint state.
#[derive(Clone)]
pub struct SimJointState {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    positions: Vec<f64>,
    velocities: Vec<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimJointState {
    /// Create a simulated robot with all joints at rest at zero.
    pub fn new(num_joints: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                positions: vec![0.0; num_joints],
                velocities: vec![0.0; num_joints],
            })),
        }
    }

    /// Integrate the commanded accelerations over one timestep.
    ///
    /// Semi-implicit Euler: velocities are updated first and the new
    /// velocities then advance the positions.
    pub fn integrate(&self, accelerations: &[f64], dt_s: f64) {
        let mut inner = self.inner.borrow_mut();

        for i in 0..inner.positions.len() {
            inner.velocities[i] += accelerations[i] * dt_s;
            inner.positions[i] += inner.velocities[i] * dt_s;
        }
    }
}

impl RobotState for SimJointState {
    fn joint_positions(&self) -> Vec<f64> {
        self.inner.borrow().positions.clone()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_integration() {
        let sim = SimJointState::new(2);

        sim.integrate(&[1.0, -2.0], 0.5);

        // v = a * dt, p = v * dt
        assert_eq!(sim.joint_positions(), vec![0.25, -0.5]);

        sim.integrate(&[0.0, 0.0], 0.5);

        // Constant velocity continues to advance the positions
        assert_eq!(sim.joint_positions(), vec![0.5, -1.0]);
    }

    #[test]
    fn test_clones_share_state() {
        let sim = SimJointState::new(1);
        let handle = sim.clone();

        sim.integrate(&[2.0], 1.0);

        assert_eq!(handle.joint_positions(), sim.joint_positions());
    }
}
