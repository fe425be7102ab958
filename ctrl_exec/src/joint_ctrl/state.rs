//! Implementations for the JointCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{DiagVec, GainStore, InitError, JointCtrlError, JointGroup, JointIndexMap, Params};
use robot_if::{JointTrajectory, RobotDescription, RobotState};
use util::{
    archive::{Archived, Archiver},
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Joint angle control module state.
///
/// The controller state (`curr_position`, `prev_position`, `error`,
/// `prev_error`) is created zero-initialised, advanced exactly once per
/// control cycle, and never otherwise reset.
pub struct JointCtrl {
    params: Params,

    index_map: JointIndexMap,
    gains: GainStore,

    curr_position: DiagVec,
    prev_position: DiagVec,
    error: DiagVec,
    prev_error: DiagVec,

    state_informer: Box<dyn RobotState>,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    pub(crate) output: Option<Vec<f64>>,
    arch_output: Archiver,
}

/// Input data to Joint angle control.
#[derive(Default)]
pub struct InputData {
    /// Desired full-body joint positions, in global joint order.
    ///
    /// Units: radians
    pub desired_positions: Vec<f64>,
}

/// Data required to initialise Joint angle control.
pub struct InitData {
    /// Path of the parameter file, relative to the params directory.
    pub param_file: &'static str,

    /// The robot's joint layout.
    pub desc: RobotDescription,

    /// Provider of the robot's current joint positions.
    pub state_informer: Box<dyn RobotState>,
}

/// Status report for JointCtrl processing.
#[derive(Clone, Default, Serialize, Debug)]
pub struct StatusReport {
    /// One flag per joint, raised where the raw PD output exceeded the
    /// joint's acceleration limits and was saturated.
    pub accel_limited: Vec<bool>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for JointCtrl {
    type InitData = InitData;
    type InitError = InitError;

    type InputData = InputData;
    type OutputData = Vec<f64>;
    type StatusReport = StatusReport;
    type ProcError = JointCtrlError;

    /// Initialise the JointCtrl module.
    fn init(init_data: Self::InitData, session: &Session) -> Result<Self, Self::InitError> {
        // Load the parameters
        let params: Params = params::load(init_data.param_file)?;

        let mut ctrl = Self::new(params, &init_data.desc, init_data.state_informer)?;

        // Create the arch folder for joint_ctrl
        let mut arch_path = session.arch_root.clone();
        arch_path.push("joint_ctrl");
        std::fs::create_dir_all(arch_path).unwrap();

        // Initialise the archivers
        ctrl.arch_report = Archiver::from_path(session, "joint_ctrl/status_report.csv").unwrap();
        ctrl.arch_output = Archiver::from_path(session, "joint_ctrl/output.csv").unwrap();

        Ok(ctrl)
    }

    /// Perform cyclic processing of Joint angle control.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let accelerations = self.controlled_joint_accelerations(&input_data.desired_positions)?;

        self.output = Some(accelerations.clone());

        Ok((accelerations, self.report.clone()))
    }
}

impl Archived for JointCtrl {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.arch_report.serialise(&self.report)?;
        self.arch_output.serialise(&self.output)?;

        Ok(())
    }
}

impl JointCtrl {
    /// Create a new controller from the given parameters, robot description
    /// and joint state provider.
    ///
    /// The controller state starts zeroed; the gain store starts holding the
    /// parameter set's default gains and limits.
    pub fn new(
        params: Params,
        desc: &RobotDescription,
        state_informer: Box<dyn RobotState>,
    ) -> Result<Self, InitError> {
        let index_map = JointIndexMap::new(desc);
        let total = index_map.total();

        if params.default_kp.len() != total {
            return Err(InitError::InvalidParams(format!(
                "Parameter set is for {} joints but the robot description has {}",
                params.default_kp.len(),
                total
            )));
        }
        if params.dt_s <= 0.0 {
            return Err(InitError::InvalidParams(format!(
                "dt_s must be positive, got {}",
                params.dt_s
            )));
        }

        let gains = GainStore::from_params(&params)?;

        Ok(Self {
            params,
            index_map,
            gains,
            curr_position: DiagVec::zeros(total),
            prev_position: DiagVec::zeros(total),
            error: DiagVec::zeros(total),
            prev_error: DiagVec::zeros(total),
            state_informer,
            report: StatusReport::default(),
            arch_report: Archiver::default(),
            output: None,
            arch_output: Archiver::default(),
        })
    }

    /// Compute the per-joint acceleration commands for the given desired
    /// joint positions.
    ///
    /// One call is one control cycle: the current positions are fetched from
    /// the state informer, the PD law is applied to each joint
    /// independently, the raw outputs are saturated against the per-joint
    /// acceleration limits, and the `prev_position`/`prev_error` state is
    /// advanced for the next cycle's derivative estimate.
    ///
    /// Fails with `SizeMismatch` if `desired_positions` does not have one
    /// entry per joint; the controller state is not touched in that case.
    pub fn controlled_joint_accelerations(
        &mut self,
        desired_positions: &[f64],
    ) -> Result<Vec<f64>, JointCtrlError> {
        let total = self.index_map.total();

        if desired_positions.len() != total {
            return Err(JointCtrlError::SizeMismatch {
                expected: total,
                found: desired_positions.len(),
            });
        }

        let desired = DiagVec::from_slice(desired_positions);

        // Fetch the current full-body joint positions. Ordering and
        // freshness are the state informer's contract.
        let curr_position = DiagVec::from_slice(&self.state_informer.joint_positions());

        let error = &desired - &curr_position;
        let derivative = &(&error - &self.prev_error) / self.params.dt_s;

        // Per-joint PD law: the gain vectors are the diagonals of the
        // (diagonal) gain matrices, so the products are elementwise.
        let p_out = self.gains.kp_vec().mul_elem(&error);
        let d_out = self.gains.kd_vec().mul_elem(&derivative);
        let mut output = &p_out + &d_out;

        trace!(
            "JointCtrl error: {:?}, derivative: {:?}",
            error.to_vec(),
            derivative.to_vec()
        );

        // Saturate the output against the per-joint acceleration limits
        let (min_accel, max_accel) = self.gains.accel_limits();
        let limited = output.clamp_to(min_accel, max_accel);

        self.report = StatusReport {
            accel_limited: limited,
        };

        // Advance the controller state for the next cycle
        self.prev_position = std::mem::replace(&mut self.curr_position, curr_position);
        self.error = error;
        self.prev_error = self.error.clone();

        Ok(output.to_vec())
    }

    /// Update the acceleration field of the given trajectory message in
    /// place, from the message's own desired positions.
    ///
    /// All other fields of the message are passed through untouched. Fails
    /// with `SizeMismatch` if the message's position field does not have one
    /// entry per joint.
    pub fn update_joint_accelerations(
        &mut self,
        traj_msg: &mut JointTrajectory,
    ) -> Result<(), JointCtrlError> {
        traj_msg.accelerations = self.controlled_joint_accelerations(&traj_msg.positions)?;

        Ok(())
    }

    /// First index of the chest joints within the returned acceleration
    /// vector.
    pub fn chest_accel_index(&self) -> usize {
        self.index_map.group_start(JointGroup::Chest)
    }

    /// First index of the left arm joints within the returned acceleration
    /// vector.
    pub fn left_arm_accel_index(&self) -> usize {
        self.index_map.group_start(JointGroup::LeftArm)
    }

    /// First index of the right arm joints within the returned acceleration
    /// vector.
    pub fn right_arm_accel_index(&self) -> usize {
        self.index_map.group_start(JointGroup::RightArm)
    }

    /// The fixed control cycle timestep.
    ///
    /// Units: seconds
    pub fn dt_s(&self) -> f64 {
        self.params.dt_s
    }

    /// The joint group index map.
    pub fn index_map(&self) -> &JointIndexMap {
        &self.index_map
    }

    /// The gain store.
    pub fn gains(&self) -> &GainStore {
        &self.gains
    }

    /// The gain store, mutably, for run-time gain tuning.
    pub fn gains_mut(&mut self) -> &mut GainStore {
        &mut self.gains
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const EPSILON: f64 = 1e-12;

    /// Joint state provider returning a fixed position vector.
    struct FixedState(Vec<f64>);

    impl RobotState for FixedState {
        fn joint_positions(&self) -> Vec<f64> {
            self.0.clone()
        }
    }

    /// One joint per group for simplicity.
    fn test_desc() -> RobotDescription {
        RobotDescription {
            chest_joint_names: vec!["torso_yaw".into()],
            left_arm_joint_names: vec!["l_elbow_pitch".into()],
            right_arm_joint_names: vec!["r_elbow_pitch".into()],
        }
    }

    fn test_ctrl(params: Params, current: Vec<f64>) -> JointCtrl {
        JointCtrl::new(params, &test_desc(), Box::new(FixedState(current))).unwrap()
    }

    fn unit_params(min_accel: f64, max_accel: f64) -> Params {
        Params {
            dt_s: 1.0,
            default_kp: vec![1.0, 1.0, 1.0],
            default_kd: vec![0.0, 0.0, 0.0],
            min_accel_radss: vec![min_accel; 3],
            max_accel_radss: vec![max_accel; 3],
        }
    }

    #[test]
    fn test_saturated_first_cycle() {
        // dt = 1, Kp = 1, Kd = 0: with zeroed initial state the first
        // cycle's raw output equals the position error, which the tight
        // limits then saturate.
        let mut ctrl = test_ctrl(unit_params(-0.5, 0.5), vec![0.0, 0.0, 0.0]);

        let accel = ctrl
            .controlled_joint_accelerations(&[1.0, 2.0, 3.0])
            .unwrap();

        assert_eq!(accel, vec![0.5, 0.5, 0.5]);
        assert_eq!(ctrl.report.accel_limited, vec![true, true, true]);
    }

    #[test]
    fn test_zero_error_gives_zero_output() {
        // Desired equals current: error and derivative are both zero, so
        // the output is exactly zero regardless of the gains.
        let mut params = unit_params(-100.0, 100.0);
        params.default_kp = vec![50.0, 0.1, 1e6];
        params.default_kd = vec![3.0, 700.0, 0.5];

        let current = vec![0.2, -1.4, 0.7];
        let mut ctrl = test_ctrl(params, current.clone());

        let accel = ctrl.controlled_joint_accelerations(&current).unwrap();

        for a in accel {
            assert!(a.abs() < EPSILON);
        }
    }

    #[test]
    fn test_pd_law() {
        // Kp = 2, Kd = 1, dt = 0.5. First cycle from zeroed state:
        // error = desired - current, derivative = error / dt.
        let params = Params {
            dt_s: 0.5,
            default_kp: vec![2.0; 3],
            default_kd: vec![1.0; 3],
            min_accel_radss: vec![-100.0; 3],
            max_accel_radss: vec![100.0; 3],
        };

        let mut ctrl = test_ctrl(params, vec![0.5, 0.0, -0.5]);

        let accel = ctrl
            .controlled_joint_accelerations(&[1.0, 1.0, 1.0])
            .unwrap();

        // error = [0.5, 1.0, 1.5], derivative = [1.0, 2.0, 3.0]
        let expected = [2.0, 4.0, 6.0];
        for i in 0..3 {
            assert!((accel[i] - expected[i]).abs() < EPSILON);
        }

        // Second cycle with the same demand: error is unchanged, so the
        // derivative term drops to zero.
        let accel = ctrl
            .controlled_joint_accelerations(&[1.0, 1.0, 1.0])
            .unwrap();

        let expected = [1.0, 2.0, 3.0];
        for i in 0..3 {
            assert!((accel[i] - expected[i]).abs() < EPSILON);
        }
    }

    #[test]
    fn test_output_always_within_limits() {
        let mut ctrl = test_ctrl(unit_params(-0.25, 0.75), vec![0.0, 0.0, 0.0]);

        for desired in [
            [1e6, -1e6, 0.0],
            [0.1, -0.1, 0.5],
            [-3.0, 40.0, -0.2],
        ]
        .iter()
        {
            let accel = ctrl.controlled_joint_accelerations(desired).unwrap();

            for a in accel {
                assert!(a >= -0.25 && a <= 0.75);
            }
        }
    }

    #[test]
    fn test_size_mismatch_leaves_state_untouched() {
        let mut ctrl = test_ctrl(unit_params(-0.5, 0.5), vec![0.0, 0.0, 0.0]);

        // Advance one cycle so the state is non-trivial
        ctrl.controlled_joint_accelerations(&[1.0, 2.0, 3.0])
            .unwrap();

        let prev_error = ctrl.prev_error.clone();
        let prev_position = ctrl.prev_position.clone();

        // N - 1 entries must be rejected without a state advance
        assert!(matches!(
            ctrl.controlled_joint_accelerations(&[1.0, 2.0]),
            Err(JointCtrlError::SizeMismatch {
                expected: 3,
                found: 2
            })
        ));

        assert_eq!(ctrl.prev_error, prev_error);
        assert_eq!(ctrl.prev_position, prev_position);
    }

    #[test]
    fn test_update_joint_accelerations() {
        let mut ctrl = test_ctrl(unit_params(-0.5, 0.5), vec![0.0, 0.0, 0.0]);

        let mut traj_msg = JointTrajectory {
            joint_names: ctrl.index_map().joint_names(),
            positions: vec![1.0, 2.0, 3.0],
            velocities: vec![0.1, 0.2, 0.3],
            accelerations: vec![0.0, 0.0, 0.0],
            time_from_start_s: 2.5,
        };

        ctrl.update_joint_accelerations(&mut traj_msg).unwrap();

        assert_eq!(traj_msg.accelerations, vec![0.5, 0.5, 0.5]);

        // Every other field passes through untouched
        assert_eq!(traj_msg.positions, vec![1.0, 2.0, 3.0]);
        assert_eq!(traj_msg.velocities, vec![0.1, 0.2, 0.3]);
        assert_eq!(traj_msg.time_from_start_s, 2.5);
    }

    #[test]
    fn test_update_rejects_short_position_field() {
        let mut ctrl = test_ctrl(unit_params(-0.5, 0.5), vec![0.0, 0.0, 0.0]);

        let mut traj_msg = JointTrajectory {
            positions: vec![1.0],
            ..Default::default()
        };

        assert!(ctrl.update_joint_accelerations(&mut traj_msg).is_err());
        assert!(traj_msg.accelerations.is_empty());
    }

    #[test]
    fn test_group_accel_indices() {
        let ctrl = test_ctrl(unit_params(-0.5, 0.5), vec![0.0, 0.0, 0.0]);

        assert_eq!(ctrl.chest_accel_index(), 0);
        assert_eq!(ctrl.left_arm_accel_index(), 1);
        assert_eq!(ctrl.right_arm_accel_index(), 2);
    }
}
