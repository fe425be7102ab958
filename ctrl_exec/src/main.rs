//! # Joint Controller Executable
//!
//! This executable runs the whole-body joint angle controller against a
//! simulated robot: the desired pose is ramped from zero to a target, the
//! controller converts the position demands into per-joint acceleration
//! commands, and the simulated robot integrates them. Cycle data are
//! archived into the session directory.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Parameters for the controller executable.
mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use log::{info, trace, warn};

// Internal
use ctrl_lib::joint_ctrl::{InitData, InputData, JointCtrl};
use ctrl_lib::sim_state::SimJointState;
use robot_if::{JointTrajectory, RobotDescription, RobotState};
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    maths::{clamp, lin_map},
    module::State,
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("ctrl_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Joint Controller Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    info!("Initialising...");

    // ---- LOAD PARAMETERS ----

    let exec_params: params::Params = util::params::load("ctrl_exec.toml")?;
    let desc: RobotDescription = util::params::load("robot_desc.toml")?;

    info!("Parameters loaded");
    info!("    Robot has {} joints", desc.total_joints());

    // ---- CONTROLLER INITIALISATION ----

    let sim = SimJointState::new(desc.total_joints());

    let mut ctrl = JointCtrl::init(
        InitData {
            param_file: "joint_ctrl.toml",
            desc,
            state_informer: Box::new(sim.clone()),
        },
        &session,
    )
    .wrap_err("Failed to initialise the joint controller")?;

    let dt_s = ctrl.dt_s();

    info!("Controller initialised (dt = {} s)", dt_s);
    info!(
        "    Group indices: chest = {}, left arm = {}, right arm = {}",
        ctrl.chest_accel_index(),
        ctrl.left_arm_accel_index(),
        ctrl.right_arm_accel_index()
    );

    // ---- MAIN LOOP ----

    info!("Initialisation complete, entering control loop");

    let ramp_cycles = (exec_params.num_cycles as f64 * exec_params.ramp_fraction).max(1.0);

    for cycle in 0..exec_params.num_cycles {
        // Ramp the demand from zero up to the target pose, then hold
        let ramp = clamp(&(cycle as f64 / ramp_cycles), &0.0, &1.0);
        let desired_positions: Vec<f64> = exec_params
            .target_positions_rad
            .iter()
            .map(|target| lin_map((0.0, 1.0), (0.0, *target), ramp))
            .collect();

        let (accelerations, report) = ctrl
            .proc(&InputData { desired_positions })
            .wrap_err("Control cycle processing failed")?;

        // Drive the simulated robot with the commanded accelerations
        sim.integrate(&accelerations, dt_s);

        if report.accel_limited.iter().any(|l| *l) {
            trace!("Cycle {}: acceleration limits active", cycle);
        }

        if let Err(e) = ctrl.write() {
            warn!("Failed to archive cycle data: {}", e);
        }
    }

    info!("Control loop complete");
    info!("    Final pose: {:?}", sim.joint_positions());

    // ---- TRAJECTORY MESSAGE DEMO ----

    // Fill in the acceleration field of a trajectory point holding the
    // target pose, as the motion stack would request it
    let mut traj_msg = JointTrajectory {
        joint_names: ctrl.index_map().joint_names(),
        positions: exec_params.target_positions_rad.clone(),
        velocities: vec![0.0; exec_params.target_positions_rad.len()],
        accelerations: vec![0.0; exec_params.target_positions_rad.len()],
        time_from_start_s: exec_params.num_cycles as f64 * dt_s,
    };

    ctrl.update_joint_accelerations(&mut traj_msg)
        .wrap_err("Failed to update the trajectory message")?;

    info!(
        "Trajectory point accelerations (chest slice): {:?}",
        &traj_msg.accelerations[ctrl.chest_accel_index()..ctrl.left_arm_accel_index()]
    );

    info!("Complete");

    Ok(())
}
