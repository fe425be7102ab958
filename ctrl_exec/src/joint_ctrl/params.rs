//! Parameters structure for JointCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Joint angle control.
///
/// All per-joint vectors are in global joint order (chest, left arm, right
/// arm) and must have one entry per joint.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- TIMING ----
    /// The fixed control cycle timestep, used in the error derivative
    /// estimate. Constant for the controller's lifetime.
    ///
    /// Units: seconds
    pub dt_s: f64,

    // ---- GAINS ----
    /// Default per-joint proportional gain.
    pub default_kp: Vec<f64>,

    /// Default per-joint derivative gain.
    pub default_kd: Vec<f64>,

    // ---- CAPABILITIES ----
    /// Lowest commandable acceleration per joint (most negative value).
    ///
    /// Units: radians/second^2
    pub min_accel_radss: Vec<f64>,

    /// Highest commandable acceleration per joint (most positive value).
    ///
    /// Units: radians/second^2
    pub max_accel_radss: Vec<f64>,
}
