//! Parameters for the controller executable

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters for the demo control loop.
#[derive(Debug, Default, Deserialize)]
pub struct Params {
    /// Number of control cycles to run before exiting.
    pub num_cycles: u64,

    /// Target full-body pose the demand is ramped towards, in global joint
    /// order.
    ///
    /// Units: radians
    pub target_positions_rad: Vec<f64>,

    /// Fraction of the run spent ramping the demand from zero to the target
    /// pose. The demand holds at the target afterwards.
    pub ramp_fraction: f64,
}
