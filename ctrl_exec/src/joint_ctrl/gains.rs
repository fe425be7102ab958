//! Gain store for JointCtrl
//!
//! Holds the per-joint PD coefficients and the per-joint acceleration
//! limits. Gains are mutable at run time, joint by joint or as whole
//! vectors; the acceleration limits are only (re)initialised through
//! [`GainStore::set_default_gains`].

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{DiagVec, InitError, JointCtrlError, Params};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Per-joint PD gains and acceleration limits.
#[derive(Debug, Clone)]
pub struct GainStore {
    k_p: DiagVec,
    k_d: DiagVec,
    min_accel: DiagVec,
    max_accel: DiagVec,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GainStore {
    /// Build a store holding the default gains and limits from the
    /// parameter set.
    pub fn from_params(params: &Params) -> Result<Self, InitError> {
        let size = params.default_kp.len();

        for (name, vec) in [
            ("default_kd", &params.default_kd),
            ("min_accel_radss", &params.min_accel_radss),
            ("max_accel_radss", &params.max_accel_radss),
        ]
        .iter()
        {
            if vec.len() != size {
                return Err(InitError::InvalidParams(format!(
                    "{} has {} entries but default_kp has {}",
                    name,
                    vec.len(),
                    size
                )));
            }
        }

        for i in 0..size {
            if params.min_accel_radss[i] > params.max_accel_radss[i] {
                return Err(InitError::InvalidParams(format!(
                    "min_accel_radss[{}] ({}) is above max_accel_radss[{}] ({})",
                    i, params.min_accel_radss[i], i, params.max_accel_radss[i]
                )));
            }
        }

        Ok(Self {
            k_p: DiagVec::from_slice(&params.default_kp),
            k_d: DiagVec::from_slice(&params.default_kd),
            min_accel: DiagVec::from_slice(&params.min_accel_radss),
            max_accel: DiagVec::from_slice(&params.max_accel_radss),
        })
    }

    /// Reload the default gains and acceleration limits from the parameter
    /// set, replacing whatever is currently stored.
    ///
    /// This is the only operation which touches the limits after
    /// construction.
    pub fn set_default_gains(&mut self, params: &Params) -> Result<(), InitError> {
        let defaults = Self::from_params(params)?;

        if defaults.size() != self.size() {
            return Err(InitError::InvalidParams(format!(
                "Parameter set is for {} joints but the store holds {}",
                defaults.size(),
                self.size()
            )));
        }

        *self = defaults;

        Ok(())
    }

    /// The configured default proportional gains, in global joint order.
    pub fn default_gains(params: &Params) -> Vec<f64> {
        params.default_kp.clone()
    }

    /// Number of joints the store holds gains for.
    pub fn size(&self) -> usize {
        self.k_p.len()
    }

    /// Proportional gain of a single joint.
    pub fn kp(&self, joint_index: usize) -> Result<f64, JointCtrlError> {
        self.check_index(joint_index)?;
        Ok(self.k_p[joint_index])
    }

    /// Derivative gain of a single joint.
    pub fn kd(&self, joint_index: usize) -> Result<f64, JointCtrlError> {
        self.check_index(joint_index)?;
        Ok(self.k_d[joint_index])
    }

    /// Overwrite the proportional gain of a single joint, leaving all others
    /// untouched.
    pub fn set_kp(&mut self, kp: f64, joint_index: usize) -> Result<(), JointCtrlError> {
        self.check_index(joint_index)?;
        self.k_p.set(joint_index, kp);
        Ok(())
    }

    /// Overwrite the derivative gain of a single joint, leaving all others
    /// untouched.
    pub fn set_kd(&mut self, kd: f64, joint_index: usize) -> Result<(), JointCtrlError> {
        self.check_index(joint_index)?;
        self.k_d.set(joint_index, kd);
        Ok(())
    }

    /// Full-length copy of the proportional gains, in global joint order.
    pub fn joints_kp(&self) -> Vec<f64> {
        self.k_p.to_vec()
    }

    /// Full-length copy of the derivative gains, in global joint order.
    pub fn joints_kd(&self) -> Vec<f64> {
        self.k_d.to_vec()
    }

    /// Replace the whole proportional gain vector.
    ///
    /// The replacement is all-or-nothing: on a size mismatch the stored
    /// gains are left untouched.
    pub fn set_joints_kp(&mut self, joints_kp: &[f64]) -> Result<(), JointCtrlError> {
        self.check_size(joints_kp)?;
        self.k_p = DiagVec::from_slice(joints_kp);
        Ok(())
    }

    /// Replace the whole derivative gain vector.
    ///
    /// The replacement is all-or-nothing: on a size mismatch the stored
    /// gains are left untouched.
    pub fn set_joints_kd(&mut self, joints_kd: &[f64]) -> Result<(), JointCtrlError> {
        self.check_size(joints_kd)?;
        self.k_d = DiagVec::from_slice(joints_kd);
        Ok(())
    }

    /// The proportional gain vector, for use by the control computation.
    pub(crate) fn kp_vec(&self) -> &DiagVec {
        &self.k_p
    }

    /// The derivative gain vector, for use by the control computation.
    pub(crate) fn kd_vec(&self) -> &DiagVec {
        &self.k_d
    }

    /// The per-joint acceleration limits, for use by the control
    /// computation.
    pub(crate) fn accel_limits(&self) -> (&DiagVec, &DiagVec) {
        (&self.min_accel, &self.max_accel)
    }

    fn check_index(&self, joint_index: usize) -> Result<(), JointCtrlError> {
        if joint_index >= self.size() {
            return Err(JointCtrlError::IndexOutOfRange {
                index: joint_index,
                size: self.size(),
            });
        }

        Ok(())
    }

    fn check_size(&self, vec: &[f64]) -> Result<(), JointCtrlError> {
        if vec.len() != self.size() {
            return Err(JointCtrlError::SizeMismatch {
                expected: self.size(),
                found: vec.len(),
            });
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn test_params() -> Params {
        Params {
            dt_s: 0.01,
            default_kp: vec![10.0, 20.0, 30.0],
            default_kd: vec![1.0, 2.0, 3.0],
            min_accel_radss: vec![-5.0, -5.0, -5.0],
            max_accel_radss: vec![5.0, 5.0, 5.0],
        }
    }

    #[test]
    fn test_per_joint_round_trip() {
        let mut store = GainStore::from_params(&test_params()).unwrap();

        store.set_kp(42.0, 1).unwrap();

        assert_eq!(store.kp(1).unwrap(), 42.0);

        // Other joints are untouched
        assert_eq!(store.kp(0).unwrap(), 10.0);
        assert_eq!(store.kp(2).unwrap(), 30.0);

        store.set_kd(0.5, 2).unwrap();
        assert_eq!(store.kd(2).unwrap(), 0.5);
        assert_eq!(store.kd(0).unwrap(), 1.0);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut store = GainStore::from_params(&test_params()).unwrap();

        assert!(matches!(
            store.kp(3),
            Err(JointCtrlError::IndexOutOfRange { index: 3, size: 3 })
        ));
        assert!(matches!(
            store.set_kd(1.0, 10),
            Err(JointCtrlError::IndexOutOfRange { index: 10, size: 3 })
        ));
    }

    #[test]
    fn test_bulk_round_trip() {
        let mut store = GainStore::from_params(&test_params()).unwrap();

        let new_kp = vec![1.0, 2.0, 3.0];
        store.set_joints_kp(&new_kp).unwrap();
        assert_eq!(store.joints_kp(), new_kp);

        let new_kd = vec![0.1, 0.2, 0.3];
        store.set_joints_kd(&new_kd).unwrap();
        assert_eq!(store.joints_kd(), new_kd);
    }

    #[test]
    fn test_bulk_set_is_all_or_nothing() {
        let mut store = GainStore::from_params(&test_params()).unwrap();

        let before = store.joints_kp();

        assert!(matches!(
            store.set_joints_kp(&[1.0, 2.0]),
            Err(JointCtrlError::SizeMismatch {
                expected: 3,
                found: 2
            })
        ));

        // Nothing may have been overwritten
        assert_eq!(store.joints_kp(), before);
    }

    #[test]
    fn test_default_gains_reload() {
        let params = test_params();
        let mut store = GainStore::from_params(&params).unwrap();

        store.set_joints_kp(&[0.0, 0.0, 0.0]).unwrap();
        store.set_default_gains(&params).unwrap();

        assert_eq!(store.joints_kp(), params.default_kp);
        assert_eq!(GainStore::default_gains(&params), params.default_kp);
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let mut params = test_params();
        params.min_accel_radss[1] = 6.0;

        assert!(matches!(
            GainStore::from_params(&params),
            Err(InitError::InvalidParams(_))
        ));
    }
}
