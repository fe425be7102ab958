//! Elementwise algebra over per-joint quantities
//!
//! A [`DiagVec`] is a length-N vector with one scalar channel per joint.
//! Semantically it is the diagonal of an N x N diagonal matrix: every
//! operation acts channel by channel and there are never any cross-joint
//! terms. Keeping the quantities as plain vectors avoids round-tripping
//! through a dense matrix for what is conceptually a per-channel operation.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::DVector;
use serde::Serialize;
use std::ops::{Add, Div, Index, Sub};

// Internal
use util::maths;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A per-joint quantity (position, error, gain, output, ...), one scalar
/// channel per joint, in global joint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagVec(DVector<f64>);

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DiagVec {
    /// Create a zero-initialised quantity with one channel per joint.
    pub fn zeros(size: usize) -> Self {
        Self(DVector::zeros(size))
    }

    /// Create a quantity from a slice, one channel per slice element.
    pub fn from_slice(values: &[f64]) -> Self {
        Self(DVector::from_column_slice(values))
    }

    /// The number of channels (joints).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.len() == 0
    }

    /// Copy the channels out into a plain vector in global joint order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.iter().copied().collect()
    }

    /// Overwrite a single channel.
    ///
    /// # Panics
    /// - If `index` is outside the vector. Callers are expected to have
    ///   validated the index against the joint count first.
    pub fn set(&mut self, index: usize, value: f64) {
        self.0[index] = value;
    }

    /// Elementwise product of two per-joint quantities.
    ///
    /// This is the product of two diagonal matrices collapsed to its
    /// diagonal: `out[i] = self[i] * other[i]` for every channel, with no
    /// cross-channel terms.
    pub fn mul_elem(&self, other: &Self) -> Self {
        Self(self.0.component_mul(&other.0))
    }

    /// Clamp each channel into `[min[i], max[i]]` in place.
    ///
    /// Returns one flag per channel, raised where the channel was outside
    /// its bounds and had to be saturated.
    pub fn clamp_to(&mut self, min: &Self, max: &Self) -> Vec<bool> {
        let mut limited = vec![false; self.len()];

        for i in 0..self.len() {
            let clamped = maths::clamp(&self.0[i], &min.0[i], &max.0[i]);

            if clamped != self.0[i] {
                self.0[i] = clamped;
                limited[i] = true;
            }
        }

        limited
    }
}

impl Add for &DiagVec {
    type Output = DiagVec;

    fn add(self, other: &DiagVec) -> DiagVec {
        DiagVec(&self.0 + &other.0)
    }
}

impl Sub for &DiagVec {
    type Output = DiagVec;

    fn sub(self, other: &DiagVec) -> DiagVec {
        DiagVec(&self.0 - &other.0)
    }
}

impl Div<f64> for &DiagVec {
    type Output = DiagVec;

    /// True floating-point division of every channel by the scaler.
    fn div(self, scaler: f64) -> DiagVec {
        DiagVec(self.0.map(|v| v / scaler))
    }
}

impl Index<usize> for DiagVec {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::DMatrix;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_elementwise_matches_diagonal_matrix_product() {
        let a = DiagVec::from_slice(&[1.5, -2.0, 0.0, 3.25, 100.0]);
        let b = DiagVec::from_slice(&[2.0, 4.0, -7.5, 0.5, -0.01]);

        let elementwise = a.mul_elem(&b);

        // The same product expressed through a dense diagonal matrix
        let dense = DMatrix::from_diagonal(&a.0) * &b.0;

        for i in 0..a.len() {
            assert!((elementwise[i] - dense[i]).abs() < EPSILON);
        }
    }

    #[test]
    fn test_add_sub() {
        let a = DiagVec::from_slice(&[1.0, 2.0, 3.0]);
        let b = DiagVec::from_slice(&[0.5, -2.0, 1.0]);

        assert_eq!((&a + &b).to_vec(), vec![1.5, 0.0, 4.0]);
        assert_eq!((&a - &b).to_vec(), vec![0.5, 4.0, 2.0]);
    }

    #[test]
    fn test_scaler_division_is_floating_point() {
        let a = DiagVec::from_slice(&[1.0, 3.0, -5.0]);

        // Division by an integral scaler must not truncate
        let half = &a / 2.0;

        assert_eq!(half.to_vec(), vec![0.5, 1.5, -2.5]);
    }

    #[test]
    fn test_clamp_limits_and_flags() {
        let min = DiagVec::from_slice(&[-1.0, -1.0, -1.0]);
        let max = DiagVec::from_slice(&[1.0, 1.0, 1.0]);

        let mut v = DiagVec::from_slice(&[-3.0, 0.25, 7.0]);
        let limited = v.clamp_to(&min, &max);

        assert_eq!(v.to_vec(), vec![-1.0, 0.25, 1.0]);
        assert_eq!(limited, vec![true, false, true]);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let min = DiagVec::from_slice(&[-0.5, -0.5]);
        let max = DiagVec::from_slice(&[0.5, 0.5]);

        let mut v = DiagVec::from_slice(&[10.0, -10.0]);
        v.clamp_to(&min, &max);

        let once = v.clone();
        let limited = v.clamp_to(&min, &max);

        assert_eq!(v, once);
        assert_eq!(limited, vec![false, false]);
    }
}
