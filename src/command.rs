use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One 6-DOF velocity/pose sample, published once per tick.
///
/// Only the fields a move drives are non-zero; everything else stays at the
/// neutral pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub linear: Vector3<f64>,
    pub angular: Vector3<f64>,
}

impl Command {
    /// The neutral command: all six fields zero.
    pub fn zero() -> Self {
        Self {
            linear: Vector3::zeros(),
            angular: Vector3::zeros(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.linear == Vector3::zeros() && self.angular == Vector3::zeros()
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::zero()
    }
}
