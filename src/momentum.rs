//! This module implements some domain-specific 3-momentum handling logic.

use crate::numeric::Float;
use nalgebra::Vector3;

use prefix_num_ops::real::*;

/// Spatial 3-momentum (px, py, pz), in GeV
pub type Momentum = Vector3<Float>;

/// Spatial position (x, y, z), in mm
pub type Position = Vector3<Float>;

/// Azimuth of a vector's transverse (XY) projection, in (-pi, pi]
pub fn azimuth(v: &Vector3<Float>) -> Float {
    atan2(v.y, v.x)
}

/// Transverse (XY) magnitude of a vector
pub fn transverse(v: &Vector3<Float>) -> Float {
    hypot(v.x, v.y)
}
