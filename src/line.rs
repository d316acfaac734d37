//! Minimal infinite straight line in 3D
//!
//! The one external collaborator of [`crate::Helix`]: a parametric line
//! `P(t) = point + t * direction`, consumed by the helix-line
//! closest-approach query.

use crate::{
    constants::CONFUSION,
    error::Error,
    momentum::Position,
    numeric::Float,
    Result,
};

use nalgebra::Vector3;

/// An infinite straight line in 3D space, immutable after construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// A point on the line
    point: Position,

    /// Unit direction vector
    direction: Vector3<Float>,
}
//
impl Line {
    /// Build a line from a point and a direction
    ///
    /// The direction is normalized on construction; a zero direction does
    /// not define a line and is rejected.
    pub fn new(point: Position, direction: Vector3<Float>) -> Result<Self> {
        let norm = direction.norm();
        if norm < CONFUSION {
            return Err(Error::DegenerateGeometry("zero line direction"));
        }
        Ok(Self {
            point,
            direction: direction / norm,
        })
    }

    /// Access the stored point on the line
    pub fn point(&self) -> &Position {
        &self.point
    }

    /// Access the unit direction of the line
    pub fn direction(&self) -> &Vector3<Float> {
        &self.direction
    }

    /// Perpendicular distance from an arbitrary point to the line
    pub fn distance_to(&self, target: &Position) -> Float {
        let rel = target - self.point;
        (rel - self.direction * rel.dot(&self.direction)).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn direction_is_normalized() {
        let line = Line::new(Vector3::zeros(), Vector3::new(0., 0., 5.)).unwrap();
        assert_relative_eq!(line.direction().norm(), 1.);
        assert_relative_eq!(line.direction().z, 1.);
    }

    #[test]
    fn zero_direction_is_rejected() {
        let result = Line::new(Vector3::zeros(), Vector3::zeros());
        assert!(matches!(result, Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn distance_to_off_axis_point() {
        let line = Line::new(Vector3::zeros(), Vector3::z()).unwrap();
        let dist = line.distance_to(&Vector3::new(3., 4., 17.));
        assert_relative_eq!(dist, 5.);
    }
}
