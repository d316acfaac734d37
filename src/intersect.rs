//! Intersections of a helix with planes and coaxial cylinders
//!
//! All queries consume a caller-supplied reference point on the helix and
//! return the crossing nearest to it along the direction of motion, as an
//! owned [`Crossing`] value.

use crate::{
    constants::CONFUSION,
    error::Error,
    helix::Helix,
    momentum::Position,
    numeric::Float,
    Result,
};

use prefix_num_ops::real::*;

/// Intersection of a helix with a plane or cylinder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Coordinates of the intersection point (mm)
    pub position: Position,

    /// Generic time: 3D path length from the reference point to the
    /// intersection, divided by the total momentum. Negative when the
    /// crossing lies behind the reference point along the direction of
    /// motion, which can only happen for the horizontal-plane query and for
    /// straight-line fallbacks; circular-arc crossings are always taken
    /// forward.
    pub time: Float,
}

impl Helix {
    /// Intersection with a plane parallel to the z axis
    ///
    /// The plane is defined by a point `(x0, y0)` of its XY trace and the
    /// in-plane normal `(ax, ay)`. Of the up to two crossings of the
    /// projected circle with the trace, the one at the smallest forward arc
    /// from `reference` is returned.
    ///
    /// Fails with [`Error::NoIntersection`] when the plane does not reach
    /// the projected circle, and with [`Error::DegenerateGeometry`] for a
    /// zero normal.
    pub fn point_in_xy(
        &self,
        x0: Float,
        y0: Float,
        ax: Float,
        ay: Float,
        reference: &Position,
    ) -> Result<Crossing> {
        let normal_norm = hypot(ax, ay);
        if normal_norm < CONFUSION {
            return Err(Error::DegenerateGeometry("zero plane normal"));
        }
        let (nx, ny) = (ax / normal_norm, ay / normal_norm);

        if self.is_line() {
            // The trajectory projects to a single XY point: it crosses the
            // plane only by lying inside it
            let offset = nx * (self.x_centre() - x0) + ny * (self.y_centre() - y0);
            if abs(offset) > CONFUSION {
                return Err(Error::NoIntersection(
                    "vertical plane misses the straight trajectory",
                ));
            }
            return Ok(Crossing {
                position: Position::new(self.x_centre(), self.y_centre(), reference.z),
                time: 0.,
            });
        }

        // Circle-line intersection: signed distance from the centre to the
        // trace, then the half-chord on either side of the foot point
        let offset = nx * (self.x_centre() - x0) + ny * (self.y_centre() - y0);
        let half_chord_2 = self.radius() * self.radius() - offset * offset;
        if half_chord_2 < 0. && abs(offset) - self.radius() > CONFUSION {
            return Err(Error::NoIntersection("vertical plane misses the circle"));
        }
        // Near-tangent configurations collapse to the single tangency point
        let half_chord = sqrt(max(half_chord_2, 0.));
        let foot = (self.x_centre() - offset * nx, self.y_centre() - offset * ny);
        let along = (-ny, nx);
        let candidates = [
            (foot.0 + half_chord * along.0, foot.1 + half_chord * along.1),
            (foot.0 - half_chord * along.0, foot.1 - half_chord * along.1),
        ];
        Ok(self.forward_crossing(&candidates, reference))
    }

    /// Intersection with a plane perpendicular to the z axis
    ///
    /// Since z varies linearly with path length, the solve is closed-form
    /// and unambiguous; the returned time is negative when `z_line` lies
    /// behind the reference point along the motion.
    ///
    /// Fails with [`Error::NoIntersection`] only when the trajectory is
    /// confined to a different z plane.
    pub fn point_in_z(&self, z_line: Float, reference: &Position) -> Result<Crossing> {
        if self.is_line() {
            // Straight vertical line: every z is reached
            let position = Position::new(self.x_centre(), self.y_centre(), z_line);
            return Ok(Crossing {
                position,
                time: (z_line - reference.z) / self.momentum().z,
            });
        }
        if self.b_z() == 0. {
            // The trajectory never leaves its z plane
            if abs(z_line - reference.z) > CONFUSION {
                return Err(Error::NoIntersection("helix confined to another z plane"));
            }
            return Ok(Crossing {
                position: *reference,
                time: 0.,
            });
        }

        let delta_z = z_line - reference.z;
        let arc_xy = delta_z / self.tan_lambda();
        let phase = self.phase_of(reference.x, reference.y)
            - self.rotation_sense() * arc_xy / self.radius();
        let (x, y) = self.xy_at_phase(phase);
        let path = arc_xy * self.slope_factor();
        Ok(Crossing {
            position: Position::new(x, y, z_line),
            time: path / self.total_momentum(),
        })
    }

    /// Intersection with a cylinder of radius `cylinder_radius` coaxial with
    /// the z axis
    ///
    /// Solved as a two-circle intersection in the XY projection via the
    /// radical line; of the up to two crossings, the one at the smallest
    /// forward arc from `reference` is returned.
    ///
    /// Fails with [`Error::NoIntersection`] when the cylinder does not reach
    /// the projected circle, and with [`Error::DegenerateGeometry`] for a
    /// negative cylinder radius.
    pub fn point_on_cylinder(
        &self,
        cylinder_radius: Float,
        reference: &Position,
    ) -> Result<Crossing> {
        if cylinder_radius < 0. {
            return Err(Error::DegenerateGeometry("negative cylinder radius"));
        }

        let centre_dist = hypot(self.x_centre(), self.y_centre());

        if self.is_line() {
            // Straight vertical line: on the cylinder surface or not at all
            if abs(centre_dist - cylinder_radius) > CONFUSION {
                return Err(Error::NoIntersection(
                    "cylinder misses the straight trajectory",
                ));
            }
            return Ok(Crossing {
                position: Position::new(self.x_centre(), self.y_centre(), reference.z),
                time: 0.,
            });
        }

        if centre_dist < CONFUSION {
            // Concentric circles: either coincident or disjoint
            if abs(self.radius() - cylinder_radius) > CONFUSION {
                return Err(Error::NoIntersection("concentric circles do not touch"));
            }
            return Ok(Crossing {
                position: *reference,
                time: 0.,
            });
        }

        // Radical-line solution of the two-circle intersection, centred on
        // the origin and looking towards the track circle centre
        let along = (self.x_centre() / centre_dist, self.y_centre() / centre_dist);
        let radical = (centre_dist * centre_dist + cylinder_radius * cylinder_radius
            - self.radius() * self.radius())
            / (2. * centre_dist);
        // The circles intersect iff |radius - R| <= centre_dist <= radius + R
        let half_chord_2 = cylinder_radius * cylinder_radius - radical * radical;
        let miss = max(
            centre_dist - (self.radius() + cylinder_radius),
            abs(self.radius() - cylinder_radius) - centre_dist,
        );
        if half_chord_2 < 0. && miss > CONFUSION {
            return Err(Error::NoIntersection("cylinder does not reach the circle"));
        }
        let half_chord = sqrt(max(half_chord_2, 0.));
        let across = (-along.1, along.0);
        let candidates = [
            (
                radical * along.0 + half_chord * across.0,
                radical * along.1 + half_chord * across.1,
            ),
            (
                radical * along.0 - half_chord * across.0,
                radical * along.1 - half_chord * across.1,
            ),
        ];
        Ok(self.forward_crossing(&candidates, reference))
    }

    /// Of the candidate XY points on the circle, pick the one at the
    /// smallest forward arc from the reference point, and propagate z along
    /// the pitch to build the crossing
    fn forward_crossing(&self, candidates: &[(Float, Float)], reference: &Position) -> Crossing {
        let phase_ref = self.phase_of(reference.x, reference.y);
        let mut best: Option<(Float, (Float, Float))> = None;
        for &(x, y) in candidates {
            let arc = self.forward_arc(phase_ref, self.phase_of(x, y));
            if best.map_or(true, |(best_arc, _)| arc < best_arc) {
                best = Some((arc, (x, y)));
            }
        }
        let (arc, (x, y)) = best.expect("at least one candidate");
        let z = if self.b_z() == 0. {
            reference.z
        } else {
            reference.z + arc * self.tan_lambda()
        };
        Crossing {
            position: Position::new(x, y, z),
            time: arc * self.slope_factor() / self.total_momentum(),
        }
    }
}
