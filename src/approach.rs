//! Closest-approach queries: helix to point, helix, and line
//!
//! The transverse part of each query is closed-form circle geometry; the
//! longitudinal part couples in through the pitch, so the full 3D minima are
//! found by bounded 1D golden-section searches over the position phase,
//! seeded from the closed-form transverse solution. The helix-helix query
//! alternates nearest-point projections between the two trajectories, with a
//! documented tolerance and iteration cap.

use crate::{
    constants::{
        APPROACH_TOLERANCE, CONFUSION, MAX_APPROACH_ITERATIONS, MAX_PHASE_ITERATIONS,
        PHASE_TOLERANCE,
    },
    error::Error,
    helix::{wrap_tau, Helix},
    line::Line,
    momentum::{Momentum, Position},
    numeric::{floats::consts::{PI, TAU}, Float},
    Result,
};

use prefix_num_ops::real::*;

/// Distances from a helix to a point, in the projections used by tracking
/// code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedDistances {
    /// Perpendicular distance from the point's XY projection to the
    /// trajectory circle (mm)
    pub r_phi: Float,

    /// z mismatch at the transverse-nearest point of the helix, on the turn
    /// whose z is nearest to the point (mm)
    pub z: Float,

    /// True minimum 3D distance between the point and the helix (mm). The
    /// transverse and longitudinal nearest points generally differ, so this
    /// is not the norm of the other two components.
    pub three_d: Float,
}

/// Point of closest approach between two trajectories
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixApproach {
    /// Midpoint of the closest point pair (mm)
    pub position: Position,

    /// Vector sum of the momenta extrapolated to the two closest points
    /// (GeV), as used for two-track vertex candidates
    pub momentum: Momentum,

    /// Distance between the two trajectories at closest approach (mm)
    pub distance: Float,
}

impl Helix {
    /// Distances of closest approach to an arbitrary 3D point, in the R-Phi
    /// projection, along z, and in full 3D
    ///
    /// The 3D component is minimized over the position phase by a bounded
    /// golden-section search started on the z-nearest turn and its two
    /// neighbours; the search is deterministic and cannot fail.
    pub fn distance_to_point(&self, point: &Position) -> ProjectedDistances {
        if self.is_line() {
            // Vertical line: transverse offset only, every z is reached
            let r_phi = hypot(point.x - self.x_centre(), point.y - self.y_centre());
            return ProjectedDistances {
                r_phi,
                z: 0.,
                three_d: r_phi,
            };
        }

        let rho = hypot(point.x - self.x_centre(), point.y - self.y_centre());
        let r_phi = abs(rho - self.radius());
        let phase_nearest = atan2(point.y - self.y_centre(), point.x - self.x_centre());
        let z_nearest = self.z_at_phase_near(phase_nearest, point.z);
        let z = abs(z_nearest - point.z);

        let (_, closest) = self.closest_point_to(point);
        ProjectedDistances {
            r_phi,
            z,
            three_d: (closest - point).norm(),
        }
    }

    /// Point of closest approach to another helix, as used to reconstruct
    /// two-track decay vertices
    ///
    /// The first estimate comes from the XY circle-circle geometry (radical
    /// line for overlapping circles, the centre line for disjoint ones, with
    /// z-turn matching); it is refined by alternating nearest-point
    /// projections between the two trajectories until an iteration improves
    /// the pair distance by less than [`APPROACH_TOLERANCE`]. Exhausting
    /// [`MAX_APPROACH_ITERATIONS`] while the distance is still improving is
    /// reported as [`Error::NonConvergence`].
    ///
    /// The returned position is the midpoint of the closest point pair and
    /// the momentum is the vector sum of the momenta extrapolated to the two
    /// points.
    pub fn distance_to_helix(&self, other: &Helix) -> Result<HelixApproach> {
        if self.is_line() && other.is_line() {
            // Two vertical lines: the separation is purely transverse and
            // constant in z; centre the answer between the reference points
            let p = Position::new(
                self.x_centre(),
                self.y_centre(),
                self.reference_point().z,
            );
            let q = Position::new(
                other.x_centre(),
                other.y_centre(),
                other.reference_point().z,
            );
            let z_mid = 0.5 * (p.z + q.z);
            return Ok(HelixApproach {
                position: Position::new(0.5 * (p.x + q.x), 0.5 * (p.y + q.y), z_mid),
                momentum: self.momentum() + other.momentum(),
                distance: hypot(q.x - p.x, q.y - p.y),
            });
        }

        // Seed targets near the other trajectory from the XY two-circle
        // geometry, then let the alternating projections do the fine work
        let mut seeds = vec![*other.reference_point(), *self.reference_point()];
        if !self.is_line() && !other.is_line() {
            seeds.extend(circle_circle_seeds(self, other));
        }

        let mut best: Option<(Position, Position)> = None;
        let mut last_residual = Float::INFINITY;
        for seed in &seeds {
            match self.alternating_approach(other, seed) {
                Ok((p, q)) => {
                    let better = match &best {
                        Some((bp, bq)) => (p - q).norm() < (bp - bq).norm(),
                        None => true,
                    };
                    if better {
                        best = Some((p, q));
                    }
                }
                Err(residual) => last_residual = min(last_residual, residual),
            }
        }

        let (p, q) = best.ok_or(Error::NonConvergence {
            residual: last_residual,
        })?;
        Ok(HelixApproach {
            position: 0.5 * (p + q),
            momentum: self.extrapolated_momentum(&p) + other.extrapolated_momentum(&q),
            distance: (p - q).norm(),
        })
    }

    /// Distance of closest approach to a straight line
    ///
    /// For a fixed helix phase the point-to-line distance is closed-form, so
    /// only the phase is searched: a coarse scan over the window followed by
    /// golden-section refinement around the best sample. The window covers
    /// one full turn around the reference point, or the phase span of the
    /// track-segment edges when they are set.
    pub fn distance_to_line(&self, line: &Line) -> Float {
        if self.is_line() {
            // Distance between two straight lines; ours runs along z
            let origin = Position::new(
                self.x_centre(),
                self.y_centre(),
                self.reference_point().z,
            );
            let axis = Momentum::new(0., 0., 1.);
            let normal = axis.cross(line.direction());
            let rel = line.point() - origin;
            return if normal.norm() < CONFUSION {
                // Parallel lines: any perpendicular will do
                (rel - axis * rel.dot(&axis)).norm()
            } else {
                abs(rel.dot(&normal)) / normal.norm()
            };
        }

        let (lo, hi) = self.line_search_window();
        const COARSE_SAMPLES: usize = 64;
        let step = (hi - lo) / COARSE_SAMPLES as Float;
        let mut best_idx = 0;
        let mut best_dist = Float::INFINITY;
        for idx in 0..=COARSE_SAMPLES {
            let phase = lo + step * idx as Float;
            let dist = line.distance_to(&self.position_at_unwrapped_phase(phase));
            if dist < best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }
        let refine_lo = lo + step * (best_idx.saturating_sub(1)) as Float;
        let refine_hi = lo + step * min((best_idx + 1) as Float, COARSE_SAMPLES as Float);
        let (_, dist) = golden_minimize(
            |phase| line.distance_to(&self.position_at_unwrapped_phase(phase)),
            refine_lo,
            refine_hi,
        );
        dist
    }

    /// Momentum the particle would have at an arbitrary point, were it
    /// moving through that point along this same helix
    ///
    /// Only the azimuth of the transverse momentum depends on the phase; pz
    /// and the transverse magnitude are invariant. A point projecting onto
    /// the circle centre does not select a phase and falls back to the
    /// stored momentum.
    pub fn extrapolated_momentum(&self, point: &Position) -> Momentum {
        if self.is_line() {
            return *self.momentum();
        }
        let dx = point.x - self.x_centre();
        let dy = point.y - self.y_centre();
        if hypot(dx, dy) < CONFUSION {
            return *self.momentum();
        }
        self.momentum_at_phase(atan2(dy, dx))
    }

    /// Closest point of the trajectory to a 3D target, with its unwrapped
    /// phase
    ///
    /// Minimizes the squared 3D distance over the phase on the z-nearest
    /// turn and its two neighbours.
    pub(crate) fn closest_point_to(&self, target: &Position) -> (Float, Position) {
        if self.is_line() {
            return (
                0.,
                Position::new(self.x_centre(), self.y_centre(), target.z),
            );
        }

        let phase_nearest = atan2(target.y - self.y_centre(), target.x - self.x_centre());
        if self.b_z() == 0. {
            // Planar trajectory: the transverse-nearest point is the answer
            let (x, y) = self.xy_at_phase(phase_nearest);
            return (
                phase_nearest,
                Position::new(x, y, self.reference_point().z),
            );
        }

        // Unwrapped phase of the turn whose z is nearest the target
        let z_turn = self.z_at_phase_near(phase_nearest, target.z);
        let phase_turn = self.b_z() * z_turn + self.phi_z();

        let squared_dist = |phase: Float| {
            let pos = self.position_at_unwrapped_phase(phase);
            (pos - target).norm_squared()
        };
        let mut best: Option<(Float, Float)> = None;
        for turn in [-1., 0., 1.] {
            let centre = phase_turn + TAU * turn;
            let (phase, dist2) = golden_minimize(squared_dist, centre - PI, centre + PI);
            if best.map_or(true, |(_, best_dist2)| dist2 < best_dist2) {
                best = Some((phase, dist2));
            }
        }
        let (phase, _) = best.expect("three candidate turns were searched");
        (phase, self.position_at_unwrapped_phase(phase))
    }

    /// One run of the alternating-projection solver from a seed target
    ///
    /// The projections shrink the pair distance monotonically but only
    /// linearly, so the iterate displacement is a poor stopping signal: it
    /// can plateau well above micron scale while the distance itself is
    /// already converged. The solver therefore stops once an iteration
    /// improves the pair distance by less than [`APPROACH_TOLERANCE`].
    /// Returns the closest point pair (on self, on other), or the last
    /// improvement when the iteration cap is exhausted while still
    /// improving.
    fn alternating_approach(
        &self,
        other: &Helix,
        seed: &Position,
    ) -> std::result::Result<(Position, Position), Float> {
        let (_, mut p) = self.closest_point_to(seed);
        let (_, mut q) = other.closest_point_to(&p);
        let mut distance = (p - q).norm();
        let mut improvement = Float::INFINITY;
        for _ in 0..MAX_APPROACH_ITERATIONS {
            let (_, p_next) = self.closest_point_to(&q);
            let (_, q_next) = other.closest_point_to(&p_next);
            let next_distance = (p_next - q_next).norm();
            improvement = distance - next_distance;
            p = p_next;
            q = q_next;
            distance = next_distance;
            if improvement < APPROACH_TOLERANCE {
                return Ok((p, q));
            }
        }
        Err(improvement)
    }

    /// Phase window for the line search: the span of the stored edges when
    /// set, one full turn around the reference point otherwise
    fn line_search_window(&self) -> (Float, Float) {
        if self.b_z() != 0. {
            if let (Some(start), Some(end)) = (self.starting_point(), self.end_point()) {
                let phase_start = self.b_z() * start.z + self.phi_z();
                let phase_end = self.b_z() * end.z + self.phi_z();
                if abs(phase_end - phase_start) > PHASE_TOLERANCE {
                    return (min(phase_start, phase_end), max(phase_start, phase_end));
                }
            }
            let phase_ref = self.b_z() * self.reference_point().z + self.phi_z();
            (phase_ref - PI, phase_ref + PI)
        } else {
            if let (Some(start), Some(end)) = (self.starting_point(), self.end_point()) {
                // No z lever arm on a planar trajectory: the edge phases
                // come from the XY positions, with the arc walked forward
                // from the start along the rotation sense
                let phase_start = self.phase_of(start.x, start.y);
                let span =
                    wrap_tau(-self.rotation_sense() * (self.phase_of(end.x, end.y) - phase_start));
                if span > PHASE_TOLERANCE {
                    return if self.rotation_sense() > 0. {
                        (phase_start - span, phase_start)
                    } else {
                        (phase_start, phase_start + span)
                    };
                }
            }
            let phase_ref = self.phase_of(self.reference_point().x, self.reference_point().y);
            (phase_ref - PI, phase_ref + PI)
        }
    }
}

/// Seed points near `other` for the helix-helix solver, from the XY
/// two-circle geometry: the radical-line intersections when the circles
/// overlap, the nearest rim point along the centre line otherwise. Each XY
/// candidate is lifted to 3D on the turn of `other` nearest its reference z.
fn circle_circle_seeds(helix: &Helix, other: &Helix) -> Vec<Position> {
    let dx = other.x_centre() - helix.x_centre();
    let dy = other.y_centre() - helix.y_centre();
    let dist = hypot(dx, dy);

    let mut candidates: Vec<(Float, Float)> = Vec::new();
    if dist < CONFUSION {
        // Concentric circles: no direction is distinguished, the reference
        // seed alone has to do
        return Vec::new();
    }
    let along = (dx / dist, dy / dist);

    let overlapping = dist <= helix.radius() + other.radius()
        && dist >= abs(helix.radius() - other.radius());
    if overlapping {
        let radical = (dist * dist + helix.radius() * helix.radius()
            - other.radius() * other.radius())
            / (2. * dist);
        let half_chord = sqrt(max(helix.radius() * helix.radius() - radical * radical, 0.));
        let foot = (
            helix.x_centre() + radical * along.0,
            helix.y_centre() + radical * along.1,
        );
        let across = (-along.1, along.0);
        candidates.push((foot.0 + half_chord * across.0, foot.1 + half_chord * across.1));
        candidates.push((foot.0 - half_chord * across.0, foot.1 - half_chord * across.1));
    } else {
        // Disjoint circles: the rim point of `other` nearest our circle
        let towards = (
            other.x_centre() - other.radius() * along.0,
            other.y_centre() - other.radius() * along.1,
        );
        let away = (
            other.x_centre() + other.radius() * along.0,
            other.y_centre() + other.radius() * along.1,
        );
        let rim_gap = |point: &(Float, Float)| {
            abs(hypot(point.0 - helix.x_centre(), point.1 - helix.y_centre()) - helix.radius())
        };
        candidates.push(if rim_gap(&towards) <= rim_gap(&away) {
            towards
        } else {
            away
        });
    }

    let z_near = other.reference_point().z;
    candidates
        .into_iter()
        .map(|(x, y)| {
            let phase = atan2(y - other.y_centre(), x - other.x_centre());
            Position::new(x, y, other.z_at_phase_near(phase, z_near))
        })
        .collect()
}

/// Golden-section minimization of a unimodal function over a bracket
///
/// Runs at most [`MAX_PHASE_ITERATIONS`] shrinks or until the bracket is
/// below [`PHASE_TOLERANCE`]; deterministic, no failure mode.
fn golden_minimize(
    objective: impl Fn(Float) -> Float,
    mut lo: Float,
    mut hi: Float,
) -> (Float, Float) {
    const INV_PHI: Float = 0.618_033_988_749_894_8;
    let mut inner_lo = hi - INV_PHI * (hi - lo);
    let mut inner_hi = lo + INV_PHI * (hi - lo);
    let mut f_lo = objective(inner_lo);
    let mut f_hi = objective(inner_hi);
    for _ in 0..MAX_PHASE_ITERATIONS {
        if hi - lo < PHASE_TOLERANCE {
            break;
        }
        if f_lo < f_hi {
            hi = inner_hi;
            inner_hi = inner_lo;
            f_hi = f_lo;
            inner_lo = hi - INV_PHI * (hi - lo);
            f_lo = objective(inner_lo);
        } else {
            lo = inner_lo;
            inner_lo = inner_hi;
            f_lo = f_hi;
            inner_hi = lo + INV_PHI * (hi - lo);
            f_hi = objective(inner_hi);
        }
    }
    let mid = 0.5 * (lo + hi);
    (mid, objective(mid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use prefix_num_ops::real::hypot;

    fn sample_helix() -> Helix {
        let pos = Position::new(0., 0., 0.);
        let mom = Momentum::new(1., 0., 0.5);
        Helix::from_vp(&pos, &mom, 1., 3.5).unwrap()
    }

    #[test]
    fn point_on_the_helix_is_at_zero_distance() {
        let helix = sample_helix();
        // Walk to a known point of the trajectory via the z crossing
        let on_helix = helix
            .point_in_z(35., helix.reference_point())
            .unwrap()
            .position;
        let distances = helix.distance_to_point(&on_helix);
        assert_abs_diff_eq!(distances.r_phi, 0., epsilon = 1e-6);
        assert_abs_diff_eq!(distances.z, 0., epsilon = 1e-6);
        assert_abs_diff_eq!(distances.three_d, 0., epsilon = 1e-6);
    }

    #[test]
    fn transverse_and_longitudinal_distances_decouple() {
        let helix = sample_helix();
        let on_helix = helix
            .point_in_z(35., helix.reference_point())
            .unwrap()
            .position;
        // Push the point radially outwards from the circle centre: pure
        // R-Phi offset, no z mismatch
        let radial = Position::new(
            helix.x_centre()
                + (on_helix.x - helix.x_centre()) * (1. + 3. / helix.radius()),
            helix.y_centre()
                + (on_helix.y - helix.y_centre()) * (1. + 3. / helix.radius()),
            on_helix.z,
        );
        let distances = helix.distance_to_point(&radial);
        assert_relative_eq!(distances.r_phi, 3., max_relative = 1e-6);
        assert_abs_diff_eq!(distances.z, 0., epsilon = 1e-6);
        // The true 3D minimum cannot exceed the distance to the known
        // on-helix point
        assert!(distances.three_d <= (radial - on_helix).norm() + 1e-9);
        assert_relative_eq!(distances.three_d, 3., max_relative = 1e-3);
    }

    #[test]
    fn vertical_line_distances() {
        let pos = Position::new(3., 4., 0.);
        let mom = Momentum::new(0., 0., 2.);
        let helix = Helix::from_vp(&pos, &mom, 1., 3.5).unwrap();
        let distances = helix.distance_to_point(&Position::new(0., 0., 123.));
        assert_relative_eq!(distances.r_phi, 5.);
        assert_abs_diff_eq!(distances.z, 0.);
        assert_relative_eq!(distances.three_d, 5.);
    }

    #[test]
    fn helices_through_a_common_point_meet_there() {
        let meeting = Position::new(10., 20., 30.);
        let first =
            Helix::from_vp(&meeting, &Momentum::new(1., 0.2, 0.4), 1., 3.5).unwrap();
        let second =
            Helix::from_vp(&meeting, &Momentum::new(-0.5, 0.8, -0.3), -1., 3.5).unwrap();
        let approach = first.distance_to_helix(&second).unwrap();
        assert_abs_diff_eq!(approach.distance, 0., epsilon = 1e-4);
        assert_abs_diff_eq!((approach.position - meeting).norm(), 0., epsilon = 1e-3);
        let expected = first.extrapolated_momentum(&meeting) + second.extrapolated_momentum(&meeting);
        assert_abs_diff_eq!((approach.momentum - expected).norm(), 0., epsilon = 1e-6);
    }

    #[test]
    fn separated_helices_report_their_gap() {
        // Two vertical lines 10 mm apart
        let first = Helix::from_vp(
            &Position::new(0., 0., 0.),
            &Momentum::new(0., 0., 1.),
            1.,
            3.5,
        )
        .unwrap();
        let second = Helix::from_vp(
            &Position::new(10., 0., 5.),
            &Momentum::new(0., 0., 1.),
            1.,
            3.5,
        )
        .unwrap();
        let approach = first.distance_to_helix(&second).unwrap();
        assert_relative_eq!(approach.distance, 10.);
        assert_relative_eq!(approach.position.x, 5.);
    }

    #[test]
    fn disjoint_coplanar_circles_meet_along_the_centre_line() {
        // Two planar tracks whose circles sit 3000 mm apart on a horizontal
        // centre line: the gap and the closest point pair are closed-form
        let mom = Momentum::new(1., 0., 0.);
        let first = Helix::from_vp(&Position::new(0., 0., 0.), &mom, 1., 3.5).unwrap();
        let second = Helix::from_vp(&Position::new(3000., 0., 0.), &mom, 1., 3.5).unwrap();
        let approach = first.distance_to_helix(&second).unwrap();
        let expected = 3000. - 2. * first.radius();
        assert_relative_eq!(approach.distance, expected, max_relative = 1e-6);
        assert_relative_eq!(approach.position.x, 1500., max_relative = 1e-6);
        assert_relative_eq!(approach.position.y, first.y_centre(), max_relative = 1e-6);
    }

    #[test]
    fn random_pairs_converge_and_match_a_coarse_scan() {
        use rand::{Rng, SeedableRng};
        use rand_xoshiro::Xoshiro256PlusPlus;

        fn random_helix(rng: &mut impl Rng, b_field: Float) -> Helix {
            loop {
                let position = Position::new(
                    rng.gen_range(-100.0..100.0),
                    rng.gen_range(-100.0..100.0),
                    rng.gen_range(-100.0..100.0),
                );
                let momentum = Momentum::new(
                    rng.gen_range(-2.0..2.0),
                    rng.gen_range(-2.0..2.0),
                    rng.gen_range(-2.0..2.0),
                );
                if hypot(momentum.x, momentum.y) < 0.05 || abs(momentum.z) < 0.05 {
                    continue;
                }
                let charge = if rng.gen::<bool>() { 1. } else { -1. };
                return Helix::from_vp(&position, &momentum, charge, b_field).unwrap();
            }
        }

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x0d15_7a4c_e5);
        for _ in 0..100 {
            let b_field = rng.gen_range(0.5..4.0);
            let first = random_helix(&mut rng, b_field);
            let second = random_helix(&mut rng, b_field);
            let approach = first.distance_to_helix(&second).unwrap();

            // The refined answer cannot be worse than coarsely sampling one
            // turn of the first trajectory against the second
            let phase_ref = first.b_z() * first.reference_point().z + first.phi_z();
            let mut coarse = Float::INFINITY;
            for idx in 0..=128 {
                let phase = phase_ref - PI + TAU * idx as Float / 128.;
                let sample = first.position_at_unwrapped_phase(phase);
                coarse = min(coarse, second.distance_to_point(&sample).three_d);
            }
            assert!(
                approach.distance <= coarse + 1e-3 * (1. + coarse),
                "distance {} exceeds coarse bound {}",
                approach.distance,
                coarse
            );
        }
    }

    #[test]
    fn planar_edges_bound_the_line_search() {
        let pos = Position::new(0., 0., 0.);
        let mom = Momentum::new(1., 0., 0.);
        let mut helix = Helix::from_vp(&pos, &mom, 1., 3.5).unwrap();
        let line = Line::new(pos, Momentum::new(0., 0., 1.)).unwrap();
        assert_abs_diff_eq!(helix.distance_to_line(&line), 0., epsilon = 1e-6);
        // Restrict to the quarter turn on the far side of the circle: the
        // reference point is no longer reachable and the nearest in-range
        // point sits a chord of radius * sqrt(2) away
        let start = Position::new(helix.x_centre() + helix.radius(), helix.y_centre(), 0.);
        let end = Position::new(helix.x_centre(), helix.y_centre() - helix.radius(), 0.);
        helix.set_edges(start, end);
        let expected = helix.radius() * crate::numeric::floats::consts::SQRT_2;
        assert_relative_eq!(helix.distance_to_line(&line), expected, max_relative = 1e-6);
    }

    #[test]
    fn line_through_a_point_of_the_helix_is_at_zero_distance() {
        let helix = sample_helix();
        let on_helix = helix
            .point_in_z(20., helix.reference_point())
            .unwrap()
            .position;
        let line = Line::new(on_helix, Momentum::new(0.3, -1., 0.7)).unwrap();
        assert_abs_diff_eq!(helix.distance_to_line(&line), 0., epsilon = 1e-6);
    }

    #[test]
    fn distant_line_reports_a_positive_distance() {
        let helix = sample_helix();
        // A z-parallel line far outside the circle: closest approach is the
        // in-plane distance to the circle
        let line = Line::new(Position::new(5000., 0., 0.), Momentum::new(0., 0., 1.)).unwrap();
        let expected = hypot(5000. - helix.x_centre(), helix.y_centre()) - helix.radius();
        assert_relative_eq!(helix.distance_to_line(&line), expected, max_relative = 1e-6);
    }

    #[test]
    fn edges_bound_the_line_search() {
        let mut helix = sample_helix();
        let near = helix
            .point_in_z(10., helix.reference_point())
            .unwrap()
            .position;
        // Segment restricted to z in [100, 200]: the point near z = 10 is
        // no longer reachable, so the distance grows accordingly
        let start = helix.point_in_z(100., helix.reference_point()).unwrap().position;
        let end = helix.point_in_z(200., helix.reference_point()).unwrap().position;
        let line = Line::new(near, Momentum::new(0., 0., 1.)).unwrap();
        let unbounded = helix.distance_to_line(&line);
        helix.set_edges(start, end);
        let bounded = helix.distance_to_line(&line);
        assert!(unbounded <= bounded + 1e-9);
        assert!(bounded >= 0.);
    }

    #[test]
    fn extrapolated_momentum_preserves_magnitudes() {
        let helix = sample_helix();
        let probe = helix
            .point_in_z(50., helix.reference_point())
            .unwrap()
            .position;
        let extrapolated = helix.extrapolated_momentum(&probe);
        assert_relative_eq!(hypot(extrapolated.x, extrapolated.y), helix.pxy(), max_relative = 1e-9);
        assert_relative_eq!(extrapolated.z, helix.momentum().z);
        // At the reference point the stored momentum is recovered
        let at_reference = helix.extrapolated_momentum(helix.reference_point());
        assert_abs_diff_eq!((at_reference - helix.momentum()).norm(), 0., epsilon = 1e-9);
    }

    #[test]
    fn extrapolation_at_the_circle_centre_falls_back() {
        let helix = sample_helix();
        let centre = Position::new(helix.x_centre(), helix.y_centre(), 0.);
        let momentum = helix.extrapolated_momentum(&centre);
        assert_eq!(&momentum, helix.momentum());
    }

    #[test]
    fn golden_section_finds_a_parabola_minimum() {
        let (x, fx) = golden_minimize(|x| (x - 1.25) * (x - 1.25) + 2., -4., 4.);
        assert_relative_eq!(x, 1.25, max_relative = 1e-6);
        assert_relative_eq!(fx, 2., max_relative = 1e-9);
    }
}
