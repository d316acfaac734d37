//! Helix trajectory state and parameterization conversions
//!
//! A [`Helix`] models the trajectory of a charged particle in a uniform
//! magnetic field along +z. The same trajectory can be described in three
//! equivalent ways, and each has a constructor:
//!
//! * [`Helix::from_vp`] — Cartesian state (position, momentum, charge, field);
//! * [`Helix::from_bz`] — slope parameterization
//!   `x = xCentre + radius*cos(bZ*z + phi0)`,
//!   `y = yCentre + radius*sin(bZ*z + phi0)`;
//! * [`Helix::from_canonical`] — LEP-wise canonical parameters
//!   (phi0, d0, z0, omega, tanLambda).
//!
//! All three produce the same internal canonical representation, so every
//! accessor returns consistent values regardless of the construction route.
//! A `Helix` value is always fully initialized; re-parameterizing a track
//! means building a new value.
//!
//! Sign conventions, with `qs = charge * sign(B)`:
//!
//! * the phase of the position on the XY circle decreases along the motion
//!   for `qs > 0` (`dphi/ds = -qs/radius`);
//! * the momentum azimuth at position phase `phi` is `phi - qs*pi/2`;
//! * the circle centre sits at position phase `phi + pi`;
//! * `bZ = -qs / (radius * tanLambda)` and `phiZ = phi_ref - bZ * z_ref`.

use crate::{
    constants::{CURVATURE_RESOLUTION, DIP_RESOLUTION, FCT, FIELD_RESOLUTION, PT_RESOLUTION},
    error::Error,
    momentum::{azimuth, transverse, Momentum, Position},
    numeric::{
        floats::consts::{FRAC_PI_2, PI, TAU},
        Float,
    },
    Result,
};

use prefix_num_ops::real::*;

/// Trajectory of a charged particle in a uniform magnetic field along +z
///
/// Immutable after construction except for the optional track-segment edge
/// markers ([`Helix::set_edges`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Helix {
    /// Momentum at the reference point (GeV)
    momentum: Momentum,

    /// Point at which position and momentum were specified (mm)
    reference_point: Position,

    /// Particle charge, in units of the elementary charge
    charge: Float,

    /// Magnetic field along +z (T)
    b_field: Float,

    /// Azimuth of the momentum at the point of closest approach
    phi0: Float,

    /// Signed transverse impact parameter (mm)
    d0: Float,

    /// z coordinate of the point of closest approach (mm)
    z0: Float,

    /// Signed curvature (1/mm)
    omega: Float,

    /// Tangent of the dip angle, `pz / pxy`
    tan_lambda: Float,

    /// Transverse momentum magnitude (GeV)
    pxy: Float,

    /// Transverse circle radius (mm), 0 for the straight-line degenerate
    radius: Float,

    /// x of the circle centre (mm)
    x_centre: Float,

    /// y of the circle centre (mm)
    y_centre: Float,

    /// Slope of the `phi(z)` relation (1/mm), 0 when z does not advance phase
    b_z: Float,

    /// Phase offset of the `phi(z)` relation
    phi_z: Float,

    /// Optional track-segment bounds (start, end)
    edges: Option<(Position, Position)>,
}
//
impl Helix {
    // ### CONSTRUCTION ###

    /// Build a helix from Cartesian state: position and momentum at a
    /// reference point, particle charge, and magnetic field (T).
    ///
    /// A momentum purely along z is a meaningful degenerate case: the
    /// trajectory becomes a straight line parallel to the z axis through
    /// `position`, reported with `radius() == 0` and `omega() == 0`.
    ///
    /// Fails with [`Error::DegenerateGeometry`] on vanishing field, charge
    /// or total momentum.
    pub fn from_vp(
        position: &Position,
        momentum: &Momentum,
        charge: Float,
        b_field: Float,
    ) -> Result<Self> {
        if abs(b_field) < FIELD_RESOLUTION {
            return Err(Error::DegenerateGeometry("zero magnetic field"));
        }
        if charge == 0. {
            return Err(Error::DegenerateGeometry("zero charge"));
        }
        if momentum.norm() < PT_RESOLUTION {
            return Err(Error::DegenerateGeometry("zero momentum"));
        }

        let pxy = transverse(momentum);
        if pxy < PT_RESOLUTION {
            return Ok(Self::vertical_line(position, momentum, charge, b_field));
        }

        let radius = pxy / (FCT * abs(b_field));
        let qs = signum(charge) * signum(b_field);

        // Circle centre: momentum direction rotated by -qs*90 degrees
        let phi_mom = azimuth(momentum);
        let x_centre = position.x + radius * cos(phi_mom - qs * FRAC_PI_2);
        let y_centre = position.y + radius * sin(phi_mom - qs * FRAC_PI_2);

        // Point of closest approach to the z axis in the XY projection: the
        // point of the circle facing the origin
        let phi_at_pca = atan2(-y_centre, -x_centre);
        let phi0 = wrap_pi(phi_at_pca - qs * FRAC_PI_2);
        let x_at_pca = x_centre + radius * cos(phi_at_pca);
        let y_at_pca = y_centre + radius * sin(phi_at_pca);

        // Signed so that (x, y)_PCA = (-d0 sin phi0, d0 cos phi0)
        let d0 = y_at_pca * cos(phi0) - x_at_pca * sin(phi0);

        let tan_lambda = momentum.z / pxy;
        let omega = qs / radius;

        // Propagate z from the reference point to the PCA. The XY-plane PCA
        // recurs every turn; the whole-turn count is chosen to minimize |z0|.
        let phi_ref = atan2(position.y - y_centre, position.x - x_centre);
        let delta_phi = phi_ref - phi_at_pca;
        let (z0, b_z, phi_z) = if abs(tan_lambda) < DIP_RESOLUTION {
            // The trajectory stays in its z plane
            (position.z, 0., phi_ref)
        } else {
            let turns = (position.z / (qs * radius * tan_lambda) + delta_phi) / TAU;
            let z0 = position.z + qs * radius * tan_lambda * (delta_phi - TAU * round(turns));
            let b_z = -qs / (radius * tan_lambda);
            (z0, b_z, phi_ref - b_z * position.z)
        };

        Ok(Self {
            momentum: *momentum,
            reference_point: *position,
            charge,
            b_field,
            phi0,
            d0,
            z0,
            omega,
            tan_lambda,
            pxy,
            radius,
            x_centre,
            y_centre,
            b_z,
            phi_z,
            edges: None,
        })
    }

    /// Build a helix from the slope parameterization
    /// `x = x_centre + radius*cos(b_z*z + phi0)`,
    /// `y = y_centre + radius*sin(b_z*z + phi0)`.
    ///
    /// `sign_pz` carries the sign of the z momentum component and `z_begin`
    /// anchors the reference point on one branch of the (z-periodic) phase
    /// relation.
    ///
    /// Fails with [`Error::DegenerateGeometry`] on vanishing field, radius,
    /// slope or `sign_pz`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_bz(
        x_centre: Float,
        y_centre: Float,
        radius: Float,
        b_z: Float,
        phi0: Float,
        b_field: Float,
        sign_pz: Float,
        z_begin: Float,
    ) -> Result<Self> {
        if abs(b_field) < FIELD_RESOLUTION {
            return Err(Error::DegenerateGeometry("zero magnetic field"));
        }
        if radius <= 0. {
            return Err(Error::DegenerateGeometry("non-positive radius"));
        }
        if abs(b_z) < CURVATURE_RESOLUTION {
            return Err(Error::DegenerateGeometry("zero helix slope"));
        }
        if sign_pz == 0. {
            return Err(Error::DegenerateGeometry("undefined pz sign"));
        }

        // Invert the slope relation: |tanLambda| = 1 / (|bZ| * radius), with
        // the z direction of travel fixing the sign, and the rotation sense
        // (hence the charge) following from dphi/dz = bZ
        let tan_lambda = signum(sign_pz) / (abs(b_z) * radius);
        let qs = -signum(b_z) * signum(sign_pz);
        let charge = qs * signum(b_field);

        let phi_ref = b_z * z_begin + phi0;
        let position = Position::new(
            x_centre + radius * cos(phi_ref),
            y_centre + radius * sin(phi_ref),
            z_begin,
        );

        let pxy = FCT * abs(b_field) * radius;
        let phi_mom = phi_ref - qs * FRAC_PI_2;
        let momentum = Momentum::new(
            pxy * cos(phi_mom),
            pxy * sin(phi_mom),
            pxy * tan_lambda,
        );

        let mut helix = Self::from_vp(&position, &momentum, charge, b_field)?;
        // Store the caller's exact phase relation rather than the rederived
        // one, which may differ by a whole number of turns
        helix.b_z = b_z;
        helix.phi_z = phi0;
        Ok(helix)
    }

    /// Build a helix from canonical (LEP-wise) track parameters and the
    /// magnetic field (T). The reference point becomes the point of closest
    /// approach.
    ///
    /// Fails with [`Error::DegenerateGeometry`] on vanishing field or
    /// curvature: `omega == 0` describes a straight track, which this
    /// parameterization cannot anchor in the transverse plane.
    pub fn from_canonical(
        phi0: Float,
        d0: Float,
        z0: Float,
        omega: Float,
        tan_lambda: Float,
        b_field: Float,
    ) -> Result<Self> {
        if abs(b_field) < FIELD_RESOLUTION {
            return Err(Error::DegenerateGeometry("zero magnetic field"));
        }
        if abs(omega) < CURVATURE_RESOLUTION {
            return Err(Error::DegenerateGeometry("zero curvature"));
        }

        let phi0 = wrap_pi(phi0);
        let radius = 1. / abs(omega);
        let qs = signum(omega);
        let charge = qs * signum(b_field);

        let pxy = FCT * abs(b_field) * radius;
        let momentum = Momentum::new(pxy * cos(phi0), pxy * sin(phi0), pxy * tan_lambda);
        let reference_point = Position::new(-d0 * sin(phi0), d0 * cos(phi0), z0);

        let x_centre = reference_point.x + radius * cos(phi0 - qs * FRAC_PI_2);
        let y_centre = reference_point.y + radius * sin(phi0 - qs * FRAC_PI_2);

        // Position phase at the PCA, and the phi(z) relation through it
        let phi_ref = phi0 + qs * FRAC_PI_2;
        let (b_z, phi_z) = if abs(tan_lambda) < DIP_RESOLUTION {
            (0., phi_ref)
        } else {
            let b_z = -qs / (radius * tan_lambda);
            (b_z, phi_ref - b_z * z0)
        };

        Ok(Self {
            momentum,
            reference_point,
            charge,
            b_field,
            phi0,
            d0,
            z0,
            omega: qs / radius,
            tan_lambda,
            pxy,
            radius,
            x_centre,
            y_centre,
            b_z,
            phi_z,
            edges: None,
        })
    }

    /// Degenerate `from_vp` branch: momentum purely along z, the trajectory
    /// is a straight line parallel to the z axis through `position`.
    ///
    /// phi0 and d0 are chosen so that the canonical PCA identity
    /// `(x, y)_PCA = (-d0 sin phi0, d0 cos phi0)` still reproduces the
    /// line's XY position.
    fn vertical_line(
        position: &Position,
        momentum: &Momentum,
        charge: Float,
        b_field: Float,
    ) -> Self {
        let rho = hypot(position.x, position.y);
        Self {
            momentum: *momentum,
            reference_point: *position,
            charge,
            b_field,
            phi0: atan2(-position.x, position.y),
            d0: rho,
            z0: position.z,
            omega: 0.,
            tan_lambda: signum(momentum.z) * Float::INFINITY,
            pxy: 0.,
            radius: 0.,
            x_centre: position.x,
            y_centre: position.y,
            b_z: 0.,
            phi_z: 0.,
            edges: None,
        }
    }

    // ### ACCESSORS ###

    /// Momentum at the reference point (GeV)
    pub fn momentum(&self) -> &Momentum {
        &self.momentum
    }

    /// Reference point of the track (mm)
    pub fn reference_point(&self) -> &Position {
        &self.reference_point
    }

    /// Azimuth of the momentum at the point of closest approach, in (-pi, pi]
    pub fn phi0(&self) -> Float {
        self.phi0
    }

    /// Signed transverse impact parameter (mm)
    pub fn d0(&self) -> Float {
        self.d0
    }

    /// z coordinate of the point of closest approach (mm)
    pub fn z0(&self) -> Float {
        self.z0
    }

    /// Signed curvature (1/mm), 0 for the straight-line degenerate
    pub fn omega(&self) -> Float {
        self.omega
    }

    /// Tangent of the dip angle (infinite for the straight-line degenerate)
    pub fn tan_lambda(&self) -> Float {
        self.tan_lambda
    }

    /// Transverse momentum magnitude (GeV)
    pub fn pxy(&self) -> Float {
        self.pxy
    }

    /// x coordinate of the transverse circle centre (mm)
    pub fn x_centre(&self) -> Float {
        self.x_centre
    }

    /// y coordinate of the transverse circle centre (mm)
    pub fn y_centre(&self) -> Float {
        self.y_centre
    }

    /// Transverse circle radius (mm), 0 for the straight-line degenerate
    pub fn radius(&self) -> Float {
        self.radius
    }

    /// Slope of the `phi(z)` relation of the second parameterization (1/mm)
    pub fn b_z(&self) -> Float {
        self.b_z
    }

    /// Phase offset of the `phi(z)` relation of the second parameterization
    pub fn phi_z(&self) -> Float {
        self.phi_z
    }

    /// Particle charge, in units of the elementary charge
    pub fn charge(&self) -> Float {
        self.charge
    }

    /// Magnetic field along +z (T)
    pub fn b_field(&self) -> Float {
        self.b_field
    }

    // ### TRACK-SEGMENT EDGES ###

    /// Mark the valid range of the trajectory with two 3D points
    ///
    /// The points are stored as given, without geometric validation. When
    /// set, they bound the phase window searched by
    /// [`Helix::distance_to_line`].
    pub fn set_edges(&mut self, start: Position, end: Position) {
        self.edges = Some((start, end));
    }

    /// Starting point of the track segment, if edges were set
    pub fn starting_point(&self) -> Option<&Position> {
        self.edges.as_ref().map(|(start, _)| start)
    }

    /// End point of the track segment, if edges were set
    pub fn end_point(&self) -> Option<&Position> {
        self.edges.as_ref().map(|(_, end)| end)
    }

    // ### SHARED TRAJECTORY GEOMETRY ###

    /// Truth of this being the radius-0 straight-line degenerate
    pub(crate) fn is_line(&self) -> bool {
        self.radius == 0.
    }

    /// Sign of `charge * B`, which fixes the rotation sense
    /// (`dphi/ds = -qs/radius`)
    pub(crate) fn rotation_sense(&self) -> Float {
        signum(self.charge) * signum(self.b_field)
    }

    /// Position phase of an XY point, measured from the circle centre
    pub(crate) fn phase_of(&self, x: Float, y: Float) -> Float {
        atan2(y - self.y_centre, x - self.x_centre)
    }

    /// XY position on the circle at a given phase
    pub(crate) fn xy_at_phase(&self, phase: Float) -> (Float, Float) {
        (
            self.x_centre + self.radius * cos(phase),
            self.y_centre + self.radius * sin(phase),
        )
    }

    /// Momentum vector at a given position phase: the transverse momentum
    /// rotates with the phase, pz and pxy are phase-invariant
    pub(crate) fn momentum_at_phase(&self, phase: Float) -> Momentum {
        let phi_mom = phase - self.rotation_sense() * FRAC_PI_2;
        Momentum::new(
            self.pxy * cos(phi_mom),
            self.pxy * sin(phi_mom),
            self.momentum.z,
        )
    }

    /// Forward XY arc length from one position phase to another, in [0, 2piR)
    pub(crate) fn forward_arc(&self, phase_from: Float, phase_to: Float) -> Float {
        self.radius * wrap_tau(-self.rotation_sense() * (phase_to - phase_from))
    }

    /// Ratio of 3D path length to XY arc length
    pub(crate) fn slope_factor(&self) -> Float {
        sqrt(1. + self.tan_lambda * self.tan_lambda)
    }

    /// Total momentum magnitude (GeV)
    pub(crate) fn total_momentum(&self) -> Float {
        self.momentum.norm()
    }

    /// z of the helix at a position phase, on the turn whose z is nearest to
    /// `z_near` (the phase relation is periodic, z is not)
    pub(crate) fn z_at_phase_near(&self, phase: Float, z_near: Float) -> Float {
        if self.b_z == 0. {
            return self.reference_point.z;
        }
        let turns = round((self.b_z * z_near + self.phi_z - phase) / TAU);
        (phase + TAU * turns - self.phi_z) / self.b_z
    }

    /// 3D position at an unwrapped phase, z following the phi(z) relation
    /// (constant z when the trajectory stays in its plane)
    pub(crate) fn position_at_unwrapped_phase(&self, phase: Float) -> Position {
        let (x, y) = self.xy_at_phase(phase);
        let z = if self.b_z == 0. {
            self.reference_point.z
        } else {
            (phase - self.phi_z) / self.b_z
        };
        Position::new(x, y, z)
    }
}

/// Wrap an angle into [0, 2*pi)
pub(crate) fn wrap_tau(angle: Float) -> Float {
    let wrapped = angle % TAU;
    if wrapped < 0. {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Wrap an angle into (-pi, pi]
pub(crate) fn wrap_pi(angle: Float) -> Float {
    let wrapped = wrap_tau(angle);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}
