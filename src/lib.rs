//! Helix parameterizations for charged-particle tracking
//!
//!
//! # Introduction (for the physicist)
//!
//! A charged particle in a uniform magnetic field along z follows a helix:
//! a circle in the transverse (R-Phi) plane combined with a linear advance
//! in z. Tracking and vertexing code describes the same trajectory in three
//! interchangeable ways: Cartesian state (position, momentum, charge,
//! field), the slope parameterization `x = xC + R cos(bZ z + phi0)`, and the
//! canonical (LEP-wise) five parameters (phi0, d0, z0, omega, tanLambda).
//!
//! This crate converts freely between the three and answers the geometric
//! questions detector code keeps asking: where does the track cross a given
//! plane or a coaxial cylinder, how far does it pass from a space point,
//! from a wire, or from another track, and what momentum would it carry at
//! an arbitrary point of its flight.
//!
//!
//! # Introduction (for the numerical guy)
//!
//! The conversions are closed-form but numerically delicate near their
//! degenerate configurations: zero transverse momentum, near-tangent
//! intersections, points on the axis. The transverse projections (circle
//! against line, circle against circle) stay closed-form; only the full 3D
//! closest-approach problems, where the pitch couples the phase to z, use
//! bounded deterministic searches with documented tolerances
//! ([`constants`]).
//!
//! Computations default to double precision; the `f32` cargo feature
//! restores the single-precision convention of the originating domain.
//!
//!
//! # Units
//!
//! Lengths are in mm, momenta in GeV, fields in Tesla, charges in units of
//! the elementary charge; the [`constants::FCT`] curvature constant ties
//! them together.

#![warn(missing_docs)]

mod approach;
pub mod constants;
mod error;
mod helix;
mod intersect;
mod line;
mod momentum;
mod numeric;

pub use crate::{
    approach::{HelixApproach, ProjectedDistances},
    error::Error,
    helix::Helix,
    intersect::Crossing,
    line::Line,
    momentum::{Momentum, Position},
    numeric::Float,
};

/// Result type of every fallible operation in this crate
pub type Result<T> = std::result::Result<T, Error>;
