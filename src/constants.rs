//! Physical constants and geometric tolerances
//!
//! These are process-wide immutable constants. Angular constants come from
//! [`crate::numeric::floats::consts`] and are not duplicated here.

use crate::numeric::Float;

/// Curvature constant relating transverse momentum (GeV), magnetic field (T)
/// and transverse radius (mm): `radius = pxy / (FCT * |B|)`.
pub const FCT: Float = 2.997_924_58e-4;

/// Transverse momenta below this threshold (GeV) are treated as zero: the
/// trajectory degenerates to a straight line parallel to the z axis.
pub const PT_RESOLUTION: Float = 1.0e-10;

/// Magnetic fields below this magnitude (T) do not define a finite-curvature
/// helix and are rejected at construction.
pub const FIELD_RESOLUTION: Float = 1.0e-10;

/// Curvatures below this magnitude (1/mm) do not define a finite-radius
/// circle and are rejected at construction.
pub const CURVATURE_RESOLUTION: Float = 1.0e-12;

/// Dip-angle tangents below this magnitude describe a trajectory confined
/// to its z plane: the phi(z) slope relation is undefined there.
pub const DIP_RESOLUTION: Float = 1.0e-12;

/// Tolerance (mm) for coincidence checks in real space: points closer than
/// this are treated as the same point, circles closer than this to a
/// cylinder surface are treated as lying on it.
pub const CONFUSION: Float = 1.0e-6;

/// Convergence tolerance (mm) for the helix-helix solver: iteration stops
/// once a full alternating-projection step improves the pair distance by
/// less than this.
pub const APPROACH_TOLERANCE: Float = 1.0e-6;

/// Iteration cap for the alternating helix-helix closest-approach solver.
pub const MAX_APPROACH_ITERATIONS: usize = 100;

/// Iteration cap for the golden-section phase minimizations. Each step
/// contracts the bracket by ~0.618, so 80 steps shrink a 2*pi bracket far
/// below [`CONFUSION`].
pub const MAX_PHASE_ITERATIONS: usize = 80;

/// Convergence tolerance (radians) on the phase in 1D minimizations.
pub const PHASE_TOLERANCE: Float = 1.0e-12;
