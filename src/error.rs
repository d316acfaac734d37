//! Error taxonomy of the geometric queries
//!
//! Degenerate-but-meaningful configurations (zero transverse momentum,
//! concentric circles with matching radii) are handled with explicit fallback
//! formulas and never reach this module. Only configurations with no sensible
//! answer are surfaced as errors, and they are terminal for that call: these
//! are deterministic pure computations, so retrying cannot help.

use crate::numeric::Float;
use thiserror::Error;

/// Failure modes of helix construction and geometric queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested geometry does not define a trajectory (zero magnetic
    /// field, zero curvature, zero radius where a circle is required, zero
    /// direction vector).
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    /// A plane, cylinder or line query has no real solution.
    #[error("no intersection: {0}")]
    NoIntersection(&'static str),

    /// An iterative minimization exhausted its iteration cap while the
    /// answer was still improving. Carries the improvement (mm) of the pair
    /// distance at the last iteration.
    #[error("closest-approach iteration did not converge (residual {residual} mm)")]
    NonConvergence {
        /// Improvement of the candidate pair distance at the last iteration
        residual: Float,
    },
}
