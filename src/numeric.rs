//! Basic numerical concepts used throughout the crate

#![allow(missing_docs)]

// Floating-point precision is configured here.
//
// The originating domain exchanges single-precision values at its interfaces,
// but the iterative closest-approach solves accumulate error, so f64 is the
// default and the "f32" feature restores the narrower convention.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f32")]
pub use std::f32 as floats;
#[cfg(not(feature = "f32"))]
pub type Float = f64;
#[cfg(not(feature = "f32"))]
pub use std::f64 as floats;
