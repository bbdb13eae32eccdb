//! Mathematical utilities for reference generation
//!
//! Implements the heading-frame construction, singularity-robust
//! normalization, and quaternion helpers used by the control pipeline.

pub mod frame;
pub mod quaternion;

pub use frame::*;
pub use quaternion::*;
