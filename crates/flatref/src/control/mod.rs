//! High-level position control
//!
//! - Reference-input pipeline: singularity-robust body-frame construction
//!   and the differentially-flat feed-forward quantities
//! - Position controller: per-tick orchestration and command assembly

pub mod position_controller;
pub mod reference_inputs;

pub use position_controller::*;
pub use reference_inputs::*;
