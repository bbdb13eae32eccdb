//! Vehicle configuration
//!
//! Parameters consumed by the position controller are injected at
//! construction time rather than read from globals, so drag-compensated
//! and non-drag-compensated paths are independently testable. The control
//! tick itself never touches validation; [`VehicleConfig::validate`] is a
//! constructor-time concern for the process that loads the configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::GRAVITY;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("non-finite value in field `{0}`")]
    NonFinite(&'static str),
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(f64),
    #[error("gravity magnitude must be non-negative, got {0}")]
    NegativeGravity(f64),
    #[error("rotor drag coefficient `{name}` must be non-negative, got {value}")]
    NegativeDrag { name: &'static str, value: f64 },
}

/// Lumped linear rotor-drag coefficients [1/s]
///
/// Per-axis coefficients of the drag model D = diag(dx, dy, dz) from the
/// rotor-drag flatness formulation. Zero disables drag compensation, which
/// is the default until identified values are supplied externally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DragCoefficients {
    /// Drag along the body x-axis [1/s]
    pub dx: f64,
    /// Drag along the body y-axis [1/s]
    pub dy: f64,
    /// Drag along the body z-axis [1/s]
    pub dz: f64,
}

/// Vehicle parameters injected into the position controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Vehicle mass [kg]
    pub mass: f64,
    /// Gravity magnitude [m/s²]
    pub gravity: f64,
    /// Rotor drag coefficients
    pub drag: DragCoefficients,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            gravity: GRAVITY,
            drag: DragCoefficients::default(),
        }
    }
}

impl VehicleConfig {
    /// Check the configuration for non-physical or non-finite values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mass.is_finite() {
            return Err(ConfigError::NonFinite("mass"));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite("gravity"));
        }
        if self.mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        if self.gravity < 0.0 {
            return Err(ConfigError::NegativeGravity(self.gravity));
        }
        for (name, value) in [
            ("dx", self.drag.dx),
            ("dy", self.drag.dy),
            ("dz", self.drag.dz),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite("drag"));
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeDrag { name, value });
            }
        }
        Ok(())
    }
}
