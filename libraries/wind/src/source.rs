use nalgebra as na;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier assigned to a wind source by whoever manages the sources
pub type WindSourceId = u32;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WindError {
    #[error("Invalid radius {0}: must be a positive finite number")]
    InvalidRadius(f32),

    #[error("Invalid base force {0}: must be a non-negative finite number")]
    InvalidForce(f32),

    #[error("Invalid variability: frequency {frequency} and amplitude {amplitude} must be finite")]
    InvalidVariability { frequency: f32, amplitude: f32 },

    #[error("Invalid {0}: must be finite")]
    NonFinite(&'static str),
}

/// Time behaviour of a source's strength
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Variability {
    #[default]
    Constant,
    /// Adds `amplitude * sin(2π * frequency * t)` to the base force
    Sinusoidal { frequency: f32, amplitude: f32 },
}

/// A point source of horizontal wind with linear falloff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindSource {
    pub id: WindSourceId,
    /// World position in meters
    pub position: na::Vector3<f32>,
    /// Influence radius in meters, always > 0
    pub radius: f32,
    /// Force at the centre of the source, always >= 0
    pub base_force: f32,
    /// Heading of the wind in the horizontal plane, radians
    pub direction: f32,
    pub enabled: bool,
    pub variability: Variability,
}

impl WindSource {
    /// Create an enabled, constant source after checking its geometry.
    pub fn new(
        id: WindSourceId,
        position: na::Vector3<f32>,
        radius: f32,
        base_force: f32,
        direction: f32,
    ) -> Result<Self, WindError> {
        let source = Self {
            id,
            position,
            radius,
            base_force,
            direction,
            enabled: true,
            variability: Variability::Constant,
        };
        source.validate()?;
        Ok(source)
    }

    /// Check geometry and variability, e.g. for sources loaded from a config file.
    pub fn validate(&self) -> Result<(), WindError> {
        if self.position.iter().any(|v| !v.is_finite()) {
            return Err(WindError::NonFinite("position"));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(WindError::InvalidRadius(self.radius));
        }
        if !self.base_force.is_finite() || self.base_force < 0.0 {
            return Err(WindError::InvalidForce(self.base_force));
        }
        if !self.direction.is_finite() {
            return Err(WindError::NonFinite("direction"));
        }
        if let Variability::Sinusoidal { frequency, amplitude } = self.variability {
            if !frequency.is_finite() || !amplitude.is_finite() {
                return Err(WindError::InvalidVariability { frequency, amplitude });
            }
        }
        Ok(())
    }

    pub fn with_variability(mut self, variability: Variability) -> Result<Self, WindError> {
        self.variability = variability;
        self.validate()?;
        Ok(self)
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Force at the centre of the source at simulation time `time`, never negative.
    pub fn strength(&self, time: f32) -> f32 {
        match self.variability {
            Variability::Constant => self.base_force,
            Variability::Sinusoidal { frequency, amplitude } => {
                let gust = amplitude * (core::f32::consts::TAU * frequency * time).sin();
                (self.base_force + gust).max(0.0)
            }
        }
    }

    /// Unit vector of the wind heading; the vertical component is always zero.
    pub fn heading(&self) -> na::Vector3<f32> {
        na::Vector3::new(self.direction.cos(), 0.0, self.direction.sin())
    }

    /// Contribution of this source alone at `position`.
    pub fn contribution(&self, position: &na::Vector3<f32>, time: f32) -> na::Vector3<f32> {
        if !self.enabled {
            return na::Vector3::zeros();
        }

        let distance = (position - self.position).norm();
        if distance > self.radius {
            return na::Vector3::zeros();
        }

        let falloff = 1.0 - distance / self.radius;
        self.heading() * (self.strength(time) * falloff)
    }
}
