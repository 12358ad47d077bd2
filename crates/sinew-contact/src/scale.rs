//! Per-body scale factors for the model-scaling pass.

use crate::{ContactGeometryError, Result};
use serde::{Deserialize, Serialize};
use sinew_math::Vec3;

/// XYZ scale factors for one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Body name, as in `/bodyset/<body>`.
    pub body: String,
    /// Factors along the body's X, Y and Z axes.
    pub factors: [f64; 3],
}

/// Scale factors keyed by body.
///
/// Loaded from JSON such as
/// `{"scales": [{"body": "femur_r", "factors": [1.0, 1.1, 1.0]}]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleSet {
    #[serde(default)]
    pub scales: Vec<Scale>,
}

impl ScaleSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the factors for `body`.
    pub fn with(mut self, body: &str, factors: Vec3) -> Self {
        self.insert(body, factors);
        self
    }

    /// Add (or replace) the factors for `body`.
    pub fn insert(&mut self, body: &str, factors: Vec3) {
        let factors = [factors.x, factors.y, factors.z];
        match self.scales.iter_mut().find(|s| s.body == body) {
            Some(existing) => existing.factors = factors,
            None => self.scales.push(Scale {
                body: body.to_string(),
                factors,
            }),
        }
    }

    /// Factors for `body`, if present.
    pub fn factors_for(&self, body: &str) -> Option<Vec3> {
        self.scales
            .iter()
            .find(|s| s.body == body)
            .map(|s| Vec3::new(s.factors[0], s.factors[1], s.factors[2]))
    }

    /// Parse from JSON and check every factor is finite and positive.
    pub fn from_json(json: &str) -> Result<Self> {
        let set: ScaleSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Check every factor is finite and positive.
    pub fn validate(&self) -> Result<()> {
        for scale in &self.scales {
            if scale.factors.iter().any(|f| !f.is_finite() || *f <= 0.0) {
                return Err(ContactGeometryError::InvalidProperty {
                    property: format!("scale factors for `{}`", scale.body),
                    value: format!("{:?}", scale.factors),
                    reason: "factors must be finite and positive".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}
