//! Generator configuration.
//!
//! The defaults give the standard grammar: constants in
//! `[0, 10]`, Expr terminals weighted 4:3:3 (constant, variable, sequence
//! read), and a leaf ramp of `0.05 + 0.5 * depth / max_depth`.

use crate::error::{GenError, GenResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Smallest constant a terminal may produce (inclusive).
    pub constant_min: i64,
    /// Largest constant a terminal may produce (inclusive).
    pub constant_max: i64,
    pub constant_weight: u32,
    pub variable_weight: u32,
    pub sequence_get_weight: u32,
    /// Leaf probability at the root.
    pub leaf_base: f64,
    /// Leaf probability added across the depth budget.
    pub leaf_slope: f64,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            constant_min: 0,
            constant_max: 10,
            constant_weight: 4,
            variable_weight: 3,
            sequence_get_weight: 3,
            leaf_base: 0.05,
            leaf_slope: 0.5,
        }
    }
}

impl GenConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> GenResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GenError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GenResult<()> {
        if self.constant_min > self.constant_max {
            return Err(GenError::InvalidConfig(format!(
                "constant range is empty: [{}, {}]",
                self.constant_min, self.constant_max
            )));
        }
        if self.terminal_weights().iter().all(|&w| w == 0) {
            return Err(GenError::InvalidConfig(
                "all Expr terminal weights are zero".into(),
            ));
        }
        for (name, value) in [("leaf_base", self.leaf_base), ("leaf_slope", self.leaf_slope)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GenError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Weights of the constant, variable and sequence-read terminals.
    pub fn terminal_weights(&self) -> [u32; 3] {
        [
            self.constant_weight,
            self.variable_weight,
            self.sequence_get_weight,
        ]
    }

    /// Probability of emitting a terminal production at `depth`.
    ///
    /// Exactly 1.0 once the depth budget is spent, which bounds every
    /// branch. `max_depth` must be non-zero.
    pub fn leaf_probability(&self, depth: usize, max_depth: usize) -> f64 {
        if depth >= max_depth {
            1.0
        } else {
            self.leaf_base + self.leaf_slope * (depth as f64 / max_depth as f64)
        }
    }
}

/// Leaf probability under the default ramp.
pub fn leaf_probability(depth: usize, max_depth: usize) -> f64 {
    GenConfig::default().leaf_probability(depth, max_depth)
}
