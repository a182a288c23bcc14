//! Per-call search configuration.

use crate::error::{Result, SolveError};
use crate::heuristic::{DEFAULT_MINKOWSKI_P, Heuristic};

/// Smallest accepted local beam width.
pub const MIN_BEAM_WIDTH: usize = 1;
/// Largest accepted local beam width.
pub const MAX_BEAM_WIDTH: usize = 20;

/// Options recognized by the search strategies.
///
/// Every field has a default, so partial configurations deserialize.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchParams {
    /// Heuristic index for A*, greedy best-first and local beam.
    pub heuristic: usize,

    /// Exponent of the Minkowski heuristic.
    pub minkowski_p: f64,

    /// Local beam width, clamped to `[MIN_BEAM_WIDTH, MAX_BEAM_WIDTH]`.
    pub beam_width: i64,

    /// Charge the grid's cell weights on entry (cost-aware strategies only).
    pub weighted: bool,

    /// DFS depth budget and IDDFS depth cap, in steps. Defaults to `size²`
    /// for DFS and `2·size` for IDDFS.
    pub max_depth: Option<usize>,

    /// Random tree settings.
    pub rrt: RrtSettings,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            heuristic: 0,
            minkowski_p: DEFAULT_MINKOWSKI_P,
            beam_width: 5,
            weighted: false,
            max_depth: None,
            rrt: RrtSettings::default(),
        }
    }
}

impl SearchParams {
    /// Select a heuristic by index.
    pub fn with_heuristic(mut self, index: usize) -> Self {
        self.heuristic = index;
        self
    }

    /// Enable or disable weighted costs.
    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Set the local beam width (clamped at use).
    pub fn with_beam_width(mut self, width: i64) -> Self {
        self.beam_width = width;
        self
    }

    /// Set the DFS budget / IDDFS cap.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Replace the random tree settings.
    pub fn with_rrt(mut self, rrt: RrtSettings) -> Self {
        self.rrt = rrt;
        self
    }

    /// The selected heuristic.
    pub fn heuristic(&self) -> Result<Heuristic> {
        Heuristic::from_index(self.heuristic, self.minkowski_p)
    }

    /// Beam width after clamping.
    pub fn beam_width(&self) -> usize {
        self.beam_width
            .clamp(MIN_BEAM_WIDTH as i64, MAX_BEAM_WIDTH as i64) as usize
    }

    /// Check the options shared by every strategy. The heuristic index is
    /// left to [`heuristic`](Self::heuristic).
    pub fn validate(&self) -> Result<()> {
        if !(self.minkowski_p.is_finite() && self.minkowski_p > 0.0) {
            return Err(SolveError::InvalidParameter(format!(
                "minkowski exponent must be positive, got {}",
                self.minkowski_p
            )));
        }
        self.rrt.validate()
    }
}

/// Rapidly-exploring random tree settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RrtSettings {
    /// Maximum steering distance per extension.
    pub step_size: f64,

    /// Sampling rounds before giving up.
    pub max_iterations: usize,

    /// Probability of sampling the goal itself.
    pub goal_sample_rate: f64,

    /// Seed for reproducible trees; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for RrtSettings {
    fn default() -> Self {
        Self {
            step_size: 1.0,
            max_iterations: 1000,
            goal_sample_rate: 0.1,
            seed: None,
        }
    }
}

impl RrtSettings {
    /// Use a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(SolveError::InvalidParameter(format!(
                "rrt step size must be positive, got {}",
                self.step_size
            )));
        }
        if !(0.0..=1.0).contains(&self.goal_sample_rate) {
            return Err(SolveError::InvalidParameter(format!(
                "rrt goal sample rate must be within [0, 1], got {}",
                self.goal_sample_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = SearchParams::default();
        assert_eq!(p.heuristic().unwrap(), Heuristic::Manhattan);
        assert_eq!(p.beam_width(), 5);
        assert!(!p.weighted);
        assert_eq!(p.rrt.step_size, 1.0);
        assert_eq!(p.rrt.max_iterations, 1000);
        assert_eq!(p.rrt.goal_sample_rate, 0.1);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn beam_width_is_clamped() {
        assert_eq!(SearchParams::default().with_beam_width(0).beam_width(), 1);
        assert_eq!(SearchParams::default().with_beam_width(-4).beam_width(), 1);
        assert_eq!(SearchParams::default().with_beam_width(50).beam_width(), 20);
        assert_eq!(SearchParams::default().with_beam_width(7).beam_width(), 7);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad_heuristic = SearchParams::default().with_heuristic(12);
        assert_eq!(bad_heuristic.validate(), Ok(()));
        assert_eq!(
            bad_heuristic.heuristic(),
            Err(SolveError::InvalidHeuristic(12))
        );

        let mut bad_p = SearchParams::default();
        bad_p.minkowski_p = 0.0;
        assert!(matches!(bad_p.validate(), Err(SolveError::InvalidParameter(_))));

        let bad_step = SearchParams::default().with_rrt(RrtSettings {
            step_size: f64::NAN,
            ..RrtSettings::default()
        });
        assert!(matches!(bad_step.validate(), Err(SolveError::InvalidParameter(_))));

        let bad_rate = SearchParams::default().with_rrt(RrtSettings {
            goal_sample_rate: 1.5,
            ..RrtSettings::default()
        });
        assert!(matches!(bad_rate.validate(), Err(SolveError::InvalidParameter(_))));
    }
}
