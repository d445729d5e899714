//! Belief over corridor cells.
//!
//! A [`Belief`] is a discrete probability distribution with one entry per corridor cell.
//! It is only ever produced already normalized: either uniform, normalized from a set of
//! non-negative weights, or returned by the filter's predict and update steps. Each step
//! builds a new `Belief` from a read-only snapshot of the previous one; nothing mutates a
//! belief in place.
use std::fmt::{self, Display};

use log::warn;

use crate::error::{ConfigError, ConfigResult};

/// Default absolute tolerance for reporting tied most-likely cells.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Probability of the robot being in each corridor cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Belief {
    probabilities: Vec<f64>,
}
impl Belief {
    /// Equal probability `1 / length` for every cell.
    pub fn uniform(length: usize) -> ConfigResult<Belief> {
        if length == 0 {
            return Err(ConfigError::EmptyCorridor);
        }
        Ok(Self::uniform_unchecked(length))
    }
    fn uniform_unchecked(length: usize) -> Belief {
        Belief {
            probabilities: vec![1.0 / length as f64; length],
        }
    }
    /// Normalize a vector of non-negative, finite weights into a belief.
    ///
    /// # Errors
    /// Fails if `weights` is empty, contains a negative or non-finite entry, or sums to zero.
    pub fn from_weights(weights: Vec<f64>) -> ConfigResult<Belief> {
        if weights.is_empty() {
            return Err(ConfigError::EmptyCorridor);
        }
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ConfigError::InvalidBelief(format!(
                "weights must be finite and non-negative, got {bad}"
            )));
        }
        if weights.iter().all(|&w| w == 0.0) {
            return Err(ConfigError::InvalidBelief(
                "weights must not all be zero".to_string(),
            ));
        }
        let (belief, _) = Belief::normalized(weights);
        Ok(belief)
    }
    /// Take a stored probability vector as-is, without renormalizing it.
    ///
    /// # Errors
    /// Fails if `probabilities` is empty, has a negative or non-finite entry, or does not sum
    /// to one within `1e-9`.
    pub fn from_probabilities(probabilities: Vec<f64>) -> ConfigResult<Belief> {
        if probabilities.is_empty() {
            return Err(ConfigError::EmptyCorridor);
        }
        if let Some(bad) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(ConfigError::InvalidBelief(format!(
                "probabilities must be finite and non-negative, got {bad}"
            )));
        }
        let total: f64 = probabilities.iter().sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(ConfigError::InvalidBelief(format!(
                "probabilities must sum to 1, got {total}"
            )));
        }
        Ok(Belief::from_normalized(probabilities))
    }
    /// Wrap probabilities that are already known to sum to one.
    pub(crate) fn from_normalized(probabilities: Vec<f64>) -> Belief {
        Belief { probabilities }
    }
    /// Normalize non-negative weights and return the belief together with their sum.
    ///
    /// The weights are rescaled by their maximum before dividing by the total, which keeps
    /// the result well conditioned when every weight is tiny. If nothing survives (all zero
    /// or non-finite) the belief falls back to uniform and the returned sum is zero.
    pub(crate) fn normalized(weights: Vec<f64>) -> (Belief, f64) {
        let evidence: f64 = weights.iter().sum();
        let max = weights.iter().copied().fold(0.0, f64::max);
        if max <= 0.0 || !max.is_finite() || !evidence.is_finite() {
            warn!(
                "belief collapsed (max weight {max:e}, total {evidence:e}); resetting to uniform over {} cells",
                weights.len()
            );
            return (Belief::uniform_unchecked(weights.len()), 0.0);
        }
        let scaled: Vec<f64> = weights.into_iter().map(|w| w / max).collect();
        let total: f64 = scaled.iter().sum();
        let probabilities = scaled.into_iter().map(|w| w / total).collect();
        (Belief { probabilities }, evidence)
    }
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }
    /// Probability of cell `index mod N`.
    pub fn probability(&self, index: usize) -> f64 {
        self.probabilities[index % self.probabilities.len()]
    }
    pub fn sum(&self) -> f64 {
        self.probabilities.iter().sum()
    }
    pub fn max_probability(&self) -> f64 {
        self.probabilities.iter().copied().fold(0.0, f64::max)
    }
    /// Cells whose probability is within `tolerance` of the maximum, ascending.
    pub fn most_likely(&self, tolerance: f64) -> Vec<usize> {
        most_likely_locations(&self.probabilities, tolerance)
    }
    /// Total probability of the cells at most `radius` steps away from `center`, going
    /// around the corridor in either direction.
    pub fn mass_within(&self, center: usize, radius: usize) -> f64 {
        let n = self.probabilities.len();
        if 2 * radius + 1 >= n {
            return self.sum();
        }
        let center = center % n;
        (0..=2 * radius)
            .map(|offset| self.probabilities[(center + n - radius + offset) % n])
            .sum()
    }
    pub fn into_vec(self) -> Vec<f64> {
        self.probabilities
    }
}
impl Display for Belief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(6);
        for (i, p) in self.probabilities.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{p:.precision$}")?;
        }
        Ok(())
    }
}

/// Indices whose value is within `tolerance` of the maximum of `probabilities`, ascending.
///
/// Several cells can be equally plausible (for example every wall cell right after a wall
/// reading), so the selector reports all near-ties rather than a single arg-max.
///
/// The comparison allows a few ulps of slack, so `0.31 - 0.3` counts as within `0.01`.
pub fn most_likely_locations(probabilities: &[f64], tolerance: f64) -> Vec<usize> {
    let max = probabilities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let threshold = tolerance + 4.0 * f64::EPSILON * max.abs().max(1.0);
    probabilities
        .iter()
        .enumerate()
        .filter(|(_, p)| max - **p <= threshold)
        .map(|(i, _)| i)
        .collect()
}
