//! Motion and sensor models for the corridor robot.
//!
//! Both models are conditioned on the label of a single cell. The motion model gives the
//! probability that a forward move attempted *from* a cell succeeds; the sensor model gives
//! the probability that the sensor reports the true label of the cell the robot is in.
//!
//! The per-label values are kept in a [`LabelProbabilities`] lookup that is indexed by
//! [`CellLabel`], so adding a label only touches that lookup.
use std::fmt::{self, Display};
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::corridor::CellLabel;
use crate::error::{ConfigError, ConfigResult};

/// One probability per cell label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelProbabilities {
    pub wall: f64,
    pub door: f64,
}
impl LabelProbabilities {
    pub fn new(wall: f64, door: f64) -> LabelProbabilities {
        LabelProbabilities { wall, door }
    }
    /// Same probability for every label.
    pub fn uniform(p: f64) -> LabelProbabilities {
        LabelProbabilities { wall: p, door: p }
    }
    /// Check that every entry lies strictly within (0, 1). `name` prefixes the error.
    pub fn validate(&self, name: &str) -> ConfigResult<()> {
        for label in CellLabel::ALL {
            let value = self[label];
            // written this way so NaN fails too
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::ProbabilityOutOfRange {
                    name: format!("{name}.{label}"),
                    value,
                });
            }
        }
        Ok(())
    }
}
impl Index<CellLabel> for LabelProbabilities {
    type Output = f64;

    fn index(&self, label: CellLabel) -> &f64 {
        match label {
            CellLabel::Wall => &self.wall,
            CellLabel::Door => &self.door,
        }
    }
}
impl Display for LabelProbabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(wall: {}, door: {})", self.wall, self.door)
    }
}

/// Probability that an attempted forward move succeeds, keyed by the label of the cell the
/// robot starts from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionModel {
    success: LabelProbabilities,
}
impl MotionModel {
    pub fn new(success: LabelProbabilities) -> ConfigResult<MotionModel> {
        success.validate("motion")?;
        Ok(MotionModel { success })
    }
    /// p(X_t = X_{t-1} + 1 | U = move, label(X_{t-1}))
    pub fn success(&self, label: CellLabel) -> f64 {
        self.success[label]
    }
    /// p(X_t = X_{t-1} | U = move, label(X_{t-1}))
    pub fn failure(&self, label: CellLabel) -> f64 {
        1.0 - self.success[label]
    }
    pub fn probabilities(&self) -> LabelProbabilities {
        self.success
    }
}

/// Probability that the sensor reports the true label of the current cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorModel {
    correct: LabelProbabilities,
}
impl SensorModel {
    pub fn new(correct: LabelProbabilities) -> ConfigResult<SensorModel> {
        correct.validate("sensor")?;
        Ok(SensorModel { correct })
    }
    /// p(Z = label | X has label)
    pub fn correct(&self, label: CellLabel) -> f64 {
        self.correct[label]
    }
    /// p(Z = observation | X has label `cell`)
    pub fn likelihood(&self, observation: CellLabel, cell: CellLabel) -> f64 {
        if observation == cell {
            self.correct[cell]
        } else {
            1.0 - self.correct[cell]
        }
    }
    pub fn probabilities(&self) -> LabelProbabilities {
        self.correct
    }
}
