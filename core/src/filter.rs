//! Discrete Bayes filter (Markov localization) over corridor cells.
//!
//! The filter keeps a [`Belief`] over the N corridor cells and refines it once per time step
//! from two pieces of information:
//!
//! - **Predict** (motion model). The robot always tries to move one cell forward. Mass in
//!   cell `i` after the move comes from the predecessor that moved successfully and from
//!   `i` itself when the move failed:
//!
//!   $$
//!   \bar{b}_i = b_{i-1} \, p(\text{move} \mid \ell_{i-1}) + b_i \, (1 - p(\text{move} \mid \ell_i))
//!   $$
//!
//!   with indices taken modulo N. Predicting conserves total mass, so no normalization is
//!   needed.
//!
//! - **Update** (sensor model). Each cell is reweighted by the likelihood of the reading `z`
//!   given that cell's label, and the result is divided by the evidence
//!   $p(z) = \sum_i p(z \mid \ell_i) \bar{b}_i$.
//!
//! Both steps read from an immutable snapshot of the previous belief and return a new one.
//!
//! The filter only ever sees sensor readings. It has no access to the simulator's true
//! location.
//!
//! ## Update order
//!
//! Two formulations are supported and the choice is made once per filter through
//! [`UpdateOrder`]:
//!
//! - [`UpdateOrder::PredictThenUpdate`]: the belief reported after step `k` is the posterior
//!   given readings `z_0..=z_k`.
//! - [`UpdateOrder::UpdateThenPredict`]: the reading is folded in first and the motion model
//!   is applied afterwards, so the reported belief is the prior for step `k + 1`. With
//!   `skip_final_predict` the last step stops after the update and reports a posterior.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::belief::Belief;
use crate::corridor::{CellLabel, Corridor};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{MotionModel, SensorModel};

/// Order in which the motion and sensor models are applied within a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum UpdateOrder {
    /// Move, then sense. The reported belief is the posterior for the current step.
    #[default]
    PredictThenUpdate,
    /// Sense, then move. The reported belief is the prior for the next step.
    UpdateThenPredict,
}

/// Generic recursive Bayes filter interface.
pub trait BayesFilter {
    /// Propagate the belief through the motion model.
    fn predict(&mut self);
    /// Fold in a sensor reading. Returns the evidence p(z) of the reading.
    fn update(&mut self, observation: CellLabel) -> f64;
    /// Current belief.
    fn belief(&self) -> &Belief;
    /// Cells within `tolerance` of the most likely one.
    fn estimate(&self, tolerance: f64) -> Vec<usize> {
        self.belief().most_likely(tolerance)
    }
}

/// Motion-model convolution: returns the predicted belief for every destination cell.
pub fn predict(belief: &Belief, corridor: &Corridor, motion: &MotionModel) -> Belief {
    debug_assert_eq!(belief.len(), corridor.len());
    let prior = belief.probabilities();
    let predicted = (0..corridor.len())
        .map(|i| {
            let from = corridor.predecessor(i);
            let moved_in = prior[from] * motion.success(corridor.label_at(from));
            let stayed = prior[i] * motion.failure(corridor.label_at(i));
            moved_in + stayed
        })
        .collect();
    Belief::from_normalized(predicted)
}

/// Sensor reweighting: returns the posterior belief and the evidence p(z).
pub fn update(
    belief: &Belief,
    corridor: &Corridor,
    sensor: &SensorModel,
    observation: CellLabel,
) -> (Belief, f64) {
    debug_assert_eq!(belief.len(), corridor.len());
    let weights = belief
        .probabilities()
        .iter()
        .zip(corridor.iter())
        .map(|(p, label)| p * sensor.likelihood(observation, label))
        .collect();
    Belief::normalized(weights)
}

/// Markov localization filter for a single robot in a circular corridor.
#[derive(Clone, Debug)]
pub struct MarkovLocalizer {
    corridor: Corridor,
    motion: MotionModel,
    sensor: SensorModel,
    order: UpdateOrder,
    skip_final_predict: bool,
    belief: Belief,
}
impl MarkovLocalizer {
    /// Create a filter with a uniform prior and the default [`UpdateOrder`].
    pub fn new(corridor: Corridor, motion: MotionModel, sensor: SensorModel) -> MarkovLocalizer {
        let belief = Belief::from_normalized(vec![1.0 / corridor.len() as f64; corridor.len()]);
        MarkovLocalizer {
            corridor,
            motion,
            sensor,
            order: UpdateOrder::default(),
            skip_final_predict: false,
            belief,
        }
    }
    pub fn with_order(mut self, order: UpdateOrder) -> MarkovLocalizer {
        self.order = order;
        self
    }
    /// Skip the motion model on the final step. Only affects [`UpdateOrder::UpdateThenPredict`].
    pub fn with_skip_final_predict(mut self, skip: bool) -> MarkovLocalizer {
        self.skip_final_predict = skip;
        self
    }
    /// Start from a given belief instead of the uniform prior.
    pub fn with_belief(mut self, belief: Belief) -> ConfigResult<MarkovLocalizer> {
        if belief.len() != self.corridor.len() {
            return Err(ConfigError::LengthMismatch {
                belief: belief.len(),
                corridor: self.corridor.len(),
            });
        }
        self.belief = belief;
        Ok(self)
    }
    /// Run one full time step for `observation`, honoring the configured order.
    ///
    /// `is_final` marks the last step of a run; see [`MarkovLocalizer::with_skip_final_predict`].
    /// Returns the evidence of the update.
    pub fn step(&mut self, observation: CellLabel, is_final: bool) -> f64 {
        let evidence = match self.order {
            UpdateOrder::PredictThenUpdate => {
                self.predict();
                self.update(observation)
            }
            UpdateOrder::UpdateThenPredict => {
                let evidence = self.update(observation);
                if !(is_final && self.skip_final_predict) {
                    self.predict();
                }
                evidence
            }
        };
        debug!(
            "filter step: observed {observation}, evidence {evidence:.6}, peak {:.6}",
            self.belief.max_probability()
        );
        evidence
    }
    /// Forget everything and go back to the uniform prior.
    pub fn reset(&mut self) {
        let n = self.corridor.len();
        self.belief = Belief::from_normalized(vec![1.0 / n as f64; n]);
    }
    pub fn corridor(&self) -> &Corridor {
        &self.corridor
    }
    pub fn motion(&self) -> &MotionModel {
        &self.motion
    }
    pub fn sensor(&self) -> &SensorModel {
        &self.sensor
    }
    pub fn order(&self) -> UpdateOrder {
        self.order
    }
}
impl BayesFilter for MarkovLocalizer {
    fn predict(&mut self) {
        self.belief = predict(&self.belief, &self.corridor, &self.motion);
    }
    fn update(&mut self, observation: CellLabel) -> f64 {
        let (posterior, evidence) = update(&self.belief, &self.corridor, &self.sensor, observation);
        self.belief = posterior;
        evidence
    }
    fn belief(&self) -> &Belief {
        &self.belief
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LabelProbabilities;
    use assert_approx_eq::assert_approx_eq;

    fn models(move_p: f64, sense_p: f64) -> (MotionModel, SensorModel) {
        (
            MotionModel::new(LabelProbabilities::uniform(move_p)).unwrap(),
            SensorModel::new(LabelProbabilities::uniform(sense_p)).unwrap(),
        )
    }

    #[test]
    fn test_symmetric_two_cell_predict_stays_uniform() {
        let corridor: Corridor = "WD".parse().unwrap();
        let (motion, _) = models(0.9, 0.8);
        let bar = predict(&Belief::uniform(2).unwrap(), &corridor, &motion);
        assert_approx_eq!(bar.probability(0), 0.5);
        assert_approx_eq!(bar.probability(1), 0.5);
    }

    #[test]
    fn test_update_reweights_by_sensor_likelihood() {
        let corridor: Corridor = "WD".parse().unwrap();
        let (_, sensor) = models(0.9, 0.8);
        let (posterior, evidence) = update(
            &Belief::uniform(2).unwrap(),
            &corridor,
            &sensor,
            CellLabel::Wall,
        );
        assert_approx_eq!(posterior.probability(0), 0.8);
        assert_approx_eq!(posterior.probability(1), 0.2);
        assert_approx_eq!(evidence, 0.5);
    }

    #[test]
    fn test_predict_wraps_mass_from_last_cell_into_first() {
        let corridor: Corridor = "WWWW".parse().unwrap();
        let (motion, _) = models(0.75, 0.8);
        let belief = Belief::from_weights(vec![0.0, 0.0, 0.0, 1.0]).unwrap();
        let bar = predict(&belief, &corridor, &motion);
        assert_approx_eq!(bar.probability(0), 0.75);
        assert_approx_eq!(bar.probability(3), 0.25);
        assert_approx_eq!(bar.probability(1), 0.0);
        assert_approx_eq!(bar.probability(2), 0.0);
    }

    #[test]
    fn test_predict_uses_label_of_source_cell() {
        // a door that is hard to leave: 0.2 success from door, 0.9 from wall
        let corridor: Corridor = "DW".parse().unwrap();
        let motion = MotionModel::new(LabelProbabilities::new(0.9, 0.2)).unwrap();
        let belief = Belief::from_weights(vec![0.6, 0.4]).unwrap();
        let bar = predict(&belief, &corridor, &motion);
        // bar[0] = b[1] * 0.9 + b[0] * 0.8
        assert_approx_eq!(bar.probability(0), 0.4 * 0.9 + 0.6 * 0.8);
        // bar[1] = b[0] * 0.2 + b[1] * 0.1
        assert_approx_eq!(bar.probability(1), 0.6 * 0.2 + 0.4 * 0.1);
        assert_approx_eq!(bar.sum(), 1.0, 1e-12);
    }

    #[test]
    fn test_predict_reads_only_the_previous_snapshot() {
        // an in-place sweep would carry cell 0's new mass on into cell 1
        let corridor: Corridor = "WWW".parse().unwrap();
        let (motion, _) = models(0.5, 0.8);
        let belief = Belief::from_weights(vec![0.0, 0.0, 1.0]).unwrap();
        let bar = predict(&belief, &corridor, &motion);
        assert_approx_eq!(bar.probability(0), 0.5);
        assert_approx_eq!(bar.probability(1), 0.0);
        assert_approx_eq!(bar.probability(2), 0.5);
    }

    #[test]
    fn test_steps_keep_belief_normalized_and_non_negative() {
        let corridor: Corridor = "WWDWDWDDWW".parse().unwrap();
        let motion = MotionModel::new(LabelProbabilities::new(0.7, 0.95)).unwrap();
        let sensor = SensorModel::new(LabelProbabilities::new(0.85, 0.6)).unwrap();
        for order in [UpdateOrder::PredictThenUpdate, UpdateOrder::UpdateThenPredict] {
            let mut filter = MarkovLocalizer::new(corridor.clone(), motion, sensor).with_order(order);
            for k in 0..200 {
                let z = if k % 3 == 0 { CellLabel::Door } else { CellLabel::Wall };
                filter.step(z, k == 199);
                assert_approx_eq!(filter.belief().sum(), 1.0, 1e-9);
                assert!(filter.belief().probabilities().iter().all(|&p| p >= 0.0));
            }
        }
    }

    #[test]
    fn test_orders_report_different_quantities() {
        let corridor: Corridor = "WD".parse().unwrap();
        let (motion, sensor) = models(0.9, 0.8);

        let mut posterior_first = MarkovLocalizer::new(corridor.clone(), motion, sensor);
        posterior_first.step(CellLabel::Wall, false);
        // uniform prior is unchanged by the symmetric predict, then reweighted
        assert_approx_eq!(posterior_first.belief().probability(0), 0.8);

        let mut prior_first = MarkovLocalizer::new(corridor, motion, sensor)
            .with_order(UpdateOrder::UpdateThenPredict);
        prior_first.step(CellLabel::Wall, false);
        // [0.8, 0.2] pushed through the motion model
        assert_approx_eq!(prior_first.belief().probability(0), 0.2 * 0.9 + 0.8 * 0.1);
        assert_approx_eq!(prior_first.belief().probability(1), 0.8 * 0.9 + 0.2 * 0.1);
    }

    #[test]
    fn test_skip_final_predict_reports_posterior_on_last_step() {
        let corridor: Corridor = "WD".parse().unwrap();
        let (motion, sensor) = models(0.9, 0.8);
        let mut filter = MarkovLocalizer::new(corridor, motion, sensor)
            .with_order(UpdateOrder::UpdateThenPredict)
            .with_skip_final_predict(true);
        filter.step(CellLabel::Wall, true);
        assert_approx_eq!(filter.belief().probability(0), 0.8);
    }

    #[test]
    fn test_skip_final_predict_is_ignored_when_predicting_first() {
        let corridor: Corridor = "WWD".parse().unwrap();
        let (motion, sensor) = models(0.9, 0.8);
        let mut plain = MarkovLocalizer::new(corridor.clone(), motion, sensor);
        let mut skipping =
            MarkovLocalizer::new(corridor, motion, sensor).with_skip_final_predict(true);
        plain.step(CellLabel::Door, true);
        skipping.step(CellLabel::Door, true);
        assert_eq!(plain.belief(), skipping.belief());
    }

    #[test]
    fn test_with_belief_checks_length_and_reset_restores_uniform() {
        let corridor: Corridor = "WDW".parse().unwrap();
        let (motion, sensor) = models(0.9, 0.8);
        let err = MarkovLocalizer::new(corridor.clone(), motion, sensor)
            .with_belief(Belief::uniform(2).unwrap())
            .unwrap_err();
        assert_eq!(err, ConfigError::LengthMismatch { belief: 2, corridor: 3 });

        let mut filter = MarkovLocalizer::new(corridor, motion, sensor)
            .with_belief(Belief::from_weights(vec![1.0, 0.0, 0.0]).unwrap())
            .unwrap();
        assert_eq!(filter.estimate(0.01), vec![0]);
        filter.reset();
        assert_eq!(filter.estimate(0.01), vec![0, 1, 2]);
    }

    #[test]
    fn test_extreme_parameters_do_not_collapse() {
        let corridor: Corridor = "DWWWWWWWWW".parse().unwrap();
        let (motion, sensor) = models(1.0 - 1e-12, 1.0 - 1e-12);
        let mut filter = MarkovLocalizer::new(corridor, motion, sensor);
        // contradictory readings drive most weights towards zero
        for k in 0..500 {
            let z = if k % 2 == 0 { CellLabel::Door } else { CellLabel::Wall };
            filter.step(z, false);
            assert_approx_eq!(filter.belief().sum(), 1.0, 1e-9);
            assert!(filter.belief().probabilities().iter().all(|p| p.is_finite()));
        }
    }
}
