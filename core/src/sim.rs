//! Simulation utilities for running the Markov localization filter against a simulated robot.
//!
//! This module provides:
//! - [`GroundTruthSimulator`], the hidden robot that moves and senses using the same stochastic
//!   laws the filter assumes
//! - [`SimulationConfig`], the full description of a run, readable from and writable to
//!   JSON, YAML or TOML
//! - [`Simulation`], the step-by-step run loop, and [`run_simulation`] to run it to completion
//! - [`SimulationResult`] with CSV import/export of the per-step records
//!
//! Every random draw of a run (start location, motion outcome, sensor outcome) comes from a
//! single [`StdRng`] seeded from [`SimulationConfig::seed`], so a fixed seed reproduces the
//! whole run.
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardUniform};
use serde::{Deserialize, Serialize};

use crate::belief::{Belief, DEFAULT_TOLERANCE};
use crate::corridor::{CellLabel, Corridor, CorridorLayout};
use crate::error::{ConfigError, ConfigResult};
use crate::filter::{BayesFilter, MarkovLocalizer, UpdateOrder};
use crate::model::{LabelProbabilities, MotionModel, SensorModel};
use crate::report::{MAX_PRECISION, TraceFormat};

/// Outcome of one ground-truth step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroundTruthStep {
    /// True location after the move.
    pub location: usize,
    /// What the sensor reported.
    pub observation: CellLabel,
    /// Whether the move actually advanced the robot.
    pub moved: bool,
    /// Whether the reading matched the true label.
    pub sensed_correctly: bool,
}

/// The hidden robot. Its location is never shown to the filter.
#[derive(Clone, Debug)]
pub struct GroundTruthSimulator {
    corridor: Corridor,
    motion: MotionModel,
    sensor: SensorModel,
    location: usize,
}
impl GroundTruthSimulator {
    /// Place the robot uniformly at random in the corridor.
    pub fn new<R: Rng + ?Sized>(
        corridor: Corridor,
        motion: MotionModel,
        sensor: SensorModel,
        rng: &mut R,
    ) -> GroundTruthSimulator {
        let location = rng.random_range(0..corridor.len());
        GroundTruthSimulator {
            corridor,
            motion,
            sensor,
            location,
        }
    }
    /// Place the robot at a known cell.
    pub fn with_location(
        corridor: Corridor,
        motion: MotionModel,
        sensor: SensorModel,
        location: usize,
    ) -> ConfigResult<GroundTruthSimulator> {
        if location >= corridor.len() {
            return Err(ConfigError::StartOutOfRange {
                location,
                length: corridor.len(),
            });
        }
        Ok(GroundTruthSimulator {
            corridor,
            motion,
            sensor,
            location,
        })
    }
    pub fn location(&self) -> usize {
        self.location
    }
    /// Attempt one forward move, then take one sensor reading at the resulting cell.
    pub fn advance_and_sense<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GroundTruthStep {
        let p_move = self.motion.success(self.corridor.label_at(self.location));
        let move_draw: f64 = StandardUniform.sample(rng);
        let moved = move_draw < p_move;
        if moved {
            self.location = self.corridor.successor(self.location);
        }

        let truth = self.corridor.label_at(self.location);
        let sense_draw: f64 = StandardUniform.sample(rng);
        let sensed_correctly = sense_draw < self.sensor.correct(truth);
        let observation = if sensed_correctly {
            truth
        } else {
            truth.opposite()
        };
        GroundTruthStep {
            location: self.location,
            observation,
            moved,
            sensed_correctly,
        }
    }
}

/// Logging preferences stored alongside a run configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (off, error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path; logs go to stderr when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}
impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
/// Default seed value for reproducible simulations
fn default_seed() -> u64 {
    42
}
fn default_steps() -> usize {
    10
}
fn default_probabilities() -> LabelProbabilities {
    LabelProbabilities::uniform(0.999)
}
fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

/// Complete description of a simulation run.
///
/// ## Example (TOML)
///
/// ```toml
/// steps = 25
/// seed = 7
/// order = "predict_then_update"
///
/// [layout]
/// kind = "textbook"
///
/// [motion]
/// wall = 0.9
/// door = 0.9
///
/// [sensor]
/// wall = 0.8
/// door = 0.7
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Corridor to simulate.
    #[serde(default)]
    pub layout: CorridorLayout,
    /// Number of time steps.
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Random number generator seed for deterministic runs.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Probability that a move attempted from a wall / door cell succeeds.
    #[serde(default = "default_probabilities")]
    pub motion: LabelProbabilities,
    /// Probability that the sensor reports a wall / door cell correctly.
    #[serde(default = "default_probabilities")]
    pub sensor: LabelProbabilities,
    /// Order of the predict and update steps.
    #[serde(default)]
    pub order: UpdateOrder,
    /// Skip the motion model on the last step (only meaningful for `update_then_predict`).
    #[serde(default)]
    pub skip_final_predict: bool,
    /// Absolute tolerance used to report tied most-likely cells.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Fixed start cell for the robot; drawn at random when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location: Option<usize>,
    /// Trace line layout.
    #[serde(default)]
    pub trace: TraceFormat,
    #[serde(default)]
    pub logging: LoggingConfig,
}
impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            layout: CorridorLayout::default(),
            steps: default_steps(),
            seed: default_seed(),
            motion: default_probabilities(),
            sensor: default_probabilities(),
            order: UpdateOrder::default(),
            skip_final_predict: false,
            tolerance: default_tolerance(),
            start_location: None,
            trace: TraceFormat::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Check every construction invariant and build the validated pieces of the run.
    pub fn validate(&self) -> ConfigResult<(Corridor, MotionModel, SensorModel)> {
        let corridor = self.layout.build()?;
        let motion = MotionModel::new(self.motion)?;
        let sensor = SensorModel::new(self.sensor)?;
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if self.trace.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision {
                precision: self.trace.precision,
                max: MAX_PRECISION,
            });
        }
        if let Some(location) = self.start_location
            && location >= corridor.len()
        {
            return Err(ConfigError::StartOutOfRange {
                location,
                length: corridor.len(),
            });
        }
        Ok((corridor, motion, sensor))
    }
    /// Write the configuration to a JSON file (pretty-printed).
    pub fn to_json<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self).map_err(io::Error::other)
    }
    /// Read the configuration from a JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        serde_json::from_reader(file).map_err(io::Error::other)
    }
    /// Write the configuration as YAML.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;
        let s = serde_yaml::to_string(self).map_err(io::Error::other)?;
        file.write_all(s.as_bytes())
    }
    /// Read the configuration from YAML.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        serde_yaml::from_reader(file).map_err(io::Error::other)
    }
    /// Write the configuration as TOML.
    pub fn to_toml<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;
        let s = toml::to_string(self).map_err(io::Error::other)?;
        file.write_all(s.as_bytes())
    }
    /// Read the configuration from TOML.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let mut s = String::new();
        let mut file = File::open(path)?;
        file.read_to_string(&mut s)?;
        toml::from_str(&s).map_err(io::Error::other)
    }
    /// Generic write: choose format by file extension (.json/.yaml/.yml/.toml)
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let p = path.as_ref();
        match extension(p).as_deref() {
            Some("json") => self.to_json(p),
            Some("yaml") | Some("yml") => self.to_yaml(p),
            Some("toml") => self.to_toml(p),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "unsupported file extension",
            )),
        }
    }
    /// Generic read: choose format by file extension (.json/.yaml/.yml/.toml)
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let p = path.as_ref();
        match extension(p).as_deref() {
            Some("json") => Self::from_json(p),
            Some("yaml") | Some("yml") => Self::from_yaml(p),
            Some("toml") => Self::from_toml(p),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "unsupported file extension",
            )),
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}

/// Everything observed and estimated during one time step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    pub true_location: usize,
    pub observation: CellLabel,
    pub moved: bool,
    pub sensed_correctly: bool,
    /// p(z) of the step's sensor update
    pub evidence: f64,
    /// Cells within the configured tolerance of the peak belief, ascending
    pub most_likely: Vec<usize>,
    /// Belief reported at the end of the step
    pub belief: Belief,
}
impl StepRecord {
    /// Whether the true location is among the most likely cells.
    pub fn is_hit(&self) -> bool {
        self.most_likely.contains(&self.true_location)
    }
}

/// A run in progress. Yields one [`StepRecord`] per time step.
pub struct Simulation {
    rng: StdRng,
    truth: GroundTruthSimulator,
    filter: MarkovLocalizer,
    steps: usize,
    step: usize,
    tolerance: f64,
}
impl Simulation {
    pub fn new(config: &SimulationConfig) -> ConfigResult<Simulation> {
        let (corridor, motion, sensor) = config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let truth = match config.start_location {
            Some(location) => {
                GroundTruthSimulator::with_location(corridor.clone(), motion, sensor, location)?
            }
            None => GroundTruthSimulator::new(corridor.clone(), motion, sensor, &mut rng),
        };
        info!(
            "Simulating {} steps in a {}-cell corridor {} starting at cell {} (seed {}, {:?})",
            config.steps,
            corridor.len(),
            corridor,
            truth.location(),
            config.seed,
            config.order
        );
        let filter = MarkovLocalizer::new(corridor, motion, sensor)
            .with_order(config.order)
            .with_skip_final_predict(config.skip_final_predict);
        Ok(Simulation {
            rng,
            truth,
            filter,
            steps: config.steps,
            step: 0,
            tolerance: config.tolerance,
        })
    }
    pub fn filter(&self) -> &MarkovLocalizer {
        &self.filter
    }
    /// Steps left to run.
    pub fn remaining(&self) -> usize {
        self.steps - self.step
    }
}
impl Iterator for Simulation {
    type Item = StepRecord;

    fn next(&mut self) -> Option<StepRecord> {
        if self.step >= self.steps {
            return None;
        }
        let truth = self.truth.advance_and_sense(&mut self.rng);
        let is_final = self.step + 1 == self.steps;
        let evidence = self.filter.step(truth.observation, is_final);
        let belief = self.filter.belief().clone();
        let record = StepRecord {
            step: self.step,
            true_location: truth.location,
            observation: truth.observation,
            moved: truth.moved,
            sensed_correctly: truth.sensed_correctly,
            evidence,
            most_likely: belief.most_likely(self.tolerance),
            belief,
        };
        debug!(
            "step {}: true cell {}, sensed {} ({}), most likely {:?}",
            record.step,
            record.true_location,
            record.observation,
            if record.sensed_correctly { "correct" } else { "wrong" },
            record.most_likely
        );
        self.step += 1;
        Some(record)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

/// Run a simulation to completion.
pub fn run_simulation(config: &SimulationConfig) -> ConfigResult<SimulationResult> {
    let records: Vec<StepRecord> = Simulation::new(config)?.collect();
    let result = SimulationResult {
        name: "Markov Localization".to_string(),
        records,
    };
    result.log_summary();
    Ok(result)
}

/// Records of a complete run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationResult {
    /// Name or identifier for this run
    pub name: String,
    pub records: Vec<StepRecord>,
}
impl SimulationResult {
    pub fn new(name: &str) -> Self {
        SimulationResult {
            name: name.to_string(),
            records: Vec::new(),
        }
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// Fraction of steps whose true location was among the most likely cells.
    pub fn hit_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let hits = self.records.iter().filter(|r| r.is_hit()).count();
        hits as f64 / self.records.len() as f64
    }
    /// One-line description of the run and its hit rate.
    pub fn summary(&self) -> String {
        format!(
            "Finished {} steps; true location in the most likely set {:.1}% of the time",
            self.len(),
            100.0 * self.hit_rate()
        )
    }
    /// Log [`SimulationResult::summary`] at info level.
    pub fn log_summary(&self) {
        info!("{}", self.summary());
    }
    pub fn final_belief(&self) -> Option<&Belief> {
        self.records.last().map(|r| &r.belief)
    }
    /// Write the records as CSV: one row per step, one `p{i}` column per cell.
    pub fn write_csv<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        let cells = self.records.first().map_or(0, |r| r.belief.len());
        let mut header: Vec<String> = [
            "step",
            "true_location",
            "observation",
            "moved",
            "sensed_correctly",
            "evidence",
            "most_likely",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        header.extend((0..cells).map(|i| format!("p{i}")));
        writer.write_record(&header)?;

        for record in &self.records {
            let mut row = vec![
                record.step.to_string(),
                record.true_location.to_string(),
                record.observation.to_string(),
                record.moved.to_string(),
                record.sensed_correctly.to_string(),
                record.evidence.to_string(),
                crate::report::format_location_set(&record.most_likely),
            ];
            row.extend(record.belief.probabilities().iter().map(|p| p.to_string()));
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
    /// Writes the records to a CSV file.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)?;
        self.write_csv(file)
    }
    /// Read records previously written with [`SimulationResult::to_csv`].
    pub fn from_csv<P: AsRef<Path>>(path: P, name: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
        let mut result = SimulationResult::new(name);
        for row in rdr.records() {
            let row = row?;
            if row.len() < 8 {
                return Err("CSV record doesn't have enough fields".into());
            }
            let observation = match &row[2] {
                "wall" => CellLabel::Wall,
                "door" => CellLabel::Door,
                other => return Err(format!("unknown observation '{other}'").into()),
            };
            let most_likely = if row[6].is_empty() {
                Vec::new()
            } else {
                row[6]
                    .split(',')
                    .map(|s| s.parse::<usize>())
                    .collect::<Result<Vec<_>, _>>()?
            };
            let weights = row
                .iter()
                .skip(7)
                .map(|s| s.parse::<f64>())
                .collect::<Result<Vec<_>, _>>()?;
            result.records.push(StepRecord {
                step: row[0].parse()?,
                true_location: row[1].parse()?,
                observation,
                moved: row[3].parse()?,
                sensed_correctly: row[4].parse()?,
                evidence: row[5].parse()?,
                most_likely,
                belief: Belief::from_probabilities(weights)?,
            });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn certain_enough() -> (MotionModel, SensorModel) {
        (
            MotionModel::new(LabelProbabilities::uniform(1.0 - 1e-15)).unwrap(),
            SensorModel::new(LabelProbabilities::uniform(1.0 - 1e-15)).unwrap(),
        )
    }

    #[test]
    fn test_ground_truth_start_is_inside_corridor() {
        let corridor: Corridor = "WWDWD".parse().unwrap();
        let (motion, sensor) = certain_enough();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let truth = GroundTruthSimulator::new(corridor.clone(), motion, sensor, &mut rng);
            assert!(truth.location() < corridor.len());
        }
        assert!(GroundTruthSimulator::with_location(corridor, motion, sensor, 5).is_err());
    }

    #[test]
    fn test_near_certain_robot_walks_and_reads_correctly() {
        let corridor: Corridor = "WDW".parse().unwrap();
        let (motion, sensor) = certain_enough();
        let mut rng = StdRng::seed_from_u64(1);
        let mut truth = GroundTruthSimulator::with_location(corridor.clone(), motion, sensor, 2).unwrap();
        for expected in [0, 1, 2, 0, 1] {
            let step = truth.advance_and_sense(&mut rng);
            assert!(step.moved);
            assert!(step.sensed_correctly);
            assert_eq!(step.location, expected);
            assert_eq!(step.observation, corridor.label_at(expected));
        }
    }

    #[test]
    fn test_ground_truth_frequencies_follow_probabilities() {
        let corridor: Corridor = "WWWW".parse().unwrap();
        let motion = MotionModel::new(LabelProbabilities::uniform(0.3)).unwrap();
        let sensor = SensorModel::new(LabelProbabilities::uniform(0.8)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut truth = GroundTruthSimulator::with_location(corridor, motion, sensor, 0).unwrap();
        let trials = 20_000;
        let (mut moves, mut correct) = (0, 0);
        for _ in 0..trials {
            let step = truth.advance_and_sense(&mut rng);
            moves += step.moved as usize;
            correct += step.sensed_correctly as usize;
        }
        assert_approx_eq!(moves as f64 / trials as f64, 0.3, 0.02);
        assert_approx_eq!(correct as f64 / trials as f64, 0.8, 0.02);
    }

    #[test]
    fn test_wrong_reading_reports_opposite_label() {
        let corridor: Corridor = "D".parse().unwrap();
        let motion = MotionModel::new(LabelProbabilities::uniform(0.5)).unwrap();
        let sensor = SensorModel::new(LabelProbabilities::uniform(0.5)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut truth = GroundTruthSimulator::with_location(corridor, motion, sensor, 0).unwrap();
        for _ in 0..100 {
            let step = truth.advance_and_sense(&mut rng);
            assert_eq!(step.location, 0);
            let expected = if step.sensed_correctly { CellLabel::Door } else { CellLabel::Wall };
            assert_eq!(step.observation, expected);
        }
    }

    #[test]
    fn test_validate_reports_each_invariant() {
        let mut config = SimulationConfig::default();
        assert!(config.validate().is_ok());

        config.motion.door = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange { .. })
        ));

        let mut config = SimulationConfig::default();
        config.tolerance = -0.5;
        assert_eq!(config.validate().unwrap_err(), ConfigError::InvalidTolerance(-0.5));

        let mut config = SimulationConfig::default();
        config.start_location = Some(10);
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::StartOutOfRange { location: 10, length: 10 }
        );

        let mut config = SimulationConfig::default();
        config.trace.precision = 1 << 40;
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::InvalidPrecision { precision: 1 << 40, max: MAX_PRECISION }
        );
        config.trace.precision = MAX_PRECISION;
        assert!(config.validate().is_ok());

        let mut config = SimulationConfig::default();
        config.layout = CorridorLayout::Custom { cells: String::new() };
        assert_eq!(config.validate().unwrap_err(), ConfigError::EmptyCorridor);
    }

    #[test]
    fn test_zero_steps_yields_empty_result() {
        let config = SimulationConfig {
            steps: 0,
            ..SimulationConfig::default()
        };
        let result = run_simulation(&config).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.hit_rate(), 0.0);
        assert!(result.final_belief().is_none());
    }

    #[test]
    fn test_simulation_yields_configured_number_of_steps() {
        let config = SimulationConfig {
            steps: 17,
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(&config).unwrap();
        assert_eq!(sim.size_hint(), (17, Some(17)));
        let first = sim.next().unwrap();
        assert_eq!(first.step, 0);
        assert_eq!(sim.by_ref().count(), 16);
        assert!(sim.next().is_none());
    }

    #[test]
    fn test_csv_export_and_import() {
        let config = SimulationConfig {
            layout: CorridorLayout::Textbook,
            steps: 30,
            ..SimulationConfig::default()
        };
        let result = run_simulation(&config).unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().with_extension("csv");
        result.to_csv(&path).unwrap();

        let loaded = SimulationResult::from_csv(&path, "reloaded").unwrap();
        assert_eq!(loaded.name, "reloaded");
        assert_eq!(loaded.records, result.records);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_summary_reports_steps_and_hit_rate() {
        let config = SimulationConfig {
            steps: 4,
            ..SimulationConfig::default()
        };
        let mut result = run_simulation(&config).unwrap();
        for (k, record) in result.records.iter_mut().enumerate() {
            record.most_likely = if k == 0 { vec![record.true_location] } else { Vec::new() };
        }
        assert_eq!(
            result.summary(),
            "Finished 4 steps; true location in the most likely set 25.0% of the time"
        );
        assert_eq!(
            SimulationResult::new("empty").summary(),
            "Finished 0 steps; true location in the most likely set 0.0% of the time"
        );
    }

    #[test]
    fn test_csv_header_has_one_column_per_cell() {
        let config = SimulationConfig {
            steps: 1,
            layout: CorridorLayout::Custom { cells: "WDW".to_string() },
            ..SimulationConfig::default()
        };
        let result = run_simulation(&config).unwrap();
        let mut buffer = Vec::new();
        result.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "step,true_location,observation,moved,sensed_correctly,evidence,most_likely,p0,p1,p2"
        );
    }
}
