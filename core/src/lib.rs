//! Markov localization toolbox for a robot in a circular corridor
//!
//! This crate implements a discrete-state recursive Bayes filter ("Markov localization") for a
//! robot that moves along a one-dimensional, circular corridor made of wall and door cells.
//! The robot cannot observe its position directly. Each time step it tries to move forward one
//! cell (which may fail) and takes a noisy reading that says either "wall" or "door". The filter
//! keeps a probability distribution over all cells and refines it from those readings.
//!
//! The reference text is _Probabilistic Robotics_ by Thrun, Burgard and Fox (Chapter 2 and the
//! hallway example of Figure 1.1). Variables are named for the quantity they represent rather
//! than the symbol used in the book.
//!
//! ## Crate overview
//!
//! - [corridor]: cell labels, the circular corridor and preset layouts.
//! - [model]: motion and sensor models keyed by cell label.
//! - [belief]: the probability vector over cells and the most-likely-cell selector.
//! - [filter]: the predict and update steps and the [`filter::MarkovLocalizer`].
//! - [sim]: the simulated ground-truth robot, run configuration, run loop and CSV results.
//! - [report]: per-step text trace lines.
//! - [error]: construction-time configuration errors.
//!
//! ## Quick start
//!
//! ```
//! use markov::sim::{SimulationConfig, run_simulation};
//! use markov::corridor::CorridorLayout;
//!
//! let config = SimulationConfig {
//!     layout: CorridorLayout::Textbook,
//!     steps: 20,
//!     ..SimulationConfig::default()
//! };
//! let result = run_simulation(&config).unwrap();
//! assert_eq!(result.len(), 20);
//! let belief = result.final_belief().unwrap();
//! assert!((belief.sum() - 1.0).abs() < 1e-9);
//! ```
//!
//! Or drive the filter directly:
//!
//! ```
//! use markov::{BayesFilter, CellLabel, Corridor, LabelProbabilities, MarkovLocalizer, MotionModel, SensorModel};
//!
//! let corridor: Corridor = "WWDWDWDDWW".parse().unwrap();
//! let motion = MotionModel::new(LabelProbabilities::uniform(0.9)).unwrap();
//! let sensor = SensorModel::new(LabelProbabilities::new(0.8, 0.7)).unwrap();
//! let mut filter = MarkovLocalizer::new(corridor, motion, sensor);
//! filter.step(CellLabel::Door, false);
//! println!("most likely: {:?}", filter.estimate(0.01));
//! ```
pub mod belief;
pub mod corridor;
pub mod error;
pub mod filter;
pub mod model;
pub mod report;
pub mod sim;

pub use belief::{Belief, most_likely_locations};
pub use corridor::{CellLabel, Corridor, CorridorLayout};
pub use error::{ConfigError, ConfigResult};
pub use filter::{BayesFilter, MarkovLocalizer, UpdateOrder};
pub use model::{LabelProbabilities, MotionModel, SensorModel};
