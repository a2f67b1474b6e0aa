//! Trajectory prediction evaluation.
//!
//! The pipeline for every ground-truth scene is:
//!
//! - [`selector`] - split the submitted rows into multimodal candidates and
//!   pick the one with the smallest final displacement error
//! - [`scene`] - score the selected candidate (ADE, FDE, collisions)
//! - `accumulator` - sum the scores globally and per category
//! - `aggregator` - drive the above over a dataset and store results per model

pub mod selector;
pub mod scene;
mod accumulator;
mod aggregator;
mod dataset;

pub use selector::{select_best, Candidates, Selection};
pub use scene::{evaluate_scene, SceneEvaluation};
pub use accumulator::{CategoryScore, ScoreAccumulator};
pub use aggregator::{EvaluationResults, ResultBundle, TrajnetEvaluator};
pub use dataset::evaluate_dataset;
