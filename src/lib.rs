//! # trajnet-rs - Trajectory Prediction Evaluation
//!
//! Scores multi-agent pedestrian trajectory predictions against ground truth.
//!
//! For every scene the evaluator picks the best of up to three predicted
//! futures for the primary pedestrian, measures its displacement error and
//! checks it for collisions with ground-truth and predicted neighbours. The
//! results are aggregated globally and per scene category
//! (static, linear, forced non-linear, non-linear).
//!
//! ## Features
//!
//! - Multimodal selection by minimum final displacement error
//! - ADE / FDE and collision scoring per scene
//! - Category-aware aggregation for several models side by side
//! - Row-oriented report assembly
//! - Optional `parallel` feature for per-scene evaluation with rayon
//!
//! ## Example
//!
//! ```rust,ignore
//! use trajnet_rs::{evaluate_dataset, EvaluatorConfig, InMemoryReader};
//!
//! let ground_truth: InMemoryReader = load_ground_truth();
//! let submission: InMemoryReader = load_submission();
//!
//! let bundle = evaluate_dataset(&ground_truth, &submission, "kf", &EvaluatorConfig::default())?;
//! println!("ADE {:.3} FDE {:.3}", bundle.average_l2, bundle.final_l2);
//! ```

// Public modules
pub mod types;
pub mod category;
pub mod metrics;
pub mod config;
pub mod reader;
pub mod evaluation;
pub mod report;
pub mod utils;

// Re-exports for convenience
pub use types::{Frame, PedestrianId, SceneId, Scene, TrackRow};
pub use category::{Category, CategoryIndex};
pub use config::EvaluatorConfig;
pub use reader::{InMemoryReader, SceneReader};
pub use evaluation::{
    evaluate_dataset, select_best, CategoryScore, EvaluationResults, ResultBundle,
    SceneEvaluation, ScoreAccumulator, TrajnetEvaluator,
};
pub use report::{ReportRow, Table};

// Error types
pub use crate::error::{Error, Result};

mod error {
    use crate::types::{Frame, SceneId};
    use thiserror::Error;

    /// Errors that can occur while evaluating trajectory predictions
    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("frame numbers are not consistent in scene {scene_id}: expected {expected:?}, got {found:?}")]
        FrameMismatch {
            scene_id: SceneId,
            expected: Vec<Frame>,
            found: Vec<Frame>,
        },

        #[error("no submitted scene for ground-truth scene {0}")]
        MissingSubmission(SceneId),

        #[error("empty path in scene {scene_id}")]
        EmptyPath { scene_id: SceneId },

        #[error("ground truth contains no scenes")]
        NoScenes,

        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Unknown category tag: {0}")]
        UnknownCategory(u8),
    }

    /// Result type for trajnet operations
    pub type Result<T> = std::result::Result<T, Error>;
}
