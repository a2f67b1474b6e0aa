//! Evaluation of one submitted dataset file against its ground truth.

use crate::config::EvaluatorConfig;
use crate::reader::SceneReader;
use crate::Result;

use super::aggregator::{ResultBundle, TrajnetEvaluator};

/// Evaluate one submission against its ground truth.
///
/// Builds the category index from the ground-truth tags, scores every scene
/// and returns the model's scores.
///
/// # Arguments
/// * `ground_truth` - Reader over the ground-truth scenes
/// * `submission` - Reader over the submitted scenes
/// * `name` - Model name the results are stored under
/// * `config` - Evaluation options
pub fn evaluate_dataset<G, S>(
    ground_truth: &G,
    submission: &S,
    name: &str,
    config: &EvaluatorConfig,
) -> Result<ResultBundle>
where
    G: SceneReader + ?Sized,
    S: SceneReader + ?Sized,
{
    let indexes = ground_truth.category_index();
    let evaluator = TrajnetEvaluator::new(
        ground_truth.scenes(),
        submission.scenes(),
        indexes,
        config.clone(),
    )?;

    evaluator.score(name, config.disable_collision)
}
