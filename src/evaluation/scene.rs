//! Per-scene scoring of a selected prediction.

use crate::config::EvaluatorConfig;
use crate::metrics::{average_l2, collision, final_l2};
use crate::types::{Scene, SceneId};
use crate::{Error, Result};

use super::selector::Selection;

/// Scores of one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEvaluation {
    pub scene_id: SceneId,
    /// Candidate that was scored.
    pub prediction_number: u32,
    pub average_l2: f64,
    pub final_l2: f64,
    /// Whether collision scoring ran for this scene.
    pub collision_checked: bool,
    pub collided_with_gt: bool,
    pub collided_with_pred_neighbour: bool,
    pub has_pred_neighbours: bool,
}

/// Score the selected prediction of a scene against its ground truth.
///
/// Collision flags stay `false` when `config.disable_collision` is set.
pub fn evaluate_scene(
    ground_truth: &Scene,
    selection: &Selection,
    config: &EvaluatorConfig,
) -> Result<SceneEvaluation> {
    let scene_id = ground_truth.id;
    let gt_primary = ground_truth.primary();
    let prediction = selection.primary.as_slice();
    if gt_primary.is_empty() || prediction.is_empty() {
        return Err(Error::EmptyPath { scene_id });
    }

    let has_pred_neighbours = selection.neighbours.values().any(|path| !path.is_empty());

    let (collided_with_gt, collided_with_pred_neighbour) = if config.disable_collision {
        (false, false)
    } else {
        let with_gt = ground_truth
            .neighbours()
            .iter()
            .any(|neighbour| collision(prediction, neighbour, config));
        let with_pred = has_pred_neighbours
            && selection
                .neighbours
                .values()
                .any(|neighbour| collision(prediction, neighbour, config));
        (with_gt, with_pred)
    };

    Ok(SceneEvaluation {
        scene_id,
        prediction_number: selection.prediction_number,
        average_l2: average_l2(gt_primary, prediction),
        final_l2: final_l2(gt_primary, prediction),
        collision_checked: !config.disable_collision,
        collided_with_gt,
        collided_with_pred_neighbour,
        has_pred_neighbours,
    })
}

/// Select the best candidate of a submitted scene and score it.
pub fn score_scene(
    ground_truth: &Scene,
    submission: &Scene,
    num_predictions: u32,
    config: &EvaluatorConfig,
) -> Result<SceneEvaluation> {
    let selection = super::selector::select(ground_truth, submission, num_predictions, config)?;
    evaluate_scene(ground_truth, &selection, config)
}
