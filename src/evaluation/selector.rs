//! Multimodal prediction selection.

use std::collections::BTreeMap;

use crate::config::EvaluatorConfig;
use crate::metrics::final_l2;
use crate::types::{frames, PedestrianId, Scene, SceneId, TrackRow};
use crate::utils::warn_once;
use crate::{Error, Result};

/// Submitted rows of one scene, split by multimodal candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidates {
    /// Primary pedestrian path per prediction number.
    pub primary: BTreeMap<u32, Vec<TrackRow>>,
    /// Neighbour paths per prediction number, keyed by pedestrian.
    pub neighbours: BTreeMap<u32, BTreeMap<PedestrianId, Vec<TrackRow>>>,
}

impl Candidates {
    /// Split a submitted scene into candidates `0..=num_predictions`.
    ///
    /// Rows predicted for a different scene and rows beyond `num_predictions`
    /// are dropped. Rows without a prediction number count as candidate 0.
    pub fn from_submission(scene_id: SceneId, submission: &Scene, num_predictions: u32) -> Self {
        let keep = |row: &&TrackRow| {
            row.scene_id.map_or(true, |id| id == scene_id) && row.candidate() <= num_predictions
        };

        let mut candidates = Self::default();
        for row in submission.primary().iter().filter(keep) {
            candidates.primary.entry(row.candidate()).or_default().push(*row);
        }
        for row in submission.neighbours().iter().flatten().filter(keep) {
            candidates
                .neighbours
                .entry(row.candidate())
                .or_default()
                .entry(row.pedestrian)
                .or_default()
                .push(*row);
        }
        candidates
    }
}

/// The chosen candidate of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub prediction_number: u32,
    pub primary: Vec<TrackRow>,
    pub neighbours: BTreeMap<PedestrianId, Vec<TrackRow>>,
}

/// Highest prediction number found on the primary path of the first
/// submitted scene, clamped to `config.max_prediction_number`.
pub fn discover_prediction_count(first_scene: Option<&Scene>, config: &EvaluatorConfig) -> u32 {
    let observed = first_scene
        .map(|scene| scene.primary().iter().map(TrackRow::candidate).max().unwrap_or(0))
        .unwrap_or(0);

    if observed > config.max_prediction_number {
        warn_once(&clamp_warning(config.max_prediction_number));
        return config.max_prediction_number;
    }
    observed
}

fn clamp_warning(max_prediction_number: u32) -> String {
    format!(
        "{} predictions at most, ignoring prediction numbers above {}",
        max_prediction_number + 1,
        max_prediction_number
    )
}

/// Pick the candidate whose final point is closest to the ground truth.
///
/// Candidates are visited in ascending prediction number and only a strictly
/// smaller error replaces the current best, so the lowest number wins ties.
/// Empty candidates are never chosen; `None` means no candidate has rows.
pub fn select_best(ground_truth_primary: &[TrackRow], candidates: &BTreeMap<u32, Vec<TrackRow>>) -> Option<u32> {
    let mut best = None;
    let mut best_error = f64::INFINITY;

    for (&prediction_number, path) in candidates {
        let error = final_l2(ground_truth_primary, path);
        if error < best_error {
            best_error = error;
            best = Some(prediction_number);
        }
    }

    best
}

/// Select the best candidate of a scene and check its frame alignment.
///
/// The selected primary path must cover exactly the last
/// `config.prediction_horizon` frames of the ground-truth primary path.
pub fn select(
    ground_truth: &Scene,
    submission: &Scene,
    num_predictions: u32,
    config: &EvaluatorConfig,
) -> Result<Selection> {
    let scene_id = ground_truth.id;
    let gt_primary = ground_truth.primary();
    if gt_primary.is_empty() {
        return Err(Error::EmptyPath { scene_id });
    }

    let mut candidates = Candidates::from_submission(scene_id, submission, num_predictions);
    let prediction_number =
        select_best(gt_primary, &candidates.primary).ok_or(Error::EmptyPath { scene_id })?;

    let primary = candidates.primary.remove(&prediction_number).unwrap_or_default();
    let neighbours = candidates.neighbours.remove(&prediction_number).unwrap_or_default();

    let gt_frames = frames(gt_primary);
    let expected = gt_frames[gt_frames.len().saturating_sub(config.prediction_horizon)..].to_vec();
    let found = frames(&primary);
    if expected != found {
        return Err(Error::FrameMismatch {
            scene_id,
            expected,
            found,
        });
    }

    log::debug!("scene {}: selected prediction {}", scene_id, prediction_number);

    Ok(Selection {
        prediction_number,
        primary,
        neighbours,
    })
}
