//! Displacement and collision metrics between two paths.

use std::collections::HashMap;

use nalgebra::{distance, Point2};

use crate::config::EvaluatorConfig;
use crate::types::{Frame, TrackRow};

/// Average displacement error (ADE).
///
/// Mean Euclidean distance between each predicted row and the ground-truth row
/// at the same offset from the end of the path. Returns infinity if either
/// path is empty.
pub fn average_l2(ground_truth: &[TrackRow], prediction: &[TrackRow]) -> f64 {
    let n = ground_truth.len().min(prediction.len());
    if n == 0 {
        return f64::INFINITY;
    }

    let gt_tail = &ground_truth[ground_truth.len() - n..];
    let pred_tail = &prediction[prediction.len() - n..];

    let total: f64 = gt_tail
        .iter()
        .zip(pred_tail)
        .map(|(gt, pred)| distance(&gt.point(), &pred.point()))
        .sum();

    total / n as f64
}

/// Final displacement error (FDE).
///
/// Euclidean distance between the last rows of both paths. Returns infinity
/// if either path is empty.
pub fn final_l2(ground_truth: &[TrackRow], prediction: &[TrackRow]) -> f64 {
    match (ground_truth.last(), prediction.last()) {
        (Some(gt), Some(pred)) => distance(&gt.point(), &pred.point()),
        _ => f64::INFINITY,
    }
}

/// Whether two tracks come within the collision threshold of each other.
///
/// Rows are paired by frame and every common frame is checked. Between two
/// adjacent common frames both tracks are linearly interpolated into
/// `interpolation_parts + 1` points and compared pairwise; frames with a gap
/// between them are not interpolated. Tracks without a common frame never
/// collide.
pub fn collision(track: &[TrackRow], other: &[TrackRow], config: &EvaluatorConfig) -> bool {
    let other_by_frame: HashMap<Frame, Point2<f64>> =
        other.iter().map(|row| (row.frame, row.point())).collect();

    let common: Vec<(Frame, Point2<f64>, Point2<f64>)> = track
        .iter()
        .filter_map(|row| {
            other_by_frame
                .get(&row.frame)
                .map(|p| (row.frame, row.point(), *p))
        })
        .collect();

    let threshold = config.collision_threshold();

    if common.iter().any(|(_, a, b)| distance(a, b) <= threshold) {
        return true;
    }

    let parts = config.interpolation_parts.max(1);
    common.windows(2).any(|w| {
        let (f0, a0, b0) = w[0];
        let (f1, a1, b1) = w[1];
        if f1 != f0 + 1 {
            return false;
        }
        (1..parts).any(|k| {
            let t = k as f64 / parts as f64;
            let a = a0 + (a1 - a0) * t;
            let b = b0 + (b1 - b0) * t;
            distance(&a, &b) <= threshold
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn path(pedestrian: i64, points: &[(f64, f64)]) -> Vec<TrackRow> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| TrackRow::new(i as i64, pedestrian, x, y))
            .collect()
    }

    #[test]
    fn test_identical_paths_have_zero_error() {
        let p = path(1, &[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert_relative_eq!(average_l2(&p, &p), 0.0);
        assert_relative_eq!(final_l2(&p, &p), 0.0);
    }

    #[test]
    fn test_average_l2_uses_ground_truth_tail() {
        // Observed part of the ground truth is ignored.
        let gt = path(1, &[(-5.0, -5.0), (0.0, 0.0), (1.0, 0.0)]);
        let pred = path(1, &[(0.0, 3.0), (1.0, 1.0)]);
        assert_relative_eq!(average_l2(&gt, &pred), 2.0);
        assert_relative_eq!(final_l2(&gt, &pred), 1.0);
    }

    #[test]
    fn test_empty_paths() {
        let p = path(1, &[(0.0, 0.0)]);
        assert!(average_l2(&p, &[]).is_infinite());
        assert!(final_l2(&[], &p).is_infinite());
    }

    #[test]
    fn test_collision_at_shared_frame() {
        let config = EvaluatorConfig::default();
        let a = path(1, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let b = path(2, &[(0.0, 5.0), (1.0, 0.15), (2.0, 5.0)]);
        assert!(collision(&a, &b, &config));
    }

    #[test]
    fn test_collision_between_frames() {
        // Agents swap sides and meet halfway between two frames.
        let config = EvaluatorConfig::default();
        let a = path(1, &[(0.0, 0.0), (2.0, 0.0)]);
        let b = path(2, &[(2.0, 0.0), (0.0, 0.0)]);
        assert!(collision(&a, &b, &config));
    }

    #[test]
    fn test_no_collision_when_far_apart() {
        let config = EvaluatorConfig::default();
        let a = path(1, &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let b = path(2, &[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]);
        assert!(!collision(&a, &b, &config));
    }

    #[test]
    fn test_no_collision_without_common_frames() {
        let config = EvaluatorConfig::default();
        let a = vec![TrackRow::new(0, 1, 0.0, 0.0)];
        let b = vec![TrackRow::new(1, 2, 0.0, 0.0)];
        assert!(!collision(&a, &b, &config));
    }

    #[test]
    fn test_no_interpolation_across_missing_frames() {
        // The neighbour is only observed before and after a long gap; its
        // closest observed distance is 5.0.
        let config = EvaluatorConfig::default();
        let a: Vec<TrackRow> = (0..=10).map(|f| TrackRow::new(f, 1, 0.0, 0.0)).collect();
        let b = vec![TrackRow::new(0, 2, -5.0, 0.0), TrackRow::new(10, 2, 5.0, 0.0)];
        assert!(!collision(&a, &b, &config));
    }

    #[test]
    fn test_collision_at_frame_after_gap() {
        let config = EvaluatorConfig::default();
        let a: Vec<TrackRow> = (0..=10).map(|f| TrackRow::new(f, 1, 0.0, 0.0)).collect();
        let b = vec![TrackRow::new(0, 2, -5.0, 0.0), TrackRow::new(10, 2, 0.1, 0.0)];
        assert!(collision(&a, &b, &config));
    }

    #[test]
    fn test_single_common_frame() {
        let config = EvaluatorConfig::default();
        let a = vec![TrackRow::new(3, 1, 0.0, 0.0)];
        let b = vec![TrackRow::new(3, 2, 0.1, 0.0)];
        assert!(collision(&a, &b, &config));
    }
}
