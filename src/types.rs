//! Core trajectory data types.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Frame number of a position sample.
pub type Frame = i64;

/// Identifier of a pedestrian within a dataset.
pub type PedestrianId = i64;

/// Identifier of a scene within a dataset.
pub type SceneId = u64;

/// A single position sample of one pedestrian.
///
/// `prediction_number` is `None` for ground truth and distinguishes the
/// multimodal candidates (0, 1, 2) in a submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackRow {
    pub frame: Frame,
    pub pedestrian: PedestrianId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub prediction_number: Option<u32>,
    /// Scene the row was predicted for (set on submitted rows only).
    #[serde(default)]
    pub scene_id: Option<SceneId>,
}

impl TrackRow {
    /// Create a ground-truth row.
    pub fn new(frame: Frame, pedestrian: PedestrianId, x: f64, y: f64) -> Self {
        Self {
            frame,
            pedestrian,
            x,
            y,
            prediction_number: None,
            scene_id: None,
        }
    }

    /// Create a predicted row for the given scene and multimodal candidate.
    pub fn predicted(
        frame: Frame,
        pedestrian: PedestrianId,
        x: f64,
        y: f64,
        prediction_number: u32,
        scene_id: SceneId,
    ) -> Self {
        Self {
            frame,
            pedestrian,
            x,
            y,
            prediction_number: Some(prediction_number),
            scene_id: Some(scene_id),
        }
    }

    /// Position as a 2D point.
    #[inline]
    pub fn point(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Multimodal candidate index; unset rows count as candidate 0.
    #[inline]
    pub fn candidate(&self) -> u32 {
        self.prediction_number.unwrap_or(0)
    }
}

/// A scene: one fixed time window of agent paths.
///
/// The first path belongs to the primary pedestrian, the remaining ones to
/// its neighbours. The same shape is used for ground truth and submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub paths: Vec<Vec<TrackRow>>,
}

impl Scene {
    /// Create a scene from its primary path and neighbour paths.
    pub fn new(id: SceneId, primary: Vec<TrackRow>, neighbours: Vec<Vec<TrackRow>>) -> Self {
        let mut paths = Vec::with_capacity(neighbours.len() + 1);
        paths.push(primary);
        paths.extend(neighbours);
        Self { id, paths }
    }

    /// Path of the primary pedestrian (empty if the scene has no paths).
    pub fn primary(&self) -> &[TrackRow] {
        self.paths.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Paths of all neighbours.
    pub fn neighbours(&self) -> &[Vec<TrackRow>] {
        self.paths.get(1..).unwrap_or(&[])
    }
}

/// Frame numbers of a path, in order.
pub fn frames(path: &[TrackRow]) -> Vec<Frame> {
    path.iter().map(|row| row.frame).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_primary_and_neighbours() {
        let primary = vec![TrackRow::new(0, 1, 0.0, 0.0)];
        let neighbour = vec![TrackRow::new(0, 2, 1.0, 1.0)];
        let scene = Scene::new(7, primary.clone(), vec![neighbour.clone()]);

        assert_eq!(scene.primary(), primary.as_slice());
        assert_eq!(scene.neighbours(), &[neighbour]);
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene { id: 1, paths: Vec::new() };
        assert!(scene.primary().is_empty());
        assert!(scene.neighbours().is_empty());
    }

    #[test]
    fn test_unset_prediction_number_is_candidate_zero() {
        let row = TrackRow::new(3, 1, 0.5, 0.5);
        assert_eq!(row.candidate(), 0);
        assert_eq!(TrackRow::predicted(3, 1, 0.5, 0.5, 2, 9).candidate(), 2);
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let row: TrackRow =
            serde_json::from_str(r#"{"frame": 4, "pedestrian": 2, "x": 1.5, "y": -0.5}"#).unwrap();
        assert_eq!(row, TrackRow::new(4, 2, 1.5, -0.5));
    }
}
