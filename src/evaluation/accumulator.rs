//! Running score sums for one scene category.

use serde::{Deserialize, Serialize};

use super::scene::SceneEvaluation;

/// Accumulator of displacement errors and collision counts.
///
/// Accumulators are combined with [`merge`](Self::merge), which is
/// commutative and associative up to floating-point rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreAccumulator {
    pub sum_average_l2: f64,
    pub sum_final_l2: f64,
    /// Scenes whose primary prediction hit a ground-truth neighbour.
    pub gt_collisions: usize,
    /// Scenes whose primary prediction hit a predicted neighbour.
    pub pred_collisions: usize,
    /// Scenes that were checked against predicted neighbours.
    pub pred_collision_eligible: usize,
    /// Scenes added.
    pub scenes: usize,
}

/// Normalized scores of one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Scenes tagged with the category.
    pub scene_count: usize,
    pub average_l2: f64,
    pub final_l2: f64,
    pub gt_collisions: usize,
    pub pred_collisions: usize,
    pub pred_collision_eligible: usize,
}

impl ScoreAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the scores of one scene.
    ///
    /// Each counter moves by at most one per scene.
    pub fn add(&mut self, evaluation: &SceneEvaluation) {
        self.sum_average_l2 += evaluation.average_l2;
        self.sum_final_l2 += evaluation.final_l2;
        self.scenes += 1;

        if !evaluation.collision_checked {
            return;
        }

        if evaluation.collided_with_gt {
            self.gt_collisions += 1;
        }
        if evaluation.has_pred_neighbours {
            self.pred_collision_eligible += 1;
            if evaluation.collided_with_pred_neighbour {
                self.pred_collisions += 1;
            }
        }
    }

    /// Combine two accumulators.
    pub fn merge(mut self, other: &ScoreAccumulator) -> Self {
        self.sum_average_l2 += other.sum_average_l2;
        self.sum_final_l2 += other.sum_final_l2;
        self.gt_collisions += other.gt_collisions;
        self.pred_collisions += other.pred_collisions;
        self.pred_collision_eligible += other.pred_collision_eligible;
        self.scenes += other.scenes;
        self
    }

    /// Average the error sums over `scene_count` scenes.
    ///
    /// A zero count leaves the sums as they are (zero for an empty category).
    pub fn normalize(&self, scene_count: usize) -> CategoryScore {
        let (average_l2, final_l2) = if scene_count > 0 {
            (
                self.sum_average_l2 / scene_count as f64,
                self.sum_final_l2 / scene_count as f64,
            )
        } else {
            (self.sum_average_l2, self.sum_final_l2)
        };

        CategoryScore {
            scene_count,
            average_l2,
            final_l2,
            gt_collisions: self.gt_collisions,
            pred_collisions: self.pred_collisions,
            pred_collision_eligible: self.pred_collision_eligible,
        }
    }
}

impl<'a> std::iter::Sum<&'a SceneEvaluation> for ScoreAccumulator {
    fn sum<I: Iterator<Item = &'a SceneEvaluation>>(iter: I) -> Self {
        iter.fold(Self::new(), |mut acc, evaluation| {
            acc.add(evaluation);
            acc
        })
    }
}
