//! Dataset-level aggregation of scene scores.

use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryIndex};
use crate::config::EvaluatorConfig;
use crate::types::{Scene, SceneId};
use crate::{Error, Result};

use super::accumulator::{CategoryScore, ScoreAccumulator};
use super::scene::{score_scene, SceneEvaluation};
use super::selector::discover_prediction_count;

/// Scores of one model on one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    /// Ground-truth scenes evaluated.
    pub scene_count: usize,
    /// Average displacement error over all scenes.
    pub average_l2: f64,
    /// Final displacement error over all scenes.
    pub final_l2: f64,
    /// Scenes colliding with a ground-truth neighbour.
    pub collisions: usize,
    /// Normalized scores per category.
    pub categories: BTreeMap<Category, CategoryScore>,
}

/// Snapshot of every model aggregated by a [`TrajnetEvaluator`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResults {
    pub scene_count: usize,
    pub category_counts: BTreeMap<Category, usize>,
    pub average_l2: BTreeMap<String, f64>,
    pub final_l2: BTreeMap<String, f64>,
    pub final_collision: BTreeMap<String, usize>,
    pub categories: BTreeMap<Category, BTreeMap<String, CategoryScore>>,
}

impl EvaluationResults {
    /// Names of the aggregated models.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.average_l2.keys().map(String::as_str)
    }

    /// Scores of a single model.
    pub fn bundle(&self, name: &str) -> Option<ResultBundle> {
        let average_l2 = *self.average_l2.get(name)?;
        let final_l2 = *self.final_l2.get(name)?;
        let collisions = self.final_collision.get(name).copied().unwrap_or(0);

        let categories = self
            .categories
            .iter()
            .filter_map(|(&category, scores)| scores.get(name).map(|s| (category, *s)))
            .collect();

        Some(ResultBundle {
            scene_count: self.scene_count,
            average_l2,
            final_l2,
            collisions,
            categories,
        })
    }
}

/// Evaluates submitted predictions against ground-truth scenes.
///
/// Several models can be aggregated into one evaluator; their results are
/// stored side by side under their names.
pub struct TrajnetEvaluator<'a> {
    scenes_gt: &'a [Scene],
    submissions: HashMap<SceneId, &'a Scene>,
    first_submission: Option<&'a Scene>,
    indexes: CategoryIndex,
    config: EvaluatorConfig,
    results: EvaluationResults,
}

impl<'a> TrajnetEvaluator<'a> {
    /// Create an evaluator.
    ///
    /// # Arguments
    /// * `scenes_gt` - Ground-truth scenes, in evaluation order
    /// * `scenes_sub` - Submitted scenes, matched to ground truth by scene id
    /// * `indexes` - Category membership of the ground-truth scenes
    /// * `config` - Evaluation options
    pub fn new(
        scenes_gt: &'a [Scene],
        scenes_sub: &'a [Scene],
        indexes: CategoryIndex,
        config: EvaluatorConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut submissions = HashMap::with_capacity(scenes_sub.len());
        for scene in scenes_sub {
            submissions.entry(scene.id).or_insert(scene);
        }

        let results = EvaluationResults {
            scene_count: scenes_gt.len(),
            category_counts: Category::ALL
                .into_iter()
                .map(|category| (category, indexes.len(category)))
                .collect(),
            ..EvaluationResults::default()
        };

        Ok(Self {
            scenes_gt,
            submissions,
            first_submission: scenes_sub.first(),
            indexes,
            config,
            results,
        })
    }

    /// Evaluation options.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Score every ground-truth scene and store the results under `name`.
    ///
    /// On error nothing is stored for `name`.
    pub fn aggregate(&mut self, name: &str, disable_collision: bool) -> Result<&mut Self> {
        let bundle = self.score(name, disable_collision)?;

        self.results.average_l2.insert(name.to_string(), bundle.average_l2);
        self.results.final_l2.insert(name.to_string(), bundle.final_l2);
        self.results.final_collision.insert(name.to_string(), bundle.collisions);
        for (category, score) in bundle.categories {
            self.results
                .categories
                .entry(category)
                .or_default()
                .insert(name.to_string(), score);
        }

        Ok(self)
    }

    /// Score every ground-truth scene without storing the results.
    pub fn score(&self, name: &str, disable_collision: bool) -> Result<ResultBundle> {
        if self.scenes_gt.is_empty() {
            return Err(Error::NoScenes);
        }

        let config = EvaluatorConfig {
            disable_collision,
            ..self.config.clone()
        };
        let num_predictions = discover_prediction_count(self.first_submission, &config);

        log::info!(
            "evaluating {} on {} scenes ({} prediction(s) per scene)",
            name,
            self.scenes_gt.len(),
            num_predictions + 1
        );

        let evaluations = self.evaluate_scenes(num_predictions, &config)?;

        let mut total = ScoreAccumulator::new();
        let mut per_category: BTreeMap<Category, ScoreAccumulator> = Category::ALL
            .into_iter()
            .map(|category| (category, ScoreAccumulator::new()))
            .collect();

        for evaluation in &evaluations {
            total.add(evaluation);
            for category in self.indexes.categories_of(evaluation.scene_id) {
                if let Some(acc) = per_category.get_mut(&category) {
                    acc.add(evaluation);
                }
            }
        }

        let overall = total.normalize(self.scenes_gt.len());
        log::info!(
            "{}: ADE {:.4} FDE {:.4} collisions {}",
            name,
            overall.average_l2,
            overall.final_l2,
            overall.gt_collisions
        );

        Ok(ResultBundle {
            scene_count: self.scenes_gt.len(),
            average_l2: overall.average_l2,
            final_l2: overall.final_l2,
            collisions: overall.gt_collisions,
            categories: per_category
                .into_iter()
                .map(|(category, acc)| (category, acc.normalize(self.indexes.len(category))))
                .collect(),
        })
    }

    /// Snapshot of all aggregated results.
    pub fn result(&self) -> EvaluationResults {
        self.results.clone()
    }

    fn evaluate_scene(
        &self,
        ground_truth: &Scene,
        num_predictions: u32,
        config: &EvaluatorConfig,
    ) -> Result<SceneEvaluation> {
        let submission = self
            .submissions
            .get(&ground_truth.id)
            .ok_or(Error::MissingSubmission(ground_truth.id))?;
        score_scene(ground_truth, submission, num_predictions, config)
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_scenes(&self, num_predictions: u32, config: &EvaluatorConfig) -> Result<Vec<SceneEvaluation>> {
        self.scenes_gt
            .iter()
            .map(|gt| self.evaluate_scene(gt, num_predictions, config))
            .collect()
    }

    // Results keep input order, so the fold and the reported error match the
    // sequential path.
    #[cfg(feature = "parallel")]
    fn evaluate_scenes(&self, num_predictions: u32, config: &EvaluatorConfig) -> Result<Vec<SceneEvaluation>> {
        let evaluations: Vec<Result<SceneEvaluation>> = self
            .scenes_gt
            .par_iter()
            .map(|gt| self.evaluate_scene(gt, num_predictions, config))
            .collect();
        evaluations.into_iter().collect()
    }
}
