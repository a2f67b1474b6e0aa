//! Result table assembly.
//!
//! Reshapes aggregated scores into rows for printing. No metric is computed
//! here.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::category::Category;
use crate::evaluation::ResultBundle;

/// One line of the result table.
///
/// `category` is `None` for the overall row of a (model, dataset) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub model: String,
    pub dataset: String,
    pub category: Option<Category>,
    pub scene_count: usize,
    pub average_l2: f64,
    pub final_l2: f64,
    pub gt_collisions: usize,
    /// Predicted-neighbour collisions (category rows only).
    pub pred_collisions: Option<usize>,
    /// Scenes checked against predicted neighbours (category rows only).
    pub pred_collision_eligible: Option<usize>,
}

/// Results of several models on several datasets.
#[derive(Debug, Clone, Default)]
pub struct Table {
    entries: BTreeMap<String, BTreeMap<String, ResultBundle>>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the per-dataset results of a model.
    ///
    /// Datasets already present for the model are replaced.
    pub fn add_entry(&mut self, model: &str, results: BTreeMap<String, ResultBundle>) {
        self.entries.entry(model.to_string()).or_default().extend(results);
    }

    /// Results of one model on one dataset.
    pub fn get(&self, model: &str, dataset: &str) -> Option<&ResultBundle> {
        self.entries.get(model)?.get(dataset)
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows ordered by model, then dataset; each overall row is followed by
    /// one row per category.
    pub fn rows(&self) -> Vec<ReportRow> {
        let mut rows = Vec::new();
        for (model, datasets) in &self.entries {
            for (dataset, bundle) in datasets {
                rows.push(ReportRow {
                    model: model.clone(),
                    dataset: dataset.clone(),
                    category: None,
                    scene_count: bundle.scene_count,
                    average_l2: bundle.average_l2,
                    final_l2: bundle.final_l2,
                    gt_collisions: bundle.collisions,
                    pred_collisions: None,
                    pred_collision_eligible: None,
                });

                for category in Category::ALL {
                    let score = bundle.categories.get(&category).copied().unwrap_or_default();
                    rows.push(ReportRow {
                        model: model.clone(),
                        dataset: dataset.clone(),
                        category: Some(category),
                        scene_count: score.scene_count,
                        average_l2: score.average_l2,
                        final_l2: score.final_l2,
                        gt_collisions: score.gt_collisions,
                        pred_collisions: Some(score.pred_collisions),
                        pred_collision_eligible: Some(score.pred_collision_eligible),
                    });
                }
            }
        }
        rows
    }
}
