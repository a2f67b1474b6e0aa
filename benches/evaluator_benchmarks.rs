//! Evaluator benchmarks using Criterion.
//!
//! Run with: cargo bench
//! Compare with: cargo bench --features parallel

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use trajnet_rs::{Category, CategoryIndex, EvaluatorConfig, Scene, SceneId, TrackRow, TrajnetEvaluator};

const OBSERVED: i64 = 9;
const PREDICTED: i64 = 12;

/// Create ground-truth scenes with `neighbours` neighbours each.
fn create_ground_truth(n_scenes: usize, neighbours: i64) -> Vec<Scene> {
    (0..n_scenes as SceneId)
        .map(|id| {
            let path = |pedestrian: i64, dy: f64| -> Vec<TrackRow> {
                (0..OBSERVED + PREDICTED)
                    .map(|f| TrackRow::new(f, pedestrian, f as f64 * 0.4, dy + id as f64 * 0.01))
                    .collect()
            };
            let others = (1..=neighbours).map(|p| path(p + 1, p as f64)).collect();
            Scene::new(id, path(1, 0.0), others)
        })
        .collect()
}

/// Create a three-candidate submission with predicted neighbours.
fn create_submission(ground_truth: &[Scene]) -> Vec<Scene> {
    ground_truth
        .iter()
        .map(|scene| {
            let predict = |path: &[TrackRow]| -> Vec<TrackRow> {
                (0..3u32)
                    .flat_map(move |k| {
                        path.iter().skip(OBSERVED as usize).map(move |r| {
                            TrackRow::predicted(r.frame, r.pedestrian, r.x + 0.05 * k as f64, r.y, k, scene.id)
                        })
                    })
                    .collect()
            };
            let neighbours = scene.neighbours().iter().map(|p| predict(p.as_slice())).collect();
            Scene::new(scene.id, predict(scene.primary()), neighbours)
        })
        .collect()
}

fn create_index(ground_truth: &[Scene]) -> CategoryIndex {
    let mut index = CategoryIndex::new();
    for (i, scene) in ground_truth.iter().enumerate() {
        index.insert(Category::ALL[i % 4], scene.id);
    }
    index
}

fn benchmark_aggregate(c: &mut Criterion, name: &str, n_scenes: usize, disable_collision: bool) {
    let ground_truth = create_ground_truth(n_scenes, 4);
    let submission = create_submission(&ground_truth);
    let index = create_index(&ground_truth);

    let mut evaluator = TrajnetEvaluator::new(&ground_truth, &submission, index, EvaluatorConfig::default())
        .expect("valid evaluator");

    c.bench_function(name, |b| {
        b.iter(|| {
            evaluator
                .aggregate(black_box("bench"), disable_collision)
                .expect("aggregation succeeds");
        })
    });
}

fn benchmark_aggregate_100_scenes(c: &mut Criterion) {
    benchmark_aggregate(c, "aggregate_100_scenes", 100, false);
}

fn benchmark_aggregate_1000_scenes(c: &mut Criterion) {
    benchmark_aggregate(c, "aggregate_1000_scenes", 1000, false);
}

fn benchmark_aggregate_1000_scenes_no_collision(c: &mut Criterion) {
    benchmark_aggregate(c, "aggregate_1000_scenes_no_collision", 1000, true);
}

criterion_group!(
    benches,
    benchmark_aggregate_100_scenes,
    benchmark_aggregate_1000_scenes,
    benchmark_aggregate_1000_scenes_no_collision,
);
criterion_main!(benches);
