//! Bagged decision tree classifier.
//!
//! Binary classification with Gini impurity splits. Each tree trains on a
//! bootstrap sample and considers a random feature subset at every split;
//! depth and minimum-samples-per-split bounds keep individual trees from
//! overfitting. All randomness flows from a caller-supplied seed, so a fitted
//! forest is reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::errors::{DataError, DataResult};

/// Forest hyperparameters. Defaults mirror the production training setup:
/// 100 trees, depth capped at 10, at least 5 samples to split a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        positive_fraction: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn probability(&self, row: &[f64]) -> f64 {
        match self {
            TreeNode::Leaf { positive_fraction } => *positive_fraction,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if row[*feature] <= *threshold {
                    left.probability(row)
                } else {
                    right.probability(row)
                }
            }
        }
    }
}

/// A single Gini-impurity decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
}

impl DecisionTree {
    fn fit(
        x: &[Vec<f64>],
        y: &[u8],
        indices: &[usize],
        config: &ForestConfig,
        rng: &mut StdRng,
    ) -> Self {
        let n_features = x[0].len();
        // Consider sqrt(n_features) candidates per split, the usual bagging
        // heuristic for decorrelating trees
        let features_per_split = ((n_features as f64).sqrt().floor() as usize).max(1);
        let root = build_node(x, y, indices, 0, features_per_split, config, rng);
        Self { root }
    }

    fn probability(&self, row: &[f64]) -> f64 {
        self.root.probability(row)
    }
}

fn positive_fraction(y: &[u8], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let positives = indices.iter().filter(|&&i| y[i] == 1).count();
    positives as f64 / indices.len() as f64
}

fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    2.0 * p * (1.0 - p)
}

struct Split {
    feature: usize,
    threshold: f64,
    left: Vec<usize>,
    right: Vec<usize>,
}

/// Find the impurity-minimizing split over a random feature subset, or None
/// when no candidate separates the node.
fn best_split(
    x: &[Vec<f64>],
    y: &[u8],
    indices: &[usize],
    features_per_split: usize,
    rng: &mut StdRng,
) -> Option<Split> {
    let n_features = x[0].len();
    let mut candidates: Vec<usize> = (0..n_features).collect();
    candidates.shuffle(rng);
    candidates.truncate(features_per_split);

    let total = indices.len();
    let total_positives = indices.iter().filter(|&&i| y[i] == 1).count();
    let parent_gini = gini(total_positives, total);

    let mut best: Option<(f64, Split)> = None;

    for &feature in &candidates {
        // Sort node samples by this feature, then scan boundaries between
        // distinct values with running class counts
        let mut ordered: Vec<usize> = indices.to_vec();
        ordered.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

        let mut left_positives = 0usize;
        for split_at in 1..total {
            let prev = ordered[split_at - 1];
            if y[prev] == 1 {
                left_positives += 1;
            }
            let value_prev = x[prev][feature];
            let value_next = x[ordered[split_at]][feature];
            if value_prev == value_next {
                continue;
            }

            let left_total = split_at;
            let right_total = total - split_at;
            let right_positives = total_positives - left_positives;

            let weighted = (left_total as f64 * gini(left_positives, left_total)
                + right_total as f64 * gini(right_positives, right_total))
                / total as f64;

            if weighted >= parent_gini {
                continue;
            }
            let improves = match &best {
                Some((best_gini, _)) => weighted < *best_gini,
                None => true,
            };
            if improves {
                let threshold = (value_prev + value_next) / 2.0;
                let (left, right): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .copied()
                    .partition(|&i| x[i][feature] <= threshold);
                best = Some((
                    weighted,
                    Split {
                        feature,
                        threshold,
                        left,
                        right,
                    },
                ));
            }
        }
    }

    best.map(|(_, split)| split)
}

fn build_node(
    x: &[Vec<f64>],
    y: &[u8],
    indices: &[usize],
    depth: usize,
    features_per_split: usize,
    config: &ForestConfig,
    rng: &mut StdRng,
) -> TreeNode {
    let fraction = positive_fraction(y, indices);
    let pure = fraction == 0.0 || fraction == 1.0;
    if pure || depth >= config.max_depth || indices.len() < config.min_samples_split {
        return TreeNode::Leaf {
            positive_fraction: fraction,
        };
    }

    match best_split(x, y, indices, features_per_split, rng) {
        Some(split) => {
            let left = build_node(x, y, &split.left, depth + 1, features_per_split, config, rng);
            let right = build_node(
                x,
                y,
                &split.right,
                depth + 1,
                features_per_split,
                config,
                rng,
            );
            TreeNode::Split {
                feature: split.feature,
                threshold: split.threshold,
                left: Box::new(left),
                right: Box::new(right),
            }
        }
        None => TreeNode::Leaf {
            positive_fraction: fraction,
        },
    }
}

/// Bagged ensemble of decision trees for binary classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit the ensemble on a row-major feature matrix and 0/1 labels.
    pub fn fit(x: &[Vec<f64>], y: &[u8], config: &ForestConfig) -> DataResult<Self> {
        if x.is_empty() {
            return Err(DataError::training("cannot fit forest on an empty partition"));
        }
        if x.len() != y.len() {
            return Err(DataError::training(format!(
                "feature matrix has {} rows but {} labels",
                x.len(),
                y.len()
            )));
        }
        if let Some(bad) = y.iter().find(|&&label| label > 1) {
            return Err(DataError::training(format!(
                "labels must be binary, found {bad}"
            )));
        }

        let n = x.len();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut trees = Vec::with_capacity(config.n_trees);
        for _ in 0..config.n_trees {
            let sample: Vec<usize> = (0..n).map(|_| rng.random_range(0..n)).collect();
            trees.push(DecisionTree::fit(x, y, &sample, config, &mut rng));
        }

        Ok(Self { trees })
    }

    /// Positive-class probability for one row: the mean leaf fraction across
    /// trees.
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.probability(row)).sum();
        sum / self.trees.len() as f64
    }

    /// Hard class prediction (probability >= 0.5).
    pub fn predict(&self, row: &[f64]) -> u8 {
        u8::from(self.predict_proba(row) >= 0.5)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
