use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural problems found while loading or validating a forest export.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Model declares zero input features")]
    NoFeatures,
    #[error("Model must contain at least 2 classes (found {0})")]
    TooFewClasses(usize),
    #[error("Duplicate class label {0}")]
    DuplicateClass(i64),
    #[error("feature_names has {found} entries but n_features is {expected}")]
    FeatureNamesLength { expected: usize, found: usize },
    #[error("Model contains no trees")]
    NoTrees,
    #[error("Tree {tree} has no nodes")]
    EmptyTree { tree: usize },
    #[error(
        "Tree {tree} node {node} points at child {child}; children must follow their parent and stay below {len}"
    )]
    ChildIndex {
        tree: usize,
        node: usize,
        child: usize,
        len: usize,
    },
    #[error("Tree {tree} node {node} splits on feature {feature} but the model has {n_features}")]
    FeatureIndex {
        tree: usize,
        node: usize,
        feature: usize,
        n_features: usize,
    },
    #[error("Tree {tree} node {node} has a non-finite threshold")]
    Threshold { tree: usize, node: usize },
    #[error("Tree {tree} leaf {node} has {found} class weights, expected {expected}")]
    LeafWidth {
        tree: usize,
        node: usize,
        found: usize,
        expected: usize,
    },
    #[error("Tree {tree} leaf {node} has negative, non-finite or all-zero weights")]
    LeafWeights { tree: usize, node: usize },
}

/// One node of a decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal node; `left` is taken when `x[feature] <= threshold`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal node holding per-class weights.
    Leaf { value: Vec<f64> },
}

impl TreeNode {
    pub fn split(feature: usize, threshold: f64, left: usize, right: usize) -> Self {
        Self::Split {
            feature,
            threshold,
            left,
            right,
        }
    }

    pub fn leaf(value: Vec<f64>) -> Self {
        Self::Leaf { value }
    }
}

/// Single decision tree stored as a pre-order node array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    /// Walk the tree and return the class weights of the leaf reached by `features`.
    ///
    /// Missing features read as `0.0`. A malformed tree yields an empty slice instead of
    /// looping; [`RandomForestModel::validate`] rejects those trees up front.
    pub fn leaf_for(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0usize;
        loop {
            match self.nodes.get(idx) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    let next = if tree_precision(value) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                    if next <= idx {
                        return &[];
                    }
                    idx = next;
                }
                Some(TreeNode::Leaf { value }) => return value,
                None => return &[],
            }
        }
    }

    fn validate(&self, tree: usize, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        let len = self.nodes.len();
        if len == 0 {
            return Err(ModelError::EmptyTree { tree });
        }
        for (node, entry) in self.nodes.iter().enumerate() {
            match entry {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(ModelError::FeatureIndex {
                            tree,
                            node,
                            feature: *feature,
                            n_features,
                        });
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::Threshold { tree, node });
                    }
                    for child in [*left, *right] {
                        if child <= node || child >= len {
                            return Err(ModelError::ChildIndex {
                                tree,
                                node,
                                child,
                                len,
                            });
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ModelError::LeafWidth {
                            tree,
                            node,
                            found: value.len(),
                            expected: n_classes,
                        });
                    }
                    let malformed = value.iter().any(|w| !w.is_finite() || *w < 0.0);
                    if malformed || value.iter().sum::<f64>() <= 0.0 {
                        return Err(ModelError::LeafWeights { tree, node });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Random-forest classifier with soft-voting inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestModel {
    /// Model format version.
    pub model_version: i64,
    /// Number of values expected in each feature vector.
    pub n_features: usize,
    /// Column names the forest was fitted on, when the exporter recorded them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    /// Ordered class labels; leaf weights follow this order.
    pub classes: Vec<i64>,
    pub trees: Vec<DecisionTree>,
}

impl RandomForestModel {
    /// Parse and validate a JSON export.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_slice(bytes)?;
        model.validate()?;
        Ok(model)
    }

    /// Validate structural invariants of the model.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_features == 0 {
            return Err(ModelError::NoFeatures);
        }
        if self.classes.len() < 2 {
            return Err(ModelError::TooFewClasses(self.classes.len()));
        }
        for (idx, class) in self.classes.iter().enumerate() {
            if self.classes[..idx].contains(class) {
                return Err(ModelError::DuplicateClass(*class));
            }
        }
        if let Some(names) = &self.feature_names
            && names.len() != self.n_features
        {
            return Err(ModelError::FeatureNamesLength {
                expected: self.n_features,
                found: names.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::NoTrees);
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate(tree_idx, self.n_features, self.classes.len())?;
        }
        Ok(())
    }

    /// Mean of the per-tree class distributions, aligned with `classes`.
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        let mut totals = vec![0.0f64; self.classes.len()];
        if self.trees.is_empty() {
            return totals;
        }
        for tree in &self.trees {
            let leaf = tree.leaf_for(features);
            let sum: f64 = leaf.iter().sum();
            if sum <= 0.0 {
                continue;
            }
            for (total, weight) in totals.iter_mut().zip(leaf) {
                *total += weight / sum;
            }
        }
        let n_trees = self.trees.len() as f64;
        for total in &mut totals {
            *total /= n_trees;
        }
        totals
    }

    /// Index into `classes` of the most probable class; the earlier class wins ties.
    pub fn predict_class_index(&self, features: &[f64]) -> usize {
        argmax(&self.predict_proba(features))
    }

    /// Most probable class label.
    pub fn predict_class(&self, features: &[f64]) -> Option<i64> {
        self.classes
            .get(self.predict_class_index(features))
            .copied()
    }
}

// Trees are fitted on single-precision inputs; thresholds only hold at that precision.
fn tree_precision(value: f64) -> f64 {
    f64::from(value as f32)
}

fn argmax(values: &[f64]) -> usize {
    let mut best_idx = 0usize;
    let mut best_val = f64::NEG_INFINITY;
    for (idx, &v) in values.iter().enumerate() {
        if v > best_val {
            best_val = v;
            best_idx = idx;
        }
    }
    best_idx
}
