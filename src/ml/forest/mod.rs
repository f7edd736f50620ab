//! Random-forest classifier loaded from a portable JSON export.
//!
//! The format mirrors the tree arrays a scikit-learn forest carries once it is trained:
//! - Nodes stored in pre-order, node `0` is the root.
//! - Split nodes send a sample left when `x[feature] <= threshold`.
//! - Leaves store per-class weights that are normalised per tree and averaged across the
//!   forest (soft voting).

mod model;

pub use model::{DecisionTree, ModelError, RandomForestModel, TreeNode};
