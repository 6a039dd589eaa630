//! Random forest classifier
//!
//! Each tree is stored as a flat node array. Child indices always point
//! forward, so evaluation terminates without cycle checks. Trees and forests
//! only exist in validated form: deserialization goes through the `*Spec`
//! types and `TryFrom`.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{ModelError, NoteClassifier};
use crate::models::{FeatureVector, FEATURE_COUNT};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, else `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: i64,
    },
}

/// Unvalidated tree as written in the artifact
#[derive(Debug, Clone, Deserialize)]
pub struct TreeSpec {
    nodes: Vec<TreeNode>,
}

/// Unvalidated forest as written in the artifact
#[derive(Debug, Clone, Deserialize)]
pub struct ForestSpec {
    trees: Vec<TreeSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "TreeSpec")]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl TryFrom<TreeSpec> for DecisionTree {
    type Error = ModelError;

    fn try_from(spec: TreeSpec) -> Result<Self, ModelError> {
        let nodes = spec.nodes;
        if nodes.is_empty() {
            return Err(ModelError::Invalid("decision tree has no nodes".to_string()));
        }

        for (i, node) in nodes.iter().enumerate() {
            if let TreeNode::Split { feature, threshold, left, right } = node {
                if *feature >= FEATURE_COUNT {
                    return Err(ModelError::Invalid(format!(
                        "node {} splits on feature {} (only {} features)",
                        i, feature, FEATURE_COUNT
                    )));
                }
                if !threshold.is_finite() {
                    return Err(ModelError::Invalid(format!("node {} has non-finite threshold", i)));
                }
                for child in [*left, *right] {
                    if child <= i || child >= nodes.len() {
                        return Err(ModelError::Invalid(format!(
                            "node {} has out-of-order child {}",
                            i, child
                        )));
                    }
                }
            }
        }

        Ok(Self { nodes })
    }
}

impl DecisionTree {
    /// Walk from the root to a leaf
    pub fn predict(&self, x: &[f64; FEATURE_COUNT]) -> i64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { class } => return *class,
                TreeNode::Split { feature, threshold, left, right } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// At least one tree, by construction
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ForestSpec")]
pub struct RandomForest {
    first: DecisionTree,
    rest: Vec<DecisionTree>,
}

impl TryFrom<ForestSpec> for RandomForest {
    type Error = ModelError;

    fn try_from(spec: ForestSpec) -> Result<Self, ModelError> {
        let mut trees = spec.trees.into_iter().map(DecisionTree::try_from);
        let first = trees
            .next()
            .ok_or_else(|| ModelError::Invalid("forest has no trees".to_string()))??;
        let rest = trees.collect::<Result<Vec<_>, _>>()?;
        Ok(Self { first, rest })
    }
}

impl RandomForest {
    pub fn tree_count(&self) -> usize {
        1 + self.rest.len()
    }
}

impl NoteClassifier for RandomForest {
    /// Majority vote; ties go to the smallest class code
    fn predict(&self, features: &FeatureVector) -> i64 {
        let x = features.as_array();
        let first_vote = self.first.predict(&x);

        let mut votes: BTreeMap<i64, usize> = BTreeMap::new();
        votes.insert(first_vote, 1);
        for tree in &self.rest {
            *votes.entry(tree.predict(&x)).or_insert(0) += 1;
        }

        // Ascending order plus a strict comparison keeps the smallest code on ties
        let (winner, _) = votes
            .into_iter()
            .fold((first_vote, 0), |best, (class, count)| {
                if count > best.1 { (class, count) } else { best }
            });
        winner
    }

    fn describe(&self) -> String {
        format!("forest ({} trees)", self.tree_count())
    }
}
