//! Gradient-boosted decision tree ensemble
//!
//! Architecture: Σ tree(x) + base_margin → sigmoid
//!
//! Each tree is a flat node array rooted at index 0. A split sends the row
//! to `left` when `x[feature] < threshold`; missing (non-finite) values follow
//! `default_left`.

use serde::{Deserialize, Serialize};

use super::sigmoid;

/// Single tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        #[serde(default = "default_left")]
        default_left: bool,
    },
    Leaf {
        leaf: f32,
    },
}

fn default_left() -> bool {
    true
}

/// One regression tree contributing to the ensemble margin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Leaf value reached by `x`, or `None` if a node reference or split
    /// feature falls outside the tree or the row
    pub fn evaluate(&self, x: &[f32]) -> Option<f32> {
        let mut idx = 0;
        // A well-formed path visits each node at most once
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx)? {
                TreeNode::Leaf { leaf } => return Some(*leaf),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let value = *x.get(*feature)?;
                    let go_left = if value.is_finite() {
                        value < *threshold
                    } else {
                        *default_left
                    };
                    idx = if go_left { *left } else { *right };
                }
            }
        }
        None
    }

    /// Check node references so `evaluate` cannot index out of bounds or loop.
    ///
    /// Children must come after their parent in the node array.
    pub fn validate(&self, num_features: usize) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= num_features {
                    return Err(format!(
                        "node {} splits on feature {} but the schema has {}",
                        idx, feature, num_features
                    ));
                }
                for child in [*left, *right] {
                    if child <= idx || child >= self.nodes.len() {
                        return Err(format!("node {} has invalid child {}", idx, child));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Additive tree ensemble with a logistic link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub num_features: usize,
    /// Initial margin (log-odds) added before the trees
    #[serde(default)]
    pub base_margin: f32,
    pub trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    /// Raw log-odds for a single row
    pub fn margin(&self, x: &[f32]) -> Option<f32> {
        let mut total = self.base_margin;
        for tree in &self.trees {
            total += tree.evaluate(x)?;
        }
        Some(total)
    }

    /// Positive-class probability
    pub fn predict(&self, x: &[f32]) -> Option<f64> {
        self.margin(x).map(|m| sigmoid(m as f64))
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.num_features)
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump(feature: usize, threshold: f32, left: f32, right: f32) -> RegressionTree {
        RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                    default_left: true,
                },
                TreeNode::Leaf { leaf: left },
                TreeNode::Leaf { leaf: right },
            ],
        }
    }

    #[test]
    fn test_split_direction() {
        let tree = stump(0, 12.0, -1.0, 1.0);
        assert_eq!(tree.evaluate(&[1.0]), Some(-1.0));
        // Equal to threshold goes right
        assert_eq!(tree.evaluate(&[12.0]), Some(1.0));
        assert_eq!(tree.evaluate(&[f32::NAN]), Some(-1.0));
    }

    #[test]
    fn test_ensemble_probability() {
        let model = TreeEnsemble {
            num_features: 2,
            base_margin: 0.0,
            trees: vec![stump(0, 12.0, 0.8, -0.8), stump(1, 0.5, -0.2, 0.2)],
        };

        // Short tenure with the one-hot set: 0.8 + 0.2 = 1.0
        let p = model.predict(&[1.0, 1.0]).unwrap();
        assert!((p - sigmoid(1.0)).abs() < 1e-6);

        let p = model.predict(&[24.0, 0.0]).unwrap();
        assert!(p < 0.5);

        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_empty_ensemble_uses_base_margin() {
        let model = TreeEnsemble {
            num_features: 3,
            base_margin: 0.0,
            trees: vec![],
        };
        assert_eq!(model.predict(&[0.0, 0.0, 0.0]), Some(0.5));
    }

    #[test]
    fn test_validate_rejects_bad_references() {
        let mut model = TreeEnsemble {
            num_features: 1,
            base_margin: 0.0,
            trees: vec![stump(3, 0.0, 0.0, 0.0)],
        };
        assert!(model.validate().is_err());

        model.trees = vec![RegressionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: 0,
                right: 0,
                default_left: true,
            }],
        }];
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_unvalidated_tree_does_not_panic() {
        // Feature index past the row
        let tree = stump(5, 0.0, 1.0, 2.0);
        assert_eq!(tree.evaluate(&[0.0, 0.0]), None);

        // Child pointing outside the node array
        let tree = RegressionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: 7,
                right: 7,
                default_left: true,
            }],
        };
        assert_eq!(tree.evaluate(&[1.0]), None);

        // Self-referencing split terminates
        let tree = RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.0,
                    left: 0,
                    right: 0,
                    default_left: true,
                },
                TreeNode::Leaf { leaf: 1.0 },
            ],
        };
        assert_eq!(tree.evaluate(&[1.0]), None);

        let model = TreeEnsemble {
            num_features: 2,
            base_margin: 0.0,
            trees: vec![stump(0, 1.0, 0.5, 0.5), stump(9, 1.0, 0.5, 0.5)],
        };
        assert_eq!(model.predict(&[0.0, 0.0]), None);
    }

    #[test]
    fn test_node_json_shape() {
        let json = r#"[
            {"feature": 0, "threshold": 1.5, "left": 1, "right": 2},
            {"leaf": 0.25},
            {"leaf": -0.25}
        ]"#;
        let nodes: Vec<TreeNode> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes, stump(0, 1.5, 0.25, -0.25).nodes);
    }
}
