//! Containment between profiles.
//!
//! [`ContainmentGraph`] records every pairwise "lies within" relation, without
//! reduction: a profile nested two deep is listed under both ancestors.
//! [`ContainmentForest`] reduces that relation so each profile keeps only its
//! immediate parent, the smallest-area profile containing it.

use crate::error::ContainmentError;
use crate::profile::Profile;
use profilekit_core::ContainmentPolicy;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

/// Pairwise, non-reduced containment relation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainmentGraph {
    /// `children[j]` holds every `i` found inside profile `j`.
    children: Vec<BTreeSet<usize>>,
}

impl ContainmentGraph {
    /// Tests every unordered pair of profiles in both directions.
    pub fn build(profiles: &[Profile], tolerance: f64) -> Self {
        let n = profiles.len();
        let mut children = vec![BTreeSet::new(); n];

        for i in 0..n {
            for j in (i + 1)..n {
                if profiles[j].covers(&profiles[i], tolerance) {
                    children[j].insert(i);
                }
                if profiles[i].covers(&profiles[j], tolerance) {
                    children[i].insert(j);
                }
            }
        }

        debug!(
            profiles = n,
            edges = children.iter().map(BTreeSet::len).sum::<usize>(),
            "containment graph built"
        );
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Every profile found inside `outer`, directly or transitively.
    pub fn children(&self, outer: usize) -> &BTreeSet<usize> {
        &self.children[outer]
    }

    /// True if `inner` was found inside `outer`.
    pub fn contains(&self, outer: usize, inner: usize) -> bool {
        self.children
            .get(outer)
            .is_some_and(|set| set.contains(&inner))
    }

    /// Profiles that no other profile lists as a child.
    pub fn roots(&self) -> Vec<usize> {
        let mut listed = vec![false; self.children.len()];
        for set in &self.children {
            for &child in set {
                listed[child] = true;
            }
        }
        (0..self.children.len()).filter(|&i| !listed[i]).collect()
    }

    /// Pairs `(a, b)` with `a < b` where each lies within the other.
    pub fn mutual_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (a, set) in self.children.iter().enumerate() {
            for &b in set.range((a + 1)..) {
                if self.contains(b, a) {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }
}

/// One profile's place in the hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForestNode {
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Number of ancestors; roots are at depth 0.
    pub depth: usize,
}

/// Containment hierarchy with immediate parents only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainmentForest {
    nodes: Vec<ForestNode>,
}

impl ContainmentForest {
    /// Reduces `graph` to an explicit forest.
    ///
    /// A profile's parent is the smallest-area profile that contains it. The
    /// candidates are ranked by `(area, index)`, and a parent must rank
    /// strictly above its child, so coincident profiles cannot form a cycle.
    pub fn build(
        profiles: &[Profile],
        graph: &ContainmentGraph,
        policy: ContainmentPolicy,
    ) -> Result<Self, ContainmentError> {
        let n = profiles.len();

        if policy == ContainmentPolicy::Strict {
            if let Some(&(first, second)) = graph.mutual_pairs().first() {
                return Err(ContainmentError::MutualContainment { first, second });
            }
        }

        let rank = |i: usize, j: usize| -> Ordering {
            profiles[i]
                .area()
                .total_cmp(&profiles[j].area())
                .then(i.cmp(&j))
        };

        let mut nodes = vec![ForestNode::default(); n];
        for (inner, node) in nodes.iter_mut().enumerate() {
            node.parent = (0..n)
                .filter(|&outer| outer != inner && graph.contains(outer, inner))
                .filter(|&outer| rank(outer, inner) == Ordering::Greater)
                .min_by(|&a, &b| rank(a, b));
        }

        for inner in 0..n {
            if let Some(parent) = nodes[inner].parent {
                nodes[parent].children.push(inner);
            }
        }

        // Parents always outrank their children, so visiting in rank order
        // from largest down assigns every parent's depth first.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| rank(b, a));
        for i in order {
            nodes[i].depth = match nodes[i].parent {
                Some(parent) => nodes[parent].depth + 1,
                None => 0,
            };
        }

        Ok(Self { nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> &ForestNode {
        &self.nodes[index]
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.nodes[index].parent
    }

    pub fn children(&self, index: usize) -> &[usize] {
        &self.nodes[index].children
    }

    pub fn depth(&self, index: usize) -> usize {
        self.nodes[index].depth
    }

    pub fn roots(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ForestNode)> {
        self.nodes.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profilekit_core::Point2;

    fn square(cx: f64, cy: f64, half: f64) -> Profile {
        Profile::new(
            vec![
                Point2::new(cx - half, cy - half),
                Point2::new(cx + half, cy - half),
                Point2::new(cx + half, cy + half),
                Point2::new(cx - half, cy + half),
            ],
            1e-9,
        )
        .unwrap()
    }

    #[test]
    fn test_graph_is_not_reduced() {
        let profiles = vec![square(0.0, 0.0, 1.0), square(0.0, 0.0, 10.0), square(0.0, 0.0, 5.0)];
        let graph = ContainmentGraph::build(&profiles, 1e-9);
        assert!(graph.contains(1, 2));
        assert!(graph.contains(2, 0));
        // Grandchild is listed under the outermost profile too.
        assert!(graph.contains(1, 0));
        assert_eq!(graph.roots(), vec![1]);
    }

    #[test]
    fn test_forest_keeps_immediate_parent() {
        let profiles = vec![square(0.0, 0.0, 1.0), square(0.0, 0.0, 10.0), square(0.0, 0.0, 5.0)];
        let graph = ContainmentGraph::build(&profiles, 1e-9);
        let forest =
            ContainmentForest::build(&profiles, &graph, ContainmentPolicy::default()).unwrap();
        assert_eq!(forest.parent(0), Some(2));
        assert_eq!(forest.parent(2), Some(1));
        assert_eq!(forest.parent(1), None);
        assert_eq!(forest.depth(0), 2);
        assert_eq!(forest.children(1), &[2]);
        assert_eq!(forest.roots(), vec![1]);
    }

    #[test]
    fn test_disjoint_profiles_are_all_roots() {
        let profiles = vec![square(0.0, 0.0, 1.0), square(5.0, 0.0, 1.0)];
        let graph = ContainmentGraph::build(&profiles, 1e-9);
        let forest =
            ContainmentForest::build(&profiles, &graph, ContainmentPolicy::default()).unwrap();
        assert_eq!(forest.roots(), vec![0, 1]);
    }

    #[test]
    fn test_overlapping_profiles_are_not_nested() {
        // The bar's top edge runs out of the notched plate through both
        // reflex corners of the V notch.
        let pts = |coords: &[(f64, f64)]| {
            coords
                .iter()
                .map(|&(x, y)| Point2::new(x, y))
                .collect::<Vec<_>>()
        };
        let notched = Profile::new(
            pts(&[
                (0.0, 0.0),
                (20.0, 0.0),
                (20.0, 10.0),
                (7.0, 10.0),
                (7.0, 3.0),
                (5.0, 1.0),
                (3.0, 3.0),
                (3.0, 10.0),
                (0.0, 10.0),
            ]),
            1e-9,
        )
        .unwrap();
        let bar = Profile::new(pts(&[(1.0, 0.5), (19.0, 0.5), (19.0, 3.0), (1.0, 3.0)]), 1e-9)
            .unwrap();
        let profiles = vec![notched, bar];

        let graph = ContainmentGraph::build(&profiles, 1e-9);
        assert!(!graph.contains(0, 1));
        assert!(!graph.contains(1, 0));

        let forest =
            ContainmentForest::build(&profiles, &graph, ContainmentPolicy::default()).unwrap();
        assert_eq!(forest.roots(), vec![0, 1]);
    }

    #[test]
    fn test_coincident_profiles_tie_broken_by_index() {
        let profiles = vec![square(0.0, 0.0, 3.0), square(0.0, 0.0, 3.0)];
        let graph = ContainmentGraph::build(&profiles, 1e-9);
        assert_eq!(graph.mutual_pairs(), vec![(0, 1)]);
        assert!(graph.roots().is_empty());

        let forest =
            ContainmentForest::build(&profiles, &graph, ContainmentPolicy::SmallestAreaWins)
                .unwrap();
        assert_eq!(forest.parent(0), Some(1));
        assert_eq!(forest.parent(1), None);
    }

    #[test]
    fn test_strict_policy_rejects_mutual_containment() {
        let profiles = vec![square(0.0, 0.0, 3.0), square(9.0, 9.0, 1.0), square(0.0, 0.0, 3.0)];
        let graph = ContainmentGraph::build(&profiles, 1e-9);
        assert_eq!(
            ContainmentForest::build(&profiles, &graph, ContainmentPolicy::Strict),
            Err(ContainmentError::MutualContainment {
                first: 0,
                second: 2
            })
        );
    }
}
