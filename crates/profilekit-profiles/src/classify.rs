//! SOLID / HOLE labelling by nesting depth.

use crate::containment::{ContainmentForest, ContainmentGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether a profile bounds material or a void.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Outer material boundary, offset outward.
    #[default]
    Solid,
    /// Void inside a solid, offset inward.
    Hole,
}

impl Region {
    pub fn flip(self) -> Self {
        match self {
            Region::Solid => Region::Hole,
            Region::Hole => Region::Solid,
        }
    }

    /// Multiplier applied to the configured offset magnitude.
    pub fn offset_sign(self) -> f64 {
        match self {
            Region::Solid => 1.0,
            Region::Hole => -1.0,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Region::Solid => "SOLID",
            Region::Hole => "HOLE",
        })
    }
}

/// One label per profile index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    labels: Vec<Region>,
}

impl Classification {
    pub fn get(&self, index: usize) -> Option<Region> {
        self.labels.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Region)> + '_ {
        self.labels.iter().copied().enumerate()
    }

    pub fn solids(&self) -> Vec<usize> {
        self.indices_of(Region::Solid)
    }

    pub fn holes(&self) -> Vec<usize> {
        self.indices_of(Region::Hole)
    }

    fn indices_of(&self, region: Region) -> Vec<usize> {
        self.iter()
            .filter(|&(_, r)| r == region)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Labels every node of `forest`: roots are solid and each child takes the
/// opposite label of its parent.
pub fn classify(forest: &ContainmentForest) -> Classification {
    let mut labels = vec![Region::Solid; forest.len()];
    let mut stack: Vec<(usize, Region)> = forest
        .roots()
        .into_iter()
        .map(|root| (root, Region::Solid))
        .collect();

    while let Some((index, region)) = stack.pop() {
        labels[index] = region;
        for &child in forest.children(index) {
            stack.push((child, region.flip()));
        }
    }

    Classification { labels }
}

/// Labels profiles by walking the raw, non-reduced graph.
///
/// A profile listed under several ancestors is visited once per ancestor and
/// keeps the label from its last visit, so inconsistent nesting parity
/// depends on traversal order. Prefer [`classify`] on a reduced forest.
pub fn classify_graph(graph: &ContainmentGraph) -> Classification {
    let mut labels = vec![Region::Solid; graph.len()];
    let mut seen: HashSet<(usize, Region)> = HashSet::new();
    let mut stack: Vec<(usize, Region)> = graph
        .roots()
        .into_iter()
        .map(|root| (root, Region::Solid))
        .collect();

    while let Some((index, region)) = stack.pop() {
        labels[index] = region;
        // Mutually containing profiles would otherwise cycle forever.
        if !seen.insert((index, region)) {
            continue;
        }
        for &child in graph.children(index) {
            stack.push((child, region.flip()));
        }
    }

    Classification { labels }
}
