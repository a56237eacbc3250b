use crate::data::Pool;
use crate::tree::{BreedingTree, NodeId};
use std::collections::HashSet;

/// Share of a tree's nodes that already exist in the bank
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeScorer;

impl TreeScorer {
    pub fn new() -> Self {
        Self
    }

    /// Percentage in `[0, 100]` of the distinct nodes reachable from `roots`
    /// that have a bank entry with the same normalized stats and sex.
    /// An empty node set scores 0.
    pub fn score(&self, pool: &Pool, tree: &BreedingTree, roots: &[NodeId]) -> f64 {
        let collected: HashSet<NodeId> = roots
            .iter()
            .flat_map(|root| tree.preorder(*root))
            .collect();

        if collected.is_empty() {
            return 0.0;
        }

        let matching = collected
            .iter()
            .filter_map(|id| tree.individual(*id).ok())
            .filter(|individual| pool.has_match(individual))
            .count();

        100.0 * matching as f64 / collected.len() as f64
    }
}
