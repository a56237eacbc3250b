use crate::data::Pool;
use crate::tree::{BreedingTree, NodeId};
use crate::types::Individual;

#[derive(Clone, Debug)]
pub struct ScoredTree {
    pub tree: BreedingTree,
    pub score: f64,       // Percentage of tree nodes found in the bank
    pub iteration: usize, // Search iteration that produced the tree
}

/// A leaf of a retained tree that has to be sourced from the wild or the bank
#[derive(Clone, Debug)]
pub struct WildEntry {
    pub node: NodeId,
    pub individual: Individual,
    pub in_bank: bool,
}

impl ScoredTree {
    pub fn target(&self) -> Option<&Individual> {
        self.tree.individual(self.tree.root()).ok()
    }

    /// Leaves of the tree, flagged when their (possibly reassigned) id is a bank id
    pub fn wild(&self, pool: &Pool) -> Vec<WildEntry> {
        self.tree
            .leaves()
            .into_iter()
            .filter_map(|node| {
                let individual = self.tree.individual(node).ok()?.clone();
                let in_bank = pool.contains_id(individual.id());
                Some(WildEntry {
                    node,
                    individual,
                    in_bank,
                })
            })
            .collect()
    }
}

pub struct HallOfFame {
    trees: Vec<ScoredTree>,
    max_size: usize,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            trees: Vec::new(),
            max_size,
        }
    }

    /// Attempt to add a tree. An entry never displaces an equal-scored one
    /// that was added earlier.
    pub fn try_add(&mut self, tree: ScoredTree) -> bool {
        if self.max_size == 0 {
            return false;
        }
        if self.trees.len() >= self.max_size {
            let worst = self.trees.last().map(|t| t.score).unwrap_or(f64::MIN);
            if tree.score <= worst {
                return false;
            }
        }

        self.trees.push(tree);
        self.sort_and_trim();
        true
    }

    /// Stable sort by score (descending), then trim to max size
    fn sort_and_trim(&mut self) {
        self.trees.sort_by(|a, b| {
            b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal)
        });
        self.trees.truncate(self.max_size);
    }

    pub fn best(&self) -> Option<&ScoredTree> {
        self.trees.first()
    }

    pub fn best_score(&self) -> f64 {
        self.best().map(|t| t.score).unwrap_or(0.0)
    }

    pub fn into_vec(self) -> Vec<ScoredTree> {
        self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
