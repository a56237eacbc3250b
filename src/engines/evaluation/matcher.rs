use crate::data::Pool;
use crate::error::Result;
use crate::tree::{BreedingTree, NodeId};

/// Outcome of reconciling a tree with the bank
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    /// Nodes that took over a bank identity, with that identity
    pub matched: Vec<(NodeId, String)>,
    /// Nodes left with their synthesized identity
    pub unmatched: Vec<NodeId>,
}

impl MatchReport {
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }
}

/// Reassigns tree node identities to owned bank creatures.
///
/// Nodes are visited in pre-order (a node before its male then female
/// ancestry). Each node claims the first remaining bank entry with the same
/// normalized stats and sex, and a claimed entry is never offered again.
#[derive(Debug, Clone, Copy, Default)]
pub struct BankMatcher;

impl BankMatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn match_tree(&self, tree: &mut BreedingTree, pool: &Pool) -> Result<MatchReport> {
        let mut available = pool.snapshot();
        let mut report = MatchReport::default();

        for id in tree.nodes() {
            let individual = tree.individual(id)?;
            let Some(position) = available.iter().position(|entry| entry.matches(individual)) else {
                report.unmatched.push(id);
                continue;
            };

            let entry = available.remove(position);
            log::trace!("Node {} takes bank identity {}", individual.id(), entry.id());
            tree.individual_mut(id)?.assume_identity(entry.id());
            report.matched.push((id, entry.id().to_string()));
        }

        Ok(report)
    }
}
