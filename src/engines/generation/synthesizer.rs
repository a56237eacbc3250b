use crate::engines::generation::operators::{choose_braced, common_slots, opposite_sexes};
use crate::error::{BreedError, Result};
use crate::tree::{BreedingTree, NodeId, ParentPair};
use crate::types::{Individual, Sex, Trait, STAT_COUNT};
use rand::Rng;

/// Fabricates random parents consistent with the inheritance rules.
///
/// For a node with `k >= 2` perfect slots, up to two of them are braced (one
/// on each parent) and the rest are required as plain perfect on both
/// parents. Each parent therefore carries `k - 1` perfect slots, so recursive
/// synthesis ends once a generation reaches a single perfect slot. `max_depth`
/// bounds the number of generations below the root regardless.
#[derive(Debug, Clone, Copy)]
pub struct TreeSynthesizer {
    max_depth: usize,
}

impl TreeSynthesizer {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Attaches random parents to `id`, returning them, or `None` if the node
    /// has at most one perfect slot and needs no breeding.
    pub fn synthesize<R: Rng>(
        &self,
        tree: &mut BreedingTree,
        id: NodeId,
        recursive: bool,
        rng: &mut R,
    ) -> Result<Option<ParentPair>> {
        let depth = tree.depth(id);
        self.grow(tree, id, depth, recursive, rng)
    }

    fn grow<R: Rng>(
        &self,
        tree: &mut BreedingTree,
        id: NodeId,
        depth: usize,
        recursive: bool,
        rng: &mut R,
    ) -> Result<Option<ParentPair>> {
        let individual = tree.individual(id)?;
        if tree.parents(id).is_some() {
            return Err(BreedError::AlreadyParented(individual.id().to_string()));
        }
        if individual.perfect_count() <= 1 {
            log::trace!("{} needs no parents", individual.id());
            return Ok(None);
        }
        if depth >= self.max_depth {
            log::warn!(
                "Depth cap {} reached at {}, leaving it wild",
                self.max_depth,
                individual.id()
            );
            return Ok(None);
        }

        let inheritable = individual.inheritable_slots();
        let braced = choose_braced(&inheritable, rng);
        let common = common_slots(&inheritable, &braced);

        let mut first = [Trait::Absent; STAT_COUNT];
        let mut second = [Trait::Absent; STAT_COUNT];
        for &slot in &common {
            first[slot] = Trait::Perfect;
            second[slot] = Trait::Perfect;
        }
        first[braced[0]] = Trait::PerfectForced;
        if let Some(&slot) = braced.get(1) {
            second[slot] = Trait::PerfectForced;
        }

        let (first_sex, second_sex) = opposite_sexes(rng);
        let first = Individual::new(first, first_sex);
        let second = Individual::new(second, second_sex);
        let (male, female) = if first_sex == Sex::Male {
            (first, second)
        } else {
            (second, first)
        };

        let pair = tree.attach_parents(id, male, female)?;
        if recursive {
            self.grow(tree, pair.male, depth + 1, true, rng)?;
            self.grow(tree, pair.female, depth + 1, true, rng)?;
        }
        Ok(Some(pair))
    }
}

impl Default for TreeSynthesizer {
    fn default() -> Self {
        Self::new(8)
    }
}
