use crate::engines::generation::operators::random_sex;
use crate::error::{BreedError, Result};
use crate::tree::BreedingTree;
use crate::types::{Individual, Sex, Trait, STAT_COUNT};
use rand::Rng;

/// Offspring of an opposite-sex pair.
///
/// A slot braced on either parent comes through as perfect. Otherwise the
/// child only keeps a slot both parents agree on. Sex is random and the
/// nature marker passes down from either parent.
pub fn breed<R: Rng>(a: &Individual, b: &Individual, rng: &mut R) -> Result<Individual> {
    let (male, female) = order_pair(a, b)?;

    let mut traits = [Trait::Absent; STAT_COUNT];
    for (slot, (m, f)) in traits
        .iter_mut()
        .zip(male.traits().iter().zip(female.traits().iter()))
    {
        *slot = if m.is_forced() || f.is_forced() {
            Trait::Perfect
        } else if m == f {
            *m
        } else {
            Trait::Absent
        };
    }

    Ok(Individual::new(traits, random_sex(rng))
        .with_nature(male.has_nature() || female.has_nature()))
}

/// Breeds the roots of two trees and joins both ancestries under the offspring
pub fn breed_trees<R: Rng>(
    a: &BreedingTree,
    b: &BreedingTree,
    rng: &mut R,
) -> Result<BreedingTree> {
    let a_root = a.individual(a.root())?;
    let b_root = b.individual(b.root())?;
    let child = breed(a_root, b_root, rng)?;
    if a_root.sex() == Sex::Male {
        BreedingTree::join(child, a, b)
    } else {
        BreedingTree::join(child, b, a)
    }
}

fn order_pair<'a>(a: &'a Individual, b: &'a Individual) -> Result<(&'a Individual, &'a Individual)> {
    match (a.sex(), b.sex()) {
        (Sex::Male, Sex::Female) => Ok((a, b)),
        (Sex::Female, Sex::Male) => Ok((b, a)),
        (x, y) => Err(BreedError::IncompatiblePair(format!(
            "cannot breed {} with {}",
            x.marker(),
            y.marker()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn poke(code: &str) -> Individual {
        Individual::from_encoding(code).unwrap()
    }

    #[test]
    fn test_breed_combines_braced_and_shared_slots() {
        let mut rng = StdRng::seed_from_u64(4);
        let child = breed(&poke("* + - - - - (m)"), &poke("- + - * - - (f)"), &mut rng).unwrap();
        assert_eq!(child.stats_string(), "+ + - + - -");
        assert_ne!(child.sex(), Sex::Unknown);

        let child = breed(&poke("- + + - - - (f)"), &poke("* - + - - - (m)"), &mut rng).unwrap();
        assert_eq!(child.stats_string(), "+ - + - - -");
    }

    #[test]
    fn test_breed_passes_nature() {
        let mut rng = StdRng::seed_from_u64(4);
        let child = breed(&poke("* - - - - - (m) [Nat]"), &poke("- * - - - - (f)"), &mut rng).unwrap();
        assert!(child.has_nature());
    }

    #[test]
    fn test_breed_rejects_same_sex() {
        let mut rng = StdRng::seed_from_u64(4);
        let err = breed(&poke("* - - - - - (m)"), &poke("- * - - - - (m)"), &mut rng).unwrap_err();
        assert!(matches!(err, BreedError::IncompatiblePair(_)));
        assert!(breed(&poke("* - - - - - (?)"), &poke("- * - - - - (f)"), &mut rng).is_err());
    }

    #[test]
    fn test_breed_trees_joins_ancestry() {
        let mut rng = StdRng::seed_from_u64(8);
        let mother = BreedingTree::new(poke("- * - - - - (f)"));
        let father = BreedingTree::new(poke("* - - - - - (m)"));
        let tree = breed_trees(&mother, &father, &mut rng).unwrap();

        assert_eq!(tree.len(), 3);
        let pair = tree.parents(tree.root()).unwrap();
        assert_eq!(tree.individual(pair.male).unwrap().sex(), Sex::Male);
        assert_eq!(tree.individual(tree.root()).unwrap().stats_string(), "+ + - - - -");
    }
}
