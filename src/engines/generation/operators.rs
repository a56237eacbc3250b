use crate::types::Sex;
use rand::seq::SliceRandom;
use rand::Rng;

/// Maximum number of slots the genetics can guarantee passing down per pairing
pub const MAX_BRACED: usize = 2;

/// Pick up to two inheritable slots to brace, uniformly and without replacement
pub fn choose_braced<R: Rng>(inheritable: &[usize], rng: &mut R) -> Vec<usize> {
    inheritable
        .choose_multiple(rng, inheritable.len().min(MAX_BRACED))
        .copied()
        .collect()
}

/// Inheritable slots that were not braced; both parents must carry these
pub fn common_slots(inheritable: &[usize], braced: &[usize]) -> Vec<usize> {
    inheritable
        .iter()
        .filter(|slot| !braced.contains(slot))
        .copied()
        .collect()
}

/// An opposite-sex pair in random order
pub fn opposite_sexes<R: Rng>(rng: &mut R) -> (Sex, Sex) {
    let first = random_sex(rng);
    (first, first.opposite())
}

pub fn random_sex<R: Rng>(rng: &mut R) -> Sex {
    if rng.gen::<bool>() {
        Sex::Male
    } else {
        Sex::Female
    }
}
