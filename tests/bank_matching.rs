use breedtree::data::Pool;
use breedtree::engines::evaluation::BankMatcher;
use breedtree::engines::generation::TreeSynthesizer;
use breedtree::tree::BreedingTree;
use breedtree::types::{Encoding, Individual, Sex, Trait, STAT_COUNT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn random_individual<R: Rng>(rng: &mut R) -> Individual {
    let mut traits = [Trait::Absent; STAT_COUNT];
    for slot in traits.iter_mut() {
        if rng.gen_bool(0.3) {
            *slot = Trait::Perfect;
        }
    }
    let sex = if rng.gen::<bool>() { Sex::Male } else { Sex::Female };
    Individual::new(traits, sex)
}

fn random_tree<R: Rng>(code: &str, rng: &mut R) -> BreedingTree {
    let mut tree = BreedingTree::new(Individual::from_encoding(code).unwrap());
    let root = tree.root();
    TreeSynthesizer::default()
        .synthesize(&mut tree, root, true, rng)
        .unwrap();
    tree
}

#[test]
fn test_pool_identity_claimed_at_most_once() {
    let mut rng = StdRng::seed_from_u64(2024);
    for pool_size in [0, 1, 4, 16, 64] {
        let pool: Pool = (0..pool_size).map(|_| random_individual(&mut rng)).collect();
        let bank_ids: HashSet<String> = pool.iter().map(|p| p.id().to_string()).collect();

        for _ in 0..10 {
            let mut tree = random_tree("+ + + + - - (f)", &mut rng);
            let report = BankMatcher::new().match_tree(&mut tree, &pool).unwrap();

            let claimed: Vec<&str> = tree
                .nodes()
                .into_iter()
                .map(|id| tree.individual(id).unwrap().id())
                .filter(|id| bank_ids.contains(*id))
                .collect();
            let unique: HashSet<&str> = claimed.iter().copied().collect();
            assert_eq!(claimed.len(), unique.len());
            assert_eq!(claimed.len(), report.matched_count());
            assert!(report.matched_count() <= pool_size);
        }
    }
}

#[test]
fn test_matching_does_not_modify_pool() {
    let mut rng = StdRng::seed_from_u64(99);
    let pool: Pool = ["+ - - - - - (m)", "- + - - - - (f)", "- - + - - - (m)", "- - - + - - (f)"]
        .iter()
        .map(|code| Individual::from_encoding(code).unwrap())
        .collect();
    let before: Vec<Individual> = pool.iter().cloned().collect();

    for _ in 0..25 {
        let mut tree = random_tree("+ + + + - - (m)", &mut rng);
        BankMatcher::new().match_tree(&mut tree, &pool).unwrap();
    }

    assert_eq!(pool.len(), 4);
    assert_eq!(pool.as_slice(), before.as_slice());
}

#[test]
fn test_matched_nodes_share_bank_encoding() {
    let mut rng = StdRng::seed_from_u64(5);
    let pool: Pool = ["+ - - - - - (m)", "+ - - - - - (f)", "- + - - - - (m)", "- + - - - - (f)"]
        .iter()
        .map(|code| Individual::from_encoding(code).unwrap())
        .collect();

    let mut tree = random_tree("+ + - - - - (m)", &mut rng);
    let report = BankMatcher::new().match_tree(&mut tree, &pool).unwrap();
    assert_eq!(report.matched_count(), 2);

    for (node, bank_id) in &report.matched {
        let node = tree.individual(*node).unwrap();
        let entry = pool.get(bank_id).unwrap();
        assert!(node.matches(entry));
        assert_eq!(node.normalized_stats(), entry.stats_string());
    }
}

#[test]
fn test_encoding_round_trip_over_all_codes() {
    let symbols = ['-', '+', '*'];
    let mut count = 0;
    for code in 0..3usize.pow(STAT_COUNT as u32) {
        let mut n = code;
        let stats: Vec<String> = (0..STAT_COUNT)
            .map(|_| {
                let s = symbols[n % 3];
                n /= 3;
                s.to_string()
            })
            .collect();
        for sex in ["(m)", "(f)", "(?)"] {
            let text = format!("{} {}", stats.join(" "), sex);
            let encoding = Encoding::parse(&text).unwrap();
            assert_eq!(encoding.render(), text);
            count += 1;
        }
    }
    assert_eq!(count, 729 * 3);
}
