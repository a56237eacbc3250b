use crate::config::SearchConfig;
use crate::config::traits::validate_section;
use crate::data::Pool;
use crate::engines::evaluation::{BankMatcher, TreeScorer};
use crate::engines::generation::{
    hall_of_fame::{HallOfFame, ScoredTree},
    synthesizer::TreeSynthesizer,
};
use crate::error::Result;
use crate::tree::{BreedingTree, NodeId};
use crate::types::{Encoding, Individual};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

pub trait ProgressCallback: Send {
    fn on_iteration_complete(&mut self, iteration: usize, score: f64, best_score: f64, retained: usize);
    fn on_search_complete(&mut self, best_score: f64, retained: usize);
}

/// Sampling search for the breeding tree that reuses the most of the bank.
///
/// Every iteration synthesizes a fresh random ancestry for the target,
/// reconciles it against a private view of the pool and scores it. The best
/// `keep` trees are retained.
pub struct TreeSearch {
    config: SearchConfig,
    synthesizer: TreeSynthesizer,
    matcher: BankMatcher,
    scorer: TreeScorer,
    rng: StdRng,
}

impl TreeSearch {
    pub fn new(config: SearchConfig) -> Result<Self> {
        validate_section(&config)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            synthesizer: TreeSynthesizer::new(config.max_depth),
            matcher: BankMatcher::new(),
            scorer: TreeScorer::new(),
            config,
            rng,
        })
    }

    /// Run the search for a target given in trait encoding, e.g. `"+ + - - + - (f)"`.
    ///
    /// A malformed target aborts before any iteration runs. Returns the
    /// retained trees, best first.
    pub fn run<C: ProgressCallback>(
        &mut self,
        target: &str,
        pool: &Pool,
        callback: C,
    ) -> Result<Vec<ScoredTree>> {
        let target = Encoding::parse(target)?;
        self.run_encoding(&target, pool, callback)
    }

    pub fn run_encoding<C: ProgressCallback>(
        &mut self,
        target: &Encoding,
        pool: &Pool,
        mut callback: C,
    ) -> Result<Vec<ScoredTree>> {
        let mut hall_of_fame = HallOfFame::new(self.config.keep);
        log::debug!(
            "Searching {} trees for {} against {} bank entries",
            self.config.iterations,
            target,
            pool.len()
        );

        // One seed per iteration, so both modes sample identical trees
        let seeds: Vec<u64> = (0..self.config.iterations).map(|_| self.rng.gen()).collect();
        let samples = if self.config.parallel {
            self.sample_parallel(seeds, target, pool)?
        } else {
            let mut samples = Vec::with_capacity(seeds.len());
            for seed in seeds {
                let mut rng = StdRng::seed_from_u64(seed);
                samples.push(sample_tree(
                    &self.synthesizer,
                    &self.matcher,
                    &self.scorer,
                    target,
                    pool,
                    &mut rng,
                )?);
            }
            samples
        };

        // Merge in iteration order so ties resolve the same way in both modes
        for (iteration, (tree, score)) in samples.into_iter().enumerate() {
            log::debug!("Iteration {}: {} nodes, score {:.1}%", iteration + 1, tree.len(), score);
            hall_of_fame.try_add(ScoredTree {
                tree,
                score,
                iteration,
            });
            callback.on_iteration_complete(
                iteration,
                score,
                hall_of_fame.best_score(),
                hall_of_fame.len(),
            );
        }

        callback.on_search_complete(hall_of_fame.best_score(), hall_of_fame.len());
        log::info!(
            "Best tree for {} scores {:.1}% ({} retained)",
            target,
            hall_of_fame.best_score(),
            hall_of_fame.len()
        );

        Ok(hall_of_fame.into_vec())
    }

    fn sample_parallel(
        &self,
        seeds: Vec<u64>,
        target: &Encoding,
        pool: &Pool,
    ) -> Result<Vec<(BreedingTree, f64)>> {
        let synthesizer = &self.synthesizer;
        let matcher = &self.matcher;
        let scorer = &self.scorer;

        seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                sample_tree(synthesizer, matcher, scorer, target, pool, &mut rng)
            })
            .collect()
    }
}

/// One iteration: synthesize, reconcile against the bank, score
fn sample_tree<R: Rng>(
    synthesizer: &TreeSynthesizer,
    matcher: &BankMatcher,
    scorer: &TreeScorer,
    target: &Encoding,
    pool: &Pool,
    rng: &mut R,
) -> Result<(BreedingTree, f64)> {
    let mut tree = BreedingTree::new(Individual::from(*target));
    let root = tree.root();
    tree.reset(root)?;
    synthesizer.synthesize(&mut tree, root, true, rng)?;
    matcher.match_tree(&mut tree, pool)?;

    let roots: Vec<NodeId> = tree
        .parents(root)
        .map(|p| vec![p.male, p.female])
        .unwrap_or_default();
    let score = scorer.score(pool, &tree, &roots);
    Ok((tree, score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::progress::{ChannelProgressCallback, ProgressMessage};
    use crate::error::BreedError;
    use std::sync::mpsc::channel;

    fn config(iterations: usize, keep: usize, parallel: bool) -> SearchConfig {
        SearchConfig {
            iterations,
            keep,
            parallel,
            seed: Some(42),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_malformed_target_aborts() {
        let (tx, rx) = channel();
        let mut search = TreeSearch::new(config(10, 5, false)).unwrap();
        let err = search
            .run("+ + (f)", &Pool::new(), ChannelProgressCallback::new(tx))
            .unwrap_err();
        assert!(matches!(err, BreedError::Format(_)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(TreeSearch::new(config(0, 5, false)).is_err());
        assert!(TreeSearch::new(config(5, 0, false)).is_err());
    }

    #[test]
    fn test_progress_reports_every_iteration() {
        let (tx, rx) = channel();
        let mut search = TreeSearch::new(config(7, 3, false)).unwrap();
        let trees = search
            .run("+ + - - + - (f)", &Pool::new(), ChannelProgressCallback::new(tx))
            .unwrap();
        assert_eq!(trees.len(), 3);

        let messages: Vec<ProgressMessage> = rx.try_iter().collect();
        assert_eq!(messages.len(), 8);
        assert!(matches!(messages.last(), Some(ProgressMessage::SearchComplete { retained: 3, .. })));
    }

    #[test]
    fn test_parallel_search_matches_sequential_for_same_seed() {
        let pool: Pool = ["- - - - + - (m)", "- - - + - - (f)", "+ - - - - - (m)"]
            .iter()
            .map(|code| Individual::from_encoding(code).unwrap())
            .collect();

        let retained = |parallel: bool| {
            let (tx, _rx) = channel();
            TreeSearch::new(config(100, 20, parallel))
                .unwrap()
                .run("+ + + - + - (f)", &pool, ChannelProgressCallback::new(tx))
                .unwrap()
        };
        let sequential = retained(false);
        let parallel = retained(true);

        let summary = |trees: &[ScoredTree]| -> Vec<(usize, f64, Vec<String>)> {
            trees
                .iter()
                .map(|t| {
                    let stats = t
                        .tree
                        .nodes()
                        .into_iter()
                        .map(|id| t.tree.individual(id).unwrap().encoding().render())
                        .collect();
                    (t.iteration, t.score, stats)
                })
                .collect()
        };
        assert_eq!(sequential.len(), 20);
        assert_eq!(summary(&sequential), summary(&parallel));
        let scores: Vec<f64> = parallel.iter().map(|t| t.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }
}
