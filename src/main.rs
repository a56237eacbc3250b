use anyhow::Context;
use breedtree::config::ConfigManager;
use breedtree::data::Pool;
use breedtree::engines::generation::{ConsoleProgressCallback, TreeSearch};
use breedtree::types::PokeRecord;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "breedtree")]
#[command(about = "Search for a breeding tree that reuses as much of the bank as possible")]
struct Args {
    /// TOML config file; BREEDTREE_* environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target encoding, e.g. "+ + - - + - (f)"
    #[arg(short, long, default_value = "+ + - - + - (f)")]
    target: String,

    /// Random seed (overrides search.seed from the config)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let manager = ConfigManager::new();
    manager.load_layered(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        manager.update(|c| c.search.seed = Some(seed))?;
    }
    let config = manager.get();

    let pool = load_bank(&config.bank.path)?;
    println!("Bank entries: {}", pool.len());

    let mut search = TreeSearch::new(config.search.clone())?;
    let trees = search.run(&args.target, &pool, ConsoleProgressCallback::default())?;

    let Some(best) = trees.first() else {
        println!("No tree retained");
        return Ok(());
    };

    if let Some(target) = best.target() {
        println!("Target: {}", target.label());
    }
    println!("\n{}", best.tree.outline());
    println!("Best tree similarity score: {:.1}%", best.score);
    println!("\nWild creatures required:");
    for entry in best.wild(&pool) {
        let status = if entry.in_bank { " [in bank]" } else { "" };
        println!(
            "ID: {}, Stats: {}, Sex: {}{}",
            entry.individual.id(),
            entry.individual.stats_string(),
            entry.individual.sex().marker(),
            status
        );
    }

    Ok(())
}

fn load_bank(path: &Path) -> anyhow::Result<Pool> {
    if !path.exists() {
        log::warn!("Bank file {} not found, starting with an empty bank", path.display());
        return Ok(Pool::new());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bank file {}", path.display()))?;
    let records: Vec<PokeRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse bank file {}", path.display()))?;
    Ok(Pool::from_records(&records)?)
}
