pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod tree;
pub mod types;

pub use data::Pool;
pub use error::{BreedError, Result};
pub use tree::{BreedingTree, NodeId, ParentPair};
pub use types::{Encoding, Individual, PokeRecord, Sex, Stat, Trait};
