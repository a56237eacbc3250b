pub mod matcher;
pub mod scorer;

pub use matcher::{BankMatcher, MatchReport};
pub use scorer::TreeScorer;
