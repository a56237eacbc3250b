pub mod operators;
pub mod synthesizer;
pub mod breeding;
pub mod hall_of_fame;
pub mod search;
pub mod progress;

pub use synthesizer::TreeSynthesizer;
pub use breeding::{breed, breed_trees};
pub use hall_of_fame::{HallOfFame, ScoredTree, WildEntry};
pub use search::{TreeSearch, ProgressCallback};
pub use progress::{ConsoleProgressCallback, ChannelProgressCallback, ProgressMessage};
