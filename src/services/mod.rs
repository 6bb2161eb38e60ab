pub mod providers;
pub mod recommendations;
pub mod similarity;
pub mod skills;
pub mod synthesis;

pub use recommendations::Recommender;
pub use skills::SynonymTable;
