pub mod fallback;
pub mod scoring;
pub mod search;

pub use fallback::fallback_results;
pub use scoring::relevance_score;
pub use search::{SearchError, SearchOutcome, SearchService};
