pub mod donations;
pub mod listing;
pub mod outcome;
pub mod pipeline;

pub use donations::{DonationFilter, FilterReport};
pub use listing::{CandidateLister, Listing};
pub use outcome::{Outcome, SkipReason};
pub use pipeline::{Collector, FetchSummary};
