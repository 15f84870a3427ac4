pub mod merge;
pub mod models;
pub mod store;

pub use merge::merge_by_candidate_id;
pub use models::{CommitteeRef, ErrorRecord, FilteredCandidate};
pub use store::{JsonStore, StoreKind};
