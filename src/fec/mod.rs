pub mod client;
pub mod retry;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use client::FecClient;
pub use retry::{AttemptError, RetryPolicy};
pub use types::{
    Candidate, CandidateQuery, Committee, DonationQuery, DonationRecord, FinancialReport, Page,
    Pagination,
};

use crate::error::Result;

/// The slice of the FEC API the collector and lookups depend on.
///
/// Implementations are expected to apply their own retry policy; a returned
/// error is terminal for that single request.
#[allow(async_fn_in_trait)]
pub trait FecApi {
    /// One page (1-indexed) of `candidates/search`
    async fn list_candidates(&self, query: &CandidateQuery, page: u32) -> Result<Page<Candidate>>;

    /// All committees linked to a candidate
    async fn candidate_committees(&self, candidate_id: &str) -> Result<Vec<Committee>>;

    /// Schedule A receipts matching `query`
    async fn donations(&self, query: &DonationQuery) -> Result<Vec<DonationRecord>>;

    /// Reports filed by a committee, in whatever order the API returns them
    async fn committee_reports(&self, committee_id: &str) -> Result<Vec<FinancialReport>>;
}
