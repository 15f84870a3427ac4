use std::time::Duration;
use tracing::{error, info};

use crate::{
    config::CollectorConfig,
    fec::{Candidate, CandidateQuery, FecApi},
};

/// Candidates gathered by a paged listing
#[derive(Debug, Default)]
pub struct Listing {
    pub candidates: Vec<Candidate>,
    pub pages_fetched: u32,
    /// False when a page failed and the walk stopped early
    pub complete: bool,
}

/// Walks `candidates/search` page by page for one jurisdiction
pub struct CandidateLister<'a, A> {
    api: &'a A,
    query: CandidateQuery,
    election_years: Vec<u16>,
    delay: Duration,
}

impl<'a, A: FecApi> CandidateLister<'a, A> {
    pub fn new(api: &'a A, config: &CollectorConfig) -> Self {
        Self {
            api,
            query: CandidateQuery {
                state: Some(config.state.clone()),
                candidate_status: Some(config.candidate_status.clone()),
                name: None,
                per_page: config.per_page,
            },
            election_years: config.election_years.clone(),
            delay: config.rate_limit_delay(),
        }
    }

    /// Fetch every page, keeping candidates running in a target year.
    ///
    /// A failed page ends the walk; everything gathered before it is kept.
    pub async fn fetch_all(&self) -> Listing {
        info!(
            "Starting to fetch {} candidates...",
            self.query.state.as_deref().unwrap_or("all")
        );

        let mut listing = Listing::default();
        let mut page = 1;

        loop {
            info!("📄 Fetching page {}...", page);

            match self.api.list_candidates(&self.query, page).await {
                Ok(result) => {
                    listing.pages_fetched += 1;
                    let recent: Vec<Candidate> = result
                        .results
                        .into_iter()
                        .filter(|c| c.runs_in_any(&self.election_years))
                        .collect();
                    info!(page, kept = recent.len(), "Page fetched");
                    listing.candidates.extend(recent);

                    if page >= result.pagination.pages {
                        listing.complete = true;
                        break;
                    }
                }
                Err(e) => {
                    error!("❌ Error on page {}: {}", page, e);
                    break;
                }
            }

            page += 1;
            tokio::time::sleep(self.delay).await;
        }

        info!(
            "✅ Found {} recent active candidates across {} pages.",
            listing.candidates.len(),
            listing.pages_fetched
        );
        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fec::fake::FakeFec;

    fn config() -> CollectorConfig {
        CollectorConfig {
            rate_limit_delay_ms: 0,
            ..Default::default()
        }
    }

    fn cand(id: &str, years: &[u16]) -> Candidate {
        Candidate::new(id, format!("CANDIDATE {id}")).with_election_years(years)
    }

    #[tokio::test]
    async fn test_accumulates_filtered_pages_in_order() {
        let api = FakeFec::new()
            .with_page(1, vec![cand("A", &[2024]), cand("B", &[2018]), cand("C", &[2020, 2022])])
            .with_page(2, vec![cand("D", &[2016])])
            .with_page(3, vec![cand("E", &[2024, 2026]), cand("F", &[2022])]);
        let config = config();

        let listing = CandidateLister::new(&api, &config).fetch_all().await;

        let ids: Vec<_> = listing.candidates.iter().map(|c| c.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C", "E", "F"]);
        assert_eq!(listing.pages_fetched, 3);
        assert!(listing.complete);
        assert_eq!(api.call_count("candidates"), 3);
    }

    #[tokio::test]
    async fn test_failed_page_keeps_partial_results() {
        let api = FakeFec::new()
            .with_page(1, vec![cand("A", &[2024])])
            .with_failed_page(2, 503)
            .with_page(3, vec![cand("C", &[2024])]);
        let config = config();

        let listing = CandidateLister::new(&api, &config).fetch_all().await;

        assert_eq!(listing.candidates.len(), 1);
        assert_eq!(listing.candidates[0].candidate_id, "A");
        assert!(!listing.complete);
        assert_eq!(api.calls(), vec!["candidates:1", "candidates:2"]);
    }
}
