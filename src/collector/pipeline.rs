use tracing::{error, info, warn};

use crate::{
    collector::{
        donations::{DonationFilter, FilterReport},
        listing::{CandidateLister, Listing},
    },
    config::CollectorConfig,
    error::Result,
    fec::{Candidate, FecApi},
    storage::{merge_by_candidate_id, ErrorRecord, FilteredCandidate, JsonStore, StoreKind},
};

/// Result of a full fetch run
#[derive(Debug)]
pub struct FetchSummary {
    pub listing_complete: bool,
    pub pages_fetched: u32,
    pub candidates_listed: usize,
    pub filter: FilterReport,
}

/// Fetch, retry and merge operations over one [`JsonStore`]
pub struct Collector<'a, A> {
    api: &'a A,
    config: CollectorConfig,
    store: JsonStore,
}

impl<'a, A: FecApi> Collector<'a, A> {
    pub fn new(api: &'a A, config: CollectorConfig, store: JsonStore) -> Self {
        Self { api, config, store }
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    /// List candidates, filter them, and persist both the qualified set and
    /// the error set. The error store is always rewritten so stale failures
    /// from an older run are not retried.
    pub async fn fetch(&self) -> Result<FetchSummary> {
        info!("Starting fetch operation");

        let Listing {
            candidates,
            pages_fetched,
            complete,
        } = CandidateLister::new(self.api, &self.config).fetch_all().await;

        if !complete {
            warn!("Candidate listing stopped early; continuing with partial results");
        }

        let filter = DonationFilter::new(self.api, &self.config)
            .filter(&candidates, true)
            .await;

        self.store.save(StoreKind::Candidates, &filter.qualified)?;
        self.store.save(StoreKind::Errors, &filter.errors)?;
        if !filter.errors.is_empty() {
            warn!(
                "⚠️ Logged {} errors to {}",
                filter.errors.len(),
                self.store.path(StoreKind::Errors).display()
            );
        }

        Ok(FetchSummary {
            listing_complete: complete,
            pages_fetched,
            candidates_listed: candidates.len(),
            filter,
        })
    }

    /// Re-run the donation filter over the candidates recorded as errors.
    ///
    /// New failures are discarded. The recovered set is always written, even
    /// when there was nothing to retry.
    pub async fn retry(&self) -> Result<Vec<FilteredCandidate>> {
        info!("Starting retry operation");

        let recovered = match self.store.load::<ErrorRecord>(StoreKind::Errors)? {
            None => {
                warn!(
                    "⚠️ No error file found at {}. Nothing to retry.",
                    self.store.path(StoreKind::Errors).display()
                );
                Vec::new()
            }
            Some(errors) if errors.is_empty() => {
                warn!("⚠️ Error file is empty. Nothing to retry.");
                Vec::new()
            }
            Some(errors) => {
                info!("🔁 Retrying {} failed candidates...", errors.len());
                let candidates: Vec<Candidate> = errors.into_iter().map(Candidate::from).collect();
                DonationFilter::new(self.api, &self.config)
                    .filter(&candidates, false)
                    .await
                    .qualified
            }
        };

        let path = self.store.save(StoreKind::Retry, &recovered)?;
        info!(
            "✅ Recovered {} candidates written to {}",
            recovered.len(),
            path.display()
        );
        Ok(recovered)
    }

    /// Combine the primary and retry stores into the merged store.
    ///
    /// Returns `Ok(None)` without writing anything when either input is missing.
    pub fn merge(&self) -> Result<Option<Vec<FilteredCandidate>>> {
        info!("Starting merge operation");

        let primary = self.store.load::<FilteredCandidate>(StoreKind::Candidates)?;
        let recovered = self.store.load::<FilteredCandidate>(StoreKind::Retry)?;

        let (Some(primary), Some(recovered)) = (primary, recovered) else {
            error!(
                "❌ Required files do not exist ({} and {}). Cannot merge.",
                self.store.path(StoreKind::Candidates).display(),
                self.store.path(StoreKind::Retry).display()
            );
            return Ok(None);
        };

        let merged = merge_by_candidate_id(primary, recovered);
        let path = self.store.save(StoreKind::Merged, &merged)?;
        info!("✅ Merged {} candidates to {}", merged.len(), path.display());

        Ok(Some(merged))
    }
}
