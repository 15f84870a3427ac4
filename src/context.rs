use indexmap::IndexMap;
use tracing::{info, warn};

use crate::{
    cache::BoundedCache,
    config::Config,
    error::Result,
    fec::FinancialReport,
    storage::{FilteredCandidate, JsonStore, StoreKind},
};

/// Everything the lookup commands need, built once by [`AppContext::init`]
/// and passed explicitly.
pub struct AppContext<A> {
    pub config: Config,
    pub api: A,
    /// Primary store as it was at initialization, keyed by candidate id
    roster: IndexMap<String, FilteredCandidate>,
    reports: BoundedCache<String, FinancialReport>,
}

impl<A> AppContext<A> {
    pub fn init(config: Config, api: A) -> Result<Self> {
        let store = JsonStore::new(config.storage.clone());

        let roster: IndexMap<String, FilteredCandidate> =
            match store.load::<FilteredCandidate>(StoreKind::Candidates)? {
                Some(candidates) => candidates
                    .into_iter()
                    .map(|c| (c.candidate_id.clone(), c))
                    .collect(),
                None => {
                    warn!(
                        "No candidate store at {}; committee lookups will be empty",
                        store.path(StoreKind::Candidates).display()
                    );
                    IndexMap::new()
                }
            };

        let reports = BoundedCache::new(config.cache.capacity, config.cache.eviction);
        info!(
            candidates = roster.len(),
            cache_capacity = config.cache.capacity,
            eviction = %config.cache.eviction,
            "Application context ready"
        );

        Ok(Self {
            config,
            api,
            roster,
            reports,
        })
    }

    pub fn candidate(&self, candidate_id: &str) -> Option<&FilteredCandidate> {
        self.roster.get(candidate_id)
    }

    pub fn report_cache(&self) -> &BoundedCache<String, FinancialReport> {
        &self.reports
    }

    pub(crate) fn report_cache_mut(&mut self) -> &mut BoundedCache<String, FinancialReport> {
        &mut self.reports
    }
}
