use tracing::{debug, info};

use crate::{
    context::AppContext,
    error::{CollectorError, Result},
    fec::{Candidate, CandidateQuery, DonationQuery, DonationRecord, FecApi, FinancialReport},
    storage::CommitteeRef,
};

impl<A: FecApi> AppContext<A> {
    /// Candidates whose name contains `name`, case-insensitively
    pub async fn search_candidates(&self, name: &str) -> Result<Vec<Candidate>> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Err(CollectorError::InvalidInput(
                "Candidate name is required".to_string(),
            ));
        }

        let query = CandidateQuery {
            name: Some(needle.clone()),
            per_page: self.config.collector.per_page,
            ..Default::default()
        };
        let page = self.api.list_candidates(&query, 1).await?;

        let matches: Vec<Candidate> = page
            .results
            .into_iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect();

        info!(query = %needle, found = matches.len(), "Candidate search");
        Ok(matches)
    }

    /// Schedule A receipts for a candidate, optionally limited to one
    /// two-year transaction period
    pub async fn donations(
        &self,
        candidate_id: &str,
        year: Option<u16>,
    ) -> Result<Vec<DonationRecord>> {
        if candidate_id.trim().is_empty() {
            return Err(CollectorError::InvalidInput(
                "Candidate ID is required".to_string(),
            ));
        }

        let query = DonationQuery {
            two_year_transaction_period: year,
            ..DonationQuery::for_candidate(candidate_id.trim())
        };
        self.api.donations(&query).await
    }

    /// Committees of a stored candidate; no network call
    pub fn committees(&self, candidate_id: &str) -> Option<&[CommitteeRef]> {
        self.candidate(candidate_id).map(|c| c.committees.as_slice())
    }

    /// Most recent report for a committee, by coverage end date.
    ///
    /// Found reports are memoized for the life of the context.
    pub async fn latest_report(&mut self, committee_id: &str) -> Result<Option<FinancialReport>> {
        let key = committee_id.to_string();
        if let Some(report) = self.report_cache_mut().get(&key) {
            debug!("Report cache hit for {}", committee_id);
            return Ok(Some(report.clone()));
        }

        let reports = self.api.committee_reports(committee_id).await?;
        let latest = FinancialReport::latest(reports);

        if let Some(report) = &latest {
            if let Some(evicted) = self.report_cache_mut().insert(key, report.clone()) {
                debug!("Evicted cached report for {}", evicted);
            }
        }

        Ok(latest)
    }
}
