use std::collections::HashMap;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::{
    collector::outcome::{Outcome, SkipReason},
    config::CollectorConfig,
    fec::{Candidate, DonationQuery, FecApi},
    storage::{CommitteeRef, ErrorRecord, FilteredCandidate},
};

/// What a filter pass produced
#[derive(Debug, Default)]
pub struct FilterReport {
    pub total: usize,
    pub qualified: Vec<FilteredCandidate>,
    pub errors: Vec<ErrorRecord>,
    pub skipped: HashMap<SkipReason, usize>,
    /// Set when a fatal failure stopped the pass early
    pub aborted: bool,
}

impl FilterReport {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Print a formatted summary to console
    pub fn print_summary(&self) {
        println!("\n=== Donation Filter Summary ===");
        println!("Candidates checked: {}", self.total);
        println!("Qualified:          {} ✓", self.qualified.len());
        println!("Errors:             {} ✗", self.errors.len());
        println!("Skipped:            {}", self.skipped_total());
        for reason in [
            SkipReason::NoQualifyingDonations,
            SkipReason::NoCommittees,
            SkipReason::BadRequest,
            SkipReason::MissingId,
        ] {
            let count = self.skipped_for(reason);
            if count > 0 {
                println!("  {:<24} {}", format!("{}:", reason), count);
            }
        }
        if self.aborted {
            println!("Stopped early; unprocessed candidates were recorded as errors");
        }
        println!("===============================");
    }
}

/// Keeps candidates with at least one qualifying receipt and one committee
pub struct DonationFilter<'a, A> {
    api: &'a A,
    contributor_type: String,
    min_amount: u64,
    transaction_period: u16,
    delay: Duration,
}

impl<'a, A: FecApi> DonationFilter<'a, A> {
    pub fn new(api: &'a A, config: &CollectorConfig) -> Self {
        Self {
            api,
            contributor_type: config.contributor_type.clone(),
            min_amount: config.min_amount,
            transaction_period: config.transaction_period,
            delay: config.rate_limit_delay(),
        }
    }

    fn query_for(&self, candidate_id: &str) -> DonationQuery {
        DonationQuery {
            candidate_id: candidate_id.to_string(),
            contributor_type: Some(self.contributor_type.clone()),
            min_amount: Some(self.min_amount),
            two_year_transaction_period: Some(self.transaction_period),
            per_page: Some(1),
        }
    }

    /// Check every candidate in order, one at a time.
    ///
    /// With `record_errors` off, failed checks are dropped instead of being
    /// collected as [`ErrorRecord`]s.
    pub async fn filter(&self, candidates: &[Candidate], record_errors: bool) -> FilterReport {
        let total = candidates.len();
        info!("Filtering {} candidates for those with donations...", total);

        let mut report = FilterReport {
            total,
            ..Default::default()
        };

        for (i, candidate) in candidates.iter().enumerate() {
            if candidate.candidate_id.is_empty() {
                *report.skipped.entry(SkipReason::MissingId).or_default() += 1;
                continue;
            }

            info!(
                "[{}/{}] Processing {} ({})",
                i + 1,
                total,
                candidate.name,
                candidate.candidate_id
            );

            match self.check(candidate).await {
                Outcome::Accepted(filtered) => {
                    info!("✅ {} — {} committees", filtered.name, filtered.committees.len());
                    report.qualified.push(filtered);
                }
                Outcome::Skipped(reason) => {
                    if reason == SkipReason::BadRequest {
                        warn!(
                            flagged_for_review = true,
                            "❌ Skipping {} — {}",
                            candidate.name,
                            reason
                        );
                    } else {
                        info!("Skipping {} — {}", candidate.name, reason);
                    }
                    *report.skipped.entry(reason).or_default() += 1;
                }
                Outcome::RecoveredError(e) => {
                    error!(
                        "⚠️ Error checking {} ({}): {}",
                        candidate.name, candidate.candidate_id, e
                    );
                    if record_errors {
                        report.errors.push(ErrorRecord::from(candidate));
                    }
                }
                Outcome::Fatal(e) => {
                    error!(
                        "Stopping filter at {} ({}): {}",
                        candidate.name, candidate.candidate_id, e
                    );
                    if record_errors {
                        report.errors.extend(
                            candidates[i..]
                                .iter()
                                .filter(|c| !c.candidate_id.is_empty())
                                .map(ErrorRecord::from),
                        );
                    }
                    report.aborted = true;
                    break;
                }
            }

            tokio::time::sleep(self.delay).await;
        }

        info!(
            "Found {} candidates with donations and committees",
            report.qualified.len()
        );
        report
    }

    /// Run the donation check and committee lookup for one candidate
    pub async fn check(&self, candidate: &Candidate) -> Outcome<FilteredCandidate> {
        let query = self.query_for(&candidate.candidate_id);

        let donations = match self.api.donations(&query).await {
            Ok(donations) => donations,
            Err(e) => return Outcome::from_error(e),
        };

        if donations.is_empty() {
            return Outcome::Skipped(SkipReason::NoQualifyingDonations);
        }

        let committees = match self.api.candidate_committees(&candidate.candidate_id).await {
            Ok(committees) => committees,
            Err(e) => {
                warn!(
                    "⚠️ Error fetching committees for {}: {}",
                    candidate.candidate_id, e
                );
                Vec::new()
            }
        };

        if committees.is_empty() {
            return Outcome::Skipped(SkipReason::NoCommittees);
        }

        Outcome::Accepted(FilteredCandidate {
            name: candidate.name.clone(),
            candidate_id: candidate.candidate_id.clone(),
            committees: committees.into_iter().map(CommitteeRef::from).collect(),
        })
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

    fn cand(id: &str) -> Candidate {
        Candidate::new(id, format!("CANDIDATE {id}"))
    }

    #[tokio::test]
    async fn test_qualified_candidate_keeps_committees_in_order() {
        let api = FakeFec::new()
            .with_donations("A", 1)
            .with_committees("A", &[("C1", "FIRST PAC"), ("C2", "SECOND PAC")]);
        let config = config();

        let report = DonationFilter::new(&api, &config).filter(&[cand("A")], true).await;

        assert_eq!(report.qualified.len(), 1);
        let committees = &report.qualified[0].committees;
        assert_eq!(committees[0].committee_id, "C1");
        assert_eq!(committees[1].name, "SECOND PAC");
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_zero_donations_dropped_without_error() {
        let api = FakeFec::new().with_donations("A", 0);
        let config = config();

        let report = DonationFilter::new(&api, &config).filter(&[cand("A")], true).await;

        assert!(report.qualified.is_empty());
        assert!(report.errors.is_empty());
        assert_eq!(report.skipped_for(SkipReason::NoQualifyingDonations), 1);
        assert_eq!(api.call_count("committees"), 0);
    }

    #[tokio::test]
    async fn test_no_committees_in_neither_list() {
        let api = FakeFec::new()
            .with_donations("A", 2)
            .with_committees("A", &[])
            .with_donations("B", 1)
            .with_committee_failure("B", 500);
        let config = config();

        let report = DonationFilter::new(&api, &config)
            .filter(&[cand("A"), cand("B")], true)
            .await;

        assert!(report.qualified.is_empty());
        assert!(report.errors.is_empty());
        assert_eq!(report.skipped_for(SkipReason::NoCommittees), 2);
    }

    #[tokio::test]
    async fn test_bad_request_silently_skipped() {
        let api = FakeFec::new().with_donation_failure("A", 400);
        let config = config();

        let report = DonationFilter::new(&api, &config).filter(&[cand("A")], true).await;

        assert!(report.qualified.is_empty());
        assert!(report.errors.is_empty());
        assert_eq!(report.skipped_for(SkipReason::BadRequest), 1);
    }

    #[tokio::test]
    async fn test_failures_recorded_and_batch_continues() {
        let api = FakeFec::new()
            .with_donation_failure("A", 503)
            .with_donations("B", 1)
            .with_committees("B", &[("C9", "B VICTORY FUND")]);
        let config = config();
        let filter = DonationFilter::new(&api, &config);

        let report = filter.filter(&[cand("A"), cand("B")], true).await;
        assert_eq!(report.errors, vec![ErrorRecord::from(&cand("A"))]);
        assert_eq!(report.qualified[0].candidate_id, "B");

        let report = filter.filter(&[cand("A")], false).await;
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_skipped_without_request() {
        let api = FakeFec::new();
        let config = config();

        let report = DonationFilter::new(&api, &config)
            .filter(&[Candidate::new("", "NO ID")], true)
            .await;

        assert_eq!(report.skipped_for(SkipReason::MissingId), 1);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_processes_candidates_in_input_order() {
        let api = FakeFec::new()
            .with_donations("A", 1)
            .with_committees("A", &[("C1", "A PAC")]);
        let config = config();

        DonationFilter::new(&api, &config)
            .filter(&[cand("A"), cand("B")], true)
            .await;

        assert_eq!(
            api.calls(),
            vec!["donations:A:2024", "committees:A", "donations:B:2024"]
        );
    }

    #[tokio::test]
    async fn test_fatal_error_stops_and_records_remaining() {
        let api = FakeFec::new()
            .with_donations("A", 1)
            .with_committees("A", &[("C1", "A PAC")])
            .with_donation_fatal("B")
            .with_donations("D", 1);
        let config = config();
        let filter = DonationFilter::new(&api, &config);
        let batch = [
            cand("A"),
            cand("B"),
            Candidate::new("", "NO ID"),
            cand("C"),
            cand("D"),
        ];

        let report = filter.filter(&batch, true).await;

        assert!(report.aborted);
        assert_eq!(report.qualified[0].candidate_id, "A");
        assert_eq!(
            report.errors,
            vec![
                ErrorRecord::from(&cand("B")),
                ErrorRecord::from(&cand("C")),
                ErrorRecord::from(&cand("D")),
            ]
        );
        assert_eq!(
            api.calls(),
            vec!["donations:A:2024", "committees:A", "donations:B:2024"]
        );

        let report = filter.filter(&batch[1..], false).await;
        assert!(report.aborted);
        assert!(report.errors.is_empty());
        assert!(report.qualified.is_empty());
    }
}
