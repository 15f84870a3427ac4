//! Scripted in-memory stand-in for the FEC API

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::json;

use crate::{
    error::{CollectorError, Result},
    fec::{
        types::{
            Candidate, CandidateQuery, Committee, DonationQuery, DonationRecord, FinancialReport,
            Page, Pagination,
        },
        FecApi,
    },
};

/// A scripted reply: a value or a failure
type Reply<T> = std::result::Result<T, Failure>;

#[derive(Clone, Copy)]
enum Failure {
    /// HTTP status of a request that already exhausted its retries
    Status(u16),
    /// Failure outside the request layer
    Local,
}

#[derive(Default)]
pub struct FakeFec {
    pages: HashMap<u32, Reply<Vec<Candidate>>>,
    total_pages: u32,
    donations: HashMap<String, Reply<Vec<DonationRecord>>>,
    committees: HashMap<String, Reply<Vec<Committee>>>,
    reports: HashMap<String, Reply<Vec<FinancialReport>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeFec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, candidates: Vec<Candidate>) -> Self {
        self.pages.insert(page, Ok(candidates));
        self.total_pages = self.total_pages.max(page);
        self
    }

    pub fn with_failed_page(mut self, page: u32, status: u16) -> Self {
        self.pages.insert(page, Err(Failure::Status(status)));
        self.total_pages = self.total_pages.max(page);
        self
    }

    /// Candidate has `count` qualifying receipts
    pub fn with_donations(mut self, candidate_id: &str, count: usize) -> Self {
        let records = (0..count)
            .map(|i| {
                DonationRecord(json!({
                    "contributor_name": format!("DONOR {i}"),
                    "contribution_receipt_amount": 5000.0,
                }))
            })
            .collect();
        self.donations.insert(candidate_id.to_string(), Ok(records));
        self
    }

    pub fn with_donation_failure(mut self, candidate_id: &str, status: u16) -> Self {
        self.donations.insert(candidate_id.to_string(), Err(Failure::Status(status)));
        self
    }

    /// Donation check fails with an error that is not a request failure
    pub fn with_donation_fatal(mut self, candidate_id: &str) -> Self {
        self.donations.insert(candidate_id.to_string(), Err(Failure::Local));
        self
    }

    pub fn with_committees(mut self, candidate_id: &str, committees: &[(&str, &str)]) -> Self {
        let committees = committees
            .iter()
            .map(|(id, name)| Committee {
                committee_id: id.to_string(),
                name: name.to_string(),
                ..Default::default()
            })
            .collect();
        self.committees.insert(candidate_id.to_string(), Ok(committees));
        self
    }

    pub fn with_committee_failure(mut self, candidate_id: &str, status: u16) -> Self {
        self.committees.insert(candidate_id.to_string(), Err(Failure::Status(status)));
        self
    }

    pub fn with_reports(mut self, committee_id: &str, reports: Vec<FinancialReport>) -> Self {
        self.reports.insert(committee_id.to_string(), Ok(reports));
        self
    }

    /// Every request made so far, as `endpoint:argument`, with `:period`
    /// appended to donation queries that carry one
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.split(':').next() == Some(endpoint))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn reply<T: Clone>(reply: Option<&Reply<T>>, empty: T) -> Result<T> {
        match reply {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(Failure::Status(status))) => Err(CollectorError::RetriesExhausted {
                attempts: 5,
                last: Box::new(CollectorError::Api {
                    status: *status,
                    message: "scripted failure".to_string(),
                }),
            }),
            Some(Err(Failure::Local)) => Err(CollectorError::storage(
                "scripted",
                std::io::Error::new(std::io::ErrorKind::Other, "scripted failure"),
            )),
            None => Ok(empty),
        }
    }
}

impl FecApi for FakeFec {
    async fn list_candidates(&self, query: &CandidateQuery, page: u32) -> Result<Page<Candidate>> {
        self.record(format!("candidates:{}", page));

        let results = match self.pages.get(&page) {
            Some(reply) => Self::reply(Some(reply), Vec::new())?,
            None => Self::reply(Some(&Err(Failure::Status(500))), Vec::new())?,
        };

        let results = match &query.name {
            Some(name) => results
                .into_iter()
                .filter(|c| c.name.to_lowercase().contains(&name.to_lowercase()))
                .collect(),
            None => results,
        };

        Ok(Page {
            results,
            pagination: Pagination {
                pages: self.total_pages.max(1),
                page: Some(page),
                ..Default::default()
            },
        })
    }

    async fn candidate_committees(&self, candidate_id: &str) -> Result<Vec<Committee>> {
        self.record(format!("committees:{}", candidate_id));
        Self::reply(self.committees.get(candidate_id), Vec::new())
    }

    async fn donations(&self, query: &DonationQuery) -> Result<Vec<DonationRecord>> {
        match query.two_year_transaction_period {
            Some(period) => self.record(format!("donations:{}:{}", query.candidate_id, period)),
            None => self.record(format!("donations:{}", query.candidate_id)),
        }
        Self::reply(self.donations.get(&query.candidate_id), Vec::new())
    }

    async fn committee_reports(&self, committee_id: &str) -> Result<Vec<FinancialReport>> {
        self.record(format!("reports:{}", committee_id));
        Self::reply(self.reports.get(committee_id), Vec::new())
    }
}
