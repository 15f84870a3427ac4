use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One page of an FEC list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub pages: u32,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub count: Option<u64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            pages: 1,
            page: None,
            per_page: None,
            count: None,
        }
    }
}

/// Candidate as returned by `candidates/search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub candidate_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub election_years: Vec<u16>,
    #[serde(default)]
    pub candidate_status: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub office: Option<String>,
}

impl Candidate {
    pub fn new(candidate_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_election_years(mut self, years: &[u16]) -> Self {
        self.election_years = years.to_vec();
        self
    }

    /// True if any of the candidate's election years is in `targets`
    pub fn runs_in_any(&self, targets: &[u16]) -> bool {
        self.election_years.iter().any(|year| targets.contains(year))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Committee {
    #[serde(default)]
    pub committee_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub designation_full: Option<String>,
    #[serde(default)]
    pub committee_type_full: Option<String>,
}

/// Schedule A (itemized receipt) entry; kept opaque
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DonationRecord(pub serde_json::Value);

impl DonationRecord {
    pub fn contributor_name(&self) -> Option<&str> {
        self.0.get("contributor_name").and_then(|v| v.as_str())
    }

    pub fn amount(&self) -> Option<f64> {
        self.0
            .get("contribution_receipt_amount")
            .and_then(|v| v.as_f64())
    }

    pub fn receipt_date(&self) -> Option<&str> {
        self.0
            .get("contribution_receipt_date")
            .and_then(|v| v.as_str())
    }
}

/// Financial report filed by a committee
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    #[serde(default)]
    pub committee_id: Option<String>,
    #[serde(default)]
    pub report_type_full: Option<String>,
    #[serde(default)]
    pub report_year: Option<u16>,
    #[serde(default)]
    pub coverage_start_date: Option<String>,
    #[serde(default)]
    pub coverage_end_date: Option<String>,
    #[serde(default)]
    pub total_receipts_period: Option<f64>,
    #[serde(default)]
    pub total_disbursements_period: Option<f64>,
    #[serde(default)]
    pub cash_on_hand_end_period: Option<f64>,
}

impl FinancialReport {
    /// Coverage end as a date. FEC sends `2024-03-31T00:00:00`; only the
    /// date part is used.
    pub fn coverage_end(&self) -> Option<NaiveDate> {
        let raw = self.coverage_end_date.as_deref()?;
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }

    /// Pick the report with the latest coverage end date. Undated reports
    /// only win if nothing is dated.
    pub fn latest(mut reports: Vec<FinancialReport>) -> Option<FinancialReport> {
        reports.sort_by(|a, b| b.coverage_end().cmp(&a.coverage_end()));
        reports.into_iter().next()
    }
}

/// Query parameters for `candidates/search`
#[derive(Debug, Clone, Default)]
pub struct CandidateQuery {
    pub state: Option<String>,
    pub candidate_status: Option<String>,
    /// Free-text name search (`q`)
    pub name: Option<String>,
    pub per_page: u32,
}

impl CandidateQuery {
    pub fn to_params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("per_page", self.per_page.to_string()),
            ("page", page.to_string()),
        ];
        if let Some(state) = &self.state {
            params.push(("state", state.clone()));
        }
        if let Some(status) = &self.candidate_status {
            params.push(("candidate_status", status.clone()));
        }
        if let Some(name) = &self.name {
            params.push(("q", name.clone()));
        }
        params
    }
}

/// Query parameters for `schedules/schedule_a`
#[derive(Debug, Clone, Default)]
pub struct DonationQuery {
    pub candidate_id: String,
    pub contributor_type: Option<String>,
    pub min_amount: Option<u64>,
    pub two_year_transaction_period: Option<u16>,
    pub per_page: Option<u32>,
}

impl DonationQuery {
    pub fn for_candidate(candidate_id: impl Into<String>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            ..Default::default()
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("candidate_id", self.candidate_id.clone())];
        if let Some(kind) = &self.contributor_type {
            params.push(("contributor_type", kind.clone()));
        }
        if let Some(amount) = self.min_amount {
            params.push(("min_amount", amount.to_string()));
        }
        if let Some(period) = self.two_year_transaction_period {
            params.push(("two_year_transaction_period", period.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        params
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_without_pagination_defaults_to_single_page() {
        let page: Page<Candidate> = serde_json::from_value(json!({
            "results": [{ "candidate_id": "H0PA01", "name": null, "election_years": [2024] }]
        }))
        .unwrap();

        assert_eq!(page.pagination.pages, 1);
        assert_eq!(page.results[0].name, "");
        assert!(page.results[0].runs_in_any(&[2022, 2024]));
        assert!(!page.results[0].runs_in_any(&[2020]));
    }

    #[test]
    fn test_latest_report_by_coverage_end() {
        let report = |end: Option<&str>, year: u16| FinancialReport {
            coverage_end_date: end.map(str::to_string),
            report_year: Some(year),
            ..Default::default()
        };

        let latest = FinancialReport::latest(vec![
            report(Some("2023-12-31T00:00:00"), 2023),
            report(None, 1999),
            report(Some("2024-06-30T00:00:00"), 2024),
            report(Some("2024-03-31T00:00:00"), 2024),
        ])
        .unwrap();

        assert_eq!(latest.coverage_end_date.as_deref(), Some("2024-06-30T00:00:00"));
        assert!(FinancialReport::latest(vec![]).is_none());
    }

    #[test]
    fn test_donation_query_params() {
        let query = DonationQuery {
            candidate_id: "S4PA00".to_string(),
            contributor_type: Some("individual".to_string()),
            min_amount: Some(5000),
            two_year_transaction_period: Some(2024),
            per_page: Some(1),
        };
        let params = query.to_params();

        assert!(params.contains(&("min_amount", "5000".to_string())));
        assert!(params.contains(&("per_page", "1".to_string())));
        assert!(params.contains(&("two_year_transaction_period", "2024".to_string())));
    }
}
