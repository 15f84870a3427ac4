use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config::Config,
    error::{CollectorError, Result},
    fec::{
        retry::{parse_retry_after, AttemptError, RetryPolicy},
        types::{
            Candidate, CandidateQuery, Committee, DonationQuery, DonationRecord, FinancialReport,
            Page,
        },
        FecApi,
    },
};

/// HTTP client for the FEC open data API
#[derive(Clone)]
pub struct FecClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl FecClient {
    pub fn new(base_url: &str, api_key: &str, retry: RetryPolicy, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            retry,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let retry = RetryPolicy::new(
            config.collector.max_retries,
            config.collector.rate_limit_delay(),
        );

        Ok(Self::new(&config.api.base_url, &config.api.key, retry, http))
    }

    /// GET `path` with retries, decoding the JSON body into `T`
    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.retry
            .run(path, || self.attempt(&url, params))
            .await
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> std::result::Result<T, AttemptError> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .query(params)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok());
            return Err(AttemptError::RateLimited {
                retry_after: parse_retry_after(retry_after),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CollectorError::Api {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        Ok(resp.json::<T>().await?)
    }
}

impl FecApi for FecClient {
    async fn list_candidates(&self, query: &CandidateQuery, page: u32) -> Result<Page<Candidate>> {
        self.get("candidates/search", &query.to_params(page)).await
    }

    async fn candidate_committees(&self, candidate_id: &str) -> Result<Vec<Committee>> {
        let path = format!("candidate/{}/committees", candidate_id);
        let page: Page<Committee> = self
            .get(&path, &[("per_page", "100".to_string())])
            .await?;
        Ok(page.results)
    }

    async fn donations(&self, query: &DonationQuery) -> Result<Vec<DonationRecord>> {
        let page: Page<DonationRecord> = self
            .get("schedules/schedule_a", &query.to_params())
            .await?;
        Ok(page.results)
    }

    async fn committee_reports(&self, committee_id: &str) -> Result<Vec<FinancialReport>> {
        let path = format!("committee/{}/reports", committee_id);
        let page: Page<FinancialReport> = self
            .get(&path, &[("per_page", "100".to_string())])
            .await?;
        Ok(page.results)
    }
}
