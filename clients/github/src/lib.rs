mod builder;
mod payload;
mod retry;

pub use builder::GithubClientBuilder;
pub use retry::{with_retry, RetryConfig};

use async_trait::async_trait;
use log::debug;
use payload::{GraphqlRequest, GraphqlResponse, SearchCommits};
use portfolio::api::{Client, CommitCounter, PageResponse, Result};
use reqwest::header;
use reqwest::header::HeaderValue;
use reqwest::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

const COMMIT_SEARCH_ACCEPT: &str = "application/vnd.github.cloak-preview";

#[derive(Error, Debug)]
pub enum GithubError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("GitHub responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Rate limited: {0}")]
    RateLimited(String),
    #[error("Invalid GitHub URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Invalid header value: {0}")]
    Header(#[from] header::InvalidHeaderValue),
    #[error("Could not fetch total commits.")]
    MissingTotalCount,
}

impl GithubError {
    /// Transport failures, rate limits and server side errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            GithubError::Request(err) => err.is_timeout() || err.is_connect() || err.is_request() || err.is_body(),
            GithubError::Status { status, .. } => {
                status.is_server_error()
                    || *status == StatusCode::FORBIDDEN
                    || *status == StatusCode::TOO_MANY_REQUESTS
            }
            GithubError::RateLimited(_) => true,
            GithubError::Url(_) | GithubError::Header(_) | GithubError::MissingTotalCount => false,
        }
    }
}

impl From<GithubError> for portfolio::api::Error {
    fn from(err: GithubError) -> Self {
        portfolio::api::Error::Other(anyhow::Error::new(err))
    }
}

/// GitHub GraphQL and REST client.
#[derive(Clone, Debug)]
pub struct GithubClient {
    client: reqwest::Client,
    github_url: String,
    retry: RetryConfig,
}

impl GithubClient {
    async fn user_page(&self, login: &str, after: Option<&str>) -> std::result::Result<PageResponse, GithubError> {
        let request_url = format!("{}/graphql", self.github_url);
        debug!("Querying {} for {} after {:?}", request_url, login, after);
        let response = self
            .client
            .post(request_url)
            .json(&GraphqlRequest::user_page(login, after))
            .send()
            .await?;
        read_response::<GraphqlResponse>(response).await?.into_page_response()
    }

    async fn search_commits(&self, login: &str) -> std::result::Result<u32, GithubError> {
        let request_url = format!("{}/search/commits", self.github_url);
        let response = self
            .client
            .get(request_url)
            .header(header::ACCEPT, HeaderValue::from_static(COMMIT_SEARCH_ACCEPT))
            .query(&[("q", format!("author:{}", login))])
            .send()
            .await?;
        read_response::<SearchCommits>(response)
            .await?
            .total_count
            .ok_or(GithubError::MissingTotalCount)
    }
}

#[async_trait]
impl Client for GithubClient {
    async fn fetch_page(&self, login: &str, after: Option<&str>) -> Result<PageResponse> {
        Ok(with_retry(&self.retry, || self.user_page(login, after)).await?)
    }
}

#[async_trait]
impl CommitCounter for GithubClient {
    async fn total_commits(&self, login: &str) -> Result<u32> {
        Ok(with_retry(&self.retry, || self.search_commits(login)).await?)
    }
}

pub(crate) async fn read_response<T: DeserializeOwned>(response: Response) -> std::result::Result<T, GithubError> {
    let status = response.status();
    if !status.is_success() {
        let body = status_body(response.text().await);
        return Err(GithubError::Status { status, body });
    }
    Ok(response.json::<T>().await?)
}

fn status_body(body: reqwest::Result<String>) -> String {
    body.unwrap_or_else(|err| format!("<unreadable body: {}>", err))
}
