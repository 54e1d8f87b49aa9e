mod args;

pub use args::Args;

use github_client::{GithubClientBuilder, RetryConfig};
use log::debug;
use portfolio::api::{Error, Result};
use portfolio::{DefaultRank, PortfolioData, PortfolioFetcher, PortfolioRequest};
use serde::Serialize;
use std::time::Duration;

/// Body printed in place of the portfolio when it could not be built.
#[derive(Serialize, Debug, PartialEq)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        ErrorBody {
            error: ErrorDetail {
                message: err.to_string(),
                kind: err.kind().to_string(),
            },
        }
    }
}

/// Splits a comma separated list, optionally wrapped in brackets, dropping blank entries.
pub fn parse_array(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(value);
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn portfolio_request(args: &Args) -> PortfolioRequest {
    PortfolioRequest {
        username: args.username.clone(),
        exclude: args.exclude_repo.as_deref().map(parse_array).unwrap_or_default().into_iter().collect(),
        langs_count: args.langs_count,
        include_all_commits: args.include_all_commits,
    }
}

pub async fn portfolio(args: Args) -> Result<PortfolioData> {
    let request = portfolio_request(&args);
    debug!("Portfolio request: {:?}", request);

    let retry = RetryConfig {
        max_retries: args.max_retries as usize,
        ..RetryConfig::default()
    };
    let mut client = GithubClientBuilder::default()
        .with_github_url(args.api_url)
        .with_retry(retry)
        .with_timeout(Duration::from_secs(args.timeout));
    if let Some(token) = args.api_token {
        client = client.try_with_token(token)?;
    }
    let client = client.build()?;

    let fetcher = PortfolioFetcher::new(client.clone(), client, DefaultRank);
    fetcher.fetch(&request).await
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
