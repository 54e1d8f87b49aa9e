use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_more::Constructor;
use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

pub const USER_NOT_FOUND_MESSAGE: &str = "Could not fetch user.";
pub const GRAPHQL_ERROR_MESSAGE: &str = "Something went wrong while trying to retrieve the stats data using the GraphQL API.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing params \"{0}\" make sure you pass the parameters")]
    MissingParameter(&'static str),
    #[error("{0}")]
    UserNotFound(String),
    #[error("{0}")]
    Graphql(String),
    /// Failures of the client, retry wrapper or rank scorer, forwarded as they are.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Machine readable error kind reported next to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    MissingParameter,
    UserNotFound,
    GraphqlError,
    #[strum(serialize = "UPSTREAM_ERROR")]
    Upstream,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingParameter(_) => ErrorKind::MissingParameter,
            Error::UserNotFound(_) => ErrorKind::UserNotFound,
            Error::Graphql(_) => ErrorKind::GraphqlError,
            Error::Other(_) => ErrorKind::Upstream,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Contribution counters reported alongside the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Constructor)]
pub struct Contributions {
    /// Commits in the provider's default contribution window.
    pub commits: u32,
    pub reviews: u32,
    pub prs: u32,
    pub issues: u32,
    pub contributed_to: u32,
}

/// Page invariant user fields, identical on every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub followers: u32,
    pub following: u32,
    pub starred_repos: u32,
    pub contributions: Contributions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Constructor)]
pub struct LanguageUsage {
    pub name: String,
    pub color: Option<String>,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub fork_count: u32,
    pub stars: u32,
    /// Disk usage in kilobytes, when the provider reports it.
    pub disk_usage: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_private: bool,
    pub languages: Vec<LanguageUsage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct RepositoryPage {
    pub nodes: Vec<RepositoryRecord>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Page {
    pub profile: Profile,
    pub repositories: RepositoryPage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorKind {
    NotFound,
    Other(String),
}

impl From<Option<&str>> for ProviderErrorKind {
    fn from(kind: Option<&str>) -> Self {
        match kind {
            Some("NOT_FOUND") => ProviderErrorKind::NotFound,
            Some(kind) => ProviderErrorKind::Other(kind.to_string()),
            None => ProviderErrorKind::Other("UNKNOWN".to_string()),
        }
    }
}

/// Query level error reported by the provider in place of a page.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResponse {
    Page(Page),
    Error(ProviderError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rank {
    pub level: String,
    pub percentile: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankInput {
    pub all_commits: bool,
    pub commits: u32,
    pub prs: u32,
    pub reviews: u32,
    pub issues: u32,
    pub repos: usize,
    pub stars: u64,
    pub followers: u32,
}

/// Fetches one page of profile fields and repositories.
///
/// Implementations are expected to apply their own retry policy and to return
/// query level errors as [`PageResponse::Error`] rather than `Err`.
#[async_trait]
pub trait Client: Send + Sync {
    async fn fetch_page(&self, login: &str, after: Option<&str>) -> Result<PageResponse>;
}

/// Counts the commits of a user over their whole history.
#[async_trait]
pub trait CommitCounter: Send + Sync {
    async fn total_commits(&self, login: &str) -> Result<u32>;
}

pub trait RankScorer: Send + Sync {
    fn score(&self, input: &RankInput) -> Result<Rank>;
}
