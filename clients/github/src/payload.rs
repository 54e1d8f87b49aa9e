use crate::GithubError;
use chrono::{DateTime, Utc};
use portfolio::api::{
    Contributions, LanguageUsage, Page, PageResponse, Profile, ProviderError, ProviderErrorKind, RepositoryPage,
    RepositoryRecord,
};
use serde::{Deserialize, Serialize};

const RATE_LIMITED: &str = "RATE_LIMITED";

pub const USER_PAGE_QUERY: &str = r#"
query userInfo($login: String!, $after: String) {
  user(login: $login) {
    name
    login
    avatarUrl
    followers { totalCount }
    following { totalCount }
    starredRepositories { totalCount }
    contributionsCollection {
      totalCommitContributions
      totalPullRequestReviewContributions
    }
    repositoriesContributedTo(first: 1, contributionTypes: [COMMIT, ISSUE, PULL_REQUEST, REPOSITORY]) {
      totalCount
    }
    pullRequests { totalCount }
    issues { totalCount }
    repositories(first: 100, ownerAffiliations: OWNER, orderBy: {direction: DESC, field: STARGAZERS}, after: $after) {
      nodes {
        name
        description
        url
        forkCount
        stargazerCount
        diskUsage
        createdAt
        updatedAt
        isPrivate
        languages(first: 10, orderBy: {field: SIZE, direction: DESC}) {
          edges {
            size
            node { name color }
          }
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}
"#;

#[derive(Serialize, Debug)]
pub struct GraphqlRequest<'a> {
    pub query: &'static str,
    pub variables: UserPageVariables<'a>,
}

#[derive(Serialize, Debug)]
pub struct UserPageVariables<'a> {
    pub login: &'a str,
    pub after: Option<&'a str>,
}

impl<'a> GraphqlRequest<'a> {
    pub fn user_page(login: &'a str, after: Option<&'a str>) -> Self {
        GraphqlRequest {
            query: USER_PAGE_QUERY,
            variables: UserPageVariables { login, after },
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct GraphqlResponse {
    pub data: Option<UserData>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Deserialize, Debug)]
pub struct GraphqlError {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UserData {
    pub user: Option<User>,
}

#[derive(Deserialize, Debug)]
pub struct TotalCount {
    #[serde(rename = "totalCount")]
    pub total_count: u32,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: Option<String>,
    pub login: String,
    pub avatar_url: String,
    pub followers: TotalCount,
    pub following: TotalCount,
    pub starred_repositories: TotalCount,
    pub contributions_collection: ContributionsCollection,
    pub repositories_contributed_to: TotalCount,
    pub pull_requests: TotalCount,
    pub issues: TotalCount,
    pub repositories: Repositories,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub total_commit_contributions: u32,
    pub total_pull_request_review_contributions: u32,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Repositories {
    pub nodes: Vec<Repository>,
    pub page_info: PageInfo,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub fork_count: u32,
    pub stargazer_count: u32,
    pub disk_usage: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_private: bool,
    pub languages: Languages,
}

#[derive(Deserialize, Debug)]
pub struct Languages {
    pub edges: Vec<LanguageEdge>,
}

#[derive(Deserialize, Debug)]
pub struct LanguageEdge {
    pub size: u64,
    pub node: LanguageNode,
}

#[derive(Deserialize, Debug)]
pub struct LanguageNode {
    pub name: String,
    pub color: Option<String>,
}

impl GraphqlResponse {
    /// Splits the response into a page or a provider error.
    ///
    /// Rate limiting is reported as a [`GithubError`] so that the request gets retried.
    pub fn into_page_response(self) -> Result<PageResponse, GithubError> {
        if let Some(error) = self.errors.into_iter().flatten().next() {
            if error.kind.as_deref() == Some(RATE_LIMITED) {
                return Err(GithubError::RateLimited(error.message.unwrap_or_default()));
            }
            let kind = ProviderErrorKind::from(error.kind.as_deref());
            return Ok(PageResponse::Error(ProviderError::new(kind, error.message)));
        }
        match self.data.and_then(|data| data.user) {
            Some(user) => Ok(PageResponse::Page(user.into())),
            None => Ok(PageResponse::Error(ProviderError::new(
                ProviderErrorKind::Other("EMPTY_RESPONSE".to_string()),
                Some("Response carried no user".to_string()),
            ))),
        }
    }
}

impl From<User> for Page {
    fn from(user: User) -> Self {
        let profile = Profile {
            login: user.login,
            name: user.name,
            avatar_url: user.avatar_url,
            followers: user.followers.total_count,
            following: user.following.total_count,
            starred_repos: user.starred_repositories.total_count,
            contributions: Contributions::new(
                user.contributions_collection.total_commit_contributions,
                user.contributions_collection.total_pull_request_review_contributions,
                user.pull_requests.total_count,
                user.issues.total_count,
                user.repositories_contributed_to.total_count,
            ),
        };
        let repositories = RepositoryPage::new(
            user.repositories.nodes.into_iter().map(RepositoryRecord::from).collect(),
            user.repositories.page_info.has_next_page,
            user.repositories.page_info.end_cursor,
        );
        Page::new(profile, repositories)
    }
}

impl From<Repository> for RepositoryRecord {
    fn from(repo: Repository) -> Self {
        RepositoryRecord {
            name: repo.name,
            description: repo.description,
            url: repo.url,
            fork_count: repo.fork_count,
            stars: repo.stargazer_count,
            disk_usage: repo.disk_usage,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            is_private: repo.is_private,
            languages: repo
                .languages
                .edges
                .into_iter()
                .map(|edge| LanguageUsage::new(edge.node.name, edge.node.color, edge.size))
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SearchCommits {
    pub total_count: Option<u32>,
}
