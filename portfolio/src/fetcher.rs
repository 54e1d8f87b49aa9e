use crate::api::{Client, CommitCounter, Profile, RankScorer, RepositoryRecord, Result};
use crate::languages::{exclude_repositories, top_languages, total_stars, AggregatedLanguage};
use crate::paginator::fetch_all;
use crate::stats::{assemble, Stats};
use log::info;
use serde::Serialize;
use std::collections::HashSet;

/// What to fetch and how to aggregate it.
#[derive(Debug, Clone, Default)]
pub struct PortfolioRequest {
    pub username: Option<String>,
    /// Repositories left out of the output and of every aggregate.
    pub exclude: HashSet<String>,
    /// Number of top languages, 10 when unset.
    pub langs_count: Option<i32>,
    pub include_all_commits: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub login: String,
    pub name: String,
    pub avatar_url: String,
    pub followers: u32,
    pub following: u32,
    pub starred_repos: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub profile: ProfileData,
    pub stats: Stats,
    pub top_languages: Vec<AggregatedLanguage>,
    pub repositories: Vec<RepositoryRecord>,
}

/// Projects the collected state into the output document.
pub fn build(
    profile: &Profile,
    stats: Stats,
    top_languages: Vec<AggregatedLanguage>,
    repositories: &[RepositoryRecord],
) -> PortfolioData {
    PortfolioData {
        profile: ProfileData {
            login: profile.login.clone(),
            name: profile.name.clone().unwrap_or_else(|| profile.login.clone()),
            avatar_url: profile.avatar_url.clone(),
            followers: profile.followers,
            following: profile.following,
            starred_repos: profile.starred_repos,
        },
        stats,
        top_languages,
        repositories: repositories.to_vec(),
    }
}

pub struct PortfolioFetcher<CLIENT, COUNTER, SCORER>
where
    CLIENT: Client,
    COUNTER: CommitCounter,
    SCORER: RankScorer,
{
    client: CLIENT,
    commits: COUNTER,
    scorer: SCORER,
}

impl<CLIENT, COUNTER, SCORER> PortfolioFetcher<CLIENT, COUNTER, SCORER>
where
    CLIENT: Client,
    COUNTER: CommitCounter,
    SCORER: RankScorer,
{
    pub fn new(client: CLIENT, commits: COUNTER, scorer: SCORER) -> Self {
        PortfolioFetcher {
            client,
            commits,
            scorer,
        }
    }

    /// Fetches every page of the user, aggregates it and ranks it.
    pub async fn fetch(&self, request: &PortfolioRequest) -> Result<PortfolioData> {
        let collected = fetch_all(&self.client, request.username.as_deref()).await?;
        let repositories = exclude_repositories(collected.repositories, &request.exclude);
        let languages = top_languages(&repositories, request.langs_count);
        let stars = total_stars(&repositories);

        let stats = assemble(
            &collected.login,
            &collected.profile,
            repositories.len(),
            stars,
            request.include_all_commits,
            &self.commits,
            &self.scorer,
        )
        .await?;
        info!(
            "Portfolio of {}: {} repositories, {} stars, rank {}",
            collected.profile.login,
            repositories.len(),
            stars,
            stats.rank.level
        );

        Ok(build(&collected.profile, stats, languages, &repositories))
    }
}
