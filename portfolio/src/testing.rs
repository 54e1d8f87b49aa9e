//! In-memory collaborators for unit tests.

use crate::api::{
    Client, CommitCounter, Contributions, LanguageUsage, Page, PageResponse, Profile, ProviderError, Rank, RankInput,
    RankScorer, RepositoryPage, RepositoryRecord, Result,
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays scripted responses and records the cursors it was called with.
pub(crate) struct ScriptedClient {
    responses: Mutex<VecDeque<Result<PageResponse>>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedClient {
    pub(crate) fn new(responses: Vec<Result<PageResponse>>) -> Self {
        ScriptedClient {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn pages(pages: Vec<Page>) -> Self {
        Self::new(pages.into_iter().map(|page| Ok(PageResponse::Page(page))).collect())
    }

    pub(crate) fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Client for ScriptedClient {
    async fn fetch_page(&self, login: &str, after: Option<&str>) -> Result<PageResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((login.to_string(), after.map(str::to_string)));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected page request")
    }
}

pub(crate) struct CountingCommits {
    total: u32,
    calls: Mutex<Vec<String>>,
}

impl CountingCommits {
    pub(crate) fn new(total: u32) -> Self {
        CountingCommits {
            total,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommitCounter for CountingCommits {
    async fn total_commits(&self, login: &str) -> Result<u32> {
        self.calls.lock().unwrap().push(login.to_string());
        Ok(self.total)
    }
}

/// Returns a fixed rank and remembers the last input.
#[derive(Default)]
pub(crate) struct RecordingScorer {
    input: Mutex<Option<RankInput>>,
}

impl RecordingScorer {
    pub(crate) fn input(&self) -> Option<RankInput> {
        self.input.lock().unwrap().clone()
    }
}

impl RankScorer for RecordingScorer {
    fn score(&self, input: &RankInput) -> Result<Rank> {
        *self.input.lock().unwrap() = Some(input.clone());
        Ok(Rank {
            level: "A".to_string(),
            percentile: 30.0,
        })
    }
}

pub(crate) fn profile(login: &str) -> Profile {
    Profile {
        login: login.to_string(),
        name: Some("Octo Cat".to_string()),
        avatar_url: format!("https://avatars.example.com/{}", login),
        followers: 42,
        following: 7,
        starred_repos: 13,
        contributions: Contributions::new(120, 4, 9, 6, 3),
    }
}

pub(crate) fn lang(name: &str, color: &str, size: u64) -> LanguageUsage {
    LanguageUsage::new(name.to_string(), Some(color.to_string()), size)
}

pub(crate) fn repo(name: &str, stars: u32, languages: Vec<LanguageUsage>) -> RepositoryRecord {
    RepositoryRecord {
        name: name.to_string(),
        description: Some(format!("{} description", name)),
        url: format!("https://github.com/octocat/{}", name),
        fork_count: 1,
        stars,
        disk_usage: Some(128),
        created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap(),
        is_private: false,
        languages,
    }
}

pub(crate) fn page(login: &str, nodes: Vec<RepositoryRecord>, end_cursor: Option<&str>) -> Page {
    Page::new(
        profile(login),
        RepositoryPage::new(nodes, end_cursor.is_some(), end_cursor.map(str::to_string)),
    )
}

pub(crate) fn provider_error(error: ProviderError) -> Result<PageResponse> {
    Ok(PageResponse::Error(error))
}
