use crate::api::{CommitCounter, Profile, Rank, RankInput, RankScorer, Result};
use derive_more::Constructor;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize, Constructor)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_stars: u64,
    pub total_commits: u32,
    pub total_reviews: u32,
    #[serde(rename = "totalPRs")]
    pub total_prs: u32,
    pub total_issues: u32,
    pub contributed_to: u32,
    pub rank: Rank,
}

/// Builds the stats of `profile` and ranks them.
///
/// # Arguments
/// * `login` - Requested username, passed to `commits` as given
/// * `repos` - Number of retained repositories
/// * `total_stars` - Stars summed over the retained repositories
/// * `include_all_commits` - Count commits of the whole history through `commits` instead of the contribution window
pub async fn assemble<COUNTER, SCORER>(
    login: &str,
    profile: &Profile,
    repos: usize,
    total_stars: u64,
    include_all_commits: bool,
    commits: &COUNTER,
    scorer: &SCORER,
) -> Result<Stats>
where
    COUNTER: CommitCounter + ?Sized,
    SCORER: RankScorer + ?Sized,
{
    let contributions = &profile.contributions;
    let total_commits = if include_all_commits {
        let total = commits.total_commits(login).await?;
        debug!("{} has {} commits in total", login, total);
        total
    } else {
        contributions.commits
    };

    let rank = scorer.score(&RankInput {
        all_commits: include_all_commits,
        commits: total_commits,
        prs: contributions.prs,
        reviews: contributions.reviews,
        issues: contributions.issues,
        repos,
        stars: total_stars,
        followers: profile.followers,
    })?;

    Ok(Stats::new(
        total_stars,
        total_commits,
        contributions.reviews,
        contributions.prs,
        contributions.issues,
        contributions.contributed_to,
        rank,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Error;
    use crate::testing::{profile, CountingCommits, RecordingScorer};

    struct FailingScorer;

    impl RankScorer for FailingScorer {
        fn score(&self, _: &RankInput) -> Result<Rank> {
            Err(anyhow::anyhow!("scorer unavailable").into())
        }
    }

    #[tokio::test]
    async fn window_commits_without_extra_call() {
        let commits = CountingCommits::new(5000);
        let scorer = RecordingScorer::default();

        let stats = assemble("octocat", &profile("octocat"), 3, 17, false, &commits, &scorer).await.unwrap();

        assert_eq!(stats.total_commits, 120);
        assert!(commits.calls().is_empty());
        assert_eq!(
            scorer.input(),
            Some(RankInput {
                all_commits: false,
                commits: 120,
                prs: 9,
                reviews: 4,
                issues: 6,
                repos: 3,
                stars: 17,
                followers: 42,
            })
        );
    }

    #[tokio::test]
    async fn all_commits_asks_the_counter_once() {
        let commits = CountingCommits::new(5000);
        let scorer = RecordingScorer::default();

        let stats = assemble("octocat", &profile("octocat"), 3, 17, true, &commits, &scorer).await.unwrap();

        assert_eq!(stats.total_commits, 5000);
        assert_eq!(commits.calls(), vec!["octocat".to_string()]);
        let input = scorer.input().unwrap();
        assert!(input.all_commits);
        assert_eq!(input.commits, 5000);
    }

    #[tokio::test]
    async fn counters_come_from_profile() {
        let stats = assemble(
            "octocat",
            &profile("octocat"),
            0,
            0,
            false,
            &CountingCommits::new(0),
            &RecordingScorer::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            stats,
            Stats::new(
                0,
                120,
                4,
                9,
                6,
                3,
                Rank {
                    level: "A".to_string(),
                    percentile: 30.0
                }
            )
        );
    }

    #[tokio::test]
    async fn scorer_failures_propagate() {
        let err = assemble("octocat", &profile("octocat"), 0, 0, false, &CountingCommits::new(0), &FailingScorer)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Other(_)));
        assert_eq!(err.to_string(), "scorer unavailable");
    }
}
