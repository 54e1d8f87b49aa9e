//! Default rank scorer.
//!
//! Each counter is mapped onto `[0, 1)` by a cumulative distribution centred on
//! a median, the results are averaged with weights and the complement is
//! reported as a percentile: the lower the percentile, the better the rank.

use crate::api::{Rank, RankInput, RankScorer, Result};

const COMMITS_MEDIAN: f64 = 250.0;
const ALL_COMMITS_MEDIAN: f64 = 1000.0;
const COMMITS_WEIGHT: f64 = 2.0;
const PRS_MEDIAN: f64 = 50.0;
const PRS_WEIGHT: f64 = 3.0;
const ISSUES_MEDIAN: f64 = 25.0;
const ISSUES_WEIGHT: f64 = 1.0;
const REVIEWS_MEDIAN: f64 = 2.0;
const REVIEWS_WEIGHT: f64 = 1.0;
const STARS_MEDIAN: f64 = 50.0;
const STARS_WEIGHT: f64 = 4.0;
const FOLLOWERS_MEDIAN: f64 = 10.0;
const FOLLOWERS_WEIGHT: f64 = 1.0;

const TOTAL_WEIGHT: f64 =
    COMMITS_WEIGHT + PRS_WEIGHT + ISSUES_WEIGHT + REVIEWS_WEIGHT + STARS_WEIGHT + FOLLOWERS_WEIGHT;

const THRESHOLDS: [f64; 9] = [1.0, 12.5, 25.0, 37.5, 50.0, 62.5, 75.0, 87.5, 100.0];
const LEVELS: [&str; 9] = ["S", "A+", "A", "A-", "B+", "B", "B-", "C+", "C"];

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRank;

impl RankScorer for DefaultRank {
    fn score(&self, input: &RankInput) -> Result<Rank> {
        let commits_median = if input.all_commits {
            ALL_COMMITS_MEDIAN
        } else {
            COMMITS_MEDIAN
        };
        let weighted = COMMITS_WEIGHT * exponential_cdf(f64::from(input.commits) / commits_median)
            + PRS_WEIGHT * exponential_cdf(f64::from(input.prs) / PRS_MEDIAN)
            + ISSUES_WEIGHT * exponential_cdf(f64::from(input.issues) / ISSUES_MEDIAN)
            + REVIEWS_WEIGHT * exponential_cdf(f64::from(input.reviews) / REVIEWS_MEDIAN)
            + STARS_WEIGHT * log_normal_cdf(input.stars as f64 / STARS_MEDIAN)
            + FOLLOWERS_WEIGHT * log_normal_cdf(f64::from(input.followers) / FOLLOWERS_MEDIAN);

        let percentile = (1.0 - weighted / TOTAL_WEIGHT) * 100.0;
        let level = THRESHOLDS
            .iter()
            .position(|&threshold| percentile <= threshold)
            .map_or(LEVELS[LEVELS.len() - 1], |i| LEVELS[i]);

        Ok(Rank {
            level: level.to_string(),
            percentile,
        })
    }
}

fn exponential_cdf(x: f64) -> f64 {
    1.0 - 2f64.powf(-x)
}

// Approximation of a log normal CDF.
fn log_normal_cdf(x: f64) -> f64 {
    x / (1.0 + x)
}
