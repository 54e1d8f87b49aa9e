//! GitHub user portfolio
//!
//! # Overview
//!
//! Given a GitHub login, the library walks the provider's paginated view of the user (profile fields plus one page
//! of owned repositories per request), merges the pages into a single repository list and derives a portfolio from it:
//! the profile, the stars, commits, reviews, pull requests and issues of the user with a rank computed from them,
//! the most used languages and the repositories themselves.
//!
//! Repositories can be excluded by name. Excluded repositories are left out of the output and of every aggregate.
//! Languages are ranked by their byte size summed over the remaining repositories.
//!
//! The provider, the full commit history count and the rank formula are reached through the [`api::Client`],
//! [`api::CommitCounter`] and [`api::RankScorer`] traits.

pub mod api;
#[cfg(feature = "fetcher")]
pub mod fetcher;
#[cfg(feature = "fetcher")]
pub mod languages;
#[cfg(feature = "fetcher")]
pub mod paginator;
#[cfg(feature = "fetcher")]
pub mod rank;
#[cfg(feature = "fetcher")]
pub mod stats;

#[cfg(test)]
mod testing;

#[cfg(feature = "fetcher")]
pub use fetcher::{PortfolioData, PortfolioFetcher, PortfolioRequest};
#[cfg(feature = "fetcher")]
pub use rank::DefaultRank;
