use crate::api::RepositoryRecord;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_LANGS_COUNT: i32 = 10;

/// Byte size of one language summed over the retained repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedLanguage {
    pub name: String,
    pub color: Option<String>,
    pub size: u64,
}

/// Drops repositories whose name is excluded, keeping the order of the rest.
pub fn exclude_repositories(repositories: Vec<RepositoryRecord>, excluded: &HashSet<String>) -> Vec<RepositoryRecord> {
    if excluded.is_empty() {
        return repositories;
    }
    repositories
        .into_iter()
        .filter(|repo| !excluded.contains(&repo.name))
        .collect()
}

/// Sums language sizes over `repositories` and returns the `langs_count` biggest.
///
/// Equal sizes keep the order in which the languages were first seen, and the
/// color of a language is the one of its first occurrence.
pub fn top_languages(repositories: &[RepositoryRecord], langs_count: Option<i32>) -> Vec<AggregatedLanguage> {
    let langs_count = langs_count.unwrap_or(DEFAULT_LANGS_COUNT);
    if langs_count <= 0 {
        return Vec::new();
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut languages: Vec<AggregatedLanguage> = Vec::new();
    for usage in repositories.iter().flat_map(|repo| repo.languages.iter()) {
        match index.get(usage.name.as_str()) {
            Some(&i) => languages[i].size += usage.size,
            None => {
                index.insert(&usage.name, languages.len());
                languages.push(AggregatedLanguage {
                    name: usage.name.clone(),
                    color: usage.color.clone(),
                    size: usage.size,
                });
            }
        }
    }

    languages.sort_by(|a, b| b.size.cmp(&a.size));
    languages.truncate(langs_count as usize);
    languages
}

pub fn total_stars(repositories: &[RepositoryRecord]) -> u64 {
    repositories.iter().map(|repo| u64::from(repo.stars)).sum()
}

#[cfg(test)]
use crate::testing::{lang, repo};

#[cfg(test)]
fn names<T, F: Fn(&T) -> &str>(items: &[T], name: F) -> Vec<&str> {
    items.iter().map(name).collect()
}

#[test]
fn exclusion_keeps_order_and_drops_aggregates() {
    let repositories = vec![
        repo("A", 5, vec![lang("Rust", "#dea584", 100)]),
        repo("B", 50, vec![lang("Go", "#00ADD8", 1000), lang("Rust", "#dea584", 10)]),
        repo("C", 7, vec![lang("Rust", "#dea584", 1)]),
    ];
    let excluded: HashSet<String> = ["B".to_string()].into_iter().collect();

    let retained = exclude_repositories(repositories, &excluded);

    assert_eq!(names(&retained, |r| r.name.as_str()), vec!["A", "C"]);
    assert_eq!(total_stars(&retained), 12);
    let languages = top_languages(&retained, None);
    assert_eq!(languages.len(), 1);
    assert_eq!(languages[0].name, "Rust");
    assert_eq!(languages[0].size, 101);
}

#[test]
fn unknown_exclusions_pass_everything_through() {
    let repositories = vec![repo("A", 1, vec![]), repo("B", 2, vec![])];
    let excluded: HashSet<String> = ["Z".to_string()].into_iter().collect();

    let retained = exclude_repositories(repositories.clone(), &excluded);

    assert_eq!(retained, repositories);
}

#[test]
fn sizes_are_summed_per_language() {
    let repositories = vec![
        repo("a", 0, vec![lang("Rust", "#dea584", 300), lang("Shell", "#89e051", 20)]),
        repo("b", 0, vec![lang("Go", "#00ADD8", 250), lang("Rust", "#dea584", 50)]),
        repo("c", 0, vec![lang("Shell", "#89e051", 5)]),
    ];

    let languages = top_languages(&repositories, None);

    assert_eq!(names(&languages, |l| l.name.as_str()), vec!["Rust", "Go", "Shell"]);
    assert_eq!(languages.iter().map(|l| l.size).collect::<Vec<_>>(), vec![350, 250, 25]);
    let reported: u64 = repositories.iter().flat_map(|r| &r.languages).map(|l| l.size).sum();
    assert_eq!(languages.iter().map(|l| l.size).sum::<u64>(), reported);
}

#[test]
fn ties_keep_first_seen_order_and_color() {
    let repositories = vec![
        repo("a", 0, vec![lang("Python", "#3572A5", 10)]),
        repo("b", 0, vec![lang("Ruby", "#701516", 10), lang("Python", "#ffffff", 0)]),
    ];

    let languages = top_languages(&repositories, None);

    assert_eq!(names(&languages, |l| l.name.as_str()), vec!["Python", "Ruby"]);
    assert_eq!(languages[0].color.as_deref(), Some("#3572A5"));
}

#[test]
fn truncation_bounds() {
    let repositories = vec![repo(
        "a",
        0,
        vec![lang("C", "#555555", 1), lang("Rust", "#dea584", 3), lang("Go", "#00ADD8", 2)],
    )];

    assert!(top_languages(&repositories, Some(0)).is_empty());
    assert!(top_languages(&repositories, Some(-3)).is_empty());
    assert_eq!(names(&top_languages(&repositories, Some(2)), |l| l.name.as_str()), vec!["Rust", "Go"]);
    assert_eq!(
        names(&top_languages(&repositories, Some(50)), |l| l.name.as_str()),
        vec!["Rust", "Go", "C"]
    );
}

#[test]
fn default_count_is_ten() {
    let usages = (0..15)
        .map(|i| lang(&format!("L{}", i), "#000000", 100 - i as u64))
        .collect();
    let repositories = vec![repo("a", 0, usages)];

    assert_eq!(top_languages(&repositories, None).len(), 10);
}

#[test]
fn no_repositories_no_stars() {
    assert_eq!(total_stars(&[]), 0);
    assert!(top_languages(&[], Some(5)).is_empty());
}
