use clap::Parser;
use secrecy::SecretString;
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub login of the user
    #[clap(short, long)]
    pub username: Option<String>,

    /// Number of top languages to report (10 when not set)
    #[clap(short, long, allow_hyphen_values = true)]
    pub langs_count: Option<i32>,

    /// Count the commits of the whole history instead of the last year
    #[clap(short, long)]
    pub include_all_commits: bool,

    /// Comma separated names of repositories to leave out, e.g. "dotfiles,notes"
    #[clap(short, long)]
    pub exclude_repo: Option<String>,

    /// API OAuth access token
    #[clap(short = 't', long, env = "GITHUB_TOKEN")]
    pub api_token: Option<SecretString>,

    /// GitHub API URL
    #[clap(long, env, default_value = "https://api.github.com")]
    pub api_url: String,

    /// Maximal retries of a failed GitHub request
    #[clap(long, env, default_value_t = 3, parse(try_from_str=max_retries_in_range))]
    pub max_retries: u32,

    /// Timeout of a single GitHub request in seconds
    #[clap(long, env = "REQUEST_TIMEOUT", default_value_t = 30, parse(try_from_str=timeout_in_range))]
    pub timeout: u64,

    /// Pretty print the JSON output
    #[clap(short, long)]
    pub pretty: bool,
}

fn max_retries_in_range(value: &str) -> clap::Result<u32, String> {
    number_in_range(value, 0, 10, "max_retries".to_string())
}

fn timeout_in_range(value: &str) -> clap::Result<u64, String> {
    number_in_range(value, 1, 300, "timeout".to_string())
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> clap::Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}

#[test]
fn max_retries_range_test() {
    assert_eq!(max_retries_in_range("0"), Ok(0));
    assert_eq!(max_retries_in_range("10"), Ok(10));
    assert!(max_retries_in_range("11").is_err());
    assert!(max_retries_in_range("three").is_err());
}

#[test]
fn timeout_range_test() {
    assert_eq!(timeout_in_range("1"), Ok(1));
    assert_eq!(timeout_in_range("300"), Ok(300));
    assert!(timeout_in_range("0").is_err());
    assert!(timeout_in_range("301").is_err());
}

#[test]
fn parse_test() {
    let args = Args::try_parse_from([
        "portfolio",
        "--username",
        "octocat",
        "--langs-count",
        "-1",
        "--include-all-commits",
        "--exclude-repo",
        "a,b",
        "--api-url",
        "http://localhost:1234",
    ])
    .unwrap();
    assert_eq!(args.username.as_deref(), Some("octocat"));
    assert_eq!(args.langs_count, Some(-1));
    assert!(args.include_all_commits);
    assert_eq!(args.exclude_repo.as_deref(), Some("a,b"));
    assert_eq!(args.api_url, "http://localhost:1234");
    assert_eq!(args.timeout, 30);
}
