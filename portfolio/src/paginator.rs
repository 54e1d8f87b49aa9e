use crate::api::{
    Client, Error, Page, PageResponse, Profile, ProviderError, ProviderErrorKind, RepositoryRecord, Result,
    GRAPHQL_ERROR_MESSAGE, USER_NOT_FOUND_MESSAGE,
};
use log::{debug, error, info, warn};

/// Profile captured from the first page and repositories of all pages.
#[derive(Debug)]
pub struct Collected {
    /// The requested username, trimmed.
    pub login: String,
    pub profile: Profile,
    pub repositories: Vec<RepositoryRecord>,
}

/// Walks the provider's pages for `username` until the last one.
///
/// Fails with [`Error::MissingParameter`] before any request when `username` is absent or blank.
/// Any failed page aborts the walk and discards what was already collected.
pub async fn fetch_all<CLIENT>(client: &CLIENT, username: Option<&str>) -> Result<Collected>
where
    CLIENT: Client + ?Sized,
{
    let login = username
        .map(str::trim)
        .filter(|login| !login.is_empty())
        .ok_or(Error::MissingParameter("username"))?;

    let Page {
        profile,
        repositories: mut page,
    } = fetch_page(client, login, None, 1).await?;

    let mut repositories = Vec::new();
    let mut page_no = 1;
    loop {
        repositories.append(&mut page.nodes);
        let cursor = match (page.has_next_page, page.end_cursor) {
            (false, _) => break,
            (true, Some(cursor)) => cursor,
            (true, None) => {
                warn!("Page {} of {} has a next page but no end cursor", page_no, login);
                break;
            }
        };
        page_no += 1;
        page = fetch_page(client, login, Some(&cursor), page_no).await?.repositories;
    }

    info!("Collected {} repositories of {}", repositories.len(), login);
    Ok(Collected {
        login: login.to_string(),
        profile,
        repositories,
    })
}

async fn fetch_page<CLIENT>(client: &CLIENT, login: &str, after: Option<&str>, page_no: u32) -> Result<Page>
where
    CLIENT: Client + ?Sized,
{
    match client.fetch_page(login, after).await? {
        PageResponse::Page(page) => {
            debug!(
                "Page {} of {}: {} repositories",
                page_no,
                login,
                page.repositories.nodes.len()
            );
            Ok(page)
        }
        PageResponse::Error(err) => Err(provider_error(login, err)),
    }
}

fn provider_error(login: &str, err: ProviderError) -> Error {
    match err.kind {
        ProviderErrorKind::NotFound => {
            Error::UserNotFound(err.message.unwrap_or_else(|| USER_NOT_FOUND_MESSAGE.to_string()))
        }
        ProviderErrorKind::Other(kind) => {
            error!(
                "Provider error {} for {}: {}",
                kind,
                login,
                err.message.as_deref().unwrap_or("<no message>")
            );
            Error::Graphql(GRAPHQL_ERROR_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorKind;
    use crate::testing::{lang, page, provider_error as scripted_error, repo, ScriptedClient};

    #[tokio::test]
    async fn follows_cursors_until_last_page() {
        let client = ScriptedClient::pages(vec![
            page("octocat", vec![repo("a", 1, vec![]), repo("b", 2, vec![])], Some("c1")),
            page("octocat", vec![repo("c", 3, vec![])], Some("c2")),
            page("octocat", vec![repo("d", 4, vec![lang("Rust", "#dea584", 10)])], None),
        ]);

        let collected = fetch_all(&client, Some("octocat")).await.unwrap();

        let names: Vec<_> = collected.repositories.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(
            client.calls(),
            vec![
                ("octocat".to_string(), None),
                ("octocat".to_string(), Some("c1".to_string())),
                ("octocat".to_string(), Some("c2".to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn profile_is_taken_from_first_page() {
        let mut second = page("octocat", vec![repo("b", 0, vec![])], None);
        second.profile.followers = 9999;
        second.profile.name = None;
        let client = ScriptedClient::pages(vec![page("octocat", vec![repo("a", 0, vec![])], Some("c1")), second]);

        let collected = fetch_all(&client, Some("octocat")).await.unwrap();

        assert_eq!(collected.profile.followers, 42);
        assert_eq!(collected.profile.name.as_deref(), Some("Octo Cat"));
    }

    #[tokio::test]
    async fn keeps_requested_login() {
        let client = ScriptedClient::pages(vec![page("octocat", vec![], None)]);

        let collected = fetch_all(&client, Some("  OctoCat")).await.unwrap();

        assert_eq!(collected.login, "OctoCat");
        assert_eq!(collected.profile.login, "octocat");
    }

    #[tokio::test]
    async fn user_without_repositories_is_one_page() {
        let client = ScriptedClient::pages(vec![page("octocat", vec![], None)]);

        let collected = fetch_all(&client, Some("octocat")).await.unwrap();

        assert!(collected.repositories.is_empty());
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn missing_username_makes_no_calls() {
        for username in [None, Some(""), Some("   ")] {
            let client = ScriptedClient::pages(vec![]);
            let err = fetch_all(&client, username).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingParameter);
            assert!(client.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn not_found_keeps_provider_message() {
        let message = "Could not resolve to a User with the login of 'ghost'.";
        let client = ScriptedClient::new(vec![scripted_error(ProviderError::new(
            ProviderErrorKind::NotFound,
            Some(message.to_string()),
        ))]);

        let err = fetch_all(&client, Some("ghost")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UserNotFound);
        assert_eq!(err.to_string(), message);
    }

    #[tokio::test]
    async fn not_found_without_message_uses_default() {
        let client = ScriptedClient::new(vec![scripted_error(ProviderError::new(ProviderErrorKind::NotFound, None))]);

        let err = fetch_all(&client, Some("ghost")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UserNotFound);
        assert_eq!(err.to_string(), USER_NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn other_provider_errors_are_graphql_errors() {
        let client = ScriptedClient::new(vec![
            Ok(PageResponse::Page(page("octocat", vec![repo("a", 0, vec![])], Some("c1")))),
            scripted_error(ProviderError::new(
                ProviderErrorKind::Other("FORBIDDEN".to_string()),
                Some("nope".to_string()),
            )),
        ]);

        let err = fetch_all(&client, Some("octocat")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::GraphqlError);
        assert_eq!(err.to_string(), GRAPHQL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn client_failures_pass_through() {
        let client = ScriptedClient::new(vec![
            Ok(PageResponse::Page(page("octocat", vec![repo("a", 0, vec![])], Some("c1")))),
            Err(anyhow::anyhow!("connection reset").into()),
        ]);

        let err = fetch_all(&client, Some("octocat")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.to_string(), "connection reset");
    }

    #[tokio::test]
    async fn next_page_without_cursor_stops() {
        let mut first = page("octocat", vec![repo("a", 0, vec![])], None);
        first.repositories.has_next_page = true;
        let client = ScriptedClient::pages(vec![first]);

        let collected = fetch_all(&client, Some("octocat")).await.unwrap();

        assert_eq!(collected.repositories.len(), 1);
        assert_eq!(client.calls().len(), 1);
    }
}
