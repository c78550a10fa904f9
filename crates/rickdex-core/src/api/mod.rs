//! Remote character source.
//!
//! One paginated listing endpoint: `GET {base}/character?page=N` answers with
//! a `results` array and an `info` object whose optional `next` URL carries
//! the following page number after its last `=`.

mod client;
mod error;

pub use client::CharacterApiClient;
pub use error::FetchError;

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::Character;

/// One server-paginated batch of characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Characters in server order
    pub characters: Vec<Character>,
    /// Page to request next, `None` once the catalog is exhausted
    pub next_page: Option<u32>,
    /// Total characters in the catalog, when reported
    pub total_count: Option<u64>,
    /// Total pages in the catalog, when reported
    pub total_pages: Option<u32>,
}

impl Page {
    /// Accept this page as the answer to a request for page `requested`.
    ///
    /// A `next` link that does not point past `requested` would move the
    /// cursor backward and is rejected as [`FetchError::InvalidCursor`].
    pub fn following(self, requested: u32) -> Result<Self, FetchError> {
        match self.next_page {
            Some(next) if next <= requested => Err(FetchError::InvalidCursor(format!(
                "page {requested} links back to page {next}"
            ))),
            _ => Ok(self),
        }
    }
}

/// Anything that can serve catalog pages.
///
/// Implementations need not support concurrent calls; the catalog keeps at
/// most one request in flight.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<Page, FetchError>;
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    pages: Option<u32>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageBody {
    info: PageInfo,
    results: Vec<Character>,
}

/// Parse a listing response body into a [`Page`].
///
/// Public for testability; callers can exercise parsing without network access.
pub fn parse_page(body: &str) -> Result<Page, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody);
    }

    let parsed: PageBody =
        serde_json::from_str(body).map_err(|error| FetchError::Decode(error.to_string()))?;

    let next_page = parsed
        .info
        .next
        .as_deref()
        .map(|url| {
            next_page_from_url(url).ok_or_else(|| FetchError::InvalidCursor(url.to_string()))
        })
        .transpose()?;

    Ok(Page {
        characters: parsed.results,
        next_page,
        total_count: parsed.info.count,
        total_pages: parsed.info.pages,
    })
}

/// Extract the page number from a `next` URL: the integer after its last `=`.
///
/// ```
/// use rickdex_core::api::next_page_from_url;
///
/// assert_eq!(next_page_from_url("https://rickandmortyapi.com/api/character?page=2"), Some(2));
/// assert_eq!(next_page_from_url("https://rickandmortyapi.com/api/character"), None);
/// ```
pub fn next_page_from_url(url: &str) -> Option<u32> {
    let (_, page) = url.rsplit_once('=')?;
    page.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CharacterId;
    use pretty_assertions::assert_eq;

    const FIRST_PAGE: &str = r#"{
        "info": {
            "count": 826,
            "pages": 42,
            "next": "https://rickandmortyapi.com/api/character?page=2",
            "prev": null
        },
        "results": [
            { "id": 1, "name": "Rick Sanchez", "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg" },
            { "id": 2, "name": "Morty Smith", "image": "https://rickandmortyapi.com/api/character/avatar/2.jpeg" }
        ]
    }"#;

    #[test]
    fn following_rejects_links_that_do_not_advance() {
        let page = parse_page(FIRST_PAGE).unwrap();
        assert_eq!(page.clone().following(1).unwrap().next_page, Some(2));

        for requested in [2, 3] {
            let error = page.clone().following(requested).unwrap_err();
            assert!(matches!(error, FetchError::InvalidCursor(_)));
        }

        let last = Page {
            next_page: None,
            ..page
        };
        assert!(last.following(42).is_ok());
    }

    #[test]
    fn parse_page_reads_results_and_cursor() {
        let page = parse_page(FIRST_PAGE).unwrap();

        let ids = page.characters.iter().map(|c| c.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![CharacterId::new(1), CharacterId::new(2)]);
        assert_eq!(page.next_page, Some(2));
        assert_eq!(page.total_count, Some(826));
        assert_eq!(page.total_pages, Some(42));
    }

    #[test]
    fn parse_page_without_next_is_last() {
        let body = r#"{ "info": { "count": 1, "pages": 1, "next": null, "prev": null }, "results": [] }"#;
        let page = parse_page(body).unwrap();
        assert_eq!(page.next_page, None);
        assert!(page.characters.is_empty());

        let body = r#"{ "info": {}, "results": [] }"#;
        assert_eq!(parse_page(body).unwrap().next_page, None);
    }

    #[test]
    fn parse_page_rejects_empty_and_malformed_bodies() {
        assert!(matches!(parse_page("  "), Err(FetchError::EmptyBody)));
        assert!(matches!(parse_page("<html>"), Err(FetchError::Decode(_))));
        assert!(matches!(
            parse_page(r#"{ "error": "There is nothing here" }"#),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn parse_page_rejects_unparseable_next() {
        let body = r#"{ "info": { "next": "https://example.com/character?page=two" }, "results": [] }"#;
        assert!(matches!(parse_page(body), Err(FetchError::InvalidCursor(_))));
    }

    #[test]
    fn next_page_uses_last_equals_sign() {
        assert_eq!(
            next_page_from_url("https://example.com/character?name=rick&page=7"),
            Some(7)
        );
        assert_eq!(next_page_from_url("https://example.com/character?page="), None);
        assert_eq!(next_page_from_url("no-query"), None);
    }
}
