//! Job board backends.
//!
//! Each board knows how to turn a city name into its own location id and
//! how to fetch one page of vacancies. Pagination and retries live in
//! [`crate::fetcher`], so implementations only perform single requests.

pub mod headhunter;
pub mod superjob;

use crate::error::FetchError;
use crate::posting::Posting;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

pub use headhunter::HeadHunterClient;
pub use superjob::SuperJobClient;

/// Vacancies requested per page, the maximum both APIs accept
pub const PAGE_SIZE: u32 = 100;

/// Longest error body kept in a `FetchError::Status`
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Opaque board-specific region or town identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationId(pub String);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl LocationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How a board tells us whether more pages follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Total number of pages, reported with every page
    TotalPages(u32),
    /// Whether another page exists after this one
    HasMore(bool),
}

/// One page of search results
#[derive(Debug, Clone)]
pub struct VacancyPage {
    pub postings: Vec<Posting>,
    pub found: Option<u64>,
    pub pagination: Pagination,
}

#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Human-readable board name used in logs and report titles
    fn name(&self) -> &str;

    /// Look up the board's id for a city, `Ok(None)` when the catalogue has no match
    async fn resolve_location(&self, city: &str) -> Result<Option<LocationId>, FetchError>;

    /// Fetch a single page (zero-based) of vacancies matching `query`
    async fn fetch_page(
        &self,
        query: &str,
        location: &LocationId,
        page: u32,
    ) -> Result<VacancyPage, FetchError>;
}

/// Canonical form used to compare city names: trimmed, NFC, lowercase
pub fn normalize_city_name(name: &str) -> String {
    name.trim().nfc().collect::<String>().to_lowercase()
}

/// Send a request and decode a JSON body
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
    let response = request
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(&e))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| FetchError::Transport(format!("Failed to read response: {e}")))?;

    if !status.is_success() {
        let body: String = response_text.chars().take(MAX_ERROR_BODY_CHARS).collect();
        return Err(FetchError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&response_text).map_err(|e| {
        debug!("Response text: {}", response_text);
        FetchError::MalformedResponse(format!("JSON parsing failed: {e}"))
    })
}
