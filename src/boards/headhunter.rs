use super::{
    get_json, normalize_city_name, JobBoard, LocationId, Pagination, VacancyPage, PAGE_SIZE,
};
use crate::config::{HeadHunterConfig, SearchConfig};
use crate::error::{AppError, FetchError};
use crate::posting::{HhVacancy, Posting};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Node of the HeadHunter area tree (country → region → city)
#[derive(Debug, Clone, Deserialize)]
pub struct HhArea {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub areas: Vec<HhArea>,
}

/// Response of `GET /vacancies`
#[derive(Debug, Deserialize)]
pub struct HhVacanciesResponse {
    #[serde(default)]
    pub items: Vec<HhVacancy>,
    pub found: u64,
    #[serde(default)]
    pub pages: u32,
}

/// Depth-first search for an area whose name equals `name` (already normalized)
pub fn find_area<'a>(areas: &'a [HhArea], name: &str) -> Option<&'a HhArea> {
    for area in areas {
        if normalize_city_name(&area.name) == name {
            return Some(area);
        }
        if let Some(found) = find_area(&area.areas, name) {
            return Some(found);
        }
    }
    None
}

/// HeadHunter API client
#[derive(Debug)]
pub struct HeadHunterClient {
    config: HeadHunterConfig,
    http_client: Client,
}

impl HeadHunterClient {
    pub fn new(config: HeadHunterConfig, search: &SearchConfig) -> Result<Self, AppError> {
        // HeadHunter rejects requests whose User-Agent carries no contact
        let user_agent = format!(
            "vacancy-stats/{} ({})",
            env!("CARGO_PKG_VERSION"),
            config.contact_email
        );

        let http_client = Client::builder()
            .timeout(Duration::from_secs(search.timeout_secs))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn base_url(&self) -> &str {
        self.config.base_url().trim_end_matches('/')
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .get(format!("{}/{}", self.base_url(), path))
            .bearer_auth(&self.config.access_token)
    }
}

#[async_trait]
impl JobBoard for HeadHunterClient {
    fn name(&self) -> &str {
        "HeadHunter"
    }

    async fn resolve_location(&self, city: &str) -> Result<Option<LocationId>, FetchError> {
        let wanted = normalize_city_name(city);
        if wanted.is_empty() {
            return Ok(None);
        }

        info!("Looking up HeadHunter area for '{}'", city.trim());
        let areas: Vec<HhArea> = get_json(self.get("areas")).await?;

        let area = find_area(&areas, &wanted).map(|area| LocationId(area.id.clone()));
        match &area {
            Some(id) => debug!("HeadHunter area for '{}': {}", city.trim(), id),
            None => debug!("No HeadHunter area named '{}'", city.trim()),
        }
        Ok(area)
    }

    async fn fetch_page(
        &self,
        query: &str,
        location: &LocationId,
        page: u32,
    ) -> Result<VacancyPage, FetchError> {
        let per_page = PAGE_SIZE.to_string();
        let page_index = page.to_string();

        let response: HhVacanciesResponse = get_json(self.get("vacancies").query(&[
            ("text", query),
            ("area", location.as_str()),
            ("per_page", per_page.as_str()),
            ("page", page_index.as_str()),
        ]))
        .await?;

        debug!(
            "HeadHunter page {}/{} for '{}': {} items",
            page + 1,
            response.pages,
            query,
            response.items.len()
        );

        Ok(VacancyPage {
            postings: response
                .items
                .into_iter()
                .map(Posting::HeadHunter)
                .collect(),
            found: Some(response.found),
            pagination: Pagination::TotalPages(response.pages),
        })
    }
}
