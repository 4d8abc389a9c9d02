use super::{
    get_json, normalize_city_name, JobBoard, LocationId, Pagination, VacancyPage, PAGE_SIZE,
};
use crate::config::{SearchConfig, SuperJobConfig};
use crate::error::{AppError, FetchError};
use crate::posting::{Posting, SjVacancy};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Deserialize)]
pub struct SjTown {
    pub id: u64,
    pub title: String,
}

/// Response of `GET /towns/`
#[derive(Debug, Deserialize)]
pub struct SjTownsResponse {
    pub objects: Vec<SjTown>,
}

/// Response of `GET /vacancies/`
#[derive(Debug, Deserialize)]
pub struct SjVacanciesResponse {
    #[serde(default)]
    pub objects: Vec<SjVacancy>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub more: bool,
}

/// First town whose title contains `name` (already normalized)
pub fn find_town<'a>(towns: &'a [SjTown], name: &str) -> Option<&'a SjTown> {
    towns
        .iter()
        .find(|town| normalize_city_name(&town.title).contains(name))
}

/// SuperJob API client
#[derive(Debug)]
pub struct SuperJobClient {
    config: SuperJobConfig,
    http_client: Client,
}

impl SuperJobClient {
    pub fn new(config: SuperJobConfig, search: &SearchConfig) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(search.timeout_secs))
            .user_agent(format!("vacancy-stats/{}", env!("CARGO_PKG_VERSION")))
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
            .get(format!("{}/{}/", self.base_url(), path))
            .header("X-Api-App-Id", &self.config.app_key)
            .bearer_auth(&self.config.access_token)
    }
}

#[async_trait]
impl JobBoard for SuperJobClient {
    fn name(&self) -> &str {
        "SuperJob"
    }

    async fn resolve_location(&self, city: &str) -> Result<Option<LocationId>, FetchError> {
        let wanted = normalize_city_name(city);
        if wanted.is_empty() {
            return Ok(None);
        }

        info!("Looking up SuperJob town for '{}'", city.trim());
        let response: SjTownsResponse = get_json(self.get("towns").query(&[("all", "1")])).await?;

        let town = find_town(&response.objects, &wanted);
        if let Some(town) = town {
            debug!("SuperJob town for '{}': {} ({})", city.trim(), town.title, town.id);
        }
        Ok(town.map(|town| LocationId(town.id.to_string())))
    }

    async fn fetch_page(
        &self,
        query: &str,
        location: &LocationId,
        page: u32,
    ) -> Result<VacancyPage, FetchError> {
        let count = PAGE_SIZE.to_string();
        let page_index = page.to_string();

        let response: SjVacanciesResponse = get_json(self.get("vacancies").query(&[
            ("keyword", query),
            ("town", location.as_str()),
            ("count", count.as_str()),
            ("page", page_index.as_str()),
        ]))
        .await?;

        debug!(
            "SuperJob page {} for '{}': {} items, more={}",
            page,
            query,
            response.objects.len(),
            response.more
        );

        Ok(VacancyPage {
            postings: response
                .objects
                .into_iter()
                .map(Posting::SuperJob)
                .collect(),
            found: Some(response.total),
            pagination: Pagination::HasMore(response.more),
        })
    }
}
