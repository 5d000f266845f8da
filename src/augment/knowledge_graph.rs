//! Knowledge Graph entity search client
//!
//! Queries the Google Knowledge Graph Search API for entities related to a
//! job title and turns their names into lowercase skill terms. Requests are
//! best-effort: missing key, timeout, HTTP error, or a malformed body all
//! degrade to an empty result with a log line, never an error.

use crate::augment::SkillAugmenter;
use crate::config::AugmenterConfig;
use crate::error::{Result, ScannerError};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

pub struct KnowledgeGraphClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    result_limit: usize,
}

#[derive(Debug, Deserialize)]
struct EntitySearchResponse {
    #[serde(rename = "itemListElement", default)]
    item_list_element: Vec<EntitySearchItem>,
}

#[derive(Debug, Deserialize)]
struct EntitySearchItem {
    #[serde(default)]
    result: Option<EntityResult>,
}

#[derive(Debug, Deserialize)]
struct EntityResult {
    #[serde(default)]
    name: Option<String>,
}

impl KnowledgeGraphClient {
    pub fn new(config: &AugmenterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ScannerError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.resolve_api_key(),
            result_limit: config.result_limit,
        })
    }

    async fn search(&self, job_title: &str, api_key: &str) -> reqwest::Result<HashSet<String>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", job_title), ("key", api_key)])
            .query(&[("limit", self.result_limit)])
            .send()
            .await?
            .error_for_status()?;

        let body: EntitySearchResponse = response.json().await?;
        Ok(entity_names(body))
    }
}

fn entity_names(body: EntitySearchResponse) -> HashSet<String> {
    body.item_list_element
        .into_iter()
        .filter_map(|item| item.result.and_then(|entity| entity.name))
        .map(|name| name.to_lowercase())
        .collect()
}

#[async_trait]
impl SkillAugmenter for KnowledgeGraphClient {
    async fn related_skills(&self, job_title: &str) -> HashSet<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No knowledge graph API key configured, skipping augmentation");
            return HashSet::new();
        };

        match self.search(job_title, api_key).await {
            Ok(skills) => {
                debug!(
                    "Knowledge graph returned {} entities for '{}'",
                    skills.len(),
                    job_title
                );
                skills
            }
            Err(e) => {
                warn!("Skill augmentation failed for '{}': {}", job_title, e);
                HashSet::new()
            }
        }
    }
}
