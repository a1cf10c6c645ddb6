use std::sync::Arc;

use regex::Regex;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

use super::SourceError;
use crate::resolve::Definition;

pub const DEFAULT_CONCURRENCY: usize = 8;

/// Body of `GET /subjects/{subject}/versions/latest`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubjectVersion {
    pub subject: String,
    pub version: u32,
    pub id: u32,
    pub schema: String,
}

/// Loads the latest version of every matching subject from a
/// Confluent-compatible schema registry.
#[derive(Debug, Clone)]
pub struct RegistrySource {
    base: Url,
    filter: Option<Regex>,
    concurrency: usize,
    client: Client,
}

impl RegistrySource {
    pub fn new(base: &str) -> Result<Self, SourceError> {
        let invalid = |message: String| SourceError::InvalidUrl {
            url: base.to_owned(),
            message,
        };
        let base = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_owned()));
        }

        Ok(Self {
            base,
            filter: None,
            concurrency: DEFAULT_CONCURRENCY,
            client: Client::new(),
        })
    }

    /// Keep only subjects the regex matches somewhere.
    pub fn with_filter(mut self, filter: Option<Regex>) -> Self {
        self.filter = filter;
        self
    }

    /// Maximum number of version requests in flight. At least one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn subjects_url(&self) -> Url {
        self.endpoint(&["subjects"])
    }

    pub fn latest_url(&self, subject: &str) -> Url {
        self.endpoint(&["subjects", subject, "versions", "latest"])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn load(&self) -> Result<Vec<Definition>, SourceError> {
        let url = self.subjects_url();
        let body = fetch(&self.client, url.clone()).await?;
        let subjects = self.select(parse_subjects(&body, &url)?);
        debug!(registry = %self.base, count = subjects.len(), "fetching latest versions");

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        for subject in subjects {
            let client = self.client.clone();
            let url = self.latest_url(&subject);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| SourceError::Cancelled)?;
                let body = fetch(&client, url.clone()).await?;
                parse_latest(&body, &url)
            });
        }

        let mut versions = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let version = joined??;
            debug!(subject = %version.subject, version = version.version, "fetched");
            versions.push(version);
        }

        versions.sort_by(|a, b| a.subject.cmp(&b.subject));
        Ok(versions
            .into_iter()
            .map(|v| Definition::new(v.subject, v.schema))
            .collect())
    }

    /// Apply the filter and sort.
    pub(crate) fn select(&self, subjects: Vec<String>) -> Vec<String> {
        let mut subjects: Vec<String> = subjects
            .into_iter()
            .filter(|s| self.filter.as_ref().is_none_or(|re| re.is_match(s)))
            .collect();
        subjects.sort();
        subjects.dedup();
        subjects
    }
}

async fn fetch(client: &Client, url: Url) -> Result<String, SourceError> {
    let http = |source| SourceError::Http {
        url: url.to_string(),
        source,
    };
    let response = client
        .get(url.clone())
        .header("Accept", "application/vnd.schemaregistry.v1+json, application/json")
        .send()
        .await
        .map_err(http)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
        });
    }
    response.text().await.map_err(http)
}

pub(crate) fn parse_subjects(body: &str, url: &Url) -> Result<Vec<String>, SourceError> {
    serde_json::from_str(body).map_err(|source| SourceError::Payload {
        url: url.to_string(),
        source,
    })
}

pub(crate) fn parse_latest(body: &str, url: &Url) -> Result<SubjectVersion, SourceError> {
    serde_json::from_str(body).map_err(|source| SourceError::Payload {
        url: url.to_string(),
        source,
    })
}
