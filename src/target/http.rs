//! Automation API client over HTTP (blocking reqwest).
//!
//! Every call is synchronous: the pipeline waits for the target to
//! acknowledge a query or creation before issuing the next one.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use super::{Query, Resource, TargetClient};
use crate::error::{MigrationError, Result};

const API_KEY_HEADER: &str = "pos-server-apikey";

/// Envelope the API wraps query results in
#[derive(Debug, Deserialize)]
struct ResultSet<R> {
    #[serde(default = "Vec::new")]
    results: Vec<R>,
}

pub struct HttpTargetClient {
    client: Client,
    base_url: String,
}

impl HttpTargetClient {
    /// Build a client that authenticates every request with `api_key`
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| MigrationError::Config(format!("invalid API key: {}", e)))?;
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(HttpTargetClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url<R: Resource>(&self) -> String {
        format!("{}/api/{}", self.base_url, R::KIND.path())
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(MigrationError::remote(status.as_u16(), body))
    }
}

impl TargetClient for HttpTargetClient {
    fn query<R: Resource>(&self, query: &Query) -> Result<Vec<R>> {
        let url = self.collection_url::<R>();

        let mut params = vec![("limit".to_string(), query.limit.to_string())];
        if let Some(term) = &query.search {
            params.push(("search".to_string(), term.clone()));
        }
        params.extend(query.filters.iter().cloned());

        debug!(kind = %R::KIND, url = %url, "GET");
        let response = self.client.get(&url).query(&params).send()?;
        let set: ResultSet<R> = Self::check(response)?.json()?;

        Ok(set.results)
    }

    fn create<R: Resource>(&self, record: &R) -> Result<R> {
        let url = self.collection_url::<R>();

        debug!(kind = %R::KIND, key = %record.natural_key(), "POST");
        let response = self.client.post(&url).json(record).send()?;

        Ok(Self::check(response)?.json()?)
    }

    fn update<R: Resource>(&self, record: &R) -> Result<()> {
        let id = record.id().ok_or_else(|| MigrationError::MissingIdentifier {
            kind: R::KIND.to_string(),
        })?;
        let url = format!("{}/{}", self.collection_url::<R>(), id);

        debug!(kind = %R::KIND, id = %id, "PUT");
        let response = self.client.put(&url).json(record).send()?;
        Self::check(response)?;

        Ok(())
    }
}
