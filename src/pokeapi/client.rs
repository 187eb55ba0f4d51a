//! Cached PokeAPI client
//!
//! Looks responses up in the [`Cache`] first and only goes to the network on
//! a miss, writing the fresh body back before returning it.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::Cache;
use crate::error::Result;
use crate::models::{LocationArea, LocationPage, Pokemon};
use crate::pokeapi::Fetcher;

/// PokeAPI client with populate-on-miss caching.
#[derive(Clone)]
pub struct PokeClient {
    cache: Cache,
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
}

impl PokeClient {
    pub fn new(cache: Cache, fetcher: Arc<dyn Fetcher>, base_url: impl Into<String>) -> Self {
        Self {
            cache,
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// URL of the first page of the location-area catalog.
    pub fn first_page_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    // == Get Resource ==
    /// Returns the body for `url`, from the cache when possible.
    ///
    /// On a miss the body is fetched and added to the cache before being
    /// returned. Failed fetches leave the cache untouched.
    pub async fn get_resource(&self, url: &str) -> Result<Bytes> {
        if let Some(body) = self.cache.get(url) {
            debug!("Serving {} from cache", url);
            return Ok(body);
        }

        let body = self.fetcher.fetch(url).await?;
        self.cache.add(url, body.clone());
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get_resource(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// One page of the location-area catalog at `url`.
    pub async fn location_page(&self, url: &str) -> Result<LocationPage> {
        self.get_json(url).await
    }

    /// Detail record for the named location area.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.get_json(&url).await
    }

    /// Detail record for the named pokemon.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.get_json(&url).await
    }
}

impl std::fmt::Debug for PokeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokeClient")
            .field("base_url", &self.base_url)
            .field("cache", &self.cache)
            .finish()
    }
}
