use crate::{
    error::FetchError,
    http::response::{self, ResourcePayload},
};
use std::time::Duration;
use tracing::debug;

/// Thin client for an id-addressed HTTP resource (`GET {base_url}/{id}`).
///
/// Cloning is cheap and clones share one connection pool, so a single
/// instance can serve every in-flight fetch.
#[derive(Clone, Debug)]
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ResourceClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(base_url));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn url_for(&self, id: i64) -> String {
        format!("{}/{id}", self.base_url)
    }

    pub async fn fetch(&self, id: i64) -> Result<ResourcePayload, FetchError> {
        let url = self.url_for(id);
        debug!(id, url = %url, "Fetching resource");

        let response = self.http.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        response::classify(status, &url, &body)
    }
}
