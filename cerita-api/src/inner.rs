use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::model::post::{collect_posts, Post};

/// Default location of the collection, relative to the site root.
pub const POSTS_PATH: &str = "data/posts.json";

#[derive(Debug, Clone)]
pub struct API {
    client: reqwest::Client,
    base_url: Url,
    posts_path: String,
}

impl API {
    /// Creates a client for a site rooted at `base_url`.
    ///
    /// Example: https://kisahcandu.github.io, http://127.0.0.1:8000/miniapp/
    pub fn try_with_base_url(base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| anyhow!("invalid base url {base_url}: {e}"))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = reqwest::Client::builder().build()?;
        Ok(API {
            client,
            base_url,
            posts_path: POSTS_PATH.into(),
        })
    }

    pub fn with_posts_path(mut self, posts_path: impl Into<String>) -> Self {
        self.posts_path = posts_path.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn posts_url(&self) -> Result<Url> {
        self.base_url
            .join(self.posts_path.trim_start_matches('/'))
            .map_err(|e| anyhow!("invalid posts path {}: {e}", self.posts_path))
    }

    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        let url = self.posts_url()?;
        let resp = self.client.get(url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("GET {} failed with status {}", url, resp.status()));
        }
        let records: Vec<Value> = resp
            .json()
            .await
            .with_context(|| format!("failed to parse posts from {url}"))?;
        let posts = collect_posts(records);
        debug!("fetched {} posts from {url}", posts.len());
        Ok(posts)
    }
}
