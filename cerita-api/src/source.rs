use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::inner::POSTS_PATH;
use crate::model::post::{collect_posts, Post};
use crate::API;

/// Something that can hand over the full post collection.
///
/// Every call is an independent fetch; implementors must not cache.
#[allow(async_fn_in_trait)]
pub trait PostSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>>;
}

impl PostSource for API {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        self.get_posts().await
    }
}

impl<T: PostSource + ?Sized> PostSource for &T {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        (**self).fetch_posts().await
    }
}

/// An already loaded collection.
impl PostSource for [Post] {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        Ok(self.to_vec())
    }
}

impl PostSource for Vec<Post> {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        Ok(self.clone())
    }
}

/// A static site checked out on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticDir {
    root: PathBuf,
    posts_path: String,
}

impl StaticDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        StaticDir {
            root: root.into(),
            posts_path: POSTS_PATH.into(),
        }
    }

    pub fn with_posts_path(mut self, posts_path: impl Into<String>) -> Self {
        self.posts_path = posts_path.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn posts_file(&self) -> PathBuf {
        self.root.join(self.posts_path.trim_start_matches('/'))
    }
}

impl PostSource for StaticDir {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let path = self.posts_file();
        let raw = fs::read(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let records: Vec<Value> = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse posts from {}", path.display()))?;
        let posts = collect_posts(records);
        debug!("read {} posts from {}", posts.len(), path.display());
        Ok(posts)
    }
}

/// Where a site lives: served over HTTP or sitting in a directory.
#[derive(Debug, Clone)]
pub enum Site {
    Remote(API),
    Local(StaticDir),
}

impl Site {
    /// `http://` and `https://` bases are fetched, anything else is a directory.
    pub fn from_base(base: &str, posts_path: &str) -> Result<Self> {
        if base.starts_with("http://") || base.starts_with("https://") {
            Ok(Site::Remote(
                API::try_with_base_url(base)?.with_posts_path(posts_path),
            ))
        } else {
            Ok(Site::Local(StaticDir::new(base).with_posts_path(posts_path)))
        }
    }
}

impl PostSource for Site {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        match self {
            Site::Remote(api) => api.fetch_posts().await,
            Site::Local(dir) => dir.fetch_posts().await,
        }
    }
}
