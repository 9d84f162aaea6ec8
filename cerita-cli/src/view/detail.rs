use anyhow::Result;
use cerita_api::model::post::Post;
use cerita_api::PostSource;
use rand::Rng;
use tracing::{debug, error, info, warn};

use super::{pick_random, Document, CONTENT, LOAD_FAILED, TITLE};
use crate::utils::detail_url;

pub const NOT_FOUND_TITLE: &str = "Cerita tidak ditemukan.";
pub const NOT_FOUND_BODY: &str = "<p>Ups, ID cerita tidak valid.</p>";

/// Single post page, addressed by the `id` query parameter.
#[derive(Debug, Clone)]
pub struct DetailView {
    detail_path: String,
}

impl DetailView {
    pub fn new(detail_path: impl Into<String>) -> Self {
        DetailView {
            detail_path: detail_path.into(),
        }
    }

    /// Fetches the collection and shows the post matching `id`.
    ///
    /// The fetch happens even when `id` is absent. `Ok(None)` means the
    /// not-found page was rendered.
    pub async fn load_post(
        &self,
        source: &impl PostSource,
        id: Option<&str>,
        doc: &mut impl Document,
    ) -> Result<Option<Post>> {
        let posts = match source.fetch_posts().await {
            Ok(posts) => posts,
            Err(e) => {
                error!("failed to load posts: {e:#}");
                doc.set_text(TITLE, LOAD_FAILED);
                doc.set_html(CONTENT, "");
                return Err(e);
            }
        };
        Ok(self.show(&posts, id, doc).cloned())
    }

    /// Renders the first post whose id matches, or the fallback page.
    pub fn show<'a>(
        &self,
        posts: &'a [Post],
        id: Option<&str>,
        doc: &mut impl Document,
    ) -> Option<&'a Post> {
        let found = id.and_then(|id| posts.iter().find(|post| post.id.matches(id)));
        match found {
            Some(post) => {
                debug!("showing post {}", post.id);
                doc.set_text(TITLE, &post.title);
                doc.set_html(CONTENT, &post.content);
            }
            None => {
                info!("post {id:?} not found among {} posts", posts.len());
                doc.set_text(TITLE, NOT_FOUND_TITLE);
                doc.set_html(CONTENT, NOT_FOUND_BODY);
            }
        }
        found
    }

    /// Fetches the collection on its own and navigates to a random post.
    pub async fn random_jump<R: Rng + ?Sized>(
        &self,
        source: &impl PostSource,
        rng: &mut R,
        doc: &mut impl Document,
    ) -> Result<Option<String>> {
        let posts = match source.fetch_posts().await {
            Ok(posts) => posts,
            Err(e) => {
                error!("failed to load posts for a random pick: {e:#}");
                doc.set_text(TITLE, LOAD_FAILED);
                doc.set_html(CONTENT, "");
                return Err(e);
            }
        };
        let Some(post) = pick_random(&posts, rng) else {
            warn!("no stories available for a random pick");
            return Ok(None);
        };
        let url = detail_url(&self.detail_path, &post.id);
        doc.navigate(&url);
        Ok(Some(url))
    }
}
