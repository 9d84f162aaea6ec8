use anyhow::Result;
use cerita_api::model::post::Post;
use cerita_api::PostSource;
use maud::{html, PreEscaped};
use rand::Rng;
use tracing::{debug, error, warn};

use super::{pick_random, Document, LOAD_FAILED, NEXT_BTN, PREV_BTN, STORY_LIST};
use crate::utils::detail_url;

pub const PAGE_SIZE: usize = 10;

/// Paginated list of every post, ten per page.
#[derive(Debug, Clone)]
pub struct ListView {
    current_page: usize,
    all_posts: Vec<Post>,
    detail_path: String,
}

impl ListView {
    pub fn new(detail_path: impl Into<String>) -> Self {
        ListView {
            current_page: 1,
            all_posts: Vec::new(),
            detail_path: detail_path.into(),
        }
    }

    /// Fetches the collection and renders the first page.
    ///
    /// A failed fetch leaves the load-failure message in the list.
    pub async fn load(
        source: &impl PostSource,
        detail_path: impl Into<String>,
        doc: &mut impl Document,
    ) -> Result<Self> {
        let mut view = Self::new(detail_path);
        match source.fetch_posts().await {
            Ok(posts) => {
                view.on_load(posts, doc);
                Ok(view)
            }
            Err(e) => {
                error!("failed to load posts: {e:#}");
                doc.set_text(STORY_LIST, LOAD_FAILED);
                Err(e)
            }
        }
    }

    pub fn on_load(&mut self, posts: Vec<Post>, doc: &mut impl Document) {
        debug!("loaded {} posts", posts.len());
        self.all_posts = posts;
        self.render_page(self.current_page, doc);
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn posts(&self) -> &[Post] {
        &self.all_posts
    }

    /// Posts shown on the current page.
    pub fn visible(&self) -> &[Post] {
        page_slice(&self.all_posts, self.current_page)
    }

    /// Detail page url for `post`.
    pub fn link(&self, post: &Post) -> String {
        detail_url(&self.detail_path, &post.id)
    }

    pub fn render_page(&self, page: usize, doc: &mut impl Document) {
        let end = page_start(page).saturating_add(PAGE_SIZE);

        // titles are trusted markup, same as post content
        let items = html! {
            @for post in page_slice(&self.all_posts, page) {
                div class="story" {
                    h2 { (PreEscaped(&post.title)) }
                    a href=(self.link(post)) { "📖 Baca Cerita" }
                }
            }
        };
        doc.set_html(STORY_LIST, &items.into_string());

        doc.set_disabled(PREV_BTN, page <= 1);
        doc.set_disabled(NEXT_BTN, end >= self.all_posts.len());
    }

    /// Returns whether the page changed.
    pub fn prev(&mut self, doc: &mut impl Document) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.current_page -= 1;
        self.render_page(self.current_page, doc);
        true
    }

    /// Returns whether the page changed.
    pub fn next(&mut self, doc: &mut impl Document) -> bool {
        if self.current_page.saturating_mul(PAGE_SIZE) >= self.all_posts.len() {
            return false;
        }
        self.current_page += 1;
        self.render_page(self.current_page, doc);
        true
    }

    /// Navigates to a random post's detail page; does nothing on an empty list.
    pub fn random<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        doc: &mut impl Document,
    ) -> Option<String> {
        let Some(post) = pick_random(&self.all_posts, rng) else {
            warn!("no stories available for a random pick");
            return None;
        };
        let url = self.link(post);
        doc.navigate(&url);
        Some(url)
    }
}

fn page_start(page: usize) -> usize {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE)
}

fn page_slice(posts: &[Post], page: usize) -> &[Post] {
    let start = page_start(page).min(posts.len());
    let end = start.saturating_add(PAGE_SIZE).min(posts.len());
    &posts[start..end]
}
