//! The two page controllers and the document they draw into.

use cerita_api::model::post::Post;
use rand::seq::SliceRandom;
use rand::Rng;

pub mod detail;
pub mod document;
pub mod list;

pub use detail::DetailView;
pub use document::{Document, MemoryDocument};
pub use list::{ListView, PAGE_SIZE};

pub const STORY_LIST: &str = "story-list";
pub const PREV_BTN: &str = "prev-btn";
pub const NEXT_BTN: &str = "next-btn";
pub const RANDOM_BTN: &str = "random-btn";
pub const TITLE: &str = "title";
pub const CONTENT: &str = "content";

/// Shown in place of a view whose collection could not be loaded.
pub const LOAD_FAILED: &str = "Gagal memuat cerita.";

/// Uniform pick; `None` on an empty collection.
pub fn pick_random<'a, R: Rng + ?Sized>(posts: &'a [Post], rng: &mut R) -> Option<&'a Post> {
    posts.choose(rng)
}
