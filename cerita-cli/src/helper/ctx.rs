use derive_builder::Builder;

use cerita_api::POSTS_PATH;

pub const DETAIL_PATH: &str = "post.html";

pub trait Context<'a>: Copy {
    /// Site root: an http(s) base url or a local directory.
    ///
    /// Example: https://kisahcandu.github.io, ./public
    fn base(&self) -> &'a str;
    /// Collection location relative to `base`.
    fn posts_path(&self) -> &'a str;
    /// Page that renders a single post.
    fn detail_path(&self) -> &'a str;
    /// Public url of the site, used when absolute links are needed.
    fn site_url(&self) -> Option<&'a str>;
}

#[derive(Clone, Builder, PartialEq, Eq, Default, Debug)]
pub struct Args {
    #[builder(setter(into))]
    base: String,
    #[builder(setter(into), default = "String::from(POSTS_PATH)")]
    posts_path: String,
    #[builder(setter(into), default = "String::from(DETAIL_PATH)")]
    detail_path: String,
    #[builder(default)]
    site_url: Option<String>,
}

impl Args {
    pub fn builder() -> ArgsBuilder {
        ArgsBuilder::default()
    }
}

impl<'a> Context<'a> for &'a Args {
    fn base(&self) -> &'a str {
        &self.base
    }

    fn posts_path(&self) -> &'a str {
        &self.posts_path
    }

    fn detail_path(&self) -> &'a str {
        &self.detail_path
    }

    fn site_url(&self) -> Option<&'a str> {
        self.site_url.as_deref()
    }
}
