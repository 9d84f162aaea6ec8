use std::path::Path;

use anyhow::{bail, Context as _, Result};
use cerita_api::model::post::Post;
use cerita_api::PostSource;
use maud::{html, PreEscaped};
use tokio::fs;
use tracing::info;
use url::Url;

use crate::helper::ctx::Context;
use crate::helper::utils::open_site;
use crate::utils::detail_url;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Builds a sitemap with the home page followed by one entry per post.
pub fn render_sitemap(site_url: &str, detail_path: &str, posts: &[Post], lastmod: &str) -> String {
    let site_url = site_url.trim_end_matches('/');
    let home = format!("{site_url}/");
    let pages = std::iter::once(home).chain(
        posts
            .iter()
            .map(|post| format!("{site_url}/{}", detail_url(detail_path, &post.id))),
    );

    html! {
        (PreEscaped(XML_DECLARATION))
        urlset xmlns=(SITEMAP_NS) {
            @for page in pages {
                url {
                    loc { (page) }
                    lastmod { (lastmod) }
                }
            }
        }
    }
    .into_string()
}

/// Allows everything and points crawlers at `sitemap_url`.
pub fn render_robots(site_url: &str, sitemap_url: &str) -> String {
    let host = Url::parse(site_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
        .unwrap_or_else(|| site_url.to_owned());
    format!("# robots.txt for {host}\nUser-agent: *\nAllow: /\n\nSitemap: {sitemap_url}\n")
}

/// Writes the sitemap to `output`, and a `robots.txt` pointing at it to
/// `robots` when given. Returns the url count.
pub async fn write_sitemap(
    ctx: impl Context<'_>,
    output: &Path,
    robots: Option<&Path>,
) -> Result<usize> {
    let site_url = match ctx.site_url() {
        Some(url) => url,
        None if ctx.base().starts_with("http://") || ctx.base().starts_with("https://") => {
            ctx.base()
        }
        None => bail!("--site-url is required when the site is a local directory"),
    };

    let site = open_site(ctx)?;
    let posts = site.fetch_posts().await?;
    let lastmod = chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S+00:00")
        .to_string();

    let xml = render_sitemap(site_url, ctx.detail_path(), &posts, &lastmod);
    fs::write(output, xml)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("Sitemap with {} urls written to {}", posts.len() + 1, output.display());

    if let Some(robots) = robots {
        let file_name = output
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let sitemap_url = format!("{}/{file_name}", site_url.trim_end_matches('/'));
        fs::write(robots, render_robots(site_url, &sitemap_url))
            .await
            .with_context(|| format!("failed to write {}", robots.display()))?;
        info!("robots.txt written to {}", robots.display());
    }

    Ok(posts.len() + 1)
}

#[cfg(test)]
mod tests {
    use cerita_api::model::post::PostId;

    use super::*;

    #[test]
    fn lists_home_then_posts() {
        let posts = vec![
            Post {
                id: PostId::from(1i64),
                ..Default::default()
            },
            Post {
                id: PostId::from("a&b"),
                ..Default::default()
            },
        ];
        let xml = render_sitemap(
            "https://kisahcandu.github.io/",
            "post.html",
            &posts,
            "2024-05-01T00:00:00+00:00",
        );

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert_eq!(xml.matches("<url>").count(), 3);
        let home = xml.find("<loc>https://kisahcandu.github.io/</loc>").expect("home");
        let first = xml
            .find("<loc>https://kisahcandu.github.io/post.html?id=1</loc>")
            .expect("first post");
        assert!(home < first);
        assert!(xml.contains("post.html?id=a%26b"));
        assert!(xml.contains("<lastmod>2024-05-01T00:00:00+00:00</lastmod>"));
        assert!(xml.contains("<url><loc>https://kisahcandu.github.io/</loc><lastmod>"));
        assert!(xml.ends_with("</urlset>"));
    }

    #[test]
    fn site_url_is_escaped_in_sitemap() {
        let xml = render_sitemap("https://a.example/?x=1&y=2", "post.html", &[], "now");
        assert!(xml.contains("<loc>https://a.example/?x=1&amp;y=2/</loc>"));
    }

    #[test]
    fn robots_points_at_sitemap() {
        assert_eq!(
            render_robots(
                "https://kisahcandu.github.io/",
                "https://kisahcandu.github.io/sitemap.xml"
            ),
            "# robots.txt for kisahcandu.github.io\n\
             User-agent: *\n\
             Allow: /\n\
             \n\
             Sitemap: https://kisahcandu.github.io/sitemap.xml\n"
        );
    }
}
