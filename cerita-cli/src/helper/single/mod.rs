use std::io::Write;

use anyhow::Result;
use tracing::info;

use crate::helper::ctx::Context;
use crate::helper::utils::open_site;
use crate::stdio::print_detail;
use crate::utils::extract_id;
use crate::view::{DetailView, MemoryDocument};

/// Loads the detail page for `id` and prints it.
pub async fn show_post(
    ctx: impl Context<'_>,
    id: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let site = open_site(ctx)?;
    let view = DetailView::new(ctx.detail_path());
    let mut doc = MemoryDocument::new();
    let result = view.load_post(&site, id, &mut doc).await;
    print_detail(out, &doc)?;
    result.map(|_| ())
}

/// Opens the detail page a navigation url points at.
pub async fn follow(ctx: impl Context<'_>, url: &str, out: &mut impl Write) -> Result<()> {
    info!("Opening {url}");
    let id = extract_id(url);
    show_post(ctx, id.as_deref(), out).await
}

/// The detail page's random button: an independent fetch, then the jump.
pub async fn random_post(ctx: impl Context<'_>, out: &mut impl Write) -> Result<()> {
    let site = open_site(ctx)?;
    let view = DetailView::new(ctx.detail_path());
    let mut doc = MemoryDocument::new();

    let mut rng = rand::thread_rng();
    let target = view.random_jump(&site, &mut rng, &mut doc).await?;
    let Some(url) = target else {
        writeln!(out, "Belum ada cerita.")?;
        return Ok(());
    };
    follow(ctx, &url, out).await
}
