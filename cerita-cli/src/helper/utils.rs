use anyhow::{anyhow, Result};
use tracing::debug;

use cerita_api::Site;

use crate::helper::ctx;

pub fn open_site<'a>(ctx: impl ctx::Context<'a>) -> Result<Site> {
    let site = Site::from_base(ctx.base(), ctx.posts_path())
        .map_err(|e| anyhow!("failed to open site {}: {e}", ctx.base()))?;
    debug!("site: {site:?}");
    Ok(site)
}
