use std::io::Write;
use std::sync::atomic::Ordering;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::helper::ctx::Context;
use crate::helper::single;
use crate::helper::utils::open_site;
use crate::stdio::print_list;
use crate::view::{ListView, MemoryDocument, STORY_LIST};
use crate::DONE;

/// Loads the list page and steps forward to `page`.
pub async fn show_page(
    ctx: impl Context<'_>,
    page: usize,
    out: &mut impl Write,
) -> Result<()> {
    let site = open_site(ctx)?;
    let mut doc = MemoryDocument::new();
    let mut view = match ListView::load(&site, ctx.detail_path(), &mut doc).await {
        Ok(view) => view,
        Err(e) => {
            writeln!(out, "{}", doc.text(STORY_LIST).unwrap_or_default())?;
            return Err(e);
        }
    };

    while view.current_page() < page {
        if !view.next(&mut doc) {
            warn!(
                "page {page} is past the last page, stopped at {}",
                view.current_page()
            );
            break;
        }
    }
    print_list(out, &view, &doc)?;
    Ok(())
}

/// The list page's random button, followed through to the detail page.
pub async fn random_from_list(ctx: impl Context<'_>, out: &mut impl Write) -> Result<()> {
    let site = open_site(ctx)?;
    let mut doc = MemoryDocument::new();
    let view = ListView::load(&site, ctx.detail_path(), &mut doc).await?;

    let target = view.random(&mut rand::thread_rng(), &mut doc);
    match target {
        Some(url) => single::follow(ctx, &url, out).await,
        None => {
            writeln!(out, "Belum ada cerita.")?;
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Prev,
    Next,
    Random,
    Open(usize),
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "p" | "prev" => Some(Command::Prev),
        "n" | "next" => Some(Command::Next),
        "r" | "random" => Some(Command::Random),
        "q" | "quit" => Some(Command::Quit),
        other => other.parse().ok().filter(|&n| n > 0).map(Command::Open),
    }
}

/// Interactive list page.
///
/// Reads one command per line until `q`, end of input or Ctrl-C.
pub async fn browse(
    ctx: impl Context<'_>,
    mut input: impl AsyncBufRead + Unpin,
    out: &mut impl Write,
) -> Result<()> {
    let site = open_site(ctx)?;
    let mut doc = MemoryDocument::new();
    let mut view = ListView::load(&site, ctx.detail_path(), &mut doc).await?;
    print_list(out, &view, &doc)?;

    let mut line = String::new();
    loop {
        if DONE.load(Ordering::Relaxed) {
            info!("Interrupted, leaving browser");
            break;
        }
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            break;
        }
        let Some(command) = parse_command(&line) else {
            writeln!(out, "Perintah tidak dikenal: {}", line.trim())?;
            continue;
        };
        debug!("command: {command:?}");

        match command {
            Command::Prev => {
                view.prev(&mut doc);
                print_list(out, &view, &doc)?;
            }
            Command::Next => {
                view.next(&mut doc);
                print_list(out, &view, &doc)?;
            }
            Command::Random => {
                let target = view.random(&mut rand::thread_rng(), &mut doc);
                match target {
                    Some(url) => single::follow(ctx, &url, out).await?,
                    None => writeln!(out, "Belum ada cerita.")?,
                }
            }
            Command::Open(n) => match view.visible().get(n - 1) {
                Some(post) => single::follow(ctx, &view.link(post), out).await?,
                None => writeln!(out, "Tidak ada cerita nomor {n} di halaman ini.")?,
            },
            Command::Quit => break,
        }
    }
    Ok(())
}
