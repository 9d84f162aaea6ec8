use std::{io, path::PathBuf, sync::atomic::Ordering};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cerita_cli::{
    helper::{
        ctx::{Args, DETAIL_PATH},
        list, single, sitemap,
    },
    DONE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Static story browser")]
struct Cli {
    /// Site root: http(s) url or local directory
    #[arg(long, short = 'b', global = true, default_value = ".")]
    base: String,
    #[arg(long, global = true, default_value = cerita_api::POSTS_PATH)]
    posts_path: String,
    #[arg(long, global = true, default_value = DETAIL_PATH)]
    detail_path: String,
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one page of the story list
    List {
        #[arg(long, short = 'p', default_value_t = 1)]
        page: usize,
    },
    /// Show a single story
    Post {
        id: Option<String>,
        /// Detail page url to read the id from, e.g. post.html?id=7
        #[arg(long, conflicts_with = "id")]
        url: Option<String>,
    },
    /// Jump to a random story
    Random {
        /// Use the list page's button instead of the story page's
        #[arg(long)]
        from_list: bool,
    },
    /// Page through the list interactively
    Browse,
    /// Write sitemap.xml for the site
    Sitemap {
        #[arg(long)]
        site_url: Option<String>,
        #[arg(long, short = 'o', default_value = "sitemap.xml")]
        output: PathBuf,
        /// Also write a robots.txt pointing at the sitemap
        #[arg(long)]
        robots: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_writer(io::stderr)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(default_level.into())
                        .from_env_lossy(),
                ),
        )
        .init();

    info!("Started with arguments: {cli:?}");
    let Cli {
        base,
        posts_path,
        detail_path,
        command,
        ..
    } = cli;

    let site_url = match &command {
        Command::Sitemap { site_url, .. } => site_url.clone(),
        _ => None,
    };
    let args = Args::builder()
        .base(base)
        .posts_path(posts_path)
        .detail_path(detail_path)
        .site_url(site_url)
        .build()?;

    let mut out = io::stdout().lock();
    match command {
        Command::List { page } => list::show_page(&args, page, &mut out).await?,
        Command::Post { id, url } => match url {
            Some(url) => single::follow(&args, &url, &mut out).await?,
            None => single::show_post(&args, id.as_deref(), &mut out).await?,
        },
        Command::Random { from_list: true } => list::random_from_list(&args, &mut out).await?,
        Command::Random { from_list: false } => single::random_post(&args, &mut out).await?,
        Command::Browse => {
            ctrlc::set_handler(move || {
                info!("Signal handler called");
                if DONE.swap(true, Ordering::Relaxed) {
                    std::process::exit(130);
                }
            })?;
            let input = BufReader::new(tokio::io::stdin());
            list::browse(&args, input, &mut out).await?
        }
        Command::Sitemap { output, robots, .. } => {
            sitemap::write_sitemap(&args, &output, robots.as_deref()).await?;
        }
    }

    info!("Task Exit");

    Ok(())
}
