use chrono::Datelike;
use clap::{Parser, Subcommand};
use postdex::history::{Git, History, NoHistory};
use postdex::types::BuildContext;
use postdex::{byline, catalog, config, generate, news, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "postdex")]
#[command(about = "Regenerates the index pages of a pre-rendered HTML blog")]
#[command(long_about = "\
Regenerates the index pages of a pre-rendered HTML blog

Post pages are the data source. Every posts/**/index.html that declares a
title and a date in its meta tags becomes a post:

  <meta name=\"post:title\" content=\"Prompt injection in CI agents\" />
  <meta name=\"post:date\" content=\"2026-01-14\" />
  <meta name=\"post:category\" content=\"security\" />        (optional)
  <meta name=\"post:categoryLabel\" content=\"Security\" />   (optional)

Generated files:

  website/
  ├── index.html                   # Home: top posts + latest
  ├── posts/index.html             # Listing, page 1
  ├── posts/page/<n>/index.html    # Listing, pages 2..N
  ├── categories/index.html        # Category index
  ├── categories/<slug>/index.html # One page per category
  ├── assets/search-index.json     # Client-side search index
  └── sitemap.xml

Last-modified dates come from git history when available.

Run 'postdex gen-config' to generate a documented postdex.toml.")]
#[command(version)]
struct Cli {
    /// Site directory containing the post pages
    #[arg(long, default_value = "website", global = true)]
    site: PathBuf,

    /// Config file [default: postdex.toml next to the site directory]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Copyright year in the page footer [default: current year]
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Do not query git; use declared post dates as last-modified dates
    #[arg(long, global = true)]
    no_git: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate home, listing, category pages, search index and sitemap
    Build,
    /// Print the post catalog without writing anything
    Check,
    /// Add author meta tags and bylines to existing post pages
    Bylines {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Render the news log page from recent commits and news posts
    NewsLog,
    /// Print a stock postdex.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if matches!(cli.command, Command::GenConfig) {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| default_config_path(&cli.site));
    let site_config = config::load_config(&config_path)?;
    let ctx = BuildContext {
        year: cli.year.unwrap_or_else(|| chrono::Local::now().year()),
    };
    let history: Box<dyn History> = if cli.no_git {
        Box::new(NoHistory)
    } else {
        Box::new(Git::new("."))
    };

    match cli.command {
        Command::Build => {
            let report = generate::build(&cli.site, &site_config, ctx, history.as_ref())?;
            output::print_build_output(&report);
        }
        Command::Check => {
            let catalog = catalog::scan(&cli.site, &site_config, history.as_ref())?;
            output::print_catalog_output(&catalog, &cli.site);
        }
        Command::Bylines { dry_run } => {
            let report = byline::migrate(&cli.site, &site_config, dry_run)?;
            output::print_byline_output(&report, &cli.site);
        }
        Command::NewsLog => {
            let catalog = catalog::scan(&cli.site, &site_config, history.as_ref())?;
            let report = news::build_news_log(
                &cli.site,
                &site_config,
                ctx,
                &catalog.posts,
                history.as_ref(),
            )?;
            output::print_news_output(&report, &cli.site);
        }
        // printed before config loading
        Command::GenConfig => {}
    }

    Ok(())
}

/// `postdex.toml` in the directory that contains the site directory.
fn default_config_path(site: &Path) -> PathBuf {
    match site.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(config::CONFIG_FILE_NAME),
        _ => PathBuf::from(config::CONFIG_FILE_NAME),
    }
}
