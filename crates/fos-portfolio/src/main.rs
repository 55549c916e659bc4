//! fOS Portfolio - Main Entry Point
//!
//! Builds the portfolio page, replays a sequence of scroll frames and writes
//! the resulting HTML.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fos_portfolio::{CitationsSection, PortfolioPage, SiteConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Parser)]
#[command(name = "fos-portfolio", version, about = "Render the portfolio page")]
struct Args {
    /// Site configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Publication list (JSON array of citations)
    #[arg(long)]
    publications: Option<PathBuf>,

    /// Scroll offsets to replay, one frame each
    #[arg(long = "scroll", value_name = "OFFSET")]
    scroll: Vec<f64>,

    /// Output file; stdout when omitted
    #[arg(long, short)]
    out: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("loading site config {}", path.display()))?,
        None => SiteConfig::default(),
    };
    let publications = match &args.publications {
        Some(path) => CitationsSection::load(path)
            .with_context(|| format!("loading publications {}", path.display()))?,
        None => CitationsSection::default(),
    };

    let mut page = PortfolioPage::portfolio(&config, publications).context("building page")?;

    // First frame reports every section's starting intersection
    let frames = if args.scroll.is_empty() { vec![0.0] } else { args.scroll.clone() };
    for offset in frames {
        let painted = page.scroll_to(offset)?;
        tracing::info!(offset, painted, visible = ?page.visible_sections(), "scrolled");
    }

    let html = page.to_html();
    page.unmount_all();

    match &args.out {
        Some(path) => std::fs::write(path, html)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{html}"),
    }
    Ok(())
}
