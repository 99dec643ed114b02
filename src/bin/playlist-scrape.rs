use clap::Parser;
use playlist_scrape::{PlaylistResult, PlaylistScraper, ScraperConfig, TrackColumn};
use std::path::PathBuf;

/// Scrape a playlist page into JSON
#[derive(Parser)]
#[command(
    name = "playlist-scrape",
    about = "Scrape playlist metadata and its full track list",
    long_about = None
)]
struct Cli {
    /// Playlist URL, e.g. https://open.spotify.com/playlist/<id>
    url: String,

    /// Write the JSON result to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print only tracks START to END (1-based, inclusive), e.g. 10:15
    #[arg(long, value_parser = parse_range)]
    range: Option<(usize, usize)>,

    /// Print one track field per line: title, artist, album, duration, image_url or index
    #[arg(long)]
    column: Option<TrackColumn>,

    /// Show the browser window
    #[arg(long)]
    no_headless: bool,

    /// Show detailed debug information
    #[arg(long)]
    verbose: bool,
}

fn parse_range(s: &str) -> Result<(usize, usize), String> {
    let (start, end) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:END, got '{s}'"))?;
    let start = start.trim().parse().map_err(|e| format!("bad start: {e}"))?;
    let end = end.trim().parse().map_err(|e| format!("bad end: {e}"))?;
    Ok((start, end))
}

fn print_selection(result: &PlaylistResult, cli: &Cli) {
    if let Some((start, end)) = cli.range {
        for track in result.track_range(start, end) {
            println!("{track}");
        }
    }
    if let Some(column) = cli.column {
        for value in result.column(column) {
            println!("{value}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if !args.url.contains("/playlist/") {
        eprintln!("❌ Not a playlist URL: {}", args.url);
        std::process::exit(2);
    }

    let mut config = ScraperConfig::from_env();
    if args.no_headless {
        config.headless = false;
    }

    let http_client = http_client::native::NativeClient::new();
    let scraper = PlaylistScraper::with_chrome(Box::new(http_client), config)?;

    let result = match scraper.scrape_playlist(&args.url).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("❌ Scrape failed: {e}");
            std::process::exit(1);
        }
    };

    if args.range.is_some() || args.column.is_some() {
        print_selection(&result, &args);
        if args.output.is_none() {
            return Ok(());
        }
    }

    let json = result.to_json()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            eprintln!("✅ Saved {} tracks to {}", result.scraped_track_count, path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
