use clap::Parser;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use social_scraper::app;
use social_scraper::browser::BrowserConfig;
use social_scraper::config::{Config, LoggingSettings};
use social_scraper::export::{self, ExportFormat};
use social_scraper::helpers::parse_platform;
use social_scraper::models::{Platform, ScrapeResult};
use social_scraper::scraper::ScrapeError;
use std::error::Error;
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "social-scraper",
    version,
    about = "Scrape public metrics from YouTube, Instagram, TikTok and Facebook pages"
)]
struct Args {
    /// youtube, instagram, tiktok or facebook (yt, ig, tt, fb)
    #[arg(short, long, value_parser = parse_platform_arg)]
    platform: Option<Platform>,

    /// Profile, channel, post or video link
    #[arg(short, long)]
    url: Option<String>,

    /// Export format, repeat for both
    #[arg(short, long, value_enum)]
    export: Vec<ExportFormat>,

    /// Directory for exported files
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Scrape a saved HTML page instead of launching Chrome
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Config file, defaults to ./config.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    visible: bool,
}

fn parse_platform_arg(s: &str) -> Result<Platform, String> {
    parse_platform(s).ok_or_else(|| {
        format!(
            "unknown platform '{}', expected youtube, instagram, tiktok or facebook",
            s
        )
    })
}

/// Settings resolved from the config file and the command line
struct RunOptions {
    browser: BrowserConfig,
    snapshot: Option<PathBuf>,
    output_dir: PathBuf,
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load(),
    };
    init_logging(&config.logging)?;

    let mut browser = config.browser.to_browser_config();
    if args.visible {
        browser.headless = false;
    }

    let opts = RunOptions {
        browser,
        snapshot: args.snapshot.clone(),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| config.export.output_dir.clone()),
        json: args.json,
    };

    if let (Some(platform), Some(url)) = (args.platform, args.url.as_deref()) {
        let result = scrape(&opts, platform, url)?;
        return present(&opts, &result, &args.export);
    }

    if !std::io::stdin().is_terminal() {
        return Err("--platform and --url are required when input is not a terminal".into());
    }

    interactive(&opts, args)
}

/// Install env_logger: configured level, then RUST_LOG, into the log file or stderr
fn init_logging(settings: &LoggingSettings) -> Result<(), Box<dyn Error>> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&settings.level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if !settings.file.is_empty() {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.format_timestamp_secs().try_init()?;
    Ok(())
}

fn interactive(opts: &RunOptions, args: Args) -> Result<(), Box<dyn Error>> {
    let theme = ColorfulTheme::default();
    let mut platform_arg = args.platform;
    let mut url_arg = args.url;

    println!("Social media scraper. Press Ctrl+C to quit.");

    loop {
        let platform = match platform_arg.take() {
            Some(platform) => platform,
            None => {
                let names: Vec<&str> = Platform::ALL.iter().map(|p| p.name()).collect();
                let idx = Select::with_theme(&theme)
                    .with_prompt("Platform")
                    .items(&names)
                    .default(0)
                    .interact()?;
                Platform::ALL[idx]
            }
        };

        let url = match url_arg.take() {
            Some(url) => url,
            None => Input::<String>::with_theme(&theme)
                .with_prompt(format!("{} link", platform))
                .interact_text()?,
        };

        match scrape(opts, platform, &url) {
            Ok(result) => {
                let formats = if args.export.is_empty() {
                    pick_formats(&theme)?
                } else {
                    args.export.clone()
                };
                if let Err(e) = present(opts, &result, &formats) {
                    log::error!("{}", e);
                    eprintln!("error: {}", e);
                }
            }
            Err(e) => {
                log::error!("{}", e);
                eprintln!("error: {}", e);
            }
        }

        let again = Confirm::with_theme(&theme)
            .with_prompt("Scrape another link?")
            .default(true)
            .interact()?;
        if !again {
            return Ok(());
        }
    }
}

fn pick_formats(theme: &ColorfulTheme) -> Result<Vec<ExportFormat>, Box<dyn Error>> {
    let chosen = MultiSelect::with_theme(theme)
        .with_prompt("Export as (space to toggle, enter to skip)")
        .items(&ExportFormat::ALL)
        .interact()?;
    Ok(chosen.into_iter().map(|i| ExportFormat::ALL[i]).collect())
}

fn scrape(opts: &RunOptions, platform: Platform, url: &str) -> Result<ScrapeResult, ScrapeError> {
    let target = app::prepare(platform, url)?;
    let snapshot = opts.snapshot.as_deref();

    let spinner = spinner(format!("Scraping {} {}...", platform, target.label));
    let result = app::open_session(snapshot, &opts.browser)
        .and_then(|s| app::run(&target, s, &opts.browser, snapshot.is_none()));
    spinner.finish_and_clear();

    result
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn present(
    opts: &RunOptions,
    result: &ScrapeResult,
    formats: &[ExportFormat],
) -> Result<(), Box<dyn Error>> {
    if opts.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", app::render_table(result));
    }

    let missing = result.missing();
    if !missing.is_empty() {
        println!("Not available: {}", missing.join(", "));
    }

    for format in formats {
        let path = export::write_to_dir(result, *format, &opts.output_dir)?;
        println!("Saved {}", path.display());
    }
    Ok(())
}
