use clap::{Parser, Subcommand};
use gallery_lightbox::config::{self, LightboxConfig};
use gallery_lightbox::lightbox::Controller;
use gallery_lightbox::surface::HtmlSurface;
use gallery_lightbox::{check, markup, output, session};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

#[derive(Parser)]
#[command(name = "gallery-lightbox")]
#[command(about = "Scan, replay and check gallery lightbox pages")]
#[command(long_about = "\
Scan, replay and check gallery lightbox pages

Reads rendered HTML pages of a static site and runs the gallery lightbox and
program card behaviors against them, without a browser.

Expected gallery markup (selectors configurable in lightbox.toml):

  <div class=\"gallery-item\">
    <img src=\"...\" alt=\"...\">
    <h4>Title</h4>
    <p>Description</p>
  </div>

  <div id=\"lightbox\">
    <span class=\"lightbox-close\">, <button id=\"lightboxPrev\">,
    <img id=\"lightboxImg\">, <div id=\"lightboxCaption\">,
    <button id=\"lightboxNext\">
  </div>

Replay scripts hold one event per line: click N, backdrop, image, close,
prev, next, key NAME, expand N, card-key N NAME.

Run 'gallery-lightbox gen-config' to print a documented lightbox.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: lightbox.toml in the current directory, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every dispatched event
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the gallery records, overlay anchors and cards of a page
    Scan {
        page: PathBuf,
        /// Print the scan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay a script of user events against a page
    Replay {
        page: PathBuf,
        #[arg(long)]
        script: PathBuf,
        /// Also print the final overlay markup
        #[arg(long)]
        show_overlay: bool,
    },
    /// Print the overlay fragment with record N open
    Overlay {
        page: PathBuf,
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Check every page of a built site for broken lightbox wiring
    Check { site: PathBuf },
    /// Print a stock lightbox.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let resolve_config = || load_config(cli.config.as_deref());

    match cli.command {
        Command::Scan { page, json } => {
            let config = resolve_config()?;
            let html = std::fs::read_to_string(&page)?;
            let scanned = markup::scan_page(&html, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&scanned)?);
            } else {
                output::print_scan_output(&scanned);
            }
        }
        Command::Replay {
            page,
            script,
            show_overlay,
        } => {
            let config = resolve_config()?;
            let (session, reports) = session::replay_files(&page, &script, &config)?;
            output::print_replay_output(&reports);
            if show_overlay {
                let surface = session.controller().surface();
                println!();
                println!("{}", surface.to_markup().into_string());
                println!("body style: {:?}", surface.body_style());
            }
        }
        Command::Overlay { page, index } => {
            let config = resolve_config()?;
            let html = std::fs::read_to_string(&page)?;
            let scanned = markup::scan_page(&html, &config)?;
            let surface = HtmlSurface::with_anchors(&config.overlay, &scanned.anchors);
            let mut controller = Controller::mount(&scanned, surface);
            if !controller.open(index) {
                return Err(format!(
                    "cannot open record {index}: page has {} gallery images",
                    controller.state().gallery().len()
                )
                .into());
            }
            println!("{}", controller.surface().to_markup().into_string());
        }
        Command::Check { site } => {
            let config = resolve_config()?;
            println!("==> Checking {}", site.display());
            let reports = check::check_site(&site, &config)?;
            output::print_check_output(&reports);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for `--json` and markup output.
fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(verbose, rust_log.as_deref())?)
        .init();
    Ok(())
}

/// `RUST_LOG` wins when set; otherwise this crate logs at info, or debug
/// with `--verbose`.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> Result<EnvFilter, ParseError> {
    match rust_log.map(str::trim).filter(|spec| !spec.is_empty()) {
        Some(spec) => EnvFilter::try_new(spec),
        None => {
            let level = if verbose { "debug" } else { "info" };
            EnvFilter::try_new(format!("gallery_lightbox={level}"))
        }
    }
}

/// Explicit `--config` file, else `lightbox.toml` in the working directory.
fn load_config(path: Option<&Path>) -> Result<LightboxConfig, config::ConfigError> {
    match path {
        Some(path) => config::load_config_file(path),
        None => config::load_config(Path::new(".")),
    }
}
