use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use spdlog::{error, info, warn};

use slag::config::{open_config, Overrides, SiteOptions};
use slag::logger::configure_logger;
use slag::site::build_site;
use slag::view::list_renderer::ListRenderer;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL prepended to every link
    #[arg(short = 'u', long)]
    baseurl: Option<String>,

    /// Directory to write the rendered HTML to
    #[arg(short, long)]
    target: Option<PathBuf>,

    /// Additional directory to copy into the target (repeatable)
    #[arg(short, long)]
    include: Vec<PathBuf>,

    /// Number of posts per page
    #[arg(short = 's', long = "pagesize")]
    page_size: Option<usize>,

    /// Number of paragraphs of each post shown in lists
    #[arg(short = 'g', long = "maxparagraphs")]
    max_paragraphs: Option<usize>,

    /// Config file to load. Defaults to slag.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Repositories to publish
    paths: Vec<PathBuf>,
}

impl Args {
    fn overrides(self) -> Overrides {
        Overrides {
            baseurl: self.baseurl,
            target: self.target,
            include: self.include,
            pagesize: self.page_size,
            maxparagraphs: self.max_paragraphs,
            paths: self.paths,
        }
    }
}

fn run(args: Args) -> Result<()> {
    let (config, config_path) = open_config(args.config.as_deref())?;

    if let Err(err) = configure_logger(config.log.as_ref()) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match config_path {
        Some(path) => info!("Read configuration from {}", path.display()),
        None => info!("No configuration file found, using defaults"),
    }

    let cur_dir = env::current_dir().context("Cannot determine the current directory")?;
    let options = SiteOptions::resolve(&config, args.overrides(), &cur_dir);

    let renderer = ListRenderer::bundled(&options.baseurl, options.max_paragraphs)?;
    let report = build_site(&options, &renderer)?;

    if report.skipped_repositories > 0 {
        warn!("{} repositories were skipped", report.skipped_repositories);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
