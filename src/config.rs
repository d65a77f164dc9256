use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

pub const CFG_FILE_NAME: &str = "slag.toml";
pub const DEFAULT_PAGE_SIZE: usize = 16;
pub const DEFAULT_MAX_PARAGRAPHS: usize = 1;

#[derive(Deserialize, Debug, Clone)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default)]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RssFeed {
    pub title: String,
    pub site_url: String,
    pub description: String,
    pub page_size: usize,
}

/// Contents of `slag.toml`. Every key is optional.
#[derive(Deserialize, Debug, Default)]
pub struct Config {
    pub baseurl: Option<String>,
    pub target: Option<PathBuf>,
    pub include: Option<Vec<PathBuf>>,
    pub pagesize: Option<usize>,
    pub maxparagraphs: Option<usize>,
    pub paths: Option<Vec<PathBuf>>,
    pub log: Option<Log>,
    pub rss_feed: Option<RssFeed>,
}

/// Values given on the command line. They win over the configuration file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub baseurl: Option<String>,
    pub target: Option<PathBuf>,
    pub include: Vec<PathBuf>,
    pub pagesize: Option<usize>,
    pub maxparagraphs: Option<usize>,
    pub paths: Vec<PathBuf>,
}

/// Fully resolved settings of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOptions {
    pub baseurl: String,
    pub target: PathBuf,
    pub include: Vec<PathBuf>,
    pub page_size: usize,
    pub max_paragraphs: usize,
    pub paths: Vec<PathBuf>,
    pub rss_feed: Option<RssFeed>,
}

impl SiteOptions {
    pub fn resolve(config: &Config, overrides: Overrides, cur_dir: &Path) -> SiteOptions {
        let default_target = cur_dir.join("target");

        let target = overrides.target
            .or_else(|| config.target.clone())
            .unwrap_or_else(|| default_target.clone());
        let baseurl = overrides.baseurl
            .or_else(|| config.baseurl.clone())
            .unwrap_or_else(|| default_target.to_string_lossy().to_string());

        let include = if overrides.include.is_empty() {
            config.include.clone().unwrap_or_default()
        } else {
            overrides.include
        };

        let paths = if !overrides.paths.is_empty() {
            overrides.paths
        } else {
            match config.paths {
                Some(ref paths) if !paths.is_empty() => paths.clone(),
                _ => vec![PathBuf::from(".")],
            }
        };

        SiteOptions {
            baseurl,
            target,
            include,
            page_size: overrides.pagesize.or(config.pagesize).unwrap_or(DEFAULT_PAGE_SIZE),
            max_paragraphs: overrides.maxparagraphs.or(config.maxparagraphs).unwrap_or(DEFAULT_MAX_PARAGRAPHS),
            paths,
            rss_feed: config.rss_feed.clone(),
        }
    }
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    }
}

fn find_config_path() -> Option<PathBuf> {
    if let Ok(cur_dir) = env::current_dir() {
        if cur_dir.join(CFG_FILE_NAME).exists() {
            return Some(cur_dir.join(CFG_FILE_NAME));
        }
    }

    let cfg_file = dirs::config_dir()?.join("slag").join(CFG_FILE_NAME);
    if cfg_file.exists() {
        return Some(cfg_file);
    }

    None
}

/// An explicitly given file has to be readable. Without one, the first
/// `slag.toml` found is used, or the defaults when there is none.
pub fn open_config(cfg_path: Option<&Path>) -> io::Result<(Config, Option<PathBuf>)> {
    let config_path = match cfg_path {
        Some(path) => path.to_path_buf(),
        None => match find_config_path() {
            Some(path) => path,
            None => return Ok((Config::default(), None)),
        },
    };

    let config = read_config(&config_path)?;
    Ok((config, Some(config_path)))
}
