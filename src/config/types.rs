//! Configuration types and CLI options.
//!
//! Each tool has a clap argument struct (`DiscoverArgs`, `AuditArgs`) and a
//! library configuration (`DiscoveryConfig`, `AuditConfig`) that can be built
//! without any CLI dependency. Arguments convert into configurations through
//! `TryFrom`, which is where option values are validated.

use std::path::PathBuf;
use std::time::Duration;

use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use url::Url;

use crate::audit::Policy;
use crate::config::constants::*;
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options of the `discover-urls` tool.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "discover-urls",
    version,
    about = "Builds the list of page URLs of a legacy site from its sitemaps, falling back to a same-origin crawl."
)]
pub struct DiscoverArgs {
    /// Origin of the site to discover (scheme + host)
    #[arg(long, default_value = DEFAULT_BASE_ORIGIN)]
    pub base: String,

    /// File the sorted URL list is written to
    #[arg(long, default_value = DEFAULT_URL_LIST_PATH)]
    pub out: PathBuf,

    /// Maximum number of pages fetched by the fallback crawler
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Comma-separated local sitemap files read before any remote source
    #[arg(long, value_delimiter = ',', default_values_t = default_sitemap_files())]
    pub from_files: Vec<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_DISCOVERY_TIMEOUT_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Command-line options of the `audit-redirects` tool.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "audit-redirects",
    version,
    about = "Follows the redirect chain of every legacy URL and checks it against a migration policy."
)]
pub struct AuditArgs {
    /// File with one legacy URL per line
    #[arg(long = "in", default_value = DEFAULT_URL_LIST_PATH)]
    pub input: PathBuf,

    /// CSV report destination
    #[arg(long, default_value = DEFAULT_REPORT_PATH)]
    pub out: PathBuf,

    /// Per-request timeout in milliseconds (must be positive)
    #[arg(long, default_value_t = DEFAULT_AUDIT_TIMEOUT_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,

    /// Host every passing chain must end on
    #[arg(long, default_value = DEFAULT_EXPECTED_HOST)]
    pub expected_host: String,

    /// Pass policy: `migration` expects a 301 to the new site, `baseline` expects a direct 200
    #[arg(long, value_enum, default_value_t = Policy::Migration)]
    pub mode: Policy,

    /// Maximum number of hops followed per URL
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECT_HOPS, value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize))]
    pub max_hops: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

fn default_sitemap_files() -> Vec<String> {
    DEFAULT_SITEMAP_FILES.iter().map(|s| s.to_string()).collect()
}

/// Library configuration of the discovery pipeline.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Target origin; every discovered URL shares its scheme, host and port
    pub origin: Url,
    /// Output file for the URL list
    pub out: PathBuf,
    /// Page budget of the fallback crawler
    pub max_pages: usize,
    /// Local sitemap files, read in order
    pub local_files: Vec<PathBuf>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Pause between crawler page fetches
    pub crawl_delay: Duration,
    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            origin: parse_origin(DEFAULT_BASE_ORIGIN)
                .expect("DEFAULT_BASE_ORIGIN should be a valid http(s) origin"),
            out: PathBuf::from(DEFAULT_URL_LIST_PATH),
            max_pages: DEFAULT_MAX_PAGES,
            local_files: DEFAULT_SITEMAP_FILES.iter().map(PathBuf::from).collect(),
            timeout: Duration::from_millis(DEFAULT_DISCOVERY_TIMEOUT_MS),
            crawl_delay: CRAWL_DELAY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TryFrom<DiscoverArgs> for DiscoveryConfig {
    type Error = ConfigError;

    fn try_from(args: DiscoverArgs) -> Result<Self, Self::Error> {
        if args.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(args.timeout_ms.to_string()));
        }
        Ok(Self {
            origin: parse_origin(&args.base)?,
            out: args.out,
            max_pages: args.max_pages,
            local_files: args
                .from_files
                .iter()
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .map(PathBuf::from)
                .collect(),
            timeout: Duration::from_millis(args.timeout_ms),
            crawl_delay: CRAWL_DELAY,
            user_agent: args.user_agent,
        })
    }
}

/// Library configuration of the redirect audit.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// File with one legacy URL per line
    pub input: PathBuf,
    /// CSV report destination
    pub out: PathBuf,
    /// Per-request timeout
    pub timeout: Duration,
    /// Host every passing chain must end on
    pub expected_host: String,
    /// Pass policy
    pub policy: Policy,
    /// Maximum number of hops followed per URL
    pub max_hops: usize,
    /// Pause between two hops of a chain
    pub hop_delay: Duration,
    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_URL_LIST_PATH),
            out: PathBuf::from(DEFAULT_REPORT_PATH),
            timeout: Duration::from_millis(DEFAULT_AUDIT_TIMEOUT_MS),
            expected_host: DEFAULT_EXPECTED_HOST.to_string(),
            policy: Policy::Migration,
            max_hops: DEFAULT_MAX_REDIRECT_HOPS,
            hop_delay: HOP_DELAY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TryFrom<AuditArgs> for AuditConfig {
    type Error = ConfigError;

    fn try_from(args: AuditArgs) -> Result<Self, Self::Error> {
        if args.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(args.timeout_ms.to_string()));
        }
        if args.max_hops == 0 {
            return Err(ConfigError::InvalidMaxHops);
        }
        let expected_host = args.expected_host.trim().to_ascii_lowercase();
        if expected_host.is_empty() {
            return Err(ConfigError::InvalidExpectedHost(args.expected_host));
        }
        Ok(Self {
            input: args.input,
            out: args.out,
            timeout: Duration::from_millis(args.timeout_ms),
            expected_host,
            policy: args.mode,
            max_hops: args.max_hops,
            hop_delay: HOP_DELAY,
            user_agent: args.user_agent,
        })
    }
}

/// Parses an origin string into a URL reduced to scheme, host and port.
///
/// # Errors
///
/// Returns `ConfigError::InvalidBase` if the string is not an absolute
/// http(s) URL with a host.
pub fn parse_origin(base: &str) -> Result<Url, ConfigError> {
    let parsed = Url::parse(base.trim()).map_err(|_| ConfigError::InvalidBase(base.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ConfigError::InvalidBase(base.to_string()));
    }
    let origin = parsed.origin().ascii_serialization();
    Url::parse(&format!("{origin}/")).map_err(|_| ConfigError::InvalidBase(base.to_string()))
}
