use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use reciter_acquire::config::{
    DEFAULT_LANGUAGE, DEFAULT_OUTPUT_DIR, DEFAULT_QUALIFIER, DEFAULT_ROSTER_URL,
    DEFAULT_SEARCH_URL, DEFAULT_THUMBNAIL_PATTERN, DEFAULT_USER_AGENT,
};
use reciter_acquire::{AcquireConfig, ExtractorKind, Pipeline};
use reciter_model::Reciter;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "reciters")]
#[command(about = "Reciter avatar image acquisition tool")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Download an image for every reciter that doesn't have one yet
    Fetch {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory for <id>.jpg files
        #[arg(short = 'O', long, env = "RECITER_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Minimum pause after each found image, in milliseconds
        #[arg(long, default_value_t = 1000)]
        pause_min_ms: u64,

        /// Maximum pause after each found image, in milliseconds
        #[arg(long, default_value_t = 3000)]
        pause_max_ms: u64,

        /// Stop after searching this many reciters (already-saved ones don't count)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Fetch the roster and print `id<TAB>name` per reciter
    Roster {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Search for one name and print the candidate image URL
    Locate {
        /// Reciter name as it appears in the roster
        name: String,

        #[command(flatten)]
        source: SourceArgs,
    },
}

/// Remote endpoints and search tuning shared by all subcommands.
#[derive(Args)]
struct SourceArgs {
    /// Roster endpoint (without the language parameter)
    #[arg(long, env = "RECITER_ROSTER_URL", default_value = DEFAULT_ROSTER_URL)]
    roster_url: String,

    /// Roster language
    #[arg(long, env = "RECITER_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Image search endpoint
    #[arg(long, env = "RECITER_SEARCH_URL", default_value = DEFAULT_SEARCH_URL)]
    search_url: String,

    /// Term prefixed to each name in search queries; empty to disable
    #[arg(long, env = "RECITER_QUALIFIER", default_value = DEFAULT_QUALIFIER)]
    qualifier: String,

    /// Regex for candidate thumbnail URLs
    #[arg(long, env = "RECITER_THUMBNAIL_PATTERN", default_value = DEFAULT_THUMBNAIL_PATTERN)]
    thumbnail_pattern: String,

    /// How candidates are extracted from the results page
    #[arg(long, value_enum, default_value = "pattern")]
    extractor: Extractor,

    /// User-Agent header sent on every request
    #[arg(long, env = "RECITER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Extractor {
    /// Regex scan over the raw response
    Pattern,
    /// Match against <img> src/data-src attributes
    ImgTag,
}

impl SourceArgs {
    fn into_config(self) -> AcquireConfig {
        AcquireConfig {
            roster_url: self.roster_url,
            language: self.language,
            search_url: self.search_url,
            qualifier: Some(self.qualifier),
            thumbnail_pattern: self.thumbnail_pattern,
            extractor: match self.extractor {
                Extractor::Pattern => ExtractorKind::Pattern,
                Extractor::ImgTag => ExtractorKind::ImgTag,
            },
            user_agent: self.user_agent,
            timeout: Duration::from_secs(self.timeout_secs),
            ..AcquireConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn,hyper_util=info",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn,hyper_util=info",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Fetch {
            source,
            output_dir,
            pause_min_ms,
            pause_max_ms,
            limit,
        } => {
            let config = AcquireConfig {
                output_dir,
                pause_min: Duration::from_millis(pause_min_ms),
                pause_max: Duration::from_millis(pause_max_ms),
                limit,
                ..source.into_config()
            };
            tracing::info!(
                roster = %config.roster_url,
                output_dir = %config.output_dir.display(),
                "Acquiring reciter images"
            );
            reciter_acquire::acquire(&config).await?;
        }
        Commands::Roster { source } => {
            let pipeline = Pipeline::from_config(&source.into_config())?;
            let reciters: Vec<Reciter> = pipeline.roster().try_fetch().await?;
            for reciter in &reciters {
                println!("{}\t{}", reciter.id, reciter.name);
            }
            tracing::info!(count = reciters.len(), "Fetched roster");
        }
        Commands::Locate { name, source } => {
            let pipeline = Pipeline::from_config(&source.into_config())?;
            let query = pipeline.query_for(&name);
            tracing::info!(query = %query, url = %pipeline.locator().search_url(&query), "Searching");
            match pipeline.locator().try_locate(&query).await? {
                Some(candidate) => println!("{candidate}"),
                None => tracing::warn!(query = %query, "No image found"),
            }
        }
    }

    Ok(())
}
