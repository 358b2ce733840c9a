use std::path::PathBuf;

use clap::ValueHint;
use pdata::AttributeStore;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// The arrays the primitive under edit starts with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Layout {
    /// No arrays at all; `pdata-size` fails until something adds `p`
    Empty,
    /// `p`, `n`, `c`, `t`
    Polygon,
    /// `p`, `c`, `s`
    Particles,
    /// `p`, `c`, one element per pixel
    Pixels,
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::Empty => f.write_str("empty"),
            Layout::Polygon => f.write_str("polygon"),
            Layout::Particles => f.write_str("particles"),
            Layout::Pixels => f.write_str("pixels"),
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,pdata=info,pdata_shell=info",
        env = "PDATA_SHELL_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// Arrays of the primitive the script operates on
    #[arg(short = 'L', long, default_value_t = Layout::Polygon, env = "PDATA_SHELL_LAYOUT")]
    pub layout: Layout,
    /// Element count of polygon and particle primitives
    #[arg(short, long, default_value_t = 8)]
    pub size: usize,
    /// Width of a pixel primitive
    #[arg(long, default_value_t = 16)]
    pub width: usize,
    /// Height of a pixel primitive
    #[arg(long, default_value_t = 16)]
    pub height: usize,
    /// Script of pdata calls, one per line; read from stdin if absent
    #[arg(value_hint = ValueHint::FilePath)]
    pub script: Option<PathBuf>,
}

impl Cli {
    pub fn build_store(&self) -> AttributeStore {
        match self.layout {
            Layout::Empty => AttributeStore::new(),
            Layout::Polygon => AttributeStore::polygon(self.size),
            Layout::Particles => AttributeStore::particles(self.size),
            Layout::Pixels => AttributeStore::pixels(self.width, self.height),
        }
    }
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
