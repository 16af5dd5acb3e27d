use std::fmt;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

/// Output style of the fmt subscriber
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Default,
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" | "default" => Ok(LogFormat::Default),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(LoggingError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Default => "default",
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log format: {0} (expected default, json, pretty or compact)")]
    InvalidFormat(String),
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to init logger: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber. `filter` uses `RUST_LOG` directive syntax.
pub fn init(filter: &str, format: LogFormat) -> Result<(), LoggingError> {
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = EnvFilter::from_str(filter)?;

    match format {
        LogFormat::Default => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .finish()
            .try_init()?,
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_line_number(true)
            .with_file(true)
            .with_env_filter(env_filter)
            .finish()
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(env_filter)
            .finish()
            .try_init()?,
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .finish()
            .try_init()?,
    }

    Ok(())
}
