use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons a post-log submission is refused before it reaches the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LogRejected {
    #[error("impressions must be non-zero")]
    NoImpressions,

    #[error("engagements must be non-zero")]
    NoEngagements,
}
