use thiserror::Error;

/// Failures of the table collaborators the rules depend on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// A shot or re-anchor asked for the cue ball while none is on the table.
    /// Only a mis-wired game reaches this; it is not recoverable.
    #[error("no cue ball on the table; spawn the cue ball first")]
    MissingCueBall,
}

/// Problems loading a [`RulesConfig`](crate::config::RulesConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rules config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("rules config field `{field}` must be {requirement}, got {value}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f32,
    },
}
