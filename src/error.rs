use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// Prefix bytes violate the strict UTF-8 encoding policy.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A pool worker died or the pool shut down before a window completed.
    #[error("worker error: {0}")]
    Worker(String),
}
