use thiserror::Error;

/// Errors raised while setting up paged output.
#[derive(Debug, Error)]
pub enum PagerError {
    #[error("can't start pager `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("pager `{0}` has no input pipe")]
    MissingPipe(String),
    #[error("can't supervise pager `{command}`: {source}")]
    Supervisor {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PagerError>;
