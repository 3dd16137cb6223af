use thiserror::Error;

/// Only these terminate the pipeline. Whitelist lookup failures and kick
/// failures are contained at their component boundaries and surface through
/// logs alone.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no active log directory found under {0}")]
    NoActiveLog(String),
    #[error("log tail failed")]
    Tail(#[source] std::io::Error),
}
