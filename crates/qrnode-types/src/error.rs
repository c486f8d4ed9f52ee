use thiserror::Error;

/// Errors raised while a node handles a single invocation.
///
/// None of these persist across invocations; the host reports them through
/// its own error channel and the tree does not advance.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeError {
    /// A placeholder or `&` query value names a shared-state key that is absent.
    #[error("undefined reference: {0}")]
    UndefinedReference(String),

    #[error("render failed: {0}")]
    RenderFailed(String),
}

/// Errors from validating node configuration at load time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("operation mode is required")]
    MissingOperationMode,

    #[error("invalid operation mode: '{0}'")]
    InvalidOperationMode(String),

    #[error("query parameter name must not be empty")]
    EmptyQueryParamName,

    #[error("duplicate query parameter: '{0}'")]
    DuplicateQueryParam(String),

    #[error("query parameter '{0}' references an empty shared-state key")]
    EmptyReference(String),
}
