use std::path::PathBuf;

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error during file I/O operations
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error during JSON serialization or deserialization
    #[error("json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    /// Error when user input fails.
    #[error("inquire error: {0}")]
    Inquire(#[from] inquire::InquireError),
    /// Error during input validation.
    #[error("validation error: {0}")]
    Validation(String),
    /// Error when a stored account name is not found.
    #[error("account '{0}' not found")]
    AccountNotFound(String),
    /// Error when a GitHub username does not exist.
    #[error("github user '{0}' not found")]
    UsernameNotFound(String),
    /// Error when an SSH key file is missing, unreadable or unparseable.
    #[error("invalid ssh key at '{path}': {reason}")]
    Key { path: PathBuf, reason: String },
    /// Error when SSH key material fails to encode.
    #[error("ssh key error: {0}")]
    SshKey(#[from] ssh_key::Error),
    /// Error when a key does not belong to the claimed GitHub account.
    #[error("the key is not associated with github account '{0}'")]
    VerificationMismatch(String),
    /// Error when a GitHub request fails at the transport level.
    #[error("github request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Error when GitHub responds with a non-success status.
    #[error("github api returned status {0}")]
    Api(reqwest::StatusCode),
    /// Error when a remote URL is not one of the recognized shapes.
    #[error("unsupported remote URL format: {0}")]
    UnsupportedRemote(String),
    /// Error when an external binary is missing from PATH.
    #[error("{0} not found on PATH")]
    ToolNotFound(&'static str),
    /// Error when an external binary exits non-zero.
    #[error("{tool} failed: {message}")]
    ExternalTool {
        tool: &'static str,
        message: String,
        code: Option<i32>,
    },
    /// Error during UTF-8 conversion.
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}
