use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;

// Matches "git@hostname:owner/repo.git"
static SSH_REMOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^git@[\w.-]+:([\w.-]+)/([\w.-]+)\.git$").unwrap());

// Matches "https://hostname/owner/repo.git"
static HTTPS_REMOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https://[\w.-]+/([\w.-]+)/([\w.-]+)\.git$").unwrap());

/// Extracts the owner and repository name from a remote URL
///
/// Exactly two shapes are recognized, the SSH form and the HTTPS form, both
/// requiring the literal `.git` suffix.
pub fn extract_owner_and_repo(remote_url: &str) -> Result<(String, String), AppError> {
    let captures = SSH_REMOTE
        .captures(remote_url)
        .or_else(|| HTTPS_REMOTE.captures(remote_url))
        .ok_or_else(|| AppError::UnsupportedRemote(remote_url.to_string()))?;

    Ok((captures[1].to_string(), captures[2].to_string()))
}

/// Renders the SSH-form remote URL routing through `alias`
pub fn render_ssh_remote(alias: &str, owner: &str, repo: &str) -> String {
    format!("git@{alias}:{owner}/{repo}.git")
}
