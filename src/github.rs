use reqwest::StatusCode;
use serde::Deserialize;

use crate::{error::AppError, ssh_key};

const GITHUB_API_URL: &str = "https://api.github.com";

/// Read-only GitHub lookups needed to verify an identity
///
/// Modeled as a trait so workflows can run against a scripted fake.
pub trait GithubApi {
    /// Fetches the public keys GitHub exposes for `username`
    fn fetch_public_keys(&self, username: &str) -> Result<Vec<String>, AppError>;

    /// Checks that `username` exists on GitHub
    ///
    /// Only a 404 means the user does not exist; any other reachable status
    /// is treated as existing.
    fn username_exists(&self, username: &str) -> Result<(), AppError>;
}

#[derive(Deserialize)]
struct PublicKeyEntry {
    key: String,
}

/// GitHub client backed by the public REST API
pub struct GithubHttpClient {
    http: reqwest::blocking::Client,
}

impl GithubHttpClient {
    pub fn new() -> Result<Self, AppError> {
        // GitHub rejects requests without a User-Agent.
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

impl GithubApi for GithubHttpClient {
    fn fetch_public_keys(&self, username: &str) -> Result<Vec<String>, AppError> {
        let response = self
            .http
            .get(format!("{GITHUB_API_URL}/users/{username}/keys"))
            .send()?;

        if !response.status().is_success() {
            return Err(AppError::Api(response.status()));
        }

        let entries: Vec<PublicKeyEntry> = response.json()?;
        Ok(entries.into_iter().map(|entry| entry.key).collect())
    }

    fn username_exists(&self, username: &str) -> Result<(), AppError> {
        let response = self
            .http
            .get(format!("{GITHUB_API_URL}/users/{username}"))
            .send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::UsernameNotFound(username.to_string()));
        }

        Ok(())
    }
}

/// Checks whether the key at `key_path` belongs to `username`
///
/// The public half of the key is rendered in authorized-keys form and must
/// byte-match one of the fetched entries after trimming. A clean non-match is
/// `Ok(false)`, not an error.
pub fn is_key_owned_by(
    api: &dyn GithubApi,
    key_path: &str,
    username: &str,
) -> Result<bool, AppError> {
    let key = ssh_key::load_private_key(key_path)?;
    let rendered = ssh_key::render_public_key(&key)?;

    let published = api.fetch_public_keys(username)?;
    Ok(published.iter().any(|entry| entry.trim() == rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssh_key::fixtures;
    use std::fs;

    struct FakeGithub {
        keys: Result<Vec<String>, StatusCode>,
    }

    impl GithubApi for FakeGithub {
        fn fetch_public_keys(&self, _username: &str) -> Result<Vec<String>, AppError> {
            match &self.keys {
                Ok(keys) => Ok(keys.clone()),
                Err(status) => Err(AppError::Api(*status)),
            }
        }

        fn username_exists(&self, _username: &str) -> Result<(), AppError> {
            Ok(())
        }
    }

    fn key_file(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("id_ed25519");
        fs::write(&path, fixtures::PRIVATE_KEY).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn key_listed_for_the_account_is_owned() {
        let dir = tempfile::tempdir().unwrap();
        let api = FakeGithub {
            keys: Ok(vec![
                "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAAB unrelated".to_string(),
                format!("{}\n", fixtures::PUBLIC_KEY),
            ]),
        };

        assert!(is_key_owned_by(&api, &key_file(&dir), "alice").unwrap());
    }

    #[test]
    fn unlisted_key_is_a_clean_non_match() {
        let dir = tempfile::tempdir().unwrap();
        let api = FakeGithub {
            keys: Ok(vec![
                "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAAB unrelated".to_string(),
            ]),
        };

        assert!(!is_key_owned_by(&api, &key_file(&dir), "alice").unwrap());
    }

    #[test]
    fn empty_key_list_is_a_clean_non_match() {
        let dir = tempfile::tempdir().unwrap();
        let api = FakeGithub { keys: Ok(vec![]) };

        assert!(!is_key_owned_by(&api, &key_file(&dir), "alice").unwrap());
    }

    #[test]
    fn api_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let api = FakeGithub {
            keys: Err(StatusCode::FORBIDDEN),
        };

        let result = is_key_owned_by(&api, &key_file(&dir), "alice");
        assert!(matches!(result, Err(AppError::Api(_))));
    }

    #[test]
    fn unparseable_key_fails_before_any_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_a_key");
        fs::write(&path, "not a key").unwrap();
        let api = FakeGithub { keys: Ok(vec![]) };

        let result = is_key_owned_by(&api, path.to_str().unwrap(), "alice");
        assert!(matches!(result, Err(AppError::Key { .. })));
    }
}
