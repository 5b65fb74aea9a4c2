use std::{io::ErrorKind, process::Command};

use crate::error::AppError;

/// Git operations the workflows depend on
///
/// Modeled as a trait so workflows can run against a scripted fake instead of
/// the real binary.
pub trait Git {
    /// Reads a global config value (user.name or user.email)
    fn config_get_global(&self, key: &str) -> Result<String, AppError>;
    /// Sets a global config value (user.name or user.email)
    fn config_set_global(&self, key: &str, value: &str) -> Result<(), AppError>;
    /// Reads the URL of the named remote in the current repository
    fn remote_get_url(&self, remote: &str) -> Result<String, AppError>;
    /// Sets the URL of the named remote in the current repository
    fn remote_set_url(&self, remote: &str, url: &str) -> Result<(), AppError>;
}

/// Git capability shelling out to the `git` binary
pub struct SystemGit;

impl SystemGit {
    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        let output = Command::new("git")
            .args(args)
            .output()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => AppError::ToolNotFound("git"),
                _ => AppError::Io(err),
            })?;

        if !output.status.success() {
            return Err(AppError::ExternalTool {
                tool: "git",
                message: String::from_utf8(output.stderr)?.trim().to_string(),
                code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Git for SystemGit {
    fn config_get_global(&self, key: &str) -> Result<String, AppError> {
        Ok(self.run(&["config", "--global", "--get", key])?.trim().to_string())
    }

    fn config_set_global(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.run(&["config", "--global", key, value])?;
        Ok(())
    }

    fn remote_get_url(&self, remote: &str) -> Result<String, AppError> {
        Ok(self.run(&["remote", "get-url", remote])?.trim().to_string())
    }

    fn remote_set_url(&self, remote: &str, url: &str) -> Result<(), AppError> {
        self.run(&["remote", "set-url", remote, url])?;
        Ok(())
    }
}
