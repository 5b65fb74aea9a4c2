use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use colored::Colorize;

use crate::{error::AppError, paths::{expand_tilde, home_dir}};

/// The user's SSH client config file
///
/// The reconciler only ever appends new `Host` blocks; existing blocks are
/// never edited or removed.
pub struct SshConfig {
    path: PathBuf,
}

impl SshConfig {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Opens the config at its well-known location, `~/.ssh/config`
    pub fn default_location() -> Result<Self, AppError> {
        Ok(Self::new(home_dir()?.join(".ssh").join("config")))
    }

    /// Resolves the alias bound to `key_path`, creating a binding if needed
    ///
    /// If a `Host` block with a matching `IdentityFile` already exists, its
    /// alias is returned and the config is left untouched. Otherwise
    /// `ask_alias` supplies a new alias and a block routing it to github.com
    /// is appended. Both the target path and config entries are
    /// tilde-expanded before comparison.
    pub fn resolve_alias<F>(&self, key_path: &str, ask_alias: F) -> Result<String, AppError>
    where
        F: FnOnce() -> Result<String, AppError>,
    {
        let contents = self.read_or_create()?;
        let target = expand_tilde(key_path)?;

        if let Some(alias) = find_alias(&contents, &target)? {
            println!("{} {}", "using existing ssh alias:".blue(), alias);
            return Ok(alias);
        }

        let alias = ask_alias()?.trim().to_string();
        if alias.is_empty() {
            return Err(AppError::Validation("alias cannot be empty".to_string()));
        }

        self.append_block(&alias, key_path)?;
        println!("{} {}", "added ssh config entry for alias:".green(), alias);
        Ok(alias)
    }

    /// Reads the config, creating an empty owner-only file if absent
    fn read_or_create(&self) -> Result<String, AppError> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, "")?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
            }
        }
        Ok(fs::read_to_string(&self.path)?)
    }

    fn append_block(&self, alias: &str, key_path: &str) -> Result<(), AppError> {
        let mut identity_file = key_path.to_string();
        if cfg!(windows) {
            identity_file = identity_file.replace('\\', "/");
        }

        let block = format!(
            "\nHost {alias}\n    HostName github.com\n    User git\n    IdentityFile {identity_file}\n"
        );

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(block.as_bytes())?;
        Ok(())
    }
}

/// Scans config `contents` for a block whose `IdentityFile` matches `target`
///
/// Blocks are introduced by a `Host <alias>` line; the most recent alias seen
/// wins. First match is returned; duplicate blocks for the same key are not
/// deduplicated.
fn find_alias(contents: &str, target: &Path) -> Result<Option<String>, AppError> {
    let mut current_alias: Option<&str> = None;

    for line in contents.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("Host ") {
            current_alias = rest.split_whitespace().next();
        } else if let Some(rest) = trimmed.strip_prefix("IdentityFile") {
            let Some(value) = rest.split_whitespace().next() else {
                continue;
            };
            if expand_tilde(value)? == target {
                if let Some(alias) = current_alias {
                    return Ok(Some(alias.to_string()));
                }
            }
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "\
Host work
    HostName github.com
    User git
    IdentityFile /home/u/.ssh/id_work

Host personal
    HostName github.com
    User git
    IdentityFile /home/u/.ssh/id_personal
";

    fn config_in(dir: &tempfile::TempDir) -> SshConfig {
        SshConfig::new(dir.path().join("config"))
    }

    #[test]
    fn find_alias_matches_the_right_block() {
        let alias = find_alias(CONFIG, Path::new("/home/u/.ssh/id_personal")).unwrap();
        assert_eq!(alias.as_deref(), Some("personal"));
    }

    #[test]
    fn find_alias_returns_none_for_unknown_key() {
        let alias = find_alias(CONFIG, Path::new("/home/u/.ssh/id_other")).unwrap();
        assert_eq!(alias, None);
    }

    #[test]
    fn resolve_returns_existing_alias_without_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        fs::write(dir.path().join("config"), CONFIG).unwrap();

        let alias = config
            .resolve_alias("/home/u/.ssh/id_work", || {
                panic!("should not prompt for an already-bound key")
            })
            .unwrap();

        assert_eq!(alias, "work");
        // Idempotent: nothing was appended.
        let contents = fs::read_to_string(dir.path().join("config")).unwrap();
        assert_eq!(contents, CONFIG);
    }

    #[test]
    fn resolve_appends_a_block_for_an_unbound_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let alias = config
            .resolve_alias("/home/u/.ssh/id_work", || Ok("work".to_string()))
            .unwrap();
        assert_eq!(alias, "work");

        let contents = fs::read_to_string(dir.path().join("config")).unwrap();
        assert!(contents.contains("Host work"));
        assert!(contents.contains("HostName github.com"));
        assert!(contents.contains("User git"));
        assert!(contents.contains("IdentityFile /home/u/.ssh/id_work"));

        // A second resolution finds the appended block instead of prompting.
        let again = config
            .resolve_alias("/home/u/.ssh/id_work", || panic!("should not prompt twice"))
            .unwrap();
        assert_eq!(again, "work");
    }

    #[test]
    fn resolve_rejects_an_empty_alias() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let result = config.resolve_alias("/home/u/.ssh/id_work", || Ok("  ".to_string()));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn existing_blocks_are_preserved_on_append() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        fs::write(dir.path().join("config"), CONFIG).unwrap();

        config
            .resolve_alias("/home/u/.ssh/id_club", || Ok("club".to_string()))
            .unwrap();

        let contents = fs::read_to_string(dir.path().join("config")).unwrap();
        assert!(contents.starts_with(CONFIG));
        assert!(contents.trim_end().ends_with("IdentityFile /home/u/.ssh/id_club"));
    }
}
