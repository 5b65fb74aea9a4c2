use colored::Colorize;
use inquire::{Confirm, Text};

use crate::{
    account::Account,
    error::AppError,
    git::Git,
    github::{self, GithubApi},
    remote,
    ssh_config::SshConfig,
    ssh_key::{self, Keygen},
    storage::AccountStore,
    validation,
};

/// How many times the user may re-enter a name before the workflow aborts
const MAX_NAME_ATTEMPTS: usize = 3;

/// Interactively collects and persists a new GitHub identity
///
/// Aborts at the first failing step; nothing is persisted until every
/// preceding validation has passed.
pub fn add_account(
    store: &mut AccountStore,
    api: &dyn GithubApi,
    keygen: &dyn Keygen,
    ssh_config: &SshConfig,
) -> Result<(), AppError> {
    let email = validation::prompt_until_valid(
        &format!("{}", "enter the email associated with the github account:".blue()),
        validation::validate_email,
    )?;
    let name = validation::prompt_until_valid(
        &format!("{}", "enter the github name for this identity:".blue()),
        validation::validate_name,
    )?;

    let (name, verified) = confirm_name(name, api)?;
    if !verified {
        println!(
            "{}",
            "the name could not be verified as a github account; key ownership checks will be skipped"
                .yellow()
        );
    }

    let has_key = Confirm::new(&format!(
        "{}",
        "do you already have an ssh key for this account?".blue()
    ))
    .with_default(false)
    .prompt()?;

    let (key_path, supplied_existing) = if has_key {
        let path = Text::new(&format!("{}", "enter the path to the ssh key:".blue())).prompt()?;
        // Abort before any state is committed if the key does not parse.
        ssh_key::load_private_key(&path)?;
        (path, true)
    } else {
        let generated = keygen.generate(&email)?;
        (generated.to_string_lossy().into_owned(), false)
    };

    if verified && supplied_existing {
        if !github::is_key_owned_by(api, &key_path, &name)? {
            return Err(AppError::VerificationMismatch(name));
        }
        println!("{}", "key ownership confirmed".green());
    }

    let alias = ssh_config.resolve_alias(&key_path, || {
        validation::prompt_until_valid(
            &format!(
                "{}",
                "enter a unique alias for this ssh key (e.g. github-work):".blue()
            ),
            |input| {
                if input.trim().is_empty() {
                    Err(AppError::Validation("alias cannot be empty".to_string()))
                } else {
                    Ok(())
                }
            },
        )
    })?;

    if let Some(owner) = store.alias_owner(&alias) {
        if owner.name != name {
            return Err(AppError::Validation(format!(
                "ssh alias '{}' is already used by account '{}'",
                alias, owner.name
            )));
        }
    }

    if store.get(&name).is_some() {
        let overwrite = Confirm::new(&format!(
            "{}",
            format!("account '{name}' already exists. overwrite it?").blue()
        ))
        .with_default(false)
        .prompt()?;
        if !overwrite {
            return Err(AppError::Validation(format!(
                "account '{name}' already exists"
            )));
        }
    }

    store.upsert(Account {
        name: name.clone(),
        email,
        key_path,
        ssh_alias: alias,
        id: 0,
    })?;
    println!("{} {}", "added account:".green(), name);
    Ok(())
}

/// Settles on an account name, bounded at `MAX_NAME_ATTEMPTS` tries
///
/// Returns the chosen name and whether it was verified to exist on GitHub.
/// A name counts as verified only when it is syntactically a plausible
/// username and the existence endpoint confirms it; a 404, bad syntax or an
/// unreachable API all degrade to "cannot confirm" and offer the user the
/// choice of keeping the name or entering a new one.
fn confirm_name(mut name: String, api: &dyn GithubApi) -> Result<(String, bool), AppError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        if validation::looks_like_username(&name) {
            match api.username_exists(&name) {
                Ok(()) => return Ok((name, true)),
                Err(AppError::UsernameNotFound(_)) => {}
                Err(AppError::Network(err)) => {
                    println!("{} {}", "could not reach github:".yellow(), err);
                }
                Err(AppError::Api(status)) => {
                    println!("{} {}", "unexpected github response:".yellow(), status);
                }
                Err(err) => return Err(err),
            }
        }

        let keep = Confirm::new(&format!(
            "{}",
            format!("'{name}' could not be confirmed as an existing github username. use this name anyway?")
                .blue()
        ))
        .with_default(true)
        .prompt()?;
        if keep {
            return Ok((name, false));
        }

        name = validation::prompt_until_valid(
            &format!("{}", "enter a new github name:".blue()),
            validation::validate_name,
        )?;
    }

    Err(AppError::Validation(
        "too many attempts to choose a github name".to_string(),
    ))
}

/// Rewrites a repository remote to route through the account's SSH alias
///
/// Reads the current URL of `remote_name`, re-renders it in SSH form with the
/// account's alias and, once `confirm` approves the new URL, sets it in a
/// single git call. Declining leaves the remote untouched.
pub fn bind_repo<F>(
    account: &Account,
    git: &dyn Git,
    remote_name: &str,
    confirm: F,
) -> Result<(), AppError>
where
    F: FnOnce(&str) -> Result<bool, AppError>,
{
    let remote_url = git.remote_get_url(remote_name)?;
    let (owner, repo) = remote::extract_owner_and_repo(remote_url.trim())?;
    let new_url = remote::render_ssh_remote(&account.ssh_alias, &owner, &repo);

    if !confirm(&new_url)? {
        return Err(AppError::Validation("remote URL not set".to_string()));
    }

    git.remote_set_url(remote_name, &new_url)?;
    println!("{} {}", "remote URL set to:".green(), new_url);
    Ok(())
}

/// Interactive confirmation used by `bind_repo` in production
pub fn confirm_remote_prompt(url: &str) -> Result<bool, AppError> {
    Ok(Confirm::new(&format!(
        "{}",
        format!("set the remote URL to '{url}'?").blue()
    ))
    .with_default(true)
    .prompt()?)
}

/// Makes the account the global git identity
pub fn switch_account(account: &Account, git: &dyn Git) -> Result<(), AppError> {
    git.config_set_global("user.name", &account.name)?;
    git.config_set_global("user.email", &account.email)?;
    println!("{} {}", "switched to account:".green(), account.name);
    Ok(())
}

/// Shows the current global git identity
pub fn show_current(git: &dyn Git) -> Result<(), AppError> {
    let name = git.config_get_global("user.name")?;
    let email = git.config_get_global("user.email")?;
    println!("{} {} <{}>", "current git identity:".blue(), name.trim(), email.trim());
    Ok(())
}

/// Lists all stored accounts, marking the one that is currently global
pub fn list_accounts(store: &AccountStore, git: &dyn Git) -> Result<(), AppError> {
    if store.list().is_empty() {
        println!("{}", "no accounts found".red());
        return Ok(());
    }

    let global_email = git
        .config_get_global("user.email")
        .map(|email| email.trim().to_string())
        .unwrap_or_default();

    for account in store.list() {
        let marker = if account.email == global_email {
            " (global)"
        } else {
            ""
        };
        println!("{account}{marker}");
    }
    Ok(())
}
