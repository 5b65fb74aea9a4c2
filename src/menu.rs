use colored::Colorize;
use inquire::Select;

use crate::{
    account::Account,
    error::AppError,
    git::Git,
    github::GithubApi,
    ssh_config::SshConfig,
    ssh_key::Keygen,
    storage::AccountStore,
    workflow,
};

const BACK_OPTION: &str = "back";

/// Remote the menu flows operate on
pub const DEFAULT_REMOTE: &str = "origin";

/// Runs interactive menu interface
pub fn run_menu(
    store: &mut AccountStore,
    api: &dyn GithubApi,
    git: &dyn Git,
    keygen: &dyn Keygen,
    ssh_config: &SshConfig,
) -> Result<(), AppError> {
    loop {
        let actions = vec![
            "switch account",
            "add account",
            "setup repository",
            "delete account",
            "show current identity",
            "show all accounts",
            "quit",
        ];

        let action_selected = Select::new(&format!("{}", "select action".blue()), actions).prompt()?;

        match action_selected {
            "switch account" => menu_switch(store, git)?,
            "add account" => workflow::add_account(store, api, keygen, ssh_config)?,
            "setup repository" => menu_setup(store, git)?,
            "delete account" => menu_delete(store, git)?,
            "show current identity" => workflow::show_current(git)?,
            "show all accounts" => workflow::list_accounts(store, git)?,
            "quit" => {
                println!("{}", "quitting".yellow());
                break Ok(());
            }
            _ => unreachable!("unexpected input"),
        }
    }
}

/// Selects a stored account, marking the currently global one
///
/// Returns `None` when the user picks the back option.
pub fn select_account(
    store: &AccountStore,
    git: &dyn Git,
) -> Result<Option<Account>, AppError> {
    let accounts = store.list();
    if accounts.is_empty() {
        return Err(AppError::Validation("no accounts found".to_string()));
    }

    let global_email = git
        .config_get_global("user.email")
        .map(|email| email.trim().to_string())
        .unwrap_or_default();

    let mut options: Vec<String> = accounts
        .iter()
        .map(|account| {
            if account.email == global_email {
                format!("{} (global)", account.name)
            } else {
                account.name.clone()
            }
        })
        .collect();
    options.push(BACK_OPTION.to_string());

    let selected = Select::new(&format!("{}", "select account:".blue()), options).prompt()?;
    if selected == BACK_OPTION {
        return Ok(None);
    }

    let name = selected.trim_end_matches(" (global)");
    Ok(store.get(name).cloned())
}

/// Menu for switching the global identity
fn menu_switch(store: &AccountStore, git: &dyn Git) -> Result<(), AppError> {
    if let Some(account) = select_account(store, git)? {
        workflow::switch_account(&account, git)?;
    }
    Ok(())
}

/// Menu for pointing the current repository at an account's alias
fn menu_setup(store: &AccountStore, git: &dyn Git) -> Result<(), AppError> {
    if let Some(account) = select_account(store, git)? {
        workflow::bind_repo(&account, git, DEFAULT_REMOTE, workflow::confirm_remote_prompt)?;
    }
    Ok(())
}

/// Menu for deleting an account
fn menu_delete(store: &mut AccountStore, git: &dyn Git) -> Result<(), AppError> {
    if let Some(account) = select_account(store, git)? {
        store.delete(&account.name)?;
        println!("{} {}", "deleted account:".green(), account.name);
    }
    Ok(())
}
