mod account;
mod cli;
mod error;
mod git;
mod github;
mod menu;
mod paths;
mod remote;
mod ssh_config;
mod ssh_key;
mod storage;
mod validation;
mod workflow;

use std::process;

use clap::Parser;
use colored::Colorize;

use crate::{
    account::Account,
    cli::{Cli, Commands},
    error::AppError,
    git::{Git, SystemGit},
    github::GithubHttpClient,
    ssh_config::SshConfig,
    ssh_key::SshKeygen,
    storage::AccountStore,
};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{}", err.to_string().red());
        let code = match err {
            AppError::ExternalTool { code: Some(code), .. } => code,
            _ => 1,
        };
        process::exit(code);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut store = AccountStore::open(AccountStore::default_path()?)?;
    let git = SystemGit;
    let ssh_config = SshConfig::default_location()?;
    let keygen = SshKeygen;
    let api = GithubHttpClient::new()?;

    match cli.command {
        Some(Commands::New) => workflow::add_account(&mut store, &api, &keygen, &ssh_config),
        Some(Commands::Switch { account }) => {
            let account = resolve_account(&store, &git, account)?;
            workflow::switch_account(&account, &git)
        }
        Some(Commands::Setup { account, remote }) => {
            let account = resolve_account(&store, &git, account)?;
            workflow::bind_repo(&account, &git, &remote, workflow::confirm_remote_prompt)
        }
        Some(Commands::Delete { name }) => {
            store.delete(&name)?;
            println!("{} {}", "deleted account:".green(), name);
            Ok(())
        }
        Some(Commands::Current) => workflow::show_current(&git),
        Some(Commands::List) => workflow::list_accounts(&store, &git),
        None => menu::run_menu(&mut store, &api, &git, &keygen, &ssh_config),
    }
}

/// Resolves the account named on the command line, or asks interactively
fn resolve_account(
    store: &AccountStore,
    git: &dyn Git,
    name: Option<String>,
) -> Result<Account, AppError> {
    match name {
        Some(name) => store
            .get(&name)
            .cloned()
            .ok_or(AppError::AccountNotFound(name)),
        None => menu::select_account(store, git)?
            .ok_or_else(|| AppError::Validation("no account selected".to_string())),
    }
}
