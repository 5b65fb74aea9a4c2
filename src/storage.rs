use std::{fs, path::PathBuf};

use colored::Colorize;

use crate::{account::Account, error::AppError, paths::home_dir};

/// Accounts file in the user's home directory
const ACCOUNTS_FILE: &str = "github_identities.json";

/// Store of GitHub identities backed by a JSON file
///
/// Constructed once at process start and passed by reference into every flow
/// that needs it. Mutations are persisted immediately.
pub struct AccountStore {
    path: PathBuf,
    accounts: Vec<Account>,
}

impl AccountStore {
    /// Gets the default path of the accounts file
    pub fn default_path() -> Result<PathBuf, AppError> {
        Ok(home_dir()?.join(ACCOUNTS_FILE))
    }

    /// Opens the store, loading all valid records from `path`
    ///
    /// A missing or empty file yields an empty store. Each record is decoded
    /// as a whole; a record with a missing field or a type mismatch is
    /// skipped with a warning rather than failing the load.
    pub fn open(path: PathBuf) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self {
                path,
                accounts: Vec::new(),
            });
        }

        let contents = fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(Self {
                path,
                accounts: Vec::new(),
            });
        }

        let records: Vec<serde_json::Value> = serde_json::from_str(&contents)?;
        let mut accounts: Vec<Account> = Vec::new();
        for record in records {
            match serde_json::from_value::<Account>(record) {
                Ok(account) => accounts.push(account),
                Err(err) => println!("{} {}", "skipping invalid account record:".yellow(), err),
            }
        }

        Ok(Self { path, accounts })
    }

    /// Looks up an account by name
    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.name == name)
    }

    /// All valid accounts currently loaded
    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    /// Finds the account holding `alias`, if any
    pub fn alias_owner(&self, alias: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.ssh_alias == alias)
    }

    /// Inserts or replaces an account and persists the store
    ///
    /// A brand-new name is assigned `max(existing ids) + 1`; replacing an
    /// existing name keeps the stored id.
    pub fn upsert(&mut self, mut account: Account) -> Result<(), AppError> {
        match self
            .accounts
            .iter_mut()
            .find(|existing| existing.name == account.name)
        {
            Some(existing) => {
                account.id = existing.id;
                *existing = account;
            }
            None => {
                account.id = self.next_id();
                self.accounts.push(account);
            }
        }
        self.save()
    }

    /// Deletes an account by name and persists the store
    pub fn delete(&mut self, name: &str) -> Result<(), AppError> {
        let initial_len = self.accounts.len();
        self.accounts.retain(|account| account.name != name);
        if self.accounts.len() == initial_len {
            return Err(AppError::AccountNotFound(name.to_string()));
        }
        self.save()
    }

    fn next_id(&self) -> u32 {
        self.accounts
            .iter()
            .map(|account| account.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn save(&self) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(&self.accounts)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
