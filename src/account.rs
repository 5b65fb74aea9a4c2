use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents a stored GitHub identity
///
/// `name` is the primary key in the account store; `id` is assigned once at
/// creation and never reused.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Account {
    /// GitHub name, either a username or a display name
    pub name: String,
    /// Email address associated with the account
    pub email: String,
    /// Path to the private SSH key, may contain '~'
    pub key_path: String,
    /// Host alias in the SSH config routing to github.com with this key
    pub ssh_alias: String,
    /// Monotonic identifier assigned at creation
    pub id: u32,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
