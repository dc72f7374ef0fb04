use log::info;

use crate::stores::{AccountStore, LedgerStore};
use crate::{Config, Error};

/// Entry point for front ends. Performs the form-level checks (required
/// fields, password confirmation) before handing over to the stores, and
/// opens a user's ledger once their credentials check out.
pub struct Engine {
    config: Config,
    accounts: AccountStore,
}

impl Engine {
    pub fn open(config: Config) -> Result<Self, Error> {
        let accounts = AccountStore::open(config.accounts_path(), config.bcrypt_cost())?;
        Ok(Self { config, accounts })
    }

    /// Creates an account. Surrounding whitespace in the username is ignored;
    /// the password must be typed identically twice.
    pub fn register(&mut self, username: &str, password: &str, confirm: &str) -> Result<(), Error> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::EmptyUsername);
        }
        if password.is_empty() || confirm.is_empty() {
            return Err(Error::EmptyPassword);
        }
        if password != confirm {
            return Err(Error::PasswordMismatch);
        }
        self.accounts.create_account(username, password)
    }

    /// Verifies the credentials and opens the user's ledger.
    pub fn login(&self, username: &str, password: &str) -> Result<LedgerStore, Error> {
        let username = username.trim();
        if !self.accounts.exists_on_disk() {
            return Err(Error::NoAccounts);
        }
        if !self.accounts.verify_credentials(username, password)? {
            info!("rejected login for {}", username);
            return Err(Error::InvalidCredentials);
        }
        LedgerStore::open(self.config.data_dir(), username)
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
