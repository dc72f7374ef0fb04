use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::json_utils::{read_json, write_json};
use crate::Error;

/// Prefix shared by every bcrypt hash variant ($2a$, $2b$, $2x$, $2y$).
const BCRYPT_PREFIX: &str = "$2";

/// Username → credential mapping backed by a single shared JSON file.
pub struct AccountStore {
    path: PathBuf,
    cost: u32,
    accounts: BTreeMap<String, String>,
    on_disk: bool,
}

impl AccountStore {
    /// Opens the store at `path`. A missing file is an empty store.
    /// New passwords are hashed with the given bcrypt `cost`.
    pub fn open(path: impl Into<PathBuf>, cost: u32) -> Result<Self, Error> {
        let mut store = Self {
            path: path.into(),
            cost,
            accounts: BTreeMap::new(),
            on_disk: false,
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-reads the backing file, replacing the in-memory mapping.
    /// On failure the previous mapping is kept.
    pub fn reload(&mut self) -> Result<(), Error> {
        let loaded: Option<BTreeMap<String, String>> = read_json(&self.path)?;
        self.on_disk = loaded.is_some();
        self.accounts = loaded.unwrap_or_default();
        debug!(
            "loaded {} account(s) from {}",
            self.accounts.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Creates an account if `username` is not taken and persists the whole
    /// mapping. The password is stored as a salted bcrypt hash.
    pub fn create_account(&mut self, username: &str, password: &str) -> Result<(), Error> {
        validate_username(username)?;
        if password.is_empty() {
            return Err(Error::EmptyPassword);
        }
        if self.accounts.contains_key(username) {
            return Err(Error::DuplicateUsername);
        }

        let hashed = bcrypt::hash(password, self.cost)?;
        self.accounts.insert(username.to_string(), hashed);
        if let Err(e) = write_json(&self.path, &self.accounts) {
            self.accounts.remove(username);
            return Err(e);
        }
        self.on_disk = true;
        info!("created account {}", username);
        Ok(())
    }

    /// Checks a username/password pair. Unknown usernames are reported as
    /// `Ok(false)`, not as an error.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<bool, Error> {
        let Some(stored) = self.accounts.get(username) else {
            return Ok(false);
        };
        if stored.starts_with(BCRYPT_PREFIX) {
            match bcrypt::verify(password, stored) {
                Ok(valid) => return Ok(valid),
                Err(e) => debug!("stored value for {} is not a bcrypt hash: {}", username, e),
            }
        }
        warn!(
            "account {} has a plaintext password in {}",
            username,
            self.path.display()
        );
        Ok(stored == password)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Whether the backing file existed at the last load or has been written since.
    pub fn exists_on_disk(&self) -> bool {
        self.on_disk
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Usernames name the per-user ledger file, so they must be usable as a
/// file name component.
pub(crate) fn validate_username(username: &str) -> Result<(), Error> {
    if username.is_empty() {
        return Err(Error::EmptyUsername);
    }
    if username.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidUsername);
    }
    Ok(())
}
