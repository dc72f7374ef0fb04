use std::path::{Path, PathBuf};

const APP_DIR: &str = "financewise";
const ACCOUNTS_FILE: &str = "accounts.json";

/// Lowest cost bcrypt accepts; keeps hashing fast in tests.
#[cfg(test)]
pub(crate) const TEST_BCRYPT_COST: u32 = 4;

/// Where the stores live and how hard new passwords are hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    data_dir: PathBuf,
    bcrypt_cost: u32,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Platform data directory, or the working directory if there is none.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(ACCOUNTS_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::default_data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accounts_file_inside_data_dir() {
        let config = Config::new("/var/lib/fw");
        assert_eq!(config.accounts_path(), PathBuf::from("/var/lib/fw/accounts.json"));
        assert_eq!(config.bcrypt_cost(), bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_with_bcrypt_cost() {
        let config = Config::new(".").with_bcrypt_cost(TEST_BCRYPT_COST);
        assert_eq!(config.bcrypt_cost(), TEST_BCRYPT_COST);
        assert_eq!(config.data_dir(), Path::new("."));
    }

    #[test]
    fn test_default_uses_app_dir() {
        let config = Config::default();
        if dirs::data_dir().is_some() {
            assert!(config.data_dir().ends_with(APP_DIR));
        }
    }
}
