//! Per-user transaction ledger.
//!
//! Keeps one user's transactions in insertion order and mirrors every change
//! to `<username>_transactions.json`:
//! - Appending income/expense entries
//! - Deleting by position (later entries shift down)
//! - Computing income/expense/balance totals

use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::iter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::json_utils::{read_json, write_json};
use crate::stores::accounts::validate_username;
use crate::{Error, Summary, Transaction, TransactionType};

pub struct LedgerStore {
    username: String,
    path: PathBuf,
    transactions: Vec<Transaction>,
}

impl LedgerStore {
    /// Opens the ledger of `username` inside `data_dir` and loads it.
    pub fn open(data_dir: impl AsRef<Path>, username: &str) -> Result<Self, Error> {
        validate_username(username)?;
        let mut store = Self {
            username: username.to_string(),
            path: ledger_path(data_dir.as_ref(), username),
            transactions: Vec::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// Reads the backing file. A missing file is an empty ledger; a malformed
    /// one is an error and leaves the current sequence untouched.
    pub fn load(&mut self) -> Result<(), Error> {
        self.transactions = read_json(&self.path)?.unwrap_or_default();
        debug!(
            "loaded {} transaction(s) for {}",
            self.transactions.len(),
            self.username
        );
        Ok(())
    }

    /// Appends a transaction and rewrites the backing file.
    /// The amount is stored as it will read back from the file. Returns an
    /// error if it is not positive or would push the totals out of range.
    pub fn add_transaction(
        &mut self,
        tx_type: TransactionType,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Result<(), Error> {
        let amount = persisted_amount(amount)?;
        if amount <= Decimal::ZERO {
            return Err(Error::AmountMustBePositive);
        }
        let transaction = Transaction {
            tx_type,
            amount,
            description: description.into(),
        };
        totals(self.transactions.iter().chain(iter::once(&transaction)))?;

        self.transactions.push(transaction);
        if let Err(e) = self.persist() {
            self.transactions.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Removes the transaction at `index` and rewrites the backing file.
    /// An index outside the ledger is ignored and yields `Ok(None)`.
    pub fn delete_transaction(&mut self, index: usize) -> Result<Option<Transaction>, Error> {
        if index >= self.transactions.len() {
            warn!(
                "ignoring delete of position {} in {}'s ledger of {} transaction(s)",
                index,
                self.username,
                self.transactions.len()
            );
            return Ok(None);
        }
        let removed = self.transactions.remove(index);
        if let Err(e) = self.persist() {
            self.transactions.insert(index, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    /// Totals over the whole ledger. Fails only if a loaded file holds
    /// amounts whose sum does not fit in a `Decimal`.
    pub fn summary(&self) -> Result<Summary, Error> {
        totals(&self.transactions)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), Error> {
        write_json(&self.path, &self.transactions)
    }
}

fn totals<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Result<Summary, Error> {
    let mut summary = Summary::default();
    for transaction in transactions {
        let total = match transaction.tx_type {
            TransactionType::Income => &mut summary.total_income,
            TransactionType::Expense => &mut summary.total_expense,
        };
        *total = total
            .checked_add(transaction.amount)
            .ok_or(Error::AmountOutOfRange)?;
    }
    summary.balance = summary
        .total_income
        .checked_sub(summary.total_expense)
        .ok_or(Error::AmountOutOfRange)?;
    Ok(summary)
}

/// Amounts are kept on disk as JSON floats; this is the value one reads
/// back as.
fn persisted_amount(amount: Decimal) -> Result<Decimal, Error> {
    let float = amount.to_f64().ok_or(Error::AmountOutOfRange)?;
    Decimal::from_str(&float.to_string()).map_err(|_| Error::AmountOutOfRange)
}

pub(crate) fn ledger_path(data_dir: &Path, username: &str) -> PathBuf {
    data_dir.join(format!("{}_transactions.json", username))
}
