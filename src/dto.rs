use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// One ledger entry as stored in `<username>_transactions.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
}

/// Aggregate totals over a ledger, kept at full precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

/// Output row for listing a ledger. `position` is 1-based.
#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub position: usize,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: String,
    pub description: String,
}

impl TransactionRow {
    pub fn new(index: usize, transaction: &Transaction) -> Self {
        Self {
            position: index + 1,
            tx_type: transaction.tx_type,
            amount: format_amount(transaction.amount),
            description: transaction.description.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub total_income: String,
    pub total_expense: String,
    pub balance: String,
}

impl From<Summary> for SummaryRow {
    fn from(summary: Summary) -> Self {
        Self {
            total_income: format_amount(summary.total_income),
            total_expense: format_amount(summary.total_expense),
            balance: format_amount(summary.balance),
        }
    }
}

/// Rounds to cents for display only.
fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
