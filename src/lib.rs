mod config;
mod csv_utils;
mod dto;
mod engine;
mod error;
mod json_utils;
mod runner;
pub mod stores;

pub use config::Config;
pub use dto::{Summary, SummaryRow, Transaction, TransactionRow, TransactionType};
pub use engine::Engine;
pub use error::Error;
pub use runner::{run, Command, Credentials};
