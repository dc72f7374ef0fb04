use log::warn;
use rust_decimal::Decimal;
use std::error::Error;
use std::io::Write;

use crate::{
    csv_utils::write_csv,
    dto::{SummaryRow, TransactionRow},
    Engine, TransactionType,
};

/// Username and password a ledger command logs in with.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// One front-end action.
#[derive(Debug, Clone)]
pub enum Command {
    Register {
        username: String,
        password: String,
        confirm: String,
    },
    Add {
        credentials: Credentials,
        tx_type: TransactionType,
        amount: Decimal,
        description: String,
    },
    List {
        credentials: Credentials,
    },
    /// `position` is 1-based, as printed by `List`.
    Delete {
        credentials: Credentials,
        position: usize,
    },
    Summary {
        credentials: Credentials,
    },
}

/// Runs a single command against the engine and writes its result to the
/// provided writer. Listings and summaries are written as CSV.
///
/// # Errors
/// Returns an error if:
/// * Input validation fails (empty fields, mismatched passwords, bad amount)
/// * The credentials are rejected
/// * A backing file cannot be read or written
/// * Writing to the output fails
pub fn run<W>(engine: &mut Engine, command: Command, mut writer: W) -> Result<(), Box<dyn Error>>
where
    W: Write,
{
    match command {
        Command::Register {
            username,
            password,
            confirm,
        } => {
            engine.register(&username, &password, &confirm)?;
            writeln!(writer, "Account {} created", username.trim())?;
        }
        Command::Add {
            credentials,
            tx_type,
            amount,
            description,
        } => {
            let mut ledger = engine.login(&credentials.username, &credentials.password)?;
            ledger.add_transaction(tx_type, amount, description)?;
            writeln!(writer, "Added {} #{}", tx_type, ledger.len())?;
        }
        Command::List { credentials } => {
            let ledger = engine.login(&credentials.username, &credentials.password)?;
            let rows = ledger
                .transactions()
                .iter()
                .enumerate()
                .map(|(i, tx)| TransactionRow::new(i, tx));
            write_csv(writer, rows)?;
        }
        Command::Delete {
            credentials,
            position,
        } => {
            let mut ledger = engine.login(&credentials.username, &credentials.password)?;
            let removed = match position.checked_sub(1) {
                Some(index) => ledger.delete_transaction(index)?,
                None => {
                    warn!("ignoring delete of position 0");
                    None
                }
            };
            match removed {
                Some(tx) => writeln!(writer, "Deleted {} #{}", tx.tx_type, position)?,
                None => writeln!(writer, "No transaction at position {}", position)?,
            }
        }
        Command::Summary { credentials } => {
            let ledger = engine.login(&credentials.username, &credentials.password)?;
            write_csv(writer, std::iter::once(SummaryRow::from(ledger.summary()?)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TEST_BCRYPT_COST;
    use crate::Config;
    use rust_decimal_macros::dec;
    use std::path::Path;

    fn setup(dir: &Path) -> Engine {
        let mut engine =
            Engine::open(Config::new(dir).with_bcrypt_cost(TEST_BCRYPT_COST)).unwrap();
        engine.register("alice", "pw", "pw").unwrap();
        engine
    }

    fn alice() -> Credentials {
        Credentials {
            username: "alice".to_string(),
            password: "pw".to_string(),
        }
    }

    fn exec(engine: &mut Engine, command: Command) -> Result<String, Box<dyn Error>> {
        let mut output = Vec::new();
        run(engine, command, &mut output)?;
        Ok(String::from_utf8(output)?)
    }

    fn add(engine: &mut Engine, tx_type: TransactionType, amount: Decimal, description: &str) {
        exec(
            engine,
            Command::Add {
                credentials: alice(),
                tx_type,
                amount,
                description: description.to_string(),
            },
        )
        .unwrap();
    }

    #[test]
    fn test_register_output() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let mut engine = setup(dir.path());

        let output = exec(
            &mut engine,
            Command::Register {
                username: " bob ".to_string(),
                password: "x".to_string(),
                confirm: "x".to_string(),
            },
        )?;
        assert_eq!(output, "Account bob created\n");
        Ok(())
    }

    #[test]
    fn test_list_and_summary() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let mut engine = setup(dir.path());
        add(&mut engine, TransactionType::Income, dec!(100.0), "salary");
        add(&mut engine, TransactionType::Expense, dec!(40.5), "groceries");

        let listing = exec(&mut engine, Command::List { credentials: alice() })?;
        let expected = "position,type,amount,description
1,income,100.00,salary
2,expense,40.50,groceries
";
        assert_eq!(listing, expected);

        let summary = exec(&mut engine, Command::Summary { credentials: alice() })?;
        let expected = "total_income,total_expense,balance
100.00,40.50,59.50
";
        assert_eq!(summary, expected);
        Ok(())
    }

    #[test]
    fn test_delete_by_listed_position() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let mut engine = setup(dir.path());
        add(&mut engine, TransactionType::Income, dec!(1), "first");
        add(&mut engine, TransactionType::Expense, dec!(2), "second");
        add(&mut engine, TransactionType::Income, dec!(3), "third");

        let output = exec(
            &mut engine,
            Command::Delete {
                credentials: alice(),
                position: 2,
            },
        )?;
        assert_eq!(output, "Deleted expense #2\n");

        let listing = exec(&mut engine, Command::List { credentials: alice() })?;
        let expected = "position,type,amount,description
1,income,1.00,first
2,income,3.00,third
";
        assert_eq!(listing, expected);
        Ok(())
    }

    #[test]
    fn test_delete_out_of_range_positions() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let mut engine = setup(dir.path());
        add(&mut engine, TransactionType::Income, dec!(1), "only");

        for position in [0, 2, 99] {
            let output = exec(
                &mut engine,
                Command::Delete {
                    credentials: alice(),
                    position,
                },
            )?;
            assert_eq!(output, format!("No transaction at position {}\n", position));
        }

        let summary = exec(&mut engine, Command::Summary { credentials: alice() })?;
        assert!(summary.ends_with("1.00,0.00,1.00\n"));
        Ok(())
    }

    #[test]
    fn test_rejects_bad_password() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let mut engine = setup(dir.path());

        let result = exec(
            &mut engine,
            Command::List {
                credentials: Credentials {
                    username: "alice".to_string(),
                    password: "wrong".to_string(),
                },
            },
        );
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "invalid username or password");
        Ok(())
    }

    #[test]
    fn test_rejects_non_positive_amount() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let mut engine = setup(dir.path());

        let result = exec(
            &mut engine,
            Command::Add {
                credentials: alice(),
                tx_type: TransactionType::Expense,
                amount: dec!(0),
                description: "free".to_string(),
            },
        );
        assert!(result.is_err());

        let listing = exec(&mut engine, Command::List { credentials: alice() })?;
        assert_eq!(listing, "");
        Ok(())
    }
}
