use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use rust_decimal::Decimal;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use financewise::{run, Command, Config, Credentials, Engine, TransactionType};

/// Personal income and expense tracker backed by JSON files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Directory holding accounts.json and the per-user ledgers
    #[arg(long, env = "FINANCEWISE_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// bcrypt cost used when creating accounts
    #[arg(long, env = "FINANCEWISE_BCRYPT_COST", global = true, default_value_t = bcrypt::DEFAULT_COST)]
    bcrypt_cost: u32,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Args)]
struct Login {
    #[arg(short, long)]
    username: String,

    #[arg(short, long, env = "FINANCEWISE_PASSWORD", hide_env_values = true)]
    password: String,
}

impl From<Login> for Credentials {
    fn from(login: Login) -> Self {
        Credentials {
            username: login.username,
            password: login.password,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Income,
    Expense,
}

impl From<Kind> for TransactionType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Income => TransactionType::Income,
            Kind::Expense => TransactionType::Expense,
        }
    }
}

#[derive(Subcommand)]
enum CliCommand {
    /// Create a new account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "FINANCEWISE_PASSWORD", hide_env_values = true)]
        password: String,
        /// The password again
        #[arg(long)]
        confirm: String,
    },
    /// Record an income or expense
    Add {
        #[command(flatten)]
        login: Login,
        kind: Kind,
        amount: Decimal,
        description: String,
    },
    /// Print all transactions as CSV
    List {
        #[command(flatten)]
        login: Login,
    },
    /// Delete the transaction at a position shown by `list`
    Delete {
        #[command(flatten)]
        login: Login,
        position: usize,
    },
    /// Print income, expense and balance totals as CSV
    Summary {
        #[command(flatten)]
        login: Login,
    },
}

impl From<CliCommand> for Command {
    fn from(command: CliCommand) -> Self {
        match command {
            CliCommand::Register {
                username,
                password,
                confirm,
            } => Command::Register {
                username,
                password,
                confirm,
            },
            CliCommand::Add {
                login,
                kind,
                amount,
                description,
            } => Command::Add {
                credentials: login.into(),
                tx_type: kind.into(),
                amount,
                description,
            },
            CliCommand::List { login } => Command::List {
                credentials: login.into(),
            },
            CliCommand::Delete { login, position } => Command::Delete {
                credentials: login.into(),
                position,
            },
            CliCommand::Summary { login } => Command::Summary {
                credentials: login.into(),
            },
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(err) = run_app() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run_app() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = Config::new(cli.data_dir.unwrap_or_else(Config::default_data_dir))
        .with_bcrypt_cost(cli.bcrypt_cost);

    let mut engine = Engine::open(config)?;
    run(&mut engine, cli.command.into(), std::io::stdout())
}
