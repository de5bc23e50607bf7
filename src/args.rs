//! These structs provide the CLI interface for the pocketbook CLI.

use crate::model::{Amount, Currency, EntryKind};
use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// pocketbook: keep track of your accounts, transactions and spending from the command line.
///
/// pocketbook talks to a personal-finance server. Start with `pocketbook init --base-url URL`,
/// then `pocketbook login`. Data fetched from the server is kept in $POCKETBOOK_HOME between
/// runs, and so is your session.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and the configuration file.
    ///
    /// This is the first command you should run. Pass the address of the finance server as
    /// --base-url. The data directory defaults to $HOME/pocketbook, use --pocketbook-home to put
    /// it somewhere else.
    Init(InitArgs),
    /// Sign in with your email and password.
    Login(LoginArgs),
    /// Create a new user and sign in as that user.
    Signup(SignupArgs),
    /// Sign out and forget all locally kept data.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Change your password.
    Password(PasswordArgs),
    /// List, create, edit, delete or select accounts.
    Accounts(AccountsArgs),
    /// List, create, edit or delete the transactions of an account.
    Transactions(TransactionsArgs),
    /// Move money between two of your accounts.
    Transfer(TransferArgs),
    /// Manage spending categories.
    Categories(ListArgs),
    /// Manage payees.
    Payees(ListArgs),
    /// Manage tags.
    Tags(ListArgs),
    /// Show dashboard figures.
    Insights(InsightsArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where pocketbook data and configuration is held. Defaults to ~/pocketbook
    #[arg(long, env = "POCKETBOOK_HOME", default_value_t = default_pocketbook_home())]
    pocketbook_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, pocketbook_home: PathBuf) -> Self {
        Self {
            log_level,
            pocketbook_home: pocketbook_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn pocketbook_home(&self) -> &DisplayPath {
        &self.pocketbook_home
    }
}

/// Args for the `pocketbook init` command.
#[derive(Debug, ClapArgs, Clone)]
pub struct InitArgs {
    /// The address of the finance server, e.g. http://localhost:4000
    #[arg(long)]
    pub(crate) base_url: String,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,

    #[arg(long, env = "POCKETBOOK_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct SignupArgs {
    #[arg(long)]
    pub(crate) email: String,

    #[arg(long)]
    pub(crate) username: String,

    #[arg(long, env = "POCKETBOOK_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct PasswordArgs {
    /// Your current password.
    #[arg(long)]
    pub(crate) old: String,

    /// The password to change to.
    #[arg(long)]
    pub(crate) new: String,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct AccountsArgs {
    #[command(subcommand)]
    pub(crate) command: AccountsCommand,
}

impl AccountsArgs {
    pub fn command(&self) -> &AccountsCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AccountsCommand {
    /// Fetch and list all accounts.
    List,
    /// Open a new account.
    Create(CreateAccountArgs),
    /// Rename an account or change its icon or credit flag.
    Update(UpdateAccountArgs),
    /// Delete an account along with its transactions.
    Delete(IdArgs),
    /// Select the account that `transactions` commands work on. Without an id, clears the
    /// selection.
    Select(SelectArgs),
}

#[derive(Debug, ClapArgs, Clone)]
pub struct CreateAccountArgs {
    #[arg(long)]
    pub(crate) name: String,

    /// One of UAH, USD, EUR, BTC, ETH
    #[arg(long, default_value_t = Currency::Usd)]
    pub(crate) currency: Currency,

    /// The opening balance.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub(crate) balance: Amount,

    /// Allow the balance to go below zero.
    #[arg(long)]
    pub(crate) credit: bool,

    #[arg(long, default_value = "")]
    pub(crate) icon: String,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct UpdateAccountArgs {
    pub(crate) id: String,

    #[arg(long)]
    pub(crate) name: String,

    #[arg(long, default_value = "")]
    pub(crate) icon: String,

    /// Change whether the balance may go below zero.
    #[arg(long)]
    pub(crate) credit: Option<bool>,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct SelectArgs {
    pub(crate) id: Option<String>,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct IdArgs {
    pub(crate) id: String,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct TransactionsArgs {
    #[command(subcommand)]
    pub(crate) command: TransactionsCommand,
}

impl TransactionsArgs {
    pub fn command(&self) -> &TransactionsCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum TransactionsCommand {
    /// List a page of transactions, newest first.
    List(ListTransactionsArgs),
    /// Record a withdrawal or a deposit.
    Create(TransactionFields),
    /// Edit a withdrawal or a deposit.
    Update(UpdateTransactionArgs),
    /// Delete a withdrawal or a deposit.
    Delete(IdArgs),
}

#[derive(Debug, ClapArgs, Clone)]
pub struct ListTransactionsArgs {
    /// The account to list, defaults to the selected account. The account becomes selected.
    #[arg(long)]
    pub(crate) account: Option<String>,

    /// How many transactions to skip.
    #[arg(long)]
    pub(crate) offset: Option<u64>,

    /// How many transactions to fetch at most.
    #[arg(long)]
    pub(crate) limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Withdrawal,
    Deposit,
}

impl From<Direction> for EntryKind {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Withdrawal => EntryKind::Withdrawal,
            Direction::Deposit => EntryKind::Deposit,
        }
    }
}

#[derive(Debug, ClapArgs, Clone)]
pub struct TransactionFields {
    /// The account the money leaves or enters, defaults to the selected account.
    #[arg(long)]
    pub(crate) account: Option<String>,

    #[arg(long, value_enum, default_value_t = Direction::Withdrawal)]
    pub(crate) kind: Direction,

    #[arg(long)]
    pub(crate) amount: Amount,

    #[arg(long)]
    pub(crate) category: Option<String>,

    #[arg(long)]
    pub(crate) payee: Option<String>,

    /// A tag id, can be repeated.
    #[arg(long = "tag")]
    pub(crate) tags: Vec<String>,

    /// RFC 3339, e.g. 2024-05-01T12:00:00Z. Defaults to now when creating. When editing, the
    /// original date is kept if the transaction is known locally, otherwise this is required.
    #[arg(long)]
    pub(crate) date: Option<DateTime<Utc>>,

    #[arg(long, default_value = "")]
    pub(crate) description: String,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct UpdateTransactionArgs {
    pub(crate) id: String,

    #[clap(flatten)]
    pub(crate) fields: TransactionFields,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct TransferArgs {
    #[command(subcommand)]
    pub(crate) command: TransferCommand,
}

impl TransferArgs {
    pub fn command(&self) -> &TransferCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum TransferCommand {
    Create(TransferFields),
    Update(UpdateTransferArgs),
    Delete(IdArgs),
}

#[derive(Debug, ClapArgs, Clone)]
pub struct TransferFields {
    #[arg(long)]
    pub(crate) from: String,

    #[arg(long)]
    pub(crate) to: String,

    /// The amount that leaves the sending account.
    #[arg(long)]
    pub(crate) amount: Amount,

    /// The amount that enters the receiving account, required when the currencies differ.
    #[arg(long)]
    pub(crate) converted: Option<Amount>,

    #[arg(long = "tag")]
    pub(crate) tags: Vec<String>,

    /// Same rules as `transactions create --date`.
    #[arg(long)]
    pub(crate) date: Option<DateTime<Utc>>,

    #[arg(long, default_value = "")]
    pub(crate) description: String,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct UpdateTransferArgs {
    pub(crate) id: String,

    #[clap(flatten)]
    pub(crate) fields: TransferFields,
}

#[derive(Debug, ClapArgs, Clone)]
pub struct ListArgs {
    #[command(subcommand)]
    pub(crate) command: ListCommand,
}

impl ListArgs {
    pub fn command(&self) -> &ListCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ListCommand {
    List,
    /// Create one item per name.
    Create { names: Vec<String> },
    Delete(IdArgs),
}

#[derive(Debug, ClapArgs, Clone)]
pub struct InsightsArgs {
    #[command(subcommand)]
    pub(crate) command: InsightsCommand,
}

impl InsightsArgs {
    pub fn command(&self) -> &InsightsCommand {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum InsightsCommand {
    /// Total balance per month.
    Balance,
    /// Income and expenses this month.
    Overview,
    /// Spending per category this month.
    Statistics,
    /// Transactions of this month across all accounts.
    Recent,
}

fn default_pocketbook_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("pocketbook"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --pocketbook-home or POCKETBOOK_HOME instead of relying on the \
                default home directory.",
            );
            PathBuf::from("pocketbook")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
