use clap::Parser;
use pocketbook::args::{
    AccountsCommand, Args, Command, ListCommand, TransactionsCommand, TransferCommand,
};
use pocketbook::commands::{self, Context};
use pocketbook::model::{Category, Payee, Tag};
use pocketbook::{Config, Result};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().pocketbook_home().path();

    // Every command except init works on an existing home directory.
    let command = match args.command() {
        Command::Init(init_args) => {
            commands::init(home, init_args).await?.print();
            return Ok(());
        }
        command => command,
    };

    let ctx = open(home).await?;
    let _: () = match command {
        Command::Init(_) => {}
        Command::Login(login_args) => commands::login(&ctx, login_args).await?.print(),
        Command::Signup(signup_args) => commands::signup(&ctx, signup_args).await?.print(),
        Command::Logout => commands::logout(&ctx).await?.print(),
        Command::Whoami => commands::whoami(&ctx).await?.print(),
        Command::Password(password_args) => {
            commands::password(&ctx, password_args).await?.print()
        }

        Command::Accounts(accounts_args) => match accounts_args.command() {
            AccountsCommand::List => commands::accounts_list(&ctx).await?.print(),
            AccountsCommand::Create(args) => commands::account_create(&ctx, args).await?.print(),
            AccountsCommand::Update(args) => commands::account_update(&ctx, args).await?.print(),
            AccountsCommand::Delete(args) => commands::account_delete(&ctx, args).await?.print(),
            AccountsCommand::Select(args) => commands::account_select(&ctx, args).await?.print(),
        },

        Command::Transactions(transactions_args) => match transactions_args.command() {
            TransactionsCommand::List(args) => {
                commands::transactions_list(&ctx, args).await?.print()
            }
            TransactionsCommand::Create(fields) => {
                commands::transaction_create(&ctx, fields).await?.print()
            }
            TransactionsCommand::Update(args) => {
                commands::transaction_update(&ctx, args).await?.print()
            }
            TransactionsCommand::Delete(args) => {
                commands::transaction_delete(&ctx, args).await?.print()
            }
        },

        Command::Transfer(transfer_args) => match transfer_args.command() {
            TransferCommand::Create(fields) => {
                commands::transfer_create(&ctx, fields).await?.print()
            }
            TransferCommand::Update(args) => commands::transfer_update(&ctx, args).await?.print(),
            TransferCommand::Delete(args) => commands::transfer_delete(&ctx, args).await?.print(),
        },

        Command::Categories(list_args) => list::<Category>(&ctx, list_args.command()).await?,
        Command::Payees(list_args) => list::<Payee>(&ctx, list_args.command()).await?,
        Command::Tags(list_args) => list::<Tag>(&ctx, list_args.command()).await?,

        Command::Insights(insights_args) => commands::insights(&ctx, *insights_args.command())
            .await?
            .print(),
    };
    Ok(())
}

async fn open(home: &Path) -> Result<Context> {
    let config = Config::load(home).await?;
    Context::open(config).await
}

async fn list<T>(ctx: &Context, command: &ListCommand) -> Result<()>
where
    T: pocketbook::store::Listed + serde::Serialize,
    T::Id: std::fmt::Display + for<'a> From<&'a str>,
{
    commands::named_list::<T>(ctx, command).await?.print();
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
