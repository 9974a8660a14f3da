use anyhow::Result;
use clap::{Parser, Subcommand};

use spendlog::cli::{
    handle_add_expense, handle_add_income, handle_delete, handle_export, handle_health,
    handle_list, handle_passwd, handle_profile_command, handle_register, handle_report_command,
    login, resolve_credentials, AddExpenseArgs, AddIncomeArgs, ExportArgs, ListArgs,
    ProfileCommands, RegisterArgs, ReportCommands,
};
use spendlog::config::AppPaths;
use spendlog::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendlog",
    version,
    about = "Personal expense tracker with per-user ledgers",
    long_about = "spendlog is a multi-user personal expense tracker. Each user \
                  keeps a private ledger of income and expenses, with monthly \
                  and yearly reports, CSV export, and an optional AI-assisted \
                  financial health assessment."
)]
struct Cli {
    /// Username to act as
    #[arg(short, long, global = true, env = "SPENDLOG_USER")]
    user: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, global = true, env = "SPENDLOG_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new user
    Register(RegisterArgs),

    /// Record an income entry
    Income(AddIncomeArgs),

    /// Record an expense entry
    Expense(AddExpenseArgs),

    /// List transactions
    #[command(alias = "ls")]
    List(ListArgs),

    /// Delete a transaction by id
    #[command(alias = "rm")]
    Delete {
        /// Transaction id (as shown by list)
        id: String,
    },

    /// Export transactions as CSV
    Export(ExportArgs),

    /// Summaries of your ledger
    #[command(subcommand)]
    Report(ReportCommands),

    /// Assess your financial health
    Health,

    /// Change your password
    Passwd,

    /// View or update your profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Show data locations
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = AppPaths::new()?;
    let storage = Storage::new(paths)?;

    match cli.command {
        Commands::Register(args) => {
            handle_register(&storage, cli.user, cli.password, args)?;
        }
        Commands::Config => {
            let paths = storage.paths();
            println!("spendlog configuration");
            println!("======================");
            println!("Data directory:  {}", paths.base_dir().display());
            println!("Credential file: {}", paths.users_file().display());
            println!("Ledger directory: {}", paths.ledger_dir().display());
        }
        command => {
            // Everything else acts on one user's ledger and needs a login.
            let credentials = resolve_credentials(cli.user, cli.password)?;
            let session = login(&storage, &credentials)?;

            match command {
                Commands::Income(args) => handle_add_income(&storage, &session, args)?,
                Commands::Expense(args) => handle_add_expense(&storage, &session, args)?,
                Commands::List(args) => handle_list(&storage, &session, args)?,
                Commands::Delete { id } => handle_delete(&storage, &session, &id)?,
                Commands::Export(args) => handle_export(&storage, &session, args)?,
                Commands::Report(cmd) => handle_report_command(&storage, &session, cmd)?,
                Commands::Health => handle_health(&storage, &session)?,
                Commands::Passwd => handle_passwd(&storage, &session, &credentials.password)?,
                Commands::Profile(cmd) => handle_profile_command(&storage, &session, cmd)?,
                Commands::Register(_) | Commands::Config => unreachable!(),
            }
        }
    }

    Ok(())
}
