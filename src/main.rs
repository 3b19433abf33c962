use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use costbook::api::HttpClient;
use costbook::cli::{
    format_range, handle_budgets, handle_category_command, handle_logout, handle_sign_in,
    handle_status, handle_summary, handle_transaction_command, parse_month_arg, CategoryCommands,
    TransactionCommands,
};
use costbook::config::{logging, settings::API_URL_ENV, CostbookPaths, Session, Settings};
use costbook::CostbookError;

#[derive(Parser)]
#[command(
    name = "costbook",
    version,
    about = "Terminal client for a personal expense tracker",
    long_about = "Costbook talks to an expense-tracking server: sign in, record \
                  expenses by category, set monthly budgets and see where the \
                  month's money went, from the command line or a full-screen TUI."
)]
struct Cli {
    /// Base URL of the expense API (overrides the config file)
    #[arg(long, global = true, env = API_URL_ENV)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui {
        /// Month to open (YYYY-MM, default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Sign in and remember the token
    Login {
        /// Account name
        name: String,
        /// Password (prompted when omitted)
        #[arg(short, long, env = "COSTBOOK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account, then sign in
    Register {
        /// Account name
        name: String,
        /// Password (prompted when omitted)
        #[arg(short, long, env = "COSTBOOK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Check the stored token against the server
    Status,

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Month overview: total, top category and budgets
    Summary {
        /// Month (YYYY-MM, default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Budget progress for a month
    Budgets {
        /// Month (YYYY-MM, default: current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show the date bounds used to query a month
    Range {
        /// Month (YYYY-MM, default: current month)
        month: Option<String>,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths, logging and settings
    let paths = CostbookPaths::new()?;
    if let Err(e) = logging::init(&paths) {
        eprintln!("Warning: {}", e);
    }
    let settings = Settings::load_or_create(&paths)?;

    let result = run(cli, &paths, &settings);
    if let Err(ref e) = result {
        if e
            .downcast_ref::<CostbookError>()
            .is_some_and(|e| e.is_unauthorized())
        {
            eprintln!("Run 'costbook login <name>' to sign in.");
        }
    }
    result
}

fn run(cli: Cli, paths: &CostbookPaths, settings: &Settings) -> Result<()> {
    let base_url = cli
        .api_url
        .clone()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| settings.effective_api_url());

    // Commands that never touch the network
    match &cli.command {
        Some(Commands::Range { month }) => {
            let month = parse_month_arg(month.as_deref())?;
            print!("{}", format_range(month));
            return Ok(());
        }
        Some(Commands::Config) => {
            print_config(paths, settings, &base_url)?;
            return Ok(());
        }
        Some(Commands::Logout) => {
            handle_logout(paths)?;
            return Ok(());
        }
        None => {
            println!("Costbook - personal expense tracker");
            println!();
            println!("Run 'costbook --help' for usage information.");
            println!("Run 'costbook tui' to launch the interactive interface.");
            return Ok(());
        }
        _ => {}
    }

    let session = Session::load(paths)?;
    let mut api = HttpClient::new(&base_url, settings.request_timeout())?
        .with_token(session.token().map(str::to_string));
    info!("using API at {}", api.base_url());

    match cli.command {
        Some(Commands::Tui { month }) => {
            let month = parse_month_arg(month.as_deref())?;
            costbook::tui::run_tui(paths, settings, Box::new(api), month)?;
        }
        Some(Commands::Login { name, password }) => {
            handle_sign_in(&mut api, paths, &name, password, false)?;
        }
        Some(Commands::Register { name, password }) => {
            handle_sign_in(&mut api, paths, &name, password, true)?;
        }
        Some(Commands::Status) => {
            handle_status(&api, &base_url)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&api, settings, cmd)?;
        }
        Some(Commands::Txn(cmd)) => {
            handle_transaction_command(&api, settings, cmd)?;
        }
        Some(Commands::Summary { month }) => {
            handle_summary(&api, settings, parse_month_arg(month.as_deref())?)?;
        }
        Some(Commands::Budgets { month }) => {
            handle_budgets(&api, settings, parse_month_arg(month.as_deref())?)?;
        }
        Some(Commands::Range { .. }) | Some(Commands::Config) | Some(Commands::Logout) | None => {}
    }

    Ok(())
}

fn print_config(paths: &CostbookPaths, settings: &Settings, base_url: &str) -> Result<()> {
    let session = Session::load(paths)?;

    println!("Costbook Configuration");
    println!("======================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Session file:     {}", paths.session_file().display());
    println!("Log file:         {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!("  API URL:         {}", base_url);
    println!("  Currency:        {}", settings.currency_code);
    println!("  Date format:     {}", settings.date_format);
    println!("  Request timeout: {}s", settings.request_timeout().as_secs());
    println!(
        "  Signed in:       {}",
        if session.is_signed_in() { "yes" } else { "no" }
    );
    Ok(())
}
