use anyhow::Result;
use clap::{Parser, Subcommand};

use calcdeck::cli::{
    handle_activity_command, handle_alert_command, handle_base_command, handle_calc_command,
    handle_coin_command, handle_convert_command, handle_date_command, handle_exchange_command,
    handle_favorite_command, handle_finance_command, handle_history_command,
    handle_portfolio_command, handle_units_command, handle_user_command, ActivityCommands,
    AlertCommands, BaseCommands, CalcArgs, CoinArgs, ConvertArgs, DateCommands, ExchangeCommands,
    FavoriteCommands, FinanceArgs, HistoryCommands, PortfolioCommands, UserCommands,
};
use calcdeck::config::{paths::CalcPaths, settings::Settings};
use calcdeck::logging::{self, LogTarget};
use calcdeck::storage::Storage;

#[derive(Parser)]
#[command(
    name = "calcdeck",
    version,
    about = "Terminal multi-mode calculator",
    long_about = "calcdeck is a terminal calculator with standard, scientific, \
                  programmer, financial, date, unit and currency modes, a coin \
                  flipper and a small investment tracker. Run without a command \
                  (or with `tui`) for the interactive interface."
)]
struct Cli {
    /// Debug logging (overridden by CALCDECK_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Evaluate a key sequence, e.g. `calc 7 + 3 =`
    Calc(CalcArgs),

    /// Programmer mode: radix conversion and bitwise operations
    #[command(subcommand)]
    Base(BaseCommands),

    /// Loan, mortgage and investment calculations
    Finance(FinanceArgs),

    /// Date differences and arithmetic
    #[command(subcommand)]
    Date(DateCommands),

    /// Convert a value between units
    Convert(ConvertArgs),

    /// List unit categories, or the units of one category
    Units {
        category: Option<String>,
    },

    /// Currency exchange
    #[command(subcommand, alias = "fx")]
    Exchange(ExchangeCommands),

    /// Flip a coin
    Coin(CoinArgs),

    /// Register, log in and out
    #[command(subcommand)]
    User(UserCommands),

    /// Your activity log
    #[command(subcommand)]
    Activity(ActivityCommands),

    /// Your saved calculations
    #[command(subcommand)]
    History(HistoryCommands),

    /// Investment holdings and quotes
    #[command(subcommand)]
    Portfolio(PortfolioCommands),

    /// Price alerts
    #[command(subcommand)]
    Alert(AlertCommands),

    /// Favorite symbols
    #[command(subcommand, alias = "fav")]
    Favorite(FavoriteCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = CalcPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    let target = if interactive {
        LogTarget::File(paths.log_file())
    } else {
        LogTarget::Stderr
    };
    logging::init(target, cli.verbose, &settings.log_level)?;

    let storage = Storage::new(&paths)?;

    match cli.command {
        None | Some(Commands::Tui) => calcdeck::tui::run_tui(&storage, &settings, &paths)?,
        Some(Commands::Calc(args)) => handle_calc_command(&storage, &settings, args)?,
        Some(Commands::Base(cmd)) => handle_base_command(&storage, cmd)?,
        Some(Commands::Finance(args)) => handle_finance_command(&storage, &settings, args)?,
        Some(Commands::Date(cmd)) => handle_date_command(&storage, cmd)?,
        Some(Commands::Convert(args)) => handle_convert_command(&storage, args)?,
        Some(Commands::Units { category }) => handle_units_command(category)?,
        Some(Commands::Exchange(cmd)) => handle_exchange_command(&storage, &paths, &settings, cmd)?,
        Some(Commands::Coin(args)) => handle_coin_command(&storage, args)?,
        Some(Commands::User(cmd)) => handle_user_command(&storage, cmd)?,
        Some(Commands::Activity(cmd)) => handle_activity_command(&storage, cmd)?,
        Some(Commands::History(cmd)) => handle_history_command(&storage, cmd)?,
        Some(Commands::Portfolio(cmd)) => {
            handle_portfolio_command(&storage, &paths, &settings, cmd)?
        }
        Some(Commands::Alert(cmd)) => handle_alert_command(&storage, &paths, &settings, cmd)?,
        Some(Commands::Favorite(cmd)) => handle_favorite_command(&storage, cmd)?,
        Some(Commands::Config) => {
            println!("calcdeck configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Rates snapshot:  {}", paths.rates_file().display());
            println!("Quotes snapshot: {}", paths.quotes_file().display());
            println!("Log file:        {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Precision:         {}", settings.precision);
            println!("  Keyboard enabled:  {}", settings.keyboard_enabled);
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Base currency:     {}", settings.exchange.base_currency);
            println!("  Rate refresh:      {}s", settings.exchange.refresh_interval_secs);
            println!("  Log level:         {}", settings.log_level);
        }
    }

    Ok(())
}
