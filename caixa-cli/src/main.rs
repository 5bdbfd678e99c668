use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod connect;
mod render;
mod settings_cmd;
mod state;
mod tx_cmd;
mod vault_cmd;

use config::{init_config, load_config};
use caixa_core::Language;
use caixa_store::today_in;
use connect::{open_session, resolve_base_url};
use settings_cmd::SettingsCommand;
use tx_cmd::TxCommand;
use vault_cmd::VaultCommand;

#[derive(Parser, Debug)]
#[command(
    name = "caixa",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CAIXA_BUILD_SHA"), ")"),
    about = "Personal finance dashboard: balance, transactions and savings goals"
)]
struct Cli {
    /// Store base URL (overrides config.toml and the logged-in store)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Log requests and refreshes to stderr
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account on the store
    Signup {
        #[arg(long)]
        username: Option<String>,
    },

    /// Log in and remember the session token in ~/.caixa/session.json
    Login {
        #[arg(long)]
        username: Option<String>,
    },

    /// End the session and forget the token
    Logout,

    /// Balance, income, expenses, recent activity and savings goals
    Dashboard,

    /// Financial tips, in the stored display language unless one is given
    Tips {
        /// pt-BR | en-US | es-ES
        #[arg(long)]
        language: Option<Language>,
    },

    /// Transactions
    Tx {
        #[command(subcommand)]
        command: TxCommand,
    },

    /// Savings goals (caixinhas)
    Vault {
        #[command(subcommand)]
        command: VaultCommand,
    },

    /// Display settings stored on the server
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Local configuration (~/.caixa/config.toml)
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,

    /// Print the effective configuration
    Show,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = load_config()?;
    let server = cli.server.as_deref();

    match cli.command {
        Command::Signup { username } => {
            let base_url = resolve_base_url(&cfg, server, None);
            auth::signup(&cfg, &base_url, username).await?;
        }

        Command::Login { username } => {
            let base_url = resolve_base_url(&cfg, server, None);
            auth::login(&cfg, &base_url, username).await?;
        }

        Command::Logout => {
            auth::logout(&cfg).await?;
        }

        Command::Dashboard => {
            let session = open_session(&cfg, server).await?;
            print!(
                "{}",
                render::dashboard(
                    session.snapshot(),
                    session.totals(),
                    session.settings(),
                    cfg.display.recent_limit,
                    today_in(cfg.timezone()?)
                )
            );
        }

        Command::Tips { language } => {
            let language = match language {
                Some(language) => language,
                None => open_session(&cfg, server).await?.settings().language.clone(),
            };
            print!("{}", render::tips(&language));
        }

        Command::Tx { command } => tx_cmd::run(command, &cfg, server).await?,

        Command::Vault { command } => vault_cmd::run(command, &cfg, server).await?,

        Command::Settings { command } => settings_cmd::run(command, &cfg, server).await?,

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config()?,
            ConfigCommand::Show => {
                println!("{}", toml::to_string_pretty(&cfg)?);
                println!("# file: {}", config::config_path()?.display());
            }
        },
    }

    Ok(())
}
