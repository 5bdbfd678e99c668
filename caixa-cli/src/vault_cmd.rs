use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;
use crate::connect::{open_session, surface};
use crate::render;

#[derive(Subcommand, Debug)]
pub enum VaultCommand {
    /// List savings goals with their progress
    List,

    /// Create a savings goal
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        target: f64,
    },

    /// Move money from the balance into a savings goal
    Deposit {
        id: i64,

        #[arg(long)]
        amount: f64,
    },
}

pub async fn run(cmd: VaultCommand, cfg: &Config, server: Option<&str>) -> Result<()> {
    let mut session = open_session(cfg, server).await?;

    match cmd {
        VaultCommand::List => {
            print!("{}", render::vaults(session.snapshot(), session.settings()));
        }

        VaultCommand::Create { name, target } => {
            session.create_vault(&name, target).await.map_err(surface)?;
            println!("Created {} (goal {}).", name.trim(), session.format_amount(target));
        }

        VaultCommand::Deposit { id, amount } => {
            session.deposit(id, amount).await.map_err(surface)?;
            if let Some(v) = session.snapshot().vault(id) {
                println!(
                    "{}: {} / {} ({}%)",
                    v.name,
                    session.format_amount(v.current),
                    session.format_amount(v.target),
                    v.progress()
                );
            }
            println!("Balance: {}", session.format_amount(session.totals().balance));
        }
    }

    Ok(())
}
