use anyhow::Result;
use caixa_core::{ExpenseCategory, NewTransaction, TransactionKind};
use caixa_store::today_in;
use clap::Subcommand;

use crate::auth::confirm;
use crate::config::Config;
use crate::connect::{open_session, surface};
use crate::render;

#[derive(Subcommand, Debug)]
pub enum TxCommand {
    /// List every transaction, most recent first
    List,

    /// Record income or an expense (optionally split into installments)
    Add {
        /// income | expense
        #[arg(long = "type")]
        kind: TransactionKind,

        #[arg(long)]
        description: String,

        /// Total amount; divided across installments when there are several
        #[arg(long)]
        amount: f64,

        /// fixed | variable (expenses only; default variable)
        #[arg(long)]
        category: Option<ExpenseCategory>,

        /// Number of installments (default 1)
        #[arg(long, allow_negative_numbers = true)]
        installments: Option<i64>,
    },

    /// Delete a transaction by id
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
}

pub async fn run(cmd: TxCommand, cfg: &Config, server: Option<&str>) -> Result<()> {
    let mut session = open_session(cfg, server).await?;

    match cmd {
        TxCommand::List => {
            print!("{}", render::transactions(session.snapshot(), session.settings()));
        }

        TxCommand::Add {
            kind,
            description,
            amount,
            category,
            installments,
        } => {
            let input = NewTransaction {
                kind,
                description,
                amount,
                category,
                installments,
            };
            let today = today_in(cfg.timezone()?);
            let draft = session.add_transaction(&input, today).await.map_err(surface)?;

            if draft.installments > 1 {
                println!(
                    "Saved {} ({}x {}, total {}).",
                    draft.description,
                    draft.installments,
                    session.format_amount(draft.amount),
                    session.format_amount(draft.total_amount)
                );
            } else {
                println!(
                    "Saved {} ({}).",
                    draft.description,
                    session.format_amount(draft.amount)
                );
            }
            println!("Balance: {}", session.format_amount(session.totals().balance));
        }

        TxCommand::Delete { id, yes } => {
            if let Some(t) = session.snapshot().transaction(id) {
                if !yes && !confirm(&format!("Delete #{} {}?", t.id, t.description))? {
                    println!("Kept.");
                    return Ok(());
                }
            }
            session.delete_transaction(id).await.map_err(surface)?;
            println!("Deleted #{id}.");
            println!("Balance: {}", session.format_amount(session.totals().balance));
        }
    }

    Ok(())
}
