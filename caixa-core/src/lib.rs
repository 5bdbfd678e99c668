//! caixa-core: ledger and savings-goal accounting for the Caixa dashboard

pub mod error;
pub mod format;
pub mod labels;
pub mod ledger;
pub mod settings;
pub mod snapshot;
pub mod transaction;
pub mod vault;

pub use error::{AccountingError, ValidationError};
pub use format::{format_currency, format_money};
pub use labels::{Labels, Tip};
pub use ledger::{newest_first, recent, request_deletion, DeletionIntent, Totals};
pub use settings::{CurrencyCode, DisplaySettings, Language, NavPosition};
pub use snapshot::Snapshot;
pub use transaction::{
    installment_count, ExpenseCategory, NewTransaction, Transaction, TransactionDraft,
    TransactionKind,
};
pub use vault::{authorize_deposit, DepositIntent, Vault, VaultDraft};
