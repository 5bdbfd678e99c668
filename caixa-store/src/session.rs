//! Application state: the last snapshot, settings and totals, replaced
//! wholesale after every confirmed mutation.

use caixa_core::{
    authorize_deposit, format_currency, request_deletion, DisplaySettings, NewTransaction,
    Snapshot, Totals, TransactionDraft, ValidationError, VaultDraft,
};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::error::{SessionError, StoreError};
use crate::store::RemoteStore;

/// Owns the store handle and everything fetched from it.
///
/// Mutations take `&mut self`, so one session never runs two at once. Each
/// one is build → submit → refresh; local state changes only in `refresh`.
pub struct Session<S> {
    store: S,
    snapshot: Snapshot,
    settings: DisplaySettings,
    totals: Totals,
}

impl<S: RemoteStore> Session<S> {
    /// An empty session; call `refresh` before reading state.
    pub fn new(store: S) -> Self {
        Self {
            store,
            snapshot: Snapshot::default(),
            settings: DisplaySettings::default(),
            totals: Totals::default(),
        }
    }

    /// Connect and load the first snapshot.
    pub async fn open(store: S) -> Result<Self, SessionError> {
        let mut session = Self::new(store);
        session.refresh().await?;
        Ok(session)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Format an amount with the session's currency settings.
    pub fn format_amount(&self, value: f64) -> String {
        format_currency(value, &self.settings)
    }

    /// Re-fetch the snapshot and settings, then recompute totals.
    ///
    /// A settings failure other than 401 keeps the previous settings.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let snapshot = self.store.fetch_snapshot().await?;
        let settings = match self.store.fetch_settings().await {
            Ok(settings) => settings,
            Err(StoreError::AuthRequired) => return Err(StoreError::AuthRequired),
            Err(e) => {
                warn!(error = %e, "keeping previous display settings");
                self.settings.clone()
            }
        };

        self.totals = Totals::compute(&snapshot.transactions);
        self.snapshot = snapshot;
        self.settings = settings;

        info!(
            transactions = self.snapshot.transactions.len(),
            vaults = self.snapshot.vaults.len(),
            balance = self.totals.balance,
            "snapshot refreshed"
        );
        Ok(())
    }

    pub async fn add_transaction(
        &mut self,
        input: &NewTransaction,
        today: NaiveDate,
    ) -> Result<TransactionDraft, SessionError> {
        let draft = TransactionDraft::build(input, today, &self.settings.language)?;
        self.store.create_transaction(&draft).await?;
        self.refresh().await?;
        Ok(draft)
    }

    pub async fn delete_transaction(&mut self, id: i64) -> Result<(), SessionError> {
        let intent = request_deletion(&self.snapshot.transactions, id)?;
        self.store.delete_transaction(intent).await?;
        self.refresh().await?;
        Ok(())
    }

    pub async fn create_vault(&mut self, name: &str, target: f64) -> Result<(), SessionError> {
        let draft = VaultDraft::build(name, target)?;
        self.store.create_vault(&draft).await?;
        self.refresh().await?;
        Ok(())
    }

    /// Deposit into a vault if the current balance covers it.
    pub async fn deposit(&mut self, vault_id: i64, amount: f64) -> Result<(), SessionError> {
        let vault = self
            .snapshot
            .vault(vault_id)
            .ok_or(ValidationError::UnknownVault(vault_id))?;
        let intent = authorize_deposit(vault, amount, self.totals.balance)?;
        self.store.deposit(intent).await?;
        self.refresh().await?;
        Ok(())
    }

    pub async fn save_settings(&mut self, settings: DisplaySettings) -> Result<(), SessionError> {
        settings.validate()?;
        self.store.save_settings(&settings).await?;
        self.settings = settings;
        Ok(())
    }
}

/// Today's calendar date in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}
