//! The remote store the dashboard reads from and writes to.

use async_trait::async_trait;
use caixa_core::{DeletionIntent, DepositIntent, DisplaySettings, Snapshot, TransactionDraft, VaultDraft};

use crate::error::StoreError;

/// Authenticated data operations. Every mutation only reports success;
/// callers re-fetch the snapshot to see its effect.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Snapshot, StoreError>;

    async fn fetch_settings(&self) -> Result<DisplaySettings, StoreError>;

    async fn save_settings(&self, settings: &DisplaySettings) -> Result<(), StoreError>;

    async fn create_transaction(&self, draft: &TransactionDraft) -> Result<(), StoreError>;

    async fn delete_transaction(&self, intent: DeletionIntent) -> Result<(), StoreError>;

    async fn create_vault(&self, draft: &VaultDraft) -> Result<(), StoreError>;

    async fn deposit(&self, intent: DepositIntent) -> Result<(), StoreError>;
}
