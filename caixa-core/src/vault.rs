//! Savings goals ("caixinhas"): progress and deposit gating.

use serde::{Deserialize, Serialize};

use crate::error::{positive, required, AccountingError, Result, ValidationError};

/// A named savings goal as returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vault {
    pub id: i64,
    pub name: String,
    /// Goal amount, fixed at creation
    pub target: f64,
    /// Accumulated deposits
    #[serde(default)]
    pub current: f64,
}

impl Vault {
    /// Whole-number percent reached, capped at 100.
    ///
    /// A non-positive target counts as complete once anything is deposited.
    pub fn progress(&self) -> u8 {
        if self.target <= 0.0 || !self.target.is_finite() {
            return if self.current > 0.0 { 100 } else { 0 };
        }
        let fraction = (self.current / self.target).clamp(0.0, 1.0);
        if fraction.is_nan() {
            return 0;
        }
        (fraction * 100.0).round() as u8
    }

    /// Amount still missing to hit the target, never negative.
    pub fn remaining(&self) -> f64 {
        (self.target - self.current).max(0.0)
    }
}

/// A new savings goal. Only `name` and `target` go on the wire; the store
/// starts every vault at zero.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VaultDraft {
    pub name: String,
    pub target: f64,
    #[serde(skip)]
    pub current: f64,
}

impl VaultDraft {
    pub fn build(name: &str, target: f64) -> std::result::Result<Self, ValidationError> {
        let name = required("name", name)?;
        let target = positive("target", target)?;
        Ok(Self {
            name: name.to_string(),
            target,
            current: 0.0,
        })
    }
}

/// An approved deposit, ready to hand to the store.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct DepositIntent {
    #[serde(skip)]
    pub vault_id: i64,
    pub amount: f64,
}

/// Gate a deposit against the ledger balance.
///
/// This only guards against obvious overdrafts on the client; the vault's
/// `current` is left alone until the store confirms and the snapshot is
/// re-fetched.
pub fn authorize_deposit(vault: &Vault, amount: f64, balance: f64) -> Result<DepositIntent> {
    let amount = positive("amount", amount)?;
    if amount > balance {
        return Err(AccountingError::InsufficientFunds {
            requested: amount,
            available: balance,
        });
    }
    Ok(DepositIntent {
        vault_id: vault.id,
        amount,
    })
}
