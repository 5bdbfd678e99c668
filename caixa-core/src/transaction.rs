//! Ledger records: stored transactions and the drafts sent to create them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{positive, required, ValidationError};
use crate::settings::Language;

/// Tolerance used when checking installment arithmetic.
const AMOUNT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Sign used when rendering an amount of this kind.
    pub fn sign(&self) -> char {
        match self {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(ValidationError::Malformed {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

/// Expense classification. Income carries no category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ExpenseCategory {
    #[serde(rename = "fixed")]
    Fixed,
    #[serde(rename = "variable")]
    #[default]
    Variable,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Fixed => "fixed",
            ExpenseCategory::Variable => "variable",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(ExpenseCategory::Fixed),
            "variable" => Ok(ExpenseCategory::Variable),
            other => Err(ValidationError::Malformed {
                field: "category",
                value: other.to_string(),
            }),
        }
    }
}

fn one() -> u32 {
    1
}

/// A transaction as returned by the store snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Assigned by the store
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: Option<ExpenseCategory>,
    pub description: String,
    /// Per-installment value
    pub amount: f64,
    /// Total before division; absent on older records
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default = "one")]
    pub installments: u32,
    #[serde(default = "one")]
    pub current_installment: u32,
    /// Already formatted for the language active when it was created
    pub date: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Original total, falling back to `amount` for single-payment records.
    pub fn total(&self) -> f64 {
        self.total_amount.unwrap_or(self.amount)
    }

    /// `"1/3"` for installment records, `None` otherwise.
    pub fn installment_label(&self) -> Option<String> {
        (self.installments > 1).then(|| format!("{}/{}", self.current_installment, self.installments))
    }

    /// Checks `amount * installments == total` within float tolerance.
    pub fn installments_consistent(&self) -> bool {
        installments_consistent(self.amount, self.total(), self.installments)
    }
}

fn installments_consistent(amount: f64, total: f64, installments: u32) -> bool {
    let expected = if installments > 1 {
        amount * installments as f64
    } else {
        amount
    };
    (expected - total).abs() <= AMOUNT_EPSILON * total.abs().max(1.0)
}

/// Raw input collected for a new transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub description: String,
    /// Total value typed by the user
    pub amount: f64,
    pub category: Option<ExpenseCategory>,
    /// Parsed installment count; absent or non-positive means 1
    pub installments: Option<i64>,
}

/// A not-yet-persisted transaction, serialized in the shape the create
/// endpoint expects.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Option<ExpenseCategory>,
    pub description: String,
    pub amount: f64,
    pub total_amount: f64,
    pub installments: u32,
    pub current_installment: u32,
    pub date: String,
}

impl TransactionDraft {
    /// Validate the input and split the total across its installments.
    ///
    /// `today` is stamped on the draft using `language`'s short date format.
    pub fn build(
        input: &NewTransaction,
        today: NaiveDate,
        language: &Language,
    ) -> Result<Self, ValidationError> {
        let description = required("description", &input.description)?;
        let total = positive("amount", input.amount)?;
        let installments = installment_count(input.installments);

        let amount = if installments > 1 {
            total / installments as f64
        } else {
            total
        };

        let category = match input.kind {
            TransactionKind::Expense => Some(input.category.unwrap_or_default()),
            TransactionKind::Income => None,
        };

        Ok(Self {
            kind: input.kind,
            category,
            description: description.to_string(),
            amount,
            total_amount: total,
            installments,
            current_installment: 1,
            date: language.format_date(today),
        })
    }

    pub fn installments_consistent(&self) -> bool {
        installments_consistent(self.amount, self.total_amount, self.installments)
    }
}

/// Normalize a parsed installment count: absent or non-positive becomes 1.
pub fn installment_count(raw: Option<i64>) -> u32 {
    match raw {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}
