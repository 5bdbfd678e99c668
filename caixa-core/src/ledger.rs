//! Ledger accounting: totals derived from the transaction list.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::transaction::{Transaction, TransactionKind};

/// Derived balance figures. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl Totals {
    /// Sum `amount` per kind; balance is income minus expenses.
    pub fn compute(transactions: &[Transaction]) -> Self {
        let (income, expenses) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, expenses), t| match t.kind {
                    TransactionKind::Income => (income + t.amount, expenses),
                    TransactionKind::Expense => (income, expenses + t.amount),
                });

        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }
}

/// A validated request to delete one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionIntent {
    pub transaction_id: i64,
}

/// Check `id` refers to a transaction in the current snapshot.
pub fn request_deletion(
    transactions: &[Transaction],
    id: i64,
) -> Result<DeletionIntent, ValidationError> {
    if transactions.iter().any(|t| t.id == id) {
        Ok(DeletionIntent { transaction_id: id })
    } else {
        Err(ValidationError::UnknownTransaction(id))
    }
}

/// The last `n` transactions, most recent first.
pub fn recent(transactions: &[Transaction], n: usize) -> Vec<&Transaction> {
    transactions.iter().rev().take(n).collect()
}

/// All transactions, most recent first. Insertion order is creation order.
pub fn newest_first(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::ExpenseCategory;

    fn txn(id: i64, kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            id,
            kind,
            category: match kind {
                TransactionKind::Expense => Some(ExpenseCategory::Variable),
                TransactionKind::Income => None,
            },
            description: format!("t{id}"),
            amount,
            total_amount: Some(amount),
            installments: 1,
            current_installment: 1,
            date: "01/03/2026".to_string(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(1, TransactionKind::Income, 5000.0),
            txn(2, TransactionKind::Expense, 1200.0),
            txn(3, TransactionKind::Expense, 400.0),
            txn(4, TransactionKind::Income, 250.5),
        ]
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let totals = Totals::compute(&[]);
        assert_eq!(totals, Totals::default());
        assert_eq!(totals.balance, 0.0);
    }

    #[test]
    fn test_totals() {
        let totals = Totals::compute(&sample());
        assert_eq!(totals.income, 5250.5);
        assert_eq!(totals.expenses, 1600.0);
        assert_eq!(totals.balance, totals.income - totals.expenses);
    }

    #[test]
    fn test_totals_ignore_order_and_repeat_identically() {
        let list = sample();
        let mut reversed = list.clone();
        reversed.reverse();

        let first = Totals::compute(&list);
        assert_eq!(first, Totals::compute(&list));
        assert_eq!(first, Totals::compute(&reversed));

        let mut extended = list.clone();
        extended.extend(Vec::new());
        assert_eq!(first, Totals::compute(&extended));
    }

    #[test]
    fn test_installment_record_counts_per_installment_amount() {
        let mut laptop = txn(7, TransactionKind::Expense, 400.0);
        laptop.total_amount = Some(1200.0);
        laptop.installments = 3;
        let totals = Totals::compute(&[txn(1, TransactionKind::Income, 1000.0), laptop]);
        assert_eq!(totals.expenses, 400.0);
        assert_eq!(totals.balance, 600.0);
    }

    #[test]
    fn test_request_deletion() {
        let list = sample();
        assert_eq!(
            request_deletion(&list, 3),
            Ok(DeletionIntent { transaction_id: 3 })
        );
        assert_eq!(
            request_deletion(&list, 99),
            Err(ValidationError::UnknownTransaction(99))
        );
    }

    #[test]
    fn test_recent_is_newest_first() {
        let list = sample();
        let ids: Vec<i64> = recent(&list, 2).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 3]);

        let all: Vec<i64> = newest_first(&list).iter().map(|t| t.id).collect();
        assert_eq!(all, vec![4, 3, 2, 1]);

        assert_eq!(recent(&list, 10).len(), 4);
    }
}
