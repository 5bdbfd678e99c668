//! The full copy of a user's data as last fetched from the store.

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;
use crate::vault::Vault;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub username: String,
    /// Creation order
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default, rename = "caixinhas")]
    pub vaults: Vec<Vault>,
}

impl Snapshot {
    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn vault(&self, id: i64) -> Option<&Vault> {
        self.vaults.iter().find(|v| v.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_store_payload() {
        let json = r#"{
            "username": "ana",
            "transactions": [
                {"id": 1, "type": "income", "category": null, "description": "Salário",
                 "amount": 5000.0, "total_amount": 5000.0, "installments": 1,
                 "current_installment": 1, "date": "05/03/2026"}
            ],
            "caixinhas": [{"id": 2, "name": "Viagem", "target": 3000.0, "current": 150.0}]
        }"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.username, "ana");
        assert_eq!(snap.transactions.len(), 1);
        assert_eq!(snap.vault(2).map(|v| v.progress()), Some(5));
        assert!(snap.transaction(1).is_some_and(|t| t.is_income()));
        assert!(snap.vault(9).is_none());
    }
}
