//! Locally persisted transaction record and its status state machine.

use std::collections::HashMap;

use common_utils::{consts::MAX_TXN_ID_LENGTH, types::MinorUnit};
use strum::Display;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TransactionStatus {
    /// Created locally, gateway outcome not yet known.
    Processing,
    Successful,
    Declined,
}

/// One payment attempt against the gateway. Created in
/// [`TransactionStatus::Processing`] before any network call and moved to
/// a terminal status exactly once, either synchronously (offline flow) or
/// when the gateway redirects back (interactive flow). Records are never
/// deleted.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Gateway-facing transaction id (`TxnId`).
    pub transaction_id: String,
    /// Opaque token identifying this record in return routes.
    pub secret: String,
    pub amount: MinorUnit,
    pub merchant_reference: String,
    pub status: TransactionStatus,
    /// Flattened gateway result payload, filled in at reconciliation.
    pub result: HashMap<String, String>,
    pub created_at: OffsetDateTime,
}

impl Transaction {
    pub fn new(amount: MinorUnit, merchant_reference: impl Into<String>) -> Self {
        // The gateway caps TxnId at 16 characters.
        let mut transaction_id = Uuid::new_v4().simple().to_string();
        transaction_id.truncate(MAX_TXN_ID_LENGTH);

        Self {
            transaction_id,
            secret: Uuid::new_v4().simple().to_string(),
            amount,
            merchant_reference: merchant_reference.into(),
            status: TransactionStatus::Processing,
            result: HashMap::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Moves the record to the terminal status for `success` and reports
    /// whether the stored status actually changed. Re-completing with the
    /// same outcome is a no-op.
    pub fn complete_transaction(&mut self, success: bool) -> bool {
        let next = if success {
            TransactionStatus::Successful
        } else {
            TransactionStatus::Declined
        };
        if self.status == next {
            return false;
        }
        self.status = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transaction_is_processing() {
        let transaction = Transaction::new(MinorUnit::new(1000), "ORDER-1");
        assert_eq!(transaction.status, TransactionStatus::Processing);
        assert!(transaction.transaction_id.len() <= MAX_TXN_ID_LENGTH);
        assert!(!transaction.secret.is_empty());
    }

    #[test]
    fn completion_transitions_once() {
        let mut transaction = Transaction::new(MinorUnit::new(1000), "ORDER-1");

        assert!(transaction.complete_transaction(true));
        assert_eq!(transaction.status, TransactionStatus::Successful);

        // repeating the same outcome reports no change
        assert!(!transaction.complete_transaction(true));

        // flipping the outcome still reports a change
        assert!(transaction.complete_transaction(false));
        assert_eq!(transaction.status, TransactionStatus::Declined);
    }
}
