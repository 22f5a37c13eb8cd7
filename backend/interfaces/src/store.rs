//! Persistence contract for transaction records.

use common_utils::errors::CustomResult;
use domain_types::{errors::StorageError, transaction::Transaction};

/// Storage collaborator owning transaction persistence.
///
/// The reconciler assumes at most one in-flight reconciliation per record
/// and that nothing else mutates the record between `create` and the final
/// `save`; the store is not expected to enforce either.
pub trait TransactionStore {
    fn create(&self, transaction: &Transaction) -> CustomResult<(), StorageError>;

    fn save(&self, transaction: &Transaction) -> CustomResult<(), StorageError>;
}
