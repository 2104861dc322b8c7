use crate::transaction::FinishedTransaction;

/// Observer for finished transactions.
///
/// Listeners are registered on the agent builder before processing begins
/// and are notified exactly once per transaction. A finished record is
/// published whether or not the transaction was named; listeners must call
/// [`FinishedTransaction::should_name`] and skip the record entirely when
/// it returns false.
pub trait TransactionListener: Send + Sync {
    fn on_finished(&self, transaction: &FinishedTransaction);
}
