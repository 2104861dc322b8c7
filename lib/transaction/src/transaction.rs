use std::fmt::Display;

use serde::Serialize;
use tracing::{debug, warn};
use ulid::Ulid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TransactionId(Ulid);

impl TransactionId {
    pub(crate) fn new() -> Self {
        TransactionId(Ulid::new())
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One client request's transaction record.
///
/// `name` is write-once: it is assigned at most once, when the transaction
/// finishes, and never changes afterwards. `force_ignore` marks internal
/// sub-graph fetches of a federated execution; it is set by collaborating
/// instrumentation before finish and only ever read here.
#[derive(Debug)]
pub struct Transaction {
    id: TransactionId,
    name: Option<String>,
    force_ignore: bool,
    finished: bool,
}

impl Transaction {
    pub(crate) fn new() -> Self {
        Transaction {
            id: TransactionId::new(),
            name: None,
            force_ignore: false,
            finished: false,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn force_ignore(&self) -> bool {
        self.force_ignore
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether this transaction should receive a name. Internal sub-graph
    /// fetches are flagged by the instrumentation layer; the filter trusts
    /// the flag and does no inference of its own.
    pub fn should_name(&self) -> bool {
        !self.force_ignore
    }

    pub(crate) fn mark_force_ignored(&mut self) {
        if self.finished {
            warn!(
                "Ignoring force_ignore on already finished transaction {}",
                self.id
            );
            return;
        }
        self.force_ignore = true;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        if let Some(existing) = &self.name {
            debug!(
                "Transaction {} already named '{}', keeping it",
                self.id, existing
            );
            return;
        }
        self.name = Some(name);
    }

    pub(crate) fn mark_finished(&mut self) {
        self.finished = true;
    }
}

/// Immutable snapshot published to listeners when a transaction finishes.
/// Consumers must check [`FinishedTransaction::should_name`] before
/// trusting `name`.
#[derive(Debug, Clone, Serialize)]
pub struct FinishedTransaction {
    pub id: TransactionId,
    pub name: Option<String>,
    pub force_ignore: bool,
}

impl FinishedTransaction {
    pub fn should_name(&self) -> bool {
        !self.force_ignore
    }
}
