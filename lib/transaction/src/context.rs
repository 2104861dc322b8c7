use tracing::{debug, trace};

use trace_agent_naming::assembler::assemble_transaction_name;
use trace_agent_naming::batch::batch_operation_part;
use trace_agent_naming::operation::operation_part;
use trace_agent_operation_ast::operation::OperationDocument;

use crate::agent::TraceAgent;
use crate::transaction::{FinishedTransaction, Transaction, TransactionId};

/// The operations a transaction will be named from. Whether the batch form
/// applies is decided by the transport that delivered the request, not by
/// element count: a single-element batch is still a batch.
pub enum RequestOperations {
    Single(OperationDocument),
    Batch(Vec<OperationDocument>),
}

impl RequestOperations {
    pub fn operation_part(&self) -> String {
        match self {
            RequestOperations::Single(document) => operation_part(document),
            RequestOperations::Batch(documents) => batch_operation_part(documents),
        }
    }
}

/// Per-request handle carrying a transaction together with the operation
/// documents that belong to it.
///
/// The context is owned by its request's continuation chain and moves
/// through it; there is no shared "current transaction" anywhere, so
/// interleaved requests can never observe each other's documents. `finish`
/// consumes the context, which makes the finish event exactly-once by
/// construction. Dropping a context without finishing (an aborted request)
/// assigns no name and notifies no listener.
pub struct TransactionContext {
    agent: TraceAgent,
    transaction: Transaction,
    operations: Option<RequestOperations>,
}

impl TransactionContext {
    pub(crate) fn new(agent: TraceAgent) -> Self {
        let transaction = Transaction::new();
        trace!("Started transaction {}", transaction.id());

        TransactionContext {
            agent,
            transaction,
            operations: None,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.transaction.id()
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Flags this transaction as an internal sub-graph fetch. Called by
    /// federation-aware instrumentation based on request provenance, any
    /// time before finish.
    pub fn mark_force_ignored(&mut self) {
        self.transaction.mark_force_ignored();
    }

    /// Attaches the parsed operations produced by the execution engine.
    /// The first attachment wins; a repeat indicates an instrumentation
    /// bug and is dropped.
    pub fn set_operations(&mut self, operations: RequestOperations) {
        if self.operations.is_some() {
            debug!(
                "Transaction {} already carries operations, dropping repeat attachment",
                self.id()
            );
            return;
        }
        self.operations = Some(operations);
    }

    /// Finishes the transaction: names it (unless filtered out or no
    /// operations were attached), publishes the finished record to every
    /// registered listener once, and returns the record.
    pub fn finish(mut self) -> FinishedTransaction {
        if self.transaction.should_name() {
            if let Some(operations) = &self.operations {
                let name =
                    assemble_transaction_name(self.agent.config(), &operations.operation_part());
                self.transaction.set_name(name);
            }
        }

        self.transaction.mark_finished();

        let finished = FinishedTransaction {
            id: self.transaction.id(),
            name: self.transaction.name().map(|name| name.to_string()),
            force_ignore: self.transaction.force_ignore(),
        };

        self.agent.emit_finished(&finished);
        finished
    }
}
