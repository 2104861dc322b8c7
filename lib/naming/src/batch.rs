use trace_agent_operation_ast::operation::OperationDocument;

use crate::operation::operation_part;

/// Marks names of requests delivered over the batch transport.
pub const BATCH_SEGMENT: &str = "batch";

/// The composite operation-name segment for a batch request: the
/// [`operation_part`] of every element, joined with `/` in submission
/// order, under a leading `batch/` marker.
///
/// The marker tracks how the request was delivered, not how many elements
/// it carries: a single-element batch still uses the batch form, while an
/// individually submitted operation never does.
pub fn batch_operation_part(documents: &[OperationDocument]) -> String {
    let parts = documents
        .iter()
        .map(operation_part)
        .collect::<Vec<_>>()
        .join("/");

    format!("{}/{}", BATCH_SEGMENT, parts)
}
