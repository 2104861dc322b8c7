use trace_agent_operation_ast::operation::OperationDocument;

use crate::path::resolve_path;

/// Stands in for the operation name when the client did not provide one.
pub const ANONYMOUS_PLACEHOLDER: &str = "<anonymous>";

/// The operation-name segment of a transaction name:
/// `<kind>/<name-or-placeholder>/<resolved-path>`, with the trailing path
/// segment omitted when the resolved path is empty.
pub fn operation_part(document: &OperationDocument) -> String {
    let name = document.operation_name().unwrap_or(ANONYMOUS_PLACEHOLDER);
    let path = resolve_path(&document.root);

    match path.is_empty() {
        true => format!("{}/{}", document.kind, name),
        false => format!("{}/{}/{}", document.kind, name, path),
    }
}
