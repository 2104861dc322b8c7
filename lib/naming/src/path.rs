use trace_agent_operation_ast::selection_set::SelectionSet;

/// Reduces a potentially branching field tree to a single representative
/// dotted path.
///
/// At every level the walk descends into the first composite field, in
/// declaration order; a level without composite fields contributes its first
/// field and ends the walk. Sibling branches are discarded on purpose to
/// keep the resulting names low-cardinality for dashboard grouping. An
/// empty root yields the empty string, which callers treat as a degenerate
/// but valid name component.
///
/// Runs in O(depth of the chosen chain), never revisiting siblings once a
/// composite field is picked at a level.
pub fn resolve_path(root: &SelectionSet) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let mut current = root;

    loop {
        match current.first_composite() {
            Some(composite) => {
                segments.push(composite.response_key());
                current = &composite.children;
            }
            None => {
                if let Some(field) = current.first() {
                    segments.push(field.response_key());
                }
                break;
            }
        }
    }

    segments.join(".")
}
