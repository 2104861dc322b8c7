use std::collections::HashMap;

use graphql_parser::query as query_ast;
use tracing::trace;

use crate::error::DocumentError;
use crate::operation::{OperationDocument, OperationKind};
use crate::selection_item::{CompositeField, Field, ScalarField};
use crate::selection_set::SelectionSet;

/// Fragment definitions of a parsed document, keyed by fragment name.
pub type FragmentMap<'a, 'doc> = HashMap<&'doc str, &'doc query_ast::FragmentDefinition<'a, String>>;

impl OperationDocument {
    /// Builds an [`OperationDocument`] from an already-parsed document.
    ///
    /// The executable operation is selected by `operation_name` when one is
    /// given, otherwise the document must contain exactly one operation.
    /// Inline fragments and fragment spreads are flattened into the
    /// enclosing selection set here, in declaration order, so traversals
    /// downstream only ever see plain fields.
    pub fn from_document<'a>(
        document: &query_ast::Document<'a, String>,
        operation_name: Option<&str>,
    ) -> Result<Self, DocumentError> {
        let fragments: FragmentMap<'a, '_> = document
            .definitions
            .iter()
            .filter_map(|definition| match definition {
                query_ast::Definition::Fragment(fragment) => {
                    Some((fragment.name.as_str(), fragment))
                }
                _ => None,
            })
            .collect();

        let mut operations = document.definitions.iter().filter_map(|definition| {
            match definition {
                query_ast::Definition::Operation(operation) => Some(operation),
                _ => None,
            }
        });

        let operation = match operation_name {
            Some(name) => operations
                .find(|operation| operation_definition_name(operation) == Some(name))
                .ok_or_else(|| DocumentError::SpecifiedOperationNotFound {
                    operation_name: name.to_string(),
                })?,
            None => {
                let first = operations.next().ok_or(DocumentError::OperationNotFound)?;
                if operations.next().is_some() {
                    return Err(DocumentError::MultipleOperationsWithoutName);
                }
                first
            }
        };

        Self::from_operation(operation, &fragments)
    }

    pub fn from_operation<'a>(
        operation: &query_ast::OperationDefinition<'a, String>,
        fragments: &FragmentMap<'a, '_>,
    ) -> Result<Self, DocumentError> {
        let (kind, name, selection_set) = match operation {
            query_ast::OperationDefinition::SelectionSet(selection_set) => {
                (OperationKind::Query, None, selection_set)
            }
            query_ast::OperationDefinition::Query(query) => {
                (OperationKind::Query, query.name.clone(), &query.selection_set)
            }
            query_ast::OperationDefinition::Mutation(mutation) => (
                OperationKind::Mutation,
                mutation.name.clone(),
                &mutation.selection_set,
            ),
            query_ast::OperationDefinition::Subscription(subscription) => (
                OperationKind::Subscription,
                subscription.name.clone(),
                &subscription.selection_set,
            ),
        };

        let root = convert_selection_set(selection_set, fragments, &mut Vec::new())?;
        let document = OperationDocument { kind, name, root };

        trace!(
            "Constructed operation document (operation name={:?}): {}",
            document.name,
            document
        );

        Ok(document)
    }
}

fn convert_selection_set<'a, 'doc>(
    selection_set: &'doc query_ast::SelectionSet<'a, String>,
    fragments: &FragmentMap<'a, 'doc>,
    spread_stack: &mut Vec<&'doc str>,
) -> Result<SelectionSet, DocumentError> {
    let mut items = Vec::with_capacity(selection_set.items.len());
    collect_fields(selection_set, fragments, spread_stack, &mut items)?;
    Ok(SelectionSet::new(items))
}

fn collect_fields<'a, 'doc>(
    selection_set: &'doc query_ast::SelectionSet<'a, String>,
    fragments: &FragmentMap<'a, 'doc>,
    spread_stack: &mut Vec<&'doc str>,
    out: &mut Vec<Field>,
) -> Result<(), DocumentError> {
    for selection in &selection_set.items {
        match selection {
            query_ast::Selection::Field(field) => {
                let children =
                    convert_selection_set(&field.selection_set, fragments, spread_stack)?;

                // The scalar/composite split is decided here, once.
                out.push(match children.is_empty() {
                    true => Field::Scalar(ScalarField {
                        name: field.name.clone(),
                        alias: field.alias.clone(),
                    }),
                    false => Field::Composite(CompositeField {
                        name: field.name.clone(),
                        alias: field.alias.clone(),
                        children,
                    }),
                });
            }
            query_ast::Selection::InlineFragment(inline_fragment) => {
                collect_fields(
                    &inline_fragment.selection_set,
                    fragments,
                    spread_stack,
                    out,
                )?;
            }
            query_ast::Selection::FragmentSpread(spread) => {
                let fragment_name = spread.fragment_name.as_str();

                if spread_stack.contains(&fragment_name) {
                    return Err(DocumentError::FragmentCycle {
                        fragment_name: fragment_name.to_string(),
                    });
                }

                let definition = fragments.get(fragment_name).ok_or_else(|| {
                    DocumentError::FragmentDefinitionNotFound {
                        fragment_name: fragment_name.to_string(),
                    }
                })?;

                spread_stack.push(fragment_name);
                collect_fields(&definition.selection_set, fragments, spread_stack, out)?;
                spread_stack.pop();
            }
        }
    }

    Ok(())
}

fn operation_definition_name<'doc>(
    operation: &'doc query_ast::OperationDefinition<'_, String>,
) -> Option<&'doc str> {
    match operation {
        query_ast::OperationDefinition::SelectionSet(_) => None,
        query_ast::OperationDefinition::Query(query) => query.name.as_deref(),
        query_ast::OperationDefinition::Mutation(mutation) => mutation.name.as_deref(),
        query_ast::OperationDefinition::Subscription(subscription) => {
            subscription.name.as_deref()
        }
    }
}
