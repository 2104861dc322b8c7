use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::selection_set::SelectionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Query => write!(f, "query"),
            OperationKind::Mutation => write!(f, "mutation"),
            OperationKind::Subscription => write!(f, "subscription"),
        }
    }
}

/// One parsed operation, immutable after construction and owned by the
/// request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDocument {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub root: SelectionSet,
}

impl OperationDocument {
    /// The operation name, treating an empty string as absent.
    pub fn operation_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

impl Display for OperationDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }

        write!(f, "{}", self.root)
    }
}
