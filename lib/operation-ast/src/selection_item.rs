use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::selection_set::SelectionSet;

/// A single requested field. The scalar/composite distinction is resolved
/// once, when the document is constructed, never re-inferred during a
/// traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Field {
    Scalar(ScalarField),
    Composite(CompositeField),
}

/// A leaf field without a nested selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarField {
    pub name: String,
    pub alias: Option<String>,
}

/// A field carrying a nested selection. `children` is non-empty by
/// construction; a field parsed with an empty selection set becomes a
/// [`ScalarField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeField {
    pub name: String,
    pub alias: Option<String>,
    pub children: SelectionSet,
}

impl ScalarField {
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl CompositeField {
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl Field {
    pub fn scalar(name: impl Into<String>) -> Self {
        Field::Scalar(ScalarField {
            name: name.into(),
            alias: None,
        })
    }

    pub fn composite(name: impl Into<String>, children: SelectionSet) -> Self {
        Field::Composite(CompositeField {
            name: name.into(),
            alias: None,
            children,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Field::Scalar(field) => &field.name,
            Field::Composite(field) => &field.name,
        }
    }

    /// The key under which this field appears in the response: its alias
    /// when one was given, its name otherwise.
    pub fn response_key(&self) -> &str {
        match self {
            Field::Scalar(field) => field.response_key(),
            Field::Composite(field) => field.response_key(),
        }
    }

    pub fn children(&self) -> Option<&SelectionSet> {
        match self {
            Field::Scalar(_) => None,
            Field::Composite(field) => Some(&field.children),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Field::Scalar(_))
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Field::Composite(_))
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Scalar(field) => match &field.alias {
                Some(alias) => write!(f, "{}: {}", alias, field.name),
                None => write!(f, "{}", field.name),
            },
            Field::Composite(field) => {
                match &field.alias {
                    Some(alias) => write!(f, "{}: {}", alias, field.name)?,
                    None => write!(f, "{}", field.name)?,
                }
                write!(f, "{}", field.children)
            }
        }
    }
}
