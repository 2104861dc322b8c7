use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::selection_item::{CompositeField, Field};

/// The ordered fields requested at one level of an operation. Sibling order
/// is source declaration order and is preserved end to end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    pub items: Vec<Field>,
}

impl SelectionSet {
    pub fn new(items: Vec<Field>) -> Self {
        SelectionSet { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&Field> {
        self.items.first()
    }

    /// The first composite field at this level, in declaration order.
    pub fn first_composite(&self) -> Option<&CompositeField> {
        self.items.iter().find_map(|item| match item {
            Field::Composite(field) => Some(field),
            Field::Scalar(_) => None,
        })
    }
}

impl Display for SelectionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.items.is_empty() {
            return Ok(());
        }

        write!(f, "{{")?;

        write!(
            f,
            "{}",
            self.items
                .iter()
                .map(|v| format!("{}", v))
                .collect::<Vec<_>>()
                .join(" ")
        )?;

        write!(f, "}}")
    }
}
