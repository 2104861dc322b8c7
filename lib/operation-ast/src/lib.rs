pub mod document;
pub mod error;
pub mod operation;
pub mod selection_item;
pub mod selection_set;
