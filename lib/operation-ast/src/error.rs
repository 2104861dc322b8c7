#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("An operation was expected, but none were present.")]
    OperationNotFound,

    #[error("Specified operation '{operation_name}' not found.")]
    SpecifiedOperationNotFound { operation_name: String },

    #[error("Multiple operations found, an operation name is required to select one.")]
    MultipleOperationsWithoutName,

    #[error("Fragment definition for '{fragment_name}' not found.")]
    FragmentDefinitionNotFound { fragment_name: String },

    #[error("Fragment '{fragment_name}' spreads into itself.")]
    FragmentCycle { fragment_name: String },
}
