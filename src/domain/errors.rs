use thiserror::Error;

/// Errors raised by the partner workflows.
///
/// Both kinds are shown to the user as a blocking alert and leave the
/// registry unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// One or more required fields were empty on add or edit.
    #[error(
        "Invalid input. Please enter non-empty values for all fields (missing: {}).",
        .missing.join(", ")
    )]
    Validation { missing: Vec<&'static str> },
    #[error(transparent)]
    NotFound(#[from] NotFound),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    /// A selection-dependent action was requested with nothing selected.
    #[error("No partner selected. Please select one to {0}.")]
    NoSelection(&'static str),
    /// A name taken from the list no longer resolves to a partner.
    #[error("Partner '{0}' not found.")]
    Partner(String),
}

impl DomainError {
    /// Short title for the alert popup.
    pub fn title(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "Input Error",
            DomainError::NotFound(_) => "Selection Error",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
