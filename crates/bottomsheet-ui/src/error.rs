//! Presentation errors.

/// Errors returned by the presentation adapters.
///
/// The controller itself never errors: its state guards absorb redundant
/// calls and gesture cancellation resolves to a snap-back. These variants
/// cover the one genuinely unrecoverable situation (nowhere to present
/// into) and adapter misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentError {
    /// The hosting style could not resolve a usable container to present
    /// into. There is no retry; the presentation is abandoned.
    NoHostContainer,
    /// A sheet is already presented through this adapter.
    AlreadyPresented,
}

impl std::fmt::Display for PresentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresentError::NoHostContainer => {
                write!(f, "no host container available to present into")
            }
            PresentError::AlreadyPresented => {
                write!(f, "a sheet is already presented through this adapter")
            }
        }
    }
}

impl std::error::Error for PresentError {}
