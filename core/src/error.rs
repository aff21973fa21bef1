//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// A disabled query option is not an error: builders return `None` for it.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A required model element is absent or dangling (unknown entity type,
    /// function import without a function, key segment without keys).
    #[from(ignore)]
    #[display("Invalid Argument: {_0}")]
    InvalidArgument(String),

    /// Generic errors, e.g. a metadata document that fails to deserialize.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
