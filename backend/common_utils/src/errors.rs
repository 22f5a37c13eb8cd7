//! Error helpers shared across the workspace

/// The shared result type carrying an [`error_stack::Report`] on failure.
pub type CustomResult<T, E> = error_stack::Result<T, E>;
