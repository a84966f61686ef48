//! Common error infrastructure for sheet-core.
//!
//! Domain-specific errors (`EvalError`, `AttributeError`, `DataFileError`)
//! are defined next to the code that raises them. This module holds the
//! classification shared by all of them, so callers can decide whether to
//! degrade, reject, or abort without matching on every variant.

/// Severity level of an error, used for categorization and handling policy.
///
/// - **Degraded**: the sheet keeps working with a fallback value
/// - **Validation**: invalid input, rejected without changing any state
/// - **Internal**: an invariant of the model was broken
/// - **Fatal**: the data cannot be used by this version of the program
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable by substituting a safe value.
    ///
    /// Examples: a malformed attribute formula evaluates to 0.
    Degraded,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unknown attribute id, setting damage on a non-pool.
    Validation,

    /// Unexpected model inconsistency.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// The input can never be loaded by this build.
    ///
    /// Examples: a data file written by a newer version.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Degraded => "degraded",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the caller may continue with a fallback value.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Degraded)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all sheet-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on how the caller should react, not on impact
pub trait SheetError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
