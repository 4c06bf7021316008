//! Error types for configuration validation
//!
//! Validation is best-effort normalization, so the error surface is small. Only
//! structural problems that would force the validator to discard or coerce user
//! data are reported as errors:
//!
//! 1. **Category shape**: a known hook-type category bound to a scalar or a
//!    sequence instead of a mapping of hooks.
//! 2. **Document shape**: a root value that is not a mapping.
//! 3. **Keys**: mapping keys that cannot be represented as strings, or that
//!    collide once they are.
//!
//! Missing `enabled` options are never errors. They are reported through a
//! [`DiagnosticSink`](crate::sink::DiagnosticSink) and validation continues.

use thiserror::Error;

use crate::node::NodeKind;

/// Errors that can occur while validating a configuration document
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A known hook-type category is not a mapping
    ///
    /// The `ALL` entry cannot be inserted into a scalar or a sequence, and
    /// overwriting the value would silently drop whatever the user wrote.
    #[error("Hook type '{category}' must be a mapping of hooks, found {found}")]
    CategoryNotMapping { category: String, found: NodeKind },

    /// The document root is not a mapping keyed by hook type
    #[error("Configuration root must be a mapping, found {found}")]
    RootNotMapping { found: NodeKind },

    /// A mapping key is not representable as a string
    #[error("Unsupported mapping key: {0}")]
    UnsupportedKey(String),

    /// Two mapping keys share the same textual form
    ///
    /// `true:` and `'true':` both become `"true"`; keeping either one would
    /// drop the other's settings.
    #[error("Duplicate mapping key: '{0}'")]
    DuplicateKey(String),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;
