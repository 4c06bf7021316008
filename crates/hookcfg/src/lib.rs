//! Hook Configuration Validation
//!
//! Validates and normalizes hook configuration documents before they are
//! merged with built-in defaults and used to drive hook execution.
//!
//! # Overview
//!
//! A configuration document is a mapping keyed by hook type (`PreCommit`,
//! `CommitMsg`, ...). Each hook type maps hook names to their settings, with a
//! reserved `ALL` entry holding settings shared by every hook of that type:
//!
//! ```yaml
//! PreCommit:
//!   ALL:
//!     quiet: true
//!   TrailingWhitespace:
//!     enabled: true
//!   RuboCop:
//!     enabled: false
//! CommitMsg:
//! ```
//!
//! # Architecture
//!
//! - **Data model** (`node`): `ConfigNode` tree with an explicit `Absent` variant
//! - **Hook types** (`registry`): caller-supplied list of known hook types
//! - **Validation** (`validator`): normalize, complete, then audit
//! - **Diagnostics** (`sink`): where audit warnings are reported
//!
//! # Quick Start
//!
//! ```
//! use hookcfg::{ConfigDocument, ConfigValidator, HookTypeRegistry, TracingSink, ValidationOptions};
//!
//! let validator = ConfigValidator::new(HookTypeRegistry::new(["PreCommit", "CommitMsg"]));
//!
//! let defaults = ConfigDocument::from_yaml_str("PreCommit:\n  TrailingWhitespace:\n    enabled: true\n")?;
//! let defaults = validator.validate(&defaults, &ValidationOptions::default_config())?;
//!
//! let user = ConfigDocument::from_yaml_str("CommitMsg:\n")?;
//! let user = validator.validate(&user, &ValidationOptions::user(&TracingSink))?;
//!
//! assert!(defaults.contains_key("CommitMsg"));
//! assert!(user.contains_key("PreCommit"));
//! # Ok::<(), hookcfg::ValidationError>(())
//! ```
//!
//! # Error Handling
//!
//! Structural problems return `Result<T>`, an alias for
//! `std::result::Result<T, ValidationError>`. Missing `enabled` options are
//! diagnostics only and never fail validation.
//!
//! # Thread Safety
//!
//! Validation keeps no state between calls. Sinks are `Send + Sync`, so one
//! sink can be shared by concurrent validations.

pub mod error;
pub mod node;
pub mod registry;
pub mod sink;
pub mod validator;

// Re-export public types
pub use error::{Result, ValidationError};
pub use node::{ConfigDocument, ConfigMap, ConfigNode, NodeKind, Scalar};
pub use registry::HookTypeRegistry;
pub use sink::{DiagnosticSink, MemorySink, SinkEvent, TracingSink, WriterSink};
pub use validator::{
    audit_enablement, complete_schema, normalize, normalize_document, ConfigValidator,
    ValidationOptions, ALL_HOOKS_KEY, ENABLED_KEY,
};
