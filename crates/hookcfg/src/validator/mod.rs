//! Configuration validation pipeline
//!
//! Validation runs three passes in a fixed order:
//!
//! 1. **Normalize** (`normalize`): absent values become empty mappings
//! 2. **Complete** (`schema`): every known hook type gets a section with an `ALL` entry
//! 3. **Audit** (`audit`): hooks without an explicit `enabled` are reported
//!
//! The audit only runs for user configuration and only when a sink is given.
//!
//! # Examples
//!
//! ```
//! use hookcfg::{ConfigDocument, ConfigValidator, HookTypeRegistry, MemorySink, ValidationOptions};
//!
//! let registry = HookTypeRegistry::new(["PreCommit", "CommitMsg"]);
//! let validator = ConfigValidator::new(registry);
//!
//! let user = ConfigDocument::from_yaml_str("PreCommit:\n  FooHook:\n").unwrap();
//! let sink = MemorySink::new();
//! let validated = validator
//!     .validate(&user, &ValidationOptions::user(&sink))
//!     .unwrap();
//!
//! assert!(validated.contains_key("CommitMsg"));
//! assert_eq!(sink.warnings().len(), 1);
//! ```

pub mod audit;
pub mod normalize;
pub mod schema;

pub use audit::{audit_enablement, ENABLED_KEY};
pub use normalize::{normalize, normalize_document};
pub use schema::{complete_schema, ALL_HOOKS_KEY};

use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::node::ConfigDocument;
use crate::registry::HookTypeRegistry;
use crate::sink::DiagnosticSink;

/// Per-call validation settings
#[derive(Clone, Default)]
pub struct ValidationOptions<'a> {
    /// Whether the document is the built-in default configuration
    pub is_default: bool,

    /// Where audit warnings go; the audit is skipped when this is `None`
    pub sink: Option<&'a dyn DiagnosticSink>,

    /// Name of the file the document came from, mentioned in warnings
    pub source_name: Option<String>,
}

impl<'a> ValidationOptions<'a> {
    /// Options for the built-in default configuration (never audited)
    pub fn default_config() -> Self {
        Self {
            is_default: true,
            ..Self::default()
        }
    }

    /// Options for user configuration, reporting to `sink`
    pub fn user(sink: &'a dyn DiagnosticSink) -> Self {
        Self {
            is_default: false,
            sink: Some(sink),
            source_name: None,
        }
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    fn audit_sink(&self) -> Option<&'a dyn DiagnosticSink> {
        if self.is_default {
            None
        } else {
            self.sink
        }
    }
}

impl fmt::Debug for ValidationOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationOptions")
            .field("is_default", &self.is_default)
            .field("sink", &self.sink.map(|_| "DiagnosticSink"))
            .field("source_name", &self.source_name)
            .finish()
    }
}

/// Validates and normalizes configuration documents against a set of hook types
#[derive(Debug, Clone)]
pub struct ConfigValidator {
    registry: HookTypeRegistry,
}

impl ConfigValidator {
    pub fn new(registry: HookTypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HookTypeRegistry {
        &self.registry
    }

    /// Validate a document, returning its normalized form
    ///
    /// The input is left untouched. Audit findings go to the sink in
    /// `options` and never cause an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a known hook type is bound to a scalar or a
    /// sequence.
    pub fn validate(
        &self,
        document: &ConfigDocument,
        options: &ValidationOptions<'_>,
    ) -> Result<ConfigDocument> {
        debug!(
            is_default = options.is_default,
            hook_types = self.registry.len(),
            entries = document.len(),
            "Validating hook configuration"
        );

        let mut validated = normalize_document(document);
        complete_schema(&mut validated, &self.registry)?;

        if let Some(sink) = options.audit_sink() {
            audit_enablement(
                &validated,
                &self.registry,
                sink,
                options.source_name.as_deref(),
            );
        }

        Ok(validated)
    }
}
