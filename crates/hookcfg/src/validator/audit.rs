//! Enablement audit
//!
//! Hooks that leave `enabled` unset silently inherit whatever the defaults
//! say, which changes under the user when the defaults do. The audit reports
//! every such hook so the user can make the choice explicit.

use tracing::debug;

use crate::node::{ConfigDocument, ConfigNode};
use crate::registry::HookTypeRegistry;
use crate::sink::DiagnosticSink;

use super::schema::ALL_HOOKS_KEY;

/// Hook setting that controls whether a hook runs
pub const ENABLED_KEY: &str = "enabled";

/// Report every hook of a known type that does not set `enabled` explicitly
///
/// Only key presence matters: `enabled: false` is explicit. The `ALL` entry is
/// skipped, and a hook whose settings are not a mapping counts as unset.
/// Warnings follow registry order, then hook order within each type. A single
/// separator follows the warnings when there was at least one.
///
/// Returns the number of warnings emitted.
pub fn audit_enablement(
    document: &ConfigDocument,
    registry: &HookTypeRegistry,
    sink: &dyn DiagnosticSink,
    source_name: Option<&str>,
) -> usize {
    let mut warnings = 0usize;

    for hook_type in registry.iter() {
        let Some(hooks) = document.get(hook_type).and_then(ConfigNode::as_mapping) else {
            continue;
        };

        for (hook_name, settings) in hooks {
            if hook_name == ALL_HOOKS_KEY {
                continue;
            }
            if settings.get(ENABLED_KEY).is_some() {
                continue;
            }

            sink.warning(&missing_enabled_message(hook_type, hook_name, source_name));
            warnings += 1;
        }
    }

    if warnings > 0 {
        sink.separator();
    }

    debug!(warnings, "Enablement audit finished");
    warnings
}

fn missing_enabled_message(hook_type: &str, hook_name: &str, source_name: Option<&str>) -> String {
    let mut message = format!(
        "{}::{} hook does not explicitly set `{}` option",
        hook_type, hook_name, ENABLED_KEY
    );
    if let Some(source) = source_name {
        message.push_str(" in ");
        message.push_str(source);
    }
    message
}
