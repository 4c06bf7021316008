//! Hook-type section completion
//!
//! Guarantees that every known hook type has a section, and that every section
//! has an `ALL` entry, so later stages can index into them unconditionally.

use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::node::{ConfigDocument, ConfigNode};
use crate::registry::HookTypeRegistry;

/// Reserved hook name holding settings shared by every hook of a type
pub const ALL_HOOKS_KEY: &str = "ALL";

/// Ensure each known hook type exists with an `ALL` mapping
///
/// Expects absent values to have been normalized already. Existing keys are
/// never removed or rewritten; missing sections and `ALL` entries are appended
/// after them. An `ALL` entry that is not a mapping is replaced.
///
/// # Errors
///
/// Returns [`ValidationError::CategoryNotMapping`] if a known hook type is
/// bound to a scalar or a sequence. The document may already contain sections
/// added for earlier hook types when this happens.
pub fn complete_schema(document: &mut ConfigDocument, registry: &HookTypeRegistry) -> Result<()> {
    let entries = document.as_map_mut();
    let mut added_sections = 0usize;

    for hook_type in registry.iter() {
        let section = entries.entry(hook_type.to_string()).or_insert_with(|| {
            added_sections += 1;
            ConfigNode::empty_mapping()
        });

        if section.is_absent() {
            *section = ConfigNode::empty_mapping();
        }

        let kind = section.kind();
        let hooks = section
            .as_mapping_mut()
            .ok_or_else(|| ValidationError::CategoryNotMapping {
                category: hook_type.to_string(),
                found: kind,
            })?;

        match hooks.get_mut(ALL_HOOKS_KEY) {
            Some(all) if all.is_mapping() => {}
            Some(all) => {
                debug!(
                    hook_type = %hook_type,
                    found = %all.kind(),
                    "Replacing non-mapping ALL entry with an empty mapping"
                );
                *all = ConfigNode::empty_mapping();
            }
            None => {
                hooks.insert(ALL_HOOKS_KEY.to_string(), ConfigNode::empty_mapping());
            }
        }
    }

    debug!(
        hook_types = registry.len(),
        added_sections, "Completed hook type sections"
    );
    Ok(())
}
