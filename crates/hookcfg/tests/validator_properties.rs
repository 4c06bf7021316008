//! Property-based tests for configuration validation
//!
//! Covers normalization idempotence and totality, section completeness,
//! non-destructiveness, and audit accounting.

use proptest::prelude::*;
use hookcfg::*;

const KNOWN_HOOK_TYPES: [&str; 3] = ["PreCommit", "CommitMsg", "PrePush"];

fn registry() -> HookTypeRegistry {
    HookTypeRegistry::new(KNOWN_HOOK_TYPES)
}

// Strategy for mapping keys, biased towards the reserved names
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => "[A-Za-z][A-Za-z0-9]{0,7}",
        1 => Just(ALL_HOOKS_KEY.to_string()),
        1 => Just(ENABLED_KEY.to_string()),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = ConfigNode> {
    prop_oneof![
        Just(ConfigNode::Absent),
        any::<bool>().prop_map(ConfigNode::from),
        any::<i64>().prop_map(ConfigNode::from),
        "[a-z*. ]{0,10}".prop_map(ConfigNode::from),
    ]
}

fn mapping_of(
    values: impl Strategy<Value = ConfigNode>,
) -> impl Strategy<Value = ConfigNode> {
    prop::collection::vec((key_strategy(), values), 0..6)
        .prop_map(|entries| ConfigNode::Mapping(entries.into_iter().collect()))
}

// Strategy for arbitrary configuration trees
fn node_strategy() -> impl Strategy<Value = ConfigNode> {
    leaf_strategy().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            mapping_of(inner.clone()),
            prop::collection::vec(inner, 0..4).prop_map(ConfigNode::Sequence),
        ]
    })
}

fn hook_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("PreCommit"),
        Just("CommitMsg"),
        Just("PrePush"),
        Just("PostCheckout"),
    ]
    .prop_map(String::from)
}

// A hook-type section is either left empty or maps hook names to settings
fn section_strategy() -> impl Strategy<Value = ConfigNode> {
    prop_oneof![Just(ConfigNode::Absent), mapping_of(node_strategy())]
}

// Strategy for documents whose known sections are structurally valid
fn document_strategy() -> impl Strategy<Value = ConfigDocument> {
    (
        prop::collection::vec((hook_type_strategy(), section_strategy()), 0..5),
        prop::option::of(node_strategy()),
    )
        .prop_map(|(sections, extra)| {
            let mut entries: ConfigMap = sections.into_iter().collect();
            if let Some(extra) = extra {
                entries.insert("verify_signatures".to_string(), extra);
            }
            ConfigDocument::from_map(entries)
        })
}

fn validate_default(document: &ConfigDocument) -> ConfigDocument {
    ConfigValidator::new(registry())
        .validate(document, &ValidationOptions::default_config())
        .expect("Generated documents should validate")
}

fn hooks_without_enabled(document: &ConfigDocument) -> usize {
    KNOWN_HOOK_TYPES
        .iter()
        .filter_map(|hook_type| document.get(hook_type).and_then(ConfigNode::as_mapping))
        .flat_map(|hooks| hooks.iter())
        .filter(|(name, settings)| {
            name.as_str() != ALL_HOOKS_KEY && settings.get(ENABLED_KEY).is_none()
        })
        .count()
}

proptest! {
    /// Normalizing twice is the same as normalizing once
    #[test]
    fn prop_normalize_is_idempotent(node in node_strategy()) {
        let once = normalize(&node);
        prop_assert_eq!(normalize(&once), once);
    }

    /// No absent value is reachable through mappings after normalization
    #[test]
    fn prop_normalize_removes_absent_values(node in node_strategy()) {
        prop_assert!(!normalize(&node).contains_absent());
    }

    /// Normalization keeps mapping keys and their order
    #[test]
    fn prop_normalize_preserves_keys(node in mapping_of(node_strategy())) {
        let normalized = normalize(&node);
        let before: Vec<&String> = node.as_mapping().unwrap().keys().collect();
        let after: Vec<&String> = normalized.as_mapping().unwrap().keys().collect();
        prop_assert_eq!(before, after);
    }

    /// Every known hook type has a section with an ALL mapping
    #[test]
    fn prop_validation_completes_every_section(document in document_strategy()) {
        let validated = validate_default(&document);

        for hook_type in KNOWN_HOOK_TYPES {
            let section = validated.get(hook_type);
            prop_assert!(section.is_some(), "missing section {}", hook_type);
            let all = section.and_then(|s| s.get(ALL_HOOKS_KEY));
            prop_assert!(all.map(ConfigNode::is_mapping).unwrap_or(false));
        }
        prop_assert!(!validated.clone().into_node().contains_absent());
    }

    /// Validation never drops keys or changes hook settings
    #[test]
    fn prop_validation_is_non_destructive(document in document_strategy()) {
        let validated = validate_default(&document);

        for (key, value) in document.iter() {
            let output = validated.get(key);
            prop_assert!(output.is_some(), "dropped key {}", key);
            let output = output.unwrap();

            if !registry().contains(key) {
                let expected = normalize(value);
                prop_assert_eq!(output, &expected);
                continue;
            }

            if let Some(hooks) = value.as_mapping() {
                for (hook_name, settings) in hooks {
                    if hook_name == ALL_HOOKS_KEY {
                        continue;
                    }
                    let expected = normalize(settings);
                    prop_assert_eq!(output.get(hook_name), Some(&expected));
                }
            }
        }
    }

    /// Validating an already validated document changes nothing
    #[test]
    fn prop_validation_is_idempotent(document in document_strategy()) {
        let once = validate_default(&document);
        prop_assert_eq!(validate_default(&once), once);
    }

    /// One warning per hook without `enabled`, and at most one separator
    #[test]
    fn prop_audit_reports_each_implicit_hook(document in document_strategy()) {
        let sink = MemorySink::new();
        let validated = ConfigValidator::new(registry())
            .validate(&document, &ValidationOptions::user(&sink))
            .unwrap();

        let expected = hooks_without_enabled(&validated);
        prop_assert_eq!(sink.warnings().len(), expected);
        prop_assert_eq!(sink.separator_count(), usize::from(expected > 0));
        if expected > 0 {
            let events = sink.events();
            prop_assert_eq!(events.last(), Some(&SinkEvent::Separator));
        }
    }

    /// The default configuration never reaches the sink
    #[test]
    fn prop_default_config_is_never_audited(document in document_strategy()) {
        let sink = MemorySink::new();
        let options = ValidationOptions {
            is_default: true,
            sink: Some(&sink),
            source_name: None,
        };
        ConfigValidator::new(registry()).validate(&document, &options).unwrap();
        prop_assert!(sink.is_empty());
    }

    /// A known hook type bound to a scalar is rejected
    #[test]
    fn prop_scalar_section_is_rejected(
        hook_type in prop::sample::select(KNOWN_HOOK_TYPES.to_vec()),
        value in prop_oneof![
            any::<bool>().prop_map(ConfigNode::from),
            "[a-z]{1,8}".prop_map(ConfigNode::from),
        ],
    ) {
        let mut document = ConfigDocument::new();
        document.insert(hook_type, value);

        let result = ConfigValidator::new(registry())
            .validate(&document, &ValidationOptions::default_config());
        let is_category_error = matches!(
            result,
            Err(ValidationError::CategoryNotMapping { ref category, found: NodeKind::Scalar })
                if category == hook_type
        );
        prop_assert!(is_category_error);
    }
}
