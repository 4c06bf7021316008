//! Configuration tree data model
//!
//! A parsed configuration is a tree of [`ConfigNode`] values. Absent values
//! (YAML `~`, `null`, or a key with nothing after the colon) are an explicit
//! variant rather than a missing entry, so the normalization pass can rewrite
//! them and the type system can tell a "missing value" apart from a sub-tree.
//!
//! # Examples
//!
//! ```
//! use hookcfg::{ConfigDocument, ConfigNode};
//!
//! let doc = ConfigDocument::from_yaml_str("PreCommit:\n  FooHook:\n").unwrap();
//! let pre_commit = doc.get("PreCommit").and_then(ConfigNode::as_mapping).unwrap();
//! assert!(pre_commit["FooHook"].is_absent());
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::{Number, Value};

use crate::error::{Result, ValidationError};

/// Insertion-ordered, string-keyed mapping of configuration nodes
pub type ConfigMap = IndexMap<String, ConfigNode>;

/// A leaf value in the configuration tree
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    String(String),
}

/// The shape of a [`ConfigNode`], used in diagnostics and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Absent,
    Mapping,
    Scalar,
    Sequence,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Absent => "absent",
            NodeKind::Mapping => "mapping",
            NodeKind::Scalar => "scalar",
            NodeKind::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

/// A node in the configuration tree
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConfigNode {
    /// No value was given
    #[default]
    Absent,

    /// Nested settings keyed by name
    Mapping(ConfigMap),

    /// A boolean, number or string
    Scalar(Scalar),

    /// A list of values, treated as opaque by the validator
    Sequence(Vec<ConfigNode>),
}

impl ConfigNode {
    /// Create an empty mapping node
    pub fn empty_mapping() -> Self {
        ConfigNode::Mapping(ConfigMap::new())
    }

    /// Shape of this node
    pub fn kind(&self) -> NodeKind {
        match self {
            ConfigNode::Absent => NodeKind::Absent,
            ConfigNode::Mapping(_) => NodeKind::Mapping,
            ConfigNode::Scalar(_) => NodeKind::Scalar,
            ConfigNode::Sequence(_) => NodeKind::Sequence,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ConfigNode::Absent)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, ConfigNode::Mapping(_))
    }

    pub fn as_mapping(&self) -> Option<&ConfigMap> {
        match self {
            ConfigNode::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut ConfigMap> {
        match self {
            ConfigNode::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key if this node is a mapping
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Whether an absent value is reachable from this node through mappings
    ///
    /// Sequence elements are not inspected.
    pub fn contains_absent(&self) -> bool {
        match self {
            ConfigNode::Absent => true,
            ConfigNode::Mapping(map) => map.values().any(ConfigNode::contains_absent),
            ConfigNode::Scalar(_) | ConfigNode::Sequence(_) => false,
        }
    }
}

impl From<bool> for ConfigNode {
    fn from(value: bool) -> Self {
        ConfigNode::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for ConfigNode {
    fn from(value: i64) -> Self {
        ConfigNode::Scalar(Scalar::Number(Number::from(value)))
    }
}

impl From<&str> for ConfigNode {
    fn from(value: &str) -> Self {
        ConfigNode::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for ConfigNode {
    fn from(value: String) -> Self {
        ConfigNode::Scalar(Scalar::String(value))
    }
}

impl From<ConfigMap> for ConfigNode {
    fn from(value: ConfigMap) -> Self {
        ConfigNode::Mapping(value)
    }
}

impl From<Vec<ConfigNode>> for ConfigNode {
    fn from(value: Vec<ConfigNode>) -> Self {
        ConfigNode::Sequence(value)
    }
}

/// Stringify a YAML mapping key
///
/// Plain YAML allows `1:` or `true:` as keys; they are kept under their
/// textual form. Null, sequence and mapping keys have no sensible name.
fn key_to_string(key: Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Tagged(tagged) => key_to_string(tagged.value),
        other => Err(ValidationError::UnsupportedKey(format!("{:?}", other))),
    }
}

impl TryFrom<Value> for ConfigNode {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self> {
        let node = match value {
            Value::Null => ConfigNode::Absent,
            Value::Bool(b) => ConfigNode::Scalar(Scalar::Bool(b)),
            Value::Number(n) => ConfigNode::Scalar(Scalar::Number(n)),
            Value::String(s) => ConfigNode::Scalar(Scalar::String(s)),
            Value::Sequence(items) => ConfigNode::Sequence(
                items
                    .into_iter()
                    .map(ConfigNode::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Mapping(mapping) => {
                let mut map = ConfigMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    let key = key_to_string(key)?;
                    if map.contains_key(&key) {
                        return Err(ValidationError::DuplicateKey(key));
                    }
                    map.insert(key, ConfigNode::try_from(value)?);
                }
                ConfigNode::Mapping(map)
            }
            Value::Tagged(tagged) => ConfigNode::try_from(tagged.value)?,
        };
        Ok(node)
    }
}

impl From<ConfigNode> for Value {
    fn from(node: ConfigNode) -> Self {
        match node {
            ConfigNode::Absent => Value::Null,
            ConfigNode::Scalar(Scalar::Bool(b)) => Value::Bool(b),
            ConfigNode::Scalar(Scalar::Number(n)) => Value::Number(n),
            ConfigNode::Scalar(Scalar::String(s)) => Value::String(s),
            ConfigNode::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            ConfigNode::Mapping(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, value)| (Value::String(key), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for ConfigNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ConfigNode::Absent => serializer.serialize_unit(),
            ConfigNode::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            ConfigNode::Scalar(Scalar::Number(n)) => n.serialize(serializer),
            ConfigNode::Scalar(Scalar::String(s)) => serializer.serialize_str(s),
            ConfigNode::Sequence(items) => serializer.collect_seq(items),
            ConfigNode::Mapping(map) => serializer.collect_map(map),
        }
    }
}

impl<'de> Deserialize<'de> for ConfigNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ConfigNode::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// A whole configuration document, keyed by hook-type category at the top level
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigDocument {
    entries: ConfigMap,
}

impl ConfigDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing top-level mapping
    pub fn from_map(entries: ConfigMap) -> Self {
        Self { entries }
    }

    /// Parse a YAML document
    ///
    /// An empty document yields an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, the root is not a mapping,
    /// or a key cannot be represented as a string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(yaml)?;
        Self::try_from(ConfigNode::try_from(value)?)
    }

    /// Render the document as YAML, preserving key order
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigNode> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert a top-level entry, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigNode) -> Option<ConfigNode> {
        self.entries.insert(key.into(), value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_map(&self) -> &ConfigMap {
        &self.entries
    }

    pub(crate) fn as_map_mut(&mut self) -> &mut ConfigMap {
        &mut self.entries
    }

    pub fn into_map(self) -> ConfigMap {
        self.entries
    }

    pub fn into_node(self) -> ConfigNode {
        ConfigNode::Mapping(self.entries)
    }
}

impl TryFrom<ConfigNode> for ConfigDocument {
    type Error = ValidationError;

    fn try_from(node: ConfigNode) -> Result<Self> {
        match node {
            ConfigNode::Mapping(entries) => Ok(Self { entries }),
            ConfigNode::Absent => Ok(Self::default()),
            other => Err(ValidationError::RootNotMapping {
                found: other.kind(),
            }),
        }
    }
}

impl Serialize for ConfigDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(&self.entries)
    }
}

impl<'de> Deserialize<'de> for ConfigDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let node = ConfigNode::deserialize(deserializer)?;
        ConfigDocument::try_from(node).map_err(serde::de::Error::custom)
    }
}
