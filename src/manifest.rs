//! Manifest value tree
//!
//! A manifest is a declarative page description: an ordered mapping from
//! string keys to arbitrary nested values. The conventional top-level
//! sections are `metadata`, `styles` and `structure`, but the schema itself
//! belongs to the server's validator, so nothing here enforces it.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Ordered key/value tree describing a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(Map<String, Value>);

impl Manifest {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Accept a mapping; `null` is treated as an empty manifest
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(ClientError::InvalidManifest(format!(
                "expected a mapping at the document root, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Parse a YAML document, keeping key order and resolving `<<` merge keys
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        let mut document: serde_yaml::Value = serde_yaml::from_str(content)?;
        document.apply_merge()?;
        let value: Value = serde_yaml::from_value(document)?;
        Self::from_value(value)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Read and parse a local YAML manifest file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ClientError::io(path, e))?;
        Self::from_yaml_str(&content)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top-level keys in document order
    pub fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.section("metadata")
    }

    pub fn styles(&self) -> Option<&Map<String, Value>> {
        self.section("styles")
    }

    pub fn structure(&self) -> Option<&Value> {
        self.0.get("structure")
    }

    /// `metadata.title`, when present and a string
    pub fn title(&self) -> Option<&str> {
        self.metadata()?.get("title")?.as_str()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name)?.as_object()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
