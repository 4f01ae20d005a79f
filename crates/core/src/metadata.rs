//! The per-request metadata context.
//!
//! A `Metadata` maps identifier names to typed values. It is built once per
//! resolution request from the caller-supplied raw JSON object and is never
//! mutated during evaluation.

use std::collections::BTreeMap;

use crate::value::Value;

/// Identifier name to typed value mapping used to resolve `Ident` nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata(BTreeMap<String, Value>);

impl Metadata {
    pub fn new() -> Metadata {
        Metadata(BTreeMap::new())
    }

    /// Convert a raw JSON object into a context.
    ///
    /// Strings, integer numbers, other numbers, and booleans convert to the
    /// matching value kind. Every other JSON value (null, arrays, nested
    /// objects) is silently dropped, as is a non-object `raw` altogether.
    pub fn from_json(raw: &serde_json::Value) -> Metadata {
        let mut metadata = Metadata::new();
        let Some(obj) = raw.as_object() else {
            return metadata;
        };

        for (key, val) in obj {
            match val {
                serde_json::Value::String(s) => metadata.insert(key.as_str(), Value::Str(s.clone())),
                serde_json::Value::Bool(b) => metadata.insert(key.as_str(), Value::Bool(*b)),
                serde_json::Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        metadata.insert(key.as_str(), Value::Int(i));
                    } else if let Some(f) = n.as_f64() {
                        metadata.insert(key.as_str(), Value::Float(f));
                    }
                }
                _ => {}
            }
        }

        metadata
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
