use infraguard_types::SourceRange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseMode {
    Sensitive,
    Insensitive,
}

impl CaseMode {
    fn eq(self, a: &str, b: &str) -> bool {
        match self {
            CaseMode::Sensitive => a == b,
            CaseMode::Insensitive => a.eq_ignore_ascii_case(b),
        }
    }

    fn contains(self, haystack: &str, needle: &str) -> bool {
        match self {
            CaseMode::Sensitive => haystack.contains(needle),
            CaseMode::Insensitive => haystack
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    List,
    Map,
    Reference,
}

/// Attribute value after evaluation by the adapter.
///
/// `Reference` holds an unresolved traversal such as `aws_kms_key.main.arn`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Reference(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Reference(_) => ValueKind::Reference,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    fn equals(&self, expected: &str, mode: CaseMode) -> bool {
        match self {
            Value::String(s) | Value::Reference(s) => mode.eq(s, expected),
            Value::Bool(b) => mode.eq(if *b { "true" } else { "false" }, expected),
            Value::Number(n) => expected.parse::<f64>().is_ok_and(|e| e == *n),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
    pub range: SourceRange,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<Value>, range: SourceRange) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            range,
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    pub fn equals(&self, expected: &str, mode: CaseMode) -> bool {
        self.value.equals(expected, mode)
    }

    /// Substring for strings, element equality for lists, key presence for maps.
    pub fn contains(&self, needle: &str, mode: CaseMode) -> bool {
        match &self.value {
            Value::String(s) => mode.contains(s, needle),
            Value::List(items) => items.iter().any(|v| v.equals(needle, mode)),
            Value::Map(map) => map.keys().any(|k| mode.eq(k, needle)),
            _ => false,
        }
    }

    pub fn is_true(&self) -> bool {
        self.value.as_bool() == Some(true)
    }

    pub fn is_false(&self) -> bool {
        self.value.as_bool() == Some(false)
    }

    pub fn is_empty_string(&self) -> bool {
        self.as_str().is_some_and(str::is_empty)
    }

    pub fn map_value(&self, key: &str) -> Option<&Value> {
        match &self.value {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Target traversal if the value is a reference.
    pub fn reference(&self) -> Option<&str> {
        match &self.value {
            Value::Reference(r) => Some(r),
            _ => None,
        }
    }
}
