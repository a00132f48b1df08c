//! Generic property tree parsed from an input document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key the optional detection override is stored under.
pub const RESOURCE_TYPE_KEY: &str = "resourceType";

/// The `properties` section of an input document.
///
/// Values keep whatever shape the decoder produced (string, number, bool,
/// nested map, sequence). Typed accessors apply the same lenient coercions
/// for every emitter so that YAML and JSON inputs render identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyTree(Map<String, Value>);

impl PropertyTree {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert, mostly useful in tests and plugins.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// String value of `key`, if it is a string.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// String value of `key` or `default`.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.str(key).unwrap_or(default)
    }

    /// Integer value of `key`.
    ///
    /// Accepts native integers and integral floats (`3.0`), which generic
    /// JSON decoding produces for whole numbers in some toolchains.
    pub fn int(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(integer_value)
    }

    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.int(key).unwrap_or(default)
    }

    /// Boolean value of `key`; the strings "true" and "1" count as true.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true" || s == "1",
            _ => default,
        }
    }

    /// Nested mapping under `key`.
    pub fn map(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }

    /// Scalar rendered as text: strings verbatim, whole numbers as integers.
    pub fn scalar_text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(scalar_text)
    }
}

impl From<Map<String, Value>> for PropertyTree {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for PropertyTree {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Normalize a JSON number to an integer when it carries no fraction.
pub fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

/// Text form of a scalar value. Returns `None` for maps, sequences and null.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(match integer_value(value) {
            Some(i) => i.to_string(),
            None => n.to_string(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_int_accepts_float_encoded_integers() {
        let props = PropertyTree::new()
            .with("a", 3)
            .with("b", json!(4.0))
            .with("c", json!(4.5))
            .with("d", "5");

        assert_eq!(props.int("a"), Some(3));
        assert_eq!(props.int("b"), Some(4));
        assert_eq!(props.int("c"), None);
        assert_eq!(props.int("d"), None);
        assert_eq!(props.int_or("missing", 7), 7);
    }

    #[test]
    fn test_bool_or_accepts_string_flags() {
        let props = PropertyTree::new()
            .with("on", true)
            .with("yes", "true")
            .with("one", "1")
            .with("off", "no");

        assert!(props.bool_or("on", false));
        assert!(props.bool_or("yes", false));
        assert!(props.bool_or("one", false));
        assert!(!props.bool_or("off", true));
        assert!(props.bool_or("missing", true));
    }

    #[test]
    fn test_scalar_text() {
        let props = PropertyTree::new()
            .with("s", "x")
            .with("n", json!(2.0))
            .with("f", json!(0.5))
            .with("m", json!({"k": "v"}));

        assert_eq!(props.scalar_text("s").as_deref(), Some("x"));
        assert_eq!(props.scalar_text("n").as_deref(), Some("2"));
        assert_eq!(props.scalar_text("f").as_deref(), Some("0.5"));
        assert_eq!(props.scalar_text("m"), None);
    }
}
