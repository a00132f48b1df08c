//! Minimal HCL text writer used by the emitters.
//!
//! This is a writer, not a syntax tree: blocks hold attributes and nested
//! blocks in insertion order and render to text once.

use serde_json::{Map, Value};

use crate::property::{integer_value, scalar_text};

const INDENT: &str = "  ";

/// Right-hand side of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum HclValue {
    /// Quoted and escaped string.
    Str(String),
    /// Emitted verbatim: numbers, booleans, references.
    Raw(String),
    /// `{ key = value }` object; keys are sorted on render.
    Object(Vec<(String, HclValue)>),
    List(Vec<HclValue>),
}

impl HclValue {
    pub fn str(value: impl Into<String>) -> Self {
        HclValue::Str(value.into())
    }

    pub fn int(value: i64) -> Self {
        HclValue::Raw(value.to_string())
    }

    pub fn bool(value: bool) -> Self {
        HclValue::Raw(value.to_string())
    }

    /// Convert a decoded property value.
    ///
    /// Whole numbers render as integers whether they were decoded as
    /// integers or floats.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => HclValue::Str(s.clone()),
            Value::Number(_) => HclValue::Raw(
                integer_value(value)
                    .map(|i| i.to_string())
                    .or_else(|| scalar_text(value))
                    .unwrap_or_default(),
            ),
            Value::Bool(b) => HclValue::bool(*b),
            Value::Null => HclValue::Raw("null".to_string()),
            Value::Array(items) => HclValue::List(items.iter().map(HclValue::from_json).collect()),
            Value::Object(map) => HclValue::object(map),
        }
    }

    pub fn object(map: &Map<String, Value>) -> Self {
        HclValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), HclValue::from_json(v)))
                .collect(),
        )
    }

    fn render(&self, depth: usize) -> String {
        match self {
            HclValue::Str(s) => quote(s),
            HclValue::Raw(s) => s.clone(),
            HclValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|item| item.render(depth)).collect();
                format!("[{}]", parts.join(", "))
            }
            HclValue::Object(entries) => {
                if entries.is_empty() {
                    return "{}".to_string();
                }
                let mut sorted: Vec<&(String, HclValue)> = entries.iter().collect();
                sorted.sort_by(|a, b| a.0.cmp(&b.0));

                let inner = INDENT.repeat(depth + 1);
                let mut out = String::from("{\n");
                for (key, value) in sorted {
                    out.push_str(&format!("{}{} = {}\n", inner, object_key(key), value.render(depth + 1)));
                }
                out.push_str(&INDENT.repeat(depth));
                out.push('}');
                out
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Attribute(String, HclValue),
    Block(HclBlock),
}

/// A block such as `resource "type" "name" { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct HclBlock {
    keyword: String,
    labels: Vec<String>,
    items: Vec<Item>,
}

impl HclBlock {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            labels: Vec::new(),
            items: Vec::new(),
        }
    }

    /// `resource "<resource_type>" "<name>"`
    pub fn resource(resource_type: &str, name: &str) -> Self {
        Self::new("resource").label(resource_type).label(name)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: HclValue) -> Self {
        self.items.push(Item::Attribute(key.into(), value));
        self
    }

    pub fn string(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attr(key, HclValue::str(value))
    }

    pub fn int(self, key: impl Into<String>, value: i64) -> Self {
        self.attr(key, HclValue::int(value))
    }

    pub fn raw(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attr(key, HclValue::Raw(value.into()))
    }

    /// Add the attribute only when `value` is present.
    pub fn attr_opt(self, key: impl Into<String>, value: Option<HclValue>) -> Self {
        match value {
            Some(value) => self.attr(key, value),
            None => self,
        }
    }

    pub fn block(mut self, block: HclBlock) -> Self {
        self.items.push(Item::Block(block));
        self
    }

    /// Add `block` only when `include` holds.
    pub fn block_if(self, include: bool, block: HclBlock) -> Self {
        if include {
            self.block(block)
        } else {
            self
        }
    }

    pub fn block_opt(self, block: Option<HclBlock>) -> Self {
        match block {
            Some(block) => self.block(block),
            None => self,
        }
    }

    /// Add every block in order, e.g. one per repeated entry.
    pub fn blocks(mut self, blocks: impl IntoIterator<Item = HclBlock>) -> Self {
        self.items.extend(blocks.into_iter().map(Item::Block));
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);
        out.push_str(&indent);
        out.push_str(&self.keyword);
        for label in &self.labels {
            out.push(' ');
            out.push_str(&quote(label));
        }

        if self.items.is_empty() {
            out.push_str(" {}\n");
            return;
        }

        out.push_str(" {\n");
        let inner = INDENT.repeat(depth + 1);
        for item in &self.items {
            match item {
                Item::Attribute(key, value) => {
                    out.push_str(&format!("{}{} = {}\n", inner, key, value.render(depth + 1)));
                }
                Item::Block(block) => block.write(out, depth + 1),
            }
        }
        out.push_str(&indent);
        out.push_str("}\n");
    }
}

/// Render several top-level blocks separated by blank lines.
pub fn render_blocks(blocks: &[HclBlock]) -> String {
    blocks
        .iter()
        .map(HclBlock::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote a string literal, escaping characters HCL treats specially.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // literal "${" must not start an interpolation
            '$' if chars.peek() == Some(&'{') => out.push_str("$$"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn object_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !key.starts_with(|c: char| c.is_ascii_digit());
    if bare {
        key.to_string()
    } else {
        quote(key)
    }
}
