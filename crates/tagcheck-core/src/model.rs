//! Tag-group data model
//!
//! The shapes here mirror what arrives in a decoded protocol message. Groups,
//! items and descriptors decode from any JSON value, one fragment at a time:
//! a missing or non-string code becomes an empty code (never recognized), a
//! non-array `list` is kept aside for reporting, and a non-object item keeps
//! its raw value under an empty code. Only a tag collection that is not an
//! array fails to decode.
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Business domain whose rule-set governs a tag-group collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Payment tags (finder fees, settlement terms)
    Payments,
    /// Provider contact and logistics information
    Provider,
    /// Catalog item tags
    Items,
    /// Promotional offer tags
    Offers,
}

impl Domain {
    /// All known domains, in catalog order
    pub const ALL: [Domain; 4] = [Domain::Payments, Domain::Provider, Domain::Items, Domain::Offers];

    /// Lowercase identifier used in messages and configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Payments => "payments",
            Domain::Provider => "provider",
            Domain::Items => "items",
            Domain::Offers => "offers",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "payments" | "payment" => Ok(Domain::Payments),
            "provider" | "providers" => Ok(Domain::Provider),
            "items" | "item" => Ok(Domain::Items),
            "offers" | "offer" => Ok(Domain::Offers),
            other => Err(format!(
                "unknown domain '{}', expected one of: payments, provider, items, offers",
                other
            )),
        }
    }
}

/// Controlled-vocabulary identifier attached to a group or an item
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Descriptor {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Descriptor {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
        }
    }

    /// Read a descriptor from any JSON value; non-string fields read as absent
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            code: text("code").unwrap_or_default(),
            name: text("name"),
        }
    }
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}

/// One leaf datum inside a tag group
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagItem {
    pub descriptor: Descriptor,
    pub value: Value,
}

impl<'de> Deserialize<'de> for TagItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}

impl TagItem {
    /// Create an item with the given code and value
    pub fn new(code: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            descriptor: Descriptor::new(code),
            value: value.into(),
        }
    }

    /// Read an item from any JSON value
    ///
    /// A non-object item gets an empty code and keeps itself as the value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(fields) => Self {
                descriptor: fields.get("descriptor").map(Descriptor::from_value).unwrap_or_default(),
                value: fields.get("value").cloned().unwrap_or_default(),
            },
            other => Self {
                descriptor: Descriptor::default(),
                value: other.clone(),
            },
        }
    }

    pub fn code(&self) -> &str {
        &self.descriptor.code
    }
}

/// A named bag of tag items
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagGroup {
    pub descriptor: Descriptor,
    /// UI display hint; kept untyped so a non-boolean can be reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<TagItem>>,
    /// Raw `list` when it was present but not an array
    #[serde(skip)]
    pub malformed_list: Option<Value>,
}

impl<'de> Deserialize<'de> for TagGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::from_value(&value))
    }
}

impl TagGroup {
    /// Create a group with the given code and items
    pub fn new(code: impl Into<String>, list: Vec<TagItem>) -> Self {
        Self {
            descriptor: Descriptor::new(code),
            display: None,
            list: Some(list),
            malformed_list: None,
        }
    }

    /// Read a group from any JSON value
    ///
    /// A non-object group reads as an empty group with no code.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            return Self::default();
        };

        let (list, malformed_list) = match fields.get("list") {
            None | Some(Value::Null) => (None, None),
            Some(Value::Array(items)) => (Some(items.iter().map(TagItem::from_value).collect()), None),
            Some(other) => (None, Some(other.clone())),
        };

        Self {
            descriptor: fields.get("descriptor").map(Descriptor::from_value).unwrap_or_default(),
            display: fields.get("display").filter(|display| !display.is_null()).cloned(),
            list,
            malformed_list,
        }
    }

    /// Set the display hint
    pub fn with_display(mut self, display: impl Into<Value>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Drop the item list entirely
    pub fn without_list(mut self) -> Self {
        self.list = None;
        self
    }

    pub fn code(&self) -> &str {
        &self.descriptor.code
    }

    /// Items in payload order; an absent list reads as empty
    pub fn items(&self) -> &[TagItem] {
        self.list.as_deref().unwrap_or(&[])
    }

    /// Whether any item carries the given code
    pub fn has_item(&self, code: &str) -> bool {
        self.items().iter().any(|item| item.code() == code)
    }
}

/// Declared value type of a negotiated reference term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum ReferenceType {
    Enum,
    String,
    /// Anything else the counterparty sent, including no type at all;
    /// always a shape error
    Other(String),
}

impl Default for ReferenceType {
    fn default() -> Self {
        ReferenceType::Other(String::new())
    }
}

impl From<Value> for ReferenceType {
    fn from(value: Value) -> Self {
        match value {
            Value::String(declared) => match declared.as_str() {
                "enum" => ReferenceType::Enum,
                "string" => ReferenceType::String,
                _ => ReferenceType::Other(declared),
            },
            Value::Null => ReferenceType::default(),
            other => ReferenceType::Other(other.to_string()),
        }
    }
}

impl From<ReferenceType> for String {
    fn from(value: ReferenceType) -> Self {
        match value {
            ReferenceType::Enum => "enum".to_string(),
            ReferenceType::String => "string".to_string(),
            ReferenceType::Other(other) => other,
        }
    }
}

/// Caller-supplied definition of a negotiated term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDefinition {
    pub code: String,
    #[serde(rename = "type", default)]
    pub kind: ReferenceType,
    /// Allowed values, meaningful only for `enum`; compared by JSON equality
    #[serde(default, deserialize_with = "enum_values", skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<Value>,
}

/// Allowed values as sent; anything but an array reads as no values
fn enum_values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        _ => Vec::new(),
    })
}

impl ReferenceDefinition {
    /// A term whose value must be one of `values`
    pub fn enumeration<I, S>(code: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code: code.into(),
            kind: ReferenceType::Enum,
            value: values.into_iter().map(|v| Value::String(v.into())).collect(),
        }
    }

    /// A term whose value must be a string
    pub fn string(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            kind: ReferenceType::String,
            value: Vec::new(),
        }
    }
}

/// Decode a tag-group collection from a JSON value
///
/// Fails only when the collection itself is not an array; each group is
/// read on its own and never fails.
pub fn tag_groups_from_value(value: &Value) -> Result<Vec<TagGroup>, serde_json::Error> {
    Vec::<TagGroup>::deserialize(value)
}
