//! Microdata items and their property store
//!
//! An [`Item`] collects the properties discovered for one `itemscope`
//! element. Properties are append-only: writing a name once stores a bare
//! [`PropertyValue::Scalar`], writing it again turns the entry into a
//! [`PropertyValue::List`] holding every value in write order.
//!
//! Once extraction is finished an item is [flattened](Item::flatten) into a
//! plain JSON object, with nested items recursively flattened as well.
//!
//! ```rust
//! use html_microdata::{Item, Value};
//! use serde_json::json;
//!
//! let mut item = Item::new();
//! item.set_type("Book");
//! item.set("tag", Value::from("a"));
//! item.set("tag", Value::from("b"));
//!
//! assert_eq!(
//!     serde_json::Value::Object(item.flatten()),
//!     json!({"@type": "Book", "tag": ["a", "b"]})
//! );
//! ```

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::vocabulary::{ID_KEY, TYPE_KEY};

/// A single value written under a property name
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Attribute value or text content of a property element
    Text(String),
    /// A nested item (property element that is itself an `itemscope`)
    Item(Item),
    /// Replacement produced by a property transform
    Json(JsonValue),
}

impl Value {
    /// Text of a `Value::Text`, `None` for the other variants
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Nested item of a `Value::Item`
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Value::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Convert into plain JSON, flattening nested items
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Text(text) => JsonValue::String(text.clone()),
            Value::Item(item) => JsonValue::Object(item.flatten()),
            Value::Json(json) => json.clone(),
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<Item> for Value {
    fn from(item: Item) -> Self {
        Value::Item(item)
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        Value::Json(json)
    }
}

/// Everything written under one property name
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Written exactly once
    Scalar(Value),
    /// Written two or more times, first write first
    List(Vec<Value>),
}

impl PropertyValue {
    /// Number of writes recorded
    pub fn len(&self) -> usize {
        match self {
            PropertyValue::Scalar(_) => 1,
            PropertyValue::List(values) => values.len(),
        }
    }

    /// True only for a list holding no values, which aggregation never builds
    pub fn is_empty(&self) -> bool {
        match self {
            PropertyValue::Scalar(_) => false,
            PropertyValue::List(values) => values.is_empty(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, PropertyValue::List(_))
    }

    /// The recorded values in write order
    pub fn values(&self) -> &[Value] {
        match self {
            PropertyValue::Scalar(value) => std::slice::from_ref(value),
            PropertyValue::List(values) => values,
        }
    }

    /// Bare JSON for a scalar, a JSON array for a list
    pub fn to_json(&self) -> JsonValue {
        match self {
            PropertyValue::Scalar(value) => value.to_json(),
            PropertyValue::List(values) => JsonValue::Array(values.iter().map(Value::to_json).collect()),
        }
    }
}

/// One microdata item
///
/// Created when its `itemscope` element is discovered, filled from its own
/// subtree and then from each `itemref` target, and finally flattened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    id: Option<String>,
    item_type: Option<String>,
    references: Vec<String>,
    properties: IndexMap<String, PropertyValue>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the `itemid` attribute
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id<S: Into<String>>(&mut self, id: S) {
        self.id = Some(id.into());
    }

    /// Value of the `itemtype` attribute
    pub fn item_type(&self) -> Option<&str> {
        self.item_type.as_deref()
    }

    pub fn set_type<S: Into<String>>(&mut self, item_type: S) {
        self.item_type = Some(item_type.into());
    }

    /// Ids listed in `itemref`, in declaration order, duplicates kept
    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Replace the reference list from a raw `itemref` attribute value
    pub fn set_item_reference(&mut self, itemref: &str) {
        self.references = itemref.split_whitespace().map(String::from).collect();
    }

    /// The reference list joined back into an `itemref` value
    pub fn item_reference(&self) -> String {
        self.references.join(" ")
    }

    /// Property entries in first-write order
    pub fn properties(&self) -> &IndexMap<String, PropertyValue> {
        &self.properties
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Append `value` under `name`
    ///
    /// The first write stores a scalar; the second converts the entry into a
    /// list. Earlier values are never discarded.
    pub fn set<S: Into<String>>(&mut self, name: S, value: Value) {
        match self.properties.entry(name.into()) {
            Entry::Vacant(slot) => {
                slot.insert(PropertyValue::Scalar(value));
            }
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                let values = match std::mem::replace(entry, PropertyValue::List(Vec::new())) {
                    PropertyValue::Scalar(first) => vec![first, value],
                    PropertyValue::List(mut values) => {
                        values.push(value);
                        values
                    }
                };
                *entry = PropertyValue::List(values);
            }
        }
    }

    /// Plain JSON view of this item
    ///
    /// Keys are `@id`, `@type` (each only when declared) followed by the
    /// properties in first-write order. A property literally named `@id` or
    /// `@type` aggregates with the declared value rather than replacing it.
    pub fn flatten(&self) -> Map<String, JsonValue> {
        let mut result = Map::new();
        if let Some(id) = &self.id {
            result.insert(ID_KEY.to_string(), JsonValue::String(id.clone()));
        }
        if let Some(item_type) = &self.item_type {
            result.insert(TYPE_KEY.to_string(), JsonValue::String(item_type.clone()));
        }

        for (name, property) in &self.properties {
            match result.entry(name.clone()) {
                serde_json::map::Entry::Vacant(slot) => {
                    slot.insert(property.to_json());
                }
                serde_json::map::Entry::Occupied(mut slot) => {
                    let mut merged = vec![slot.get_mut().take()];
                    merged.extend(property.values().iter().map(Value::to_json));
                    *slot.get_mut() = JsonValue::Array(merged);
                }
            }
        }

        result
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.flatten().serialize(serializer)
    }
}
