//! Microdata attribute names and the per-tag value table
//!
//! An element that declares a property but is not itself an item takes its
//! value from a tag-specific attribute (`<meta content>`, `<a href>`,
//! `<time datetime>`, ...). Every other tag contributes its text content.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Marks an element as an item
pub const ITEM_SCOPE: &str = "itemscope";
/// Declares the property name an element contributes
pub const ITEM_PROP: &str = "itemprop";
/// Declares an item's type, emitted as `@type`
pub const ITEM_TYPE: &str = "itemtype";
/// Declares an item's global identifier, emitted as `@id`
pub const ITEM_ID: &str = "itemid";
/// Whitespace separated ids of elements holding extra properties
pub const ITEM_REF: &str = "itemref";
/// The HTML attribute `itemref` ids are matched against
pub const ELEMENT_ID: &str = "id";

/// Key under which the item id appears in flattened output
pub const ID_KEY: &str = "@id";
/// Key under which the item type appears in flattened output
pub const TYPE_KEY: &str = "@type";

static VALUE_ATTRIBUTES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert("meta", "content");
    for tag in ["audio", "embed", "iframe", "img", "source", "track", "video"] {
        table.insert(tag, "src");
    }
    for tag in ["a", "area", "link"] {
        table.insert(tag, "href");
    }
    table.insert("object", "data");
    table.insert("data", "value");
    table.insert("meter", "value");
    table.insert("time", "datetime");
    table
});

/// Attribute holding the property value for `tag`, if the tag has one
///
/// Lookup is case-insensitive. `None` means the element's text content is
/// the value.
pub fn value_attribute(tag: &str) -> Option<&'static str> {
    if let Some(attr) = VALUE_ATTRIBUTES.get(tag) {
        return Some(*attr);
    }
    VALUE_ATTRIBUTES.get(tag.to_ascii_lowercase().as_str()).copied()
}
