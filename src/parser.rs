//! Microdata extraction engine
//!
//! Extraction is two mutually exclusive depth-first walks plus a reference
//! pass:
//!
//! 1. **Item discovery** descends from `<body>` until it meets an
//!    `itemscope` element that passes the type filter, and builds one
//!    [`Item`] from it. Descent stops there.
//! 2. **Property discovery** runs over each direct child of an item and
//!    descends until it meets an `itemprop` element. That element yields one
//!    `(name, value)` pair: a nested item when it is also an `itemscope`,
//!    otherwise the value from the tag table in [`crate::vocabulary`].
//! 3. **Reference resolution** then merges, for every top-level item, the
//!    properties found under each element named by its `itemref`, in order.
//!
//! Property discovery only stops at elements declaring `itemprop`. An
//! `itemscope` element without `itemprop` does not stop it, so the
//! properties of such an un-annotated nested item are collected into the
//! enclosing item.

use dom_query::Document;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, trace, warn};

use crate::config::ParserConfig;
use crate::document::{MicrodataDocument, MicrodataNode};
use crate::error::{Error, Result};
use crate::item::{Item, Value};
use crate::vocabulary::{value_attribute, ITEM_ID, ITEM_PROP, ITEM_REF, ITEM_SCOPE, ITEM_TYPE};

/// Extracts microdata items from documents
///
/// The parser holds only its [`ParserConfig`]; every parse works on its own
/// items, so one parser can be shared across threads.
///
/// ```rust
/// use html_microdata::MicrodataParser;
/// use serde_json::json;
///
/// let html = r#"<div itemscope itemtype="Book">
///     <span itemprop="title">Dune</span>
///     <span itemprop="author">Frank Herbert</span>
/// </div>"#;
///
/// let items = MicrodataParser::new().parse(html).unwrap();
/// assert_eq!(
///     serde_json::Value::Object(items[0].clone()),
///     json!({"@type": "Book", "title": "Dune", "author": "Frank Herbert"})
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MicrodataParser {
    config: ParserConfig,
}

impl MicrodataParser {
    /// Create a parser with no type filter and no transforms
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse an HTML string and extract its top-level items
    pub fn parse(&self, html: &str) -> Result<Vec<Map<String, JsonValue>>> {
        let document = Document::from(html);
        self.parse_document(&document)
    }

    /// Extract and flatten the top-level items of an already parsed document
    pub fn parse_document<D: MicrodataDocument>(
        &self,
        document: &D,
    ) -> Result<Vec<Map<String, JsonValue>>> {
        let items = self.extract_items(document)?;
        Ok(items.iter().map(Item::flatten).collect())
    }

    /// Extract the top-level items of a document without flattening them
    ///
    /// References are already resolved. Fails if the document has no body
    /// or if any item references a missing id.
    pub fn extract_items<D: MicrodataDocument>(&self, document: &D) -> Result<Vec<Item>> {
        let body = document
            .body()
            .ok_or_else(|| Error::invalid_document_static("document has no body element"))?;

        let mut items = self.discover_items(&body)?;
        for item in &mut items {
            self.resolve_references(item, document)?;
        }

        debug!(count = items.len(), "extracted microdata items");
        Ok(items)
    }

    /// Find the top-level items at or below `node`, in document order
    ///
    /// An `itemscope` element rejected by the type filter is transparent:
    /// discovery continues into its children.
    pub fn discover_items<N: MicrodataNode>(&self, node: &N) -> Result<Vec<Item>> {
        if node.has_attr(ITEM_SCOPE) {
            let item_type = node.attr(ITEM_TYPE);
            if self.config.accepts_type(item_type.as_deref()) {
                debug!(item_type = ?item_type, "discovered item");
                return Ok(vec![self.build_item(node)?]);
            }
            debug!(item_type = ?item_type, "item rejected by type filter");
        }

        let mut items = Vec::new();
        for child in node.element_children() {
            items.extend(self.discover_items(&child)?);
        }
        Ok(items)
    }

    /// Build the item declared by `node` from its own subtree
    ///
    /// Missing `itemid`, `itemtype` or `itemref` attributes leave the
    /// corresponding field unset. References are not resolved here.
    pub fn build_item<N: MicrodataNode>(&self, node: &N) -> Result<Item> {
        let mut item = Item::new();
        if let Some(id) = node.attr(ITEM_ID) {
            item.set_id(id);
        }
        if let Some(item_type) = node.attr(ITEM_TYPE) {
            item.set_type(item_type);
        }
        if let Some(itemref) = node.attr(ITEM_REF) {
            item.set_item_reference(&itemref);
        }

        self.merge_children(&mut item, node)?;
        Ok(item)
    }

    /// Collect the `(name, value)` pairs at or below `node`, in document order
    pub fn discover_properties<N: MicrodataNode>(&self, node: &N) -> Result<Vec<(String, Value)>> {
        if let Some(name) = node.attr(ITEM_PROP) {
            let value = if node.has_attr(ITEM_SCOPE) {
                Value::Item(self.build_item(node)?)
            } else {
                property_value(node)
            };
            let value = self.apply_transform(&name, node, value)?;
            trace!(property = %name, "discovered property");
            return Ok(vec![(name, value)]);
        }

        let mut properties = Vec::new();
        for child in node.element_children() {
            properties.extend(self.discover_properties(&child)?);
        }
        Ok(properties)
    }

    /// Merge the properties under each `itemref` target into `item`
    ///
    /// Targets are looked up by `id` among the descendants of the body, in
    /// the order listed. A target without properties adds nothing.
    pub fn resolve_references<D: MicrodataDocument>(&self, item: &mut Item, document: &D) -> Result<()> {
        let references = item.references().to_vec();
        for id in &references {
            let target = match document.element_by_id(id) {
                Some(target) => target,
                None => {
                    warn!(id = %id, "itemref names an id missing from the document");
                    return Err(Error::unresolved_reference(id.as_str()));
                }
            };

            debug!(id = %id, "merging referenced properties");
            self.merge_children(item, &target)?;
        }
        Ok(())
    }

    fn merge_children<N: MicrodataNode>(&self, item: &mut Item, node: &N) -> Result<()> {
        for child in node.element_children() {
            for (name, value) in self.discover_properties(&child)? {
                item.set(name, value);
            }
        }
        Ok(())
    }

    fn apply_transform<N: MicrodataNode>(&self, name: &str, node: &N, value: Value) -> Result<Value> {
        let transform = match self.config.transform(name) {
            Some(transform) => transform,
            None => return Ok(value),
        };

        let source: &dyn MicrodataNode = node;
        let replacement = transform(source, &value).map_err(|err| match err {
            Error::TransformError { .. } => err,
            other => Error::transform_owned(name, other.to_string()),
        })?;
        match replacement {
            Some(replacement) => Ok(Value::Json(replacement)),
            None => Ok(value),
        }
    }
}

/// Value of a property element that is not itself an item
///
/// Tags in the vocabulary table read their value attribute (empty when the
/// attribute is missing); every other tag yields its text content.
fn property_value<N: MicrodataNode>(node: &N) -> Value {
    match node.tag_name().and_then(|tag| value_attribute(&tag)) {
        Some(attribute) => Value::Text(node.attr(attribute).unwrap_or_default()),
        None => Value::Text(node.text_content()),
    }
}

/// Parse an HTML string with the default configuration
pub fn parse(html: &str) -> Result<Vec<Map<String, JsonValue>>> {
    MicrodataParser::new().parse(html)
}

/// Extract items from a parsed document with the default configuration
pub fn parse_document<D: MicrodataDocument>(document: &D) -> Result<Vec<Map<String, JsonValue>>> {
    MicrodataParser::new().parse_document(document)
}
