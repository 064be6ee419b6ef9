//! Test utilities for microdata extraction
//!
//! This module provides an in-memory document tree implementing the
//! [`MicrodataDocument`] capabilities, so the extraction engine can be
//! exercised without any markup parser, plus a helper for comparing results
//! against `json!` literals.
//!
//! # Examples
//!
//! ```
//! use html_microdata::test_utils::{element, FakeDocument};
//! use html_microdata::MicrodataParser;
//!
//! let doc = FakeDocument::new(
//!     element("body").child(
//!         element("div")
//!             .attr("itemscope", "")
//!             .child(element("span").attr("itemprop", "name").text("Dune")),
//!     ),
//! );
//!
//! let items = MicrodataParser::new().parse_document(&doc).unwrap();
//! assert_eq!(items[0]["name"], "Dune");
//! ```

use serde_json::{Map, Value as JsonValue};

use crate::document::{MicrodataDocument, MicrodataNode};

/// Builder for one element of a fake tree
#[derive(Debug, Clone)]
pub struct FakeElement {
    tag: String,
    attrs: Vec<(String, String)>,
    content: Vec<FakeContent>,
}

#[derive(Debug, Clone)]
enum FakeContent {
    Element(FakeElement),
    Text(String),
}

/// Start building an element with the given tag name
pub fn element(tag: &str) -> FakeElement {
    FakeElement {
        tag: tag.to_string(),
        attrs: Vec::new(),
        content: Vec::new(),
    }
}

impl FakeElement {
    /// Set an attribute; boolean attributes use an empty value
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.retain(|(existing, _)| existing != name);
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Append a text node
    pub fn text(mut self, text: &str) -> Self {
        self.content.push(FakeContent::Text(text.to_string()));
        self
    }

    /// Append a child element
    pub fn child(mut self, child: FakeElement) -> Self {
        self.content.push(FakeContent::Element(child));
        self
    }
}

#[derive(Debug)]
struct NodeData {
    tag: String,
    attrs: Vec<(String, String)>,
    parent: Option<usize>,
    content: Vec<Slot>,
}

#[derive(Debug)]
enum Slot {
    Element(usize),
    Text(String),
}

/// In-memory document; nodes are stored in document order
#[derive(Debug)]
pub struct FakeDocument {
    nodes: Vec<NodeData>,
    body: Option<usize>,
}

impl FakeDocument {
    /// A document whose root element is its body
    pub fn new(body: FakeElement) -> Self {
        let mut doc = Self::without_body(body);
        doc.body = Some(0);
        doc
    }

    /// A document that reports no body, for invalid-document paths
    pub fn without_body(root: FakeElement) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            body: None,
        };
        doc.insert(root, None);
        doc
    }

    fn insert(&mut self, element: FakeElement, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(NodeData {
            tag: element.tag,
            attrs: element.attrs,
            parent,
            content: Vec::new(),
        });
        for content in element.content {
            let slot = match content {
                FakeContent::Element(child) => Slot::Element(self.insert(child, Some(index))),
                FakeContent::Text(text) => Slot::Text(text),
            };
            self.nodes[index].content.push(slot);
        }
        index
    }

    fn is_below(&self, index: usize, ancestor: usize) -> bool {
        let mut current = self.nodes[index].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes[parent].parent;
        }
        false
    }

    fn node(&self, index: usize) -> FakeNode<'_> {
        FakeNode { doc: self, index }
    }
}

/// Handle to an element inside a [`FakeDocument`]
#[derive(Debug, Clone, Copy)]
pub struct FakeNode<'a> {
    doc: &'a FakeDocument,
    index: usize,
}

impl<'a> FakeNode<'a> {
    fn data(&self) -> &'a NodeData {
        &self.doc.nodes[self.index]
    }
}

impl<'a> MicrodataNode for FakeNode<'a> {
    fn attr(&self, name: &str) -> Option<String> {
        self.data()
            .attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.clone())
    }

    fn tag_name(&self) -> Option<String> {
        Some(self.data().tag.clone())
    }

    fn text_content(&self) -> String {
        let mut text = String::new();
        for slot in &self.data().content {
            match slot {
                Slot::Text(part) => text.push_str(part),
                Slot::Element(index) => text.push_str(&self.doc.node(*index).text_content()),
            }
        }
        text
    }

    fn closest_attr(&self, name: &str) -> Option<String> {
        let mut current = Some(self.index);
        while let Some(index) = current {
            let node = self.doc.node(index);
            if let Some(value) = node.attr(name) {
                return Some(value);
            }
            current = node.data().parent;
        }
        None
    }

    fn element_children(&self) -> Vec<FakeNode<'a>> {
        self.data()
            .content
            .iter()
            .filter_map(|slot| match slot {
                Slot::Element(index) => Some(FakeNode {
                    doc: self.doc,
                    index: *index,
                }),
                Slot::Text(_) => None,
            })
            .collect()
    }
}

impl MicrodataDocument for FakeDocument {
    type Node<'a> = FakeNode<'a>
    where
        Self: 'a;

    fn body(&self) -> Option<FakeNode<'_>> {
        self.body.map(|index| self.node(index))
    }

    fn element_by_id(&self, id: &str) -> Option<FakeNode<'_>> {
        let body = self.body?;
        (0..self.nodes.len())
            .filter(|&index| self.is_below(index, body))
            .map(|index| self.node(index))
            .find(|node| node.attr("id").as_deref() == Some(id))
    }
}

/// Wrap parse results in a JSON array for comparison with `json!` literals
pub fn items_to_json(items: Vec<Map<String, JsonValue>>) -> JsonValue {
    JsonValue::Array(items.into_iter().map(JsonValue::Object).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FakeDocument {
        FakeDocument::new(
            element("body").child(
                element("ul")
                    .attr("data-list", "yes")
                    .text("A ")
                    .child(element("li").attr("id", "first").text("one"))
                    .text(" B ")
                    .child(element("li").attr("id", "second").text("two")),
            ),
        )
    }

    #[test]
    fn test_document_order_and_lookup() {
        let doc = sample();
        let body = doc.body().unwrap();
        let list = body.element_children().remove(0);

        let ids: Vec<_> = list
            .element_children()
            .iter()
            .filter_map(|child| child.attr("id"))
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
        assert_eq!(doc.element_by_id("second").unwrap().text_content(), "two");
        assert!(doc.element_by_id("third").is_none());
    }

    #[test]
    fn test_text_content_interleaves_text_and_children() {
        let doc = sample();
        let list = doc.body().unwrap().element_children().remove(0);
        assert_eq!(list.text_content(), "A one B two");
    }

    #[test]
    fn test_closest_attr() {
        let doc = sample();
        let item = doc.element_by_id("first").unwrap();
        assert_eq!(item.closest_attr("data-list").as_deref(), Some("yes"));
        assert_eq!(item.closest_attr("id").as_deref(), Some("first"));
    }

    #[test]
    fn test_body_is_not_its_own_descendant() {
        let doc = FakeDocument::new(element("body").attr("id", "page").child(element("p").attr("id", "p")));
        assert!(doc.element_by_id("page").is_none());
        assert!(doc.element_by_id("p").is_some());
    }

    #[test]
    fn test_without_body() {
        let doc = FakeDocument::without_body(element("html").child(element("p").attr("id", "p")));
        assert!(doc.body().is_none());
        assert!(doc.element_by_id("p").is_none());
    }
}
