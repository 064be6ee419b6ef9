//! The document tree capabilities extraction relies on
//!
//! The parser never touches markup directly. It walks any tree that can
//! answer the handful of questions below, which keeps the extraction
//! algorithm independent of the HTML parser in use. An implementation over
//! [`dom_query`] ships in [`crate::node_ext`]; an in-memory tree for tests
//! lives in [`crate::test_utils`].

/// An element in a document tree
///
/// All methods except [`element_children`](MicrodataNode::element_children)
/// are object safe, so property transforms receive a `&dyn MicrodataNode`.
pub trait MicrodataNode {
    /// Attribute value by name, `None` when absent
    fn attr(&self, name: &str) -> Option<String>;

    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Tag name of the element; callers compare it case-insensitively
    fn tag_name(&self) -> Option<String>;

    /// Concatenated text of the element and all of its descendants
    fn text_content(&self) -> String;

    /// Attribute value from this element or its nearest ancestor carrying it
    fn closest_attr(&self, name: &str) -> Option<String>;

    /// Direct element children in document order
    fn element_children(&self) -> Vec<Self>
    where
        Self: Sized;
}

/// A whole document
pub trait MicrodataDocument {
    type Node<'a>: MicrodataNode
    where
        Self: 'a;

    /// The `<body>` element, if the document has one
    fn body(&self) -> Option<Self::Node<'_>>;

    /// First descendant of the body, in document order, whose `id`
    /// attribute equals `id`
    ///
    /// The body itself and anything outside it never match.
    fn element_by_id(&self, id: &str) -> Option<Self::Node<'_>>;
}
