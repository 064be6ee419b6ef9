use dom_query::{Document, Node};

use crate::document::{MicrodataDocument, MicrodataNode};

impl<'a> MicrodataNode for Node<'a> {
    fn attr(&self, name: &str) -> Option<String> {
        Node::attr(self, name).map(|value| value.to_string())
    }

    fn has_attr(&self, name: &str) -> bool {
        Node::has_attr(self, name)
    }

    fn tag_name(&self) -> Option<String> {
        self.node_name().map(|name| name.to_string())
    }

    fn text_content(&self) -> String {
        self.text().to_string()
    }

    fn closest_attr(&self, name: &str) -> Option<String> {
        let mut current = Some(self.clone());
        while let Some(node) = current {
            if let Some(value) = Node::attr(&node, name) {
                return Some(value.to_string());
            }
            current = node.parent();
        }
        None
    }

    fn element_children(&self) -> Vec<Node<'a>> {
        self.children()
            .into_iter()
            .filter(|child| child.is_element())
            .collect()
    }
}

impl MicrodataDocument for Document {
    type Node<'a> = Node<'a>
    where
        Self: 'a;

    fn body(&self) -> Option<Node<'_>> {
        self.select("body").nodes().first().cloned()
    }

    fn element_by_id(&self, id: &str) -> Option<Node<'_>> {
        self.select("body [id]")
            .nodes()
            .iter()
            .find(|node| Node::attr(node, "id").as_deref() == Some(id))
            .cloned()
    }
}
