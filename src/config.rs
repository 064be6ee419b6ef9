//! Parser configuration
//!
//! A [`ParserConfig`] is fixed for the lifetime of a [`MicrodataParser`]
//! and holds two optional knobs:
//!
//! - an accepted-types filter applied to top-level item discovery only
//! - per-property transforms that may replace the extracted value
//!
//! ```rust
//! use html_microdata::{MicrodataNode, MicrodataParser, ParserConfig, Value};
//! use serde_json::json;
//!
//! let config = ParserConfig::new()
//!     .accept_type("Product")
//!     .with_transform("price", |node: &dyn MicrodataNode, value: &Value| {
//!         Ok(Some(json!({
//!             "amount": value.as_text().unwrap_or_default(),
//!             "currency": node.attr("data-currency"),
//!         })))
//!     });
//!
//! let parser = MicrodataParser::with_config(config);
//! ```
//!
//! [`MicrodataParser`]: crate::MicrodataParser

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::document::MicrodataNode;
use crate::error::Result;
use crate::item::Value;

/// Replaces the value extracted for one property occurrence
///
/// Receives the element declaring the property and the value computed for
/// it. `Ok(None)` keeps the computed value; `Err` aborts the parse.
pub type PropertyTransform =
    Arc<dyn Fn(&dyn MicrodataNode, &Value) -> Result<Option<JsonValue>> + Send + Sync>;

/// Configuration for a [`MicrodataParser`](crate::MicrodataParser)
#[derive(Clone, Default)]
pub struct ParserConfig {
    pub(crate) accepted_types: Option<HashSet<String>>,
    pub(crate) transforms: HashMap<String, PropertyTransform>,
}

impl std::fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserConfig")
            .field("accepted_types", &self.accepted_types)
            .field("transforms", &self.transforms.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ParserConfig {
    /// Create a configuration with no type filter and no transforms
    pub fn new() -> Self {
        Self::default()
    }

    /// Only extract top-level items whose `itemtype` is one of `types`
    ///
    /// Replaces any previously configured set.
    pub fn with_accepted_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Add one type to the accepted set, creating the filter if needed
    pub fn accept_type<S: Into<String>>(mut self, item_type: S) -> Self {
        self.accepted_types
            .get_or_insert_with(HashSet::new)
            .insert(item_type.into());
        self
    }

    /// Register a transform for every element declaring `property`
    ///
    /// Registering the same property again replaces the earlier transform.
    pub fn with_transform<S, F>(mut self, property: S, transform: F) -> Self
    where
        S: Into<String>,
        F: Fn(&dyn MicrodataNode, &Value) -> Result<Option<JsonValue>> + Send + Sync + 'static,
    {
        self.transforms.insert(property.into(), Arc::new(transform));
        self
    }

    // Accessors
    pub fn accepted_types(&self) -> Option<&HashSet<String>> {
        self.accepted_types.as_ref()
    }

    pub fn transform(&self, property: &str) -> Option<&PropertyTransform> {
        self.transforms.get(property)
    }

    /// Whether a top-level item declaring `item_type` passes the filter
    ///
    /// Without a filter everything passes. With one, the type must be
    /// present and match a member exactly.
    pub fn accepts_type(&self, item_type: Option<&str>) -> bool {
        match &self.accepted_types {
            None => true,
            Some(accepted) => item_type.map_or(false, |t| accepted.contains(t)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_accepts_everything() {
        let config = ParserConfig::default();
        assert!(config.accepts_type(None));
        assert!(config.accepts_type(Some("Recipe")));
        assert!(config.accepted_types().is_none());
    }

    #[test]
    fn test_type_filter_is_exact() {
        let config = ParserConfig::new().with_accepted_types(["Recipe"]);

        assert!(config.accepts_type(Some("Recipe")));
        assert!(!config.accepts_type(Some("recipe")));
        assert!(!config.accepts_type(Some("https://schema.org/Recipe")));
        assert!(!config.accepts_type(Some("Person")));
        assert!(!config.accepts_type(None));
    }

    #[test]
    fn test_accept_type_accumulates() {
        let config = ParserConfig::new().accept_type("Recipe").accept_type("Person");

        assert!(config.accepts_type(Some("Recipe")));
        assert!(config.accepts_type(Some("Person")));
        assert_eq!(config.accepted_types().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_filter_rejects_everything() {
        let config = ParserConfig::new().with_accepted_types(Vec::<String>::new());
        assert!(!config.accepts_type(Some("Recipe")));
    }

    #[test]
    fn test_transform_registration() {
        let config = ParserConfig::new()
            .with_transform("price", |_node, _value| Ok(Some(json!(1))))
            .with_transform("price", |_node, _value| Ok(None));

        assert!(config.transform("price").is_some());
        assert!(config.transform("name").is_none());
        assert!(format!("{:?}", config).contains("price"));
    }
}
