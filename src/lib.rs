//! HTML microdata extraction
//!
//! This crate extracts the items described by microdata attributes
//! (`itemscope`, `itemprop`, `itemtype`, `itemid`, `itemref`) from an HTML
//! document and converts them into plain nested JSON objects. Nested items
//! become nested objects, a property written more than once becomes an
//! array, and `itemref` pulls in properties from elsewhere in the document.
//!
//! # Examples
//!
//! ```rust
//! use html_microdata::parse;
//! use serde_json::json;
//!
//! let html = r#"
//!     <div itemscope>
//!         <meta itemprop="tag" content="a">
//!         <meta itemprop="tag" content="b">
//!     </div>
//! "#;
//!
//! let items = parse(html).unwrap();
//! assert_eq!(serde_json::Value::Object(items[0].clone()), json!({"tag": ["a", "b"]}));
//! ```
//!
//! Filtering top-level items by type and rewriting property values is done
//! through [`ParserConfig`]:
//!
//! ```rust
//! use html_microdata::{MicrodataParser, ParserConfig};
//!
//! let parser = MicrodataParser::with_config(ParserConfig::new().accept_type("Recipe"));
//! let items = parser.parse(r#"<div itemscope itemtype="Person"></div>"#).unwrap();
//! assert!(items.is_empty());
//! ```
//!
//! The parser works on any tree implementing [`MicrodataDocument`]; an
//! implementation for [`dom_query::Document`] is built in.

pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod item;
pub mod node_ext;
pub mod parser;
pub mod test_utils;
pub mod vocabulary;

// Re-export commonly used types
pub use config::{ParserConfig, PropertyTransform};
pub use document::{MicrodataDocument, MicrodataNode};
pub use error::{Error, Result};
pub use fetch::{FetchConfig, HtmlFetcher, HttpFetcher};
pub use item::{Item, PropertyValue, Value};
pub use parser::{parse, parse_document, MicrodataParser};
