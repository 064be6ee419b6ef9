//! Error handling for html-microdata
//!
//! This module provides the error type returned by every extraction operation.
//! All errors implement the standard `std::error::Error` trait.
//!
//! # Error Types
//!
//! - [`Error::InvalidDocument`] - the input has no navigable tree or no `<body>`
//! - [`Error::UnresolvedReference`] - an `itemref` names an id missing from the document
//! - [`Error::TransformError`] - a property transform refused a value
//! - [`Error::JsonError`] - JSON parsing and serialization errors
//! - [`Error::HttpError`] - fetching a remote document failed
//! - [`Error::IoError`] - file system and I/O errors
//!
//! Every failure is fatal to the whole parse: nothing is returned for a
//! document that could not be fully extracted.
//!
//! ```rust,ignore
//! use html_microdata::{parse, Error};
//!
//! match parse(html) {
//!     Ok(items) => println!("{} items", items.len()),
//!     Err(Error::UnresolvedReference { id }) => println!("dangling itemref: {}", id),
//!     Err(err) => println!("extraction failed: {}", err),
//! }
//! ```
//!
//! # Memory Efficiency
//!
//! Error messages use `Cow<'static, str>` so static messages don't allocate.

use std::borrow::Cow;
use thiserror::Error;

/// Error type for all html-microdata operations
#[derive(Error, Debug)]
pub enum Error {
    /// The input cannot be navigated as a document, or it has no body node
    #[error("Invalid document: {0}")]
    InvalidDocument(Cow<'static, str>),

    /// An `itemref` id has no matching element anywhere in the document
    ///
    /// Reference resolution runs for every top-level item before any result
    /// is returned, so a single dangling id fails the entire parse.
    #[error("Unresolved reference: no element with id '{id}'")]
    UnresolvedReference { id: String },

    /// A registered property transform failed
    #[error("Transform error for property '{property}': {message}")]
    TransformError {
        property: String,
        message: Cow<'static, str>,
    },

    /// Automatically converted from `serde_json::Error`
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Fetching a remote document failed
    #[error("HTTP error: {0}")]
    HttpError(Cow<'static, str>),

    /// Automatically converted from `std::io::Error`
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid document error with a static string
    pub fn invalid_document_static(msg: &'static str) -> Self {
        Error::InvalidDocument(Cow::Borrowed(msg))
    }

    /// Create an invalid document error with an owned string
    pub fn invalid_document_owned(msg: String) -> Self {
        Error::InvalidDocument(Cow::Owned(msg))
    }

    /// Create an unresolved reference error for the given id
    pub fn unresolved_reference<S: Into<String>>(id: S) -> Self {
        Error::UnresolvedReference { id: id.into() }
    }

    /// Create a transform error with a static message
    ///
    /// Transforms return this to abort the parse:
    ///
    /// ```rust,ignore
    /// config.with_transform("price", |_node, _value| {
    ///     Err(Error::transform_static("price", "missing currency"))
    /// });
    /// ```
    pub fn transform_static(property: &str, msg: &'static str) -> Self {
        Error::TransformError {
            property: property.to_string(),
            message: Cow::Borrowed(msg),
        }
    }

    /// Create a transform error with an owned message
    pub fn transform_owned(property: &str, msg: String) -> Self {
        Error::TransformError {
            property: property.to_string(),
            message: Cow::Owned(msg),
        }
    }

    /// Create an HTTP error with a static string
    pub fn http_static(msg: &'static str) -> Self {
        Error::HttpError(Cow::Borrowed(msg))
    }

    /// Create an HTTP error with an owned string
    pub fn http_owned(msg: String) -> Self {
        Error::HttpError(Cow::Owned(msg))
    }

    /// Whether this error comes from the shape of the input document
    ///
    /// Structural errors will fail again on the same input; the others
    /// (network, I/O, JSON) depend on the environment.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::InvalidDocument(_) | Error::UnresolvedReference { .. } | Error::TransformError { .. }
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::http_owned(err.to_string())
    }
}

/// Result type alias for html-microdata operations
pub type Result<T> = std::result::Result<T, Error>;
