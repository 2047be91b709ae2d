//! High-level IR (HIR): the XDM item model and schema-typed dispatch.
//!
//! This module sits between the raw syntax trees and analysis. It decides
//! what a node *means* rather than how it is spelled.
//!
//! ## Key Types
//!
//! - [`Item`]: What a syntax node denotes in the XPath data model
//! - [`ItemClassifier`]: Kind-table driven node → item mapping
//! - [`SchemaTypeRegistry`]: Schema type identifiers and their languages
//! - [`LanguageHandle`]: A lazily loaded, shared embedded language
//! - [`EmbeddedTree`]: A parsed embedded value, mapped to the host
//!
//! ## Flow
//!
//! ```text
//! host node (attribute value, text)
//!     │
//!     ▼
//! schema_type_for(node)      ← XSLT declared types / AVT / TVT rules
//!     │
//!     ▼
//! parse_embedded(node, ty)   ← resolve language, parse value text
//!     │
//!     ▼
//! EmbeddedTree               ← regions(), syntax()
//!     │
//!     ▼
//! classify(node)             ← Item per embedded node
//! ```

mod classify;
mod config;
mod dispatch;
mod error;
mod infer;
mod item;
mod schema;

pub use classify::{
    ItemClassifier, ItemClassifierBuilder, ItemRule, xml_item_classifier, xpath_item_classifier,
};
pub use config::{AnalysisConfig, XsltVersion};
pub use dispatch::{EmbeddedTree, parse_embedded};
pub use error::{ClassifierError, SchemaError};
pub use infer::{declared_attribute_type, effective_version, expand_text, schema_type_for};
pub use item::{
    ArrayItem, AtomicType, AtomicValue, ElementRef, FunctionItem, Item, ItemCategory, MapItem,
    element_of,
};
pub use schema::{
    LanguageHandle, SchemaType, SchemaTypeRegistry, XSLT_SCHEMA_TYPES, global_registry,
    install_global_registry,
};
