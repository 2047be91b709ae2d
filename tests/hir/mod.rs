//! HIR layer tests
//!
//! Tests for the item model and schema-typed dispatch:
//! - Schema type registry
//! - Embedded dispatch and template regions
//! - Item classification
//! - XSLT schema inference

pub mod tests_classify;
pub mod tests_dispatch;
pub mod tests_inference;
pub mod tests_registry;
