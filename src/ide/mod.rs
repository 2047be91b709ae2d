//! Document analysis: the query surface over HIR.
//!
//! This module ties the host parser, schema inference and embedded
//! dispatch together for whole documents.
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use xdm::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_document("main.xsl", "<xsl:stylesheet ...>...</xsl:stylesheet>");
//!
//! let analysis = host.analysis();
//! for region in analysis.embedded_regions("main.xsl") {
//!     println!("{}: {:?}", region.schema_type.identifier(), region.host_range);
//! }
//! ```
//!
//! For one-off batch work, [`analyze_documents`] analyzes many documents
//! in parallel.

mod analysis;
mod document;

pub use analysis::{Analysis, AnalysisHost, ItemAt};
pub use document::{
    DocumentAnalysis, EmbeddedRegion, analyze_document, analyze_documents, analyze_documents_with,
};
