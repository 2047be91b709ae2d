//! IDE layer tests
//!
//! Whole-document analysis through `AnalysisHost` and the batch API.

pub mod tests_analysis;
