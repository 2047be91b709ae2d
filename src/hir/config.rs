//! Analysis options.

use std::fmt;

/// XSLT language version a stylesheet is analyzed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum XsltVersion {
    V1_0,
    V2_0,
    #[default]
    V3_0,
}

impl XsltVersion {
    /// Parse a `version` attribute value. Versions above 3.0 are treated
    /// as 3.0, as forwards-compatible processing requires.
    pub fn from_attribute(value: &str) -> Option<Self> {
        let version: f64 = value.trim().parse().ok()?;
        if version < 1.0 {
            None
        } else if version < 2.0 {
            Some(Self::V1_0)
        } else if version < 3.0 {
            Some(Self::V2_0)
        } else {
            Some(Self::V3_0)
        }
    }

    /// Text value templates exist from XSLT 3.0 on
    pub fn has_text_value_templates(self) -> bool {
        self >= Self::V3_0
    }
}

impl fmt::Display for XsltVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::V1_0 => "1.0",
            Self::V2_0 => "2.0",
            Self::V3_0 => "3.0",
        })
    }
}

/// Options for schema inference and document analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Version assumed when no `version` attribute is in scope
    pub xslt_version: XsltVersion,
    /// `expand-text` value assumed when no element sets it
    pub expand_text_default: bool,
    /// Include the host document's own syntax errors in diagnostics
    pub report_host_errors: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            xslt_version: XsltVersion::V3_0,
            expand_text_default: false,
            report_host_errors: true,
        }
    }
}
