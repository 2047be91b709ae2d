//! Common documents and registries for tests.

use once_cell::sync::Lazy;
use xdm::hir::SchemaTypeRegistry;

/// One registry shared by every test in the binary.
pub static XSLT_REGISTRY: Lazy<SchemaTypeRegistry> = Lazy::new(SchemaTypeRegistry::xslt);

pub const XSL_NS: &str = "http://www.w3.org/1999/XSL/Transform";

pub const HELLO_AVT: &str = r#"<xsl:stylesheet xmlns:xsl="http://www.w3.org/1999/XSL/Transform" version="3.0">
  <xsl:template match="/">
    <greeting text="Hello {$name}!"/>
  </xsl:template>
</xsl:stylesheet>"#;

pub const IDENTITY_TRANSFORM: &str = r#"<xsl:stylesheet xmlns:xsl="http://www.w3.org/1999/XSL/Transform" version="3.0">
  <xsl:mode on-no-match="shallow-copy"/>
  <xsl:template match="@*|node()">
    <xsl:copy>
      <xsl:apply-templates select="@*|node()"/>
    </xsl:copy>
  </xsl:template>
</xsl:stylesheet>"#;

pub const TEXT_VALUE_TEMPLATES: &str = r#"<xsl:stylesheet xmlns:xsl="http://www.w3.org/1999/XSL/Transform" version="3.0" expand-text="yes">
  <xsl:template name="main" as="element(p)">
    <p>Total: {sum($items ! xs:decimal(.))}</p>
  </xsl:template>
</xsl:stylesheet>"#;

pub const MIXED_ERRORS: &str = r#"<xsl:stylesheet xmlns:xsl="http://www.w3.org/1999/XSL/Transform" version="3.0">
  <xsl:template match="a[">
    <xsl:value-of select="map { 'k': 1 }?k"/>
    <xsl:if test="1 = ">x</xsl:if>
    <xsl:for-each select="1 to 3" />
  </xsl:template>
</xsl:stylesheet>"#;

pub const ENTITY_ESCAPES: &str = r#"<xsl:stylesheet xmlns:xsl="http://www.w3.org/1999/XSL/Transform" version="3.0">
  <xsl:template match="/">
    <xsl:if test="$a &lt; 3 and $b &gt; 1">yes</xsl:if>
  </xsl:template>
</xsl:stylesheet>"#;

pub const PROLOG_AND_MARKUP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- generated {do not edit} -->
<xsl:stylesheet xmlns:xsl="http://www.w3.org/1999/XSL/Transform" version="3.0" expand-text="yes">
  <xsl:template match="/">
    <p>{$x}<?pi {z?><![CDATA[{$y}]]><!-- {c --></p>
  </xsl:template>
</xsl:stylesheet>"#;
