//! Schema types and the registry that maps them to embedded languages.
//!
//! A schema type (`xsl:expression`, `xsl:avt`, ...) names the
//! micro-language its values are written in. The language itself is held
//! behind a [`LanguageHandle`] and only loaded when first needed.

use std::fmt;
use std::sync::{Arc, LazyLock, OnceLock};

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, warn};

use super::error::SchemaError;
use crate::xpath::{EmbeddedParser, SchemaLanguage};

type Loader = dyn Fn() -> Result<Arc<dyn EmbeddedParser>, String> + Send + Sync;

struct LanguageDef {
    name: SmolStr,
    loader: Box<Loader>,
    resolved: OnceLock<Result<Arc<dyn EmbeddedParser>, String>>,
}

/// A shared, lazily loaded embedded language.
///
/// Clones share one definition; equality is identity of that definition.
#[derive(Clone)]
pub struct LanguageHandle(Arc<LanguageDef>);

impl LanguageHandle {
    /// A language loaded by `loader` on first use.
    pub fn new<F>(name: impl Into<SmolStr>, loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn EmbeddedParser>, String> + Send + Sync + 'static,
    {
        Self(Arc::new(LanguageDef {
            name: name.into(),
            loader: Box::new(loader),
            resolved: OnceLock::new(),
        }))
    }

    /// A language that is already loaded.
    pub fn from_parser(parser: Arc<dyn EmbeddedParser>) -> Self {
        let name = SmolStr::new(parser.name());
        Self(Arc::new(LanguageDef {
            name,
            resolved: OnceLock::from(Ok(parser.clone())),
            loader: Box::new(move || Ok(parser.clone())),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The parser for this language.
    ///
    /// The loader runs at most once per handle; its result, success or
    /// failure, is returned to every later caller.
    pub fn resolve(&self) -> Result<Arc<dyn EmbeddedParser>, String> {
        self.0
            .resolved
            .get_or_init(|| {
                debug!(language = %self.0.name, "loading embedded language");
                let result = (self.0.loader)();
                if let Err(reason) = &result {
                    warn!(language = %self.0.name, %reason, "embedded language failed to load");
                }
                result
            })
            .clone()
    }

    pub fn is_resolved(&self) -> bool {
        self.0.resolved.get().is_some()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for LanguageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for LanguageHandle {}

impl fmt::Debug for LanguageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageHandle")
            .field("name", &self.0.name)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

static BUILTIN_HANDLES: LazyLock<[LanguageHandle; SchemaLanguage::ALL.len()]> =
    LazyLock::new(|| {
        SchemaLanguage::ALL.map(|language| {
            LanguageHandle::new(language.name(), move || {
                Ok(Arc::new(language) as Arc<dyn EmbeddedParser>)
            })
        })
    });

impl SchemaLanguage {
    /// The process-wide handle for this built-in language.
    pub fn handle(self) -> LanguageHandle {
        BUILTIN_HANDLES[self as usize].clone()
    }
}

/// A registered schema type.
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaType {
    identifier: SmolStr,
    embedded_language: LanguageHandle,
}

impl SchemaType {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn embedded_language(&self) -> &LanguageHandle {
        &self.embedded_language
    }
}

/// Schema types of XSLT 3.0 and the language each is written in.
pub const XSLT_SCHEMA_TYPES: &[(&str, SchemaLanguage)] = &[
    ("xsl:accumulator-names", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:avt", SchemaLanguage::ValueTemplate),
    ("xsl:default-mode-type", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:element-names", SchemaLanguage::NameTests),
    ("xsl:EQName", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:EQName-in-namespace", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:EQNames", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:expr-avt", SchemaLanguage::ValueTemplate),
    ("xsl:expression", SchemaLanguage::Expression),
    ("xsl:item-type", SchemaLanguage::ItemType),
    ("xsl:method", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:mode", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:modes", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:nametests", SchemaLanguage::NameTests),
    ("xsl:pattern", SchemaLanguage::Pattern),
    ("xsl:prefix", SchemaLanguage::Tokens),
    ("xsl:prefix-list", SchemaLanguage::Tokens),
    ("xsl:prefix-list-or-all", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:prefix-or-default", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:prefixes", SchemaLanguage::Tokens),
    ("xsl:QName", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:QNames", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:sequence-type", SchemaLanguage::SequenceType),
    ("xsl:streamability-type", SchemaLanguage::EQNamesOrHashedKeywords),
    ("xsl:tokens", SchemaLanguage::Tokens),
    ("xsl:text-value-template", SchemaLanguage::ValueTemplate),
];

/// Identifier to schema type map.
///
/// Entries are never replaced or removed, so an `Arc<SchemaType>` handed
/// out once stays the registry's entry for that identifier.
#[derive(Debug, Default, Clone)]
pub struct SchemaTypeRegistry {
    types: IndexMap<SmolStr, Arc<SchemaType>>,
}

impl SchemaTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding [`XSLT_SCHEMA_TYPES`].
    pub fn xslt() -> Self {
        let types = XSLT_SCHEMA_TYPES
            .iter()
            .map(|&(identifier, language)| {
                let identifier = SmolStr::new_static(identifier);
                let ty = Arc::new(SchemaType {
                    identifier: identifier.clone(),
                    embedded_language: language.handle(),
                });
                (identifier, ty)
            })
            .collect();
        Self { types }
    }

    /// Add a schema type. A taken identifier is an error and leaves the
    /// existing entry in place.
    pub fn register(
        &mut self,
        identifier: impl Into<SmolStr>,
        language: LanguageHandle,
    ) -> Result<Arc<SchemaType>, SchemaError> {
        let identifier = identifier.into();
        if self.types.contains_key(&identifier) {
            warn!(%identifier, "schema type already registered");
            return Err(SchemaError::DuplicateSchemaType(identifier));
        }
        debug!(%identifier, language = language.name(), "registering schema type");
        let ty = Arc::new(SchemaType {
            identifier: identifier.clone(),
            embedded_language: language,
        });
        self.types.insert(identifier, ty.clone());
        Ok(ty)
    }

    pub fn lookup(&self, identifier: &str) -> Option<Arc<SchemaType>> {
        self.types.get(identifier).cloned()
    }

    /// Registered identifiers, in registration order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

static GLOBAL_REGISTRY: OnceLock<SchemaTypeRegistry> = OnceLock::new();

/// The process-wide registry, initialized with the XSLT schema types
/// unless another registry was installed first.
pub fn global_registry() -> &'static SchemaTypeRegistry {
    GLOBAL_REGISTRY.get_or_init(|| {
        debug!("initializing global schema type registry");
        SchemaTypeRegistry::xslt()
    })
}

/// Install the process-wide registry. Fails, handing the registry back,
/// once the global registry has been initialized.
pub fn install_global_registry(registry: SchemaTypeRegistry) -> Result<(), SchemaTypeRegistry> {
    GLOBAL_REGISTRY.set(registry)
}
