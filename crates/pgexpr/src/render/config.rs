use super::registry::{Operand, OperatorDef, OperatorRegistry};
use crate::ast::{Node, Operator};
use crate::error::{ExprError, ExprResult};
use crate::ext::Extension;
use crate::ident::Dialect;
use crate::literal::{BooleanStyle, LiteralQuoter};
use serde::Deserialize;
use std::sync::OnceLock;

/// Immutable renderer configuration: dialect, literal quoting and the
/// registered extension operators.
///
/// Build one with [`RendererConfig::builder`] (or [`RendererConfig::postgres`])
/// before rendering begins; a built config cannot be mutated, so it can be
/// shared freely across threads.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    dialect: Dialect,
    quoter: LiteralQuoter,
    operators: OperatorRegistry,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::postgres()
    }
}

impl RendererConfig {
    /// Start building a configuration with no extensions installed.
    pub fn builder() -> RendererConfigBuilder {
        RendererConfigBuilder::default()
    }

    /// Postgres dialect, `TRUE`/`FALSE` booleans, array and JSON extensions installed.
    pub fn postgres() -> Self {
        let mut operators = OperatorRegistry::new();
        Extension::Array.install(&mut operators);
        Extension::Json.install(&mut operators);
        Self {
            dialect: Dialect::Postgres,
            quoter: LiteralQuoter::new(BooleanStyle::Keyword),
            operators,
        }
    }

    /// Load a configuration from TOML.
    ///
    /// ```toml
    /// [renderer]
    /// dialect = "postgres"
    /// boolean_style = "keyword"   # or "numeric"
    /// extensions = ["array", "json"]
    /// ```
    pub fn from_toml_str(raw: &str) -> ExprResult<Self> {
        let file: ConfigFile = toml::from_str(raw)?;
        let section = file.renderer;
        let mut builder = Self::builder()
            .dialect(section.dialect)
            .boolean_style(section.boolean_style);
        for ext in section.extensions {
            builder = builder.with_extension(ext);
        }
        builder.build()
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn quoter(&self) -> &LiteralQuoter {
        &self.quoter
    }

    pub fn operators(&self) -> &OperatorRegistry {
        &self.operators
    }

    /// Build a binary node with the registered coercions (see [`OperatorRegistry::binary`]).
    pub fn binary(
        &self,
        kind: impl Into<Operator>,
        left: impl Into<Operand>,
        right: impl Into<Operand>,
    ) -> ExprResult<Node> {
        self.operators.binary(kind, left, right)
    }

    /// Build a unary node with the registered coercion (see [`OperatorRegistry::unary`]).
    pub fn unary(&self, kind: impl Into<Operator>, operand: impl Into<Operand>) -> ExprResult<Node> {
        self.operators.unary(kind, operand)
    }
}

/// Builder for [`RendererConfig`].
///
/// Registration errors are collected and reported by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RendererConfigBuilder {
    dialect: Dialect,
    boolean_style: BooleanStyle,
    operators: OperatorRegistry,
    error: Option<ExprError>,
}

impl RendererConfigBuilder {
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn boolean_style(mut self, style: BooleanStyle) -> Self {
        self.boolean_style = style;
        self
    }

    /// Install a built-in extension. Installing twice is harmless.
    pub fn with_extension(mut self, ext: Extension) -> Self {
        ext.install(&mut self.operators);
        self
    }

    /// Register a custom operator kind (last registration wins).
    pub fn register_operator(mut self, kind: impl Into<String>, def: OperatorDef) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.operators.register(kind, def) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Freeze the configuration.
    pub fn build(self) -> ExprResult<RendererConfig> {
        if let Some(e) = self.error {
            return Err(e);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "pgexpr.registry",
            dialect = ?self.dialect,
            boolean_style = ?self.boolean_style,
            operators = ?self.operators.kinds(),
            "renderer config frozen"
        );
        Ok(RendererConfig {
            dialect: self.dialect,
            quoter: LiteralQuoter::new(self.boolean_style),
            operators: self.operators,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    renderer: RendererSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RendererSection {
    dialect: Dialect,
    boolean_style: BooleanStyle,
    extensions: Vec<Extension>,
}

impl Default for RendererSection {
    fn default() -> Self {
        Self {
            dialect: Dialect::Postgres,
            boolean_style: BooleanStyle::Keyword,
            extensions: vec![Extension::Array, Extension::Json],
        }
    }
}

static GLOBAL: OnceLock<RendererConfig> = OnceLock::new();

/// Install the process-wide configuration used by [`Node::to_sql`].
///
/// Must happen before the first call to [`global`]; afterwards the global
/// configuration is frozen and this returns [`ExprError::Config`].
pub fn install_global(config: RendererConfig) -> ExprResult<&'static RendererConfig> {
    GLOBAL
        .set(config)
        .map_err(|_| ExprError::config("global renderer config is already installed"))?;
    GLOBAL
        .get()
        .ok_or_else(|| ExprError::config("global renderer config is not installed"))
}

/// The process-wide configuration; defaults to [`RendererConfig::postgres`]
/// if none was installed.
pub fn global() -> &'static RendererConfig {
    GLOBAL.get_or_init(RendererConfig::postgres)
}
