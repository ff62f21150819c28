//! Built-in operator extensions.
//!
//! Extensions add operator kinds to an [`OperatorRegistry`]; the renderer's
//! core dispatch is never touched. Install them through
//! [`RendererConfigBuilder::with_extension`](crate::render::RendererConfigBuilder::with_extension)
//! or use [`RendererConfig::postgres`](crate::RendererConfig::postgres), which
//! installs both.

pub mod array;
pub mod json;

pub use json::JsonPredications;

use crate::render::OperatorRegistry;
use serde::Deserialize;

/// A built-in extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    /// `ARRAY[...]` and `ARRAY[...]::text[]` literals.
    Array,
    /// JSON operators `->`, `->>`, `#>`, `#>>` (installs [`Extension::Array`] too).
    Json,
}

impl Extension {
    /// Register this extension's operator kinds.
    pub fn install(self, registry: &mut OperatorRegistry) {
        match self {
            Extension::Array => array::install(registry),
            Extension::Json => json::install(registry),
        }
    }
}

#[cfg(test)]
mod tests;
