//! Error types for pgexpr

use thiserror::Error;

/// Result type alias for pgexpr operations
pub type ExprResult<T> = Result<T, ExprError>;

/// Errors raised while building or rendering expression trees.
///
/// Every variant is a programmer error in how a tree was assembled; nothing is
/// retried and no partial SQL is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// An operator kind was rendered (or built) without being registered.
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// A scalar that the literal quoting service cannot express.
    #[error("Unsupported literal kind: {0}")]
    UnsupportedLiteralKind(String),

    /// A node violates a structural invariant (empty function name, empty CASE, ...).
    #[error("Malformed node: {0}")]
    MalformedNode(String),

    /// A CROSS JOIN target of an unrecognized shape.
    #[error("Invalid join target: {0}")]
    InvalidJoinTarget(String),

    /// Identifier or input validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Renderer configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExprError {
    /// Create an unknown operator error
    pub fn unknown_operator(kind: impl Into<String>) -> Self {
        Self::UnknownOperator(kind.into())
    }

    /// Create an unsupported literal error
    pub fn unsupported_literal(message: impl Into<String>) -> Self {
        Self::UnsupportedLiteralKind(message.into())
    }

    /// Create a malformed node error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedNode(message.into())
    }

    /// Create an invalid join target error
    pub fn invalid_join_target(message: impl Into<String>) -> Self {
        Self::InvalidJoinTarget(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an unknown operator error
    pub fn is_unknown_operator(&self) -> bool {
        matches!(self, Self::UnknownOperator(_))
    }

    /// Check if this is a malformed node error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedNode(_))
    }

    /// Check if this is an unsupported literal error
    pub fn is_unsupported_literal(&self) -> bool {
        matches!(self, Self::UnsupportedLiteralKind(_))
    }
}

impl From<toml::de::Error> for ExprError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
