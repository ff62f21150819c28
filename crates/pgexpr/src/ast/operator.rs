//! Operator kinds.
//!
//! An [`Operator`] is just a name. The renderer knows how to print the core
//! kinds listed in [`CoreBinary`] and [`CoreUnary`]; every other kind must be
//! registered in the [`OperatorRegistry`](crate::render::OperatorRegistry).

use std::borrow::Cow;
use std::fmt;

/// The kind tag of a `Binary` or `Unary` node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Operator(Cow<'static, str>);

impl Operator {
    pub const EQ: Operator = Operator(Cow::Borrowed("="));
    pub const NOT_EQ: Operator = Operator(Cow::Borrowed("!="));
    pub const LT: Operator = Operator(Cow::Borrowed("<"));
    pub const LT_EQ: Operator = Operator(Cow::Borrowed("<="));
    pub const GT: Operator = Operator(Cow::Borrowed(">"));
    pub const GT_EQ: Operator = Operator(Cow::Borrowed(">="));
    pub const AND: Operator = Operator(Cow::Borrowed("AND"));
    pub const OR: Operator = Operator(Cow::Borrowed("OR"));
    pub const AS: Operator = Operator(Cow::Borrowed("AS"));
    pub const BETWEEN: Operator = Operator(Cow::Borrowed("BETWEEN"));
    pub const IN: Operator = Operator(Cow::Borrowed("IN"));
    pub const NOT_IN: Operator = Operator(Cow::Borrowed("NOT IN"));
    pub const LIKE: Operator = Operator(Cow::Borrowed("LIKE"));
    pub const ILIKE: Operator = Operator(Cow::Borrowed("ILIKE"));
    pub const FROM: Operator = Operator(Cow::Borrowed("FROM"));
    pub const PLUS: Operator = Operator(Cow::Borrowed("+"));
    pub const MINUS: Operator = Operator(Cow::Borrowed("-"));
    pub const MULTIPLY: Operator = Operator(Cow::Borrowed("*"));
    pub const DIVIDE: Operator = Operator(Cow::Borrowed("/"));

    pub const NOT: Operator = Operator(Cow::Borrowed("NOT"));
    pub const ASC: Operator = Operator(Cow::Borrowed("ASC"));
    pub const DESC: Operator = Operator(Cow::Borrowed("DESC"));
    pub const INTERVAL: Operator = Operator(Cow::Borrowed("INTERVAL"));
    pub const CROSS_JOIN: Operator = Operator(Cow::Borrowed("CROSS JOIN"));

    /// Create an operator kind from any name.
    pub fn new(kind: impl Into<Cow<'static, str>>) -> Self {
        Operator(kind.into())
    }

    /// The operator kind name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the renderer has a built-in rule for this kind in binary position.
    pub fn is_core_binary(&self) -> bool {
        CoreBinary::from_kind(self.as_str()).is_some()
    }

    /// Whether the renderer has a built-in rule for this kind in unary position.
    pub fn is_core_unary(&self) -> bool {
        CoreUnary::from_kind(self.as_str()).is_some()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Operator {
    fn from(kind: &'static str) -> Self {
        Operator(Cow::Borrowed(kind))
    }
}

impl From<String> for Operator {
    fn from(kind: String) -> Self {
        Operator(Cow::Owned(kind))
    }
}

/// Binary operators with built-in rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreBinary {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    As,
    Between,
    In,
    NotIn,
    Like,
    ILike,
    From,
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl CoreBinary {
    /// Look up a core binary operator by kind name.
    pub fn from_kind(kind: &str) -> Option<Self> {
        Some(match kind {
            "=" => CoreBinary::Eq,
            "!=" | "<>" => CoreBinary::NotEq,
            "<" => CoreBinary::Lt,
            "<=" => CoreBinary::LtEq,
            ">" => CoreBinary::Gt,
            ">=" => CoreBinary::GtEq,
            "AND" => CoreBinary::And,
            "OR" => CoreBinary::Or,
            "AS" => CoreBinary::As,
            "BETWEEN" => CoreBinary::Between,
            "IN" => CoreBinary::In,
            "NOT IN" => CoreBinary::NotIn,
            "LIKE" => CoreBinary::Like,
            "ILIKE" => CoreBinary::ILike,
            "FROM" => CoreBinary::From,
            "+" => CoreBinary::Plus,
            "-" => CoreBinary::Minus,
            "*" => CoreBinary::Multiply,
            "/" => CoreBinary::Divide,
            _ => return None,
        })
    }

    pub fn precedence(self) -> Precedence {
        match self {
            CoreBinary::As | CoreBinary::From => Precedence::Alias,
            CoreBinary::Or => Precedence::Or,
            CoreBinary::And => Precedence::And,
            CoreBinary::Eq
            | CoreBinary::NotEq
            | CoreBinary::Lt
            | CoreBinary::LtEq
            | CoreBinary::Gt
            | CoreBinary::GtEq => Precedence::Comparison,
            CoreBinary::Between
            | CoreBinary::In
            | CoreBinary::NotIn
            | CoreBinary::Like
            | CoreBinary::ILike => Precedence::Range,
            CoreBinary::Plus | CoreBinary::Minus => Precedence::Additive,
            CoreBinary::Multiply | CoreBinary::Divide => Precedence::Multiplicative,
        }
    }

    /// `a op (b op c)` means the same as `a op b op c`.
    pub fn is_associative(self) -> bool {
        matches!(
            self,
            CoreBinary::And | CoreBinary::Or | CoreBinary::Plus | CoreBinary::Multiply
        )
    }

    /// The SQL text emitted between the operands (without surrounding spaces).
    pub fn symbol(self) -> &'static str {
        match self {
            CoreBinary::Eq => "=",
            CoreBinary::NotEq => "!=",
            CoreBinary::Lt => "<",
            CoreBinary::LtEq => "<=",
            CoreBinary::Gt => ">",
            CoreBinary::GtEq => ">=",
            CoreBinary::And => "AND",
            CoreBinary::Or => "OR",
            CoreBinary::As => "AS",
            CoreBinary::Between => "BETWEEN",
            CoreBinary::In => "IN",
            CoreBinary::NotIn => "NOT IN",
            CoreBinary::Like => "LIKE",
            CoreBinary::ILike => "ILIKE",
            CoreBinary::From => "FROM",
            CoreBinary::Plus => "+",
            CoreBinary::Minus => "-",
            CoreBinary::Multiply => "*",
            CoreBinary::Divide => "/",
        }
    }
}

/// How tightly an operator binds, loosest first.
///
/// Mirrors the Postgres operator precedence table; registered operators sit
/// at [`Precedence::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// `AS`, `FROM`: only appear at the top of an argument.
    Alias,
    Or,
    And,
    Not,
    /// `=`, `<`, `>=`, `IS NULL`, ...
    Comparison,
    /// `BETWEEN`, `IN`, `LIKE`, `ILIKE`
    Range,
    /// Any other operator, including registered ones.
    Other,
    Additive,
    Multiplicative,
}

impl Precedence {
    /// Comparison and range operators do not chain without parentheses.
    pub fn is_chainable(self) -> bool {
        !matches!(self, Precedence::Comparison | Precedence::Range)
    }
}

/// Unary operators with built-in rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreUnary {
    /// `NOT (x)`
    Not,
    /// `x ASC`
    Asc,
    /// `x DESC`
    Desc,
    /// `INTERVAL x`
    Interval,
    /// `CROSS JOIN x`
    CrossJoin,
}

impl CoreUnary {
    /// Look up a core unary operator by kind name.
    pub fn from_kind(kind: &str) -> Option<Self> {
        Some(match kind {
            "NOT" => CoreUnary::Not,
            "ASC" => CoreUnary::Asc,
            "DESC" => CoreUnary::Desc,
            "INTERVAL" => CoreUnary::Interval,
            "CROSS JOIN" => CoreUnary::CrossJoin,
            _ => return None,
        })
    }
}
