//! Expression node taxonomy.

use super::operator::Operator;
use crate::error::{ExprError, ExprResult};
use crate::literal::Value;

/// A reference to a column, qualified by its table when known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub table: Option<String>,
    pub column: String,
}

impl Identifier {
    /// A table-qualified column reference: `"table"."column"`.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            column: column.into(),
        }
    }

    /// An unqualified column reference: `"column"`.
    pub fn bare(column: impl Into<String>) -> Self {
        Self {
            table: None,
            column: column.into(),
        }
    }
}

/// A scalar value that is quoted at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
    /// Optional `::type` suffix.
    pub sql_type: Option<String>,
}

impl Literal {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            sql_type: None,
        }
    }

    /// A literal with an explicit type cast suffix, e.g. `'2024-01-01'::date`.
    pub fn typed(value: impl Into<Value>, sql_type: &str) -> ExprResult<Self> {
        validate_sql_type(sql_type)?;
        Ok(Self {
            value: value.into(),
            sql_type: Some(sql_type.to_string()),
        })
    }

    /// `NULL` equality is rendered as `IS NULL`.
    pub fn is_null(&self) -> bool {
        self.value.is_null() && self.sql_type.is_none()
    }
}

/// A named function call: `NAME(arg1, arg2, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Node>,
}

impl FunctionCall {
    /// Create a function call, validating the name.
    pub fn new(name: impl Into<String>, args: Vec<Node>) -> ExprResult<Self> {
        let call = Self {
            name: name.into(),
            args,
        };
        call.validate()?;
        Ok(call)
    }

    /// Check the structural invariants of the call.
    ///
    /// Names are emitted verbatim, so they are limited to `[A-Za-z_][A-Za-z0-9_.]*`.
    pub fn validate(&self) -> ExprResult<()> {
        let mut chars = self.name.chars();
        let Some(first) = chars.next() else {
            return Err(ExprError::malformed("function name cannot be empty"));
        };
        if !(first == '_' || first.is_ascii_alphabetic())
            || !chars.all(|c| c == '_' || c == '.' || c.is_ascii_alphanumeric())
        {
            return Err(ExprError::malformed(format!(
                "invalid function name '{}'",
                self.name
            )));
        }
        Ok(())
    }
}

/// `CASE WHEN c1 THEN r1 [...] [ELSE e] END`
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    pub branches: Vec<(Node, Node)>,
    pub else_result: Option<Box<Node>>,
}

impl CaseExpr {
    /// Create a case expression; at least one branch or an else result is required.
    pub fn new(branches: Vec<(Node, Node)>, else_result: Option<Node>) -> ExprResult<Self> {
        let case = Self {
            branches,
            else_result: else_result.map(Box::new),
        };
        case.validate()?;
        Ok(case)
    }

    /// Check the structural invariants of the case expression.
    pub fn validate(&self) -> ExprResult<()> {
        if self.branches.is_empty() && self.else_result.is_none() {
            return Err(ExprError::malformed(
                "CASE requires at least one WHEN branch or an ELSE",
            ));
        }
        Ok(())
    }
}

/// The universal AST unit.
///
/// Nodes are plain immutable data: they hold no connection or table handle and
/// may be rendered any number of times, from any thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Column reference.
    Identifier(Identifier),
    /// Quoted scalar.
    Literal(Literal),
    /// `left <op> right`
    Binary {
        op: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Prefix/postfix operator applied to one operand.
    Unary { op: Operator, operand: Box<Node> },
    /// `NAME(args...)`
    Function(FunctionCall),
    /// `CASE ... END`
    Case(CaseExpr),
    /// `(inner)`
    Grouping(Box<Node>),
    /// `a, b, c`
    List(Vec<Node>),
    /// `<relation> "alias"`, usable in FROM/JOIN position.
    TableAlias { relation: Box<Node>, alias: String },
    /// Trusted, pre-rendered SQL inserted verbatim.
    ///
    /// # Safety
    /// The caller is responsible for keeping raw text injection-safe.
    Raw(String),
}

impl Node {
    /// A table-qualified column reference.
    pub fn column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Node::Identifier(Identifier::new(table, column))
    }

    /// A quoted literal.
    pub fn literal(value: impl Into<Value>) -> Self {
        Node::Literal(Literal::new(value))
    }

    /// The `NULL` literal.
    pub fn null() -> Self {
        Node::Literal(Literal::new(Value::Null))
    }

    /// A binary node with no coercion applied.
    ///
    /// Use [`OperatorRegistry::binary`](crate::render::OperatorRegistry::binary)
    /// to build extension operators with their registered coercions.
    pub fn binary(op: impl Into<Operator>, left: Node, right: Node) -> Self {
        Node::Binary {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// A unary node with no coercion applied.
    pub fn unary(op: impl Into<Operator>, operand: Node) -> Self {
        Node::Unary {
            op: op.into(),
            operand: Box::new(operand),
        }
    }

    /// A validated function call node.
    pub fn function(name: impl Into<String>, args: Vec<Node>) -> ExprResult<Self> {
        Ok(Node::Function(FunctionCall::new(name, args)?))
    }

    /// A validated case node.
    pub fn case(branches: Vec<(Node, Node)>, else_result: Option<Node>) -> ExprResult<Self> {
        Ok(Node::Case(CaseExpr::new(branches, else_result)?))
    }

    /// Wrap in parentheses.
    pub fn grouping(inner: Node) -> Self {
        Node::Grouping(Box::new(inner))
    }

    /// A comma-separated list.
    pub fn list(items: Vec<Node>) -> Self {
        Node::List(items)
    }

    /// An aliased relation: `<relation> "alias"`.
    pub fn table_alias(relation: Node, alias: impl Into<String>) -> Self {
        Node::TableAlias {
            relation: Box::new(relation),
            alias: alias.into(),
        }
    }

    /// Trusted raw SQL.
    pub fn raw(sql: impl Into<String>) -> Self {
        Node::Raw(sql.into())
    }

    /// Short name of the node kind, used in error messages and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Identifier(_) => "Identifier",
            Node::Literal(_) => "Literal",
            Node::Binary { .. } => "Binary",
            Node::Unary { .. } => "Unary",
            Node::Function(_) => "FunctionCall",
            Node::Case(_) => "Case",
            Node::Grouping(_) => "Grouping",
            Node::List(_) => "List",
            Node::TableAlias { .. } => "TableAlias",
            Node::Raw(_) => "Raw",
        }
    }
}

impl Node {
    /// Move every child node into `out`, leaving empty placeholders behind.
    fn take_children(&mut self, out: &mut Vec<Node>) {
        match self {
            Node::Binary { left, right, .. } => {
                out.push(std::mem::replace(&mut **left, Node::Raw(String::new())));
                out.push(std::mem::replace(&mut **right, Node::Raw(String::new())));
            }
            Node::Unary { operand: child, .. }
            | Node::Grouping(child)
            | Node::TableAlias { relation: child, .. } => {
                out.push(std::mem::replace(&mut **child, Node::Raw(String::new())));
            }
            Node::List(items) => out.append(items),
            Node::Function(call) => out.append(&mut call.args),
            Node::Case(case) => {
                for (condition, result) in case.branches.drain(..) {
                    out.push(condition);
                    out.push(result);
                }
                if let Some(else_result) = case.else_result.take() {
                    out.push(*else_result);
                }
            }
            Node::Identifier(_) | Node::Literal(_) | Node::Raw(_) => {}
        }
    }
}

// Deep trees (a `fold` over thousands of `and`s) are torn down with a heap
// stack instead of one native frame per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

impl From<Identifier> for Node {
    fn from(ident: Identifier) -> Self {
        Node::Identifier(ident)
    }
}

impl From<Literal> for Node {
    fn from(literal: Literal) -> Self {
        Node::Literal(literal)
    }
}

impl From<FunctionCall> for Node {
    fn from(call: FunctionCall) -> Self {
        Node::Function(call)
    }
}

impl From<CaseExpr> for Node {
    fn from(case: CaseExpr) -> Self {
        Node::Case(case)
    }
}

/// Type names that are spelled with more than one word.
const MULTI_WORD_TYPES: &[&str] = &[
    "double precision",
    "character varying",
    "bit varying",
    "national character",
    "national character varying",
    "timestamp with time zone",
    "timestamp without time zone",
    "time with time zone",
    "time without time zone",
];

/// Validate SQL type syntax emitted verbatim (`text`, `text[]`, `numeric(10,2)`,
/// `public.mood`, `timestamp(3) with time zone`).
///
/// Modifiers hold only digits and commas, array suffixes come last, and a name
/// with spaces must be one of [`MULTI_WORD_TYPES`].
pub(crate) fn validate_sql_type(sql_type: &str) -> ExprResult<()> {
    let invalid = || ExprError::malformed(format!("invalid SQL type '{sql_type}'"));
    let mut name = String::new();
    let mut in_array_suffix = false;
    let mut chars = sql_type.trim().chars();
    while let Some(c) = chars.next() {
        match c {
            '(' | '[' => {
                let close = if c == '(' { ')' } else { ']' };
                if c == '(' && in_array_suffix {
                    return Err(invalid());
                }
                let mut closed = false;
                for m in chars.by_ref() {
                    if m == close {
                        closed = true;
                        break;
                    }
                    if !(m.is_ascii_digit() || (close == ')' && matches!(m, ',' | ' '))) {
                        return Err(invalid());
                    }
                }
                if !closed {
                    return Err(invalid());
                }
                in_array_suffix |= c == '[';
            }
            _ if in_array_suffix => return Err(invalid()),
            c => name.push(c),
        }
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    let ok = match words.as_slice() {
        [] => false,
        [single] => crate::ident::split_qualified(single).is_some(),
        _ => {
            let spelled = words.join(" ").to_ascii_lowercase();
            MULTI_WORD_TYPES.contains(&spelled.as_str())
        }
    };
    if !ok {
        return Err(invalid());
    }
    Ok(())
}
