//! Semantic query builder.
//!
//! A [`QueryBuilder`] is bound to one table through a [`TableResolver`] and
//! builds ready-to-render [`Node`] trees: function calls, casts, cross joins,
//! boolean aggregates, date predicates and custom id orderings. Nothing here
//! executes SQL.
//!
//! Every column parameter takes `impl Into<ColumnRef>`: a bare name is
//! resolved against the bound table, a [`Node`] is used as is.
//!
//! ```
//! use pgexpr::builder::{QueryBuilder, Table};
//!
//! let qb = QueryBuilder::new(Table::new("articles"));
//! let sql = qb.sum_by_boolean("featured").to_sql().unwrap();
//! assert_eq!(sql, r#"SUM(CASE WHEN "articles"."featured" THEN 1 ELSE 0 END)"#);
//! ```

mod clock;
mod dates;
mod table;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dates::{Interval, IntoDay};
pub use table::{ColumnRef, JoinTarget, Table, TableMeta, TableResolver};

use crate::ast::{CaseBuilder, FunctionCall, IntoNode, Node, Operator};
use crate::error::{ExprError, ExprResult};
use crate::ext::array;
use crate::ident::{QuotingProvider, split_qualified};
use crate::literal::Value;
use crate::render::{Operand, RendererConfig, global};
use std::fmt;
use std::sync::Arc;

/// Build a `Vec<Node>` from heterogeneous arguments via [`IntoNode`].
///
/// ```
/// use pgexpr::{nodes, Node};
///
/// let args = nodes![Node::column("articles", "id"), 2, "foo"];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! nodes {
    () => { ::std::vec::Vec::<$crate::Node>::new() };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::IntoNode::into_node($arg)),+]
    };
}

/// A field of a date/time value for `EXTRACT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Dow,
    Doy,
    Hour,
    Minute,
    Second,
    Epoch,
}

impl DatePart {
    pub fn as_str(self) -> &'static str {
        match self {
            DatePart::Year => "YEAR",
            DatePart::Quarter => "QUARTER",
            DatePart::Month => "MONTH",
            DatePart::Week => "WEEK",
            DatePart::Day => "DAY",
            DatePart::Dow => "DOW",
            DatePart::Doy => "DOY",
            DatePart::Hour => "HOUR",
            DatePart::Minute => "MINUTE",
            DatePart::Second => "SECOND",
            DatePart::Epoch => "EPOCH",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Parse a direction from text starting with `asc` or `desc` (any case).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim_start().to_ascii_lowercase();
        if lower.starts_with("asc") {
            Some(Direction::Asc)
        } else if lower.starts_with("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }
}

/// Expression builder bound to one table.
///
/// Cheap to construct; holds the resolver, the renderer config used for
/// extension nodes, the identifier quoting service and a clock.
#[derive(Clone)]
pub struct QueryBuilder<'c, R = Table> {
    table: R,
    config: &'c RendererConfig,
    /// Overrides the config's dialect when set.
    quoting: Option<Arc<dyn QuotingProvider + Send + Sync>>,
    clock: Arc<dyn Clock>,
}

impl<R: fmt::Debug> fmt::Debug for QueryBuilder<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("table", &self.table)
            .field("dialect", &self.config.dialect())
            .finish_non_exhaustive()
    }
}

impl QueryBuilder<'static, Table> {
    /// Bind to a model's table (see [`TableMeta`]).
    pub fn for_model<T: TableMeta>() -> Self {
        Self::new(T::table())
    }
}

impl<R: TableResolver> QueryBuilder<'static, R> {
    /// Bind to `table`, using the global renderer config and the system clock.
    pub fn new(table: R) -> Self {
        let config = global();
        Self {
            table,
            config,
            quoting: None,
            clock: Arc::new(SystemClock),
        }
    }
}

impl<'c, R: TableResolver> QueryBuilder<'c, R> {
    /// Use `config` when building extension nodes (arrays).
    ///
    /// Raw table names follow the new config's dialect unless
    /// [`with_quoting`](Self::with_quoting) installed a provider, which is kept.
    pub fn with_config<'n>(self, config: &'n RendererConfig) -> QueryBuilder<'n, R> {
        QueryBuilder {
            table: self.table,
            config,
            quoting: self.quoting,
            clock: self.clock,
        }
    }

    /// Replace the clock used by now-relative predicates.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the identifier quoting service used for raw table names.
    pub fn with_quoting(mut self, quoting: impl QuotingProvider + Send + Sync + 'static) -> Self {
        self.quoting = Some(Arc::new(quoting));
        self
    }

    fn quote_table_name(&self, name: &str) -> ExprResult<String> {
        match &self.quoting {
            Some(quoting) => quoting.quote_table_name(name),
            None => self.config.dialect().quote_table_name(name),
        }
    }

    fn quote_identifier(&self, name: &str) -> ExprResult<String> {
        match &self.quoting {
            Some(quoting) => quoting.quote_identifier(name),
            None => self.config.dialect().quote_identifier(name),
        }
    }

    pub fn table(&self) -> &R {
        &self.table
    }

    pub fn config(&self) -> &'c RendererConfig {
        self.config
    }

    /// Resolve a column reference against the bound table.
    pub fn attr(&self, column: impl Into<ColumnRef>) -> Node {
        column.into().resolve(&self.table)
    }

    /// The primary key column of the bound table.
    pub fn primary_key(&self) -> Node {
        Node::Identifier(self.table.column(self.table.primary_key()))
    }

    /// `NAME(args...)`
    pub fn function(&self, name: &str, args: Vec<Node>) -> ExprResult<Node> {
        Node::function(name, args)
    }

    /// Alias of [`function`](Self::function).
    pub fn fn_(&self, name: &str, args: Vec<Node>) -> ExprResult<Node> {
        self.function(name, args)
    }

    /// `NOW()`
    pub fn now_fn(&self) -> Node {
        call("NOW", Vec::new())
    }

    /// `COALESCE(args...)`
    pub fn coalesce<I, T>(&self, args: I) -> Node
    where
        I: IntoIterator<Item = T>,
        T: IntoNode,
    {
        call("COALESCE", args.into_iter().map(IntoNode::into_node).collect())
    }

    /// `CONCAT(args...)`
    pub fn concat<I, T>(&self, args: I) -> Node
    where
        I: IntoIterator<Item = T>,
        T: IntoNode,
    {
        call("CONCAT", args.into_iter().map(IntoNode::into_node).collect())
    }

    pub fn case_expr(&self) -> CaseBuilder {
        CaseBuilder::new()
    }

    /// Wrap a value as a literal.
    pub fn quote(&self, value: impl Into<Value>) -> Node {
        Node::literal(value)
    }

    /// `CAST(value AS sql_type)`; `sql_type` is raw SQL type syntax.
    pub fn cast(&self, value: impl IntoNode, sql_type: &str) -> ExprResult<Node> {
        crate::ast::validate_sql_type(sql_type)?;
        Ok(self.cast_as(value, Node::raw(sql_type.trim())))
    }

    /// `CAST(value AS type_node)`
    pub fn cast_as(&self, value: impl IntoNode, type_node: Node) -> Node {
        call("CAST", vec![value.into_node().as_(type_node)])
    }

    /// `(v1), (v2), ...`: each value as a one-column row.
    pub fn cast_as_array<I, T>(&self, items: I) -> Node
    where
        I: IntoIterator<Item = T>,
        T: IntoNode,
    {
        Node::list(
            items
                .into_iter()
                .map(|item| Node::grouping(item.into_node()))
                .collect(),
        )
    }

    /// `CROSS JOIN <target>`.
    ///
    /// Names are quoted as table names; a node target must be an aliased
    /// relation ([`Node::TableAlias`]) and is joined as is.
    pub fn cross_join(&self, target: impl Into<JoinTarget>) -> ExprResult<Node> {
        let relation = match target.into() {
            JoinTarget::Name(name) => {
                if name.trim().is_empty() {
                    return Err(ExprError::invalid_join_target(
                        "cross join table name cannot be empty",
                    ));
                }
                Node::raw(self.quote_table_name(&name)?)
            }
            JoinTarget::Node(node @ Node::TableAlias { .. }) => node,
            JoinTarget::Node(other) => {
                return Err(ExprError::invalid_join_target(format!(
                    "cannot cross join against a {} node; expected an aliased relation",
                    other.kind_name()
                )));
            }
        };
        Ok(Node::unary(Operator::CROSS_JOIN, relation))
    }

    /// Alias a sub-select: returns `(query) "alias"` and a table for column
    /// lookups against the alias.
    pub fn subquery_as_table(&self, query: Node, alias: &str) -> ExprResult<(Node, Table)> {
        self.quote_identifier(alias)?;
        let relation = Node::table_alias(Node::grouping(query), alias);
        Ok((relation, Table::new(alias)))
    }

    /// `SELECT k1, k2 FROM "table"`
    ///
    /// Keys are emitted bare and must be plain (optionally dotted) identifiers.
    pub fn select_keys_from(&self, keys: &[&str], table_name: &str) -> ExprResult<Node> {
        if keys.is_empty() {
            return Err(ExprError::validation("select_keys_from requires at least one key"));
        }
        if let Some(bad) = keys.iter().find(|k| split_qualified(k).is_none()) {
            return Err(ExprError::validation(format!("invalid select key '{bad}'")));
        }
        let table = self.quote_table_name(table_name)?;
        Ok(Node::raw(format!("SELECT {} FROM {table}", keys.join(", "))))
    }

    /// `column IS NULL`
    pub fn is_null(&self, column: impl Into<ColumnRef>) -> Node {
        self.attr(column).eq(Node::null())
    }

    /// `COUNT(CASE WHEN column THEN 1 END)`
    pub fn count_by_boolean(&self, column: impl Into<ColumnRef>) -> Node {
        let case = Node::Case(crate::ast::CaseExpr {
            branches: vec![(self.attr(column), Node::literal(1))],
            else_result: None,
        });
        call("COUNT", vec![case])
    }

    /// `SUM(CASE WHEN column THEN 1 ELSE 0 END)`
    pub fn sum_by_boolean(&self, column: impl Into<ColumnRef>) -> Node {
        self.sum_by_boolean_with(column, 1, 0)
    }

    /// `SUM(CASE WHEN column THEN truthy ELSE falsey END)`
    pub fn sum_by_boolean_with(
        &self,
        column: impl Into<ColumnRef>,
        truthy: impl IntoNode,
        falsey: impl IntoNode,
    ) -> Node {
        let case = Node::Case(crate::ast::CaseExpr {
            branches: vec![(self.attr(column), truthy.into_node())],
            else_result: Some(Box::new(falsey.into_node())),
        });
        call("SUM", vec![case])
    }

    /// `EXTRACT(part FROM column)`
    pub fn extract(&self, part: DatePart, column: impl Into<ColumnRef>) -> Node {
        let arg = Node::binary(Operator::FROM, Node::raw(part.as_str()), self.attr(column));
        call("EXTRACT", vec![arg])
    }

    /// `EXTRACT(YEAR FROM column)`
    pub fn extract_year(&self, column: impl Into<ColumnRef>) -> Node {
        self.extract(DatePart::Year, column)
    }

    /// Wrap in `ASC`/`DESC` when `direction` starts with `asc`/`desc`;
    /// otherwise the column is returned unchanged.
    pub fn order_by(&self, column: impl Into<ColumnRef>, direction: &str) -> Node {
        let node = self.attr(column);
        match Direction::parse(direction) {
            Some(Direction::Asc) => node.asc(),
            Some(Direction::Desc) => node.desc(),
            None => node,
        }
    }

    /// `array_position(ARRAY[ids...], column)`.
    ///
    /// With `quoted`, each id renders by its literal rule (`ARRAY[1,'b']`).
    /// Without it, text ids must be integers and are emitted bare; any other
    /// text id is a [`ExprError::Validation`].
    pub fn array_position_fn<I, T>(
        &self,
        ids: I,
        column: impl Into<ColumnRef>,
        quoted: bool,
    ) -> ExprResult<Node>
    where
        I: IntoIterator<Item = T>,
        T: IntoNode,
    {
        let items = ids
            .into_iter()
            .map(|id| {
                let node = id.into_node();
                if quoted { Ok(node) } else { bare_id(node) }
            })
            .collect::<ExprResult<Vec<Node>>>()?;
        let array = self.config.unary(array::ARRAY, Operand::List(items))?;
        Ok(call("array_position", vec![array, self.attr(column)]))
    }

    /// `idx(ARRAY[ids...], column)`; `column` defaults to the primary key.
    pub fn idx_fn<I, T>(&self, ids: I, column: Option<ColumnRef>) -> ExprResult<Node>
    where
        I: IntoIterator<Item = T>,
        T: IntoNode,
    {
        let column = match column {
            Some(column) => self.attr(column),
            None => self.primary_key(),
        };
        let array = array::array(self.config, ids)?;
        Ok(call("idx", vec![array, column]))
    }
}

/// A call to a built-in function whose name is known to be valid.
fn call(name: &'static str, args: Vec<Node>) -> Node {
    Node::Function(FunctionCall {
        name: name.to_string(),
        args,
    })
}

/// An unquoted array id: integer text becomes a bare integer.
fn bare_id(node: Node) -> ExprResult<Node> {
    let text = match &node {
        Node::Literal(lit) if lit.sql_type.is_none() => match &lit.value {
            Value::Text(text) => text.clone(),
            _ => return Ok(node),
        },
        _ => return Ok(node),
    };
    match text.trim().parse::<i64>() {
        Ok(id) => Ok(Node::literal(id)),
        Err(_) => Err(ExprError::validation(format!(
            "unquoted array id '{text}' is not an integer"
        ))),
    }
}
