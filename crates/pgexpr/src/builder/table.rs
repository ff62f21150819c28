use crate::ast::{Identifier, Node};

/// Static table metadata for a model type.
///
/// Implemented by `#[derive(Table)]`.
pub trait TableMeta {
    /// The database table name (optionally schema-qualified).
    fn table_name() -> &'static str;

    /// The primary key column, used by cursor predicates and `idx`.
    fn primary_key() -> &'static str {
        "id"
    }

    /// Column names of this table.
    fn columns() -> &'static [&'static str];

    /// A resolver for this table.
    fn table() -> Table {
        Table::new(Self::table_name()).with_primary_key(Self::primary_key())
    }
}

/// Resolves a table name and its column references.
pub trait TableResolver {
    /// The table name.
    fn table_name(&self) -> &str;

    /// The primary key column name.
    fn primary_key(&self) -> &str {
        "id"
    }

    /// A table-qualified column reference.
    fn column(&self, name: &str) -> Identifier {
        Identifier::new(self.table_name(), name)
    }
}

impl<T: TableResolver + ?Sized> TableResolver for &T {
    fn table_name(&self) -> &str {
        (**self).table_name()
    }

    fn primary_key(&self) -> &str {
        (**self).primary_key()
    }

    fn column(&self, name: &str) -> Identifier {
        (**self).column(name)
    }
}

/// A plain table reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    primary_key: String,
}

impl Table {
    /// Create a table reference with primary key `id`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: "id".to_string(),
        }
    }

    /// Set the primary key column.
    pub fn with_primary_key(mut self, pk: impl Into<String>) -> Self {
        self.primary_key = pk.into();
        self
    }

    /// The resolver of a model type.
    pub fn of<T: TableMeta>() -> Self {
        T::table()
    }

    /// The table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column reference as a node.
    pub fn col(&self, name: &str) -> Node {
        Node::Identifier(self.column(name))
    }
}

impl TableResolver for Table {
    fn table_name(&self) -> &str {
        &self.name
    }

    fn primary_key(&self) -> &str {
        &self.primary_key
    }
}

/// A column given either by name (resolved against the bound table) or as a
/// ready-made node.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRef {
    Name(String),
    Node(Node),
}

impl ColumnRef {
    /// Normalize to a node, resolving names against `table`.
    pub fn resolve(self, table: &impl TableResolver) -> Node {
        match self {
            ColumnRef::Name(name) => Node::Identifier(table.column(&name)),
            ColumnRef::Node(node) => node,
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Name(name)
    }
}

impl From<&String> for ColumnRef {
    fn from(name: &String) -> Self {
        ColumnRef::Name(name.clone())
    }
}

impl From<Node> for ColumnRef {
    fn from(node: Node) -> Self {
        ColumnRef::Node(node)
    }
}

impl From<&Node> for ColumnRef {
    fn from(node: &Node) -> Self {
        ColumnRef::Node(node.clone())
    }
}

impl From<Identifier> for ColumnRef {
    fn from(ident: Identifier) -> Self {
        ColumnRef::Node(Node::Identifier(ident))
    }
}

/// Target of a `CROSS JOIN`.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinTarget {
    /// A table name, quoted at build time.
    Name(String),
    /// A pre-built node; only aliased relations (`TableAlias`) are accepted.
    Node(Node),
}

impl JoinTarget {
    /// Join against a resolver's table.
    pub fn table(table: &impl TableResolver) -> Self {
        JoinTarget::Name(table.table_name().to_string())
    }

    /// Join against a model's table.
    pub fn model<T: TableMeta>() -> Self {
        JoinTarget::Name(T::table_name().to_string())
    }
}

impl From<&str> for JoinTarget {
    fn from(name: &str) -> Self {
        JoinTarget::Name(name.to_string())
    }
}

impl From<String> for JoinTarget {
    fn from(name: String) -> Self {
        JoinTarget::Name(name)
    }
}

impl From<&Table> for JoinTarget {
    fn from(table: &Table) -> Self {
        JoinTarget::table(table)
    }
}

impl From<Table> for JoinTarget {
    fn from(table: Table) -> Self {
        JoinTarget::Name(table.name)
    }
}

impl From<Node> for JoinTarget {
    fn from(node: Node) -> Self {
        JoinTarget::Node(node)
    }
}
