//! The quoting boundary.
//!
//! Every API position that accepts "a node or a value" takes `impl IntoNode`.
//! Nodes pass through untouched; scalars become [`Literal`] nodes and are
//! therefore always quoted at render time, never interpolated.

use super::node::{Identifier, Literal, Node};
use crate::literal::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

/// Convert an input into a [`Node`].
pub trait IntoNode {
    fn into_node(self) -> Node;
}

impl IntoNode for Node {
    fn into_node(self) -> Node {
        self
    }
}

impl IntoNode for &Node {
    fn into_node(self) -> Node {
        self.clone()
    }
}

impl IntoNode for Identifier {
    fn into_node(self) -> Node {
        Node::Identifier(self)
    }
}

impl IntoNode for Literal {
    fn into_node(self) -> Node {
        Node::Literal(self)
    }
}

impl IntoNode for Value {
    fn into_node(self) -> Node {
        Node::Literal(Literal::new(self))
    }
}

impl<T: IntoNode> IntoNode for Option<T> {
    fn into_node(self) -> Node {
        match self {
            Some(v) => v.into_node(),
            None => Node::null(),
        }
    }
}

macro_rules! impl_into_node_via_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoNode for $t {
                fn into_node(self) -> Node {
                    Node::Literal(Literal::new(Value::from(self)))
                }
            }
        )*
    };
}

impl_into_node_via_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    &str,
    String,
    &String,
    NaiveDate,
    NaiveDateTime,
    DateTime<Utc>,
    serde_json::Value,
    Uuid,
);

#[cfg(feature = "rust_decimal")]
impl_into_node_via_value!(rust_decimal::Decimal);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_become_literals_not_identifiers() {
        assert_eq!("foo".into_node(), Node::literal("foo"));
        assert!(matches!(String::from("id").into_node(), Node::Literal(_)));
    }

    #[test]
    fn nodes_pass_through() {
        let col = Node::column("articles", "id");
        assert_eq!(col.clone().into_node(), col);
        assert_eq!((&col).into_node(), col);
    }

    #[test]
    fn none_becomes_null() {
        assert_eq!(None::<i32>.into_node(), Node::null());
        assert_eq!(Some(3i32).into_node(), Node::literal(3));
    }
}
