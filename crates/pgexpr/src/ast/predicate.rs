//! Predicate and ordering helpers on [`Node`].
//!
//! Every right-hand side goes through [`IntoNode`], so raw values end up as
//! literals.

use super::into_node::IntoNode;
use super::node::Node;
use super::operator::Operator;

impl Node {
    /// `self = other` (`IS NULL` when `other` is `NULL`)
    pub fn eq(self, other: impl IntoNode) -> Node {
        Node::binary(Operator::EQ, self, other.into_node())
    }

    /// `self != other` (`IS NOT NULL` when `other` is `NULL`)
    pub fn not_eq(self, other: impl IntoNode) -> Node {
        Node::binary(Operator::NOT_EQ, self, other.into_node())
    }

    /// `self < other`
    pub fn lt(self, other: impl IntoNode) -> Node {
        Node::binary(Operator::LT, self, other.into_node())
    }

    /// `self <= other`
    pub fn lteq(self, other: impl IntoNode) -> Node {
        Node::binary(Operator::LT_EQ, self, other.into_node())
    }

    /// `self > other`
    pub fn gt(self, other: impl IntoNode) -> Node {
        Node::binary(Operator::GT, self, other.into_node())
    }

    /// `self >= other`
    pub fn gteq(self, other: impl IntoNode) -> Node {
        Node::binary(Operator::GT_EQ, self, other.into_node())
    }

    /// `self LIKE pattern`
    pub fn like(self, pattern: impl IntoNode) -> Node {
        Node::binary(Operator::LIKE, self, pattern.into_node())
    }

    /// `self ILIKE pattern`
    pub fn ilike(self, pattern: impl IntoNode) -> Node {
        Node::binary(Operator::ILIKE, self, pattern.into_node())
    }

    /// `self BETWEEN low AND high`
    pub fn between(self, low: impl IntoNode, high: impl IntoNode) -> Node {
        Node::binary(
            Operator::BETWEEN,
            self,
            Node::binary(Operator::AND, low.into_node(), high.into_node()),
        )
    }

    /// `self IN (v1, v2, ...)`; an empty list is always false (`1=0`).
    pub fn in_list<I, T>(self, values: I) -> Node
    where
        I: IntoIterator<Item = T>,
        T: IntoNode,
    {
        let items: Vec<Node> = values.into_iter().map(IntoNode::into_node).collect();
        if items.is_empty() {
            return Node::raw("1=0");
        }
        Node::binary(Operator::IN, self, Node::grouping(Node::list(items)))
    }

    /// `self NOT IN (v1, v2, ...)`; an empty list is always true (`1=1`).
    pub fn not_in_list<I, T>(self, values: I) -> Node
    where
        I: IntoIterator<Item = T>,
        T: IntoNode,
    {
        let items: Vec<Node> = values.into_iter().map(IntoNode::into_node).collect();
        if items.is_empty() {
            return Node::raw("1=1");
        }
        Node::binary(Operator::NOT_IN, self, Node::grouping(Node::list(items)))
    }

    /// `self AND other`
    pub fn and(self, other: impl IntoNode) -> Node {
        Node::binary(Operator::AND, self, other.into_node())
    }

    /// `(self OR other)`
    ///
    /// The disjunction is always grouped so it composes safely under `AND`.
    pub fn or(self, other: impl IntoNode) -> Node {
        Node::grouping(Node::binary(Operator::OR, self, other.into_node()))
    }

    /// `NOT (self)`
    pub fn not(self) -> Node {
        Node::unary(Operator::NOT, self)
    }

    /// `self AS other`
    pub fn as_(self, other: impl IntoNode) -> Node {
        Node::binary(Operator::AS, self, other.into_node())
    }

    /// `self - other`
    pub fn minus(self, other: impl IntoNode) -> Node {
        Node::binary(Operator::MINUS, self, other.into_node())
    }

    /// `self + other`
    pub fn plus(self, other: impl IntoNode) -> Node {
        Node::binary(Operator::PLUS, self, other.into_node())
    }

    /// `self ASC`
    pub fn asc(self) -> Node {
        Node::unary(Operator::ASC, self)
    }

    /// `self DESC`
    pub fn desc(self) -> Node {
        Node::unary(Operator::DESC, self)
    }

    /// `(self)`
    pub fn grouped(self) -> Node {
        Node::grouping(self)
    }
}
