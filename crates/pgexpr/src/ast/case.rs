use super::into_node::IntoNode;
use super::node::{CaseExpr, Node};
use crate::error::ExprResult;

/// Fluent builder for `CASE` expressions.
///
/// ```ignore
/// let node = CaseBuilder::new()
///     .when(col, 1)
///     .otherwise(0)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaseBuilder {
    branches: Vec<(Node, Node)>,
    else_result: Option<Node>,
}

impl CaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `WHEN condition THEN result` branch.
    pub fn when(mut self, condition: impl IntoNode, result: impl IntoNode) -> Self {
        self.branches
            .push((condition.into_node(), result.into_node()));
        self
    }

    /// Set the `ELSE` result.
    pub fn otherwise(mut self, result: impl IntoNode) -> Self {
        self.else_result = Some(result.into_node());
        self
    }

    /// Validate and build the `Case` node.
    pub fn build(self) -> ExprResult<Node> {
        Ok(Node::Case(CaseExpr::new(self.branches, self.else_result)?))
    }
}
