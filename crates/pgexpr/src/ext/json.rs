//! JSON operators.
//!
//! | kind  | SQL                                   |
//! |-------|---------------------------------------|
//! | `->`  | `"t"."c" -> 'key'`                    |
//! | `->>` | `"t"."c" ->> 'key'`                   |
//! | `#>`  | `"t"."c" #> ARRAY['a','b']::text[]`   |
//! | `#>>` | `"t"."c" #>> ARRAY['a','b']::text[]`  |
//!
//! The path variants coerce their right-hand side into a text array node.

use super::array::{self, TEXT_ARRAY};
use crate::ast::{IntoNode, Node};
use crate::error::ExprResult;
use crate::render::{Operand, OperatorDef, OperatorRegistry, RendererConfig};

pub const GET: &str = "->";
pub const GET_AS_TEXT: &str = "->>";
pub const GET_BY_PATH: &str = "#>";
pub const GET_BY_PATH_AS_TEXT: &str = "#>>";

pub(crate) fn install(registry: &mut OperatorRegistry) {
    array::install(registry);

    registry.insert(GET.to_string(), OperatorDef::infix(GET));
    registry.insert(GET_AS_TEXT.to_string(), OperatorDef::infix(GET_AS_TEXT));
    registry.insert(
        GET_BY_PATH.to_string(),
        OperatorDef::infix(GET_BY_PATH).with_right_coercion(path_to_text_array),
    );
    registry.insert(
        GET_BY_PATH_AS_TEXT.to_string(),
        OperatorDef::infix(GET_BY_PATH_AS_TEXT).with_right_coercion(path_to_text_array),
    );
}

fn path_to_text_array(path: Operand) -> ExprResult<Node> {
    Ok(Node::unary(TEXT_ARRAY, Node::List(path.into_items())))
}

/// JSON accessors on any node.
pub trait JsonPredications: Sized {
    /// `self -> key`
    fn json_get(self, config: &RendererConfig, key: impl IntoNode) -> ExprResult<Node>;

    /// `self ->> key`
    fn json_get_as_text(self, config: &RendererConfig, key: impl IntoNode) -> ExprResult<Node>;

    /// `self #> ARRAY[path...]::text[]`
    fn json_get_by_path<I, T>(self, config: &RendererConfig, path: I) -> ExprResult<Node>
    where
        I: IntoIterator<Item = T>,
        T: IntoNode;

    /// `self #>> ARRAY[path...]::text[]`
    fn json_get_by_path_as_text<I, T>(self, config: &RendererConfig, path: I) -> ExprResult<Node>
    where
        I: IntoIterator<Item = T>,
        T: IntoNode;
}

impl JsonPredications for Node {
    fn json_get(self, config: &RendererConfig, key: impl IntoNode) -> ExprResult<Node> {
        config.binary(GET, self, key.into_node())
    }

    fn json_get_as_text(self, config: &RendererConfig, key: impl IntoNode) -> ExprResult<Node> {
        config.binary(GET_AS_TEXT, self, key.into_node())
    }

    fn json_get_by_path<I, T>(self, config: &RendererConfig, path: I) -> ExprResult<Node>
    where
        I: IntoIterator<Item = T>,
        T: IntoNode,
    {
        let path: Vec<Node> = path.into_iter().map(IntoNode::into_node).collect();
        config.binary(GET_BY_PATH, self, Operand::List(path))
    }

    fn json_get_by_path_as_text<I, T>(self, config: &RendererConfig, path: I) -> ExprResult<Node>
    where
        I: IntoIterator<Item = T>,
        T: IntoNode,
    {
        let path: Vec<Node> = path.into_iter().map(IntoNode::into_node).collect();
        config.binary(GET_BY_PATH_AS_TEXT, self, Operand::List(path))
    }
}
