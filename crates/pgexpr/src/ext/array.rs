//! Postgres array literals.
//!
//! - [`TEXT_ARRAY`]: `ARRAY['a','b',2,"t"."c"]::text[]`
//! - [`ARRAY`]: `ARRAY[1,5,10]` (no cast suffix; used by `array_position`/`idx`)
//!
//! Each element is rendered by its own rule, so quoted strings, bare numbers
//! and column references can be mixed in one array.

use crate::ast::{IntoNode, Node};
use crate::error::{ExprError, ExprResult};
use crate::render::{Operand, Operands, OperatorDef, OperatorRegistry, RenderForm, Renderer, RendererConfig};

/// Operator kind of the `ARRAY[...]::text[]` node.
pub const TEXT_ARRAY: &str = "text_array";
/// Operator kind of the `ARRAY[...]` node.
pub const ARRAY: &str = "array";

pub(crate) fn install(registry: &mut OperatorRegistry) {
    registry.insert(
        TEXT_ARRAY.to_string(),
        OperatorDef::new(RenderForm::custom(|r, ops| {
            render_array(r, ops, "]::text[]")
        }))
        .with_left_coercion(flatten),
    );
    registry.insert(
        ARRAY.to_string(),
        OperatorDef::new(RenderForm::custom(|r, ops| render_array(r, ops, "]")))
            .with_left_coercion(flatten),
    );
}

fn render_array(r: &mut Renderer<'_>, operands: Operands<'_>, close: &str) -> ExprResult<()> {
    let Operands::Unary(operand) = operands else {
        return Err(ExprError::malformed(
            "array literal takes a single operand",
        ));
    };
    r.write("ARRAY[");
    match operand {
        Node::List(items) => r.render_list(items, ",")?,
        other => r.render_node(other)?,
    }
    r.write(close);
    Ok(())
}

/// Flatten nested lists into one element list.
fn flatten(operand: Operand) -> ExprResult<Node> {
    fn push_flat(out: &mut Vec<Node>, mut node: Node) {
        if let Node::List(items) = &mut node {
            std::mem::take(items).into_iter().for_each(|n| push_flat(out, n));
        } else {
            out.push(node);
        }
    }
    let mut out = Vec::new();
    for node in operand.into_items() {
        push_flat(&mut out, node);
    }
    Ok(Node::List(out))
}

/// Build `ARRAY[v1,v2,...]::text[]`.
pub fn text_array<I, T>(config: &RendererConfig, values: I) -> ExprResult<Node>
where
    I: IntoIterator<Item = T>,
    T: IntoNode,
{
    let items: Vec<Node> = values.into_iter().map(IntoNode::into_node).collect();
    config.unary(TEXT_ARRAY, Operand::List(items))
}

/// Build `ARRAY[v1,v2,...]`.
pub fn array<I, T>(config: &RendererConfig, values: I) -> ExprResult<Node>
where
    I: IntoIterator<Item = T>,
    T: IntoNode,
{
    let items: Vec<Node> = values.into_iter().map(IntoNode::into_node).collect();
    config.unary(ARRAY, Operand::List(items))
}
