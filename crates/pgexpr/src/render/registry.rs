use super::Renderer;
use crate::ast::{CoreBinary, CoreUnary, Node, Operator};
use crate::error::{ExprError, ExprResult};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The operands handed to a custom render function.
#[derive(Debug, Clone, Copy)]
pub enum Operands<'a> {
    Unary(&'a Node),
    Binary(&'a Node, &'a Node),
}

/// A render function for operator forms that do not fit infix/prefix/postfix.
pub type CustomRender =
    Arc<dyn Fn(&mut Renderer<'_>, Operands<'_>) -> ExprResult<()> + Send + Sync>;

/// A raw operand before an operator's coercion turns it into a sub-node.
///
/// Scalars have already crossed the [`IntoNode`](crate::ast::IntoNode) boundary
/// and are `Literal` nodes; coercion only reshapes them.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Node(Node),
    List(Vec<Node>),
}

impl Operand {
    /// The node used when no coercion is registered: lists become `List` nodes.
    pub fn into_node(self) -> Node {
        match self {
            Operand::Node(node) => node,
            Operand::List(items) => Node::List(items),
        }
    }

    /// The operand as a sequence of nodes (a single node is a one-element sequence).
    pub fn into_items(self) -> Vec<Node> {
        match self {
            Operand::List(items) => items,
            Operand::Node(mut node) => {
                if let Node::List(items) = &mut node {
                    return std::mem::take(items);
                }
                vec![node]
            }
        }
    }
}

impl From<Node> for Operand {
    fn from(node: Node) -> Self {
        Operand::Node(node)
    }
}

impl From<Vec<Node>> for Operand {
    fn from(items: Vec<Node>) -> Self {
        Operand::List(items)
    }
}

/// Transforms a raw operand into the sub-node stored in the tree.
pub type Coercion = Arc<dyn Fn(Operand) -> ExprResult<Node> + Send + Sync>;

/// How a registered operator is printed.
#[derive(Clone)]
pub enum RenderForm {
    /// `left SYMBOL right`
    Infix(Cow<'static, str>),
    /// `SYMBOL operand`, symbol written verbatim (include any trailing space).
    Prefix(Cow<'static, str>),
    /// `operand SYMBOL`, symbol written verbatim (include any leading space).
    Postfix(Cow<'static, str>),
    /// Anything else.
    Custom(CustomRender),
}

impl RenderForm {
    pub fn infix(symbol: impl Into<Cow<'static, str>>) -> Self {
        RenderForm::Infix(symbol.into())
    }

    pub fn prefix(symbol: impl Into<Cow<'static, str>>) -> Self {
        RenderForm::Prefix(symbol.into())
    }

    pub fn postfix(symbol: impl Into<Cow<'static, str>>) -> Self {
        RenderForm::Postfix(symbol.into())
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut Renderer<'_>, Operands<'_>) -> ExprResult<()> + Send + Sync + 'static,
    {
        RenderForm::Custom(Arc::new(f))
    }
}

impl fmt::Debug for RenderForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderForm::Infix(s) => f.debug_tuple("Infix").field(s).finish(),
            RenderForm::Prefix(s) => f.debug_tuple("Prefix").field(s).finish(),
            RenderForm::Postfix(s) => f.debug_tuple("Postfix").field(s).finish(),
            RenderForm::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Operator registration record: render form plus optional operand coercions.
///
/// For unary operators the left coercion applies to the single operand.
#[derive(Clone)]
pub struct OperatorDef {
    pub form: RenderForm,
    pub left: Option<Coercion>,
    pub right: Option<Coercion>,
}

impl OperatorDef {
    pub fn new(form: RenderForm) -> Self {
        Self {
            form,
            left: None,
            right: None,
        }
    }

    /// Shorthand for an infix operator without coercions.
    pub fn infix(symbol: impl Into<Cow<'static, str>>) -> Self {
        Self::new(RenderForm::infix(symbol))
    }

    pub fn with_left_coercion<F>(mut self, f: F) -> Self
    where
        F: Fn(Operand) -> ExprResult<Node> + Send + Sync + 'static,
    {
        self.left = Some(Arc::new(f));
        self
    }

    pub fn with_right_coercion<F>(mut self, f: F) -> Self
    where
        F: Fn(Operand) -> ExprResult<Node> + Send + Sync + 'static,
    {
        self.right = Some(Arc::new(f));
        self
    }

    fn coerce(coercion: Option<&Coercion>, operand: Operand) -> ExprResult<Node> {
        match coercion {
            Some(f) => f(operand),
            None => Ok(operand.into_node()),
        }
    }
}

impl fmt::Debug for OperatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDef")
            .field("form", &self.form)
            .field("left_coercion", &self.left.is_some())
            .field("right_coercion", &self.right.is_some())
            .finish()
    }
}

/// Registry of extension operator kinds.
///
/// Core kinds are rendered by the renderer itself and cannot be registered here.
#[derive(Debug, Clone, Default)]
pub struct OperatorRegistry {
    ops: HashMap<String, OperatorDef>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) an extension operator kind.
    ///
    /// Re-registering a kind replaces the previous definition. Core operator
    /// names are rejected.
    pub fn register(&mut self, kind: impl Into<String>, def: OperatorDef) -> ExprResult<()> {
        let kind = kind.into();
        if kind.trim().is_empty() {
            return Err(ExprError::config("operator kind cannot be empty"));
        }
        if CoreBinary::from_kind(&kind).is_some() || CoreUnary::from_kind(&kind).is_some() {
            return Err(ExprError::config(format!(
                "'{kind}' is a core operator and cannot be registered"
            )));
        }
        self.insert(kind, def);
        Ok(())
    }

    /// Insert without the core-name check; used for built-in extensions.
    pub(crate) fn insert(&mut self, kind: String, def: OperatorDef) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "pgexpr.registry",
            kind = %kind,
            form = ?def.form,
            overwrite = self.ops.contains_key(&kind),
            "operator registered"
        );
        self.ops.insert(kind, def);
    }

    /// Look up a registered operator.
    pub fn get(&self, kind: &str) -> Option<&OperatorDef> {
        self.ops.get(kind)
    }

    /// Whether a kind is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.ops.contains_key(kind)
    }

    /// Registered kind names, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.ops.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Build a binary node, applying the operator's registered coercions.
    ///
    /// Core kinds are built without coercion; unknown kinds fail with
    /// [`ExprError::UnknownOperator`].
    pub fn binary(
        &self,
        kind: impl Into<Operator>,
        left: impl Into<Operand>,
        right: impl Into<Operand>,
    ) -> ExprResult<Node> {
        let op = kind.into();
        let (left, right) = if op.is_core_binary() {
            (left.into().into_node(), right.into().into_node())
        } else {
            let def = self
                .get(op.as_str())
                .ok_or_else(|| ExprError::unknown_operator(op.as_str()))?;
            (
                OperatorDef::coerce(def.left.as_ref(), left.into())?,
                OperatorDef::coerce(def.right.as_ref(), right.into())?,
            )
        };
        Ok(Node::binary(op, left, right))
    }

    /// Build a unary node, applying the operator's registered operand coercion.
    pub fn unary(&self, kind: impl Into<Operator>, operand: impl Into<Operand>) -> ExprResult<Node> {
        let op = kind.into();
        let operand = if op.is_core_unary() {
            operand.into().into_node()
        } else {
            let def = self
                .get(op.as_str())
                .ok_or_else(|| ExprError::unknown_operator(op.as_str()))?;
            OperatorDef::coerce(def.left.as_ref(), operand.into())?
        };
        Ok(Node::unary(op, operand))
    }
}
