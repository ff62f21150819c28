//! SQL text rendering.
//!
//! The [`Renderer`] walks a [`Node`] tree and writes SQL into a buffer. Core
//! node and operator kinds have built-in rules; `Binary`/`Unary` nodes with any
//! other operator kind are rendered through the [`OperatorRegistry`] of the
//! [`RendererConfig`]. An unregistered kind fails the whole render with
//! [`ExprError::UnknownOperator`]; no partial SQL is returned.
//!
//! Output contains no placeholders: every literal is inlined through the
//! configured [`LiteralQuoter`](crate::literal::LiteralQuoter).
//!
//! A nested `Binary` operand is parenthesized when it binds more loosely than
//! its parent (see [`Precedence`]). `AND`/`OR` chains are flattened without
//! recursion, so a tree folded from thousands of conjuncts renders on any
//! stack.

mod config;
mod registry;

pub use config::{RendererConfig, RendererConfigBuilder, global, install_global};
pub use registry::{
    Coercion, CustomRender, Operand, Operands, OperatorDef, OperatorRegistry, RenderForm,
};

use crate::ast::{
    CaseExpr, CoreBinary, CoreUnary, FunctionCall, Identifier, Node, Operator, Precedence,
    validate_sql_type,
};
use crate::error::{ExprError, ExprResult};
use crate::ident::QuotingProvider;
use crate::literal::Value;

/// Render a node tree to SQL text with the given configuration.
pub fn render(node: &Node, config: &RendererConfig) -> ExprResult<String> {
    let mut renderer = Renderer::new(config);
    match renderer.render_node(node) {
        Ok(()) => Ok(renderer.into_sql()),
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "pgexpr.render",
                root = node.kind_name(),
                error = %e,
                "render failed"
            );
            Err(e)
        }
    }
}

impl Node {
    /// Render with the process-wide configuration (see [`global`]).
    pub fn to_sql(&self) -> ExprResult<String> {
        render(self, global())
    }
}

/// Rendering context: a configuration plus the output buffer.
///
/// Custom operator render functions receive a `&mut Renderer` and use
/// [`write`](Renderer::write) and [`render_node`](Renderer::render_node).
pub struct Renderer<'c> {
    config: &'c RendererConfig,
    out: String,
}

impl<'c> Renderer<'c> {
    pub fn new(config: &'c RendererConfig) -> Self {
        Self {
            config,
            out: String::with_capacity(64),
        }
    }

    /// The configuration this renderer uses.
    pub fn config(&self) -> &'c RendererConfig {
        self.config
    }

    /// Consume the renderer and return the SQL written so far.
    pub fn into_sql(self) -> String {
        self.out
    }

    /// Append raw SQL text.
    pub fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Append a quoted literal.
    pub fn write_value(&mut self, value: &Value) -> ExprResult<()> {
        self.config.quoter().write_quoted(&mut self.out, value)
    }

    /// Render `node` into the buffer.
    pub fn render_node(&mut self, node: &Node) -> ExprResult<()> {
        match node {
            Node::Identifier(ident) => self.render_identifier(ident),
            Node::Literal(lit) => {
                self.write_value(&lit.value)?;
                if let Some(sql_type) = &lit.sql_type {
                    validate_sql_type(sql_type)?;
                    self.write("::");
                    self.write(sql_type.trim());
                }
                Ok(())
            }
            Node::Binary { op, left, right } => self.render_binary(op, left, right),
            Node::Unary { op, operand } => self.render_unary(op, operand),
            Node::Function(call) => self.render_function(call),
            Node::Case(case) => self.render_case(case),
            Node::Grouping(inner) => {
                self.write("(");
                self.render_node(inner)?;
                self.write(")");
                Ok(())
            }
            Node::List(items) => self.render_list(items, ", "),
            Node::TableAlias { relation, alias } => {
                self.render_node(relation)?;
                self.write(" ");
                let quoted = self.config.dialect().quote_identifier(alias)?;
                self.write(&quoted);
                Ok(())
            }
            Node::Raw(sql) => {
                self.write(sql);
                Ok(())
            }
        }
    }

    /// Render each node, separated by `sep`.
    pub fn render_list(&mut self, items: &[Node], sep: &str) -> ExprResult<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(sep);
            }
            self.render_node(item)?;
        }
        Ok(())
    }

    fn render_identifier(&mut self, ident: &Identifier) -> ExprResult<()> {
        let dialect = self.config.dialect();
        if let Some(table) = &ident.table {
            let table = dialect.quote_table_name(table)?;
            self.write(&table);
            self.write(".");
        }
        let column = dialect.quote_identifier(&ident.column)?;
        self.write(&column);
        Ok(())
    }

    fn render_binary(&mut self, op: &Operator, left: &Node, right: &Node) -> ExprResult<()> {
        if let Some(core) = CoreBinary::from_kind(op.as_str()) {
            let prec = core.precedence();
            let null_right = matches!(right, Node::Literal(lit) if lit.is_null());
            match core {
                CoreBinary::Eq if null_right => {
                    self.render_operand(left, prec, Some(core), false)?;
                    self.write(" IS NULL");
                }
                CoreBinary::NotEq if null_right => {
                    self.render_operand(left, prec, Some(core), false)?;
                    self.write(" IS NOT NULL");
                }
                CoreBinary::And | CoreBinary::Or => self.render_chain(core, left, right)?,
                CoreBinary::Between => {
                    self.render_operand(left, prec, Some(core), false)?;
                    self.write(" BETWEEN ");
                    match right {
                        Node::Binary { op, left: low, right: high } if op == &Operator::AND => {
                            self.render_operand(low, prec, Some(core), false)?;
                            self.write(" AND ");
                            self.render_operand(high, prec, Some(core), true)?;
                        }
                        other => self.render_operand(other, prec, Some(core), true)?,
                    }
                }
                _ => {
                    self.render_operand(left, prec, Some(core), false)?;
                    self.write(" ");
                    self.write(core.symbol());
                    self.write(" ");
                    self.render_operand(right, prec, Some(core), true)?;
                }
            }
            return Ok(());
        }

        let config = self.config;
        let def = config
            .operators()
            .get(op.as_str())
            .ok_or_else(|| ExprError::unknown_operator(op.as_str()))?;
        match &def.form {
            RenderForm::Infix(symbol) => {
                self.render_operand(left, Precedence::Other, None, false)?;
                self.write(" ");
                self.write(symbol);
                self.write(" ");
                self.render_operand(right, Precedence::Other, None, true)
            }
            RenderForm::Custom(f) => f(self, Operands::Binary(left, right)),
            RenderForm::Prefix(_) | RenderForm::Postfix(_) => Err(ExprError::malformed(format!(
                "operator '{op}' is unary and cannot render a Binary node"
            ))),
        }
    }

    /// Render `a AND b AND c ...` from any nesting of the same connective.
    ///
    /// Operands are visited with an explicit stack; only a change of operator
    /// recurses. Under `OR`, a grouped `OR` operand is merged into the chain.
    fn render_chain(&mut self, core: CoreBinary, left: &Node, right: &Node) -> ExprResult<()> {
        let prec = core.precedence();
        let mut pending = vec![right, left];
        let mut first = true;
        while let Some(node) = pending.pop() {
            let node: &Node = match node {
                Node::Grouping(inner) if core == CoreBinary::Or && is_core(inner, core) => &**inner,
                other => other,
            };
            if let Node::Binary { op, left, right } = node {
                if CoreBinary::from_kind(op.as_str()) == Some(core) {
                    pending.push(right);
                    pending.push(left);
                    continue;
                }
            }
            if !first {
                self.write(" ");
                self.write(core.symbol());
                self.write(" ");
            }
            self.render_operand(node, prec, Some(core), !first)?;
            first = false;
        }
        Ok(())
    }

    /// Render an operand of a binary operator, adding parentheses when the
    /// operand would otherwise bind to its neighbours differently.
    fn render_operand(
        &mut self,
        node: &Node,
        parent: Precedence,
        parent_op: Option<CoreBinary>,
        right_side: bool,
    ) -> ExprResult<()> {
        let wrap = match binding(node) {
            None => false,
            Some((prec, op)) if prec == parent => {
                let merges = op == parent_op && op.is_some_and(CoreBinary::is_associative);
                !parent.is_chainable() || (right_side && !merges)
            }
            Some((prec, _)) => prec < parent,
        };
        if wrap {
            self.write("(");
            self.render_node(node)?;
            self.write(")");
            Ok(())
        } else {
            self.render_node(node)
        }
    }

    fn render_unary(&mut self, op: &Operator, operand: &Node) -> ExprResult<()> {
        if let Some(core) = CoreUnary::from_kind(op.as_str()) {
            match core {
                CoreUnary::Not => {
                    self.write("NOT (");
                    self.render_node(operand)?;
                    self.write(")");
                }
                CoreUnary::Asc => {
                    self.render_node(operand)?;
                    self.write(" ASC");
                }
                CoreUnary::Desc => {
                    self.render_node(operand)?;
                    self.write(" DESC");
                }
                CoreUnary::Interval => {
                    self.write("INTERVAL ");
                    self.render_node(operand)?;
                }
                CoreUnary::CrossJoin => {
                    self.write("CROSS JOIN ");
                    self.render_node(operand)?;
                }
            }
            return Ok(());
        }

        let config = self.config;
        let def = config
            .operators()
            .get(op.as_str())
            .ok_or_else(|| ExprError::unknown_operator(op.as_str()))?;
        match &def.form {
            RenderForm::Prefix(symbol) => {
                self.write(symbol);
                self.render_node(operand)
            }
            RenderForm::Postfix(symbol) => {
                self.render_node(operand)?;
                self.write(symbol);
                Ok(())
            }
            RenderForm::Custom(f) => f(self, Operands::Unary(operand)),
            RenderForm::Infix(_) => Err(ExprError::malformed(format!(
                "operator '{op}' is infix and cannot render a Unary node"
            ))),
        }
    }

    fn render_function(&mut self, call: &FunctionCall) -> ExprResult<()> {
        call.validate()?;
        self.write(&call.name);
        self.write("(");
        self.render_list(&call.args, ", ")?;
        self.write(")");
        Ok(())
    }

    fn render_case(&mut self, case: &CaseExpr) -> ExprResult<()> {
        case.validate()?;
        self.write("CASE");
        for (condition, result) in &case.branches {
            self.write(" WHEN ");
            self.render_node(condition)?;
            self.write(" THEN ");
            self.render_node(result)?;
        }
        if let Some(else_result) = &case.else_result {
            self.write(" ELSE ");
            self.render_node(else_result)?;
        }
        self.write(" END");
        Ok(())
    }
}

/// The precedence `node` renders at, or `None` when it is self-delimiting.
fn binding(node: &Node) -> Option<(Precedence, Option<CoreBinary>)> {
    match node {
        Node::Binary { op, .. } => match CoreBinary::from_kind(op.as_str()) {
            Some(core) => Some((core.precedence(), Some(core))),
            None => Some((Precedence::Other, None)),
        },
        Node::Unary { op, .. } if op == &Operator::NOT => Some((Precedence::Not, None)),
        _ => None,
    }
}

fn is_core(node: &Node, core: CoreBinary) -> bool {
    matches!(node, Node::Binary { op, .. } if CoreBinary::from_kind(op.as_str()) == Some(core))
}
