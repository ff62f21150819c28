//! Expression AST.
//!
//! Trees are built from [`Node`] values, either directly or through the
//! predicate helpers (`col.eq(1)`, `col.between(a, b)`, `a.or(b)`, ...), and
//! rendered to SQL by [`render`](crate::render::render).
//!
//! # Example
//!
//! ```ignore
//! use pgexpr::{Node, RendererConfig, render};
//!
//! let cfg = RendererConfig::postgres();
//! let pred = Node::column("articles", "published_at")
//!     .eq(Node::null())
//!     .or(Node::column("articles", "featured").eq(true));
//! assert_eq!(
//!     render(&pred, &cfg)?,
//!     r#"("articles"."published_at" IS NULL OR "articles"."featured" = TRUE)"#,
//! );
//! ```

mod case;
mod into_node;
mod node;
mod operator;
mod predicate;

pub use case::CaseBuilder;
pub use into_node::IntoNode;
pub use node::{CaseExpr, FunctionCall, Identifier, Literal, Node};
pub(crate) use node::validate_sql_type;
pub use operator::{CoreBinary, CoreUnary, Operator, Precedence};

#[cfg(test)]
mod tests;
