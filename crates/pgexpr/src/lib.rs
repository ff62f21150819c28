//! # pgexpr
//!
//! Composable SQL expression trees for Postgres.
//!
//! ## Features
//!
//! - **Injection-safe by construction**: scalars enter a tree only as literals
//!   (see [`IntoNode`]); only the [`LiteralQuoter`] stringifies a value
//! - **Extensible operators**: new operator kinds are registered in a
//!   [`RendererConfig`] before rendering; the core renderer is never patched
//! - **Built-in extensions**: `ARRAY[...]` literals and JSON operators
//!   (`->`, `->>`, `#>`, `#>>`)
//! - **Semantic helpers**: date predicates, cursor pagination, boolean
//!   aggregates and custom id orderings via [`QueryBuilder`]
//! - **No execution**: output is plain SQL text with every literal inlined
//!
//! ## Example
//!
//! ```
//! use pgexpr::prelude::*;
//!
//! let qb = QueryBuilder::new(Table::new("articles"));
//! let pred = qb
//!     .is_null("published_at")
//!     .or(qb.attr("featured").eq(true));
//! assert_eq!(
//!     pred.to_sql().unwrap(),
//!     r#"("articles"."published_at" IS NULL OR "articles"."featured" = TRUE)"#
//! );
//! ```
//!
//! ## Extensions
//!
//! ```
//! use pgexpr::prelude::*;
//! use pgexpr::ext::array;
//!
//! let cfg = RendererConfig::postgres();
//! let col = Node::column("articles", "meta");
//! let node = col.json_get_by_path(&cfg, ["a", "b"]).unwrap();
//! assert_eq!(
//!     render(&node, &cfg).unwrap(),
//!     r#""articles"."meta" #> ARRAY['a','b']::text[]"#
//! );
//!
//! let ids = array::array(&cfg, [1, 5, 10]).unwrap();
//! assert_eq!(render(&ids, &cfg).unwrap(), "ARRAY[1,5,10]");
//! ```

pub mod ast;
pub mod builder;
pub mod error;
pub mod ext;
pub mod ident;
pub mod literal;
pub mod prelude;
pub mod render;

pub use ast::{CaseBuilder, CaseExpr, FunctionCall, Identifier, IntoNode, Literal, Node, Operator};
pub use builder::{
    Clock, ColumnRef, DatePart, Direction, FixedClock, Interval, JoinTarget, QueryBuilder,
    SystemClock, Table, TableMeta, TableResolver,
};
pub use error::{ExprError, ExprResult};
pub use ext::{Extension, JsonPredications};
pub use ident::{Dialect, QuotingProvider};
pub use literal::{BooleanStyle, LiteralQuoter, Value};
pub use render::{
    OperatorDef, OperatorRegistry, RenderForm, Renderer, RendererConfig, global, install_global,
    render,
};

#[cfg(feature = "derive")]
pub use pgexpr_derive::Table;
