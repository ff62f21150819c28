//! Convenient imports for typical `pgexpr` usage.
//!
//! ```ignore
//! use pgexpr::prelude::*;
//! ```

pub use crate::{
    ColumnRef, ExprError, ExprResult, IntoNode, JsonPredications, Node, QueryBuilder,
    RendererConfig, Table, TableMeta, TableResolver, Value, nodes, render,
};

pub use crate::{Clock, FixedClock};
