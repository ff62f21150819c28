//! Derive macros for pgexpr
//!
//! Provides `#[derive(Table)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod sql_ident;
mod table;

/// Derive `TableMeta` for a struct.
///
/// # Example
///
/// ```ignore
/// use pgexpr::Table;
///
/// #[derive(Table)]
/// #[table(name = "articles")]
/// struct Article {
///     #[table(id)]
///     article_id: i64,
///     title: String,
///     #[table(column = "published_on")]
///     published_at: Option<chrono::NaiveDateTime>,
/// }
/// ```
///
/// # Generated
///
/// - `impl pgexpr::TableMeta` (`table_name`, `primary_key`, `columns`)
/// - `TABLE: &'static str` - Table name
/// - `COL_*: &'static str` - Column name constants
///
/// # Attributes
///
/// - `#[table(name = "name")]` - Table name (default: the snake_case struct name,
///   pluralized: `Article` -> `articles`, `Category` -> `categories`,
///   `Address` -> `addresses`)
/// - `#[table(id)]` - Mark field as primary key (default: the `id` column)
/// - `#[table(column = "name")]` - Map field to a different column name
/// - `#[table(skip)]` - Leave the field out of `columns()`
#[proc_macro_derive(Table, attributes(table))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    table::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
