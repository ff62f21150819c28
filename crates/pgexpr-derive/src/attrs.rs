//! Attribute parsing for the Table derive macro.
//!
//! Handles struct-level and field-level `#[table(...)]` attributes.

use crate::sql_ident::{parse_sql_ident, parse_table_name};
use syn::{DeriveInput, LitStr, Result};

/// Struct-level options.
#[derive(Default)]
pub(crate) struct TableAttr {
    pub name: Option<String>,
}

/// Field-level options.
#[derive(Default)]
pub(crate) struct FieldAttr {
    pub is_id: bool,
    pub skip: bool,
    pub column: Option<String>,
}

pub(crate) fn parse_table_attr(input: &DeriveInput) -> Result<TableAttr> {
    let mut out = TableAttr::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("table") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                out.name = Some(parse_table_name(&lit)?);
                Ok(())
            } else {
                Err(meta.error("unknown table attribute; expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(out)
}

pub(crate) fn parse_field_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut out = FieldAttr::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("table") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("id") {
                out.is_id = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                out.skip = true;
                Ok(())
            } else if meta.path.is_ident("column") {
                let lit: LitStr = meta.value()?.parse()?;
                out.column = Some(parse_sql_ident(&lit, "column")?);
                Ok(())
            } else {
                Err(meta.error("unknown field attribute; expected `id`, `skip` or `column = \"...\"`"))
            }
        })?;
    }
    if out.is_id && out.skip {
        return Err(syn::Error::new_spanned(
            field,
            "primary key field cannot be skipped",
        ));
    }
    Ok(out)
}
