//! Table derive macro implementation

use crate::attrs::{parse_field_attr, parse_table_attr};
use crate::sql_ident::parse_sql_ident_with_span;
use heck::{ToShoutySnakeCase, ToSnakeCase};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let table_attr = parse_table_attr(&input)?;
    let table_name = match table_attr.name {
        Some(table) => table,
        None => default_table_name(&name.unraw().to_string()),
    };

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Table can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Table can only be derived for structs",
            ));
        }
    };

    let mut columns = Vec::with_capacity(fields.len());
    let mut col_consts = Vec::with_capacity(fields.len());
    let mut id_column: Option<String> = None;

    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let attr = parse_field_attr(field)?;
        if attr.skip {
            continue;
        }
        let field_name = field_ident.unraw().to_string();
        let column = match attr.column {
            Some(column) => column,
            None => parse_sql_ident_with_span(&field_name, field_ident.span(), "column")?,
        };

        if attr.is_id {
            if id_column.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one field can be marked #[table(id)]",
                ));
            }
            id_column = Some(column.clone());
        }

        let const_ident = format_ident!("COL_{}", field_name.to_shouty_snake_case());
        col_consts.push(quote! {
            pub const #const_ident: &'static str = #column;
        });
        columns.push(column);
    }

    let primary_key = id_column.unwrap_or_else(|| "id".to_string());

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Table name
            pub const TABLE: &'static str = #table_name;

            #(#col_consts)*
        }

        impl #impl_generics ::pgexpr::TableMeta for #name #ty_generics #where_clause {
            fn table_name() -> &'static str {
                #table_name
            }

            fn primary_key() -> &'static str {
                #primary_key
            }

            fn columns() -> &'static [&'static str] {
                &[#(#columns),*]
            }
        }
    })
}

/// `Article` -> `articles`, `BlogPost` -> `blog_posts`.
fn default_table_name(struct_name: &str) -> String {
    let snake = struct_name.to_snake_case();
    if snake.ends_with('s') {
        format!("{snake}es")
    } else if let Some(stem) = snake.strip_suffix('y') {
        if stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            format!("{snake}s")
        } else {
            format!("{stem}ies")
        }
    } else {
        format!("{snake}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_names() {
        assert_eq!(default_table_name("Article"), "articles");
        assert_eq!(default_table_name("BlogPost"), "blog_posts");
        assert_eq!(default_table_name("Category"), "categories");
        assert_eq!(default_table_name("Day"), "days");
        assert_eq!(default_table_name("Address"), "addresses");
    }

    #[test]
    fn expand_uses_attributes() {
        let input: DeriveInput = syn::parse_quote! {
            #[table(name = "articles")]
            struct Article {
                #[table(id)]
                article_id: i64,
                #[table(column = "headline")]
                title: String,
                #[table(skip)]
                cached: u8,
            }
        };
        let out = expand(input).unwrap().to_string();
        assert!(out.contains("\"articles\""));
        assert!(out.contains("\"article_id\""));
        assert!(out.contains("\"headline\""));
        assert!(out.contains("COL_TITLE"));
        assert!(!out.contains("\"cached\""));
    }

    #[test]
    fn expand_rejects_two_ids() {
        let input: DeriveInput = syn::parse_quote! {
            struct Article {
                #[table(id)]
                a: i64,
                #[table(id)]
                b: i64,
            }
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn expand_rejects_enums() {
        let input: DeriveInput = syn::parse_quote! {
            enum Article { A }
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn expand_rejects_bad_table_name() {
        let input: DeriveInput = syn::parse_quote! {
            #[table(name = "articles; DROP")]
            struct Article { id: i64 }
        };
        assert!(expand(input).is_err());
    }
}
