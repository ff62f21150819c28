//! Identifier quoting.
//!
//! [`QuotingProvider`] turns column and table names into SQL identifiers for
//! the renderer and the query builder. [`Dialect::Postgres`] wraps each part in
//! double quotes, doubling any embedded `"`.

use crate::error::{ExprError, ExprResult};
use serde::Deserialize;

/// `[A-Za-z_][A-Za-z0-9_$]*`
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric())
}

/// Split `schema.table` (or a bare `table`) into its parts.
///
/// Returns `None` unless every dot-separated part is a plain identifier.
pub fn split_qualified(name: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = name.split('.').collect();
    parts
        .iter()
        .all(|part| is_plain_identifier(part))
        .then_some(parts)
}

/// Identifier quoting service consumed by the renderer and the query builder.
pub trait QuotingProvider {
    /// Quote a single identifier part.
    fn quote_identifier(&self, name: &str) -> ExprResult<String>;

    /// Quote a possibly schema-qualified table name.
    ///
    /// `schema.table` is quoted part by part; any other text is quoted whole.
    fn quote_table_name(&self, name: &str) -> ExprResult<String> {
        let Some(parts) = split_qualified(name) else {
            return self.quote_identifier(name);
        };
        let quoted = parts
            .into_iter()
            .map(|part| self.quote_identifier(part))
            .collect::<ExprResult<Vec<_>>>()?;
        Ok(quoted.join("."))
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    #[default]
    Postgres,
}

impl QuotingProvider for Dialect {
    fn quote_identifier(&self, name: &str) -> ExprResult<String> {
        if name.is_empty() {
            return Err(ExprError::validation("identifier cannot be empty"));
        }
        if name.contains('\0') {
            return Err(ExprError::validation(format!(
                "identifier {name:?} contains a NUL character"
            )));
        }
        match self {
            Dialect::Postgres => Ok(format!("\"{}\"", name.replace('"', "\"\""))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifiers() {
        assert!(is_plain_identifier("published_at"));
        assert!(is_plain_identifier("_tmp$1"));
        assert!(!is_plain_identifier(""));
        assert!(!is_plain_identifier("1st"));
        assert!(!is_plain_identifier("id; DROP"));
    }

    #[test]
    fn split_schema_qualified_names() {
        assert_eq!(split_qualified("authors"), Some(vec!["authors"]));
        assert_eq!(split_qualified("public.authors"), Some(vec!["public", "authors"]));
        assert_eq!(split_qualified("public..authors"), None);
        assert_eq!(split_qualified("public."), None);
        assert_eq!(split_qualified(r#"public."Authors""#), None);
    }

    #[test]
    fn postgres_quotes_identifiers() {
        let pg = Dialect::Postgres;
        assert_eq!(pg.quote_identifier("articles").unwrap(), r#""articles""#);
        assert_eq!(pg.quote_identifier(r#"a"b"#).unwrap(), r#""a""b""#);
        assert!(matches!(
            pg.quote_identifier(""),
            Err(ExprError::Validation(_))
        ));
        assert!(pg.quote_identifier("a\0b").is_err());
    }

    #[test]
    fn postgres_quotes_table_names() {
        let pg = Dialect::Postgres;
        assert_eq!(pg.quote_table_name("authors").unwrap(), r#""authors""#);
        assert_eq!(
            pg.quote_table_name("public.authors").unwrap(),
            r#""public"."authors""#
        );
        assert_eq!(pg.quote_table_name("my table").unwrap(), r#""my table""#);
        assert_eq!(
            pg.quote_table_name(r#"x"; DROP TABLE y; --"#).unwrap(),
            r#""x""; DROP TABLE y; --""#
        );
    }
}
