//! Per-table forest configuration.
//!
//! A [`ForestConfig`] is built once, either through [`ForestConfig::builder`]
//! or from serialized [`ForestOptions`], and validated up front so that query
//! construction never fails on a bad identifier.

use compact_str::CompactString;
use core::fmt::{self, Display};
use serde::Deserialize;

use crate::{
    error::{CanopyError, Result},
    sql::{SQL, SQLChunk, Token},
    traits::ToSQL,
};

/// Longest identifier accepted by every supported store (PostgreSQL truncates at 63 bytes).
const MAX_IDENT_LEN: usize = 63;

/// A validated SQL identifier.
///
/// Only `[A-Za-z_][A-Za-z0-9_]*` is accepted. Rendering still quotes the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(CompactString);

impl Ident {
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref();
        let mut chars = name.chars();
        let valid_head = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !valid_head || !valid_tail || name.len() > MAX_IDENT_LEN {
            return Err(CanopyError::InvalidConfiguration(format!(
                "invalid identifier \"{name}\""
            )));
        }
        Ok(Self(CompactString::new(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `"table"."self"`
    pub fn qualified_by(&self, table: &Ident) -> SQL {
        SQL::qualified(table.0.clone(), self.0.clone())
    }
}

impl ToSQL for Ident {
    fn to_sql(&self) -> SQL {
        SQL::ident(self.0.clone())
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// One `column [ASC|DESC]` term of the configured ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    pub column: Ident,
    pub direction: Direction,
}

impl OrderTerm {
    /// Parses a comma separated list such as `"name, id DESC"`.
    pub fn parse_list(text: &str) -> Result<Vec<OrderTerm>> {
        text.split(',').map(|term| OrderTerm::parse(term.trim())).collect()
    }

    pub fn parse(term: &str) -> Result<OrderTerm> {
        let malformed =
            || CanopyError::InvalidConfiguration(format!("malformed order term \"{term}\""));

        let mut words = term.split_whitespace();
        let column = Ident::new(words.next().ok_or_else(malformed)?)?;
        let direction = match words.next() {
            None => Direction::Asc,
            Some(word) if word.eq_ignore_ascii_case("asc") => Direction::Asc,
            Some(word) if word.eq_ignore_ascii_case("desc") => Direction::Desc,
            Some(_) => return Err(malformed()),
        };
        if words.next().is_some() {
            return Err(malformed());
        }

        Ok(OrderTerm { column, direction })
    }
}

/// What the persistence layer does with children when a parent is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dependent {
    Destroy,
    DeleteAll,
    Nullify,
    Restrict,
}

impl Dependent {
    /// The matching `ON DELETE` referential action.
    pub const fn on_delete_action(self) -> &'static str {
        match self {
            Dependent::Destroy | Dependent::DeleteAll => "CASCADE",
            Dependent::Nullify => "SET NULL",
            Dependent::Restrict => "RESTRICT",
        }
    }
}

/// Raw, unvalidated options as they appear in a configuration file.
///
/// ```toml
/// foreign_key = "parent_id"
/// order = "name"
/// dependent = "destroy"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForestOptions {
    pub primary_key: Option<String>,
    pub foreign_key: Option<String>,
    pub order: Option<String>,
    pub dependent: Option<Dependent>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl ForestOptions {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CanopyError::InvalidConfiguration(e.message().to_owned()))
    }
}

/// Validated configuration of a forest-shaped table.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestConfig {
    table: Ident,
    primary_key: Ident,
    foreign_key: Ident,
    order: Vec<OrderTerm>,
    dependent: Option<Dependent>,
    optional: bool,
    columns: Vec<Ident>,
}

impl ForestConfig {
    pub fn builder(table: impl Into<String>) -> ForestConfigBuilder {
        ForestConfigBuilder {
            table: table.into(),
            options: ForestOptions::default(),
        }
    }

    pub fn from_options(table: impl AsRef<str>, options: ForestOptions) -> Result<Self> {
        let order = match options.order.as_deref() {
            Some(text) => OrderTerm::parse_list(text)?,
            None => Vec::new(),
        };

        Ok(Self {
            table: Ident::new(table)?,
            primary_key: Ident::new(options.primary_key.as_deref().unwrap_or("id"))?,
            foreign_key: Ident::new(options.foreign_key.as_deref().unwrap_or("parent_id"))?,
            order,
            dependent: options.dependent,
            optional: options.optional,
            columns: options
                .columns
                .iter()
                .map(Ident::new)
                .collect::<Result<_>>()?,
        })
    }

    /// Parses [`ForestOptions`] from TOML. Unknown keys are rejected.
    pub fn from_toml(table: impl AsRef<str>, text: &str) -> Result<Self> {
        Self::from_options(table, ForestOptions::from_toml(text)?)
    }

    pub fn table(&self) -> &Ident {
        &self.table
    }

    pub fn primary_key(&self) -> &Ident {
        &self.primary_key
    }

    pub fn foreign_key(&self) -> &Ident {
        &self.foreign_key
    }

    pub fn order(&self) -> &[OrderTerm] {
        &self.order
    }

    pub fn dependent(&self) -> Option<Dependent> {
        self.dependent
    }

    pub fn optional(&self) -> bool {
        self.optional
    }

    pub fn columns(&self) -> &[Ident] {
        &self.columns
    }

    /// `"t"."id"`
    pub fn primary_key_column(&self) -> SQL {
        self.primary_key.qualified_by(&self.table)
    }

    /// `"t"."parent_id"`
    pub fn foreign_key_column(&self) -> SQL {
        self.foreign_key.qualified_by(&self.table)
    }

    /// The selected columns, `"t".*` when none are configured.
    pub fn select_list(&self) -> SQL {
        if self.columns.is_empty() {
            return self.table.to_sql().push(Token::DOT).push(Token::STAR);
        }
        SQL::join(
            self.columns.iter().map(|c| c.qualified_by(&self.table)),
            Token::COMMA,
        )
    }

    /// `ORDER BY ...` over the configured terms, empty when unordered.
    pub fn order_by(&self) -> SQL {
        if self.order.is_empty() {
            return SQL::empty();
        }
        let terms = self.order.iter().map(|term| {
            let column = term.column.qualified_by(&self.table);
            match term.direction {
                Direction::Asc => column,
                Direction::Desc => column.push(Token::DESC),
            }
        });
        SQL::token(Token::ORDER)
            .push(Token::BY)
            .append(SQL::join(terms, Token::COMMA))
    }

    /// Column definition for the parent reference, for schema helpers:
    /// `"parent_id" INTEGER REFERENCES "t" ("id") ON DELETE CASCADE`.
    pub fn foreign_key_definition(&self, column_type: &str) -> SQL {
        let mut sql = self
            .foreign_key
            .to_sql()
            .push(SQLChunk::raw(column_type))
            .push(SQLChunk::raw_static("REFERENCES"))
            .append(self.table.to_sql())
            .append(self.primary_key.to_sql().parens());
        if let Some(dependent) = self.dependent {
            sql = sql
                .push(SQLChunk::raw_static("ON DELETE"))
                .push(SQLChunk::raw_static(dependent.on_delete_action()));
        }
        sql
    }
}

/// Builder for [`ForestConfig`]. Validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ForestConfigBuilder {
    table: String,
    options: ForestOptions,
}

impl ForestConfigBuilder {
    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.options.primary_key = Some(column.into());
        self
    }

    pub fn foreign_key(mut self, column: impl Into<String>) -> Self {
        self.options.foreign_key = Some(column.into());
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.options.order = Some(order.into());
        self
    }

    pub fn dependent(mut self, dependent: Dependent) -> Self {
        self.options.dependent = Some(dependent);
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.options.optional = optional;
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<ForestConfig> {
        ForestConfig::from_options(self.table, self.options)
    }
}
