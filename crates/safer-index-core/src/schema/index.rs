use super::MAX_IDENTIFIER_LEN;
use crate::{stmt::Direction, Error, Result};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A declared index.
///
/// An `Index` can only be obtained through [`Index::builder`] (or by
/// deserializing one), both of which validate it. Its name is immutable:
/// changing the definition of an existing index means dropping it and adding
/// a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndexRepr", into = "IndexRepr")]
pub struct Index {
    name: String,
    fields: Vec<String>,
    expressions: Vec<String>,
    include: Vec<String>,
    unique: bool,
    condition: Option<String>,
}

/// A field reference of an index, with its sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexField<'a> {
    pub name: &'a str,
    pub direction: Option<Direction>,
}

#[derive(Debug, Clone)]
pub struct IndexBuilder {
    index: Index,
}

impl Index {
    pub fn builder(name: impl Into<String>) -> IndexBuilder {
        IndexBuilder {
            index: Index {
                name: name.into(),
                fields: vec![],
                expressions: vec![],
                include: vec![],
                unique: false,
                condition: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field references as written, descending ones prefixed with `-`.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn expressions(&self) -> &[String] {
        &self.expressions
    }

    pub fn include(&self) -> &[String] {
        &self.include
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Field references with the `-` prefix turned into a sort direction.
    pub fn field_orders(&self) -> impl ExactSizeIterator<Item = IndexField<'_>> + '_ {
        self.fields.iter().map(|field| match field.strip_prefix('-') {
            Some(name) => IndexField {
                name,
                direction: Some(Direction::Desc),
            },
            None => IndexField {
                name: field,
                direction: None,
            },
        })
    }

    /// The entries that make up the index key, as shown to humans: field
    /// references for field indexes, SQL expressions otherwise.
    pub fn key_parts(&self) -> &[String] {
        if self.fields.is_empty() {
            &self.expressions
        } else {
            &self.fields
        }
    }

    fn validate(self) -> Result<Index> {
        if self.name.is_empty() {
            return Err(Error::invalid_index_definition(
                "index name must not be empty",
            ));
        }

        if self.name.len() > MAX_IDENTIFIER_LEN {
            return Err(Error::invalid_index_definition(format!(
                "index name `{}` is longer than {MAX_IDENTIFIER_LEN} bytes",
                self.name
            )));
        }

        if self.name.contains('\0') {
            return Err(Error::invalid_index_definition(
                "index name must not contain NUL bytes",
            ));
        }

        match (self.fields.is_empty(), self.expressions.is_empty()) {
            (true, true) => {
                return Err(Error::invalid_index_definition(format!(
                    "index `{}` needs at least one field or expression",
                    self.name
                )))
            }
            (false, false) => {
                return Err(Error::invalid_index_definition(format!(
                    "index `{}` mixes fields and expressions",
                    self.name
                )))
            }
            _ => {}
        }

        let field_names = self
            .field_orders()
            .map(|field| field.name)
            .chain(self.include.iter().map(String::as_str));

        for name in field_names {
            if name.is_empty() || name.contains('\0') {
                return Err(Error::invalid_index_definition(format!(
                    "index `{}` references an empty or malformed field name",
                    self.name
                )));
            }
        }

        if self.expressions.iter().any(|expr| expr.trim().is_empty()) {
            return Err(Error::invalid_index_definition(format!(
                "index `{}` has an empty expression",
                self.name
            )));
        }

        Ok(self)
    }
}

impl IndexBuilder {
    /// Index the given fields, in order. Prefix a field with `-` to index it
    /// in descending order.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Index the given SQL expressions, in order.
    pub fn expressions<I, S>(mut self, expressions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index.expressions = expressions.into_iter().map(Into::into).collect();
        self
    }

    /// Store the given fields in the index without making them part of the
    /// key.
    pub fn include<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index.include = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn unique(mut self) -> Self {
        self.index.unique = true;
        self
    }

    /// Only index rows matching the SQL predicate.
    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.index.condition = Some(condition.into());
        self
    }

    pub fn build(self) -> Result<Index> {
        self.index.validate()
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.key_parts().join(", "))
    }
}

#[derive(Serialize, Deserialize)]
struct IndexRepr {
    name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    expressions: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    include: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    unique: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition: Option<String>,
}

impl TryFrom<IndexRepr> for Index {
    type Error = Error;

    fn try_from(repr: IndexRepr) -> Result<Index> {
        Index {
            name: repr.name,
            fields: repr.fields,
            expressions: repr.expressions,
            include: repr.include,
            unique: repr.unique,
            condition: repr.condition,
        }
        .validate()
    }
}

impl From<Index> for IndexRepr {
    fn from(index: Index) -> IndexRepr {
        IndexRepr {
            name: index.name,
            fields: index.fields,
            expressions: index.expressions,
            include: index.include,
            unique: index.unique,
            condition: index.condition,
        }
    }
}
