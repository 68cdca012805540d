use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Rows returned by the operation, with every column in text form
    Values(Vec<Row>),
}

/// One result row. Columns are kept in their text representation, which is
/// what `SHOW` and catalog lookups produce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub columns: Vec<Option<String>>,
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(rows: Vec<Row>) -> Self {
        Self {
            rows: Rows::Values(rows),
        }
    }

    pub fn empty_values() -> Self {
        Self::values(vec![])
    }
}

impl Rows {
    /// Returns the returned rows, or an invalid result error when the
    /// operation only reported a row count.
    pub fn into_values(self) -> Result<Vec<Row>> {
        match self {
            Self::Values(rows) => Ok(rows),
            Self::Count(count) => Err(crate::Error::invalid_result(format!(
                "expected rows, got a row count of {count}"
            ))),
        }
    }
}

impl Row {
    pub fn new(columns: Vec<Option<String>>) -> Self {
        Self { columns }
    }

    /// Returns the text value of column `index`, `None` when the column is
    /// missing or SQL `NULL`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.columns.get(index)?.as_deref()
    }
}

impl<S: Into<String>> FromIterator<Option<S>> for Row {
    fn from_iter<T: IntoIterator<Item = Option<S>>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(|v| v.map(Into::into)).collect())
    }
}
