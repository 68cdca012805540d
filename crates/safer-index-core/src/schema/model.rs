use super::Index;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Logical state of one model: the table it maps to, its fields and the
/// indexes declared on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelState {
    /// Application (namespace) the model belongs to
    pub app_label: String,

    /// Name of the model, as written by the user
    pub name: String,

    /// Explicit table name. When `None`, the table is named
    /// `<app_label>_<lowercase model name>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_table: Option<String>,

    /// When `false`, the table is owned by something else and directives
    /// never touch it.
    #[serde(default = "default_managed")]
    pub managed: bool,

    /// Field name to column name
    #[serde(default)]
    pub fields: IndexMap<String, String>,

    #[serde(default)]
    pub indexes: Vec<Index>,
}

fn default_managed() -> bool {
    true
}

impl ModelState {
    pub fn new(app_label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            name: name.into(),
            db_table: None,
            managed: true,
            fields: IndexMap::new(),
            indexes: vec![],
        }
    }

    /// Adds a field stored in a column of the same name.
    pub fn field(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.field_with_column(name.clone(), name)
    }

    pub fn field_with_column(mut self, name: impl Into<String>, column: impl Into<String>) -> Self {
        self.fields.insert(name.into(), column.into());
        self
    }

    pub fn db_table(mut self, table: impl Into<String>) -> Self {
        self.db_table = Some(table.into());
        self
    }

    pub fn unmanaged(mut self) -> Self {
        self.managed = false;
        self
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// Lowercase model name, which is how models are keyed in a
    /// [`ProjectState`](super::ProjectState).
    pub fn name_lower(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn table_name(&self) -> String {
        match &self.db_table {
            Some(table) => table.clone(),
            None => format!("{}_{}", self.app_label, self.name_lower()),
        }
    }

    pub fn column(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// The first key or included field of `index` this model does not
    /// declare.
    pub fn undeclared_field<'a>(&self, index: &'a Index) -> Option<&'a str> {
        index
            .field_orders()
            .map(|field| field.name)
            .chain(index.include().iter().map(String::as_str))
            .find(|field| !self.fields.contains_key(*field))
    }

    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|index| index.name() == name)
    }
}
