mod add_index;
pub use add_index::AddIndexConcurrently;

mod remove_index;
pub use remove_index::RemoveIndexConcurrently;

use crate::{editor::SchemaEditor, Result};

use async_trait::async_trait;
use safer_index_core::schema::ProjectState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One schema change, run by a migration as a single forward/backward unit.
///
/// `state_forwards` only touches the logical state and always runs, even
/// when the database paths skip the database because a router denied it.
#[async_trait]
pub trait Directive: fmt::Debug + Send + Sync {
    /// Type name, e.g. `AddIndexConcurrently`.
    fn name(&self) -> &'static str;

    /// Applies the change to the logical state.
    fn state_forwards(&self, app_label: &str, state: &mut ProjectState) -> Result<()>;

    /// Applies the change to the database. `from_state` is the logical state
    /// before this directive, `to_state` after it.
    async fn database_forwards(
        &self,
        app_label: &str,
        editor: &mut SchemaEditor<'_>,
        from_state: &ProjectState,
        to_state: &ProjectState,
    ) -> Result<()>;

    /// Undoes the change in the database. `from_state` is the logical state
    /// with this directive applied, `to_state` the state it returns to.
    async fn database_backwards(
        &self,
        app_label: &str,
        editor: &mut SchemaEditor<'_>,
        from_state: &ProjectState,
        to_state: &ProjectState,
    ) -> Result<()>;

    /// One-line human readable summary.
    fn describe(&self) -> String;

    /// The constructor arguments, in a form that rebuilds this directive.
    fn deconstruct(&self) -> DirectiveDef;

    /// Short snake_case fragment used to name generated migrations.
    fn migration_name_fragment(&self) -> String;

    fn reversible(&self) -> bool {
        true
    }

    /// Whether the directive may run inside a transaction.
    fn atomic(&self) -> bool {
        false
    }
}

/// Serializable form of a directive, tagged with the directive's name.
///
/// ```toml
/// directive = "AddIndexConcurrently"
/// model_name = "IntModel"
///
/// [index]
/// name = "int_field_idx"
/// fields = ["int_field"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "directive")]
pub enum DirectiveDef {
    AddIndexConcurrently(AddIndexConcurrently),
    RemoveIndexConcurrently(RemoveIndexConcurrently),
}

impl DirectiveDef {
    pub fn as_directive(&self) -> &dyn Directive {
        match self {
            DirectiveDef::AddIndexConcurrently(directive) => directive,
            DirectiveDef::RemoveIndexConcurrently(directive) => directive,
        }
    }

    pub fn into_directive(self) -> Box<dyn Directive> {
        match self {
            DirectiveDef::AddIndexConcurrently(directive) => Box::new(directive),
            DirectiveDef::RemoveIndexConcurrently(directive) => Box::new(directive),
        }
    }
}

impl From<AddIndexConcurrently> for DirectiveDef {
    fn from(value: AddIndexConcurrently) -> Self {
        DirectiveDef::AddIndexConcurrently(value)
    }
}

impl From<RemoveIndexConcurrently> for DirectiveDef {
    fn from(value: RemoveIndexConcurrently) -> Self {
        DirectiveDef::RemoveIndexConcurrently(value)
    }
}
