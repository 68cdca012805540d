use super::{Directive, DirectiveDef};
use crate::{
    editor::SchemaEditor,
    sequence::{self, Change},
    Result,
};

use async_trait::async_trait;
use safer_index_core::{schema::ProjectState, Error};
use serde::{Deserialize, Serialize};

/// Drops an index with `DROP INDEX CONCURRENTLY`, with `lock_timeout`
/// disabled for the duration of the drop.
///
/// Undoing it rebuilds the index from its definition in the logical state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveIndexConcurrently {
    pub model_name: String,
    pub name: String,
}

impl RemoveIndexConcurrently {
    pub const NAME: &'static str = "RemoveIndexConcurrently";

    pub fn new(model_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            name: name.into(),
        }
    }

    pub fn model_name_lower(&self) -> String {
        self.model_name.to_lowercase()
    }
}

#[async_trait]
impl Directive for RemoveIndexConcurrently {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn state_forwards(&self, app_label: &str, state: &mut ProjectState) -> Result<()> {
        state.remove_index(app_label, &self.model_name, &self.name)?;
        Ok(())
    }

    async fn database_forwards(
        &self,
        app_label: &str,
        editor: &mut SchemaEditor<'_>,
        from_state: &ProjectState,
        _to_state: &ProjectState,
    ) -> Result<()> {
        editor.ensure_not_in_transaction(Self::NAME)?;

        let model = from_state.get_model(app_label, &self.model_name)?;
        let change = Change::Drop(&self.name);
        sequence::run(editor, Self::NAME, app_label, model, change).await
    }

    async fn database_backwards(
        &self,
        app_label: &str,
        editor: &mut SchemaEditor<'_>,
        _from_state: &ProjectState,
        to_state: &ProjectState,
    ) -> Result<()> {
        editor.ensure_not_in_transaction(Self::NAME)?;

        let model = to_state.get_model(app_label, &self.model_name)?;
        let index = model.index(&self.name).ok_or_else(|| {
            Error::state_conflict(format!(
                "index `{}` does not exist on model `{}.{}`",
                self.name,
                app_label,
                model.name_lower()
            ))
        })?;

        sequence::run(editor, Self::NAME, app_label, model, Change::Build(index)).await
    }

    fn describe(&self) -> String {
        format!(
            "Concurrently removes index {} on model {} if the index exists ({})",
            self.name,
            self.model_name,
            Self::NAME,
        )
    }

    fn deconstruct(&self) -> DirectiveDef {
        self.clone().into()
    }

    fn migration_name_fragment(&self) -> String {
        format!(
            "remove_{}_{}",
            self.model_name_lower(),
            self.name.to_lowercase()
        )
    }
}
