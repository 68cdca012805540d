use super::{Directive, DirectiveDef};
use crate::{
    editor::SchemaEditor,
    sequence::{self, Change},
    Result,
};

use async_trait::async_trait;
use safer_index_core::schema::{Index, ProjectState};
use serde::{Deserialize, Serialize};

/// Builds an index with `CREATE INDEX CONCURRENTLY`, with `lock_timeout`
/// disabled for the duration of the build.
///
/// An invalid index of the same name, left behind by an interrupted build, is
/// dropped first, so re-running a failed migration repairs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddIndexConcurrently {
    pub model_name: String,
    pub index: Index,
}

impl AddIndexConcurrently {
    pub const NAME: &'static str = "AddIndexConcurrently";

    pub fn new(model_name: impl Into<String>, index: Index) -> Self {
        Self {
            model_name: model_name.into(),
            index,
        }
    }

    pub fn model_name_lower(&self) -> String {
        self.model_name.to_lowercase()
    }
}

#[async_trait]
impl Directive for AddIndexConcurrently {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn state_forwards(&self, app_label: &str, state: &mut ProjectState) -> Result<()> {
        state.add_index(app_label, &self.model_name, self.index.clone())
    }

    async fn database_forwards(
        &self,
        app_label: &str,
        editor: &mut SchemaEditor<'_>,
        _from_state: &ProjectState,
        to_state: &ProjectState,
    ) -> Result<()> {
        editor.ensure_not_in_transaction(Self::NAME)?;

        let model = to_state.get_model(app_label, &self.model_name)?;
        sequence::run(editor, Self::NAME, app_label, model, Change::Build(&self.index)).await
    }

    async fn database_backwards(
        &self,
        app_label: &str,
        editor: &mut SchemaEditor<'_>,
        from_state: &ProjectState,
        _to_state: &ProjectState,
    ) -> Result<()> {
        editor.ensure_not_in_transaction(Self::NAME)?;

        let model = from_state.get_model(app_label, &self.model_name)?;
        let change = Change::Drop(self.index.name());
        sequence::run(editor, Self::NAME, app_label, model, change).await
    }

    fn describe(&self) -> String {
        format!(
            "Concurrently creates index {} on field(s) [{}] of model {} if the index does not exist ({})",
            self.index.name(),
            self.index.key_parts().join(", "),
            self.model_name,
            Self::NAME,
        )
    }

    fn deconstruct(&self) -> DirectiveDef {
        self.clone().into()
    }

    fn migration_name_fragment(&self) -> String {
        format!(
            "{}_{}",
            self.model_name_lower(),
            self.index.name().to_lowercase()
        )
    }
}
