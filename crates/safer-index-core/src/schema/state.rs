use super::{Index, ModelState};
use crate::{Error, Result};

use indexmap::IndexMap;

/// The framework's in-memory view of every model and its indexes.
///
/// A `ProjectState` is built fresh for each planning pass. Directives update
/// it through [`ProjectState::add_index`] and [`ProjectState::remove_index`]
/// whether or not they touched a database, so it can legitimately disagree
/// with a database that a router excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectState {
    models: IndexMap<(String, String), ModelState>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a model.
    pub fn add_model(&mut self, model: ModelState) {
        let key = (model.app_label.clone(), model.name_lower());
        self.models.insert(key, model);
    }

    /// Looks a model up by app label and case-insensitive model name.
    pub fn model(&self, app_label: &str, model_name: &str) -> Option<&ModelState> {
        self.models
            .get(&(app_label.to_string(), model_name.to_lowercase()))
    }

    /// Like [`ProjectState::model`], failing with a state conflict when the
    /// model is unknown.
    pub fn get_model(&self, app_label: &str, model_name: &str) -> Result<&ModelState> {
        self.model(app_label, model_name)
            .ok_or_else(|| missing_model(app_label, model_name))
    }

    fn get_model_mut(&mut self, app_label: &str, model_name: &str) -> Result<&mut ModelState> {
        self.models
            .get_mut(&(app_label.to_string(), model_name.to_lowercase()))
            .ok_or_else(|| missing_model(app_label, model_name))
    }

    pub fn models(&self) -> impl ExactSizeIterator<Item = &ModelState> + '_ {
        self.models.values()
    }

    /// Appends `index` to the model's indexes.
    ///
    /// Fails when the model already declares an index with the same name, or
    /// when the index names a field the model does not declare.
    pub fn add_index(&mut self, app_label: &str, model_name: &str, index: Index) -> Result<()> {
        let model = self.get_model_mut(app_label, model_name)?;

        if let Some(field) = model.undeclared_field(&index) {
            return Err(Error::state_conflict(format!(
                "field `{}` does not exist on model `{}.{}`",
                field,
                app_label,
                model.name_lower()
            )));
        }

        if model.index(index.name()).is_some() {
            return Err(Error::state_conflict(format!(
                "index `{}` already exists on model `{}.{}`",
                index.name(),
                app_label,
                model.name_lower()
            )));
        }

        model.indexes.push(index);
        Ok(())
    }

    /// Removes the index called `name` from the model and returns it.
    ///
    /// Fails when the model has no such index.
    pub fn remove_index(&mut self, app_label: &str, model_name: &str, name: &str) -> Result<Index> {
        let model = self.get_model_mut(app_label, model_name)?;

        let Some(position) = model.indexes.iter().position(|index| index.name() == name) else {
            return Err(Error::state_conflict(format!(
                "index `{}` does not exist on model `{}.{}`",
                name,
                app_label,
                model.name_lower()
            )));
        };

        Ok(model.indexes.remove(position))
    }
}

impl FromIterator<ModelState> for ProjectState {
    fn from_iter<T: IntoIterator<Item = ModelState>>(iter: T) -> Self {
        let mut state = ProjectState::new();
        for model in iter {
            state.add_model(model);
        }
        state
    }
}

fn missing_model(app_label: &str, model_name: &str) -> Error {
    Error::state_conflict(format!(
        "model `{}.{}` does not exist",
        app_label,
        model_name.to_lowercase()
    ))
}
