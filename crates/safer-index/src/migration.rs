//! Migration files: an ordered list of directives stored as TOML.
//!
//! ```toml
//! version = 1
//! app_label = "example_app"
//! name = "0002_intmodel_int_field_idx"
//!
//! [[models]]
//! app_label = "example_app"
//! name = "IntModel"
//!
//! [models.fields]
//! int_field = "int_field"
//!
//! [[directives]]
//! directive = "AddIndexConcurrently"
//! model_name = "IntModel"
//!
//! [directives.index]
//! name = "int_field_idx"
//! fields = ["int_field"]
//! ```

use crate::{Directive, DirectiveDef, Result};

use safer_index_core::{
    schema::{ModelState, ProjectState},
    Error,
};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr};

const MIGRATION_FILE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationFile {
    /// Migration file format version
    version: u32,

    /// Application the directives apply to
    pub app_label: String,

    /// Migration name, e.g. `0002_intmodel_int_field_idx`
    pub name: String,

    /// Logical state of the models the directives touch, before the
    /// migration runs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<ModelState>,

    /// Directives, in the order they run forwards
    #[serde(default)]
    pub directives: Vec<DirectiveDef>,
}

/// The logical state around one directive of a migration.
#[derive(Debug)]
pub struct Step<'a> {
    pub directive: &'a dyn Directive,

    /// State before the directive
    pub before: ProjectState,

    /// State after the directive
    pub after: ProjectState,
}

impl MigrationFile {
    pub fn new(app_label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            version: MIGRATION_FILE_VERSION,
            app_label: app_label.into(),
            name: name.into(),
            models: vec![],
            directives: vec![],
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn with_model(mut self, model: ModelState) -> Self {
        self.models.push(model);
        self
    }

    pub fn with_directive(mut self, directive: &dyn Directive) -> Self {
        self.directives.push(directive.deconstruct());
        self
    }

    /// Name built from the number and the directives' fragments, e.g.
    /// `0002_intmodel_int_field_idx`.
    pub fn generated_name(number: u32, directives: &[&dyn Directive]) -> String {
        let mut name = format!("{number:04}");
        if directives.is_empty() {
            name.push_str("_empty");
        }
        for directive in directives {
            name.push('_');
            name.push_str(&directive.migration_name_fragment());
        }
        name
    }

    /// Load a migration file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::from(e).context(crate::err!("reading {}", path.display())))?;
        contents.parse()
    }

    /// Write the migration file to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::err!("serializing migration file: {e}"))
    }

    pub fn directives(&self) -> impl ExactSizeIterator<Item = &dyn Directive> + '_ {
        self.directives.iter().map(DirectiveDef::as_directive)
    }

    /// The logical state the migration starts from.
    pub fn initial_state(&self) -> ProjectState {
        self.models.iter().cloned().collect()
    }

    /// Threads the initial state through every directive's
    /// `state_forwards`, returning the states around each one.
    pub fn steps(&self) -> Result<Vec<Step<'_>>> {
        let mut state = self.initial_state();
        let mut steps = Vec::with_capacity(self.directives.len());

        for directive in self.directives() {
            let before = state.clone();
            directive
                .state_forwards(&self.app_label, &mut state)
                .map_err(|e| e.context(crate::err!("{}", directive.describe())))?;

            steps.push(Step {
                directive,
                before,
                after: state.clone(),
            });
        }

        Ok(steps)
    }
}

impl FromStr for MigrationFile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let file: MigrationFile =
            toml::from_str(s).map_err(|e| crate::err!("parsing migration file: {e}"))?;

        if file.version != MIGRATION_FILE_VERSION {
            crate::bail!(
                "unsupported migration file version: {}. Expected version {}",
                file.version,
                MIGRATION_FILE_VERSION
            );
        }

        Ok(file)
    }
}

impl fmt::Display for MigrationFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toml_str = self.to_toml().map_err(|_| fmt::Error)?;
        f.write_str(&toml_str)
    }
}
