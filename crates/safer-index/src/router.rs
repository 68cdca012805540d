//! Decides which databases a migration may run on.

use std::fmt;

/// What a directive is about to touch, handed to every [`Router`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hints<'a> {
    /// Model name as written in the directive
    pub model_name: &'a str,

    /// Physical table the index lives on
    pub table: &'a str,

    /// Name of the index being built or dropped
    pub index: &'a str,

    /// `AddIndexConcurrently` or `RemoveIndexConcurrently`
    pub directive: &'a str,
}

/// A routing rule.
///
/// Returning `None` abstains and lets the next router in the chain decide.
pub trait Router: Send + Sync {
    fn allow_migrate(&self, db: &str, app_label: &str, hints: &Hints<'_>) -> Option<bool>;
}

impl<F> Router for F
where
    F: Fn(&str, &str, &Hints<'_>) -> Option<bool> + Send + Sync,
{
    fn allow_migrate(&self, db: &str, app_label: &str, hints: &Hints<'_>) -> Option<bool> {
        self(db, app_label, hints)
    }
}

/// Only lets migrations through to the listed database aliases. Abstains for
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct OnlyDatabases {
    aliases: Vec<String>,
}

impl OnlyDatabases {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

impl Router for OnlyDatabases {
    fn allow_migrate(&self, db: &str, _app_label: &str, _hints: &Hints<'_>) -> Option<bool> {
        Some(self.aliases.iter().any(|alias| alias == db))
    }
}

/// An ordered chain of routers. The first router with an opinion wins; when
/// all of them abstain the migration is allowed.
#[derive(Default)]
pub struct Routers {
    routers: Vec<Box<dyn Router>>,
}

impl Routers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, router: impl Router + 'static) -> Self {
        self.push(router);
        self
    }

    pub fn push(&mut self, router: impl Router + 'static) {
        self.routers.push(Box::new(router));
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    pub fn allow_migrate(&self, db: &str, app_label: &str, hints: &Hints<'_>) -> bool {
        self.routers
            .iter()
            .find_map(|router| router.allow_migrate(db, app_label, hints))
            .unwrap_or(true)
    }
}

impl fmt::Debug for Routers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Routers")
            .field("len", &self.routers.len())
            .finish()
    }
}
