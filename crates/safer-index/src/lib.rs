pub mod directive;
pub use directive::{AddIndexConcurrently, Directive, DirectiveDef, RemoveIndexConcurrently};

pub mod driver;

mod editor;
pub use editor::SchemaEditor;

mod lock_timeout;
pub use lock_timeout::LockTimeoutSnapshot;

pub mod migration;
pub use migration::MigrationFile;

pub mod router;
pub use router::{Hints, Router, Routers};

mod sequence;

pub use safer_index_core::{bail, err, schema, Connection, Error, Result};
