mod index;
pub use index::{Index, IndexBuilder, IndexField};

mod model;
pub use model::ModelState;

mod state;
pub use state::ProjectState;

/// Longest identifier PostgreSQL stores without truncation
/// (`NAMEDATALEN - 1`).
pub const MAX_IDENTIFIER_LEN: usize = 63;
