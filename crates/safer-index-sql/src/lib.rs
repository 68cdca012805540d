pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub use safer_index_core::stmt::{self, Statement};
