pub mod media_ref;
pub mod project;

pub use media_ref::{MediaKind, MediaRef};
pub use project::ProjectRecord;
