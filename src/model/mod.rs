pub mod draft;
pub mod filter;
pub mod project;

pub use draft::{Draft, DraftMode, RequiredField};
pub use filter::{filter_by_label, Filter};
pub use project::{Project, ProjectFields, ProjectStatus};
