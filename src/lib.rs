pub mod app;
pub mod board;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod store;
pub mod ui;

pub use board::{Notice, NoticeKind, ProjectBoard};
pub use error::{BoardError, Result, StoreError};
pub use store::{Document, DocumentStore, LocalStore, Subscription};
