pub mod models;
pub mod queries;
pub mod store;
pub mod time_serde;

mod error;

pub use error::Error;
pub use store::{BoxFuture, DocType, DocumentStore, HttpStore};

pub type Result<T, E = Error> = std::result::Result<T, E>;
