//! Records module: repository seam plus the in-memory store built on it.

pub mod repository;
pub mod store;

pub use repository::{JsonFileRepository, RecordRepository};
pub use store::{PetHandle, RecordStore, UserHandle};
