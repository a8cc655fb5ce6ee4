//! Record store for the pet health tracker.
//! - `records` holds the in-memory store and its repository seam.
//! - `storage` is the JSON document file used by the file repository.
//! - `report` renders pets as text for whatever presentation layer is attached.

pub mod errors;
pub mod records;
pub mod report;
pub mod storage;

pub use errors::ServiceError;
pub use records::{JsonFileRepository, PetHandle, RecordRepository, RecordStore, UserHandle};
