//! Record shapes for the pet health tracker.
//!
//! A [`user::User`] owns its [`pet::Pet`]s, and every pet keeps three
//! append-only journals of [`entry::Entry`] values. The serde layout of these
//! types is the on-disk JSON format.

pub mod errors;
pub mod entry;
pub mod pet;
pub mod user;

pub use entry::{Entry, EntryKind};
pub use pet::Pet;
pub use user::User;
