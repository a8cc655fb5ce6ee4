//! Storage abstractions for the service layer
//!
//! Whole-document JSON files written with write-then-rename so a crash never
//! leaves a truncated file at the target path.

pub mod json_file;

pub use json_file::JsonFile;
