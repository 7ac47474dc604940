//! Core traits defined in `zatrano-core` and implemented by other crates.

pub mod repository;

pub use repository::Repository;
