//! # zatrano-core
//!
//! Core crate for Zatrano. Contains the generic repository trait,
//! configuration schemas, list/query types (pagination, sort allow-lists,
//! filters, partial field maps), and the unified error system.
//!
//! This crate has **no** internal dependencies on other Zatrano crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
