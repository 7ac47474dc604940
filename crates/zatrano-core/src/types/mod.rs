//! Core type definitions used across the Zatrano workspace.

pub mod field;
pub mod filter;
pub mod id;
pub mod pagination;
pub mod sorting;

pub use field::{FieldMap, FieldValue, field_map};
pub use filter::{FilterField, FilterOp, FilterValue};
pub use id::{ActorId, DbId};
pub use pagination::{ListParams, PageMeta, PageRequest, PageResponse, total_pages};
pub use sorting::{SortDirection, SortPolicy};
