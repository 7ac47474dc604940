//! User domain entities.

pub mod kind;
pub mod model;

pub use kind::UserType;
pub use model::{CreateUser, User};
