//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod artist;
pub mod entry;
pub mod event;
pub mod image;
pub mod payment;
pub mod registration;
pub mod session;
pub mod user;
