//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod contact;
pub mod dashboard;
pub mod donation;
pub mod event;
pub mod media;
pub mod session;
pub mod slideshow;
pub mod story;
pub mod subscription;
pub mod testimonial;
pub mod urgent_need;
pub mod user;
pub mod volunteer;
