//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod announcement;
pub mod attendance;
pub mod audit;
pub mod bill;
pub mod booking;
pub mod equipment;
pub mod facility;
pub mod maintenance;
pub mod notification;
pub mod parcel;
pub mod patrol;
pub mod project;
pub mod role;
pub mod session;
pub mod sos;
pub mod support;
pub mod unit;
pub mod user;
pub mod visitor;
