//! Domain entities and value objects shared by the persistence and service layers.

pub mod catch_record;
pub mod dates;
pub mod query;
pub mod types;
pub mod vessel;
