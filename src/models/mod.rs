//! Diesel row types and their conversions to domain entities.

pub mod catch_record;
pub mod config;
pub mod vessel;
