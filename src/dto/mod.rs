//! JSON shapes returned by the API.

pub mod records;
pub mod vessels;
