pub use errors::{ServiceError, ServiceResult};

pub mod charts;
pub mod errors;
pub mod import;
pub mod records;
pub mod vessels;
