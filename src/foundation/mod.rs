pub mod datetime;
pub mod error;
