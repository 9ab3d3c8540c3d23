//! Operator algebra over graph-wrapping entities.

pub mod operand;
pub mod ops;
pub mod reduction;
pub mod traits;
pub mod ufunc;
