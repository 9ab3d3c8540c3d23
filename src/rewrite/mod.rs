//! Non-mutating graph rewrites.

pub mod derivative;
pub mod kwarg;
pub mod resampler;
