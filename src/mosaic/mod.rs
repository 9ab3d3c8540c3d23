//! The mosaic entity: a graft bound to band, product and date metadata.

pub mod band_ops;
pub mod bands;
pub mod factory;
pub mod model;
pub(crate) mod nodes;
pub mod options;
mod pixel;
pub mod properties;
mod resample;
pub mod serialization;
pub mod terrain;
