//! Deferred raster mosaic graphs.
//!
//! `mosaic_graft` builds a description of a raster computation without evaluating it. A
//! [`Graft`] is a flat, content-addressed DAG of literal, parameter and operation nodes with a
//! distinguished `returns` root. A [`Mosaic`] binds a graft to band, product and date metadata
//! and offers the band, masking and terrain transforms. Arithmetic on mosaics emits new nodes.
//!
//! # Pipeline overview
//!
//! 1. **Construct**: [`Mosaic::from_product_bands`] checks the product against a [`Catalog`]
//!    and emits a `mosaic` node.
//! 2. **Transform**: operators, [`Mosaic::pick_bands`], [`Mosaic::clip`], [`Mosaic::slope`] and
//!    friends return new mosaics; inputs are never modified.
//! 3. **Rewrite**: [`Mosaic::update_resampler`] rebuilds the graft with substituted arguments.
//! 4. **Persist / hand off**: [`Mosaic::serialize`] writes a JSON record, and
//!    [`TileLayerBuilder`] prepares the request for a [`Renderer`].
//!
//! Equal structure always yields equal node keys and an equal [`CacheId`].
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod algebra;
mod catalog;
mod foundation;
mod graft;
mod mosaic;
mod render;
mod rewrite;

pub use algebra::operand::{
    Combine, ComputeMap, Entity, EntityKind, EntityOperand, Kinded, Operand, Precede, Scalar,
};
pub use algebra::ops::{BinaryOp, UnaryOp, apply_binary, binary, call, unary};
pub use algebra::reduction::{Axis, Reduce, Reducer};
pub use algebra::traits::{Compare, Exponentiate, FloorDiv, Logical, Signed};
pub use algebra::ufunc::{
    PI, absolute, arccos, arcsin, arctan, arctan2, cos, dot, exp, log, log10, sin, sqrt, square,
    tan,
};
pub use catalog::{
    Catalog, Product, StaticCatalog, VectorTable, get_product_or_fail, verify_vector_product,
};
pub use foundation::datetime::{DateBound, DateInput, normalize_datetime_or_none, parse_timestamp};
pub use foundation::error::{GraftError, GraftResult};
pub use graft::op_kind;
pub use graft::{
    CACHE_ID_KEY, CacheId, Graft, GraftBuilder, Node, NodeKey, OpNode, ParamType, Parameter,
    RETURNS_KEY, compute_cache_id, reset_graft,
};
pub use mosaic::band_ops::{ConcatOperand, UnpackedBands};
pub use mosaic::bands::{BandSpec, format_bands, join_bands};
pub use mosaic::factory::stack_scenes;
pub use mosaic::model::{Mosaic, MosaicMetadata, MosaicParts};
pub use mosaic::options::MosaicOptions;
pub use mosaic::properties::{DotProperties, propagate_dot_properties};
pub use mosaic::serialization::MosaicRecord;
pub use mosaic::terrain::Resolution;
pub use render::layer::{
    LinkedValue, ParameterOverride, Renderer, ScaleSpec, TileLayerBuilder, TileLayerSpec,
    VisualizationParams, validate_scales,
};
pub use rewrite::derivative::{gradient_x, gradient_y, resolution_graft_x, resolution_graft_y};
pub use rewrite::kwarg::update_kwarg;
pub use rewrite::resampler::{ResampleAlgorithm, update_resampler};
