//! Operation names emitted into grafts and understood by the remote evaluator.

/// Product mosaic construction (product id, bands, date bounds, options).
pub const MOSAIC: &str = "mosaic";
/// Image stack construction; carries a resampler like [`MOSAIC`].
pub const STACK_SCENES: &str = "stack_scenes";
/// Mosaic built from an explicit ordered list of image ids.
pub const IMAGE_IDS_MOSAIC: &str = "mosaic_image_ids";

/// Operation kinds whose `resampler` keyword is rewritten by `update_resampler`.
pub const RESAMPLER_BEARING: [&str; 2] = [MOSAIC, STACK_SCENES];
/// Keyword argument naming the resampling algorithm.
pub const RESAMPLER_KWARG: &str = "resampler";

/// Generic band selection.
pub const PICK_BANDS: &str = "pick_bands";
/// Band renaming.
pub const RENAME_BANDS: &str = "rename_bands";
/// Band concatenation.
pub const CONCAT_BANDS: &str = "concat_bands";

/// Apply a mask.
pub const MASK: &str = "mask";
/// Bound values to `[lo, hi]`.
pub const CLIP: &str = "clip";
/// Fill masked pixels.
pub const FILL_MASK: &str = "fill_mask";

/// Reduction along a named axis.
pub const REDUCTION: &str = "reduction";

/// Finite difference along the E-W axis.
pub const GRADIENT_X: &str = "gradient_x";
/// Finite difference along the N-S axis.
pub const GRADIENT_Y: &str = "gradient_y";
/// Per-pixel E-W resolution derived from the data's geospatial metadata.
pub const RESOLUTION_X: &str = "resolution_x";
/// Per-pixel N-S resolution derived from the data's geospatial metadata.
pub const RESOLUTION_Y: &str = "resolution_y";
