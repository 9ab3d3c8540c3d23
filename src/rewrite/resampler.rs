use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::foundation::error::{GraftError, GraftResult};
use crate::graft::graph::Graft;
use crate::graft::op_kind;
use crate::rewrite::kwarg::update_kwarg;

/// Pixel resampling algorithm applied when a source is warped onto the output grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleAlgorithm {
    /// Nearest neighbour.
    Near,
    /// Bilinear.
    Bilinear,
    /// Cubic convolution.
    Cubic,
    /// Cubic spline.
    CubicSpline,
    /// Lanczos windowed sinc.
    Lanczos,
    /// Mean of contributing pixels.
    Average,
    /// Most frequent value.
    Mode,
    /// Maximum.
    Max,
    /// Minimum.
    Min,
    /// Median.
    Med,
    /// First quartile.
    Q1,
    /// Third quartile.
    Q3,
}

impl ResampleAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [Self; 12] = [
        Self::Near,
        Self::Bilinear,
        Self::Cubic,
        Self::CubicSpline,
        Self::Lanczos,
        Self::Average,
        Self::Mode,
        Self::Max,
        Self::Min,
        Self::Med,
        Self::Q1,
        Self::Q3,
    ];

    /// Name emitted into the graft.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Near => "near",
            Self::Bilinear => "bilinear",
            Self::Cubic => "cubic",
            Self::CubicSpline => "cubicspline",
            Self::Lanczos => "lanczos",
            Self::Average => "average",
            Self::Mode => "mode",
            Self::Max => "max",
            Self::Min => "min",
            Self::Med => "med",
            Self::Q1 => "q1",
            Self::Q3 => "q3",
        }
    }
}

impl fmt::Display for ResampleAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResampleAlgorithm {
    type Err = GraftError;

    fn from_str(s: &str) -> GraftResult<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                GraftError::validation(format!("'{s}' is not a valid resample algorithm"))
            })
    }
}

/// Point every resampler-bearing node (`mosaic`, `stack_scenes`) at `resampler`.
///
/// Nodes that did not carry a resampler get one. All other nodes and arguments are kept.
#[tracing::instrument(skip(graft), fields(nodes = graft.len()))]
pub fn update_resampler(graft: &Graft, resampler: ResampleAlgorithm) -> GraftResult<Graft> {
    update_kwarg(
        graft,
        &op_kind::RESAMPLER_BEARING,
        op_kind::RESAMPLER_KWARG,
        Value::from(resampler.as_str()),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/rewrite/resampler.rs"]
mod tests;
