use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::algebra::operand::Entity;
use crate::algebra::ops::call;
use crate::foundation::error::{GraftError, GraftResult};
use crate::graft::op_kind;

/// Reduction function applied along an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reducer {
    /// Sum.
    Sum,
    /// Arithmetic mean.
    Mean,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
    /// Median.
    Median,
    /// Standard deviation.
    Std,
    /// Product.
    Prod,
}

impl Reducer {
    /// Name emitted into the graft.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Min => "min",
            Self::Max => "max",
            Self::Median => "median",
            Self::Std => "std",
            Self::Prod => "prod",
        }
    }
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reducer {
    type Err = GraftError;

    fn from_str(s: &str) -> GraftResult<Self> {
        Ok(match s {
            "sum" => Self::Sum,
            "mean" => Self::Mean,
            "min" => Self::Min,
            "max" => Self::Max,
            "median" => Self::Median,
            "std" => Self::Std,
            "prod" => Self::Prod,
            other => {
                return Err(GraftError::validation(format!(
                    "unknown reducer '{other}'"
                )));
            }
        })
    }
}

/// Named axis of a raster or image stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The band dimension.
    Bands,
    /// The spatial dimensions.
    Pixels,
    /// The image dimension of a stack.
    Images,
}

impl Axis {
    /// Name emitted into the graft.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bands => "bands",
            Self::Pixels => "pixels",
            Self::Images => "images",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = GraftError;

    fn from_str(s: &str) -> GraftResult<Self> {
        Ok(match s {
            "bands" => Self::Bands,
            "pixels" => Self::Pixels,
            "images" => Self::Images,
            other => return Err(GraftError::validation(format!("unknown axis '{other}'"))),
        })
    }
}

/// Reductions along the axes an entity supports.
pub trait Reduce: Entity {
    /// Axes this entity can be reduced over.
    const REDUCTION_AXES: &'static [Axis];

    /// Reduce along `axis`. Unsupported axes are a not-implemented error.
    fn reduce(&self, reducer: Reducer, axis: Axis) -> GraftResult<Self> {
        if !Self::REDUCTION_AXES.contains(&axis) {
            return Err(GraftError::not_implemented(format!(
                "reduction over {axis} not implemented for {}",
                Self::KIND
            )));
        }
        let mut out = call(
            op_kind::REDUCTION,
            self,
            &[Value::from(reducer.as_str()), Value::from(axis.as_str())],
        );
        out.after_reduction(reducer, axis);
        Ok(out)
    }

    /// Adjust entity metadata after a reduction node was emitted.
    fn after_reduction(&mut self, _reducer: Reducer, _axis: Axis) {}

    /// Sum along `axis`.
    fn sum(&self, axis: Axis) -> GraftResult<Self> {
        self.reduce(Reducer::Sum, axis)
    }

    /// Mean along `axis`.
    fn mean(&self, axis: Axis) -> GraftResult<Self> {
        self.reduce(Reducer::Mean, axis)
    }

    /// Minimum along `axis`.
    fn min(&self, axis: Axis) -> GraftResult<Self> {
        self.reduce(Reducer::Min, axis)
    }

    /// Maximum along `axis`.
    fn max(&self, axis: Axis) -> GraftResult<Self> {
        self.reduce(Reducer::Max, axis)
    }

    /// Median along `axis`.
    fn median(&self, axis: Axis) -> GraftResult<Self> {
        self.reduce(Reducer::Median, axis)
    }

    /// Standard deviation along `axis`.
    fn std(&self, axis: Axis) -> GraftResult<Self> {
        self.reduce(Reducer::Std, axis)
    }
}

impl Reduce for crate::algebra::operand::ComputeMap {
    const REDUCTION_AXES: &'static [Axis] = &[Axis::Bands, Axis::Pixels, Axis::Images];
}

#[cfg(test)]
#[path = "../../tests/unit/algebra/reduction.rs"]
mod tests;
