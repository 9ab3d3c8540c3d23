use serde_json::Value;

use crate::algebra::operand::{Entity, Operand};
use crate::foundation::error::{GraftError, GraftResult};
use crate::graft::op_kind;
use crate::mosaic::model::Mosaic;
use crate::mosaic::nodes;

impl Mosaic {
    /// Mask pixels where `mask` is true. `self` is unchanged.
    pub fn mask<M: Entity>(&self, mask: &M) -> Mosaic {
        let graft = nodes::wrap(self.graft(), op_kind::MASK, &[mask.to_operand()], &[]);
        self.with_graft(graft)
    }

    /// Bound values to `[lo, hi]`; `lo < hi` must hold.
    pub fn clip(&self, lo: f64, hi: f64) -> GraftResult<Mosaic> {
        if !(lo < hi) {
            return Err(GraftError::validation(format!(
                "lower bound ({lo}) is not less than upper bound ({hi})"
            )));
        }
        let bounds = [Operand::from(lo), Operand::from(hi)];
        Ok(self.with_graft(nodes::wrap(self.graft(), op_kind::CLIP, &bounds, &[])))
    }

    /// Replace masked pixels with `fill_value`.
    pub fn filled(&self, fill_value: impl Into<Value>) -> Mosaic {
        let fill = [Operand::Literal(fill_value.into())];
        self.with_graft(nodes::wrap(self.graft(), op_kind::FILL_MASK, &fill, &[]))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/pixel.rs"]
mod tests;
