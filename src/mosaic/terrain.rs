use crate::algebra::operand::ComputeMap;
use crate::algebra::traits::Exponentiate;
use crate::algebra::ufunc::{PI, arctan, arctan2, sqrt};
use crate::mosaic::model::Mosaic;
use crate::rewrite::derivative;

/// Pixel size used to scale a finite difference.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// Fixed ground distance per pixel.
    Value(f64),
    /// Deferred resolution expression.
    Map(ComputeMap),
}

impl From<f64> for Resolution {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

impl From<ComputeMap> for Resolution {
    fn from(m: ComputeMap) -> Self {
        Self::Map(m)
    }
}

fn scaled(difference: Mosaic, resolution: Resolution) -> Mosaic {
    match resolution {
        Resolution::Value(v) => difference / v,
        Resolution::Map(m) => difference / m,
    }
}

impl Mosaic {
    /// East-west gradient. Without a resolution the data's own pixel size is used.
    pub fn gradient_x(&self, resolution: Option<Resolution>) -> Mosaic {
        let resolution = resolution
            .unwrap_or_else(|| ComputeMap::new(derivative::resolution_graft_x()).into());
        scaled(
            self.with_graft(derivative::gradient_x(self.graft())),
            resolution,
        )
    }

    /// North-south gradient. Without a resolution the data's own pixel size is used.
    pub fn gradient_y(&self, resolution: Option<Resolution>) -> Mosaic {
        let resolution = resolution
            .unwrap_or_else(|| ComputeMap::new(derivative::resolution_graft_y()).into());
        scaled(
            self.with_graft(derivative::gradient_y(self.graft())),
            resolution,
        )
    }

    /// Slope in degrees from horizontal.
    pub fn slope(
        &self,
        resolution_x: Option<Resolution>,
        resolution_y: Option<Resolution>,
    ) -> Mosaic {
        let gx = self.gradient_x(resolution_x);
        let gy = self.gradient_y(resolution_y);
        arctan(&sqrt(&(gx.pow(2_i32) + gy.pow(2_i32)))) * (180.0 / PI)
    }

    /// Aspect in degrees, `arctan2(gx, -gy)`.
    pub fn aspect(
        &self,
        resolution_x: Option<Resolution>,
        resolution_y: Option<Resolution>,
    ) -> Mosaic {
        let gx = self.gradient_x(resolution_x);
        let gy = self.gradient_y(resolution_y);
        arctan2(&gx, -&gy) * (180.0 / PI)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/terrain.rs"]
mod tests;
