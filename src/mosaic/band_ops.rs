use crate::foundation::error::{GraftError, GraftResult};
use crate::graft::op_kind;
use crate::mosaic::bands::{BandSpec, format_bands, require_bands, require_subset};
use crate::mosaic::model::Mosaic;
use crate::mosaic::nodes::{self, ProductSource};

/// Result of [`Mosaic::unpack_bands`]: a single mosaic for one band, one per band otherwise.
#[derive(Clone, Debug, PartialEq)]
pub enum UnpackedBands {
    /// Exactly one band was requested.
    One(Mosaic),
    /// One single-band mosaic per requested band, in order.
    Many(Vec<Mosaic>),
}

impl UnpackedBands {
    /// Number of mosaics.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(v) => v.len(),
        }
    }

    /// Never true; present for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a list.
    pub fn into_vec(self) -> Vec<Mosaic> {
        match self {
            Self::One(m) => vec![m],
            Self::Many(v) => v,
        }
    }
}

/// Right-hand side of [`Mosaic::concat_bands`].
#[derive(Clone, Debug)]
pub enum ConcatOperand {
    /// Another mosaic.
    Mosaic(Mosaic),
    /// Bands selected from the receiving mosaic.
    Bands(BandSpec),
}

impl From<Mosaic> for ConcatOperand {
    fn from(m: Mosaic) -> Self {
        Self::Mosaic(m)
    }
}

impl From<&Mosaic> for ConcatOperand {
    fn from(m: &Mosaic) -> Self {
        Self::Mosaic(m.clone())
    }
}

impl From<BandSpec> for ConcatOperand {
    fn from(b: BandSpec) -> Self {
        Self::Bands(b)
    }
}

impl From<&str> for ConcatOperand {
    fn from(s: &str) -> Self {
        Self::Bands(s.into())
    }
}

impl From<Vec<&str>> for ConcatOperand {
    fn from(v: Vec<&str>) -> Self {
        Self::Bands(v.into())
    }
}

impl From<Vec<String>> for ConcatOperand {
    fn from(v: Vec<String>) -> Self {
        Self::Bands(v.into())
    }
}

impl<const N: usize> From<[&str; N]> for ConcatOperand {
    fn from(v: [&str; N]) -> Self {
        Self::Bands(v.into())
    }
}

impl Mosaic {
    /// Select `bands`, in the order given.
    ///
    /// The selection must be a subset of the current bands. A mosaic whose root is a product
    /// `mosaic` node is re-derived with the narrowed band list instead of being wrapped, which
    /// keeps the graft shallow.
    #[tracing::instrument(skip_all, fields(current = ?self.bands()))]
    pub fn pick_bands(&self, bands: impl Into<BandSpec>) -> GraftResult<Mosaic> {
        let bands = require_bands(format_bands(bands))?;
        // An empty band list means the bands of this graft are not known.
        if !self.bands().is_empty() {
            require_subset(&bands, self.bands())?;
        }

        if let Some(source) = nodes::product_source_of(self.graft()) {
            require_subset(&bands, &source.bands)?;
            tracing::debug!(product_id = %source.product_id, "re-deriving mosaic node");
            return Ok(Mosaic::from_source(ProductSource { bands, ..source }));
        }

        let graft = nodes::band_op(self.graft(), op_kind::PICK_BANDS, Some(&bands), None);
        Ok(Mosaic::new(graft, self.metadata().replace_bands(bands)))
    }

    /// Split into single-band mosaics.
    pub fn unpack_bands(&self, bands: impl Into<BandSpec>) -> GraftResult<UnpackedBands> {
        let bands = require_bands(format_bands(bands))?;
        if let [band] = bands.as_slice() {
            return Ok(UnpackedBands::One(self.pick_bands(vec![band.clone()])?));
        }
        bands
            .into_iter()
            .map(|band| self.pick_bands(vec![band]))
            .collect::<GraftResult<Vec<_>>>()
            .map(UnpackedBands::Many)
    }

    /// Rename every band; the new list must have the same length.
    pub fn rename_bands(&self, bands: impl Into<BandSpec>) -> GraftResult<Mosaic> {
        let bands = require_bands(format_bands(bands))?;
        if !self.bands().is_empty() && bands.len() != self.bands().len() {
            return Err(GraftError::validation(format!(
                "cannot rename {} bands {:?} to {} bands {bands:?}",
                self.bands().len(),
                self.bands(),
                bands.len()
            )));
        }
        let graft = nodes::band_op(self.graft(), op_kind::RENAME_BANDS, Some(&bands), None);
        Ok(Mosaic::new(graft, self.metadata().replace_bands(bands)))
    }

    /// Stack the bands of `other` after the bands of `self`.
    ///
    /// Band names select from `self` first, so they must be a subset of its bands.
    pub fn concat_bands(&self, other: impl Into<ConcatOperand>) -> GraftResult<Mosaic> {
        let other = match other.into() {
            ConcatOperand::Mosaic(m) => m,
            ConcatOperand::Bands(b) => self.pick_bands(b)?,
        };
        let graft = nodes::band_op(
            self.graft(),
            op_kind::CONCAT_BANDS,
            None,
            Some(other.graft()),
        );
        let mut bands = self.bands().to_vec();
        bands.extend_from_slice(other.bands());
        Ok(Mosaic::new(graft, self.metadata().replace_bands(bands)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/band_ops.rs"]
mod tests;
