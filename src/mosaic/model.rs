use crate::algebra::operand::{Entity, EntityKind};
use crate::algebra::reduction::{Axis, Reduce, Reducer};
use crate::foundation::datetime::DateBound;
use crate::graft::graph::Graft;

/// Band and provenance metadata bound to a mosaic graft.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MosaicMetadata {
    /// Output band ordering of the graft root.
    pub bands: Vec<String>,
    /// Source product, unset for image-id mosaics and many derived values.
    pub product_id: Option<String>,
    /// Initial cutoff.
    pub start_datetime: Option<DateBound>,
    /// Final cutoff.
    pub end_datetime: Option<DateBound>,
}

impl MosaicMetadata {
    /// Metadata with only bands set.
    pub fn with_bands(bands: Vec<String>) -> Self {
        Self {
            bands,
            ..Self::default()
        }
    }

    pub(crate) fn replace_bands(&self, bands: Vec<String>) -> Self {
        Self {
            bands,
            ..self.clone()
        }
    }
}

/// Inputs of the general [`Mosaic::from_parts`] constructor.
#[derive(Clone, Debug, Default)]
pub struct MosaicParts {
    /// Output band ordering.
    pub bands: Vec<String>,
    /// Source product.
    pub product_id: Option<String>,
    /// Initial cutoff.
    pub start_datetime: Option<DateBound>,
    /// Final cutoff.
    pub end_datetime: Option<DateBound>,
    /// Explicit image ids; when set they take precedence over product and dates.
    pub image_ids: Option<Vec<String>>,
}

/// A deferred raster: a graft whose root evaluates to a bands x rows x cols array, plus
/// band/product/date metadata.
///
/// Mosaics are immutable. Every transform returns a new mosaic and leaves `self` untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Mosaic {
    graft: Graft,
    metadata: MosaicMetadata,
}

impl Mosaic {
    /// Wrap a graft with metadata.
    pub fn new(graft: Graft, metadata: MosaicMetadata) -> Self {
        Self { graft, metadata }
    }

    /// General constructor.
    ///
    /// When `image_ids` is set, the product id and the date bounds are ignored with a warning.
    pub fn from_parts(graft: Graft, parts: MosaicParts) -> Self {
        let MosaicParts {
            bands,
            mut product_id,
            mut start_datetime,
            mut end_datetime,
            image_ids,
        } = parts;

        if image_ids.as_ref().is_some_and(|ids| !ids.is_empty()) {
            if product_id.is_some() {
                tracing::warn!("Both product_id and image_ids were provided, ignoring product_id");
                product_id = None;
            }
            if start_datetime.is_some() || end_datetime.is_some() {
                tracing::warn!(
                    "Both dates and image_ids were provided, ignoring start_datetime and end_datetime"
                );
                start_datetime = None;
                end_datetime = None;
            }
        }

        Self::new(
            graft,
            MosaicMetadata {
                bands,
                product_id,
                start_datetime,
                end_datetime,
            },
        )
    }

    /// The wrapped graft.
    pub fn graft(&self) -> &Graft {
        &self.graft
    }

    /// Metadata bound to the graft.
    pub fn metadata(&self) -> &MosaicMetadata {
        &self.metadata
    }

    /// Output band names, in order.
    pub fn bands(&self) -> &[String] {
        &self.metadata.bands
    }

    /// Source product id.
    pub fn product_id(&self) -> Option<&str> {
        self.metadata.product_id.as_deref()
    }

    /// Initial cutoff.
    pub fn start_datetime(&self) -> Option<&DateBound> {
        self.metadata.start_datetime.as_ref()
    }

    /// Final cutoff.
    pub fn end_datetime(&self) -> Option<&DateBound> {
        self.metadata.end_datetime.as_ref()
    }

    /// Same metadata over a different graft.
    pub(crate) fn with_graft(&self, graft: Graft) -> Self {
        Self::new(graft, self.metadata.clone())
    }
}

impl Entity for Mosaic {
    const KIND: EntityKind = EntityKind::Mosaic;

    fn graft(&self) -> &Graft {
        &self.graft
    }

    fn metadata(&self) -> Option<&MosaicMetadata> {
        Some(&self.metadata)
    }

    fn from_expression(graft: Graft, metadata: Option<MosaicMetadata>) -> Self {
        Self::new(graft, metadata.unwrap_or_default())
    }
}

impl Reduce for Mosaic {
    const REDUCTION_AXES: &'static [Axis] = &[Axis::Bands];

    fn after_reduction(&mut self, reducer: Reducer, axis: Axis) {
        if axis == Axis::Bands {
            self.metadata.bands = vec![reducer.as_str().to_string()];
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/model.rs"]
mod tests;
