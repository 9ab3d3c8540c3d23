use crate::algebra::operand::ComputeMap;
use crate::catalog::{Catalog, get_product_or_fail};
use crate::foundation::datetime::{DateInput, normalize_datetime_or_none};
use crate::foundation::error::{GraftError, GraftResult};
use crate::mosaic::bands::{BandSpec, format_bands, require_bands};
use crate::mosaic::model::{Mosaic, MosaicMetadata};
use crate::mosaic::nodes::{self, ProductSource};
use crate::mosaic::options::MosaicOptions;

fn product_source(
    catalog: &dyn Catalog,
    product_id: &str,
    bands: BandSpec,
    start_datetime: Option<DateInput>,
    end_datetime: Option<DateInput>,
    options: MosaicOptions,
) -> GraftResult<ProductSource> {
    get_product_or_fail(catalog, product_id)?;
    Ok(ProductSource {
        product_id: product_id.to_string(),
        bands: require_bands(format_bands(bands))?,
        start_datetime: normalize_datetime_or_none(start_datetime)?,
        end_datetime: normalize_datetime_or_none(end_datetime)?,
        options,
    })
}

impl Mosaic {
    /// Mosaic of a catalog product's scenes over an optional date range.
    ///
    /// The product must exist in `catalog`. Dates are normalized to UTC timestamps; a deferred
    /// date must be a `Datetime` parameter.
    #[tracing::instrument(skip(catalog, bands, options))]
    pub fn from_product_bands(
        catalog: &dyn Catalog,
        product_id: &str,
        bands: impl Into<BandSpec>,
        start_datetime: Option<DateInput>,
        end_datetime: Option<DateInput>,
        options: MosaicOptions,
    ) -> GraftResult<Mosaic> {
        let source = product_source(
            catalog,
            product_id,
            bands.into(),
            start_datetime,
            end_datetime,
            options,
        )?;
        Ok(Self::from_source(source))
    }

    /// Mosaic of an explicit, ordered list of images. Product metadata is left unset.
    #[tracing::instrument(skip_all)]
    pub fn from_image_ids<I, S>(image_ids: I, bands: impl Into<BandSpec>) -> GraftResult<Mosaic>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let image_ids: Vec<String> = image_ids.into_iter().map(Into::into).collect();
        if image_ids.is_empty() {
            return Err(GraftError::validation("at least one image id must be given"));
        }
        let bands = require_bands(format_bands(bands))?;
        let graft = nodes::create_image_ids_mosaic(&image_ids, &bands);
        Ok(Mosaic::new(graft, MosaicMetadata::with_bands(bands)))
    }

    /// Build from an already validated source description, without a catalog lookup.
    pub(crate) fn from_source(source: ProductSource) -> Mosaic {
        let graft = nodes::create_mosaic(&source);
        let ProductSource {
            product_id,
            bands,
            start_datetime,
            end_datetime,
            ..
        } = source;
        Mosaic::new(
            graft,
            MosaicMetadata {
                bands,
                product_id: Some(product_id),
                start_datetime,
                end_datetime,
            },
        )
    }
}

/// Per-scene image stack of a catalog product, for stack-level computations.
#[tracing::instrument(skip(catalog, bands, options))]
pub fn stack_scenes(
    catalog: &dyn Catalog,
    product_id: &str,
    bands: impl Into<BandSpec>,
    start_datetime: Option<DateInput>,
    end_datetime: Option<DateInput>,
    options: MosaicOptions,
) -> GraftResult<ComputeMap> {
    let source = product_source(
        catalog,
        product_id,
        bands.into(),
        start_datetime,
        end_datetime,
        options,
    )?;
    Ok(ComputeMap::new(nodes::create_stack_scenes(&source)))
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/factory.rs"]
mod tests;
