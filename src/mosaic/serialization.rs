use crate::foundation::datetime::DateBound;
use crate::foundation::error::{GraftError, GraftResult};
use crate::graft::graph::Graft;
use crate::graft::node::ParamType;
use crate::mosaic::bands::{BandSpec, format_bands};
use crate::mosaic::model::{Mosaic, MosaicMetadata};

/// Persisted form of a [`Mosaic`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MosaicRecord {
    /// The full graft, including `returns` and `cache_id`.
    pub graft: Graft,
    /// Source product.
    #[serde(default)]
    pub product_id: Option<String>,
    /// Band names; read from either a list or a space-delimited string.
    #[serde(deserialize_with = "bands_from_either")]
    pub bands: Vec<String>,
    /// Initial cutoff.
    #[serde(default)]
    pub start_datetime: Option<DateBound>,
    /// Final cutoff.
    #[serde(default)]
    pub end_datetime: Option<DateBound>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum BandsField {
    Joined(String),
    List(Vec<String>),
}

fn bands_from_either<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    let spec = match <BandsField as serde::Deserialize>::deserialize(deserializer)? {
        BandsField::Joined(s) => BandSpec::Joined(s),
        BandsField::List(v) => BandSpec::List(v),
    };
    Ok(format_bands(spec))
}

impl From<&Mosaic> for MosaicRecord {
    fn from(m: &Mosaic) -> Self {
        let metadata = m.metadata().clone();
        Self {
            graft: m.graft().clone(),
            product_id: metadata.product_id,
            bands: metadata.bands,
            start_datetime: metadata.start_datetime,
            end_datetime: metadata.end_datetime,
        }
    }
}

/// A deferred bound must name a `Datetime` parameter of the graft.
fn check_bound(graft: &Graft, field: &str, bound: Option<&DateBound>) -> GraftResult<()> {
    let Some(DateBound::Parameter(name)) = bound else {
        return Ok(());
    };
    let declared = graft
        .parameters()
        .into_iter()
        .any(|p| &p.name == name && p.param_type == ParamType::Datetime);
    if declared {
        Ok(())
    } else {
        Err(GraftError::validation(format!(
            "{field} '{name}' is neither a timestamp nor a Datetime parameter of the graft"
        )))
    }
}

impl TryFrom<MosaicRecord> for Mosaic {
    type Error = GraftError;

    fn try_from(r: MosaicRecord) -> GraftResult<Self> {
        check_bound(&r.graft, "start_datetime", r.start_datetime.as_ref())?;
        check_bound(&r.graft, "end_datetime", r.end_datetime.as_ref())?;
        Ok(Mosaic::new(
            r.graft,
            MosaicMetadata {
                bands: r.bands,
                product_id: r.product_id,
                start_datetime: r.start_datetime,
                end_datetime: r.end_datetime,
            },
        ))
    }
}

impl Mosaic {
    /// JSON text of the persisted record.
    pub fn serialize(&self) -> GraftResult<String> {
        Ok(serde_json::to_string(&MosaicRecord::from(self))?)
    }

    /// Restore a mosaic from [`Mosaic::serialize`] output.
    ///
    /// The embedded graft is rebuilt on the way in, so its keys and cache id are derived from
    /// its structure and never taken from the text. A date bound that is not a timestamp must
    /// name a `Datetime` parameter of the graft.
    #[tracing::instrument(skip_all, fields(len = data.len()))]
    pub fn deserialize(data: &str) -> GraftResult<Mosaic> {
        let record: MosaicRecord = serde_json::from_str(data)?;
        Mosaic::try_from(record)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/serialization.rs"]
mod tests;
