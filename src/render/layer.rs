use std::collections::BTreeMap;

use serde_json::Value;

use crate::algebra::operand::{ComputeMap, Entity};
use crate::foundation::error::{GraftError, GraftResult};
use crate::graft::node::Parameter;
use crate::mosaic::model::Mosaic;

/// Per-band display scaling as supplied by a caller.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleSpec {
    /// One `[low, high]` pair; only valid for a one-band mosaic.
    Pair(Vec<f64>),
    /// One `[low, high]` pair per band.
    PerBand(Vec<Vec<f64>>),
}

/// Options controlling how a tile layer shows a mosaic.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VisualizationParams {
    /// Validated `[low, high]` per band. Unset scales each tile to its own range.
    pub scales: Option<Vec<[f64; 2]>>,
    /// Colormap name; single-band mosaics only.
    pub colormap: Option<String>,
    /// Draw a checkerboard under missing or masked data.
    pub checkerboard: bool,
    /// Class descriptions for classified layers.
    pub classes: Option<Vec<Value>>,
    /// Value range for a classified or colormapped legend.
    pub val_range: Option<[f64; 2]>,
    /// Band used as the alpha channel.
    pub alpha: Option<String>,
}

impl Default for VisualizationParams {
    fn default() -> Self {
        Self {
            scales: None,
            colormap: None,
            checkerboard: true,
            classes: None,
            val_range: None,
            alpha: None,
        }
    }
}

/// Opaque handle to an interactive control owned by the rendering collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkedValue {
    /// Identifier of the control.
    pub id: String,
    /// Value at the time the layer is created.
    pub current: Value,
}

/// Runtime value supplied for a named parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterOverride {
    /// Fixed JSON value.
    Literal(Value),
    /// Deferred expression; it may not depend on parameters itself.
    Graph(ComputeMap),
    /// Value observed from an external control; the renderer re-evaluates on change.
    Linked(LinkedValue),
}

impl From<Value> for ParameterOverride {
    fn from(v: Value) -> Self {
        Self::Literal(v)
    }
}

impl From<ComputeMap> for ParameterOverride {
    fn from(m: ComputeMap) -> Self {
        Self::Graph(m)
    }
}

impl From<LinkedValue> for ParameterOverride {
    fn from(l: LinkedValue) -> Self {
        Self::Linked(l)
    }
}

/// Everything the rendering collaborator needs to turn a mosaic into map tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayerSpec {
    /// Mosaic to render.
    pub mosaic: Mosaic,
    /// Layer name.
    pub name: Option<String>,
    /// Display options.
    pub visualization: VisualizationParams,
    /// Minimum level of computation diagnostics forwarded to the caller.
    pub log_level: tracing::Level,
    /// Values for parameters the mosaic depends on.
    pub parameter_overrides: BTreeMap<String, ParameterOverride>,
}

/// Implemented by the service that renders layers.
pub trait Renderer {
    /// Handle to a created layer.
    type Layer;

    /// Create a layer from a validated spec.
    fn create_layer(&self, spec: TileLayerSpec) -> anyhow::Result<Self::Layer>;
}

/// Check `scales` against a mosaic with `band_count` bands.
pub fn validate_scales(scales: ScaleSpec, band_count: usize) -> GraftResult<Vec<[f64; 2]>> {
    let pairs = match scales {
        ScaleSpec::Pair(pair) if band_count == 1 => vec![pair],
        ScaleSpec::Pair(_) => {
            return Err(GraftError::validation(format!(
                "a single scale pair only applies to one band, the mosaic has {band_count}"
            )));
        }
        ScaleSpec::PerBand(pairs) => pairs,
    };
    if pairs.len() != band_count {
        return Err(GraftError::validation(format!(
            "expected {band_count} scales, one per band, got {}",
            pairs.len()
        )));
    }
    pairs
        .into_iter()
        .map(|pair| match pair.as_slice() {
            [lo, hi] => Ok([*lo, *hi]),
            _ => Err(GraftError::validation(
                "each entry in scales must have a min and max",
            )),
        })
        .collect()
}

/// Builder for [`TileLayerSpec`].
#[derive(Clone, Debug)]
pub struct TileLayerBuilder {
    mosaic: Mosaic,
    name: Option<String>,
    scales: Option<ScaleSpec>,
    visualization: VisualizationParams,
    log_level: tracing::Level,
    parameter_overrides: BTreeMap<String, ParameterOverride>,
}

impl TileLayerBuilder {
    /// Start a layer for `mosaic` with default display options.
    pub fn new(mosaic: Mosaic) -> Self {
        Self {
            mosaic,
            name: None,
            scales: None,
            visualization: VisualizationParams::default(),
            log_level: tracing::Level::DEBUG,
            parameter_overrides: BTreeMap::new(),
        }
    }

    /// Layer name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display scaling, checked against the band count on build.
    pub fn scales(mut self, scales: ScaleSpec) -> Self {
        self.scales = Some(scales);
        self
    }

    /// Colormap name.
    pub fn colormap(mut self, colormap: impl Into<String>) -> Self {
        self.visualization.colormap = Some(colormap.into());
        self
    }

    /// Toggle the checkerboard under masked data.
    pub fn checkerboard(mut self, checkerboard: bool) -> Self {
        self.visualization.checkerboard = checkerboard;
        self
    }

    /// Class descriptions.
    pub fn classes(mut self, classes: Vec<Value>) -> Self {
        self.visualization.classes = Some(classes);
        self
    }

    /// Legend value range.
    pub fn val_range(mut self, lo: f64, hi: f64) -> Self {
        self.visualization.val_range = Some([lo, hi]);
        self
    }

    /// Band to use as alpha.
    pub fn alpha(mut self, band: impl Into<String>) -> Self {
        self.visualization.alpha = Some(band.into());
        self
    }

    /// Minimum diagnostics level.
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = level;
        self
    }

    /// Override the runtime value of parameter `name`.
    pub fn parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<ParameterOverride>,
    ) -> Self {
        self.parameter_overrides.insert(name.into(), value.into());
        self
    }

    /// Validate and produce the spec.
    pub fn build(self) -> GraftResult<TileLayerSpec> {
        let Self {
            mosaic,
            name,
            scales,
            mut visualization,
            log_level,
            parameter_overrides,
        } = self;
        let bands = mosaic.bands();

        if let Some(scales) = scales {
            visualization.scales = Some(validate_scales(scales, bands.len())?);
        }
        if visualization.colormap.is_some() && bands.len() != 1 {
            return Err(GraftError::validation(format!(
                "a colormap can only be applied to a single band, the mosaic has {}",
                bands.len()
            )));
        }
        if let Some(alpha) = &visualization.alpha {
            if !bands.contains(alpha) {
                return Err(GraftError::validation(format!(
                    "alpha band '{alpha}' is not one of the mosaic bands {bands:?}"
                )));
            }
        }

        let declared: Vec<&Parameter> = mosaic.graft().parameters();
        for (param, value) in &parameter_overrides {
            if !declared.iter().any(|p| &p.name == param) {
                return Err(GraftError::validation(format!(
                    "'{param}' is not a parameter of this mosaic"
                )));
            }
            if let ParameterOverride::Graph(g) = value {
                if !g.graft().parameters().is_empty() {
                    return Err(GraftError::validation(format!(
                        "value for parameter '{param}' cannot depend on other parameters"
                    )));
                }
            }
        }

        Ok(TileLayerSpec {
            mosaic,
            name,
            visualization,
            log_level,
            parameter_overrides,
        })
    }

    /// Validate and hand the spec to `renderer`.
    #[tracing::instrument(skip_all, fields(name = ?self.name))]
    pub fn render<R: Renderer>(self, renderer: &R) -> GraftResult<R::Layer> {
        Ok(renderer.create_layer(self.build()?)?)
    }
}

impl Mosaic {
    /// Start a tile layer for this mosaic.
    pub fn tile_layer(&self) -> TileLayerBuilder {
        TileLayerBuilder::new(self.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
