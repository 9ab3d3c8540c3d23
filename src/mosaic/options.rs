use std::collections::BTreeMap;

use serde_json::Value;

use crate::foundation::error::{GraftError, GraftResult};
use crate::graft::{CACHE_ID_KEY, op_kind};
use crate::rewrite::resampler::ResampleAlgorithm;

/// Keyword names the factory derives itself.
const RESERVED: [&str; 3] = ["start_datetime", "end_datetime", CACHE_ID_KEY];

/// Extra keyword options baked into a mosaic construction node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MosaicOptions {
    resampler: Option<ResampleAlgorithm>,
    extra: BTreeMap<String, Value>,
}

impl MosaicOptions {
    /// No options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resampling algorithm.
    pub fn with_resampler(mut self, resampler: ResampleAlgorithm) -> Self {
        self.resampler = Some(resampler);
        self
    }

    /// Add a keyword option.
    ///
    /// `resampler` must name a valid algorithm. The date bounds and `cache_id` are derived by
    /// the factory and cannot be set here.
    pub fn with_option(mut self, name: &str, value: impl Into<Value>) -> GraftResult<Self> {
        self.insert(name, value.into())?;
        Ok(self)
    }

    /// Selected resampler, if any.
    pub fn resampler(&self) -> Option<ResampleAlgorithm> {
        self.resampler
    }

    /// Options other than the resampler.
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    fn insert(&mut self, name: &str, value: Value) -> GraftResult<()> {
        if RESERVED.contains(&name) {
            return Err(GraftError::validation(format!(
                "'{name}' cannot be passed as a mosaic option"
            )));
        }
        if name == op_kind::RESAMPLER_KWARG {
            let Some(s) = value.as_str() else {
                return Err(GraftError::validation(format!(
                    "resampler must be a string, got {value}"
                )));
            };
            self.resampler = Some(s.parse()?);
            return Ok(());
        }
        self.extra.insert(name.to_string(), value);
        Ok(())
    }

    /// Keyword literals as written into the node.
    pub(crate) fn to_kwargs(&self) -> BTreeMap<String, Value> {
        let mut out = self.extra.clone();
        if let Some(r) = self.resampler {
            out.insert(op_kind::RESAMPLER_KWARG.to_string(), Value::from(r.as_str()));
        }
        out
    }

    /// Recover options from node keyword literals; `cache_id` is dropped.
    pub(crate) fn from_kwargs(kwargs: BTreeMap<String, Value>) -> GraftResult<Self> {
        let mut options = Self::default();
        for (name, value) in kwargs {
            if name == CACHE_ID_KEY {
                continue;
            }
            options.insert(&name, value)?;
        }
        Ok(options)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/options.rs"]
mod tests;
