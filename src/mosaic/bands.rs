use crate::foundation::error::{GraftError, GraftResult};

/// Band names as a caller supplies them: one space-delimited string or a list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BandSpec {
    /// Space-delimited names, e.g. `"red green blue"`.
    Joined(String),
    /// Explicit names, each may itself contain spaces.
    List(Vec<String>),
}

impl From<&str> for BandSpec {
    fn from(s: &str) -> Self {
        Self::Joined(s.to_string())
    }
}

impl From<String> for BandSpec {
    fn from(s: String) -> Self {
        Self::Joined(s)
    }
}

impl From<Vec<String>> for BandSpec {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

impl From<&[String]> for BandSpec {
    fn from(v: &[String]) -> Self {
        Self::List(v.to_vec())
    }
}

impl From<Vec<&str>> for BandSpec {
    fn from(v: Vec<&str>) -> Self {
        Self::List(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for BandSpec {
    fn from(v: &[&str]) -> Self {
        Self::List(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for BandSpec {
    fn from(v: [&str; N]) -> Self {
        Self::List(v.iter().map(|s| s.to_string()).collect())
    }
}

/// Ordered band names. List entries are split on whitespace as well, so
/// `["red green", "blue"]` and `"red green blue"` agree.
pub fn format_bands(spec: impl Into<BandSpec>) -> Vec<String> {
    match spec.into() {
        BandSpec::Joined(s) => s.split_whitespace().map(str::to_string).collect(),
        BandSpec::List(v) => v
            .iter()
            .flat_map(|s| s.split_whitespace())
            .map(str::to_string)
            .collect(),
    }
}

/// Canonical space-delimited form.
pub fn join_bands(bands: &[String]) -> String {
    bands.join(" ")
}

pub(crate) fn require_bands(bands: Vec<String>) -> GraftResult<Vec<String>> {
    if bands.is_empty() {
        return Err(GraftError::validation("at least one band must be given"));
    }
    Ok(bands)
}

/// `selected` must be a non-strict subset of `available`.
pub(crate) fn require_subset(selected: &[String], available: &[String]) -> GraftResult<()> {
    if selected.iter().all(|b| available.contains(b)) {
        return Ok(());
    }
    Err(GraftError::validation(format!(
        "selected bands {selected:?} are not a subset of the mosaic bands {available:?}"
    )))
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/bands.rs"]
mod tests;
