use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::foundation::error::{GraftError, GraftResult};
use crate::graft::node::{ParamType, Parameter};

/// Caller-facing date bound accepted by mosaic factories.
#[derive(Clone, Debug, PartialEq)]
pub enum DateInput {
    /// Text in RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]`, `YYYY-MM-DD HH:MM:SS`, or `YYYY-MM-DD` form.
    Text(String),
    /// Calendar date, taken as midnight UTC.
    Date(NaiveDate),
    /// Instant in UTC.
    DateTime(DateTime<Utc>),
    /// Deferred parameter; must be declared as [`ParamType::Datetime`].
    Parameter(Parameter),
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(t: DateTime<Utc>) -> Self {
        Self::DateTime(t)
    }
}

impl From<Parameter> for DateInput {
    fn from(p: Parameter) -> Self {
        Self::Parameter(p)
    }
}

/// Normalized date bound stored on a mosaic and baked into its graft.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DateBound {
    /// Fixed instant.
    Instant(DateTime<Utc>),
    /// Name of a deferred `Datetime` parameter.
    Parameter(String),
}

impl DateBound {
    /// Canonical text: RFC 3339 with a `Z` suffix, or the parameter name.
    pub fn to_canonical_string(&self) -> String {
        match self {
            Self::Instant(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Self::Parameter(name) => name.clone(),
        }
    }

    /// Parameter declaration when this bound is deferred.
    pub fn as_parameter(&self) -> Option<Parameter> {
        match self {
            Self::Parameter(name) => Some(Parameter::datetime(name.clone())),
            Self::Instant(_) => None,
        }
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl serde::Serialize for DateBound {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

impl<'de> serde::Deserialize<'de> for DateBound {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match parse_timestamp(&s) {
            Some(t) => Self::Instant(t),
            None => Self::Parameter(s),
        })
    }
}

/// Parse the accepted textual timestamp forms into UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

/// Normalize an optional date bound.
///
/// Text that does not parse is a validation error, as is a parameter of any type other than
/// [`ParamType::Datetime`].
pub fn normalize_datetime_or_none(input: Option<DateInput>) -> GraftResult<Option<DateBound>> {
    let Some(input) = input else {
        return Ok(None);
    };
    let bound = match input {
        DateInput::Text(s) => DateBound::Instant(parse_timestamp(&s).ok_or_else(|| {
            GraftError::validation(format!("'{s}' is not a recognized date or timestamp"))
        })?),
        DateInput::Date(d) => DateBound::Instant(
            d.and_hms_opt(0, 0, 0)
                .ok_or_else(|| GraftError::validation(format!("'{d}' has no midnight")))?
                .and_utc(),
        ),
        DateInput::DateTime(t) => DateBound::Instant(t),
        DateInput::Parameter(p) => {
            if p.param_type != ParamType::Datetime {
                return Err(GraftError::validation(format!(
                    "parameters for dates must be {}, not {} (parameter '{}')",
                    ParamType::Datetime,
                    p.param_type,
                    p.name
                )));
            }
            DateBound::Parameter(p.name)
        }
    };
    Ok(Some(bound))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/datetime.rs"]
mod tests;
