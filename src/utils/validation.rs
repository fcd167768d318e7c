//! Checks shared by the TOML and command-line front-ends.

use crate::config::SourceSpec;
use crate::utils::error::{DebateError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> DebateError {
    DebateError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The margin is a difference of two confidences, so it stays within [0, 1].
pub fn validate_margin(field: &str, margin: f64) -> Result<()> {
    // NaN is outside every range
    if !(0.0..=1.0).contains(&margin) {
        return Err(invalid(field, margin, "Judge margin must be between 0 and 1"));
    }
    Ok(())
}

pub fn validate_interval_ms(field: &str, interval_ms: u64) -> Result<()> {
    if interval_ms == 0 {
        return Err(invalid(field, interval_ms, "Trigger interval must be at least 1 ms"));
    }
    Ok(())
}

pub fn require<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str> {
    value.as_deref().ok_or_else(|| DebateError::MissingConfigError {
        field: field.to_string(),
    })
}

/// Candidate and job ids are passed verbatim to the data source.
pub fn validate_record_id(field: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(invalid(field, id, "Record id cannot be empty or whitespace-only"));
    }
    Ok(())
}

/// Fixture paths must be usable file names, REST endpoints plain http(s) URLs.
pub fn validate_source(spec: &SourceSpec, path_field: &str, endpoint_field: &str) -> Result<()> {
    match spec {
        SourceSpec::Fixture { path } => {
            if path.is_empty() || path.contains('\0') {
                return Err(invalid(path_field, path, "Fixture path must be a non-empty file name"));
            }
            Ok(())
        }
        SourceSpec::Rest { endpoint, .. } => match Url::parse(endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(url) => Err(invalid(
                endpoint_field,
                endpoint,
                format!("Unsupported URL scheme: {}", url.scheme()),
            )),
            Err(e) => Err(invalid(endpoint_field, endpoint, format!("Invalid URL format: {}", e))),
        },
    }
}
