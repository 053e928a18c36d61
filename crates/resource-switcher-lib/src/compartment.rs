//! One resource's share of a container's volume.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// Immutable description of how much of a container a resource occupies.
///
/// Out-of-range inputs are normalized rather than rejected: the ratio is
/// clamped to `[0, 1]` via `min(1, |ratio|)` and the compression factor to
/// `|compression|`. Non-finite values normalize to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompartmentSpec {
    resource: String,
    ratio: f64,
    compression: f64,
}

impl CompartmentSpec {
    pub fn new(resource: impl Into<String>, ratio: f64, compression: f64) -> Self {
        let resource = resource.into();
        let normalized_ratio = normalize_ratio(ratio);
        let normalized_compression = normalize_compression(compression);
        if normalized_ratio != ratio || normalized_compression != compression {
            warn!(
                resource = %resource,
                ratio,
                compression,
                normalized_ratio,
                normalized_compression,
                "compartment values out of range; clamped"
            );
        }
        Self {
            resource,
            ratio: normalized_ratio,
            compression: normalized_compression,
        }
    }

    /// Compartment with the default compression factor of 1.
    pub fn uncompressed(resource: impl Into<String>, ratio: f64) -> Self {
        Self::new(resource, ratio, 1.0)
    }

    /// Build a compartment from a configuration record.
    ///
    /// Ratio and compression default to 1 when absent. A missing or blank
    /// resource identifier is a configuration error.
    pub fn from_record(record: &CompartmentRecord) -> Result<Self, ConfigError> {
        let resource = record
            .resource
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(ConfigError::MissingField {
                record: "compartment".to_string(),
                field: "resource",
            })?;
        Ok(Self::new(
            resource,
            record.ratio.unwrap_or(1.0),
            record.compression.unwrap_or(1.0),
        ))
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn compression(&self) -> f64 {
        self.compression
    }
}

fn normalize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() {
        ratio.abs().min(1.0)
    } else {
        0.0
    }
}

fn normalize_compression(compression: f64) -> f64 {
    if compression.is_finite() {
        compression.abs()
    } else {
        0.0
    }
}

/// Raw compartment declaration as it appears in switcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompartmentRecord {
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub ratio: Option<f64>,
    #[serde(default)]
    pub compression: Option<f64>,
}

impl CompartmentRecord {
    pub fn new(resource: &str, ratio: f64) -> Self {
        Self {
            resource: Some(resource.to_string()),
            ratio: Some(ratio),
            compression: None,
        }
    }
}
