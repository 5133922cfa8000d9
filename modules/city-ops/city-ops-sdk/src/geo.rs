//! Geographic point exchanged as a GeoJSON `Point`.

use serde::{Deserialize, Serialize};

use crate::error::CityOpsError;

const POINT: &str = "Point";

/// WGS84 coordinate pair. Only constructible with in-range values.
///
/// Wire form: `{"type": "Point", "coordinates": [lng, lat]}`, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoJsonPoint", into = "GeoJsonPoint")]
pub struct GeoPoint {
    lng: f64,
    lat: f64,
}

impl GeoPoint {
    /// # Errors
    /// `OutOfRange` when longitude is outside [-180, 180] or latitude outside [-90, 90].
    pub fn new(lng: f64, lat: f64) -> Result<Self, CityOpsError> {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CityOpsError::out_of_range(
                "location",
                format!("longitude {lng} is outside [-180, 180]"),
            ));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CityOpsError::out_of_range(
                "location",
                format!("latitude {lat} is outside [-90, 90]"),
            ));
        }
        Ok(Self { lng, lat })
    }

    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }

    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }
}

/// GeoJSON representation of [`GeoPoint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonPoint {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

fn point_type() -> String {
    POINT.to_owned()
}

impl TryFrom<GeoJsonPoint> for GeoPoint {
    type Error = CityOpsError;

    fn try_from(value: GeoJsonPoint) -> Result<Self, Self::Error> {
        if value.kind != POINT {
            return Err(CityOpsError::out_of_range(
                "location",
                format!("geometry type must be 'Point', got '{}'", value.kind),
            ));
        }
        match value.coordinates.as_slice() {
            [lng, lat] => Self::new(*lng, *lat),
            other => Err(CityOpsError::out_of_range(
                "location",
                format!("coordinates must hold exactly 2 numbers, got {}", other.len()),
            )),
        }
    }
}

impl From<GeoPoint> for GeoJsonPoint {
    fn from(p: GeoPoint) -> Self {
        Self {
            kind: point_type(),
            coordinates: vec![p.lng, p.lat],
        }
    }
}
