#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! WGS84 coordinates and straight-line (great-circle) distance.
//!
//! Every location that enters a relief-ops registry passes through
//! [`Coordinate::validate`] first, so the distance math in this crate may
//! assume finite, in-range inputs. Routing over road networks is out of
//! scope — dispatch ranking uses Haversine distance only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius in kilometers, as used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Which half of a coordinate pair a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// North/south component, valid in [-90, 90] degrees.
    Latitude,
    /// East/west component, valid in [-180, 180] degrees.
    Longitude,
}

impl Axis {
    /// Returns the inclusive valid degree range for this axis.
    #[must_use]
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::Latitude => (-90.0, 90.0),
            Self::Longitude => (-180.0, 180.0),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latitude => write!(f, "latitude"),
            Self::Longitude => write!(f, "longitude"),
        }
    }
}

/// Errors from coordinate validation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude or longitude is NaN or infinite.
    #[error("{axis} must be finite, got {value}")]
    NotFinite {
        /// Axis holding the invalid value.
        axis: Axis,
        /// The offending value.
        value: f64,
    },

    /// Value is finite but outside the valid degree range for its axis.
    #[error("{axis} {value} is outside [{}, {}]", .axis.bounds().0, .axis.bounds().1)]
    OutOfRange {
        /// Axis holding the invalid value.
        axis: Axis,
        /// The offending value.
        value: f64,
    },
}

/// A latitude/longitude pair in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, valid in [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, valid in [-180, 180].
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate without validating it. Call [`Self::validate`]
    /// before storing the value or feeding it to [`distance_km`].
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Checks that both components are finite and within their axis ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::NotFinite`] for NaN/infinite components
    /// and [`CoordinateError::OutOfRange`] for finite components outside
    /// [-90, 90] latitude or [-180, 180] longitude. Latitude is checked
    /// first.
    pub fn validate(self) -> Result<(), CoordinateError> {
        validate_axis(Axis::Latitude, self.lat)?;
        validate_axis(Axis::Longitude, self.lng)?;
        Ok(())
    }

    /// Returns `true` when [`Self::validate`] would succeed.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.validate().is_ok()
    }
}

fn validate_axis(axis: Axis, value: f64) -> Result<(), CoordinateError> {
    if !value.is_finite() {
        return Err(CoordinateError::NotFinite { axis, value });
    }
    let (min, max) = axis.bounds();
    if value < min || value > max {
        return Err(CoordinateError::OutOfRange { axis, value });
    }
    Ok(())
}

/// Great-circle distance between two coordinates in kilometers (Haversine).
///
/// Commutative, zero for identical points, and monotonic in angular
/// separation. Assumes validated input; NaN propagates if callers skip
/// [`Coordinate::validate`].
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const MUMBAI: Coordinate = Coordinate::new(19.076, 72.8777);
    const PUNE: Coordinate = Coordinate::new(18.5204, 73.8567);

    #[test]
    fn known_city_pair_distance() {
        let d = distance_km(MUMBAI, PUNE);
        assert!((119.0..122.0).contains(&d), "Mumbai-Pune was {d} km");
    }

    #[test]
    fn distance_is_commutative() {
        assert!((distance_km(MUMBAI, PUNE) - distance_km(PUNE, MUMBAI)).abs() < 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert!(distance_km(MUMBAI, MUMBAI).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_grows_with_separation() {
        let near = Coordinate::new(19.1, 72.9);
        let far = Coordinate::new(19.5, 73.3);
        assert!(distance_km(MUMBAI, near) < distance_km(MUMBAI, far));
    }

    #[test]
    fn antipodal_distance_is_half_circumference() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let d = distance_km(a, b);
        let half = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half).abs() < 0.5, "antipodal was {d} km");
    }

    #[test]
    fn validate_accepts_boundary_values() {
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(Coordinate::new(0.0, 0.0).is_valid());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert_eq!(
            Coordinate::new(90.1, 0.0).validate(),
            Err(CoordinateError::OutOfRange {
                axis: Axis::Latitude,
                value: 90.1
            })
        );
        assert_eq!(
            Coordinate::new(0.0, -180.5).validate(),
            Err(CoordinateError::OutOfRange {
                axis: Axis::Longitude,
                value: -180.5
            })
        );
    }

    #[test]
    fn validate_rejects_non_finite() {
        assert!(matches!(
            Coordinate::new(f64::NAN, 0.0).validate(),
            Err(CoordinateError::NotFinite {
                axis: Axis::Latitude,
                ..
            })
        ));
        assert!(matches!(
            Coordinate::new(0.0, f64::INFINITY).validate(),
            Err(CoordinateError::NotFinite {
                axis: Axis::Longitude,
                ..
            })
        ));
    }

    #[test]
    fn error_messages_name_the_axis() {
        let err = Coordinate::new(-91.0, 0.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "latitude -91 is outside [-90, 90]");
    }
}
