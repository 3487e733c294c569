#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Relief shelter directory.
//!
//! Tracks the shelters operators can route civilians to: where each
//! one is, how many people it can hold, and how many it currently
//! holds. Occupancy is informational — field counts lag reality, so
//! the directory records whatever the field reports, flags
//! over-capacity values in the log, and leaves enforcement to the
//! people on the ground.

use relief_ops_geo::{Coordinate, CoordinateError, distance_km};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors from shelter directory operations.
#[derive(Debug, Error)]
pub enum ShelterError {
    /// A submitted coordinate failed validation.
    #[error("Invalid location: {0}")]
    InvalidLocation(#[from] CoordinateError),

    /// No shelter exists with the given id.
    #[error("No shelter with id {0}")]
    NotFound(Uuid),
}

/// A relief shelter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelter {
    /// Directory-assigned identifier.
    pub id: Uuid,
    /// Display name, e.g. `Andheri Sports Complex`.
    pub name: String,
    /// Where the shelter is.
    pub location: Coordinate,
    /// Maximum intended headcount.
    pub capacity: u32,
    /// Last reported headcount. May exceed capacity.
    pub occupancy: u32,
}

impl Shelter {
    /// Returns `true` if the shelter can take more people.
    #[must_use]
    pub const fn has_space(&self) -> bool {
        self.occupancy < self.capacity
    }

    /// Occupancy as a percentage of capacity.
    ///
    /// A zero-capacity shelter reports 100% — it has no space by
    /// definition.
    #[must_use]
    pub fn utilization_pct(&self) -> f64 {
        if self.capacity == 0 {
            return 100.0;
        }
        f64::from(self.occupancy) / f64::from(self.capacity) * 100.0
    }
}

/// Owns the shelter list.
///
/// Insertion-ordered, like the registries in `relief_ops_registry`:
/// when two shelters are equally near, the one registered first wins
/// the nearest-with-space lookup.
#[derive(Debug, Default)]
pub struct ShelterDirectory {
    shelters: Vec<Shelter>,
}

impl ShelterDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shelters: Vec::new(),
        }
    }

    /// Adds a shelter to the directory.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError::InvalidLocation`] if the coordinate is
    /// not valid.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        location: Coordinate,
        capacity: u32,
        occupancy: u32,
    ) -> Result<Uuid, ShelterError> {
        location.validate()?;

        let id = Uuid::new_v4();
        let name = name.into();
        log::info!("Shelter {id} registered: {name} (capacity {capacity})");

        self.shelters.push(Shelter {
            id,
            name,
            location,
            capacity,
            occupancy,
        });

        Ok(id)
    }

    /// Looks up a shelter by id.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError::NotFound`] if no shelter has the id.
    pub fn get(&self, id: Uuid) -> Result<&Shelter, ShelterError> {
        self.shelters
            .iter()
            .find(|shelter| shelter.id == id)
            .ok_or(ShelterError::NotFound(id))
    }

    /// All shelters in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<&Shelter> {
        self.shelters.iter().collect()
    }

    /// Number of shelters in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shelters.len()
    }

    /// Returns `true` if the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shelters.is_empty()
    }

    /// Stores a headcount report for a shelter.
    ///
    /// Over-capacity values are stored as reported and flagged in the
    /// log; the field count is the truth, not the capacity plan.
    ///
    /// # Errors
    ///
    /// Returns [`ShelterError::NotFound`] if no shelter has the id.
    pub fn set_occupancy(&mut self, id: Uuid, occupancy: u32) -> Result<(), ShelterError> {
        let shelter = self
            .shelters
            .iter_mut()
            .find(|shelter| shelter.id == id)
            .ok_or(ShelterError::NotFound(id))?;

        if occupancy > shelter.capacity {
            log::warn!(
                "Shelter {id} reported occupancy {occupancy} over capacity {}",
                shelter.capacity
            );
        }

        shelter.occupancy = occupancy;
        Ok(())
    }

    /// Finds the nearest shelter with free space within `radius_km`.
    ///
    /// Full shelters are skipped. Distance ties keep the earlier
    /// registration. Returns the shelter together with its distance
    /// from `from`, or `None` when nothing qualifies. Assumes `from`
    /// has already been validated.
    #[must_use]
    pub fn nearest_with_space(
        &self,
        from: Coordinate,
        radius_km: f64,
    ) -> Option<(&Shelter, f64)> {
        let mut nearest: Option<(&Shelter, f64)> = None;

        for shelter in &self.shelters {
            if !shelter.has_space() {
                continue;
            }

            let distance = distance_km(from, shelter.location);
            if distance > radius_km {
                continue;
            }

            match nearest {
                Some((_, best)) if distance >= best => {}
                _ => nearest = Some((shelter, distance)),
            }
        }

        nearest
    }

    /// Occupancy across all shelters as a percentage of total capacity.
    ///
    /// An empty directory (or one with zero total capacity) reports 0%.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aggregate_utilization_pct(&self) -> f64 {
        let capacity: u64 = self
            .shelters
            .iter()
            .map(|shelter| u64::from(shelter.capacity))
            .sum();
        if capacity == 0 {
            return 0.0;
        }

        let occupancy: u64 = self
            .shelters
            .iter()
            .map(|shelter| u64::from(shelter.occupancy))
            .sum();

        occupancy as f64 / capacity as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use relief_ops_geo::Coordinate;
    use uuid::Uuid;

    use super::{ShelterDirectory, ShelterError};

    fn mumbai() -> Coordinate {
        Coordinate::new(19.0760, 72.8777)
    }

    #[test]
    fn register_and_get() {
        let mut directory = ShelterDirectory::new();
        let id = directory
            .register("Andheri Sports Complex", mumbai(), 500, 120)
            .unwrap();

        let shelter = directory.get(id).unwrap();
        assert_eq!(shelter.name, "Andheri Sports Complex");
        assert_eq!(shelter.capacity, 500);
        assert_eq!(shelter.occupancy, 120);
        assert!(shelter.has_space());
    }

    #[test]
    fn register_rejects_invalid_coordinate() {
        let mut directory = ShelterDirectory::new();
        let err = directory
            .register("Bad Site", Coordinate::new(-91.0, 0.0), 100, 0)
            .unwrap_err();
        assert!(matches!(err, ShelterError::InvalidLocation(_)));
        assert!(directory.is_empty());
    }

    #[test]
    fn occupancy_reports_are_stored_as_given() {
        let mut directory = ShelterDirectory::new();
        let id = directory.register("School Hall", mumbai(), 200, 0).unwrap();

        directory.set_occupancy(id, 180).unwrap();
        assert_eq!(directory.get(id).unwrap().occupancy, 180);

        // Over-capacity counts are recorded, not rejected.
        directory.set_occupancy(id, 230).unwrap();
        assert_eq!(directory.get(id).unwrap().occupancy, 230);
        assert!(!directory.get(id).unwrap().has_space());
    }

    #[test]
    fn set_occupancy_unknown_shelter_is_not_found() {
        let mut directory = ShelterDirectory::new();
        let err = directory.set_occupancy(Uuid::new_v4(), 10).unwrap_err();
        assert!(matches!(err, ShelterError::NotFound(_)));
    }

    #[test]
    fn nearest_skips_full_shelters() {
        let mut directory = ShelterDirectory::new();
        // Closest to the query point, but full.
        directory
            .register("Full House", Coordinate::new(19.08, 72.88), 100, 100)
            .unwrap();
        let open = directory
            .register("Open Hall", Coordinate::new(19.12, 72.92), 100, 40)
            .unwrap();

        let (shelter, distance) = directory.nearest_with_space(mumbai(), 50.0).unwrap();
        assert_eq!(shelter.id, open);
        assert!(distance > 0.0);
    }

    #[test]
    fn nearest_respects_the_radius() {
        let mut directory = ShelterDirectory::new();
        // Pune is ~120 km from Mumbai.
        directory
            .register("Pune Depot", Coordinate::new(18.5204, 73.8567), 300, 0)
            .unwrap();

        assert!(directory.nearest_with_space(mumbai(), 50.0).is_none());
        assert!(directory.nearest_with_space(mumbai(), 150.0).is_some());
    }

    #[test]
    fn nearest_prefers_earlier_registration_on_ties() {
        let mut directory = ShelterDirectory::new();
        let same = Coordinate::new(19.10, 72.90);
        let first = directory.register("First In", same, 100, 0).unwrap();
        directory.register("Second In", same, 100, 0).unwrap();

        let (shelter, _) = directory.nearest_with_space(mumbai(), 50.0).unwrap();
        assert_eq!(shelter.id, first);
    }

    #[test]
    fn nearest_with_no_candidates_is_none() {
        let directory = ShelterDirectory::new();
        assert!(directory.nearest_with_space(mumbai(), 100.0).is_none());
    }

    #[test]
    fn utilization_percentages() {
        let mut directory = ShelterDirectory::new();
        assert!(directory.aggregate_utilization_pct().abs() < f64::EPSILON);

        let id = directory.register("Hall A", mumbai(), 200, 50).unwrap();
        directory.register("Hall B", mumbai(), 200, 150).unwrap();

        assert!((directory.get(id).unwrap().utilization_pct() - 25.0).abs() < f64::EPSILON);
        assert!((directory.aggregate_utilization_pct() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_capacity_shelter_has_no_space() {
        let mut directory = ShelterDirectory::new();
        let id = directory.register("Closed Site", mumbai(), 0, 0).unwrap();

        let shelter = directory.get(id).unwrap();
        assert!(!shelter.has_space());
        assert!((shelter.utilization_pct() - 100.0).abs() < f64::EPSILON);
    }
}
