//! Responder roster and unit lifecycle transitions.

use relief_ops_geo::Coordinate;
use relief_ops_registry_models::{Responder, ResponderKind, ResponderStatus};
use uuid::Uuid;

use crate::RegistryError;

/// Owns the responder roster.
///
/// Units are registered once and then cycle through assignments:
/// `Idle` -> `EnRoute` -> `OnSite` -> `Idle`. A unit recalled before
/// arrival goes straight from `EnRoute` back to `Idle`. Storage is
/// insertion-ordered; [`Self::list_available`] preserves that order,
/// which is what makes nearest-unit ties deterministic.
#[derive(Debug, Default)]
pub struct ResponderRegistry {
    responders: Vec<Responder>,
}

impl ResponderRegistry {
    /// Creates an empty roster.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            responders: Vec::new(),
        }
    }

    /// Adds a unit to the roster, idle and unassigned.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidLocation`] if the starting
    /// coordinate is not valid.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        location: Coordinate,
        kind: ResponderKind,
    ) -> Result<Uuid, RegistryError> {
        location.validate()?;

        let id = Uuid::new_v4();
        let name = name.into();
        log::info!("Responder {id} registered: {name} ({kind})");

        self.responders.push(Responder {
            id,
            name,
            location,
            status: ResponderStatus::Idle,
            kind,
            current_task: None,
        });

        Ok(id)
    }

    /// Looks up a responder by id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no responder has the id.
    pub fn get(&self, id: Uuid) -> Result<&Responder, RegistryError> {
        self.responders
            .iter()
            .find(|responder| responder.id == id)
            .ok_or(RegistryError::NotFound(id))
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Responder, RegistryError> {
        self.responders
            .iter_mut()
            .find(|responder| responder.id == id)
            .ok_or(RegistryError::NotFound(id))
    }

    /// The full roster in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<&Responder> {
        self.responders.iter().collect()
    }

    /// Number of units on the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.responders.len()
    }

    /// Returns `true` if the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responders.is_empty()
    }

    /// Idle units, in registration order.
    #[must_use]
    pub fn list_available(&self) -> Vec<&Responder> {
        self.responders
            .iter()
            .filter(|responder| responder.status.is_available())
            .collect()
    }

    /// Puts an idle unit en route to the given incident.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::NotFound`] if no responder has the id.
    /// * [`RegistryError::InvalidTransition`] if the unit is not idle.
    pub fn assign(&mut self, id: Uuid, task: Uuid) -> Result<(), RegistryError> {
        let responder = self.get_mut(id)?;

        if !responder.status.is_available() {
            log::warn!(
                "Rejected assignment of responder {id}: status is {}",
                responder.status
            );
            return Err(RegistryError::InvalidTransition {
                from: responder.status.to_string(),
                to: ResponderStatus::EnRoute.to_string(),
            });
        }

        responder.status = ResponderStatus::EnRoute;
        responder.current_task = Some(task);
        log::info!("Responder {id} en route to incident {task}");

        Ok(())
    }

    /// Records that an en-route unit has arrived at its incident.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::NotFound`] if no responder has the id.
    /// * [`RegistryError::InvalidTransition`] if the unit is not en route.
    pub fn mark_on_site(&mut self, id: Uuid) -> Result<(), RegistryError> {
        let responder = self.get_mut(id)?;

        if responder.status != ResponderStatus::EnRoute {
            return Err(RegistryError::InvalidTransition {
                from: responder.status.to_string(),
                to: ResponderStatus::OnSite.to_string(),
            });
        }

        responder.status = ResponderStatus::OnSite;
        log::info!("Responder {id} on site");

        Ok(())
    }

    /// Returns a working unit to the idle pool and clears its task.
    ///
    /// Allowed from `EnRoute` (unit recalled before arrival) and from
    /// `OnSite` (work finished).
    ///
    /// # Errors
    ///
    /// * [`RegistryError::NotFound`] if no responder has the id.
    /// * [`RegistryError::InvalidTransition`] if the unit is already idle.
    pub fn complete(&mut self, id: Uuid) -> Result<(), RegistryError> {
        let responder = self.get_mut(id)?;

        if responder.status.is_available() {
            return Err(RegistryError::InvalidTransition {
                from: responder.status.to_string(),
                to: ResponderStatus::Idle.to_string(),
            });
        }

        responder.status = ResponderStatus::Idle;
        responder.current_task = None;
        log::info!("Responder {id} back in the idle pool");

        Ok(())
    }

    /// Stores a position update for a unit.
    ///
    /// Positions come in from the field continuously, so updates are
    /// allowed in every status.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::NotFound`] if no responder has the id.
    /// * [`RegistryError::InvalidLocation`] if the coordinate is not valid.
    pub fn update_location(
        &mut self,
        id: Uuid,
        location: Coordinate,
    ) -> Result<(), RegistryError> {
        location.validate()?;

        let responder = self.get_mut(id)?;
        responder.location = location;
        log::debug!("Responder {id} moved to {}, {}", location.lat, location.lng);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use relief_ops_geo::Coordinate;
    use relief_ops_registry_models::{ResponderKind, ResponderStatus};
    use uuid::Uuid;

    use super::ResponderRegistry;
    use crate::RegistryError;

    fn base() -> Coordinate {
        Coordinate::new(19.07, 72.87)
    }

    #[test]
    fn register_starts_idle_and_unassigned() {
        let mut registry = ResponderRegistry::new();
        let id = registry
            .register("UNIT-A-1", base(), ResponderKind::Rescue)
            .unwrap();

        let responder = registry.get(id).unwrap();
        assert_eq!(responder.name, "UNIT-A-1");
        assert_eq!(responder.status, ResponderStatus::Idle);
        assert_eq!(responder.kind, ResponderKind::Rescue);
        assert!(responder.current_task.is_none());
    }

    #[test]
    fn register_rejects_invalid_coordinate() {
        let mut registry = ResponderRegistry::new();
        let err = registry
            .register("UNIT-A-1", Coordinate::new(0.0, 181.0), ResponderKind::Supply)
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidLocation(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn available_listing_tracks_status() {
        let mut registry = ResponderRegistry::new();
        let first = registry
            .register("UNIT-A-1", base(), ResponderKind::Rescue)
            .unwrap();
        let second = registry
            .register("UNIT-A-2", base(), ResponderKind::Medical)
            .unwrap();

        assert_eq!(registry.list_available().len(), 2);

        registry.assign(first, Uuid::new_v4()).unwrap();
        let available: Vec<Uuid> = registry
            .list_available()
            .iter()
            .map(|responder| responder.id)
            .collect();
        assert_eq!(available, vec![second]);
    }

    #[test]
    fn assign_requires_idle() {
        let mut registry = ResponderRegistry::new();
        let id = registry
            .register("UNIT-A-1", base(), ResponderKind::Rescue)
            .unwrap();
        let task = Uuid::new_v4();

        registry.assign(id, task).unwrap();
        assert_eq!(registry.get(id).unwrap().current_task, Some(task));

        let err = registry.assign(id, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTransition { .. }));
        // The first task sticks.
        assert_eq!(registry.get(id).unwrap().current_task, Some(task));
    }

    #[test]
    fn unit_cycles_through_the_full_lifecycle() {
        let mut registry = ResponderRegistry::new();
        let id = registry
            .register("UNIT-A-1", base(), ResponderKind::Medical)
            .unwrap();

        registry.assign(id, Uuid::new_v4()).unwrap();
        assert_eq!(registry.get(id).unwrap().status, ResponderStatus::EnRoute);

        registry.mark_on_site(id).unwrap();
        assert_eq!(registry.get(id).unwrap().status, ResponderStatus::OnSite);

        registry.complete(id).unwrap();
        let responder = registry.get(id).unwrap();
        assert_eq!(responder.status, ResponderStatus::Idle);
        assert!(responder.current_task.is_none());
    }

    #[test]
    fn recall_before_arrival_is_allowed() {
        let mut registry = ResponderRegistry::new();
        let id = registry
            .register("UNIT-A-1", base(), ResponderKind::Supply)
            .unwrap();

        registry.assign(id, Uuid::new_v4()).unwrap();
        registry.complete(id).unwrap();
        assert_eq!(registry.get(id).unwrap().status, ResponderStatus::Idle);
    }

    #[test]
    fn on_site_requires_en_route() {
        let mut registry = ResponderRegistry::new();
        let id = registry
            .register("UNIT-A-1", base(), ResponderKind::Rescue)
            .unwrap();

        let err = registry.mark_on_site(id).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTransition { .. }));

        registry.assign(id, Uuid::new_v4()).unwrap();
        registry.mark_on_site(id).unwrap();

        let err = registry.mark_on_site(id).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTransition { .. }));
    }

    #[test]
    fn complete_requires_an_active_task() {
        let mut registry = ResponderRegistry::new();
        let id = registry
            .register("UNIT-A-1", base(), ResponderKind::Rescue)
            .unwrap();

        let err = registry.complete(id).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTransition { .. }));
    }

    #[test]
    fn location_updates_allowed_in_any_status() {
        let mut registry = ResponderRegistry::new();
        let id = registry
            .register("UNIT-A-1", base(), ResponderKind::Rescue)
            .unwrap();

        registry.update_location(id, Coordinate::new(19.1, 72.9)).unwrap();
        registry.assign(id, Uuid::new_v4()).unwrap();
        registry.update_location(id, Coordinate::new(19.2, 72.95)).unwrap();

        let location = registry.get(id).unwrap().location;
        assert!((location.lat - 19.2).abs() < f64::EPSILON);
    }

    #[test]
    fn location_update_rejects_invalid_coordinate() {
        let mut registry = ResponderRegistry::new();
        let id = registry
            .register("UNIT-A-1", base(), ResponderKind::Rescue)
            .unwrap();

        let err = registry
            .update_location(id, Coordinate::new(f64::NAN, 72.9))
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidLocation(_)));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut registry = ResponderRegistry::new();
        let missing = Uuid::new_v4();

        assert!(matches!(
            registry.get(missing),
            Err(RegistryError::NotFound(_))
        ));
        assert!(matches!(
            registry.assign(missing, Uuid::new_v4()),
            Err(RegistryError::NotFound(_))
        ));
        assert!(matches!(
            registry.complete(missing),
            Err(RegistryError::NotFound(_))
        ));
    }
}
