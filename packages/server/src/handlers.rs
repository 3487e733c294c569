//! HTTP handler functions for the relief-ops API.

use actix_web::{HttpResponse, web};
use relief_ops_dispatch::DispatchError;
use relief_ops_geo::Coordinate;
use relief_ops_registry::RegistryError;
use relief_ops_registry_models::SosReport;
use relief_ops_scenario::{DEFAULT_CENTER, drill_fleet, drill_reports, drill_shelters};
use relief_ops_server_models::{
    ApiAssignment, ApiCreated, ApiDrillSeeded, ApiError, ApiHealth, ApiIncident, ApiNearestShelter,
    ApiResponder, ApiShelter, ApiSummary, DrillParams, NearestShelterParams, OccupancyRequest,
    RegisterResponderRequest, RegisterShelterRequest, SubmitReportRequest, UpdateLocationRequest,
};
use relief_ops_shelter::ShelterError;
use uuid::Uuid;

use crate::AppState;

/// Search radius for `GET /api/shelters/nearest` when the query does
/// not carry one.
const DEFAULT_SHELTER_RADIUS_KM: f64 = 10.0;

/// Drill sizes used when `POST /api/drill` omits the counts.
const DEFAULT_DRILL_REPORTS: usize = 15;
const DEFAULT_DRILL_RESPONDERS: usize = 5;
const DEFAULT_DRILL_SHELTERS: usize = 4;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/reports`
///
/// Triages an SOS report and files it as a new incident.
pub async fn submit_report(
    state: web::Data<AppState>,
    body: web::Json<SubmitReportRequest>,
) -> HttpResponse {
    let body = body.into_inner();

    let mut report = SosReport::new(
        body.message,
        body.severity,
        Coordinate::new(body.lat, body.lng),
    );
    if let Some(name) = body.reporter_name {
        report = report.with_reporter(name);
    }

    match state.ops.submit_report(report) {
        Ok(id) => HttpResponse::Created().json(ApiCreated { id }),
        Err(e) => registry_error(&e),
    }
}

/// `GET /api/triage`
///
/// Returns the incident board in working order: pending incidents
/// first, most severe first, oldest first within a severity.
pub async fn triage_board(state: web::Data<AppState>) -> HttpResponse {
    let board: Vec<ApiIncident> = state
        .ops
        .triage_queue()
        .into_iter()
        .map(ApiIncident::from)
        .collect();

    HttpResponse::Ok().json(board)
}

/// `GET /api/incidents/{id}`
pub async fn incident(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.ops.incident(path.into_inner()) {
        Ok(incident) => HttpResponse::Ok().json(ApiIncident::from(incident)),
        Err(e) => registry_error(&e),
    }
}

/// `POST /api/incidents/{id}/dispatch`
///
/// Sends the nearest idle unit to a pending incident.
pub async fn dispatch_incident(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    match state.ops.request_dispatch(path.into_inner()) {
        Ok(assignment) => HttpResponse::Ok().json(ApiAssignment::from(assignment)),
        Err(e) => dispatch_error(&e),
    }
}

/// `POST /api/incidents/{id}/resolve`
///
/// Closes out an incident. The assigned unit, if any, stays on its
/// task until its completion is reported separately.
pub async fn resolve_incident(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();

    match state
        .ops
        .resolve_incident(id)
        .and_then(|()| state.ops.incident(id))
    {
        Ok(incident) => HttpResponse::Ok().json(ApiIncident::from(incident)),
        Err(e) => registry_error(&e),
    }
}

/// `GET /api/responders`
pub async fn responders(state: web::Data<AppState>) -> HttpResponse {
    let roster: Vec<ApiResponder> = state
        .ops
        .responders()
        .into_iter()
        .map(ApiResponder::from)
        .collect();

    HttpResponse::Ok().json(roster)
}

/// `POST /api/responders`
///
/// Adds a unit to the roster, starting idle.
pub async fn register_responder(
    state: web::Data<AppState>,
    body: web::Json<RegisterResponderRequest>,
) -> HttpResponse {
    let body = body.into_inner();

    match state
        .ops
        .register_responder(body.name, Coordinate::new(body.lat, body.lng), body.kind)
    {
        Ok(id) => HttpResponse::Created().json(ApiCreated { id }),
        Err(e) => registry_error(&e),
    }
}

/// `GET /api/responders/available`
pub async fn available_responders(state: web::Data<AppState>) -> HttpResponse {
    let available: Vec<ApiResponder> = state
        .ops
        .available_responders()
        .into_iter()
        .map(ApiResponder::from)
        .collect();

    HttpResponse::Ok().json(available)
}

/// `POST /api/responders/{id}/location`
///
/// Stores a position update from the field.
pub async fn update_responder_location(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateLocationRequest>,
) -> HttpResponse {
    let id = path.into_inner();

    match state
        .ops
        .update_responder_location(id, Coordinate::new(body.lat, body.lng))
        .and_then(|()| state.ops.responder(id))
    {
        Ok(responder) => HttpResponse::Ok().json(ApiResponder::from(responder)),
        Err(e) => registry_error(&e),
    }
}

/// `POST /api/responders/{id}/on-site`
///
/// Records that a unit has arrived at its incident.
pub async fn responder_on_site(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();

    match state
        .ops
        .responder_on_site(id)
        .and_then(|()| state.ops.responder(id))
    {
        Ok(responder) => HttpResponse::Ok().json(ApiResponder::from(responder)),
        Err(e) => registry_error(&e),
    }
}

/// `POST /api/responders/{id}/complete`
///
/// Returns a unit to the idle pool once its work is done.
pub async fn complete_responder(state: web::Data<AppState>, path: web::Path<Uuid>) -> HttpResponse {
    let id = path.into_inner();

    match state
        .ops
        .complete_responder_task(id)
        .and_then(|()| state.ops.responder(id))
    {
        Ok(responder) => HttpResponse::Ok().json(ApiResponder::from(responder)),
        Err(e) => registry_error(&e),
    }
}

/// `GET /api/shelters`
pub async fn shelters(state: web::Data<AppState>) -> HttpResponse {
    let directory: Vec<ApiShelter> = state
        .ops
        .shelters()
        .into_iter()
        .map(ApiShelter::from)
        .collect();

    HttpResponse::Ok().json(directory)
}

/// `POST /api/shelters`
pub async fn register_shelter(
    state: web::Data<AppState>,
    body: web::Json<RegisterShelterRequest>,
) -> HttpResponse {
    let body = body.into_inner();

    match state.ops.register_shelter(
        body.name,
        Coordinate::new(body.lat, body.lng),
        body.capacity,
        body.occupancy.unwrap_or(0),
    ) {
        Ok(id) => HttpResponse::Created().json(ApiCreated { id }),
        Err(e) => shelter_error(&e),
    }
}

/// `GET /api/shelters/nearest`
///
/// Finds the nearest shelter with free space to a coordinate, within
/// an optional radius (default 10 km).
pub async fn nearest_shelter(
    state: web::Data<AppState>,
    params: web::Query<NearestShelterParams>,
) -> HttpResponse {
    let from = Coordinate::new(params.lat, params.lng);
    if let Err(e) = from.validate() {
        return HttpResponse::BadRequest().json(ApiError::new("INVALID_LOCATION", e.to_string()));
    }

    let radius_km = params.radius_km.unwrap_or(DEFAULT_SHELTER_RADIUS_KM);

    state.ops.nearest_shelter(from, radius_km).map_or_else(
        || {
            HttpResponse::NotFound().json(ApiError::new(
                "NO_SHELTER_AVAILABLE",
                format!("No shelter with space within {radius_km} km"),
            ))
        },
        |(shelter, distance_km)| {
            HttpResponse::Ok().json(ApiNearestShelter {
                shelter: ApiShelter::from(shelter),
                distance_km,
            })
        },
    )
}

/// `POST /api/shelters/{id}/occupancy`
///
/// Stores a headcount report. Over-capacity counts are accepted as
/// reported.
pub async fn update_occupancy(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<OccupancyRequest>,
) -> HttpResponse {
    let id = path.into_inner();

    match state
        .ops
        .update_shelter_occupancy(id, body.occupancy)
        .and_then(|()| state.ops.shelter(id))
    {
        Ok(shelter) => HttpResponse::Ok().json(ApiShelter::from(shelter)),
        Err(e) => shelter_error(&e),
    }
}

/// `GET /api/summary`
pub async fn summary(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiSummary::from(state.ops.summary()))
}

/// `POST /api/drill`
///
/// Seeds the operations center with generated drill traffic around
/// the default centre. Counts default to 15 reports, 5 units, and 4
/// shelters; pass `reports`, `responders`, or `shelters` query
/// parameters to override them.
pub async fn run_drill(state: web::Data<AppState>, params: web::Query<DrillParams>) -> HttpResponse {
    let mut seeded = ApiDrillSeeded {
        reports: 0,
        responders: 0,
        shelters: 0,
    };

    for unit in drill_fleet(
        params.responders.unwrap_or(DEFAULT_DRILL_RESPONDERS),
        DEFAULT_CENTER,
    ) {
        match state
            .ops
            .register_responder(unit.name, unit.location, unit.kind)
        {
            Ok(_) => seeded.responders += 1,
            Err(e) => log::error!("Failed to register drill unit: {e}"),
        }
    }

    for report in drill_reports(
        params.reports.unwrap_or(DEFAULT_DRILL_REPORTS),
        DEFAULT_CENTER,
    ) {
        match state.ops.submit_report(report) {
            Ok(_) => seeded.reports += 1,
            Err(e) => log::error!("Failed to submit drill report: {e}"),
        }
    }

    for shelter in drill_shelters(
        params.shelters.unwrap_or(DEFAULT_DRILL_SHELTERS),
        DEFAULT_CENTER,
    ) {
        match state.ops.register_shelter(
            shelter.name,
            shelter.location,
            shelter.capacity,
            shelter.occupancy,
        ) {
            Ok(_) => seeded.shelters += 1,
            Err(e) => log::error!("Failed to register drill shelter: {e}"),
        }
    }

    HttpResponse::Ok().json(seeded)
}

/// Maps a registry failure to its HTTP response: validation failures
/// are 400, unknown ids 404, and disallowed lifecycle moves 409.
fn registry_error(err: &RegistryError) -> HttpResponse {
    let message = err.to_string();
    match err {
        RegistryError::InvalidLocation(_) => {
            HttpResponse::BadRequest().json(ApiError::new("INVALID_LOCATION", message))
        }
        RegistryError::InvalidSeverity(_) => {
            HttpResponse::BadRequest().json(ApiError::new("INVALID_SEVERITY", message))
        }
        RegistryError::NotFound(_) => {
            HttpResponse::NotFound().json(ApiError::new("NOT_FOUND", message))
        }
        RegistryError::InvalidTransition { .. } => {
            HttpResponse::Conflict().json(ApiError::new("INVALID_TRANSITION", message))
        }
    }
}

/// Maps a dispatch failure to its HTTP response.
fn dispatch_error(err: &DispatchError) -> HttpResponse {
    let message = err.to_string();
    match err {
        DispatchError::NotFound(_) => {
            HttpResponse::NotFound().json(ApiError::new("NOT_FOUND", message))
        }
        DispatchError::InvalidState { .. } => {
            HttpResponse::Conflict().json(ApiError::new("INVALID_STATE", message))
        }
        DispatchError::NoAvailableResponders => {
            HttpResponse::Conflict().json(ApiError::new("NO_AVAILABLE_RESPONDERS", message))
        }
        DispatchError::Registry(inner) => registry_error(inner),
    }
}

/// Maps a shelter directory failure to its HTTP response.
fn shelter_error(err: &ShelterError) -> HttpResponse {
    let message = err.to_string();
    match err {
        ShelterError::InvalidLocation(_) => {
            HttpResponse::BadRequest().json(ApiError::new("INVALID_LOCATION", message))
        }
        ShelterError::NotFound(_) => {
            HttpResponse::NotFound().json(ApiError::new("NOT_FOUND", message))
        }
    }
}
