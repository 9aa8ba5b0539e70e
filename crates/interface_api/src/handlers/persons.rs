//! Person handlers
//!
//! Every failure is raised with `?` and left to the error boundary.

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    Json,
};
use error_kernel::{
    basic, params, FunctionalCode, FunctionalError, InterfaceViolation, TechnicalCode,
    TechnicalError,
};
use tracing::info;
use uuid::Uuid;

use crate::dto::persons::*;
use crate::error::AppError;
use crate::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::AppState;

/// Header naming the caller's role
pub const ROLE_HEADER: &str = "x-role";

/// Role allowed to delete persons
pub const ADMIN_ROLE: &str = "admin";

/// Raised when a route exists but not for the request method
pub const METHOD_NOT_ALLOWED: FunctionalCode = FunctionalCode::from_static("METHOD_NOT_ALLOWED");

const ARCHIVE_WRITE_FAILED: TechnicalCode = TechnicalCode::from_static("ARCHIVE_WRITE_FAILED");

/// Registers a person
pub async fn create_person(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreatePersonRequest>,
) -> Result<(StatusCode, Json<PersonResponse>), AppError> {
    let person = state
        .directory
        .insert(request.into())
        .await
        .map_err(FunctionalError::from)?;

    info!(person_id = %person.id, "Person registered");

    Ok((StatusCode::CREATED, Json(person.into())))
}

/// Lists persons
pub async fn list_persons(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListPersonsQuery>,
) -> Json<Vec<PersonResponse>> {
    let persons = state
        .directory
        .list(query.limit, query.lastname.as_deref())
        .await;

    Json(persons.into_iter().map(PersonResponse::from).collect())
}

/// Gets a person by ID
pub async fn get_person(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<String>,
) -> Result<Json<PersonResponse>, AppError> {
    let id = parse_id(&id)?;
    let person = state.directory.get(id).await.map_err(FunctionalError::from)?;

    Ok(Json(person.into()))
}

/// Deletes a person
///
/// Requires the admin role in the `x-role` header.
pub async fn delete_person(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedPath(id): ValidatedPath<String>,
) -> Result<StatusCode, AppError> {
    let role = headers
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| basic::unauthorized_with("header {} is required", params![ROLE_HEADER]))?;

    if role != ADMIN_ROLE {
        return Err(basic::forbidden_with("role {} may not delete persons", params![role]).into());
    }

    let id = parse_id(&id)?;
    state.directory.remove(id).await.map_err(FunctionalError::from)?;

    info!(person_id = %id, "Person deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Writes a person record to the archive directory
///
/// Write failures are retriable technical errors.
pub async fn archive_person(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<String>,
) -> Result<Json<ArchiveResponse>, AppError> {
    let id = parse_id(&id)?;
    let person = state.directory.get(id).await.map_err(FunctionalError::from)?;

    let record = serde_json::to_vec_pretty(&person).map_err(|err| {
        TechnicalError::with_cause(err, "cannot encode person {}", params![id])
            .with_code(ARCHIVE_WRITE_FAILED)
    })?;

    let location = state.config.archive_dir.join(format!("{}.json", id));
    tokio::fs::write(&location, record).await.map_err(|err| {
        TechnicalError::with_cause(err, "cannot archive person {} to {}", params![id, location.display()])
            .with_code(ARCHIVE_WRITE_FAILED)
            .retriable()
    })?;

    info!(person_id = %id, location = %location.display(), "Person archived");

    Ok(Json(ArchiveResponse {
        id,
        location: location.display().to_string(),
    }))
}

/// Answers requests matching no route
pub async fn route_not_found(uri: Uri) -> AppError {
    basic::not_found_with("no route for {}", params![uri.path()]).into()
}

/// Answers requests whose method a matched route does not serve
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    FunctionalError::with_message(
        METHOD_NOT_ALLOWED,
        "method {} not allowed on {}",
        params![method, uri.path()],
    )
    .into()
}

fn parse_id(raw: &str) -> Result<Uuid, InterfaceViolation> {
    Uuid::parse_str(raw).map_err(|_| InterfaceViolation::type_mismatch("id", raw, "uuid"))
}
