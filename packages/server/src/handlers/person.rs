use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::entity::Person;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::person::{CreatePersonRequest, PersonDetailResponse};
use crate::models::shared::MessageResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/personas",
    tag = "People",
    operation_id = "listPeople",
    summary = "List all people",
    description = "Returns every person in creation order.",
    responses(
        (status = 200, description = "All people", body = Vec<Person>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_people(State(state): State<AppState>) -> Json<Vec<Person>> {
    Json(state.store.list_people().await)
}

#[utoipa::path(
    get,
    path = "/persona/{id}",
    tag = "People",
    operation_id = "getPerson",
    summary = "Get a person with their incidents",
    description = "Returns the person, their point total (`puntos`) and every incident logged \
        against them (`incidencias`) in creation order.",
    params(("id" = String, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person detail", body = PersonDetailResponse),
        (status = 404, description = "Person not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PersonDetailResponse>, AppError> {
    let detail = state.store.get_person(&id).await?;
    Ok(Json(detail.into()))
}

#[utoipa::path(
    post,
    path = "/personas",
    tag = "People",
    operation_id = "createPerson",
    summary = "Add a person",
    description = "Creates a person. `nombre` is trimmed and must be non-empty and unique \
        ignoring case. Duplicates are reported as 400 `DUPLICATE_NAME`.",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = Person),
        (status = 400, description = "Missing name (VALIDATION_ERROR) or duplicate name (DUPLICATE_NAME)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_person(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePersonRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.unwrap_or_default();
    let person = state.store.create_person(&name).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

#[utoipa::path(
    delete,
    path = "/personas/{id}",
    tag = "People",
    operation_id = "deletePerson",
    summary = "Delete a person",
    description = "Deletes the person together with all of their incidents. Evidence photos \
        of the removed incidents are released on a best-effort basis.",
    params(("id" = String, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person deleted", body = MessageResponse),
        (status = 404, description = "Person not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.delete_person(&id).await?;
    Ok(Json(MessageResponse::new("Person deleted")))
}
