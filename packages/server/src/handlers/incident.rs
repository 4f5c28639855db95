use std::io;

use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::storage::{BoxReader, PhotoRef, PhotoStore, StorageError};
use futures::TryStreamExt;
use tokio_util::io::StreamReader;
use tracing::instrument;

use crate::entity::Incident;
use crate::error::{AppError, ErrorBody};
use crate::models::incident::CreateIncidentForm;
use crate::models::shared::MessageResponse;
use crate::state::AppState;
use crate::utils::filename::photo_extension;

/// Headroom above the photo size limit for the other form fields.
const FORM_OVERHEAD: u64 = 64 * 1024;

pub fn incident_upload_body_limit(max_photo_size: u64) -> DefaultBodyLimit {
    let limit = max_photo_size.saturating_add(FORM_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    get,
    path = "/incidencias",
    tag = "Incidents",
    operation_id = "listIncidents",
    summary = "List all incidents",
    description = "Returns every incident in creation order.",
    responses(
        (status = 200, description = "All incidents", body = Vec<Incident>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_incidents(State(state): State<AppState>) -> Json<Vec<Incident>> {
    Json(state.store.list_incidents().await)
}

#[utoipa::path(
    post,
    path = "/incidencias",
    tag = "Incidents",
    operation_id = "createIncident",
    summary = "Log an incident against a person",
    description = "Multipart form with `personaId` (required), `descripcion` (optional) and \
        `foto` (optional image: jpeg, jpg, png or gif). The stored photo is published under \
        the uploads prefix and its path returned in `foto`.",
    request_body(content = CreateIncidentForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Incident created", body = Incident),
        (status = 400, description = "Missing person ID or invalid photo (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Person not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_incident(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_incident_form(&state, multipart).await?;

    let photo_path = form.photo.as_ref().map(|p| state.photos.public_path(p));
    let result = state
        .store
        .create_incident(
            form.person_id.as_deref().unwrap_or_default(),
            form.description.as_deref(),
            photo_path,
        )
        .await;

    match result {
        Ok(incident) => Ok((StatusCode::CREATED, Json(incident))),
        Err(e) => {
            if let Some(photo) = &form.photo {
                discard_photo(&*state.photos, photo).await;
            }
            Err(e.into())
        }
    }
}

#[utoipa::path(
    delete,
    path = "/incidencias/{id}",
    tag = "Incidents",
    operation_id = "deleteIncident",
    summary = "Delete an incident",
    description = "Deletes the incident. Its evidence photo is released on a best-effort basis; \
        a missing photo file does not block the delete.",
    params(("id" = String, Path, description = "Incident ID")),
    responses(
        (status = 200, description = "Incident deleted", body = MessageResponse),
        (status = 404, description = "Incident not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_incident(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.delete_incident(&id).await?;
    Ok(Json(MessageResponse::new("Incident deleted")))
}

struct IncidentForm {
    person_id: Option<String>,
    description: Option<String>,
    photo: Option<PhotoRef>,
}

/// Drain the multipart stream. Any photo stored before a later failure is
/// released again so a rejected request leaves nothing behind.
async fn read_incident_form(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<IncidentForm, AppError> {
    let mut form = IncidentForm {
        person_id: None,
        description: None,
        photo: None,
    };

    let result = async {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            match field.name() {
                Some("personaId") => form.person_id = Some(read_text(field, "personaId").await?),
                Some("descripcion") => {
                    form.description = Some(read_text(field, "descripcion").await?)
                }
                Some("foto") => {
                    // Browsers send an empty, unnamed part when no file was chosen.
                    let Some(file_name) = field
                        .file_name()
                        .map(str::to_string)
                        .filter(|name| !name.trim().is_empty())
                    else {
                        continue;
                    };
                    if form.photo.is_some() {
                        return Err(AppError::Validation("Only one photo may be uploaded".into()));
                    }
                    let ext = photo_extension(&file_name, field.content_type())
                        .map_err(|e| AppError::Validation(e.message().into()))?;
                    let photo = stream_field_to_store(field, &*state.photos, &ext).await?;
                    form.photo = Some(photo);
                }
                _ => {} // Ignore unknown fields.
            }
        }
        Ok::<(), AppError>(())
    }
    .await;

    if let Err(e) = result {
        if let Some(photo) = &form.photo {
            discard_photo(&*state.photos, photo).await;
        }
        return Err(e);
    }
    Ok(form)
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))
}

/// Stream a multipart field straight into the photo store, which enforces
/// the size limit. Empty files are released again and rejected.
async fn stream_field_to_store(
    field: Field<'_>,
    photos: &dyn PhotoStore,
    extension: &str,
) -> Result<PhotoRef, AppError> {
    let body = Box::pin(field.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)));
    let reader: BoxReader<'_> = Box::new(StreamReader::new(body));

    let photo = match photos.put_stream(extension, reader).await {
        Ok(photo) => photo,
        Err(StorageError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
            return Err(AppError::Validation(format!("Upload read error: {e}")));
        }
        Err(e) => return Err(e.into()),
    };

    match photos.size(&photo).await {
        Ok(0) => {
            discard_photo(photos, &photo).await;
            Err(AppError::Validation("Photo is empty".into()))
        }
        Ok(_) => Ok(photo),
        Err(e) => {
            discard_photo(photos, &photo).await;
            Err(e.into())
        }
    }
}

async fn discard_photo(photos: &dyn PhotoStore, photo: &PhotoRef) {
    if let Err(e) = photos.delete(photo).await {
        tracing::warn!(photo = %photo, error = %e, "Failed to discard rejected upload");
    }
}
