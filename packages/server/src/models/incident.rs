use serde::Deserialize;

/// Multipart form accepted by `POST /api/incidencias`. Used for API docs;
/// the handler reads the fields from the stream directly.
#[allow(dead_code)]
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateIncidentForm {
    /// ID of the person the incident is logged against.
    #[serde(rename = "personaId")]
    pub person_id: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    /// Evidence photo (jpeg, jpg, png or gif).
    #[serde(rename = "foto")]
    #[schema(value_type = Option<String>, format = Binary)]
    pub photo: Option<Vec<u8>>,
}
