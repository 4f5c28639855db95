use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single point-earning event logged against one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Incident {
    #[schema(example = "0192f4a2-0b4c-7d11-8e2f-1a2b3c4d5e6f")]
    pub id: String,
    #[serde(rename = "personaId")]
    #[schema(example = "0192f4a1-7c1e-7b3a-9d2e-5f6a7b8c9d0e")]
    pub person_id: String,
    #[serde(rename = "descripcion", default)]
    #[schema(example = "Left the fridge open")]
    pub description: String,
    /// Public path of the evidence photo, if one was uploaded.
    #[serde(rename = "foto", default)]
    #[schema(example = "/uploads/0192f4a2-0b4c-4d11-8e2f-1a2b3c4d5e6f.jpg")]
    pub photo_path: Option<String>,
    #[serde(rename = "fecha", with = "crate::entity::timestamp")]
    #[schema(value_type = String, format = DateTime, example = "2024-03-01T10:00:00.000Z")]
    pub occurred_at: DateTime<Utc>,
}
