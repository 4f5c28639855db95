use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person who accrues points through incidents.
///
/// Field names follow the persisted document (`nombre`, `fechaCreacion`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Person {
    /// Opaque identifier, immutable once assigned.
    #[schema(example = "0192f4a1-7c1e-7b3a-9d2e-5f6a7b8c9d0e")]
    pub id: String,
    #[serde(rename = "nombre")]
    #[schema(example = "Ana")]
    pub name: String,
    #[serde(rename = "fechaCreacion", with = "crate::entity::timestamp")]
    #[schema(value_type = String, format = DateTime, example = "2024-03-01T10:00:00.000Z")]
    pub created_at: DateTime<Utc>,
}

impl Person {
    /// Case-insensitive name comparison used for uniqueness.
    pub fn has_name(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
