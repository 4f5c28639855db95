use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::Person;
use crate::store::RankingEntry;

#[derive(Serialize, utoipa::ToSchema)]
pub struct RankingEntryResponse {
    #[serde(flatten)]
    pub person: Person,
    #[serde(rename = "puntos")]
    #[schema(example = 5)]
    pub points: usize,
    /// Time of the person's most recent incident, `null` if they have none.
    #[serde(rename = "ultimaIncidencia", with = "crate::entity::timestamp::option")]
    #[schema(value_type = Option<String>, format = DateTime, example = "2024-03-01T10:00:00.000Z")]
    pub last_incident_at: Option<DateTime<Utc>>,
}

impl From<RankingEntry> for RankingEntryResponse {
    fn from(entry: RankingEntry) -> Self {
        Self {
            person: entry.person,
            points: entry.points,
            last_incident_at: entry.last_incident_at,
        }
    }
}
