use serde::{Deserialize, Serialize};

use crate::entity::{Incident, Person};
use crate::store::PersonDetail;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreatePersonRequest {
    /// Display name; must be unique ignoring case.
    #[serde(rename = "nombre", default)]
    #[schema(example = "Ana")]
    pub name: Option<String>,
}

/// A person with their score and full incident history.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PersonDetailResponse {
    #[serde(flatten)]
    pub person: Person,
    #[serde(rename = "puntos")]
    #[schema(example = 3)]
    pub points: usize,
    #[serde(rename = "incidencias")]
    pub incidents: Vec<Incident>,
}

impl From<PersonDetail> for PersonDetailResponse {
    fn from(detail: PersonDetail) -> Self {
        Self {
            points: detail.points(),
            person: detail.person,
            incidents: detail.incidents,
        }
    }
}
