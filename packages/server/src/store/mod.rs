//! The record store: sole owner of people, incidents, and the durable
//! document backing them.
//!
//! Every operation runs under one lock. Mutations work on a copy of the
//! document, persist it atomically, and only then publish it, so a failed
//! write leaves both memory and disk as they were. Photo files belonging to
//! removed incidents are released after the commit, best effort.

mod document;
mod error;
pub mod ranking;

use std::path::PathBuf;
use std::sync::Arc;

use common::storage::PhotoStore;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::entity::{Incident, Person, timestamp};

pub use document::{Document, DocumentFile};
pub use error::StoreError;
pub use ranking::RankingEntry;

/// A person together with all of their incidents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDetail {
    pub person: Person,
    pub incidents: Vec<Incident>,
}

impl PersonDetail {
    pub fn points(&self) -> usize {
        self.incidents.len()
    }
}

pub struct RecordStore {
    file: DocumentFile,
    doc: Mutex<Document>,
    photos: Arc<dyn PhotoStore>,
}

impl RecordStore {
    /// Open the store at `path`, creating an empty document if none exists.
    pub async fn open(path: PathBuf, photos: Arc<dyn PhotoStore>) -> Result<Self, StoreError> {
        let file = DocumentFile::new(path);
        let doc = file.load_or_init().await?;
        info!(
            path = %file.path().display(),
            people = doc.people.len(),
            incidents = doc.incidents.len(),
            "Record store opened"
        );
        Ok(Self {
            file,
            doc: Mutex::new(doc),
            photos,
        })
    }

    pub async fn list_people(&self) -> Vec<Person> {
        self.doc.lock().await.people.clone()
    }

    pub async fn get_person(&self, id: &str) -> Result<PersonDetail, StoreError> {
        let doc = self.doc.lock().await;
        let person = doc
            .people
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| person_not_found(id))?;
        let incidents = doc
            .incidents
            .iter()
            .filter(|i| i.person_id == id)
            .cloned()
            .collect();
        Ok(PersonDetail { person, incidents })
    }

    pub async fn create_person(&self, name: &str) -> Result<Person, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("Name is required".into()));
        }

        let person = self
            .commit(|doc| {
                if doc.people.iter().any(|p| p.has_name(name)) {
                    return Err(StoreError::Conflict(format!(
                        "A person named '{name}' already exists"
                    )));
                }
                let person = Person {
                    id: new_id(),
                    name: name.to_string(),
                    created_at: timestamp::now(),
                };
                doc.people.push(person.clone());
                Ok(person)
            })
            .await?;

        info!(person_id = %person.id, name = %person.name, "Person created");
        Ok(person)
    }

    /// Delete a person and every incident referencing them.
    pub async fn delete_person(&self, id: &str) -> Result<(), StoreError> {
        let removed = self
            .commit(|doc| {
                let index = doc
                    .people
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or_else(|| person_not_found(id))?;
                doc.people.remove(index);

                let (removed, kept) = std::mem::take(&mut doc.incidents)
                    .into_iter()
                    .partition::<Vec<_>, _>(|i| i.person_id == id);
                doc.incidents = kept;
                Ok(removed)
            })
            .await?;

        info!(person_id = %id, incidents = removed.len(), "Person deleted");
        let paths: Vec<&str> = removed
            .iter()
            .filter_map(|i| i.photo_path.as_deref())
            .collect();
        self.release_photos(paths).await;
        Ok(())
    }

    pub async fn list_incidents(&self) -> Vec<Incident> {
        self.doc.lock().await.incidents.clone()
    }

    pub async fn create_incident(
        &self,
        person_id: &str,
        description: Option<&str>,
        photo_path: Option<String>,
    ) -> Result<Incident, StoreError> {
        if person_id.trim().is_empty() {
            return Err(StoreError::InvalidInput("Person ID is required".into()));
        }

        let incident = self
            .commit(|doc| {
                if !doc.people.iter().any(|p| p.id == person_id) {
                    return Err(person_not_found(person_id));
                }
                let incident = Incident {
                    id: new_id(),
                    person_id: person_id.to_string(),
                    description: description.unwrap_or_default().to_string(),
                    photo_path,
                    occurred_at: timestamp::now(),
                };
                doc.incidents.push(incident.clone());
                Ok(incident)
            })
            .await?;

        info!(
            incident_id = %incident.id,
            person_id = %incident.person_id,
            has_photo = incident.photo_path.is_some(),
            "Incident created"
        );
        Ok(incident)
    }

    pub async fn delete_incident(&self, id: &str) -> Result<(), StoreError> {
        let removed = self
            .commit(|doc| {
                let index = doc
                    .incidents
                    .iter()
                    .position(|i| i.id == id)
                    .ok_or_else(|| StoreError::NotFound(format!("Incident '{id}' not found")))?;
                Ok(doc.incidents.remove(index))
            })
            .await?;

        info!(incident_id = %id, person_id = %removed.person_id, "Incident deleted");
        self.release_photos(removed.photo_path.as_deref()).await;
        Ok(())
    }

    pub async fn compute_ranking(&self) -> Vec<RankingEntry> {
        let doc = self.doc.lock().await;
        ranking::compute(&doc.people, &doc.incidents)
    }

    /// Run `mutate` against a copy of the document, persist the copy, then
    /// publish it. The lock is held for the whole cycle.
    async fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut Document) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut current = self.doc.lock().await;
        let mut next = current.clone();
        let out = mutate(&mut next)?;
        self.file.save(&next).await?;
        *current = next;
        Ok(out)
    }

    /// Best-effort removal of photo files. Failures are logged only.
    async fn release_photos<'a>(&self, paths: impl IntoIterator<Item = &'a str>) {
        for path in paths {
            let photo = match self.photos.parse_public_path(path) {
                Ok(photo) => photo,
                Err(e) => {
                    warn!(path, error = %e, "Skipping release of unrecognized photo path");
                    continue;
                }
            };
            match self.photos.delete(&photo).await {
                Ok(true) => debug!(path, "Released photo"),
                Ok(false) => debug!(path, "Photo already gone"),
                Err(e) => warn!(path, error = %e, "Failed to release photo"),
            }
        }
    }
}

fn new_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

fn person_not_found(id: &str) -> StoreError {
    StoreError::NotFound(format!("Person '{id}' not found"))
}
