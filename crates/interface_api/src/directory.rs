//! In-memory person directory backing the demonstration routes

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use error_kernel::{basic, params, FunctionalCode, FunctionalError};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Raised when a person with the same names is already registered
pub const PERSON_ALREADY_EXISTS: FunctionalCode = FunctionalCode::from_static("PERSON_ALREADY_EXISTS");

/// A registered person
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub age: Option<u8>,
    pub created_at: DateTime<Utc>,
}

/// Data needed to register a person
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub age: Option<u8>,
}

/// Directory errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("person {firstname} {lastname} already registered as {existing}")]
    AlreadyExists {
        firstname: String,
        lastname: String,
        existing: Uuid,
    },

    #[error("no person with id {0}")]
    NotFound(Uuid),
}

impl From<DirectoryError> for FunctionalError {
    fn from(error: DirectoryError) -> Self {
        let parameters = match &error {
            DirectoryError::AlreadyExists { firstname, lastname, .. } => params![firstname, lastname],
            DirectoryError::NotFound(id) => params![id],
        };

        match error {
            DirectoryError::AlreadyExists { .. } => FunctionalError::with_cause(
                PERSON_ALREADY_EXISTS,
                error,
                "person {} {} already exists",
                parameters,
            ),
            DirectoryError::NotFound(_) => {
                basic::not_found_caused_by(error, "person {} not found", parameters)
            }
        }
    }
}

/// Shared person store
#[derive(Debug, Clone, Default)]
pub struct PersonDirectory {
    persons: Arc<RwLock<BTreeMap<Uuid, Person>>>,
}

impl PersonDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a person
    ///
    /// # Errors
    ///
    /// `AlreadyExists` when the first and last names are already taken
    pub async fn insert(&self, person: NewPerson) -> Result<Person, DirectoryError> {
        let mut persons = self.persons.write().await;

        if let Some(existing) = persons
            .values()
            .find(|p| p.firstname == person.firstname && p.lastname == person.lastname)
        {
            return Err(DirectoryError::AlreadyExists {
                firstname: person.firstname,
                lastname: person.lastname,
                existing: existing.id,
            });
        }

        let person = Person {
            id: Uuid::now_v7(),
            firstname: person.firstname,
            lastname: person.lastname,
            email: person.email,
            age: person.age,
            created_at: Utc::now(),
        };
        persons.insert(person.id, person.clone());

        Ok(person)
    }

    pub async fn get(&self, id: Uuid) -> Result<Person, DirectoryError> {
        self.persons
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(DirectoryError::NotFound(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<Person, DirectoryError> {
        self.persons
            .write()
            .await
            .remove(&id)
            .ok_or(DirectoryError::NotFound(id))
    }

    /// Lists persons ordered by id
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of persons returned
    /// * `lastname` - Only persons with this last name, when given
    pub async fn list(&self, limit: usize, lastname: Option<&str>) -> Vec<Person> {
        self.persons
            .read()
            .await
            .values()
            .filter(|p| lastname.map_or(true, |lastname| p.lastname == lastname))
            .take(limit)
            .cloned()
            .collect()
    }
}
