//! Person DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::directory::{NewPerson, Person};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePersonRequest {
    #[validate(length(min = 1, max = 30))]
    pub firstname: String,
    #[validate(length(min = 1, max = 30))]
    pub lastname: String,
    #[validate(email)]
    pub email: String,
    #[validate(range(max = 150))]
    pub age: Option<u8>,
}

impl From<CreatePersonRequest> for NewPerson {
    fn from(request: CreatePersonRequest) -> Self {
        Self {
            firstname: request.firstname,
            lastname: request.lastname,
            email: request.email,
            age: request.age,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ListPersonsQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
    #[validate(length(min = 1))]
    pub lastname: Option<String>,
}

fn default_limit() -> usize {
    20
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PersonResponse {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            firstname: person.firstname,
            lastname: person.lastname,
            email: person.email,
            age: person.age,
            created_at: person.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArchiveResponse {
    pub id: Uuid,
    pub location: String,
}
